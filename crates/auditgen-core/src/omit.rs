//! Hiding of audit id columns.

use crate::introspection::{Annotation, ClassDescriptor};
use crate::options::AuditPolicy;

/// Annotations hiding the audit id column of each audited class.
///
/// Empty unless `omit_audit_ids` is set. Classes without the column are
/// skipped.
pub fn omit_audit_id_annotations(classes: &[&ClassDescriptor], policy: &AuditPolicy) -> Vec<Annotation> {
    if !policy.omit_audit_ids {
        return Vec::new();
    }
    classes
        .iter()
        .filter_map(|class| {
            class
                .attribute(&policy.audit_id_column)
                .map(|attr| Annotation::omit_attribute(class.id, &attr.name))
        })
        .collect()
}
