//! Selection of the classes that receive audit fields.

use crate::introspection::ClassDescriptor;
use crate::options::AuditPolicy;

/// Attribute whose presence marks a table as audited.
pub const AUDIT_ID_ATTRIBUTE: &str = "audit_id";

/// Check if a class is audited.
///
/// A class is audited when it is an ordinary table, lives outside the audit
/// log's own namespace, and owns an attribute named exactly `audit_id`.
pub fn is_audited_class(class: &ClassDescriptor, policy: &AuditPolicy) -> bool {
    class.kind.is_ordinary_table()
        && class.namespace_name != policy.audit_log_schema
        && class.has_attribute(AUDIT_ID_ATTRIBUTE)
}

/// Filter `classes` down to the audited ones, keeping their order.
pub fn audited_classes<'a>(
    classes: &'a [ClassDescriptor],
    policy: &AuditPolicy,
) -> Vec<&'a ClassDescriptor> {
    classes
        .iter()
        .filter(|class| is_audited_class(class, policy))
        .collect()
}
