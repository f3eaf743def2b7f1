//! Originating-actor field correction.
//!
//! The audit event row type exposes the raw `originated_by_user_id` column.
//! This module hides that attribute and republishes the same value under the
//! inflection's `originating_actor_field` name. The republished field can
//! later be swapped for a resolved reference to the actor entity without
//! exposing the column twice.

use crate::error::{Error, Result};
use crate::fragments::{AUDIT_FUNCTION_NAME, AUDIT_ORIGINATOR_COLUMN};
use crate::generator::ACTOR_ID_SCALAR;
use crate::inflection::AuditInflection;
use crate::introspection::{Annotation, ClassDescriptor, Introspection, ProcedureDescriptor, TypeDescriptor};
use crate::options::AuditPolicy;
use auditgen_proto::{
    ExtensionDocument, FieldExtension, FieldResolution, Fragment, TypeExtension, TypeRef,
};
use tracing::debug;

/// The audit-retrieval function and its return type, as far as they could be
/// found in the snapshot.
#[derive(Debug, Clone, Copy)]
pub struct AuditFunctionInfo<'a> {
    /// The function.
    pub procedure: Option<&'a ProcedureDescriptor>,
    /// Its declared return type.
    pub return_type: Option<&'a TypeDescriptor>,
    /// The class backing the return type.
    pub return_class: Option<&'a ClassDescriptor>,
}

impl<'a> AuditFunctionInfo<'a> {
    /// Look up `<audit_function_schema>.get_audit_information`.
    pub fn resolve(introspection: &'a Introspection, policy: &AuditPolicy) -> Self {
        let procedure = introspection.procedure(&policy.audit_function_schema, AUDIT_FUNCTION_NAME);
        let return_type = procedure.and_then(|p| introspection.type_by_id(p.return_type_id));
        let return_class = return_type
            .and_then(|t| t.class_id)
            .and_then(|id| introspection.class(id));

        if procedure.is_none() {
            debug!(
                schema = %policy.audit_function_schema,
                function = AUDIT_FUNCTION_NAME,
                "Audit function not found"
            );
        }

        Self {
            procedure,
            return_type,
            return_class,
        }
    }

    /// Type name of audit event rows.
    ///
    /// Falls back to the inflection's default name when the return class is
    /// unknown.
    pub fn event_type_name(&self, inflection: &dyn AuditInflection) -> String {
        match self.return_class {
            Some(class) => inflection.table_type(class),
            None => inflection.audit_event_fallback(),
        }
    }
}

/// Output of the actor-field correction.
#[derive(Debug, Clone, PartialEq)]
pub struct ActorFieldCorrection {
    /// Hides the raw actor column, when the return class is known.
    pub annotation: Option<Annotation>,
    /// Adds the republished actor field to the audit event type.
    pub extension: ExtensionDocument,
}

/// Build the actor-field correction for the resolved audit function.
///
/// Fails if the audit function's return class is known but has no
/// `originated_by_user_id` attribute.
pub fn correct_actor_field(
    info: &AuditFunctionInfo<'_>,
    inflection: &dyn AuditInflection,
) -> Result<ActorFieldCorrection> {
    let annotation = match info.return_class {
        Some(class) => {
            let attribute = class.attribute(AUDIT_ORIGINATOR_COLUMN).ok_or_else(|| {
                Error::MissingAttribute {
                    entity: class.qualified_name(),
                    attribute: AUDIT_ORIGINATOR_COLUMN.to_string(),
                }
            })?;
            Some(Annotation::omit_attribute(class.id, &attribute.name))
        }
        None => None,
    };

    let extension = ExtensionDocument::new().with_definition(
        TypeExtension::new(info.event_type_name(inflection)).with_field(FieldExtension::new(
            inflection.originating_actor_field(),
            TypeRef::nullable(ACTOR_ID_SCALAR),
            FieldResolution::fragment(Fragment::row_column(AUDIT_ORIGINATOR_COLUMN)),
        )),
    );

    Ok(ActorFieldCorrection {
        annotation,
        extension,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inflection::DefaultInflection;
    use crate::introspection::ClassKind;

    fn snapshot_with_audit_function(schema: &str) -> Introspection {
        Introspection::new()
            .with_class(
                ClassDescriptor::new(50, "app_public", "audit_event", ClassKind::CompositeType)
                    .with_attribute("id", "int8")
                    .with_attribute("originated_at", "timestamptz")
                    .with_attribute("originated_by_user_id", "uuid"),
            )
            .with_type(TypeDescriptor::composite(500, "audit_event", 50))
            .with_procedure(ProcedureDescriptor::new(900, schema, "get_audit_information", 500))
    }

    #[test]
    fn test_resolve_function() {
        let snapshot = snapshot_with_audit_function("app_public");
        let info = AuditFunctionInfo::resolve(&snapshot, &AuditPolicy::default());

        assert!(info.procedure.is_some());
        assert_eq!(info.return_type.map(|t| t.id), Some(500));
        assert_eq!(info.return_class.map(|c| c.id), Some(50));
        assert_eq!(info.event_type_name(&DefaultInflection), "AuditEvent");
    }

    #[test]
    fn test_correction_hides_and_republishes() {
        let snapshot = snapshot_with_audit_function("app_public");
        let info = AuditFunctionInfo::resolve(&snapshot, &AuditPolicy::default());
        let correction = correct_actor_field(&info, &DefaultInflection).unwrap();

        assert_eq!(
            correction.annotation,
            Some(Annotation::omit_attribute(50, "originated_by_user_id"))
        );
        let field = correction
            .extension
            .find_field("AuditEvent", "originatedByUserId")
            .unwrap();
        assert_eq!(field.field_type, TypeRef::nullable("UUID"));
        assert_eq!(
            field.resolution,
            FieldResolution::fragment(Fragment::row_column("originated_by_user_id"))
        );

        let annotations: Vec<_> = correction.annotation.into_iter().collect();
        let annotated = snapshot.with_annotations(&annotations).unwrap();
        assert!(annotated
            .class(50)
            .unwrap()
            .attribute("originated_by_user_id")
            .unwrap()
            .is_omitted());
    }

    #[test]
    fn test_annotation_targets_owning_class() {
        let mut return_class =
            ClassDescriptor::new(50, "app_public", "audit_events", ClassKind::CompositeType)
                .with_attribute("id", "int8")
                .with_attribute("originated_by_user_id", "uuid");
        for attribute in &mut return_class.attributes {
            attribute.class_id = 999;
        }
        let snapshot = Introspection::new()
            .with_class(return_class)
            .with_type(TypeDescriptor::composite(500, "audit_events", 50))
            .with_procedure(ProcedureDescriptor::new(900, "app_public", "get_audit_information", 500));
        let info = AuditFunctionInfo::resolve(&snapshot, &AuditPolicy::default());
        let correction = correct_actor_field(&info, &DefaultInflection).unwrap();

        assert_eq!(
            correction.annotation,
            Some(Annotation::omit_attribute(50, "originated_by_user_id"))
        );
        assert_eq!(correction.extension.definitions[0].type_name, "AuditEvent");

        let annotations: Vec<_> = correction.annotation.into_iter().collect();
        assert!(snapshot.with_annotations(&annotations).is_ok());
    }

    #[test]
    fn test_missing_function_falls_back() {
        let snapshot = snapshot_with_audit_function("somewhere_else");
        let info = AuditFunctionInfo::resolve(&snapshot, &AuditPolicy::default());
        assert!(info.procedure.is_none());

        let correction = correct_actor_field(&info, &DefaultInflection).unwrap();
        assert!(correction.annotation.is_none());
        assert_eq!(correction.extension.definitions[0].type_name, "AuditEvent");
    }

    #[test]
    fn test_missing_actor_attribute_is_reported() {
        let snapshot = Introspection::new()
            .with_class(
                ClassDescriptor::new(50, "app_public", "audit_record", ClassKind::CompositeType)
                    .with_attribute("id", "int8"),
            )
            .with_type(TypeDescriptor::composite(500, "audit_record", 50))
            .with_procedure(ProcedureDescriptor::new(900, "app_public", "get_audit_information", 500));
        let info = AuditFunctionInfo::resolve(&snapshot, &AuditPolicy::default());

        assert_eq!(info.event_type_name(&DefaultInflection), "AuditRecord");
        assert!(matches!(
            correct_actor_field(&info, &DefaultInflection),
            Err(Error::MissingAttribute { .. })
        ));
    }
}
