//! Field extension generation.
//!
//! For each audited entity, every enabled field group becomes its own
//! `extend type` block:
//!
//! | group | fields | type |
//! |-------|--------|------|
//! | first/last | `firstAuditEvent`, `lastAuditEvent` | audit event |
//! | date | `lastModifiedAt` | `String` |
//! | name | `lastModifiedBy` | `UUID` |
//! | connection | `auditEvents` | audit event connection |
//!
//! The first/last and connection groups are non-null unless the policy makes
//! them optional. Date and name fields are always nullable.

use crate::error::{Error, Result};
use crate::fragments::{AuditFragments, Which};
use crate::inflection::AuditInflection;
use crate::introspection::ClassDescriptor;
use crate::options::AuditPolicy;
use auditgen_proto::{
    merge_documents, ExtensionDocument, FieldExtension, FieldResolution, TypeExtension, TypeRef,
};
use tracing::{debug, warn};

/// Scalar type of `lastModifiedAt`.
pub const DATE_SCALAR: &str = "String";

/// Scalar type of actor ids.
pub const ACTOR_ID_SCALAR: &str = "UUID";

/// Names of the audit event types the generated fields point at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditTypeNames {
    /// Audit event row type.
    pub event: String,
    /// Connection over audit events.
    pub connection: String,
}

impl AuditTypeNames {
    /// Derive the connection name from the event type name.
    pub fn new(event: impl Into<String>, inflection: &dyn AuditInflection) -> Self {
        let event = event.into();
        let connection = inflection.connection_type(&event);
        Self { event, connection }
    }
}

/// Generator for one pass over the audited entities.
pub struct FieldExtensionGenerator<'a> {
    policy: &'a AuditPolicy,
    inflection: &'a dyn AuditInflection,
    types: &'a AuditTypeNames,
}

impl<'a> FieldExtensionGenerator<'a> {
    /// Create a generator.
    pub fn new(
        policy: &'a AuditPolicy,
        inflection: &'a dyn AuditInflection,
        types: &'a AuditTypeNames,
    ) -> Self {
        Self {
            policy,
            inflection,
            types,
        }
    }

    /// Generate the extension blocks of one audited entity.
    ///
    /// Fails if the entity does not own the configured audit id column,
    /// since every generated fragment reads it.
    pub fn generate_entity(&self, class: &ClassDescriptor) -> Result<ExtensionDocument> {
        if !class.has_attribute(&self.policy.audit_id_column) {
            return Err(Error::MissingAttribute {
                entity: class.qualified_name(),
                attribute: self.policy.audit_id_column.clone(),
            });
        }

        let fragments = AuditFragments::new(class, self.policy);
        let type_name = self.inflection.table_type(class);
        let mut document = ExtensionDocument::new();

        if self.policy.first_last_event {
            let source = fragments.audit_source();
            document.push(
                TypeExtension::new(&type_name)
                    .with_field(FieldExtension::new(
                        self.inflection.first_audit_event(),
                        self.event_type_ref(&self.types.event),
                        FieldResolution::source(
                            source.clone(),
                            Some(fragments.first_or_last_mutator(Which::First)),
                        ),
                    ))
                    .with_field(FieldExtension::new(
                        self.inflection.last_audit_event(),
                        self.event_type_ref(&self.types.event),
                        FieldResolution::source(
                            source,
                            Some(fragments.first_or_last_mutator(Which::Last)),
                        ),
                    )),
            );
        }

        if self.policy.date_fields {
            document.push(TypeExtension::new(&type_name).with_field(FieldExtension::new(
                self.inflection.last_modified_at(),
                TypeRef::nullable(DATE_SCALAR),
                FieldResolution::fragment(fragments.date_projection(Which::Last)),
            )));
        }

        if self.policy.name_fields {
            document.push(TypeExtension::new(&type_name).with_field(FieldExtension::new(
                self.inflection.last_modified_by(),
                TypeRef::nullable(ACTOR_ID_SCALAR),
                FieldResolution::fragment(fragments.actor_projection(Which::Last)),
            )));
        }

        if self.policy.event_connection {
            document.push(TypeExtension::new(&type_name).with_field(FieldExtension::new(
                self.inflection.audit_events(),
                self.event_type_ref(&self.types.connection),
                FieldResolution::source(fragments.audit_source(), None),
            )));
        }

        debug!(
            entity = %class,
            type_name = %type_name,
            blocks = document.len(),
            "Generated audit fields"
        );
        Ok(document)
    }

    /// Generate and merge the blocks of every entity, in order.
    ///
    /// An empty entity list is not an error: a warning is logged and the
    /// result is an empty document.
    pub fn generate_all(&self, classes: &[&ClassDescriptor]) -> Result<ExtensionDocument> {
        if classes.is_empty() {
            warn!("no entities found to add audit fields to");
            return Ok(ExtensionDocument::new());
        }
        let documents = classes
            .iter()
            .map(|class| self.generate_entity(class))
            .collect::<Result<Vec<_>>>()?;
        Ok(merge_documents(documents))
    }

    fn event_type_ref(&self, name: &str) -> TypeRef {
        if self.policy.optional_fields {
            TypeRef::nullable(name)
        } else {
            TypeRef::non_null(name)
        }
    }
}
