//! End-to-end audit schema generation.
//!
//! The stages run in a fixed order, each receiving what the earlier ones
//! produced:
//!
//! 1. resolve options into an [`AuditPolicy`]
//! 2. look up the audit function and derive the audit event type names
//! 3. classify audited entities
//! 4. generate and merge per-entity field extensions
//! 5. build the actor-field correction
//! 6. collect annotations and apply them to a copy of the snapshot

use crate::actor::{correct_actor_field, AuditFunctionInfo};
use crate::classify::audited_classes;
use crate::error::Result;
use crate::generator::{AuditTypeNames, FieldExtensionGenerator};
use crate::inflection::AuditInflection;
use crate::introspection::{Annotation, Introspection};
use crate::omit::omit_audit_id_annotations;
use crate::options::{ActorNameSource, AuditOptions, AuditPolicy};
use auditgen_proto::{merge_documents, ExtensionDocument};
use tracing::{debug, info, instrument};

/// Everything one generation pass produces.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedSchema {
    /// The resolved policy the pass ran with.
    pub policy: AuditPolicy,
    /// Merged schema extension.
    pub document: ExtensionDocument,
    /// Metadata changes requested by the pass.
    pub annotations: Vec<Annotation>,
    /// Copy of the input snapshot with `annotations` applied.
    pub introspection: Introspection,
    /// Qualified names of the audited entities, in input order.
    pub audited_entities: Vec<String>,
}

impl GeneratedSchema {
    /// Check if no entity was augmented.
    pub fn is_empty(&self) -> bool {
        self.audited_entities.is_empty()
    }
}

/// Resolve `options` and run the pipeline.
pub fn generate(
    introspection: &Introspection,
    options: &AuditOptions,
    inflection: &dyn AuditInflection,
) -> Result<GeneratedSchema> {
    let policy = AuditPolicy::resolve(options);
    generate_with_policy(introspection, &policy, inflection)
}

/// Run the pipeline with an already resolved policy.
///
/// The input snapshot is never modified. When no entity qualifies the result
/// carries an empty document, no annotations, and an unchanged copy of the
/// snapshot.
#[instrument(skip_all, fields(classes = introspection.classes.len()))]
pub fn generate_with_policy(
    introspection: &Introspection,
    policy: &AuditPolicy,
    inflection: &dyn AuditInflection,
) -> Result<GeneratedSchema> {
    if policy.name_source == ActorNameSource::SessionInfo {
        debug!("Session-info actor names are not generated; using originator ids");
    }

    let function = AuditFunctionInfo::resolve(introspection, policy);
    let types = AuditTypeNames::new(function.event_type_name(inflection), inflection);

    let audited = audited_classes(&introspection.classes, policy);
    let generator = FieldExtensionGenerator::new(policy, inflection, &types);
    let entity_document = generator.generate_all(&audited)?;

    if audited.is_empty() {
        return Ok(GeneratedSchema {
            policy: policy.clone(),
            document: entity_document,
            annotations: Vec::new(),
            introspection: introspection.clone(),
            audited_entities: Vec::new(),
        });
    }

    let correction = correct_actor_field(&function, inflection)?;

    let mut annotations: Vec<Annotation> = correction.annotation.into_iter().collect();
    annotations.extend(omit_audit_id_annotations(&audited, policy));

    let document = merge_documents([entity_document, correction.extension]);
    let annotated = introspection.with_annotations(&annotations)?;

    info!(
        entities = audited.len(),
        definitions = document.len(),
        fields = document.field_count(),
        annotations = annotations.len(),
        "Generated audit schema extension"
    );

    Ok(GeneratedSchema {
        policy: policy.clone(),
        document,
        annotations,
        introspection: annotated,
        audited_entities: audited.iter().map(|c| c.qualified_name()).collect(),
    })
}
