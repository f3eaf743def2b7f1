//! auditgen core - audit field generation for introspected schemas.
//!
//! Given an introspection snapshot of a relational database, this crate
//! finds the audited tables and produces a schema extension adding audit
//! history fields to each of them:
//!
//! - `firstAuditEvent` / `lastAuditEvent`
//! - `lastModifiedAt` / `lastModifiedBy`
//! - `auditEvents`, a connection over every audit event
//!
//! All fields resolve through the audit log's `get_audit_information`
//! function at request time. Nothing is executed here; the output carries
//! typed fragments and builder mutations for the execution engine.
//!
//! # Usage
//!
//! ```rust
//! use auditgen_core::{generate, AuditOptions, DefaultInflection, Introspection};
//!
//! let snapshot = Introspection::new();
//! let schema = generate(&snapshot, &AuditOptions::default(), &DefaultInflection).unwrap();
//! assert!(schema.document.is_empty());
//! ```

pub mod actor;
pub mod classify;
pub mod error;
pub mod fragments;
pub mod generator;
pub mod inflection;
pub mod introspection;
pub mod omit;
pub mod options;
pub mod pipeline;

pub use actor::{correct_actor_field, ActorFieldCorrection, AuditFunctionInfo};
pub use classify::{audited_classes, is_audited_class, AUDIT_ID_ATTRIBUTE};
pub use error::{Error, Result};
pub use fragments::{AuditFragments, Which};
pub use generator::{AuditTypeNames, FieldExtensionGenerator};
pub use inflection::{AuditInflection, DefaultInflection};
pub use introspection::{
    Annotation, AttributeDescriptor, ClassDescriptor, ClassKind, Introspection,
    ProcedureDescriptor, TypeDescriptor,
};
pub use omit::omit_audit_id_annotations;
pub use options::{ActorNameSource, AuditOptions, AuditPolicy};
pub use pipeline::{generate, generate_with_policy, GeneratedSchema};

/// Re-export output types.
pub use auditgen_proto as proto;
