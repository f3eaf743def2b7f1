//! auditgen output types.
//!
//! This crate defines the values the generator hands to a schema execution
//! engine: composable SQL fragments, builder mutations, and the
//! schema-extension document that carries them.
//!
//! # Modules
//!
//! - [`fragment`] - Composable SQL expression trees rendered against a row alias
//! - [`builder`] - The query-builder contract and the mutations applied to it
//! - [`document`] - `extend type` blocks, field resolutions, and document merging
//! - [`error`] - Rendering and encoding errors
//!
//! # Example
//!
//! ```rust
//! use auditgen_proto::{Fragment, Mutator, SelectBuilder};
//!
//! let source = Fragment::call("app_public", "get_audit_information", vec![Fragment::row_column("id")]);
//! let mut builder = SelectBuilder::new("orders_1", "audit_1", source);
//! Mutator::new().limit(1).apply(&mut builder);
//! assert!(builder.to_sql().unwrap().ends_with("LIMIT 1"));
//! ```

pub mod builder;
pub mod document;
pub mod error;
pub mod fragment;

pub use error::Error;

// Re-export commonly used types at crate root
pub use builder::{BuilderMutation, Mutator, QueryBuilder, SelectBuilder, SelectOrder};
pub use document::{
    merge_documents, ExtensionDocument, FieldExtension, FieldResolution, TypeExtension, TypeRef,
};
pub use fragment::{Fragment, OrderTerm, SortDirection, ROW_ALIAS_PLACEHOLDER};
