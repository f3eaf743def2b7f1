//! Introspected relational metadata.
//!
//! These types describe what the catalog introspection layer hands to the
//! generator: classes with their attributes, functions, and types.

mod annotation;
mod attribute;
mod class;
mod procedure;
mod snapshot;
mod tags;

pub use annotation::Annotation;
pub use attribute::AttributeDescriptor;
pub use class::{ClassDescriptor, ClassKind};
pub use procedure::{ProcedureDescriptor, TypeDescriptor};
pub use snapshot::Introspection;
pub use tags::{TagValue, Tags, OMIT_TAG};
