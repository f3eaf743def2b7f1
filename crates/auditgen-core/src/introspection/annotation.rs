//! Metadata annotations produced by generation.
//!
//! Generation never edits the introspection snapshot it reads. Components that
//! need to hide something return an [`Annotation`]; the pipeline applies all
//! of them to a copy via [`Introspection::with_annotations`](super::Introspection::with_annotations).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A change to apply to introspected metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Annotation {
    /// Set the `omit` tag on an attribute.
    OmitAttribute {
        /// Owning class id.
        class_id: u32,
        /// Attribute name.
        attribute: String,
    },
}

impl Annotation {
    /// Hide `attribute` of class `class_id`.
    pub fn omit_attribute(class_id: u32, attribute: impl Into<String>) -> Self {
        Annotation::OmitAttribute {
            class_id,
            attribute: attribute.into(),
        }
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Annotation::OmitAttribute {
                class_id,
                attribute,
            } => write!(f, "omit attribute '{}' of class {}", attribute, class_id),
        }
    }
}
