//! Attribute (column) descriptors.

use super::tags::Tags;
use serde::{Deserialize, Serialize};

/// A column of an introspected class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeDescriptor {
    /// Id of the owning class.
    pub class_id: u32,
    /// Column name.
    pub name: String,
    /// Column type name.
    #[serde(default)]
    pub type_name: String,
    /// Smart tags.
    #[serde(default)]
    pub tags: Tags,
}

impl AttributeDescriptor {
    /// Create an attribute owned by `class_id`.
    pub fn new(class_id: u32, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            class_id,
            name: name.into(),
            type_name: type_name.into(),
            tags: Tags::default(),
        }
    }

    /// Check if the attribute is hidden from direct exposure.
    pub fn is_omitted(&self) -> bool {
        self.tags.is_omitted()
    }
}
