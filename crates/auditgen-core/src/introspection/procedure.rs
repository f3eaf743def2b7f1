//! Procedure and type descriptors.

use serde::{Deserialize, Serialize};

/// An introspected function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcedureDescriptor {
    /// Procedure id.
    pub id: u32,
    /// Namespace (schema) name.
    pub namespace_name: String,
    /// Function name.
    pub name: String,
    /// Id of the declared return type.
    pub return_type_id: u32,
}

impl ProcedureDescriptor {
    /// Create a procedure descriptor.
    pub fn new(
        id: u32,
        namespace_name: impl Into<String>,
        name: impl Into<String>,
        return_type_id: u32,
    ) -> Self {
        Self {
            id,
            namespace_name: namespace_name.into(),
            name: name.into(),
            return_type_id,
        }
    }
}

/// An introspected type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// Type id.
    pub id: u32,
    /// Type name.
    pub name: String,
    /// Backing class for composite and row types.
    #[serde(default)]
    pub class_id: Option<u32>,
}

impl TypeDescriptor {
    /// Create a scalar type.
    pub fn scalar(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            class_id: None,
        }
    }

    /// Create a row type backed by a class.
    pub fn composite(id: u32, name: impl Into<String>, class_id: u32) -> Self {
        Self {
            id,
            name: name.into(),
            class_id: Some(class_id),
        }
    }
}
