//! Class (relation) descriptors.

use super::attribute::AttributeDescriptor;
use super::tags::Tags;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of an introspected class.
///
/// Accepts both the long names and PostgreSQL `relkind` codes when decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
    /// Ordinary base table (`r`).
    #[serde(alias = "r")]
    OrdinaryTable,
    /// View (`v`).
    #[serde(alias = "v")]
    View,
    /// Materialized view (`m`).
    #[serde(alias = "m")]
    MaterializedView,
    /// Composite type (`c`).
    #[serde(alias = "c")]
    CompositeType,
    /// Foreign table (`f`).
    #[serde(alias = "f")]
    ForeignTable,
    /// Partitioned table (`p`).
    #[serde(alias = "p")]
    PartitionedTable,
    /// Anything else (sequences, indexes, TOAST tables).
    #[serde(other)]
    Other,
}

impl ClassKind {
    /// Map a PostgreSQL `relkind` code.
    pub fn from_relkind(code: char) -> Self {
        match code {
            'r' => ClassKind::OrdinaryTable,
            'v' => ClassKind::View,
            'm' => ClassKind::MaterializedView,
            'c' => ClassKind::CompositeType,
            'f' => ClassKind::ForeignTable,
            'p' => ClassKind::PartitionedTable,
            _ => ClassKind::Other,
        }
    }

    /// Check if this is an ordinary base table.
    pub fn is_ordinary_table(self) -> bool {
        matches!(self, ClassKind::OrdinaryTable)
    }
}

/// An introspected relation: table, view, composite type, ...
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDescriptor {
    /// Class id (unique within the snapshot).
    pub id: u32,
    /// Namespace (schema) name.
    pub namespace_name: String,
    /// Class name.
    pub name: String,
    /// Class kind.
    pub kind: ClassKind,
    /// Attributes in column order.
    #[serde(default)]
    pub attributes: Vec<AttributeDescriptor>,
    /// Smart tags.
    #[serde(default)]
    pub tags: Tags,
}

impl ClassDescriptor {
    /// Create a class without attributes.
    pub fn new(
        id: u32,
        namespace_name: impl Into<String>,
        name: impl Into<String>,
        kind: ClassKind,
    ) -> Self {
        Self {
            id,
            namespace_name: namespace_name.into(),
            name: name.into(),
            kind,
            attributes: Vec::new(),
            tags: Tags::default(),
        }
    }

    /// Create an ordinary table.
    pub fn table(id: u32, namespace_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, namespace_name, name, ClassKind::OrdinaryTable)
    }

    /// Add an attribute owned by this class.
    pub fn with_attribute(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.attributes
            .push(AttributeDescriptor::new(self.id, name, type_name));
        self
    }

    /// Add several attributes owned by this class.
    pub fn with_attributes<'a>(mut self, attributes: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        for (name, type_name) in attributes {
            self = self.with_attribute(name, type_name);
        }
        self
    }

    /// Get an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&AttributeDescriptor> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub(crate) fn attribute_mut(&mut self, name: &str) -> Option<&mut AttributeDescriptor> {
        self.attributes.iter_mut().find(|a| a.name == name)
    }

    /// Check if the class owns an attribute with this exact name.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// `namespace.name`.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.namespace_name, self.name)
    }
}

impl fmt::Display for ClassDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace_name, self.name)
    }
}
