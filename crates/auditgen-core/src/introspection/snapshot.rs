//! Introspection snapshot.

use super::annotation::Annotation;
use super::class::ClassDescriptor;
use super::procedure::{ProcedureDescriptor, TypeDescriptor};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything the generator reads from the database catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Introspection {
    /// Classes in introspection order.
    #[serde(default)]
    pub classes: Vec<ClassDescriptor>,
    /// Functions.
    #[serde(default)]
    pub procedures: Vec<ProcedureDescriptor>,
    /// Types.
    #[serde(default)]
    pub types: Vec<TypeDescriptor>,
}

impl Introspection {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class.
    pub fn with_class(mut self, class: ClassDescriptor) -> Self {
        self.classes.push(class);
        self
    }

    /// Add a procedure.
    pub fn with_procedure(mut self, procedure: ProcedureDescriptor) -> Self {
        self.procedures.push(procedure);
        self
    }

    /// Add a type.
    pub fn with_type(mut self, type_desc: TypeDescriptor) -> Self {
        self.types.push(type_desc);
        self
    }

    /// Get a class by id.
    pub fn class(&self, id: u32) -> Option<&ClassDescriptor> {
        self.classes.iter().find(|c| c.id == id)
    }

    /// Get a type by id.
    pub fn type_by_id(&self, id: u32) -> Option<&TypeDescriptor> {
        self.types.iter().find(|t| t.id == id)
    }

    /// Find a function by schema and name.
    pub fn procedure(&self, namespace_name: &str, name: &str) -> Option<&ProcedureDescriptor> {
        self.procedures
            .iter()
            .find(|p| p.namespace_name == namespace_name && p.name == name)
    }

    /// Decode a snapshot from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a snapshot from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Return a copy of this snapshot with `annotations` applied.
    ///
    /// `self` is left untouched. Fails if an annotation names a class or
    /// attribute that does not exist.
    pub fn with_annotations(&self, annotations: &[Annotation]) -> Result<Self> {
        let mut annotated = self.clone();
        for annotation in annotations {
            match annotation {
                Annotation::OmitAttribute {
                    class_id,
                    attribute,
                } => {
                    let class = annotated
                        .classes
                        .iter_mut()
                        .find(|c| c.id == *class_id)
                        .ok_or(Error::UnknownClass(*class_id))?;
                    let qualified = class.qualified_name();
                    let attr = class.attribute_mut(attribute).ok_or_else(|| {
                        Error::MissingAttribute {
                            entity: qualified,
                            attribute: attribute.clone(),
                        }
                    })?;
                    attr.tags.set_omit();
                }
            }
        }
        Ok(annotated)
    }
}
