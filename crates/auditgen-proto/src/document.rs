//! Schema-extension document model.
//!
//! An [`ExtensionDocument`] is an ordered list of `extend type` blocks. Each
//! field carries a typed [`FieldResolution`] telling the execution engine how
//! to resolve it, so nothing is ever spliced into the document as text.
//!
//! The `Display` impls render SDL for inspection; the fragments inside
//! directives are shown with [`ROW_ALIAS_PLACEHOLDER`](crate::fragment::ROW_ALIAS_PLACEHOLDER)
//! in place of the row alias.

use crate::builder::Mutator;
use crate::error::Error;
use crate::fragment::Fragment;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A named output type, with nullability.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeRef {
    /// Type name.
    pub name: String,
    /// Whether the field is declared non-null.
    pub non_null: bool,
}

impl TypeRef {
    /// A nullable type.
    pub fn nullable(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            non_null: false,
        }
    }

    /// A non-null type.
    pub fn non_null(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            non_null: true,
        }
    }

    /// Check if the type is nullable.
    pub fn is_nullable(&self) -> bool {
        !self.non_null
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.non_null {
            write!(f, "{}!", self.name)
        } else {
            f.write_str(&self.name)
        }
    }
}

/// How the execution engine resolves a generated field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldResolution {
    /// Select rows from `source`, optionally adjusting the sub-query first.
    Source {
        /// Row-returning source expression.
        source: Fragment,
        /// Mutations applied to the sub-query builder.
        mutator: Option<Mutator>,
    },
    /// Project a scalar expression into the parent row.
    Fragment {
        /// Scalar expression.
        fragment: Fragment,
    },
}

impl FieldResolution {
    /// Row source with an optional mutator.
    pub fn source(source: Fragment, mutator: Option<Mutator>) -> Self {
        FieldResolution::Source { source, mutator }
    }

    /// Scalar fragment.
    pub fn fragment(fragment: Fragment) -> Self {
        FieldResolution::Fragment { fragment }
    }
}

impl fmt::Display for FieldResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldResolution::Source { source, mutator } => {
                write!(f, "@pgQuery(source: {}", quote(&source.to_string()))?;
                if let Some(mutator) = mutator {
                    write!(f, ", withQueryBuilder: {}", quote(&mutator.to_string()))?;
                }
                f.write_str(")")
            }
            FieldResolution::Fragment { fragment } => {
                write!(f, "@pgQuery(fragment: {})", quote(&fragment.to_string()))
            }
        }
    }
}

/// One generated field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldExtension {
    /// Field name.
    pub name: String,
    /// Declared type.
    pub field_type: TypeRef,
    /// Resolution strategy.
    pub resolution: FieldResolution,
}

impl FieldExtension {
    /// Create a field.
    pub fn new(name: impl Into<String>, field_type: TypeRef, resolution: FieldResolution) -> Self {
        Self {
            name: name.into(),
            field_type,
            resolution,
        }
    }
}

impl fmt::Display for FieldExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} {}", self.name, self.field_type, self.resolution)
    }
}

/// An `extend type` block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeExtension {
    /// Name of the extended type.
    pub type_name: String,
    /// Fields added to the type.
    pub fields: Vec<FieldExtension>,
}

impl TypeExtension {
    /// Create an empty extension of `type_name`.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    /// Add a field.
    pub fn with_field(mut self, field: FieldExtension) -> Self {
        self.fields.push(field);
        self
    }

    /// Get a field by name.
    pub fn get_field(&self, name: &str) -> Option<&FieldExtension> {
        self.fields.iter().find(|f| f.name == name)
    }
}

impl fmt::Display for TypeExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "extend type {} {{", self.type_name)?;
        for field in &self.fields {
            writeln!(f, "  {}", field)?;
        }
        f.write_str("}")
    }
}

/// An ordered list of type extensions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExtensionDocument {
    /// Definitions in the order they were produced.
    pub definitions: Vec<TypeExtension>,
}

impl ExtensionDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition.
    pub fn with_definition(mut self, definition: TypeExtension) -> Self {
        self.definitions.push(definition);
        self
    }

    /// Append a definition.
    pub fn push(&mut self, definition: TypeExtension) {
        self.definitions.push(definition);
    }

    /// Number of definitions.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Check if the document has no definitions.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// All definitions extending `type_name`, in document order.
    pub fn extensions_of(&self, type_name: &str) -> impl Iterator<Item = &TypeExtension> + '_ {
        let type_name = type_name.to_owned();
        self.definitions
            .iter()
            .filter(move |d| d.type_name == type_name)
    }

    /// Field names added to `type_name`, in document order.
    pub fn field_names(&self, type_name: &str) -> Vec<&str> {
        self.extensions_of(type_name)
            .flat_map(|d| d.fields.iter().map(|f| f.name.as_str()))
            .collect()
    }

    /// Find a field added to `type_name`.
    pub fn find_field(&self, type_name: &str, field: &str) -> Option<&FieldExtension> {
        self.extensions_of(type_name).find_map(|d| d.get_field(field))
    }

    /// Total number of generated fields.
    pub fn field_count(&self) -> usize {
        self.definitions.iter().map(|d| d.fields.len()).sum()
    }

    /// Encode the document as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for ExtensionDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, definition) in self.definitions.iter().enumerate() {
            if i > 0 {
                f.write_str("\n\n")?;
            }
            write!(f, "{}", definition)?;
        }
        Ok(())
    }
}

/// Concatenate documents in order.
///
/// Definitions are appended as-is: no deduplication and no conflict
/// detection. Two definitions adding the same field to the same type both
/// survive and the consumer decides what that means.
pub fn merge_documents<I>(documents: I) -> ExtensionDocument
where
    I: IntoIterator<Item = ExtensionDocument>,
{
    let mut merged = ExtensionDocument::new();
    for document in documents {
        merged.definitions.extend(document.definitions);
    }
    merged
}

fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}
