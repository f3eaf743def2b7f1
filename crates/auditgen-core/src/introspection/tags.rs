//! Smart-tag maps attached to classes and attributes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tag key marking a class or attribute hidden from direct exposure.
pub const OMIT_TAG: &str = "omit";

/// A single tag value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagValue {
    /// Boolean flag (`@omit`).
    Flag(bool),
    /// Text value (`@omit create,update`).
    Text(String),
    /// Repeated tag.
    List(Vec<String>),
}

/// Ordered tag map.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tags(BTreeMap<String, TagValue>);

impl Tags {
    /// Create an empty tag map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a tag value.
    pub fn get(&self, key: &str) -> Option<&TagValue> {
        self.0.get(key)
    }

    /// Set a tag value.
    pub fn insert(&mut self, key: impl Into<String>, value: TagValue) {
        self.0.insert(key.into(), value);
    }

    /// Check if the `omit` tag hides the item entirely.
    pub fn is_omitted(&self) -> bool {
        matches!(self.get(OMIT_TAG), Some(TagValue::Flag(true)))
    }

    /// Hide the item entirely.
    pub fn set_omit(&mut self) {
        self.insert(OMIT_TAG, TagValue::Flag(true));
    }

    /// Number of tags.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no tags.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_omit_flag() {
        let mut tags = Tags::new();
        assert!(!tags.is_omitted());
        tags.set_omit();
        assert!(tags.is_omitted());
        assert_eq!(tags.len(), 1);
    }

    #[test]
    fn test_partial_omit_is_not_full_omit() {
        let mut tags = Tags::new();
        tags.insert(OMIT_TAG, TagValue::Text("create,update".into()));
        assert!(!tags.is_omitted());
    }

    #[test]
    fn test_deserialize_mixed_values() {
        let tags: Tags =
            serde_json::from_str(r#"{"omit": true, "name": "orderRow", "foreignKey": ["a", "b"]}"#)
                .unwrap();
        assert!(tags.is_omitted());
        assert_eq!(tags.get("name"), Some(&TagValue::Text("orderRow".into())));
        assert!(matches!(tags.get("foreignKey"), Some(TagValue::List(v)) if v.len() == 2));
    }
}
