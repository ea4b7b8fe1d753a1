//! Wizard field data accumulated across steps.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::value_objects::PhotoRef;

/// A single wizard field value: either typed text or an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    /// A text input value.
    Text(String),

    /// A filled file slot.
    File(PhotoRef),
}

impl FieldValue {
    /// Creates a text value.
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// Creates a file value.
    pub fn file(photo: impl Into<PhotoRef>) -> Self {
        FieldValue::File(photo.into())
    }

    /// Returns the text content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::File(_) => None,
        }
    }

    /// Returns the photo reference, if this is a file value.
    pub fn as_file(&self) -> Option<&PhotoRef> {
        match self {
            FieldValue::Text(_) => None,
            FieldValue::File(photo) => Some(photo),
        }
    }
}

/// The mapping from field name to value accumulated across wizard steps.
///
/// Values merge last-write-wins and are never reset on navigation;
/// retreating and re-advancing sees the same data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMap {
    fields: HashMap<String, FieldValue>,
}

impl FieldMap {
    /// Creates an empty field map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges a value under the key, overwriting any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: FieldValue) {
        self.fields.insert(key.into(), value);
    }

    /// Returns the value under the key.
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Returns the text value under the key, if present.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(FieldValue::as_text)
    }

    /// Returns the file value under the key, if present.
    pub fn file(&self, key: &str) -> Option<&PhotoRef> {
        self.fields.get(key).and_then(FieldValue::as_file)
    }

    /// Returns true if the key holds non-empty text.
    pub fn has_text(&self, key: &str) -> bool {
        self.text(key).is_some_and(|s| !s.trim().is_empty())
    }

    /// Returns true if the key's file slot is filled.
    pub fn has_file(&self, key: &str) -> bool {
        self.file(key).is_some()
    }

    /// Returns the number of fields set.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no field has been set.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_is_last_write_wins() {
        let mut map = FieldMap::new();
        map.set("name", FieldValue::text("Omar"));
        map.set("name", FieldValue::text("Amina"));

        assert_eq!(map.text("name"), Some("Amina"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn repeated_set_same_value_is_effective_noop() {
        let mut map = FieldMap::new();
        map.set("name", FieldValue::text("Omar"));
        let before = map.clone();

        map.set("name", FieldValue::text("Omar"));
        assert_eq!(map, before);
    }

    #[test]
    fn has_text_rejects_blank() {
        let mut map = FieldMap::new();
        map.set("name", FieldValue::text("  "));
        assert!(!map.has_text("name"));

        map.set("name", FieldValue::text("Omar"));
        assert!(map.has_text("name"));
        assert!(!map.has_text("missing"));
    }

    #[test]
    fn file_slot_accessors() {
        let mut map = FieldMap::new();
        assert!(!map.has_file("selfie"));

        map.set("selfie", FieldValue::file("uploads/selfie.jpg"));
        assert!(map.has_file("selfie"));
        assert_eq!(map.file("selfie").unwrap().as_str(), "uploads/selfie.jpg");
        // A file slot is not text
        assert!(!map.has_text("selfie"));
    }

    #[test]
    fn serialization_roundtrip() {
        let mut map = FieldMap::new();
        map.set("name", FieldValue::text("Omar"));
        map.set("selfie", FieldValue::file("uploads/selfie.jpg"));

        let json = serde_json::to_string(&map).unwrap();
        let deserialized: FieldMap = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }
}
