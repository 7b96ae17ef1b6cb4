//! Document values - schemaless field maps with client-generated identity
//!
//! Documents carry their identifier from the moment they are created, so an
//! unsaved instance can already participate in association criteria.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Identifier for a persisted or to-be-persisted document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Generate a fresh identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier from its hyphenated string form
    pub fn parse(value: &str) -> Option<Self> {
        Uuid::parse_str(value).ok().map(Self)
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<DocumentId> for Value {
    fn from(id: DocumentId) -> Self {
        Value::String(id.to_string())
    }
}

/// A document: an identifier plus an ordered map of named field values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "_id")]
    id: DocumentId,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl Document {
    /// Create an empty document with a freshly generated identifier
    pub fn new() -> Self {
        Self {
            id: DocumentId::new(),
            fields: Map::new(),
        }
    }

    /// Create an empty document with the given identifier
    pub fn with_id(id: DocumentId) -> Self {
        Self {
            id,
            fields: Map::new(),
        }
    }

    /// Set a field, builder style
    pub fn with_field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    /// The document identifier
    pub fn id(&self) -> DocumentId {
        self.id
    }

    /// Get a field value by name
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Set a field value by name
    pub fn set_field(&mut self, name: &str, value: impl Into<Value>) {
        self.fields.insert(name.to_string(), value.into());
    }

    /// All field values
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Replace every field with those of `other`, keeping this document's id
    pub fn replace_fields(&mut self, other: &Document) {
        self.fields = other.fields.clone();
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_identity_is_assigned_eagerly() {
        let a = Document::new();
        let b = Document::new();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_document_fields() {
        let mut doc = Document::new().with_field("name", "front");
        assert_eq!(doc.field("name"), Some(&Value::String("front".to_string())));

        doc.set_field("size", 4);
        assert_eq!(doc.field("size"), Some(&Value::from(4)));
        assert!(doc.field("missing").is_none());
    }

    #[test]
    fn test_document_serde_round_trip() {
        let doc = Document::new().with_field("name", "front");
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["_id"], Value::String(doc.id().to_string()));
        assert_eq!(json["name"], Value::String("front".to_string()));

        let back: Document = serde_json::from_value(json).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_replace_fields_keeps_id() {
        let mut doc = Document::new().with_field("name", "old");
        let id = doc.id();
        let replacement = Document::new().with_field("name", "new");
        doc.replace_fields(&replacement);
        assert_eq!(doc.id(), id);
        assert_eq!(doc.field("name"), Some(&Value::String("new".to_string())));
    }

    #[test]
    fn test_document_id_parse() {
        let id = DocumentId::new();
        assert_eq!(DocumentId::parse(&id.to_string()), Some(id));
        assert_eq!(DocumentId::parse("not-an-id"), None);
    }
}
