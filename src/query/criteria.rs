//! Criteria - field/value filters used to locate documents
//!
//! A criteria object is the sole mechanism by which an owned document is
//! correlated back to its owner: a flat map of field names to expected
//! values. The reserved `_id` key matches against document identity rather
//! than an ordinary field.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::model::Document;

/// Reserved criteria key matching the document identifier
pub const ID_FIELD: &str = "_id";

/// A flat field/value filter over documents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Criteria {
    conditions: Map<String, Value>,
}

impl Criteria {
    /// Create an empty criteria object
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a condition, builder style
    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.conditions.insert(field.to_string(), value.into());
        self
    }

    /// Add a condition in place
    pub fn insert(&mut self, field: &str, value: impl Into<Value>) {
        self.conditions.insert(field.to_string(), value.into());
    }

    /// Get a condition value by field name
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.conditions.get(field)
    }

    /// Number of conditions
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// Whether the criteria has no conditions
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Iterate over conditions
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.conditions.iter()
    }

    /// Whether the given document satisfies every condition
    pub fn matches(&self, document: &Document) -> bool {
        self.conditions.iter().all(|(field, expected)| {
            if field == ID_FIELD {
                Value::String(document.id().to_string()) == *expected
            } else {
                document.field(field) == Some(expected)
            }
        })
    }

    /// Write every non-identity condition into the document as a field value,
    /// overriding any conflicting keys the document already carries
    pub fn stamp(&self, document: &mut Document) {
        for (field, value) in &self.conditions {
            if field != ID_FIELD {
                document.set_field(field, value.clone());
            }
        }
    }
}
