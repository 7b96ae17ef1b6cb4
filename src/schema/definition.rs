//! Schema definitions - typed fields and the associations declared on them
//!
//! A [`Schema`] describes one collection: its named fields and the
//! polymorphic associations registered against it. Schemas are built once at
//! model-definition time and handed to the database when the model is
//! registered; they are never mutated afterwards.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::associations::AssociationMetadata;

/// Storage type of a schema field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    /// Reference identifier
    Id,
    /// UTF-8 string
    String,
    /// Numeric value
    Number,
    /// Boolean value
    Bool,
    /// Timestamp
    Date,
    /// Arbitrary JSON value
    Json,
}

/// Definition of a single schema field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// The storage type of the field
    pub field_type: FieldType,

    /// Whether the field carries an index
    pub index: bool,

    /// Whether the field must be present on write
    pub required: bool,
}

impl FieldDefinition {
    /// Create a new field definition of the given type
    pub fn new(field_type: FieldType) -> Self {
        Self {
            field_type,
            index: false,
            required: false,
        }
    }

    /// Mark the field as indexed
    pub fn indexed(mut self) -> Self {
        self.index = true;
        self
    }

    /// Mark the field as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Collection-level definition: fields plus declared associations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    fields: BTreeMap<String, FieldDefinition>,
    associations: Vec<AssociationMetadata>,
}

impl Schema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, builder style
    pub fn with_field(mut self, name: &str, definition: FieldDefinition) -> Self {
        self.fields.insert(name.to_string(), definition);
        self
    }

    /// Add a field in place
    pub fn add_field(&mut self, name: &str, definition: FieldDefinition) {
        self.fields.insert(name.to_string(), definition);
    }

    /// Look up a field definition by name
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.get(name)
    }

    /// All field definitions
    pub fn fields(&self) -> &BTreeMap<String, FieldDefinition> {
        &self.fields
    }

    /// Associations declared on this schema
    pub fn associations(&self) -> &[AssociationMetadata] {
        &self.associations
    }

    pub(crate) fn push_association(&mut self, metadata: AssociationMetadata) {
        self.associations.push(metadata);
    }
}
