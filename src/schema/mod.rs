//! Schema Module - collection-level field and association definitions

pub mod definition;

pub use definition::{FieldDefinition, FieldType, Schema};
