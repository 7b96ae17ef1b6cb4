//! Instance contract - explicit receiver for association accessors
//!
//! Accessors never capture an implicit receiver; they take something
//! implementing [`ModelInstance`], which exposes exactly the state
//! association criteria are computed from: identity, the collection the
//! instance belongs to, and named field values.

use serde_json::Value;

use super::document::{Document, DocumentId};

/// State an association accessor reads from the instance it is bound to
pub trait ModelInstance {
    /// The instance identifier
    fn id(&self) -> DocumentId;

    /// Name of the collection the instance belongs to
    fn collection_name(&self) -> &str;

    /// A field value by name, if present
    fn field(&self, name: &str) -> Option<Value>;
}

/// A document bound to the collection it lives in
#[derive(Debug, Clone, Copy)]
pub struct DocumentRef<'a> {
    document: &'a Document,
    collection: &'a str,
}

impl<'a> DocumentRef<'a> {
    /// Bind a document to a collection name
    pub fn new(document: &'a Document, collection: &'a str) -> Self {
        Self {
            document,
            collection,
        }
    }

    /// The underlying document
    pub fn document(&self) -> &'a Document {
        self.document
    }
}

impl ModelInstance for DocumentRef<'_> {
    fn id(&self) -> DocumentId {
        self.document.id()
    }

    fn collection_name(&self) -> &str {
        self.collection
    }

    fn field(&self, name: &str) -> Option<Value> {
        self.document.field(name).cloned()
    }
}

impl Document {
    /// View this document as an instance of the given collection
    pub fn in_collection<'a>(&'a self, collection: &'a str) -> DocumentRef<'a> {
        DocumentRef::new(self, collection)
    }
}
