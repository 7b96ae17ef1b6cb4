//! Deferred store operations
//!
//! Every accessor method returns a not-yet-executed operation object holding
//! the target model name and the criteria computed at call time. The caller
//! may refine it further (`where_eq`, `limit`) and then run it with
//! `execute`, which resolves the model to its collection and delegates to
//! the backing store.

use serde_json::Value;

use crate::error::ModelResult;
use crate::model::Document;
use crate::store::{Database, DocumentStore};

use super::criteria::Criteria;

/// A single document payload or an ordered batch of payloads
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentBatch {
    /// One document
    One(Document),
    /// Many documents, order preserved
    Many(Vec<Document>),
}

impl DocumentBatch {
    /// Documents in the batch, in input order
    pub fn documents(&self) -> Vec<&Document> {
        match self {
            Self::One(doc) => vec![doc],
            Self::Many(docs) => docs.iter().collect(),
        }
    }

    /// Number of documents in the batch
    pub fn len(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Many(docs) => docs.len(),
        }
    }

    /// Whether the batch holds no documents
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consume the batch into a plain vector, in input order
    pub fn into_vec(self) -> Vec<Document> {
        match self {
            Self::One(doc) => vec![doc],
            Self::Many(docs) => docs,
        }
    }
}

impl From<Document> for DocumentBatch {
    fn from(doc: Document) -> Self {
        Self::One(doc)
    }
}

impl From<Vec<Document>> for DocumentBatch {
    fn from(docs: Vec<Document>) -> Self {
        Self::Many(docs)
    }
}

/// Deferred lookup of a single document
#[derive(Debug, Clone)]
pub struct FindOne {
    model: String,
    criteria: Criteria,
}

impl FindOne {
    /// Create a find-one operation against the given model
    pub fn new(model: &str, criteria: Criteria) -> Self {
        Self {
            model: model.to_string(),
            criteria,
        }
    }

    /// Add an equality condition
    pub fn where_eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.criteria.insert(field, value);
        self
    }

    /// The criteria this operation will run with
    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    /// Run the lookup; absence is an empty result, not an error
    pub async fn execute<S: DocumentStore>(
        &self,
        db: &Database<S>,
    ) -> ModelResult<Option<Document>> {
        let collection = db.collection_of(&self.model)?;
        db.store().find_one(&collection, &self.criteria).await
    }
}

/// Deferred lookup of every matching document
#[derive(Debug, Clone)]
pub struct FindMany {
    model: String,
    criteria: Criteria,
    limit: Option<usize>,
}

impl FindMany {
    /// Create a find operation against the given model
    pub fn new(model: &str, criteria: Criteria) -> Self {
        Self {
            model: model.to_string(),
            criteria,
            limit: None,
        }
    }

    /// Add an equality condition
    pub fn where_eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.criteria.insert(field, value);
        self
    }

    /// Cap the number of returned documents
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// The criteria this operation will run with
    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    /// Run the lookup
    pub async fn execute<S: DocumentStore>(&self, db: &Database<S>) -> ModelResult<Vec<Document>> {
        let collection = db.collection_of(&self.model)?;
        db.store().find(&collection, &self.criteria, self.limit).await
    }
}

/// Deferred find-and-replace-or-create of a single document
#[derive(Debug, Clone)]
pub struct UpsertOne {
    model: String,
    criteria: Criteria,
    payload: Document,
}

impl UpsertOne {
    /// Create an upsert operation against the given model
    pub fn new(model: &str, criteria: Criteria, payload: Document) -> Self {
        Self {
            model: model.to_string(),
            criteria,
            payload,
        }
    }

    /// The payload that will replace or create the matching document
    pub fn payload(&self) -> &Document {
        &self.payload
    }

    /// Run the upsert and return the post-upsert document
    pub async fn execute<S: DocumentStore>(&self, db: &Database<S>) -> ModelResult<Document> {
        let collection = db.collection_of(&self.model)?;
        db.store()
            .find_one_and_upsert(&collection, &self.criteria, self.payload.clone())
            .await
    }
}

/// Deferred creation of one document or an ordered batch
#[derive(Debug, Clone)]
pub struct Insert {
    model: String,
    batch: DocumentBatch,
}

impl Insert {
    /// Create an insert operation against the given model
    pub fn new(model: &str, batch: DocumentBatch) -> Self {
        Self {
            model: model.to_string(),
            batch,
        }
    }

    /// The batch that will be created
    pub fn batch(&self) -> &DocumentBatch {
        &self.batch
    }

    /// Run the insert; the result preserves the input shape and order
    pub async fn execute<S: DocumentStore>(&self, db: &Database<S>) -> ModelResult<DocumentBatch> {
        let collection = db.collection_of(&self.model)?;
        match &self.batch {
            DocumentBatch::One(doc) => {
                let mut created = db
                    .store()
                    .insert_many(&collection, vec![doc.clone()])
                    .await?;
                Ok(DocumentBatch::One(created.remove(0)))
            }
            DocumentBatch::Many(docs) => {
                let created = db.store().insert_many(&collection, docs.clone()).await?;
                Ok(DocumentBatch::Many(created))
            }
        }
    }
}

/// Deferred find-and-delete of a single document
#[derive(Debug, Clone)]
pub struct DeleteOne {
    model: String,
    criteria: Criteria,
}

impl DeleteOne {
    /// Create a delete-one operation against the given model
    pub fn new(model: &str, criteria: Criteria) -> Self {
        Self {
            model: model.to_string(),
            criteria,
        }
    }

    /// Add an equality condition
    pub fn where_eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.criteria.insert(field, value);
        self
    }

    /// The criteria this operation will run with
    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    /// Run the deletion and return the removed document, if any matched
    pub async fn execute<S: DocumentStore>(
        &self,
        db: &Database<S>,
    ) -> ModelResult<Option<Document>> {
        let collection = db.collection_of(&self.model)?;
        db.store().find_one_and_delete(&collection, &self.criteria).await
    }
}

/// Deferred deletion of every matching document
#[derive(Debug, Clone)]
pub struct DeleteMany {
    model: String,
    criteria: Criteria,
}

impl DeleteMany {
    /// Create a delete operation against the given model
    pub fn new(model: &str, criteria: Criteria) -> Self {
        Self {
            model: model.to_string(),
            criteria,
        }
    }

    /// Add an equality condition
    pub fn where_eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.criteria.insert(field, value);
        self
    }

    /// The criteria this operation will run with
    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    /// Run the deletion and return the number of removed documents
    pub async fn execute<S: DocumentStore>(&self, db: &Database<S>) -> ModelResult<u64> {
        let collection = db.collection_of(&self.model)?;
        db.store().delete_many(&collection, &self.criteria).await
    }
}
