//! Store Module - pluggable document persistence
//!
//! The association layer performs no I/O of its own; it builds criteria and
//! delegates to a [`DocumentStore`]. The store surface mirrors the handful
//! of operations accessors need: single/multi find, upsert, single/multi
//! delete, and ordered batch insert.

pub mod database;
pub mod memory;

use async_trait::async_trait;

use crate::error::ModelResult;
use crate::model::Document;
use crate::query::Criteria;

pub use database::{Database, RegisteredModel};
pub use memory::MemoryStore;

/// Persistence collaborator accessors delegate to
///
/// Errors raised here are propagated verbatim to callers; "no match" is an
/// empty successful result, never an error.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Find the first document in `collection` matching `criteria`
    async fn find_one(
        &self,
        collection: &str,
        criteria: &Criteria,
    ) -> ModelResult<Option<Document>>;

    /// Find every document in `collection` matching `criteria`
    async fn find(
        &self,
        collection: &str,
        criteria: &Criteria,
        limit: Option<usize>,
    ) -> ModelResult<Vec<Document>>;

    /// Replace the first document matching `criteria` with `replacement`,
    /// creating it if absent; returns the post-upsert document
    async fn find_one_and_upsert(
        &self,
        collection: &str,
        criteria: &Criteria,
        replacement: Document,
    ) -> ModelResult<Document>;

    /// Delete the first document matching `criteria`, returning it
    async fn find_one_and_delete(
        &self,
        collection: &str,
        criteria: &Criteria,
    ) -> ModelResult<Option<Document>>;

    /// Insert documents in order, returning them as stored
    async fn insert_many(
        &self,
        collection: &str,
        documents: Vec<Document>,
    ) -> ModelResult<Vec<Document>>;

    /// Delete every document matching `criteria`, returning the count
    async fn delete_many(&self, collection: &str, criteria: &Criteria) -> ModelResult<u64>;
}
