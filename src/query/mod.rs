//! Query Module - criteria filters and deferred store operations

pub mod criteria;
pub mod ops;

pub use criteria::{Criteria, ID_FIELD};
pub use ops::{DeleteMany, DeleteOne, DocumentBatch, FindMany, FindOne, Insert, UpsertOne};
