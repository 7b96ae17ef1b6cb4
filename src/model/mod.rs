//! Model System - document values and instance identity
//!
//! - `document`: identifier and field-map types persisted by the store
//! - `instance`: the explicit instance contract accessors operate on

pub mod document;
pub mod instance;

pub use document::{Document, DocumentId};
pub use instance::{DocumentRef, ModelInstance};
