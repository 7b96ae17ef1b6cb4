//! # morph-orm: Polymorphic associations for document-backed models
//!
//! A schema layer where one model ("owner") can be referenced generically
//! by documents of many other models through a shared field pair: a
//! reference id and a type discriminator. Schemas declare associations at
//! model-definition time (`morph_by`, `morph_one`, `morph_many`); the
//! database binds the recorded metadata to concrete instances and hands out
//! typed accessors whose methods build deferred operations against a
//! pluggable document store.
//!
//! ```
//! use morph_orm::{Database, Document, Schema};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> morph_orm::ModelResult<()> {
//! let db = Database::in_memory();
//! db.register_model("Passport", Schema::new().morph_one("Photo", "photoable")?)?;
//! db.register_model("Photo", Schema::new().morph_by("Passport", "photoable")?)?;
//!
//! let passport = Document::new().with_field("country", "IS");
//! let owner = passport.in_collection("passports");
//!
//! let photo = db
//!     .morph_one(&owner, "photoable")?
//!     .set(Document::new().with_field("name", "front"))
//!     .execute(&db)
//!     .await?;
//! assert_eq!(
//!     photo.field("photoableType").and_then(|v| v.as_str()),
//!     Some("Passport"),
//! );
//! # Ok(())
//! # }
//! ```

pub mod associations;
pub mod error;
pub mod inflection;
pub mod model;
pub mod query;
pub mod schema;
pub mod store;

// Re-export core traits and types
pub use associations::*;
pub use error::*;
pub use inflection::*;
pub use model::*;
pub use query::*;
pub use schema::*;
pub use store::*;
