//! Associations Module - polymorphic association metadata and accessors
//!
//! A polymorphic association lets one model ("owner") be referenced
//! generically by documents of other models through a shared field pair:
//! `<name>Id` holding the owner's identity and `<name>Type` holding the
//! owner's model name. Registration happens on the schema
//! ([`crate::schema::Schema::morph_by`] and friends); runtime access goes
//! through the typed accessors handed out by
//! [`crate::store::Database`].

pub mod accessors;
pub mod metadata;
pub mod registrar;
pub mod registry;

pub use accessors::{MorphBy, MorphMany, MorphOne, OwnerLookup};
pub use metadata::{AssociationKind, AssociationMetadata};
pub use registry::AssociationRegistry;
