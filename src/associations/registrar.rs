//! Association registrar - schema-side registration of the three shapes
//!
//! Registration is an explicit, consuming step on the schema builder: it
//! validates the descriptor, installs the companion fields where the shape
//! calls for them, and records the metadata the database later serves
//! accessors from. Configuration errors surface synchronously, before any
//! field is added.

use crate::error::ModelResult;
use crate::schema::{FieldDefinition, FieldType, Schema};

use super::metadata::{AssociationKind, AssociationMetadata};

impl Schema {
    /// Declare the owned side of a polymorphic association ("morphBy")
    ///
    /// Installs the indexed `<name>Id` and `<name>Type` companion fields and
    /// records an inverse accessor resolving to `owner_model`.
    pub fn morph_by(mut self, owner_model: &str, morph_name: &str) -> ModelResult<Self> {
        let metadata = AssociationMetadata::new(AssociationKind::MorphBy, morph_name, owner_model);
        metadata.validate()?;

        self.add_field(
            &metadata.id_field(),
            FieldDefinition::new(FieldType::Id).indexed(),
        );
        self.add_field(
            &metadata.type_field(),
            FieldDefinition::new(FieldType::String).indexed(),
        );
        self.push_association(metadata);
        Ok(self)
    }

    /// Declare an owner-side one-to-one polymorphic association ("morphOne")
    ///
    /// The owned model's schema is expected to carry the matching
    /// [`Schema::morph_by`] declaration; this side only records accessor
    /// metadata.
    pub fn morph_one(mut self, owned_model: &str, morph_name: &str) -> ModelResult<Self> {
        let metadata = AssociationMetadata::new(AssociationKind::MorphOne, morph_name, owned_model);
        metadata.validate()?;
        self.push_association(metadata);
        Ok(self)
    }

    /// Declare an owner-side one-to-many polymorphic association ("morphMany")
    pub fn morph_many(mut self, owned_model: &str, morph_name: &str) -> ModelResult<Self> {
        let metadata =
            AssociationMetadata::new(AssociationKind::MorphMany, morph_name, owned_model);
        metadata.validate()?;
        self.push_association(metadata);
        Ok(self)
    }
}
