//! Association metadata - the registration-time descriptor
//!
//! One descriptor per declared association: its shape, the polymorphic
//! name the companion fields derive from, and the model on the other side.
//! Descriptors are created at model-definition time and never mutated
//! afterwards.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};
use crate::inflection::Inflector;
use crate::model::ModelInstance;
use crate::query::Criteria;

/// Shape of a polymorphic association
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssociationKind {
    /// Inverse lookup from an owned document to its owner
    MorphBy,
    /// Owner manages exactly one owned document
    MorphOne,
    /// Owner manages a collection of owned documents
    MorphMany,
}

impl AssociationKind {
    /// Returns true if this association resolves to a collection
    pub fn is_collection(self) -> bool {
        matches!(self, Self::MorphMany)
    }

    /// Returns true if this is the owned-to-owner direction
    pub fn is_inverse(self) -> bool {
        matches!(self, Self::MorphBy)
    }
}

/// Descriptor of one declared association
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociationMetadata {
    /// The association shape
    pub kind: AssociationKind,

    /// The polymorphic name the companion fields derive from
    pub morph_name: String,

    /// Owner model name for [`AssociationKind::MorphBy`]; owned model name
    /// otherwise
    pub target_model: String,
}

impl AssociationMetadata {
    /// Create a new descriptor
    pub fn new(kind: AssociationKind, morph_name: &str, target_model: &str) -> Self {
        Self {
            kind,
            morph_name: morph_name.to_string(),
            target_model: target_model.to_string(),
        }
    }

    /// Name of the companion field holding the owner's identity
    pub fn id_field(&self) -> String {
        format!("{}Id", self.morph_name)
    }

    /// Name of the companion field holding the owner's model name
    pub fn type_field(&self) -> String {
        format!("{}Type", self.morph_name)
    }

    /// Validate the descriptor for consistency
    pub fn validate(&self) -> ModelResult<()> {
        if self.target_model.is_empty() {
            return Err(ModelError::Configuration(
                "no model name provided".to_string(),
            ));
        }
        if self.morph_name.is_empty() {
            return Err(ModelError::Configuration(
                "no polymorphic name provided".to_string(),
            ));
        }
        Ok(())
    }

    /// Criteria correlating owned documents back to `owner`
    ///
    /// The owner's model name is derived from its collection name on every
    /// call; nothing is cached between calls.
    pub fn criteria_for(&self, owner: &dyn ModelInstance, inflector: &dyn Inflector) -> Criteria {
        let owner_type = inflector.classify(&inflector.singularize(owner.collection_name()));
        Criteria::new()
            .with(&self.id_field(), owner.id())
            .with(&self.type_field(), owner_type)
    }
}
