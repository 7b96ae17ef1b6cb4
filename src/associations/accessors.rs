//! Association accessors - typed operations bound to an instance
//!
//! The dynamic method synthesis of schema-scripted document layers becomes
//! a struct of named operations here: registration records metadata, and
//! the database binds that metadata to an explicit instance to produce one
//! of these accessors. Every method computes its criteria from instance
//! state at call time and returns a deferred operation; nothing executes
//! until the caller runs it against a database.

use serde_json::Value;

use crate::inflection::Inflector;
use crate::model::{Document, DocumentId, ModelInstance};
use crate::query::{
    Criteria, DeleteMany, DeleteOne, DocumentBatch, FindMany, FindOne, Insert, UpsertOne, ID_FIELD,
};
use crate::store::{Database, DocumentStore};
use crate::error::ModelResult;

use super::metadata::AssociationMetadata;

/// Inverse accessor: lets an owned document resolve its owner
pub struct MorphBy<'a> {
    metadata: AssociationMetadata,
    owned: &'a dyn ModelInstance,
}

impl<'a> MorphBy<'a> {
    /// Bind the descriptor to an owned instance
    pub fn new(metadata: AssociationMetadata, owned: &'a dyn ModelInstance) -> Self {
        Self { metadata, owned }
    }

    /// The descriptor this accessor was built from
    pub fn metadata(&self) -> &AssociationMetadata {
        &self.metadata
    }

    /// Deferred lookup of the owner document
    ///
    /// The lookup resolves empty without touching the store when the
    /// `<name>Id` field is unset, or when the `<name>Type` discriminator is
    /// set but names a model other than the registered owner model.
    pub fn find(&self) -> OwnerLookup {
        let id = self
            .owned
            .field(&self.metadata.id_field())
            .filter(|value| !value.is_null());

        let discriminator_matches = match self.owned.field(&self.metadata.type_field()) {
            Some(Value::String(stored)) => stored == self.metadata.target_model,
            Some(Value::Null) | None => true,
            Some(_) => false,
        };

        let query = match (id, discriminator_matches) {
            (Some(id), true) => Some(FindOne::new(
                &self.metadata.target_model,
                Criteria::new().with(ID_FIELD, id),
            )),
            _ => None,
        };
        OwnerLookup { query }
    }
}

/// Deferred owner lookup, possibly short-circuited to an empty result
#[derive(Debug, Clone)]
pub struct OwnerLookup {
    query: Option<FindOne>,
}

impl OwnerLookup {
    /// The underlying query, if the lookup can reach the store at all
    pub fn query(&self) -> Option<&FindOne> {
        self.query.as_ref()
    }

    /// Run the lookup; unresolvable lookups yield an empty result
    pub async fn execute<S: DocumentStore>(
        &self,
        db: &Database<S>,
    ) -> ModelResult<Option<Document>> {
        match &self.query {
            Some(query) => query.execute(db).await,
            None => Ok(None),
        }
    }
}

/// Owner-side accessor for a one-to-one polymorphic association
pub struct MorphOne<'a> {
    metadata: AssociationMetadata,
    owner: &'a dyn ModelInstance,
    inflector: &'a dyn Inflector,
}

impl<'a> std::fmt::Debug for MorphOne<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MorphOne")
            .field("metadata", &self.metadata)
            .field("owner", &self.owner.collection_name())
            .finish()
    }
}

impl<'a> MorphOne<'a> {
    /// Bind the descriptor to an owner instance
    pub fn new(
        metadata: AssociationMetadata,
        owner: &'a dyn ModelInstance,
        inflector: &'a dyn Inflector,
    ) -> Self {
        Self {
            metadata,
            owner,
            inflector,
        }
    }

    /// The descriptor this accessor was built from
    pub fn metadata(&self) -> &AssociationMetadata {
        &self.metadata
    }

    fn criteria(&self) -> Criteria {
        self.metadata.criteria_for(self.owner, self.inflector)
    }

    /// Deferred lookup of the owned document
    pub fn get(&self) -> FindOne {
        FindOne::new(&self.metadata.target_model, self.criteria())
    }

    /// Deferred upsert of the owned document
    ///
    /// Association criteria are stamped over the payload before the upsert;
    /// conflicting payload keys lose.
    pub fn set(&self, mut payload: Document) -> UpsertOne {
        let criteria = self.criteria();
        criteria.stamp(&mut payload);
        UpsertOne::new(&self.metadata.target_model, criteria, payload)
    }

    /// Deferred removal of the owned document
    pub fn remove(&self) -> DeleteOne {
        DeleteOne::new(&self.metadata.target_model, self.criteria())
    }
}

/// Owner-side accessor for a one-to-many polymorphic association
pub struct MorphMany<'a> {
    metadata: AssociationMetadata,
    owner: &'a dyn ModelInstance,
    inflector: &'a dyn Inflector,
}

impl<'a> MorphMany<'a> {
    /// Bind the descriptor to an owner instance
    pub fn new(
        metadata: AssociationMetadata,
        owner: &'a dyn ModelInstance,
        inflector: &'a dyn Inflector,
    ) -> Self {
        Self {
            metadata,
            owner,
            inflector,
        }
    }

    /// The descriptor this accessor was built from
    pub fn metadata(&self) -> &AssociationMetadata {
        &self.metadata
    }

    fn criteria(&self) -> Criteria {
        self.metadata.criteria_for(self.owner, self.inflector)
    }

    /// Deferred lookup of one owned document by id
    ///
    /// A document that exists under a different owner is not found; the id
    /// must match together with the owner criteria.
    pub fn get(&self, id: DocumentId) -> FindOne {
        FindOne::new(
            &self.metadata.target_model,
            self.criteria().with(ID_FIELD, id),
        )
    }

    /// Deferred lookup of every owned document
    pub fn get_all(&self) -> FindMany {
        FindMany::new(&self.metadata.target_model, self.criteria())
    }

    /// Deferred creation of one owned document or an ordered batch
    ///
    /// Every payload is stamped with the association criteria; the result
    /// preserves the input shape and order.
    pub fn add(&self, payload: impl Into<DocumentBatch>) -> Insert {
        let criteria = self.criteria();
        let batch = match payload.into() {
            DocumentBatch::One(mut doc) => {
                criteria.stamp(&mut doc);
                DocumentBatch::One(doc)
            }
            DocumentBatch::Many(docs) => DocumentBatch::Many(
                docs.into_iter()
                    .map(|mut doc| {
                        criteria.stamp(&mut doc);
                        doc
                    })
                    .collect(),
            ),
        };
        Insert::new(&self.metadata.target_model, batch)
    }

    /// Deferred removal of one owned document by id
    pub fn remove(&self, id: DocumentId) -> DeleteOne {
        DeleteOne::new(
            &self.metadata.target_model,
            self.criteria().with(ID_FIELD, id),
        )
    }

    /// Deferred removal of every owned document
    pub fn remove_all(&self) -> DeleteMany {
        DeleteMany::new(&self.metadata.target_model, self.criteria())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::associations::AssociationKind;
    use crate::inflection::EnglishInflector;

    fn morph_one_meta() -> AssociationMetadata {
        AssociationMetadata::new(AssociationKind::MorphOne, "photoable", "Photo")
    }

    fn morph_many_meta() -> AssociationMetadata {
        AssociationMetadata::new(AssociationKind::MorphMany, "photoable", "Photo")
    }

    #[test]
    fn test_morph_one_criteria_are_recomputed_per_call() {
        let owner = Document::new();
        let instance = owner.in_collection("passports");
        let accessor = MorphOne::new(morph_one_meta(), &instance, &EnglishInflector);

        let first = accessor.get();
        let second = accessor.get();
        assert_eq!(first.criteria(), second.criteria());
        assert_eq!(
            first.criteria().get("photoableId"),
            Some(&Value::String(owner.id().to_string()))
        );
        assert_eq!(
            first.criteria().get("photoableType"),
            Some(&Value::String("Passport".to_string()))
        );
    }

    #[test]
    fn test_morph_one_set_stamps_criteria_over_payload() {
        let owner = Document::new();
        let instance = owner.in_collection("passports");
        let accessor = MorphOne::new(morph_one_meta(), &instance, &EnglishInflector);

        let payload = Document::new()
            .with_field("name", "front")
            .with_field("photoableType", "Forged")
            .with_field("photoableId", "bogus");
        let op = accessor.set(payload);

        assert_eq!(
            op.payload().field("photoableType"),
            Some(&Value::String("Passport".to_string()))
        );
        assert_eq!(
            op.payload().field("photoableId"),
            Some(&Value::String(owner.id().to_string()))
        );
        assert_eq!(
            op.payload().field("name"),
            Some(&Value::String("front".to_string()))
        );
    }

    #[test]
    fn test_morph_many_id_scoped_operations_keep_owner_criteria() {
        let owner = Document::new();
        let instance = owner.in_collection("passports");
        let accessor = MorphMany::new(morph_many_meta(), &instance, &EnglishInflector);

        let target = DocumentId::new();
        let get = accessor.get(target);
        assert_eq!(
            get.criteria().get(ID_FIELD),
            Some(&Value::String(target.to_string()))
        );
        assert_eq!(
            get.criteria().get("photoableId"),
            Some(&Value::String(owner.id().to_string()))
        );

        let remove = accessor.remove(target);
        assert_eq!(remove.criteria().len(), 3);
    }

    #[test]
    fn test_morph_many_add_stamps_each_payload_in_order() {
        let owner = Document::new();
        let instance = owner.in_collection("passports");
        let accessor = MorphMany::new(morph_many_meta(), &instance, &EnglishInflector);

        let op = accessor.add(vec![
            Document::new().with_field("name", "first"),
            Document::new().with_field("name", "second"),
        ]);
        let docs = op.batch().documents();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].field("name"), Some(&Value::String("first".into())));
        assert_eq!(docs[1].field("name"), Some(&Value::String("second".into())));
        for doc in docs {
            assert_eq!(
                doc.field("photoableType"),
                Some(&Value::String("Passport".to_string()))
            );
        }

        let single = accessor.add(Document::new().with_field("name", "only"));
        assert!(matches!(single.batch(), DocumentBatch::One(_)));
    }

    #[test]
    fn test_morph_by_short_circuits_on_unset_id() {
        let meta = AssociationMetadata::new(AssociationKind::MorphBy, "photoable", "Passport");
        let photo = Document::new().with_field("name", "front");
        let instance = photo.in_collection("photos");

        let lookup = MorphBy::new(meta, &instance).find();
        assert!(lookup.query().is_none());
    }

    #[test]
    fn test_morph_by_short_circuits_on_foreign_discriminator() {
        let meta = AssociationMetadata::new(AssociationKind::MorphBy, "photoable", "Passport");
        let photo = Document::new()
            .with_field("photoableId", DocumentId::new().to_string())
            .with_field("photoableType", "Visa");
        let instance = photo.in_collection("photos");

        let lookup = MorphBy::new(meta, &instance).find();
        assert!(lookup.query().is_none());
    }

    #[test]
    fn test_morph_by_builds_identity_lookup_when_discriminator_matches() {
        let meta = AssociationMetadata::new(AssociationKind::MorphBy, "photoable", "Passport");
        let owner_id = DocumentId::new();
        let photo = Document::new()
            .with_field("photoableId", owner_id.to_string())
            .with_field("photoableType", "Passport");
        let instance = photo.in_collection("photos");

        let lookup = MorphBy::new(meta, &instance).find();
        let query = lookup.query().unwrap();
        assert_eq!(
            query.criteria().get(ID_FIELD),
            Some(&Value::String(owner_id.to_string()))
        );
        assert_eq!(query.criteria().len(), 1);
    }
}
