//! Database handle - model registry plus store and naming collaborators
//!
//! The [`Database`] is the composition root of the layer: it owns the
//! backing store, the model registry (model name to collection and schema),
//! the association registry filled at model registration, and the inflector
//! used to derive names. Nothing here is global; callers create and share a
//! handle explicitly.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use crate::associations::{
    AssociationKind, AssociationMetadata, AssociationRegistry, MorphBy, MorphMany, MorphOne,
};
use crate::error::{ModelError, ModelResult};
use crate::inflection::{EnglishInflector, Inflector};
use crate::model::ModelInstance;
use crate::schema::Schema;

use super::memory::MemoryStore;
use super::DocumentStore;

/// A model known to the database: its collection and schema
#[derive(Debug, Clone)]
pub struct RegisteredModel {
    /// Collection the model's documents live in
    pub collection: String,
    /// The schema the model was registered with
    pub schema: Schema,
}

/// Composition root owning the store, registries, and inflector
pub struct Database<S = MemoryStore> {
    store: S,
    models: DashMap<String, RegisteredModel>,
    associations: AssociationRegistry,
    inflector: Arc<dyn Inflector>,
}

impl Database<MemoryStore> {
    /// Create a database over a fresh in-memory store
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }
}

impl<S: DocumentStore> Database<S> {
    /// Create a database over the given store with English naming rules
    pub fn new(store: S) -> Self {
        Self {
            store,
            models: DashMap::new(),
            associations: AssociationRegistry::new(),
            inflector: Arc::new(EnglishInflector),
        }
    }

    /// Replace the naming collaborator
    pub fn with_inflector(mut self, inflector: Arc<dyn Inflector>) -> Self {
        self.inflector = inflector;
        self
    }

    /// The backing store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The naming collaborator
    pub fn inflector(&self) -> &dyn Inflector {
        self.inflector.as_ref()
    }

    /// Associations registered across all models
    pub fn associations(&self) -> &AssociationRegistry {
        &self.associations
    }

    /// Register a model under its conventional collection name
    /// (lowercased plural of the model name)
    pub fn register_model(&self, name: &str, schema: Schema) -> ModelResult<()> {
        let collection = self.inflector.pluralize(&name.to_lowercase());
        self.register_model_with_collection(name, &collection, schema)
    }

    /// Register a model with an explicit collection name
    pub fn register_model_with_collection(
        &self,
        name: &str,
        collection: &str,
        schema: Schema,
    ) -> ModelResult<()> {
        if name.is_empty() {
            return Err(ModelError::Configuration(
                "no model name provided".to_string(),
            ));
        }
        if collection.is_empty() {
            return Err(ModelError::Configuration(
                "no collection name provided".to_string(),
            ));
        }

        for metadata in schema.associations() {
            metadata.validate()?;
            self.associations
                .register(name, self.normalize(metadata.clone()))?;
        }

        debug!(model = name, collection, "registered model");
        self.models.insert(
            name.to_string(),
            RegisteredModel {
                collection: collection.to_string(),
                schema,
            },
        );
        Ok(())
    }

    /// Look up a registered model by name
    pub fn model(&self, name: &str) -> Option<RegisteredModel> {
        self.models.get(name).map(|entry| entry.clone())
    }

    /// Resolve a model name to its collection
    pub fn collection_of(&self, model: &str) -> ModelResult<String> {
        self.models
            .get(model)
            .map(|entry| entry.collection.clone())
            .ok_or_else(|| ModelError::UnknownModel(model.to_string()))
    }

    /// Model name an instance's collection resolves to
    pub fn model_name_of(&self, instance: &dyn ModelInstance) -> String {
        self.inflector
            .classify(&self.inflector.singularize(instance.collection_name()))
    }

    /// Owner-side one-to-one accessor for the named association
    pub fn morph_one<'a>(
        &'a self,
        owner: &'a dyn ModelInstance,
        morph_name: &str,
    ) -> ModelResult<MorphOne<'a>> {
        let metadata = self.association_of(owner, morph_name, AssociationKind::MorphOne)?;
        Ok(MorphOne::new(metadata, owner, self.inflector.as_ref()))
    }

    /// Owner-side one-to-many accessor for the named association
    pub fn morph_many<'a>(
        &'a self,
        owner: &'a dyn ModelInstance,
        morph_name: &str,
    ) -> ModelResult<MorphMany<'a>> {
        let metadata = self.association_of(owner, morph_name, AssociationKind::MorphMany)?;
        Ok(MorphMany::new(metadata, owner, self.inflector.as_ref()))
    }

    /// Owned-side inverse accessor for the named association
    pub fn morph_by<'a>(
        &'a self,
        owned: &'a dyn ModelInstance,
        morph_name: &str,
    ) -> ModelResult<MorphBy<'a>> {
        let metadata = self.association_of(owned, morph_name, AssociationKind::MorphBy)?;
        Ok(MorphBy::new(metadata, owned))
    }

    fn association_of(
        &self,
        instance: &dyn ModelInstance,
        morph_name: &str,
        kind: AssociationKind,
    ) -> ModelResult<AssociationMetadata> {
        let model = self.model_name_of(instance);
        let metadata = self.associations.get(&model, morph_name).ok_or_else(|| {
            ModelError::Association(format!(
                "no association '{}' registered for model '{}'",
                morph_name, model
            ))
        })?;
        if metadata.kind != kind {
            return Err(ModelError::Association(format!(
                "association '{}' on model '{}' is {:?}, not {:?}",
                morph_name, model, metadata.kind, kind
            )));
        }
        Ok(metadata)
    }

    /// Owned-model names may arrive in plural form; store them singular
    fn normalize(&self, mut metadata: AssociationMetadata) -> AssociationMetadata {
        if !metadata.kind.is_inverse() {
            metadata.target_model = self.inflector.singularize(&metadata.target_model);
        }
        metadata
    }
}
