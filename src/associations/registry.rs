//! Association registry - runtime metadata storage and access
//!
//! Instance-owned, thread-safe map of model name to association name to
//! descriptor. The database fills it at model registration and accessors
//! are resolved out of it; nothing global is involved.

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use crate::error::ModelResult;

use super::metadata::AssociationMetadata;

/// Thread-safe registry of association descriptors
#[derive(Debug, Clone, Default)]
pub struct AssociationRegistry {
    associations: Arc<DashMap<String, HashMap<String, AssociationMetadata>>>,
}

impl AssociationRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor for a model; a descriptor with the same
    /// association name replaces the previous one
    pub fn register(&self, model: &str, metadata: AssociationMetadata) -> ModelResult<()> {
        metadata.validate()?;
        debug!(
            model,
            association = metadata.morph_name.as_str(),
            kind = ?metadata.kind,
            "registered association"
        );
        self.associations
            .entry(model.to_string())
            .or_default()
            .insert(metadata.morph_name.clone(), metadata);
        Ok(())
    }

    /// Look up a descriptor by model and association name
    pub fn get(&self, model: &str, association: &str) -> Option<AssociationMetadata> {
        self.associations.get(model)?.get(association).cloned()
    }

    /// Whether a descriptor exists for the given model and name
    pub fn has(&self, model: &str, association: &str) -> bool {
        self.associations
            .get(model)
            .map(|entry| entry.contains_key(association))
            .unwrap_or(false)
    }

    /// Association names registered for a model
    pub fn names_for(&self, model: &str) -> Vec<String> {
        self.associations
            .get(model)
            .map(|entry| entry.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Total number of registered descriptors
    pub fn len(&self) -> usize {
        self.associations.iter().map(|entry| entry.value().len()).sum()
    }

    /// Whether the registry holds no descriptors
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every registered descriptor
    pub fn clear(&self) {
        self.associations.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::associations::AssociationKind;

    fn metadata(name: &str, kind: AssociationKind) -> AssociationMetadata {
        AssociationMetadata::new(kind, name, "Photo")
    }

    #[test]
    fn test_register_and_get() {
        let registry = AssociationRegistry::new();
        let descriptor = metadata("photoable", AssociationKind::MorphOne);

        registry.register("Passport", descriptor.clone()).unwrap();
        assert!(registry.has("Passport", "photoable"));
        assert_eq!(registry.get("Passport", "photoable"), Some(descriptor));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_lookup_misses_yield_none() {
        let registry = AssociationRegistry::new();
        assert!(registry.get("Passport", "photoable").is_none());
        assert!(!registry.has("Passport", "photoable"));
        assert!(registry.names_for("Passport").is_empty());
    }

    #[test]
    fn test_same_name_replaces_descriptor() {
        let registry = AssociationRegistry::new();
        registry
            .register("Passport", metadata("photoable", AssociationKind::MorphOne))
            .unwrap();
        registry
            .register("Passport", metadata("photoable", AssociationKind::MorphMany))
            .unwrap();

        assert_eq!(registry.len(), 1);
        let stored = registry.get("Passport", "photoable").unwrap();
        assert_eq!(stored.kind, AssociationKind::MorphMany);
    }

    #[test]
    fn test_invalid_descriptor_is_rejected() {
        let registry = AssociationRegistry::new();
        let invalid = AssociationMetadata::new(AssociationKind::MorphOne, "", "Photo");
        assert!(registry.register("Passport", invalid).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_names_and_clear() {
        let registry = AssociationRegistry::new();
        registry
            .register("Passport", metadata("photoable", AssociationKind::MorphOne))
            .unwrap();
        registry
            .register("Passport", metadata("stampable", AssociationKind::MorphMany))
            .unwrap();

        let mut names = registry.names_for("Passport");
        names.sort();
        assert_eq!(names, vec!["photoable", "stampable"]);

        registry.clear();
        assert!(registry.is_empty());
    }
}
