//! Definition store.
//!
//! Holds every content type definition and taxonomy definition as one
//! settings record. The record is loaded once at startup and every admin
//! mutation writes the whole record back before returning.
//!
//! Mutations validate first, then apply to a copy of the record, persist the
//! copy, and only then replace the in-memory record. A failed write leaves
//! the store exactly as it was.

mod backend;
mod file;
mod postgres;

use std::sync::Arc;

use anyhow::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

pub use backend::{MemoryBackend, SettingsBackend, WriteOutcome};
pub use file::FileBackend;
pub use postgres::{PgBackend, SETTINGS_KEY};

use crate::config::{Config, SettingsBackendKind};
use crate::error::StoreError;
use crate::models::{
    Definition, Feature, NewDefinition, NewTaxonomy, TaxonomyDefinition,
};

/// The persisted settings record.
///
/// Maps keep insertion order, which drives menu ordinals at registration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsRecord {
    /// Incremented on every successful write.
    #[serde(default)]
    pub revision: u64,

    /// Content type slug to definition.
    #[serde(default)]
    pub post_types: IndexMap<String, Definition>,

    /// Content type slug to (taxonomy slug to taxonomy definition).
    #[serde(default)]
    pub taxonomies: IndexMap<String, IndexMap<String, TaxonomyDefinition>>,
}

/// A definition removed from the store along with the taxonomies it owned.
#[derive(Debug, Clone, PartialEq)]
pub struct RemovedDefinition {
    pub definition: Definition,
    pub taxonomies: Vec<TaxonomyDefinition>,
}

/// In-memory view of the settings record bound to a persistence backend.
pub struct DefinitionStore {
    backend: Arc<dyn SettingsBackend>,
    record: SettingsRecord,
}

impl DefinitionStore {
    /// Load the persisted record, defaulting to empty maps.
    pub async fn load(backend: Arc<dyn SettingsBackend>) -> Result<Self, StoreError> {
        let record = backend.read().await?.unwrap_or_default();
        info!(
            backend = backend.name(),
            revision = record.revision,
            post_types = record.post_types.len(),
            "definition store loaded"
        );
        Ok(Self { backend, record })
    }

    /// Re-read the persisted record, discarding the in-memory copy.
    pub async fn reload(&mut self) -> Result<(), StoreError> {
        self.record = self.backend.read().await?.unwrap_or_default();
        Ok(())
    }

    /// Name of the persistence backend.
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Revision of the in-memory record.
    pub fn revision(&self) -> u64 {
        self.record.revision
    }

    /// Read-only access to the whole record.
    pub fn record(&self) -> &SettingsRecord {
        &self.record
    }

    /// Whether no definitions exist.
    pub fn is_empty(&self) -> bool {
        self.record.post_types.is_empty()
    }

    /// Definitions in insertion order.
    pub fn definitions(&self) -> impl Iterator<Item = &Definition> {
        self.record.post_types.values()
    }

    /// Look up a definition by slug.
    pub fn definition(&self, slug: &str) -> Option<&Definition> {
        self.record.post_types.get(slug)
    }

    /// Insertion index of a definition.
    pub fn position_of(&self, slug: &str) -> Option<usize> {
        self.record.post_types.get_index_of(slug)
    }

    /// Taxonomies owned by `owner`, in insertion order.
    pub fn taxonomies_for(&self, owner: &str) -> impl Iterator<Item = &TaxonomyDefinition> {
        self.record
            .taxonomies
            .get(owner)
            .into_iter()
            .flat_map(|m| m.values())
    }

    /// Every taxonomy, grouped by owner in owner insertion order.
    pub fn taxonomies(&self) -> impl Iterator<Item = &TaxonomyDefinition> {
        self.record.taxonomies.values().flat_map(|m| m.values())
    }

    /// Look up a taxonomy by owner and slug.
    pub fn taxonomy(&self, owner: &str, slug: &str) -> Option<&TaxonomyDefinition> {
        self.record.taxonomies.get(owner)?.get(slug)
    }

    /// Validate and store a new definition.
    pub async fn add_definition(&mut self, input: NewDefinition) -> Result<Definition, StoreError> {
        let missing = input.missing_fields();
        if !missing.is_empty() {
            return Err(StoreError::Validation { fields: missing });
        }

        let slug = input.key();
        if self.record.post_types.contains_key(&slug) {
            return Err(StoreError::DuplicateSlug { slug, owner: None });
        }

        let definition = input.into_definition();
        let mut next = self.record.clone();
        next.post_types.insert(slug.clone(), definition.clone());
        self.commit(next).await?;

        info!(slug = %slug, "definition added");
        Ok(definition)
    }

    /// Remove a definition and every taxonomy it owns.
    ///
    /// Returns `None` without persisting when the slug is unknown.
    pub async fn delete_definition(
        &mut self,
        slug: &str,
    ) -> Result<Option<RemovedDefinition>, StoreError> {
        if !self.record.post_types.contains_key(slug) {
            return Ok(None);
        }

        let mut next = self.record.clone();
        let Some(definition) = next.post_types.shift_remove(slug) else {
            return Ok(None);
        };
        let taxonomies: Vec<TaxonomyDefinition> = next
            .taxonomies
            .shift_remove(slug)
            .map(|m| m.into_values().collect())
            .unwrap_or_default();
        self.commit(next).await?;

        info!(slug = %slug, taxonomies = taxonomies.len(), "definition deleted");
        Ok(Some(RemovedDefinition {
            definition,
            taxonomies,
        }))
    }

    /// Validate and store a new taxonomy under `owner`.
    pub async fn add_taxonomy(
        &mut self,
        owner: &str,
        input: NewTaxonomy,
    ) -> Result<TaxonomyDefinition, StoreError> {
        let missing = input.missing_fields();
        if !missing.is_empty() {
            return Err(StoreError::Validation { fields: missing });
        }

        if !self.record.post_types.contains_key(owner) {
            return Err(StoreError::UnknownOwner {
                owner: owner.to_string(),
            });
        }

        let slug = input.key();
        if self.taxonomy(owner, &slug).is_some() {
            return Err(StoreError::DuplicateSlug {
                slug,
                owner: Some(owner.to_string()),
            });
        }

        let taxonomy = input.into_taxonomy(owner);
        let mut next = self.record.clone();
        next.taxonomies
            .entry(owner.to_string())
            .or_default()
            .insert(slug.clone(), taxonomy.clone());
        self.commit(next).await?;

        info!(owner = %owner, slug = %slug, "taxonomy added");
        Ok(taxonomy)
    }

    /// Remove one taxonomy. Returns `None` without persisting when absent.
    pub async fn delete_taxonomy(
        &mut self,
        owner: &str,
        slug: &str,
    ) -> Result<Option<TaxonomyDefinition>, StoreError> {
        if self.taxonomy(owner, slug).is_none() {
            return Ok(None);
        }

        let mut next = self.record.clone();
        let removed = next
            .taxonomies
            .get_mut(owner)
            .and_then(|m| m.shift_remove(slug));
        if next.taxonomies.get(owner).is_some_and(|m| m.is_empty()) {
            next.taxonomies.shift_remove(owner);
        }
        self.commit(next).await?;

        info!(owner = %owner, slug = %slug, "taxonomy deleted");
        Ok(removed)
    }

    /// Create the default "services" type and its category taxonomy when the
    /// store is empty. Returns whether anything was created.
    pub async fn seed_defaults(&mut self) -> Result<bool, StoreError> {
        if !self.is_empty() {
            return Ok(false);
        }

        let services = NewDefinition {
            slug: "services".to_string(),
            singular_label: "Service".to_string(),
            plural_label: "Services".to_string(),
            url_slug: Some("services".to_string()),
            icon: Some("dashicons-superhero".to_string()),
            supported_features: Some(
                [
                    Feature::Title,
                    Feature::Editor,
                    Feature::Thumbnail,
                    Feature::Excerpt,
                ]
                .into_iter()
                .collect(),
            ),
            has_archive: true,
            is_public: true,
            exposed_via_api: true,
        };
        let categories = NewTaxonomy {
            slug: "services_categories".to_string(),
            singular_label: "Category".to_string(),
            plural_label: "Categories".to_string(),
            url_slug: Some("services-categories".to_string()),
            is_hierarchical: true,
            is_public: true,
            show_in_menus: true,
            exposed_via_api: true,
        };

        let definition = services.into_definition();
        let taxonomy = categories.into_taxonomy(&definition.slug);

        let mut next = self.record.clone();
        next.taxonomies
            .entry(definition.slug.clone())
            .or_default()
            .insert(taxonomy.slug.clone(), taxonomy);
        next.post_types.insert(definition.slug.clone(), definition);
        self.commit(next).await?;

        info!("default definitions seeded");
        Ok(true)
    }

    /// Persist `next` as the following revision and adopt it.
    async fn commit(&mut self, mut next: SettingsRecord) -> Result<(), StoreError> {
        let expected = self.record.revision;
        next.revision = expected + 1;

        match self.backend.write(&next, expected).await? {
            WriteOutcome::Written => {
                self.record = next;
                Ok(())
            }
            WriteOutcome::Conflict { current } => {
                warn!(
                    expected,
                    current, "settings were modified by another writer; reload required"
                );
                Err(StoreError::Conflict { expected, current })
            }
        }
    }
}

/// Build the settings backend selected by configuration.
pub async fn open_backend(config: &Config) -> Result<Arc<dyn SettingsBackend>> {
    let backend: Arc<dyn SettingsBackend> = match &config.settings_backend {
        SettingsBackendKind::Memory => Arc::new(MemoryBackend::new()),
        SettingsBackendKind::File => Arc::new(FileBackend::new(&config.settings_path)),
        SettingsBackendKind::Postgres { database_url } => Arc::new(
            PgBackend::connect(database_url, config.database_max_connections).await?,
        ),
    };
    Ok(backend)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn new_definition(slug: &str) -> NewDefinition {
        NewDefinition {
            slug: slug.to_string(),
            singular_label: "Project".to_string(),
            plural_label: "Projects".to_string(),
            is_public: true,
            ..Default::default()
        }
    }

    fn new_taxonomy(slug: &str) -> NewTaxonomy {
        NewTaxonomy {
            slug: slug.to_string(),
            singular_label: "Category".to_string(),
            plural_label: "Categories".to_string(),
            ..Default::default()
        }
    }

    async fn empty_store() -> DefinitionStore {
        DefinitionStore::load(Arc::new(MemoryBackend::new()))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn add_bumps_revision() {
        let mut store = empty_store().await;
        assert_eq!(store.revision(), 0);
        store.add_definition(new_definition("projects")).await.unwrap();
        assert_eq!(store.revision(), 1);
        assert_eq!(store.position_of("projects"), Some(0));
    }

    #[tokio::test]
    async fn validation_error_does_not_persist() {
        let mut store = empty_store().await;
        let err = store
            .add_definition(NewDefinition::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation { .. }));
        assert_eq!(store.revision(), 0);
    }

    #[tokio::test]
    async fn taxonomy_duplicate_is_per_owner() {
        let mut store = empty_store().await;
        store.add_definition(new_definition("projects")).await.unwrap();
        store.add_definition(new_definition("services")).await.unwrap();

        store
            .add_taxonomy("projects", new_taxonomy("categories"))
            .await
            .unwrap();
        store
            .add_taxonomy("services", new_taxonomy("categories"))
            .await
            .unwrap();

        let err = store
            .add_taxonomy("projects", new_taxonomy("categories"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::DuplicateSlug { owner: Some(ref o), .. } if o == "projects"
        ));
        assert_eq!(store.taxonomies().count(), 2);
    }

    #[tokio::test]
    async fn deleting_last_taxonomy_drops_owner_entry() {
        let mut store = empty_store().await;
        store.add_definition(new_definition("projects")).await.unwrap();
        store
            .add_taxonomy("projects", new_taxonomy("tags"))
            .await
            .unwrap();

        let removed = store.delete_taxonomy("projects", "tags").await.unwrap();
        assert_eq!(removed.map(|t| t.slug), Some("tags".to_string()));
        assert!(!store.record().taxonomies.contains_key("projects"));
    }

    #[tokio::test]
    async fn deleting_absent_taxonomy_is_noop() {
        let mut store = empty_store().await;
        store.add_definition(new_definition("projects")).await.unwrap();
        let revision = store.revision();
        assert!(
            store
                .delete_taxonomy("projects", "missing")
                .await
                .unwrap()
                .is_none()
        );
        assert_eq!(store.revision(), revision);
    }

    #[tokio::test]
    async fn seed_defaults_only_when_empty() {
        let mut store = empty_store().await;
        assert!(store.seed_defaults().await.unwrap());
        let services = store.definition("services").unwrap();
        assert_eq!(services.icon, "dashicons-superhero");
        assert!(services.supports(Feature::Excerpt));
        let categories = store.taxonomy("services", "services_categories").unwrap();
        assert_eq!(categories.url_slug, "services-categories");
        assert!(categories.is_hierarchical);

        assert!(!store.seed_defaults().await.unwrap());
        assert_eq!(store.revision(), 1);
    }

    #[tokio::test]
    async fn stale_store_reports_conflict_and_keeps_its_copy() {
        let backend: Arc<dyn SettingsBackend> = Arc::new(MemoryBackend::new());
        let mut first = DefinitionStore::load(backend.clone()).await.unwrap();
        let mut second = DefinitionStore::load(backend.clone()).await.unwrap();

        first.add_definition(new_definition("projects")).await.unwrap();
        let err = second
            .add_definition(new_definition("services"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Conflict {
                expected: 0,
                current: 1
            }
        ));
        assert!(second.definition("services").is_none());

        second.reload().await.unwrap();
        second.add_definition(new_definition("services")).await.unwrap();
        assert_eq!(second.definitions().count(), 2);
    }
}
