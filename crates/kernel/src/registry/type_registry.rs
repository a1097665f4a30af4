//! In-process content host.
//!
//! Keeps every registration in memory so the renderer and the editor
//! surface can resolve namespaced identities without touching the store.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use super::host::{ContentHost, ContentTypeRegistration, TaxonomyRegistration};

/// Registry of registered content types and taxonomies.
///
/// Cheap to clone; clones share the same maps.
#[derive(Clone, Default)]
pub struct TypeRegistry {
    inner: Arc<TypeRegistryInner>,
}

#[derive(Default)]
struct TypeRegistryInner {
    types: DashMap<String, ContentTypeRegistration>,
    taxonomies: DashMap<String, TaxonomyRegistration>,
}

impl TypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a content type registration by namespaced name.
    pub fn content_type(&self, name: &str) -> Option<ContentTypeRegistration> {
        self.inner.types.get(name).map(|r| r.value().clone())
    }

    /// Whether a content type is registered.
    pub fn has_content_type(&self, name: &str) -> bool {
        self.inner.types.contains_key(name)
    }

    /// Get a taxonomy registration by namespaced name.
    pub fn taxonomy(&self, name: &str) -> Option<TaxonomyRegistration> {
        self.inner.taxonomies.get(name).map(|r| r.value().clone())
    }

    /// Whether `taxonomy` is registered and attached to `object_type`.
    pub fn taxonomy_applies_to(&self, taxonomy: &str, object_type: &str) -> bool {
        self.inner
            .taxonomies
            .get(taxonomy)
            .is_some_and(|t| t.object_type == object_type)
    }

    /// Taxonomies attached to a content type, sorted by name.
    pub fn taxonomies_for(&self, object_type: &str) -> Vec<TaxonomyRegistration> {
        let mut found: Vec<_> = self
            .inner
            .taxonomies
            .iter()
            .filter(|t| t.object_type == object_type)
            .map(|t| t.value().clone())
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        found
    }

    /// All content types, sorted by menu position.
    pub fn content_types(&self) -> Vec<ContentTypeRegistration> {
        let mut types: Vec<_> = self
            .inner
            .types
            .iter()
            .map(|r| r.value().clone())
            .collect();
        types.sort_by(|a, b| {
            a.menu_position
                .cmp(&b.menu_position)
                .then_with(|| a.name.cmp(&b.name))
        });
        types
    }

    /// All taxonomies, sorted by name.
    pub fn taxonomies(&self) -> Vec<TaxonomyRegistration> {
        let mut taxonomies: Vec<_> = self
            .inner
            .taxonomies
            .iter()
            .map(|r| r.value().clone())
            .collect();
        taxonomies.sort_by(|a, b| a.name.cmp(&b.name));
        taxonomies
    }

    /// Number of registered content types.
    pub fn len(&self) -> usize {
        self.inner.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.types.is_empty()
    }

    /// Drop every registration.
    pub fn clear(&self) {
        self.inner.types.clear();
        self.inner.taxonomies.clear();
    }
}

impl ContentHost for TypeRegistry {
    fn register_content_type(&self, registration: ContentTypeRegistration) {
        debug!(
            name = %registration.name,
            menu_position = registration.menu_position,
            "content type registered"
        );
        self.inner
            .types
            .insert(registration.name.clone(), registration);
    }

    fn register_taxonomy(&self, registration: TaxonomyRegistration) {
        debug!(
            name = %registration.name,
            object_type = %registration.object_type,
            "taxonomy registered"
        );
        self.inner
            .taxonomies
            .insert(registration.name.clone(), registration);
    }

    fn unregister_content_type(&self, name: &str) {
        debug!(name = %name, "content type unregistered");
        self.inner.types.remove(name);
    }

    fn unregister_taxonomy(&self, name: &str) {
        debug!(name = %name, "taxonomy unregistered");
        self.inner.taxonomies.remove(name);
    }

    fn content_type_names(&self) -> Vec<String> {
        self.inner.types.iter().map(|r| r.key().clone()).collect()
    }

    fn taxonomy_names(&self) -> Vec<String> {
        self.inner.taxonomies.iter().map(|r| r.key().clone()).collect()
    }
}
