//! Registrar: turns stored definitions into host registrations.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use super::host::{ContentHost, ContentTypeRegistration, TaxonomyRegistration};
use super::labels::{ContentTypeLabels, TaxonomyLabels};
use crate::models::{Definition, TaxonomyDefinition};
use crate::store::DefinitionStore;

/// Counts from a full registration pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RegistrationSummary {
    pub content_types: usize,
    pub taxonomies: usize,
}

/// Issues registration calls for stored definitions.
#[derive(Clone)]
pub struct Registrar {
    host: Arc<dyn ContentHost>,
    prefix: String,
    menu_base: u32,
    menu_step: u32,
}

impl Registrar {
    pub fn new(
        host: Arc<dyn ContentHost>,
        prefix: impl Into<String>,
        menu_base: u32,
        menu_step: u32,
    ) -> Self {
        Self {
            host,
            prefix: prefix.into(),
            menu_base,
            menu_step,
        }
    }

    /// Namespace prefix applied to every identity.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Namespaced identity of a content type.
    pub fn content_type_name(&self, slug: &str) -> String {
        format!("{}{}", self.prefix, slug)
    }

    /// Namespaced identity of a taxonomy.
    pub fn taxonomy_name(&self, slug: &str) -> String {
        format!("{}{}", self.prefix, slug)
    }

    /// Menu ordinal for the definition at insertion `index`.
    pub fn menu_position(&self, index: usize) -> u32 {
        let index = u32::try_from(index).unwrap_or(u32::MAX);
        self.menu_base
            .saturating_add(index.saturating_mul(self.menu_step))
    }

    /// Register every definition, then every taxonomy.
    pub fn register_all(&self, store: &DefinitionStore) -> RegistrationSummary {
        let mut summary = RegistrationSummary::default();

        for (index, definition) in store.definitions().enumerate() {
            self.host
                .register_content_type(self.registration_for(definition, index));
            summary.content_types += 1;
        }

        for taxonomy in store.taxonomies() {
            self.host
                .register_taxonomy(self.taxonomy_registration_for(taxonomy));
            summary.taxonomies += 1;
        }

        info!(
            content_types = summary.content_types,
            taxonomies = summary.taxonomies,
            "definitions registered"
        );
        summary
    }

    /// Register one definition using its insertion position in `store`.
    pub fn register_one(&self, store: &DefinitionStore, definition: &Definition) {
        let index = store
            .position_of(&definition.slug)
            .unwrap_or_else(|| store.definitions().count());
        self.host
            .register_content_type(self.registration_for(definition, index));
    }

    /// Register one taxonomy.
    pub fn register_one_taxonomy(&self, taxonomy: &TaxonomyDefinition) {
        self.host
            .register_taxonomy(self.taxonomy_registration_for(taxonomy));
    }

    /// Bring the host in line with `store` after a mutation or reload.
    ///
    /// Registrations whose identity no longer maps to any stored entry are
    /// removed, then everything is registered again so menu ordinals follow
    /// the current insertion order. A taxonomy identity shared by several
    /// owners stays registered while any of them remains.
    pub fn sync(&self, store: &DefinitionStore) -> RegistrationSummary {
        let types: HashSet<String> = store
            .definitions()
            .map(|d| self.content_type_name(&d.slug))
            .collect();
        for name in self.host.content_type_names() {
            if !types.contains(&name) {
                self.host.unregister_content_type(&name);
            }
        }

        let taxonomies: HashSet<String> = store
            .taxonomies()
            .map(|t| self.taxonomy_name(&t.slug))
            .collect();
        for name in self.host.taxonomy_names() {
            if !taxonomies.contains(&name) {
                self.host.unregister_taxonomy(&name);
            }
        }

        self.register_all(store)
    }

    /// Map a definition to its registration call.
    pub fn registration_for(&self, definition: &Definition, index: usize) -> ContentTypeRegistration {
        ContentTypeRegistration {
            name: self.content_type_name(&definition.slug),
            definition_slug: definition.slug.clone(),
            labels: ContentTypeLabels::new(&definition.singular_label, &definition.plural_label),
            public: definition.is_public,
            has_archive: definition.has_archive,
            show_in_rest: definition.exposed_via_api,
            menu_icon: definition.icon.clone(),
            supports: definition.supported_features.iter().copied().collect(),
            rewrite_slug: definition.url_slug.clone(),
            menu_position: self.menu_position(index),
            publicly_queryable: definition.is_public,
            exclude_from_search: !definition.is_public,
            show_in_menu: true,
            capability_type: "post",
        }
    }

    /// Map a taxonomy to its registration call.
    pub fn taxonomy_registration_for(&self, taxonomy: &TaxonomyDefinition) -> TaxonomyRegistration {
        TaxonomyRegistration {
            name: self.taxonomy_name(&taxonomy.slug),
            taxonomy_slug: taxonomy.slug.clone(),
            object_type: self.content_type_name(&taxonomy.owning_definition_slug),
            owner_slug: taxonomy.owning_definition_slug.clone(),
            labels: TaxonomyLabels::new(&taxonomy.singular_label, &taxonomy.plural_label),
            hierarchical: taxonomy.is_hierarchical,
            public: taxonomy.is_public,
            show_in_nav_menus: taxonomy.show_in_menus,
            show_in_rest: taxonomy.exposed_via_api,
            show_admin_column: true,
            rewrite_slug: taxonomy.url_slug.clone(),
        }
    }
}
