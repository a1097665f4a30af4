//! Vetrina test utilities.
//!
//! Fixture builders for definitions, taxonomies and items, and a helper
//! that assembles a fully in-memory [`AppState`].

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use vetrina_kernel::content::{ContentStore, MemoryContentStore};
use vetrina_kernel::models::{NewDefinition, NewItem, NewTaxonomy};
use vetrina_kernel::store::{MemoryBackend, SettingsBackend};
use vetrina_kernel::{AppState, Config};

/// Public definition input with the given labels.
pub fn definition(slug: &str, singular: &str, plural: &str) -> NewDefinition {
    NewDefinition {
        slug: slug.to_string(),
        singular_label: singular.to_string(),
        plural_label: plural.to_string(),
        has_archive: true,
        is_public: true,
        exposed_via_api: true,
        ..Default::default()
    }
}

/// Public taxonomy input with the given labels.
pub fn taxonomy(slug: &str, singular: &str, plural: &str) -> NewTaxonomy {
    NewTaxonomy {
        slug: slug.to_string(),
        singular_label: singular.to_string(),
        plural_label: plural.to_string(),
        is_hierarchical: true,
        is_public: true,
        show_in_menus: true,
        exposed_via_api: true,
        ..Default::default()
    }
}

/// Create a test item with default values.
pub fn test_item(item_type: &str, title: &str) -> TestItem {
    TestItem {
        input: NewItem {
            item_type: item_type.to_string(),
            title: title.to_string(),
            published: true,
            created: Some(fixed_date(1)),
            ..Default::default()
        },
    }
}

/// Noon UTC on the given day of January 2025.
pub fn fixed_date(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, day.clamp(1, 31), 12, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// A test item builder for creating test fixtures.
#[derive(Debug, Clone)]
pub struct TestItem {
    input: NewItem,
}

impl TestItem {
    /// Set the publication day (January 2025).
    pub fn on_day(mut self, day: u32) -> Self {
        self.input.created = Some(fixed_date(day));
        self
    }

    /// Set the body HTML.
    pub fn with_content(mut self, content: &str) -> Self {
        self.input.content = content.to_string();
        self
    }

    /// Set the excerpt HTML.
    pub fn with_excerpt(mut self, excerpt: &str) -> Self {
        self.input.excerpt = excerpt.to_string();
        self
    }

    /// Set the featured image.
    pub fn with_thumbnail(mut self, url: &str) -> Self {
        self.input.thumbnail_url = Some(url.to_string());
        self
    }

    /// Tag the item with `term` in the namespaced `taxonomy`.
    pub fn with_term(mut self, taxonomy: &str, term: &str) -> Self {
        self.input
            .terms
            .entry(taxonomy.to_string())
            .or_default()
            .push(term.to_string());
        self
    }

    /// Set the manual sort position.
    pub fn with_menu_order(mut self, order: i32) -> Self {
        self.input.menu_order = order;
        self
    }

    /// Set as unpublished.
    pub fn unpublished(mut self) -> Self {
        self.input.published = false;
        self
    }

    /// Build the item input.
    pub fn build(self) -> NewItem {
        self.input
    }
}

/// In-memory collaborators behind an [`AppState`].
pub struct MemoryParts {
    pub state: AppState,
    pub backend: Arc<MemoryBackend>,
    pub content: Arc<MemoryContentStore>,
}

/// Build state over an empty in-memory backend and content store.
pub async fn memory_state(config: &Config) -> anyhow::Result<MemoryParts> {
    let backend = Arc::new(MemoryBackend::new());
    let content = Arc::new(MemoryContentStore::new());
    let state = AppState::from_parts(
        config,
        backend.clone() as Arc<dyn SettingsBackend>,
        content.clone() as Arc<dyn ContentStore>,
    )
    .await?;
    Ok(MemoryParts {
        state,
        backend,
        content,
    })
}
