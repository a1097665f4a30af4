//! Content items and taxonomy terms held by the content store.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A content item of a registered type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Item ID (never 0).
    pub id: u64,

    /// Registered (namespaced) content type name, e.g. "devonebc_services".
    pub item_type: String,

    /// URL path segment of the item.
    pub slug: String,

    /// Item title (plain text).
    pub title: String,

    /// Body HTML.
    pub content: String,

    /// Short summary HTML. Empty when the item has no excerpt.
    pub excerpt: String,

    /// Featured image URL.
    pub thumbnail_url: Option<String>,

    /// Whether the item is published.
    pub published: bool,

    /// Publication timestamp.
    pub created: DateTime<Utc>,

    /// Manual sort position.
    pub menu_order: i32,

    /// Assigned term slugs, keyed by registered taxonomy name.
    pub terms: BTreeMap<String, Vec<String>>,
}

impl Item {
    /// Whether the item is tagged with `term` in `taxonomy`.
    pub fn has_term(&self, taxonomy: &str, term: &str) -> bool {
        self.terms
            .get(taxonomy)
            .is_some_and(|terms| terms.iter().any(|t| t == term))
    }

    /// Whether the item has a non-empty excerpt.
    pub fn has_excerpt(&self) -> bool {
        !self.excerpt.trim().is_empty()
    }
}

/// Input for creating an item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewItem {
    pub item_type: String,
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default = "default_published")]
    pub published: bool,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub menu_order: i32,
    #[serde(default)]
    pub terms: BTreeMap<String, Vec<String>>,
}

fn default_published() -> bool {
    true
}

/// A term within a taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    /// Registered (namespaced) taxonomy name.
    pub taxonomy: String,

    /// Term slug used in filters.
    pub slug: String,

    /// Display name.
    pub name: String,
}
