//! Taxonomy definitions attached to content types.

use serde::{Deserialize, Serialize};

use crate::sanitize::{sanitize_key, sanitize_text_field, sanitize_title};

/// A stored taxonomy definition.
///
/// Unique per `(owning_definition_slug, slug)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyDefinition {
    /// Taxonomy key (e.g., "project_categories").
    pub slug: String,

    /// Slug of the content type this taxonomy belongs to.
    pub owning_definition_slug: String,

    /// Singular display label (e.g., "Category").
    pub singular_label: String,

    /// Plural display label (e.g., "Categories").
    pub plural_label: String,

    /// URL path segment for term archives.
    pub url_slug: String,

    /// Whether terms can have parents.
    pub is_hierarchical: bool,

    /// Whether the taxonomy is publicly queryable.
    pub is_public: bool,

    /// Whether terms are offered in navigation menus.
    pub show_in_menus: bool,

    /// Whether the taxonomy is exposed through the REST API.
    pub exposed_via_api: bool,
}

/// Input for creating a taxonomy under an owning content type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTaxonomy {
    pub slug: String,
    pub singular_label: String,
    pub plural_label: String,
    #[serde(default)]
    pub url_slug: Option<String>,
    #[serde(default)]
    pub is_hierarchical: bool,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub show_in_menus: bool,
    #[serde(default)]
    pub exposed_via_api: bool,
}

impl NewTaxonomy {
    /// Names of required fields that are empty after sanitization.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if sanitize_key(&self.slug).is_empty() {
            missing.push("slug");
        }
        if sanitize_text_field(&self.singular_label).is_empty() {
            missing.push("singular_label");
        }
        if sanitize_text_field(&self.plural_label).is_empty() {
            missing.push("plural_label");
        }
        missing
    }

    /// Sanitized slug this input would be stored under.
    pub fn key(&self) -> String {
        sanitize_key(&self.slug)
    }

    /// Build the stored taxonomy for `owner`.
    pub fn into_taxonomy(self, owner: &str) -> TaxonomyDefinition {
        let slug = sanitize_key(&self.slug);
        let url_slug = self
            .url_slug
            .as_deref()
            .map(sanitize_title)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| slug.clone());

        TaxonomyDefinition {
            slug,
            owning_definition_slug: owner.to_string(),
            singular_label: sanitize_text_field(&self.singular_label),
            plural_label: sanitize_text_field(&self.plural_label),
            url_slug,
            is_hierarchical: self.is_hierarchical,
            is_public: self.is_public,
            show_in_menus: self.show_in_menus,
            exposed_via_api: self.exposed_via_api,
        }
    }
}
