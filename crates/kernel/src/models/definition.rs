//! Content type definitions.
//!
//! A definition describes one custom content type created through the admin
//! API. The slug is the identity of the definition and never changes once the
//! definition has been stored.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::sanitize::{sanitize_key, sanitize_text_field, sanitize_title};

/// Icon used when a submission leaves the icon empty.
pub const DEFAULT_ICON: &str = "dashicons-portfolio";

/// Editing features a content type can opt into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Feature {
    Title,
    Editor,
    Thumbnail,
    Excerpt,
    CustomFields,
    Comments,
}

impl Feature {
    /// Every feature, in admin form order.
    pub const ALL: [Feature; 6] = [
        Feature::Title,
        Feature::Editor,
        Feature::Thumbnail,
        Feature::Excerpt,
        Feature::CustomFields,
        Feature::Comments,
    ];

    /// Wire name of the feature.
    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::Title => "title",
            Feature::Editor => "editor",
            Feature::Thumbnail => "thumbnail",
            Feature::Excerpt => "excerpt",
            Feature::CustomFields => "custom-fields",
            Feature::Comments => "comments",
        }
    }

    /// Parse a submitted feature name. Unknown names yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        let key = sanitize_key(value);
        Self::ALL.into_iter().find(|f| f.as_str() == key)
    }

    /// Features enabled when a submission selects none.
    pub fn defaults() -> BTreeSet<Feature> {
        BTreeSet::from([Feature::Title, Feature::Editor, Feature::Thumbnail])
    }
}

/// A stored content type definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    /// Unique key (e.g., "portfolio_items").
    pub slug: String,

    /// Singular display label (e.g., "Portfolio Item").
    pub singular_label: String,

    /// Plural display label (e.g., "Portfolio Items").
    pub plural_label: String,

    /// URL path segment for archive and item URLs.
    pub url_slug: String,

    /// Admin menu icon (icon class name or image URL).
    pub icon: String,

    /// Editing features enabled for items of this type.
    pub supported_features: BTreeSet<Feature>,

    /// Whether the type has an archive page.
    pub has_archive: bool,

    /// Whether the type is publicly queryable.
    pub is_public: bool,

    /// Whether the type is exposed through the REST API.
    pub exposed_via_api: bool,
}

impl Definition {
    /// Whether this type supports a given editing feature.
    pub fn supports(&self, feature: Feature) -> bool {
        self.supported_features.contains(&feature)
    }
}

/// Input for creating a definition.
///
/// Optional fields fall back to derived defaults when stored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewDefinition {
    pub slug: String,
    pub singular_label: String,
    pub plural_label: String,
    #[serde(default)]
    pub url_slug: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub supported_features: Option<BTreeSet<Feature>>,
    #[serde(default)]
    pub has_archive: bool,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub exposed_via_api: bool,
}

impl NewDefinition {
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

    /// Build the stored definition, applying sanitization and defaults.
    pub fn into_definition(self) -> Definition {
        let slug = sanitize_key(&self.slug);

        let url_slug = self
            .url_slug
            .as_deref()
            .map(sanitize_title)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| slug.clone());

        let icon = self
            .icon
            .as_deref()
            .map(sanitize_text_field)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_ICON.to_string());

        let supported_features = self
            .supported_features
            .filter(|f| !f.is_empty())
            .unwrap_or_else(Feature::defaults);

        Definition {
            slug,
            singular_label: sanitize_text_field(&self.singular_label),
            plural_label: sanitize_text_field(&self.plural_label),
            url_slug,
            icon,
            supported_features,
            has_archive: self.has_archive,
            is_public: self.is_public,
            exposed_via_api: self.exposed_via_api,
        }
    }
}
