//! Form-encoded admin submissions.
//!
//! Bodies are parsed as ordered pairs so repeated keys such as `supports[]`
//! keep every value.

use std::collections::BTreeSet;

use crate::models::{Feature, NewDefinition, NewTaxonomy};

/// Parsed `application/x-www-form-urlencoded` fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pairs: Vec<(String, String)>,
}

impl FormFields {
    /// Parse a form-encoded body.
    pub fn parse(body: &[u8]) -> Self {
        Self {
            pairs: url::form_urlencoded::parse(body).into_owned().collect(),
        }
    }

    /// First value of `key`, or "" when absent.
    pub fn text(&self, key: &str) -> &str {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map_or("", |(_, v)| v.as_str())
    }

    /// Value of `key` when present and non-blank.
    pub fn optional(&self, key: &str) -> Option<String> {
        let value = self.text(key).trim();
        (!value.is_empty()).then(|| value.to_string())
    }

    /// Every value of `key`, also accepting the `key[]` spelling.
    pub fn all(&self, key: &str) -> Vec<&str> {
        let bracketed = format!("{key}[]");
        self.pairs
            .iter()
            .filter(|(k, _)| *k == key || *k == bracketed)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Checkbox state: checked when present with a truthy value.
    pub fn flag(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, v)| {
            k == key
                && matches!(
                    v.trim().to_ascii_lowercase().as_str(),
                    "1" | "on" | "true" | "yes"
                )
        })
    }

    /// Fields of the "add post type" form.
    pub fn new_definition(&self) -> NewDefinition {
        let features: BTreeSet<Feature> = self
            .all("supports")
            .into_iter()
            .filter_map(Feature::parse)
            .collect();

        NewDefinition {
            slug: self.text("post_type_slug").to_string(),
            singular_label: self.text("singular_name").to_string(),
            plural_label: self.text("plural_name").to_string(),
            url_slug: self.optional("slug"),
            icon: self.optional("menu_icon"),
            supported_features: Some(features),
            has_archive: self.flag("has_archive"),
            is_public: self.flag("public"),
            exposed_via_api: self.flag("show_in_rest"),
        }
    }

    /// Owner slug and fields of the "add taxonomy" form.
    pub fn new_taxonomy(&self) -> (String, NewTaxonomy) {
        let owner = crate::sanitize::sanitize_key(self.text("post_type"));
        let input = NewTaxonomy {
            slug: self.text("taxonomy_slug").to_string(),
            singular_label: self.text("taxonomy_singular_name").to_string(),
            plural_label: self.text("taxonomy_plural_name").to_string(),
            url_slug: self.optional("taxonomy_slug_custom"),
            is_hierarchical: self.flag("hierarchical"),
            is_public: self.flag("taxonomy_public"),
            show_in_menus: self.flag("show_in_nav_menus"),
            exposed_via_api: self.flag("taxonomy_show_in_rest"),
        };
        (owner, input)
    }
}
