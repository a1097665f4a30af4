//! Typed registrations and the host adapter trait.
//!
//! A [`ContentHost`] is whatever makes registered content types and
//! taxonomies usable: the in-process [`TypeRegistry`](super::TypeRegistry)
//! in this crate, or an adapter forwarding to an external CMS.

use serde::Serialize;

use super::labels::{ContentTypeLabels, TaxonomyLabels};
use crate::models::Feature;

/// A content type registration call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentTypeRegistration {
    /// Namespaced identity (e.g., "devonebc_projects").
    pub name: String,
    /// Slug of the stored definition.
    pub definition_slug: String,
    pub labels: ContentTypeLabels,
    pub public: bool,
    pub has_archive: bool,
    pub show_in_rest: bool,
    pub menu_icon: String,
    pub supports: Vec<Feature>,
    pub rewrite_slug: String,
    pub menu_position: u32,
    pub publicly_queryable: bool,
    pub exclude_from_search: bool,
    pub show_in_menu: bool,
    pub capability_type: &'static str,
}

/// A taxonomy registration call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxonomyRegistration {
    /// Namespaced identity (e.g., "devonebc_project_categories").
    pub name: String,
    /// Slug of the stored taxonomy.
    pub taxonomy_slug: String,
    /// Namespaced identity of the owning content type.
    pub object_type: String,
    /// Slug of the owning definition.
    pub owner_slug: String,
    pub labels: TaxonomyLabels,
    pub hierarchical: bool,
    pub public: bool,
    pub show_in_nav_menus: bool,
    pub show_in_rest: bool,
    pub show_admin_column: bool,
    pub rewrite_slug: String,
}

/// Receiver of registration calls.
///
/// Registration is assumed to succeed; the host does not report failure.
/// Registering an existing name replaces the previous registration.
pub trait ContentHost: Send + Sync {
    fn register_content_type(&self, registration: ContentTypeRegistration);

    fn register_taxonomy(&self, registration: TaxonomyRegistration);

    fn unregister_content_type(&self, name: &str);

    fn unregister_taxonomy(&self, name: &str);

    /// Names of every registered content type.
    fn content_type_names(&self) -> Vec<String>;

    /// Names of every registered taxonomy.
    fn taxonomy_names(&self) -> Vec<String>;
}
