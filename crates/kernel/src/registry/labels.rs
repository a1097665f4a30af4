//! Admin label sets computed from singular and plural display labels.

use serde::Serialize;

/// Labels issued with a content type registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentTypeLabels {
    pub name: String,
    pub singular_name: String,
    pub add_new: String,
    pub add_new_item: String,
    pub edit_item: String,
    pub new_item: String,
    pub view_item: String,
    pub search_items: String,
    pub not_found: String,
    pub not_found_in_trash: String,
    pub all_items: String,
    pub menu_name: String,
}

impl ContentTypeLabels {
    pub fn new(singular: &str, plural: &str) -> Self {
        Self {
            name: plural.to_string(),
            singular_name: singular.to_string(),
            add_new: format!("Add New {singular}"),
            add_new_item: format!("Add New {singular}"),
            edit_item: format!("Edit {singular}"),
            new_item: format!("New {singular}"),
            view_item: format!("View {singular}"),
            search_items: format!("Search {plural}"),
            not_found: format!("No {plural} found"),
            not_found_in_trash: format!("No {plural} found in Trash"),
            all_items: plural.to_string(),
            menu_name: plural.to_string(),
        }
    }
}

/// Labels issued with a taxonomy registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxonomyLabels {
    pub name: String,
    pub singular_name: String,
    pub search_items: String,
    pub all_items: String,
    pub parent_item: String,
    pub parent_item_colon: String,
    pub edit_item: String,
    pub update_item: String,
    pub add_new_item: String,
    pub new_item_name: String,
    pub menu_name: String,
}

impl TaxonomyLabels {
    pub fn new(singular: &str, plural: &str) -> Self {
        Self {
            name: plural.to_string(),
            singular_name: singular.to_string(),
            search_items: format!("Search {plural}"),
            all_items: format!("All {plural}"),
            parent_item: format!("Parent {singular}"),
            parent_item_colon: format!("Parent {singular}:"),
            edit_item: format!("Edit {singular}"),
            update_item: format!("Update {singular}"),
            add_new_item: format!("Add New {singular}"),
            new_item_name: format!("New {singular} Name"),
            menu_name: plural.to_string(),
        }
    }
}
