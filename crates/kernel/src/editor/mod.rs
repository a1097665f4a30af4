//! Editor surface.
//!
//! Read-only projection of the registered definitions for block inspector
//! controls, plus live previews of candidate block attributes. Nothing here
//! touches the definition store.

use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;

use crate::blocks::{
    BlockDefinition, GridBlockAttributes, SingleBlockAttributes, block_definitions,
    render_grid_block, render_single_block,
};
use crate::content::{ContentStore, ItemQuery, Order, OrderBy};
use crate::registry::TypeRegistry;
use crate::render::{ImageSize, Layout, Renderer};

/// Most item choices offered to the single item block.
pub const MAX_ITEM_CHOICES: usize = 100;

/// A value/label pair for a selection widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

impl Choice {
    fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// A registered content type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostTypeOption {
    /// Definition slug.
    pub value: String,
    /// Plural label.
    pub label: String,
    /// Namespaced identity.
    pub name: String,
}

/// A registered taxonomy and its terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxonomyOption {
    /// Taxonomy slug.
    pub value: String,
    /// Owning definition slug.
    pub owner: String,
    /// Plural label.
    pub label: String,
    pub terms: Vec<Choice>,
}

/// An item offered to the single item block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemChoice {
    pub value: u64,
    pub label: String,
    pub post_type: String,
}

/// Everything the block inspector needs.
#[derive(Debug, Clone, Serialize)]
pub struct EditorData {
    pub post_types: Vec<PostTypeOption>,
    pub taxonomies: Vec<TaxonomyOption>,
    pub items: Vec<ItemChoice>,
    pub image_sizes: Vec<Choice>,
    pub orderby_options: Vec<Choice>,
    pub order_options: Vec<Choice>,
    pub layouts: Vec<Choice>,
    pub blocks: Vec<BlockDefinition>,
}

/// Builds editor data and previews.
#[derive(Clone)]
pub struct EditorSurface {
    registry: TypeRegistry,
    content: Arc<dyn ContentStore>,
    renderer: Renderer,
}

impl EditorSurface {
    pub fn new(registry: TypeRegistry, content: Arc<dyn ContentStore>, renderer: Renderer) -> Self {
        Self {
            registry,
            content,
            renderer,
        }
    }

    /// Collect the current editor data.
    pub async fn data(&self) -> Result<EditorData> {
        let types = self.registry.content_types();

        let post_types = types
            .iter()
            .map(|t| PostTypeOption {
                value: t.definition_slug.clone(),
                label: t.labels.name.clone(),
                name: t.name.clone(),
            })
            .collect();

        let mut taxonomies = Vec::new();
        for taxonomy in self.registry.taxonomies() {
            let terms = self
                .content
                .terms(&taxonomy.name)
                .await?
                .into_iter()
                .map(|t| Choice::new(t.slug, t.name))
                .collect();
            taxonomies.push(TaxonomyOption {
                value: taxonomy.taxonomy_slug,
                owner: taxonomy.owner_slug,
                label: taxonomy.labels.name,
                terms,
            });
        }

        let mut items = Vec::new();
        for registration in &types {
            let query = ItemQuery {
                limit: MAX_ITEM_CHOICES,
                order_by: OrderBy::Title,
                order: Order::Asc,
                ..ItemQuery::new(registration.name.as_str())
            };
            items.extend(
                self.content
                    .query(&query)
                    .await?
                    .into_iter()
                    .map(|i| ItemChoice {
                        value: i.id,
                        label: i.title,
                        post_type: registration.definition_slug.clone(),
                    }),
            );
        }
        items.sort_by(|a, b| a.label.to_lowercase().cmp(&b.label.to_lowercase()));
        items.truncate(MAX_ITEM_CHOICES);

        Ok(EditorData {
            post_types,
            taxonomies,
            items,
            image_sizes: ImageSize::ALL
                .iter()
                .map(|s| Choice::new(s.as_str(), s.label()))
                .collect(),
            orderby_options: OrderBy::ALL
                .iter()
                .map(|o| Choice::new(o.as_str(), o.label()))
                .collect(),
            order_options: Order::ALL
                .iter()
                .map(|o| Choice::new(o.as_str(), o.label()))
                .collect(),
            layouts: Layout::ALL
                .iter()
                .map(|l| Choice::new(l.as_str(), l.label()))
                .collect(),
            blocks: block_definitions(),
        })
    }

    /// Preview HTML for candidate grid block attributes.
    pub async fn preview_grid(&self, attrs: &GridBlockAttributes) -> String {
        render_grid_block(&self.renderer, attrs).await
    }

    /// Preview HTML for candidate single item block attributes.
    pub async fn preview_single(&self, attrs: &SingleBlockAttributes) -> String {
        render_single_block(&self.renderer, attrs).await
    }
}
