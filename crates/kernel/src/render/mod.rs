//! HTML rendering of stored items.
//!
//! The fragment builders in [`grid`] and [`single`] are pure functions over
//! typed input. [`Renderer`] resolves the registered content type, queries
//! the content store and degrades every lookup failure into a short
//! placeholder paragraph so a page never fails because of an embed.

pub mod escape;
pub mod grid;
pub mod single;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::content::{ContentStore, ItemQuery, TermFilter};
use crate::models::Item;
use crate::registry::TypeRegistry;
use crate::sanitize::{sanitize_key, sanitize_text_field};

pub use escape::{escape_attr, escape_html, escape_url, sanitize_html};
pub use grid::{GRID_STYLES, GridQuery, render_grid_html};
pub use single::{Layout, SingleOptions, render_single_html};

/// Named image size used for thumbnails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSize {
    Thumbnail,
    #[default]
    Medium,
    Large,
    Full,
}

impl ImageSize {
    pub const ALL: [ImageSize; 4] = [
        ImageSize::Thumbnail,
        ImageSize::Medium,
        ImageSize::Large,
        ImageSize::Full,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        let key = sanitize_key(value);
        Self::ALL.into_iter().find(|s| s.as_str() == key)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::Thumbnail => "thumbnail",
            ImageSize::Medium => "medium",
            ImageSize::Large => "large",
            ImageSize::Full => "full",
        }
    }

    /// Display label derived from the key ("medium" becomes "Medium").
    pub fn label(&self) -> String {
        let spaced = self.as_str().replace(['-', '_'], " ");
        let mut chars = spaced.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

/// Public URL path of an item.
pub fn permalink(rewrite_slug: &str, item: &Item) -> String {
    format!("/{}/{}/", rewrite_slug, item.slug)
}

/// Publication date as shown in grids ("July 4, 2024").
pub fn format_date(item: &Item) -> String {
    item.created.format("%B %-d, %Y").to_string()
}

/// Wrap a message in a paragraph.
pub fn placeholder(message: &str) -> String {
    format!("<p>{}</p>", escape_html(message))
}

/// Why a fragment could not be rendered.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Please specify a post type")]
    MissingSource,

    #[error("Post type \"{0}\" not found.")]
    UnknownSource(String),

    #[error("No items found.")]
    NoItems,

    #[error("Please select an item to display.")]
    MissingItem,

    #[error("Selected item not found.")]
    ItemNotFound,

    #[error("Items could not be loaded.")]
    Content(#[from] anyhow::Error),
}

/// Renders grids and single items from registered content.
#[derive(Clone)]
pub struct Renderer {
    registry: TypeRegistry,
    content: Arc<dyn ContentStore>,
    prefix: String,
}

impl Renderer {
    pub fn new(registry: TypeRegistry, content: Arc<dyn ContentStore>, prefix: impl Into<String>) -> Self {
        Self {
            registry,
            content,
            prefix: prefix.into(),
        }
    }

    /// Render a grid, or a placeholder paragraph on failure.
    pub async fn render_grid(&self, query: &GridQuery) -> String {
        match self.try_render_grid(query).await {
            Ok(html) => html,
            Err(e) => fallback(e),
        }
    }

    /// Render a single item, or a placeholder paragraph on failure.
    pub async fn render_single(&self, item_id: u64, options: &SingleOptions) -> String {
        match self.try_render_single(item_id, options).await {
            Ok(html) => html,
            Err(e) => fallback(e),
        }
    }

    pub async fn try_render_grid(&self, query: &GridQuery) -> Result<String, RenderError> {
        let query = query.clone().normalized();

        let source = sanitize_key(&query.source_slug);
        if source.is_empty() {
            return Err(RenderError::MissingSource);
        }

        let type_name = format!("{}{}", self.prefix, source);
        let Some(registration) = self.registry.content_type(&type_name) else {
            return Err(RenderError::UnknownSource(query.source_slug.trim().to_string()));
        };

        let item_query = ItemQuery {
            limit: usize::try_from(query.count).unwrap_or(usize::MAX),
            terms: self.term_filter(&query, &source, &type_name),
            order_by: query.order_by,
            order: query.order,
            ..ItemQuery::new(type_name.as_str())
        };
        let items = self.content.query(&item_query).await?;
        if items.is_empty() {
            return Err(RenderError::NoItems);
        }

        debug!(item_type = %type_name, count = items.len(), "grid rendered");
        Ok(render_grid_html(&query, &registration.rewrite_slug, &items))
    }

    pub async fn try_render_single(
        &self,
        item_id: u64,
        options: &SingleOptions,
    ) -> Result<String, RenderError> {
        if item_id == 0 {
            return Err(RenderError::MissingItem);
        }

        let item = self
            .content
            .get(item_id)
            .await?
            .ok_or(RenderError::ItemNotFound)?;
        let registration = self
            .registry
            .content_type(&item.item_type)
            .ok_or(RenderError::ItemNotFound)?;

        let link = permalink(&registration.rewrite_slug, &item);
        Ok(render_single_html(&item, &link, options))
    }

    /// Category filter, applied only when the taxonomy is registered for
    /// the source type.
    fn term_filter(&self, query: &GridQuery, source: &str, type_name: &str) -> Option<TermFilter> {
        let term = sanitize_text_field(query.category.as_deref()?);
        if term.is_empty() {
            return None;
        }

        let taxonomy_slug = query
            .taxonomy
            .as_deref()
            .map(sanitize_key)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| format!("{source}_categories"));
        let taxonomy = format!("{}{}", self.prefix, taxonomy_slug);

        if !self.registry.taxonomy_applies_to(&taxonomy, type_name) {
            debug!(taxonomy = %taxonomy, "category filter ignored; taxonomy not registered");
            return None;
        }
        Some(TermFilter { taxonomy, term })
    }
}

fn fallback(err: RenderError) -> String {
    if let RenderError::Content(e) = &err {
        warn!(error = %e, "content query failed");
    }
    placeholder(&err.to_string())
}
