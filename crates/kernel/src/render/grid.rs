//! Grid fragment.

use serde::{Deserialize, Serialize};

use super::escape::{escape_attr, escape_html, escape_url, sanitize_html};
use super::{ImageSize, format_date, permalink};
use crate::content::{Order, OrderBy};
use crate::models::Item;

/// Default number of items in a grid.
pub const DEFAULT_COUNT: u32 = 6;
/// Largest number of items a grid will request.
pub const MAX_COUNT: u32 = 100;
/// Default number of grid columns.
pub const DEFAULT_COLUMNS: u32 = 3;
/// Largest supported number of grid columns.
pub const MAX_COLUMNS: u32 = 6;

/// Parameters for a grid of items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridQuery {
    /// Definition slug (un-namespaced) whose items are listed.
    pub source_slug: String,
    pub count: u32,
    pub columns: u32,
    /// Term slug to filter by. Empty means no filter.
    pub category: Option<String>,
    /// Taxonomy slug the category belongs to. Defaults to
    /// `<source_slug>_categories`.
    pub taxonomy: Option<String>,
    pub order_by: OrderBy,
    pub order: Order,
    pub show_excerpt: bool,
    pub show_date: bool,
    pub image_size: ImageSize,
    /// Extra classes for the wrapper.
    pub class_name: String,
}

impl Default for GridQuery {
    fn default() -> Self {
        Self {
            source_slug: String::new(),
            count: DEFAULT_COUNT,
            columns: DEFAULT_COLUMNS,
            category: None,
            taxonomy: None,
            order_by: OrderBy::Date,
            order: Order::Desc,
            show_excerpt: true,
            show_date: false,
            image_size: ImageSize::Medium,
            class_name: String::new(),
        }
    }
}

impl GridQuery {
    /// Grid over the items of `source_slug` with default options.
    pub fn for_source(source_slug: impl Into<String>) -> Self {
        Self {
            source_slug: source_slug.into(),
            ..Self::default()
        }
    }

    /// Clamp count and columns into range and drop empty filters.
    pub fn normalized(mut self) -> Self {
        self.count = if self.count == 0 {
            DEFAULT_COUNT
        } else {
            self.count.min(MAX_COUNT)
        };
        self.columns = if self.columns == 0 {
            DEFAULT_COLUMNS
        } else {
            self.columns.min(MAX_COLUMNS)
        };
        self.category = self.category.filter(|c| !c.trim().is_empty());
        self.taxonomy = self.taxonomy.filter(|t| !t.trim().is_empty());
        self
    }
}

/// Stylesheet appended after every grid.
pub const GRID_STYLES: &str = "<style>\
.devonebc-portfolio-grid{display:grid;gap:20px;margin:20px 0}\
.devonebc-grid-1{grid-template-columns:1fr}\
.devonebc-grid-2{grid-template-columns:repeat(2,1fr)}\
.devonebc-grid-3{grid-template-columns:repeat(3,1fr)}\
.devonebc-grid-4{grid-template-columns:repeat(4,1fr)}\
.devonebc-grid-5{grid-template-columns:repeat(5,1fr)}\
.devonebc-grid-6{grid-template-columns:repeat(6,1fr)}\
.devonebc-portfolio-item{border:1px solid #ddd;padding:15px}\
.devonebc-portfolio-image{margin-bottom:15px}\
.devonebc-portfolio-image img{width:100%;height:auto}\
.devonebc-portfolio-title{margin:0 0 10px 0;font-size:1.2em}\
.devonebc-portfolio-date{color:#666;font-size:0.9em}\
.devonebc-portfolio-excerpt{margin-top:10px}\
@media (max-width:768px){.devonebc-grid-2,.devonebc-grid-3,.devonebc-grid-4,\
.devonebc-grid-5,.devonebc-grid-6{grid-template-columns:1fr}}\
</style>";

/// Render a grid of `items`. `items` must be non-empty and already
/// filtered, sorted and limited.
pub fn render_grid_html(query: &GridQuery, rewrite_slug: &str, items: &[Item]) -> String {
    let mut out = format!(
        "<div class=\"devonebc-portfolio-grid devonebc-grid-{}\">",
        query.columns
    );

    for item in items {
        let href = escape_url(&permalink(rewrite_slug, item));

        out.push_str("<div class=\"devonebc-portfolio-item\">");

        if let Some(src) = item.thumbnail_url.as_deref().map(escape_url).filter(|s| !s.is_empty()) {
            let size = query.image_size.as_str();
            out.push_str(&format!(
                "<div class=\"devonebc-portfolio-image\"><a href=\"{href}\">\
                 <img src=\"{src}\" class=\"attachment-{size} size-{size}\" alt=\"{alt}\" loading=\"lazy\">\
                 </a></div>",
                alt = escape_attr(&item.title),
            ));
        }

        out.push_str("<div class=\"devonebc-portfolio-content\">");
        out.push_str(&format!(
            "<h3 class=\"devonebc-portfolio-title\"><a href=\"{href}\">{}</a></h3>",
            escape_html(&item.title)
        ));

        if query.show_date {
            out.push_str(&format!(
                "<span class=\"devonebc-portfolio-date\">{}</span>",
                escape_html(&format_date(item))
            ));
        }

        if query.show_excerpt && item.has_excerpt() {
            out.push_str(&format!(
                "<div class=\"devonebc-portfolio-excerpt\">{}</div>",
                sanitize_html(&item.excerpt)
            ));
        }

        out.push_str("</div></div>");
    }

    out.push_str("</div>");
    out.push_str(GRID_STYLES);
    out
}
