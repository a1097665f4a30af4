//! Single item fragment.

use serde::{Deserialize, Serialize};

use super::ImageSize;
use super::escape::{escape_attr, escape_html, escape_url, sanitize_html};
use crate::models::Item;

/// Arrangement of image and text in a single item fragment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    Vertical,
    Horizontal,
}

impl Layout {
    pub const ALL: [Layout; 2] = [Layout::Vertical, Layout::Horizontal];

    /// Parse a layout name; unknown names yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "vertical" => Some(Layout::Vertical),
            "horizontal" => Some(Layout::Horizontal),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Layout::Vertical => "vertical",
            Layout::Horizontal => "horizontal",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Layout::Vertical => "Vertical",
            Layout::Horizontal => "Horizontal",
        }
    }
}

/// Display options for a single item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SingleOptions {
    pub show_image: bool,
    pub show_content: bool,
    pub layout: Layout,
}

impl Default for SingleOptions {
    fn default() -> Self {
        Self {
            show_image: true,
            show_content: true,
            layout: Layout::Vertical,
        }
    }
}

/// Stylesheet for the two-column arrangement.
pub const SINGLE_STYLES: &str = "<style>\
.devonebc-single-item.layout-horizontal{display:flex;gap:30px;align-items:flex-start}\
.devonebc-single-item.layout-horizontal .devonebc-item-image{flex:0 0 40%}\
.devonebc-single-item .devonebc-item-image img{width:100%;height:auto}\
@media (max-width:768px){.devonebc-single-item.layout-horizontal{display:block}}\
</style>";

/// Render one item. `link` is the item's permalink.
pub fn render_single_html(item: &Item, link: &str, options: &SingleOptions) -> String {
    let mut out = format!(
        "<div class=\"devonebc-single-item layout-{}\">",
        options.layout.as_str()
    );

    if let Some(src) = item
        .thumbnail_url
        .as_deref()
        .filter(|_| options.show_image)
        .map(escape_url)
        .filter(|s| !s.is_empty())
    {
        let size = ImageSize::Large.as_str();
        out.push_str(&format!(
            "<div class=\"devonebc-item-image\">\
             <img src=\"{src}\" class=\"attachment-{size} size-{size}\" alt=\"{}\">\
             </div>",
            escape_attr(&item.title)
        ));
    }

    out.push_str("<div class=\"devonebc-item-content\">");
    out.push_str(&format!(
        "<h3 class=\"devonebc-item-title\">{}</h3>",
        escape_html(&item.title)
    ));

    if options.show_content {
        out.push_str(&format!(
            "<div class=\"devonebc-item-description\">{}</div>",
            sanitize_html(&item.content)
        ));
    }

    out.push_str(&format!(
        "<a href=\"{}\" class=\"devonebc-item-link\">Learn More</a>",
        escape_url(link)
    ));
    out.push_str("</div></div>");

    if options.layout == Layout::Horizontal {
        out.push_str(SINGLE_STYLES);
    }
    out
}
