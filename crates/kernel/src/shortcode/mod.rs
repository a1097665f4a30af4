//! Shortcodes.
//!
//! `[display_portfolio type="projects" count="6"]` and `[display_services]`
//! map their attributes onto a [`GridQuery`] and render through the
//! [`Renderer`]. [`expand`] replaces every known shortcode in a text body.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::content::{Order, OrderBy};
use crate::render::grid::{DEFAULT_COLUMNS, DEFAULT_COUNT};
use crate::render::{GridQuery, ImageSize, Renderer};
use crate::sanitize::{sanitize_key, sanitize_text_field};

#[allow(clippy::expect_used)]
static SHORTCODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([A-Za-z0-9_-]+)((?:\s[^\]]*)?)\]").expect("shortcode pattern is valid")
});

#[allow(clippy::expect_used)]
static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z0-9_-]+)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"']+))"#)
        .expect("attribute pattern is valid")
});

/// Shortcode attributes, keyed by lowercased name.
pub type Attributes = BTreeMap<String, String>;

/// Known shortcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcode {
    DisplayPortfolio,
    DisplayServices,
}

impl Shortcode {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "display_portfolio" => Some(Shortcode::DisplayPortfolio),
            "display_services" => Some(Shortcode::DisplayServices),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Shortcode::DisplayPortfolio => "display_portfolio",
            Shortcode::DisplayServices => "display_services",
        }
    }

    /// Build the grid query for this shortcode.
    pub fn query(&self, attrs: &Attributes) -> GridQuery {
        match self {
            Shortcode::DisplayPortfolio => display_portfolio(attrs),
            Shortcode::DisplayServices => display_services(attrs),
        }
    }
}

/// Parse `key="value"` pairs. Values may be double-quoted, single-quoted or
/// bare. Later duplicates win.
pub fn parse_attributes(text: &str) -> Attributes {
    ATTR_RE
        .captures_iter(text)
        .map(|c| {
            let key = c[1].to_ascii_lowercase();
            let value = c
                .get(2)
                .or_else(|| c.get(3))
                .or_else(|| c.get(4))
                .map_or("", |m| m.as_str());
            (key, value.to_string())
        })
        .collect()
}

fn text<'a>(attrs: &'a Attributes, key: &str) -> Option<&'a str> {
    attrs.get(key).map(String::as_str)
}

fn flag(attrs: &Attributes, key: &str, default: bool) -> bool {
    match text(attrs, key) {
        Some(v) => matches!(
            v.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "yes" | "on"
        ),
        None => default,
    }
}

fn number(attrs: &Attributes, key: &str, default: u32) -> u32 {
    text(attrs, key)
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(default)
}

fn non_empty(attrs: &Attributes, key: &str) -> Option<String> {
    text(attrs, key)
        .map(sanitize_text_field)
        .filter(|v| !v.is_empty())
}

/// `[display_portfolio type count=6 columns=3 category="" show_excerpt="true" show_date="false"]`
pub fn display_portfolio(attrs: &Attributes) -> GridQuery {
    GridQuery {
        source_slug: text(attrs, "type").map(sanitize_key).unwrap_or_default(),
        count: number(attrs, "count", DEFAULT_COUNT),
        columns: number(attrs, "columns", DEFAULT_COLUMNS),
        category: non_empty(attrs, "category"),
        taxonomy: None,
        show_excerpt: flag(attrs, "show_excerpt", true),
        show_date: flag(attrs, "show_date", false),
        ..GridQuery::default()
    }
    .normalized()
}

/// `[display_services count category taxonomy show_excerpt show_date image_size orderby order]`
///
/// Lists `services` items unless `type` names another definition.
pub fn display_services(attrs: &Attributes) -> GridQuery {
    GridQuery {
        source_slug: text(attrs, "type")
            .map(sanitize_key)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "services".to_string()),
        count: number(attrs, "count", DEFAULT_COUNT),
        columns: number(attrs, "columns", DEFAULT_COLUMNS),
        category: non_empty(attrs, "category"),
        taxonomy: Some(
            text(attrs, "taxonomy")
                .map(sanitize_key)
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "services_categories".to_string()),
        ),
        order_by: text(attrs, "orderby")
            .and_then(OrderBy::parse)
            .unwrap_or_default(),
        order: text(attrs, "order").and_then(Order::parse).unwrap_or_default(),
        show_excerpt: flag(attrs, "show_excerpt", true),
        show_date: flag(attrs, "show_date", false),
        image_size: text(attrs, "image_size")
            .and_then(ImageSize::parse)
            .unwrap_or_default(),
        class_name: String::new(),
    }
    .normalized()
}

/// Render one shortcode by name. Returns `None` for unknown names.
pub async fn render(renderer: &Renderer, name: &str, attrs: &Attributes) -> Option<String> {
    let shortcode = Shortcode::parse(name)?;
    Some(renderer.render_grid(&shortcode.query(attrs)).await)
}

/// Replace every known shortcode in `body` with its rendered output.
/// Unknown shortcodes are left as written.
pub async fn expand(renderer: &Renderer, body: &str) -> String {
    let found: Vec<(usize, usize, Shortcode, Attributes)> = SHORTCODE_RE
        .captures_iter(body)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let shortcode = Shortcode::parse(&caps[1])?;
            let attrs = caps
                .get(2)
                .map(|m| parse_attributes(m.as_str()))
                .unwrap_or_default();
            Some((whole.start(), whole.end(), shortcode, attrs))
        })
        .collect();

    let mut out = String::with_capacity(body.len());
    let mut last = 0;
    for (start, end, shortcode, attrs) in found {
        out.push_str(&body[last..start]);
        debug!(shortcode = shortcode.name(), "expanding shortcode");
        out.push_str(&renderer.render_grid(&shortcode.query(&attrs)).await);
        last = end;
    }

    out.push_str(&body[last..]);
    out
}
