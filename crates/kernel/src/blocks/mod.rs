//! Editor blocks.
//!
//! Two server-rendered blocks: a grid that delegates to the
//! `display_services` shortcode, and a single item card.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::render::{Layout, Renderer, SingleOptions, escape_attr};
use crate::sanitize::{sanitize_key, sanitize_text_field};
use crate::shortcode::{Attributes, Shortcode};

/// Name of the grid block.
pub const GRID_BLOCK: &str = "vetrina/services-grid";
/// Name of the single item block.
pub const SINGLE_BLOCK: &str = "vetrina/single-service";

/// Attributes of the grid block, as saved by the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridBlockAttributes {
    pub post_type: String,
    pub count: u32,
    pub columns: u32,
    pub category: String,
    pub taxonomy: String,
    pub show_excerpt: bool,
    pub show_date: bool,
    pub image_size: String,
    #[serde(rename = "orderby")]
    pub order_by: String,
    pub order: String,
    pub class_name: String,
}

impl Default for GridBlockAttributes {
    fn default() -> Self {
        Self {
            post_type: "services".to_string(),
            count: 6,
            columns: 3,
            category: String::new(),
            taxonomy: "services_categories".to_string(),
            show_excerpt: true,
            show_date: false,
            image_size: "medium".to_string(),
            order_by: "date".to_string(),
            order: "DESC".to_string(),
            class_name: String::new(),
        }
    }
}

impl GridBlockAttributes {
    /// Attributes for the `display_services` shortcode. Empty values are
    /// omitted so the shortcode defaults apply.
    pub fn shortcode_attributes(&self) -> Attributes {
        let pairs = [
            ("type", sanitize_key(&self.post_type)),
            ("count", self.count.to_string()),
            ("columns", self.columns.to_string()),
            ("category", sanitize_text_field(&self.category)),
            ("taxonomy", sanitize_key(&self.taxonomy)),
            ("show_excerpt", self.show_excerpt.to_string()),
            ("show_date", self.show_date.to_string()),
            ("image_size", sanitize_key(&self.image_size)),
            ("orderby", sanitize_key(&self.order_by)),
            ("order", sanitize_key(&self.order)),
        ];
        pairs
            .into_iter()
            .filter(|(_, v)| !v.is_empty() && v != "0")
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    /// Wrapper classes: `devonebc-services-grid columns-<n> <className>`.
    pub fn wrapper_class(&self) -> String {
        let columns = Shortcode::DisplayServices
            .query(&self.shortcode_attributes())
            .columns;
        let extra = sanitize_text_field(&self.class_name);
        let mut class = format!("devonebc-services-grid columns-{columns}");
        if !extra.is_empty() {
            class.push(' ');
            class.push_str(&extra);
        }
        class
    }
}

/// Attributes of the single item block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SingleBlockAttributes {
    /// Item to show; 0 means none selected.
    pub service_id: u64,
    pub show_image: bool,
    pub show_content: bool,
    pub layout: String,
}

impl Default for SingleBlockAttributes {
    fn default() -> Self {
        Self {
            service_id: 0,
            show_image: true,
            show_content: true,
            layout: "vertical".to_string(),
        }
    }
}

impl SingleBlockAttributes {
    pub fn options(&self) -> SingleOptions {
        SingleOptions {
            show_image: self.show_image,
            show_content: self.show_content,
            layout: Layout::parse(&self.layout).unwrap_or_default(),
        }
    }
}

/// Render the grid block.
pub async fn render_grid_block(renderer: &Renderer, attrs: &GridBlockAttributes) -> String {
    let query = Shortcode::DisplayServices.query(&attrs.shortcode_attributes());
    let inner = renderer.render_grid(&query).await;
    format!(
        "<div class=\"{}\">{inner}</div>",
        escape_attr(&attrs.wrapper_class())
    )
}

/// Render the single item block.
pub async fn render_single_block(renderer: &Renderer, attrs: &SingleBlockAttributes) -> String {
    renderer
        .render_single(attrs.service_id, &attrs.options())
        .await
}

/// Schema of one block attribute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeSchema {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub default: Value,
}

/// Block registration data for the editor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockDefinition {
    pub name: &'static str,
    pub title: &'static str,
    pub attributes: IndexMap<&'static str, AttributeSchema>,
}

fn schema(kind: &'static str, default: Value) -> AttributeSchema {
    AttributeSchema { kind, default }
}

/// Both blocks with their attribute schemas.
pub fn block_definitions() -> Vec<BlockDefinition> {
    let grid = GridBlockAttributes::default();
    let single = SingleBlockAttributes::default();

    vec![
        BlockDefinition {
            name: GRID_BLOCK,
            title: "Services Grid",
            attributes: IndexMap::from([
                ("postType", schema("string", json!(grid.post_type))),
                ("count", schema("number", json!(grid.count))),
                ("columns", schema("number", json!(grid.columns))),
                ("category", schema("string", json!(grid.category))),
                ("taxonomy", schema("string", json!(grid.taxonomy))),
                ("showExcerpt", schema("boolean", json!(grid.show_excerpt))),
                ("showDate", schema("boolean", json!(grid.show_date))),
                ("imageSize", schema("string", json!(grid.image_size))),
                ("orderby", schema("string", json!(grid.order_by))),
                ("order", schema("string", json!(grid.order))),
                ("className", schema("string", json!(grid.class_name))),
            ]),
        },
        BlockDefinition {
            name: SINGLE_BLOCK,
            title: "Single Service",
            attributes: IndexMap::from([
                ("serviceId", schema("number", json!(single.service_id))),
                ("showImage", schema("boolean", json!(single.show_image))),
                ("showContent", schema("boolean", json!(single.show_content))),
                ("layout", schema("string", json!(single.layout))),
            ]),
        },
    ]
}
