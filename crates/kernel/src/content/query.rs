//! Item query parameters.

use serde::{Deserialize, Serialize};

/// Sort key for item queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderBy {
    #[default]
    Date,
    Title,
    Random,
    Manual,
}

impl OrderBy {
    pub const ALL: [OrderBy; 4] = [
        OrderBy::Date,
        OrderBy::Title,
        OrderBy::Random,
        OrderBy::Manual,
    ];

    /// Parse a submitted sort key. Accepts the host aliases `rand` and
    /// `menu_order`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "date" => Some(OrderBy::Date),
            "title" => Some(OrderBy::Title),
            "rand" | "random" => Some(OrderBy::Random),
            "menu_order" | "manual" => Some(OrderBy::Manual),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderBy::Date => "date",
            OrderBy::Title => "title",
            OrderBy::Random => "random",
            OrderBy::Manual => "manual",
        }
    }

    /// Display label for selection widgets.
    pub fn label(&self) -> &'static str {
        match self {
            OrderBy::Date => "Date",
            OrderBy::Title => "Title",
            OrderBy::Random => "Random",
            OrderBy::Manual => "Menu Order",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Order {
    Asc,
    #[default]
    Desc,
}

impl Order {
    pub const ALL: [Order; 2] = [Order::Desc, Order::Asc];

    /// Parse case-insensitively ("asc", "DESC").
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(Order::Asc),
            "desc" => Some(Order::Desc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Order::Asc => "ASC",
            Order::Desc => "DESC",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Order::Asc => "Ascending",
            Order::Desc => "Descending",
        }
    }
}

/// Restrict results to items carrying `term` in `taxonomy`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermFilter {
    /// Registered (namespaced) taxonomy name.
    pub taxonomy: String,
    /// Term slug.
    pub term: String,
}

/// Parameters for [`ContentStore::query`](super::ContentStore::query).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemQuery {
    /// Registered (namespaced) content type name.
    pub item_type: String,
    pub limit: usize,
    pub offset: usize,
    pub terms: Option<TermFilter>,
    pub order_by: OrderBy,
    pub order: Order,
    pub published_only: bool,
}

impl ItemQuery {
    /// Published items of `item_type`, newest first.
    pub fn new(item_type: impl Into<String>) -> Self {
        Self {
            item_type: item_type.into(),
            limit: 10,
            offset: 0,
            terms: None,
            order_by: OrderBy::Date,
            order: Order::Desc,
            published_only: true,
        }
    }
}
