//! Content store.
//!
//! Items and terms of registered content types. The renderer and editor
//! surface read through [`ContentStore`]; the bundled
//! [`MemoryContentStore`] backs the server and the tests.

mod memory;
mod query;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{Item, NewItem, Term};

pub use memory::MemoryContentStore;
pub use query::{ItemQuery, Order, OrderBy, TermFilter};

/// Storage for content items and taxonomy terms.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Store a new item and return it with its assigned ID.
    async fn create(&self, input: NewItem) -> Result<Item>;

    /// Load an item by ID.
    async fn get(&self, id: u64) -> Result<Option<Item>>;

    /// Items matching `query`, sorted and limited.
    async fn query(&self, query: &ItemQuery) -> Result<Vec<Item>>;

    /// Delete an item. Returns whether it existed.
    async fn delete(&self, id: u64) -> Result<bool>;

    /// Terms of a taxonomy, sorted by name.
    async fn terms(&self, taxonomy: &str) -> Result<Vec<Term>>;

    /// Add or rename a term.
    async fn add_term(&self, term: Term) -> Result<()>;
}
