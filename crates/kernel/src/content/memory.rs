//! In-memory content store.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use anyhow::{Result, bail};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use rand::seq::SliceRandom;
use tracing::debug;

use super::query::{ItemQuery, Order, OrderBy};
use super::ContentStore;
use crate::models::{Item, NewItem, Term};
use crate::sanitize::{sanitize_text_field, sanitize_title};

/// Content store kept entirely in memory.
#[derive(Default)]
pub struct MemoryContentStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    next_id: u64,
    items: BTreeMap<u64, Item>,
    /// Taxonomy name to (term slug to term).
    terms: BTreeMap<String, BTreeMap<String, Term>>,
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored items.
    pub fn len(&self) -> usize {
        self.inner.read().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().items.is_empty()
    }
}

fn compare(a: &Item, b: &Item, order_by: OrderBy) -> Ordering {
    match order_by {
        OrderBy::Date => a.created.cmp(&b.created),
        OrderBy::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        OrderBy::Manual => a.menu_order.cmp(&b.menu_order),
        OrderBy::Random => Ordering::Equal,
    }
    .then_with(|| a.id.cmp(&b.id))
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn create(&self, input: NewItem) -> Result<Item> {
        let title = sanitize_text_field(&input.title);
        if input.item_type.is_empty() {
            bail!("item type is required");
        }

        let mut inner = self.inner.write();
        inner.next_id += 1;
        let id = inner.next_id;

        let slug = input
            .slug
            .as_deref()
            .map(sanitize_title)
            .filter(|s| !s.is_empty())
            .or_else(|| Some(sanitize_title(&title)).filter(|s| !s.is_empty()))
            .unwrap_or_else(|| id.to_string());

        let item = Item {
            id,
            item_type: input.item_type,
            slug,
            title,
            content: input.content,
            excerpt: input.excerpt,
            thumbnail_url: input.thumbnail_url.filter(|u| !u.trim().is_empty()),
            published: input.published,
            created: input.created.unwrap_or_else(Utc::now),
            menu_order: input.menu_order,
            terms: input.terms,
        };
        inner.items.insert(id, item.clone());

        debug!(item_id = id, item_type = %item.item_type, "item created");
        Ok(item)
    }

    async fn get(&self, id: u64) -> Result<Option<Item>> {
        Ok(self.inner.read().items.get(&id).cloned())
    }

    async fn query(&self, query: &ItemQuery) -> Result<Vec<Item>> {
        let mut found: Vec<Item> = self
            .inner
            .read()
            .items
            .values()
            .filter(|i| i.item_type == query.item_type)
            .filter(|i| !query.published_only || i.published)
            .filter(|i| {
                query
                    .terms
                    .as_ref()
                    .is_none_or(|f| i.has_term(&f.taxonomy, &f.term))
            })
            .cloned()
            .collect();

        if query.order_by == OrderBy::Random {
            found.shuffle(&mut rand::thread_rng());
        } else {
            found.sort_by(|a, b| compare(a, b, query.order_by));
            if query.order == Order::Desc {
                found.reverse();
            }
        }

        Ok(found
            .into_iter()
            .skip(query.offset)
            .take(query.limit)
            .collect())
    }

    async fn delete(&self, id: u64) -> Result<bool> {
        Ok(self.inner.write().items.remove(&id).is_some())
    }

    async fn terms(&self, taxonomy: &str) -> Result<Vec<Term>> {
        let mut terms: Vec<Term> = self
            .inner
            .read()
            .terms
            .get(taxonomy)
            .map(|m| m.values().cloned().collect())
            .unwrap_or_default();
        terms.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(terms)
    }

    async fn add_term(&self, term: Term) -> Result<()> {
        if term.slug.is_empty() {
            bail!("term slug is required");
        }
        self.inner
            .write()
            .terms
            .entry(term.taxonomy.clone())
            .or_default()
            .insert(term.slug.clone(), term);
        Ok(())
    }
}
