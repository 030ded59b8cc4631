use crate::domain::catalog::CatalogEntry;
use crate::domain::line_item::StoredLineItem;
use crate::domain::ports::{CatalogStore, LineItemStore};
use crate::error::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for saved line items.
///
/// Uses `Arc<RwLock<HashMap<u64, StoredLineItem>>>` to allow shared concurrent access.
#[derive(Default, Clone)]
pub struct InMemoryLineItemStore {
    items: Arc<RwLock<HashMap<u64, StoredLineItem>>>,
}

impl InMemoryLineItemStore {
    /// Creates a new, empty in-memory line item store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LineItemStore for InMemoryLineItemStore {
    async fn store(&self, item: StoredLineItem) -> Result<()> {
        let mut items = self.items.write().await;
        items.insert(item.id, item);
        Ok(())
    }

    async fn get(&self, id: u64) -> Result<Option<StoredLineItem>> {
        let items = self.items.read().await;
        Ok(items.get(&id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<StoredLineItem>> {
        let items = self.items.read().await;
        Ok(items.values().cloned().collect())
    }
}

/// A thread-safe in-memory catalog of base costs.
#[derive(Default, Clone)]
pub struct InMemoryCatalogStore {
    entries: Arc<RwLock<HashMap<u64, CatalogEntry>>>,
}

impl InMemoryCatalogStore {
    /// Creates a new, empty in-memory catalog.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn set_base_cost(&self, id: u64, base_cost: Decimal) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries
            .entry(id)
            .and_modify(|entry| entry.base_cost = base_cost)
            .or_insert_with(|| CatalogEntry::new(id, base_cost));
        Ok(())
    }

    async fn remove(&self, id: u64) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.remove(&id);
        Ok(())
    }

    async fn get(&self, id: u64) -> Result<Option<CatalogEntry>> {
        let entries = self.entries.read().await;
        Ok(entries.get(&id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<CatalogEntry>> {
        let entries = self.entries.read().await;
        Ok(entries.values().cloned().collect())
    }
}
