use super::catalog::CatalogEntry;
use super::line_item::StoredLineItem;
use crate::error::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;

#[async_trait]
pub trait LineItemStore: Send + Sync {
    /// Stores `item`, replacing any earlier version with the same id.
    async fn store(&self, item: StoredLineItem) -> Result<()>;
    async fn get(&self, id: u64) -> Result<Option<StoredLineItem>>;
    async fn get_all(&self) -> Result<Vec<StoredLineItem>>;
}

#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Sets the base cost of entry `id`, creating the entry if needed.
    async fn set_base_cost(&self, id: u64, base_cost: Decimal) -> Result<()>;
    /// Removes entry `id`. Removing a missing entry is not an error.
    async fn remove(&self, id: u64) -> Result<()>;
    async fn get(&self, id: u64) -> Result<Option<CatalogEntry>>;
    async fn get_all(&self) -> Result<Vec<CatalogEntry>>;
}

pub type LineItemStoreBox = Box<dyn LineItemStore>;
pub type CatalogStoreBox = Box<dyn CatalogStore>;
