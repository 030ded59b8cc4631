use crate::domain::catalog::CatalogEntry;
use crate::domain::line_item::StoredLineItem;
use crate::domain::ports::{CatalogStore, LineItemStore};
use crate::error::{PricingError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, IteratorMode, Options};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;

/// Column Family for storing saved line items.
pub const CF_LINE_ITEMS: &str = "line_items";
/// Column Family for storing catalog base costs.
pub const CF_CATALOG: &str = "catalog";

impl From<rocksdb::Error> for PricingError {
    fn from(err: rocksdb::Error) -> Self {
        PricingError::StorageError(Box::new(err))
    }
}

/// A persistent store implementation using RocksDB.
///
/// Keeps line items and catalog entries in separate Column Families, keyed
/// by big-endian ids so iteration follows id order. Values are JSON.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the required column families exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_line_items = ColumnFamilyDescriptor::new(CF_LINE_ITEMS, Options::default());
        let cf_catalog = ColumnFamilyDescriptor::new(CF_CATALOG, Options::default());

        let db = DB::open_cf_descriptors(&opts, path, vec![cf_line_items, cf_catalog])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn column_family(&self, name: &str) -> Result<&ColumnFamily> {
        self.db.cf_handle(name).ok_or_else(|| {
            PricingError::InternalError(Box::new(std::io::Error::other(format!(
                "{name} column family not found"
            ))))
        })
    }

    fn read<T: DeserializeOwned>(&self, name: &str, id: u64) -> Result<Option<T>> {
        let cf = self.column_family(name)?;
        match self.db.get_cf(cf, id.to_be_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn read_all<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>> {
        let cf = self.column_family(name)?;
        let mut values = Vec::new();
        for entry in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (_key, value) = entry?;
            values.push(serde_json::from_slice(&value)?);
        }
        Ok(values)
    }
}

#[async_trait]
impl LineItemStore for RocksDBStore {
    async fn store(&self, item: StoredLineItem) -> Result<()> {
        let cf = self.column_family(CF_LINE_ITEMS)?;
        let value = serde_json::to_vec(&item)?;
        self.db.put_cf(cf, item.id.to_be_bytes(), value)?;
        Ok(())
    }

    async fn get(&self, id: u64) -> Result<Option<StoredLineItem>> {
        self.read(CF_LINE_ITEMS, id)
    }

    async fn get_all(&self) -> Result<Vec<StoredLineItem>> {
        self.read_all(CF_LINE_ITEMS)
    }
}

#[async_trait]
impl CatalogStore for RocksDBStore {
    async fn set_base_cost(&self, id: u64, base_cost: Decimal) -> Result<()> {
        let cf = self.column_family(CF_CATALOG)?;
        let value = serde_json::to_vec(&CatalogEntry::new(id, base_cost))?;
        self.db.put_cf(cf, id.to_be_bytes(), value)?;
        Ok(())
    }

    async fn remove(&self, id: u64) -> Result<()> {
        let cf = self.column_family(CF_CATALOG)?;
        self.db.delete_cf(cf, id.to_be_bytes())?;
        Ok(())
    }

    async fn get(&self, id: u64) -> Result<Option<CatalogEntry>> {
        self.read(CF_CATALOG, id)
    }

    async fn get_all(&self) -> Result<Vec<CatalogEntry>> {
        self.read_all(CF_CATALOG)
    }
}
