use crate::domain::catalog::CatalogEntry;
use crate::domain::line_item::{LineItem, StoredLineItem};
use crate::domain::policy::PricingPolicy;
use crate::domain::ports::{CatalogStoreBox, LineItemStoreBox};
use crate::domain::pricing::{DiscountChainEngine, PriceQuote};
use crate::error::Result;
use tracing::{debug, error, info};

/// The save path of the purchase-conditions API.
///
/// Quotes incoming line items, validates them against a [`PricingPolicy`],
/// stores them and keeps the referenced catalog entries' base cost in line
/// with the computed net price. Storage operations are awaited one item at a
/// time, so items are applied in the order they are submitted.
pub struct PurchaseConditionsService {
    engine: DiscountChainEngine,
    policy: PricingPolicy,
    line_items: LineItemStoreBox,
    catalog: CatalogStoreBox,
}

impl PurchaseConditionsService {
    /// Creates a service with the permissive default policy.
    ///
    /// # Arguments
    ///
    /// * `line_items` - The store for saved line items.
    /// * `catalog` - The store for catalog base costs.
    pub fn new(line_items: LineItemStoreBox, catalog: CatalogStoreBox) -> Self {
        Self {
            engine: DiscountChainEngine::new(),
            policy: PricingPolicy::default(),
            line_items,
            catalog,
        }
    }

    pub fn with_policy(mut self, policy: PricingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Computes the quote for `item` without storing anything.
    pub fn quote(&self, item: &LineItem) -> PriceQuote {
        self.engine.quote(item.list_price.as_ref(), &item.steps)
    }

    /// Quotes, validates and persists `item`.
    ///
    /// The catalog base cost is written first and restored if storing the
    /// line item then fails, so either both records change or neither does.
    /// Nothing is written when the policy rejects the quote. An entry that an
    /// earlier version of the item referenced keeps its base cost.
    pub async fn save(&self, item: LineItem) -> Result<StoredLineItem> {
        let quote = self.quote(&item);
        self.policy.validate(&quote)?;

        let stored = StoredLineItem::new(item.id, item.catalog, quote);

        let previous = match stored.catalog {
            Some(catalog_id) => {
                let previous = self.catalog.get(catalog_id).await?;
                self.catalog
                    .set_base_cost(catalog_id, stored.net_price)
                    .await?;
                debug!(catalog = catalog_id, base_cost = %stored.net_price, "catalog base cost updated");
                Some((catalog_id, previous))
            }
            None => None,
        };

        if let Err(err) = self.line_items.store(stored.clone()).await {
            if let Some((catalog_id, previous)) = previous {
                self.restore_catalog(catalog_id, previous).await;
            }
            return Err(err);
        }

        info!(item = stored.id, net_price = %stored.net_price, "line item saved");
        Ok(stored)
    }

    async fn restore_catalog(&self, catalog_id: u64, previous: Option<CatalogEntry>) {
        let restored = match previous {
            Some(entry) => self.catalog.set_base_cost(catalog_id, entry.base_cost).await,
            None => self.catalog.remove(catalog_id).await,
        };
        if let Err(err) = restored {
            error!(catalog = catalog_id, "Error restoring catalog base cost: {}", err);
        }
    }

    /// Returns every catalog entry, ordered by id.
    pub async fn catalog(&self) -> Result<Vec<CatalogEntry>> {
        let mut entries = self.catalog.get_all().await?;
        entries.sort_by_key(|entry| entry.id);
        Ok(entries)
    }

    /// Consumes the service and returns all stored line items, ordered by id.
    pub async fn into_results(self) -> Result<Vec<StoredLineItem>> {
        let mut items = self.line_items.get_all().await?;
        items.sort_by_key(|item| item.id);
        Ok(items)
    }
}
