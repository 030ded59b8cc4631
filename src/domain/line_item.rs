use super::discount::DiscountStep;
use super::numeric::NumericInput;
use super::pricing::PriceQuote;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A purchase-condition row as submitted by the editing surface.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct LineItem {
    pub id: u64,
    /// Catalog entry whose base cost tracks this row's net price.
    #[serde(default)]
    pub catalog: Option<u64>,
    #[serde(default)]
    pub list_price: Option<NumericInput>,
    #[serde(default)]
    pub steps: Vec<DiscountStep>,
}

/// A line item as persisted, with its computed net price.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct StoredLineItem {
    pub id: u64,
    pub catalog: Option<u64>,
    pub list_price: Decimal,
    pub steps: Vec<DiscountStep>,
    pub net_price: Decimal,
}

impl StoredLineItem {
    pub fn new(id: u64, catalog: Option<u64>, quote: PriceQuote) -> Self {
        Self {
            id,
            catalog,
            list_price: quote.list_price,
            steps: quote.steps,
            net_price: quote.net_price,
        }
    }
}
