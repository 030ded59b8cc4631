use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A catalog record whose base cost follows the net price of its
/// purchase condition.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct CatalogEntry {
    pub id: u64,
    pub base_cost: Decimal,
}

impl CatalogEntry {
    pub fn new(id: u64, base_cost: Decimal) -> Self {
        Self { id, base_cost }
    }
}
