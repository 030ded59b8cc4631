use super::discount::Discount;
use super::pricing::PriceQuote;
use crate::error::{PricingError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Caller-side validation applied before a quote is persisted.
///
/// The engine itself accepts any chain; these checks belong to whoever
/// stores the result. Both are off by default.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PricingPolicy {
    /// Refuse quotes whose net price is below zero.
    pub reject_negative: bool,
    /// Refuse percentage steps above this value.
    pub max_percentage: Option<Decimal>,
}

impl PricingPolicy {
    pub fn validate(&self, quote: &PriceQuote) -> Result<()> {
        if let Some(max) = self.max_percentage {
            for step in &quote.steps {
                if let Some(Discount::Percentage(percent)) = step.discount()
                    && percent > max
                {
                    return Err(PricingError::ValidationError(format!(
                        "discount step {} of {}% exceeds the {}% cap",
                        step.order,
                        percent.normalize(),
                        max.normalize()
                    )));
                }
            }
        }

        if self.reject_negative && quote.net_price < Decimal::ZERO {
            return Err(PricingError::ValidationError(format!(
                "net price {} is negative",
                quote.net_price.normalize()
            )));
        }

        Ok(())
    }
}
