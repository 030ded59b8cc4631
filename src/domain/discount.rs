use super::numeric::NumericInput;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    Percentage,
    Amount,
}

/// When a discount is recognised for accounting purposes.
///
/// Carried with each step and persisted, but never consulted when computing
/// the net price.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum Collectability {
    #[default]
    Immediate,
    Deferred,
}

/// One link in a discount chain, in the shape it has on the JSON boundary.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct DiscountStep {
    /// Application sequence. Equal values keep their input order.
    pub order: u32,
    pub kind: DiscountKind,
    /// The value as entered; see [`DiscountStep::discount`].
    pub value: NumericInput,
    #[serde(
        default,
        serialize_with = "serialize_collectability",
        deserialize_with = "deserialize_collectability"
    )]
    pub deferred: Collectability,
}

/// A parsed discount step.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Discount {
    /// Percentage on the 0-100 scale.
    Percentage(Decimal),
    /// Currency amount subtracted directly.
    Amount(Decimal),
}

impl DiscountStep {
    pub fn new(order: u32, kind: DiscountKind, value: impl Into<NumericInput>) -> Self {
        Self {
            order,
            kind,
            value: value.into(),
            deferred: Collectability::Immediate,
        }
    }

    pub fn percentage(order: u32, value: impl Into<NumericInput>) -> Self {
        Self::new(order, DiscountKind::Percentage, value)
    }

    pub fn amount(order: u32, value: impl Into<NumericInput>) -> Self {
        Self::new(order, DiscountKind::Amount, value)
    }

    pub fn with_collectability(mut self, deferred: Collectability) -> Self {
        self.deferred = deferred;
        self
    }

    /// Parses the step, or `None` when its value holds no number.
    pub fn discount(&self) -> Option<Discount> {
        let value = self.value.to_decimal()?;
        Some(match self.kind {
            DiscountKind::Percentage => Discount::Percentage(value),
            DiscountKind::Amount => Discount::Amount(value),
        })
    }
}

impl Discount {
    /// Applies the discount to `price`, or `None` if the result does not fit
    /// in a `Decimal`.
    pub fn apply(self, price: Decimal) -> Option<Decimal> {
        match self {
            Discount::Percentage(percent) => {
                let factor = Decimal::ONE.checked_sub(percent.checked_div(Decimal::ONE_HUNDRED)?)?;
                price.checked_mul(factor)
            }
            Discount::Amount(amount) => price.checked_sub(amount),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CollectabilityRepr {
    Flag(bool),
    Label(String),
}

fn serialize_collectability<S>(value: &Collectability, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_bool(*value == Collectability::Deferred)
}

fn deserialize_collectability<'de, D>(deserializer: D) -> Result<Collectability, D::Error>
where
    D: Deserializer<'de>,
{
    match CollectabilityRepr::deserialize(deserializer)? {
        CollectabilityRepr::Flag(true) => Ok(Collectability::Deferred),
        CollectabilityRepr::Flag(false) => Ok(Collectability::Immediate),
        CollectabilityRepr::Label(label) => match label.trim().to_ascii_lowercase().as_str() {
            "deferred" => Ok(Collectability::Deferred),
            "immediate" => Ok(Collectability::Immediate),
            other => Err(serde::de::Error::unknown_variant(
                other,
                &["immediate", "deferred"],
            )),
        },
    }
}
