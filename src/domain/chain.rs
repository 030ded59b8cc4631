use super::discount::DiscountStep;
use super::numeric::NumericInput;
use super::pricing::{DiscountChainEngine, in_application_order};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An ordered, immutable discount chain as edited on a line item.
///
/// Every operation returns a new chain whose steps carry dense, 1-based
/// `order` values matching their position. The receiver is left untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<DiscountStep>", into = "Vec<DiscountStep>")]
pub struct DiscountChain {
    steps: Vec<DiscountStep>,
}

impl DiscountChain {
    /// Builds a chain from steps in any order, sorting them by `order`.
    pub fn new(steps: impl IntoIterator<Item = DiscountStep>) -> Self {
        let steps: Vec<DiscountStep> = steps.into_iter().collect();
        let ordered = in_application_order(&steps).into_iter().cloned().collect();
        Self::renumbered(ordered)
    }

    pub fn steps(&self) -> &[DiscountStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn push(&self, step: DiscountStep) -> Self {
        self.insert(self.steps.len(), step)
    }

    /// Inserts `step` at `position`, or at the end if `position` is past it.
    pub fn insert(&self, position: usize, step: DiscountStep) -> Self {
        let mut steps = self.steps.clone();
        steps.insert(position.min(steps.len()), step);
        Self::renumbered(steps)
    }

    /// Removes the step at `position`. Out-of-range positions are ignored.
    pub fn remove(&self, position: usize) -> Self {
        if position >= self.steps.len() {
            return self.clone();
        }
        let mut steps = self.steps.clone();
        steps.remove(position);
        Self::renumbered(steps)
    }

    /// Moves the step at `from` so that it ends up at `to`.
    pub fn move_step(&self, from: usize, to: usize) -> Self {
        if from >= self.steps.len() {
            return self.clone();
        }
        let mut steps = self.steps.clone();
        let step = steps.remove(from);
        steps.insert(to.min(steps.len()), step);
        Self::renumbered(steps)
    }

    pub fn net_price(&self, list_price: Option<&NumericInput>) -> Decimal {
        DiscountChainEngine::new().compute_net_price(list_price, &self.steps)
    }

    fn renumbered(steps: Vec<DiscountStep>) -> Self {
        let steps = steps
            .into_iter()
            .zip(1u32..)
            .map(|(mut step, order)| {
                step.order = order;
                step
            })
            .collect();
        Self { steps }
    }
}

impl From<Vec<DiscountStep>> for DiscountChain {
    fn from(steps: Vec<DiscountStep>) -> Self {
        Self::new(steps)
    }
}

impl From<DiscountChain> for Vec<DiscountStep> {
    fn from(chain: DiscountChain) -> Self {
        chain.steps
    }
}
