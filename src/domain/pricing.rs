use super::discount::DiscountStep;
use super::numeric::NumericInput;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The result of running a list price through a discount chain.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct PriceQuote {
    /// The normalized starting price, zero when none could be read.
    pub list_price: Decimal,
    /// The steps as supplied by the caller.
    pub steps: Vec<DiscountStep>,
    pub net_price: Decimal,
}

/// Reduces a list price through an ordered chain of discounts.
///
/// The engine holds no state: every call is a pure function of its
/// arguments, so a single instance can be shared freely between tasks.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscountChainEngine;

impl DiscountChainEngine {
    pub fn new() -> Self {
        Self
    }

    /// Computes the net price of `list_price` after applying `steps`.
    ///
    /// Steps are applied by ascending `order`, keeping the input order for
    /// equal values. A missing or non-numeric list price yields zero. A step
    /// whose value cannot be read, or whose application would overflow, is
    /// skipped. The result is not clamped and may be negative.
    pub fn compute_net_price(
        &self,
        list_price: Option<&NumericInput>,
        steps: &[DiscountStep],
    ) -> Decimal {
        let Some(list_price) = list_price.and_then(NumericInput::to_decimal) else {
            return Decimal::ZERO;
        };

        in_application_order(steps)
            .into_iter()
            .fold(list_price, |running, step| {
                match step.discount().and_then(|d| d.apply(running)) {
                    Some(next) => next,
                    None => {
                        debug!(order = step.order, value = ?step.value, "skipping discount step");
                        running
                    }
                }
            })
    }

    /// Builds a full [`PriceQuote`] for `list_price` and `steps`.
    pub fn quote(&self, list_price: Option<&NumericInput>, steps: &[DiscountStep]) -> PriceQuote {
        PriceQuote {
            list_price: list_price
                .and_then(NumericInput::to_decimal)
                .unwrap_or(Decimal::ZERO),
            steps: steps.to_vec(),
            net_price: self.compute_net_price(list_price, steps),
        }
    }
}

/// Returns the steps sorted by `order` without touching the input slice.
pub fn in_application_order(steps: &[DiscountStep]) -> Vec<&DiscountStep> {
    let mut ordered: Vec<&DiscountStep> = steps.iter().collect();
    // `sort_by_key` is stable: equal orders keep their input sequence
    ordered.sort_by_key(|step| step.order);
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn price(value: &str) -> NumericInput {
        NumericInput::from(value)
    }

    #[test]
    fn test_empty_chain_returns_list_price() {
        let engine = DiscountChainEngine::new();
        assert_eq!(engine.compute_net_price(Some(&price("42.5")), &[]), dec!(42.5));
        assert_eq!(
            engine.compute_net_price(Some(&NumericInput::from(7_i64)), &[]),
            dec!(7)
        );
    }

    #[test]
    fn test_missing_or_invalid_list_price_is_zero() {
        let engine = DiscountChainEngine::new();
        let steps = vec![DiscountStep::amount(1, "50")];

        assert_eq!(engine.compute_net_price(None, &steps), Decimal::ZERO);
        assert_eq!(engine.compute_net_price(Some(&price("abc")), &steps), Decimal::ZERO);
        assert_eq!(engine.compute_net_price(Some(&price("")), &steps), Decimal::ZERO);
        assert_eq!(
            engine.compute_net_price(Some(&NumericInput::Other(serde_json::Value::Null)), &steps),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_chain_is_order_sensitive() {
        let engine = DiscountChainEngine::new();
        let list_price = price("100");

        let percent_first = vec![DiscountStep::percentage(1, "10"), DiscountStep::amount(2, "5")];
        let amount_first = vec![DiscountStep::amount(1, "5"), DiscountStep::percentage(2, "10")];

        assert_eq!(engine.compute_net_price(Some(&list_price), &percent_first), dec!(85));
        assert_eq!(engine.compute_net_price(Some(&list_price), &amount_first), dec!(85.5));
    }

    #[test]
    fn test_steps_are_sorted_by_order() {
        let engine = DiscountChainEngine::new();
        // Supplied backwards, applied as percentage then amount
        let steps = vec![DiscountStep::amount(2, "5"), DiscountStep::percentage(1, "10")];
        assert_eq!(engine.compute_net_price(Some(&price("100")), &steps), dec!(85));
    }

    #[test]
    fn test_equal_orders_keep_input_sequence() {
        let engine = DiscountChainEngine::new();
        let list_price = price("100");

        let steps = vec![DiscountStep::amount(1, "5"), DiscountStep::percentage(1, "10")];
        assert_eq!(engine.compute_net_price(Some(&list_price), &steps), dec!(85.5));

        let steps = vec![DiscountStep::percentage(1, "10"), DiscountStep::amount(1, "5")];
        assert_eq!(engine.compute_net_price(Some(&list_price), &steps), dec!(85));
    }

    #[test]
    fn test_malformed_step_is_skipped() {
        let engine = DiscountChainEngine::new();
        let steps = vec![DiscountStep::percentage(1, "abc")];
        assert_eq!(engine.compute_net_price(Some(&price("100")), &steps), dec!(100));

        let steps = vec![
            DiscountStep::percentage(1, "20"),
            DiscountStep::amount(2, "n/a"),
            DiscountStep::amount(3, "10"),
        ];
        assert_eq!(engine.compute_net_price(Some(&price("200")), &steps), dec!(150));
    }

    #[test]
    fn test_input_is_not_mutated() {
        let engine = DiscountChainEngine::new();
        let steps = vec![
            DiscountStep::amount(3, "1"),
            DiscountStep::percentage(1, "10"),
            DiscountStep::amount(2, "4"),
        ];
        let before = steps.clone();

        let first = engine.compute_net_price(Some(&price("100")), &steps);
        let second = engine.compute_net_price(Some(&price("100")), &steps);

        assert_eq!(first, second);
        assert_eq!(first, dec!(85));
        assert_eq!(steps, before);
    }

    #[test]
    fn test_negative_results_are_not_clamped() {
        let engine = DiscountChainEngine::new();
        let steps = vec![DiscountStep::amount(1, "50")];
        assert_eq!(engine.compute_net_price(Some(&price("10")), &steps), dec!(-40));

        let steps = vec![DiscountStep::percentage(1, "120")];
        assert_eq!(engine.compute_net_price(Some(&price("50")), &steps), dec!(-10));
    }

    #[test]
    fn test_percentage_then_amount() {
        let engine = DiscountChainEngine::new();
        let steps = vec![DiscountStep::percentage(1, "20"), DiscountStep::amount(2, "10")];
        assert_eq!(engine.compute_net_price(Some(&price("200")), &steps), dec!(150));
    }

    #[test]
    fn test_overflowing_step_is_skipped() {
        let engine = DiscountChainEngine::new();
        let list_price = NumericInput::from(Decimal::MIN);
        let steps = vec![DiscountStep::amount(1, Decimal::MAX), DiscountStep::amount(2, "0")];
        assert_eq!(engine.compute_net_price(Some(&list_price), &steps), Decimal::MIN);
    }

    #[test]
    fn test_out_of_range_numbers_saturate() {
        let engine = DiscountChainEngine::new();
        let huge: NumericInput = serde_json::from_str("1e30").unwrap();
        assert_eq!(engine.compute_net_price(Some(&huge), &[]), Decimal::MAX);

        let steps = vec![DiscountStep::amount(1, "1e30")];
        assert_eq!(
            engine.compute_net_price(Some(&price("100")), &steps),
            Decimal::MIN + dec!(100)
        );

        let steps = vec![DiscountStep::amount(1, "1e-30")];
        assert_eq!(engine.compute_net_price(Some(&price("100")), &steps), dec!(100));
    }

    #[test]
    fn test_quote_carries_inputs() {
        let engine = DiscountChainEngine::new();
        let steps = vec![DiscountStep::percentage(1, "20"), DiscountStep::amount(2, "10")];
        let quote = engine.quote(Some(&price(" 200 ")), &steps);

        assert_eq!(quote.list_price, dec!(200));
        assert_eq!(quote.steps, steps);
        assert_eq!(quote.net_price, dec!(150));

        let quote = engine.quote(None, &steps);
        assert_eq!(quote.list_price, Decimal::ZERO);
        assert_eq!(quote.net_price, Decimal::ZERO);
    }

    #[test]
    fn test_concurrent_invocations() {
        let engine = DiscountChainEngine::new();
        let steps = vec![DiscountStep::percentage(1, "20"), DiscountStep::amount(2, "10")];

        let results: Vec<Decimal> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| engine.compute_net_price(Some(&price("200")), &steps)))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert!(results.iter().all(|net| *net == dec!(150)));
    }
}
