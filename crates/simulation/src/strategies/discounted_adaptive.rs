//! Adaptive execution against a discounted benchmark.
//!
//! Same decision rule as [`AdaptiveStrategy`], but a day only counts as
//! favorable when the price is at or below `benchmark * (1 - discount_rate)`.

use super::{AdaptiveConfig, AdaptiveStrategy, ExecutionStrategy};
use crate::benchmark::BenchmarkSeries;
use crate::price_path::PricePath;
use buyback_domain::entities::PurchaseSchedule;
use buyback_domain::{BuybackError, BuybackResult};
use rust_decimal::Decimal;
use std::borrow::Cow;

/// Discounted adaptive strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountedAdaptive {
    /// Benchmark discount as a decimal in [0, 1).
    pub discount_rate: f64,
    /// Decision rule applied against the discounted benchmark.
    pub inner: AdaptiveStrategy,
}

impl DiscountedAdaptive {
    /// Creates a strategy with default adaptive constants.
    ///
    /// # Arguments
    ///
    /// * `discount_rate` - Benchmark discount as a decimal in [0, 1)
    #[must_use]
    pub fn new(discount_rate: f64) -> Self {
        Self {
            discount_rate,
            inner: AdaptiveStrategy::new(),
        }
    }

    /// Replaces the adaptive constants.
    #[must_use]
    pub fn with_config(mut self, config: AdaptiveConfig) -> Self {
        self.inner = AdaptiveStrategy::with_config(config);
        self
    }
}

impl ExecutionStrategy for DiscountedAdaptive {
    /// A benchmark carrying a different discount is rescaled to this
    /// strategy's discount before trading.
    fn execute(
        &self,
        path: &PricePath,
        benchmark: &BenchmarkSeries,
        budget: Decimal,
        max_duration: usize,
    ) -> BuybackResult<PurchaseSchedule> {
        if !self.discount_rate.is_finite() || !(0.0..1.0).contains(&self.discount_rate) {
            return Err(BuybackError::validation(
                "discount_rate",
                format!("must be in [0, 1), got {}", self.discount_rate),
            ));
        }

        let benchmark = if benchmark.discount_rate() == self.discount_rate {
            Cow::Borrowed(benchmark)
        } else {
            Cow::Owned(benchmark.with_discount(self.discount_rate))
        };

        self.inner.execute(path, &benchmark, budget, max_duration)
    }

    fn name(&self) -> &'static str {
        "Discounted Adaptive"
    }

    fn benchmark_discount(&self) -> f64 {
        self.discount_rate
    }
}
