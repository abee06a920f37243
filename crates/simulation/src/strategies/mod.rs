//! Buyback execution strategies.
//!
//! Every strategy turns a price path, its benchmark, a USD budget and a
//! maximum duration into a [`PurchaseSchedule`]. Strategies hold only
//! configuration, so one instance can be reused across any number of paths.
//!
//! All strategies stop on the first day the budget is exhausted or at
//! `max_duration`, whichever comes first. Budget left at `max_duration` stays
//! unexecuted.

mod adaptive;
mod discounted_adaptive;
mod equal_daily;

pub use adaptive::{AdaptiveConfig, AdaptiveStrategy};
pub use discounted_adaptive::DiscountedAdaptive;
pub use equal_daily::EqualDaily;

use crate::benchmark::BenchmarkSeries;
use crate::price_path::PricePath;
use buyback_domain::entities::PurchaseSchedule;
use buyback_domain::enums::StrategyKind;
use buyback_domain::parameters::SimulationParameters;
use buyback_domain::value_objects::Price;
use buyback_domain::{BuybackError, BuybackResult};
use rust_decimal::Decimal;

/// Common contract of all execution strategies.
pub trait ExecutionStrategy {
    /// Computes the daily purchase schedule for one path.
    fn execute(
        &self,
        path: &PricePath,
        benchmark: &BenchmarkSeries,
        budget: Decimal,
        max_duration: usize,
    ) -> BuybackResult<PurchaseSchedule>;

    /// Returns the name of the strategy.
    fn name(&self) -> &'static str;

    /// Discount applied to the benchmark this strategy trades and is scored against.
    fn benchmark_discount(&self) -> f64 {
        0.0
    }

    /// Builds the benchmark this strategy expects for `path`.
    fn benchmark_for(&self, path: &PricePath) -> BenchmarkSeries {
        BenchmarkSeries::compute(path, self.benchmark_discount())
    }
}

/// A strategy selected by [`StrategyKind`].
#[derive(Debug, Clone, PartialEq)]
pub enum Strategy {
    EqualDaily(EqualDaily),
    Adaptive(AdaptiveStrategy),
    DiscountedAdaptive(DiscountedAdaptive),
}

impl Strategy {
    /// Builds the strategy for `kind` from simulation parameters.
    pub fn from_parameters(kind: StrategyKind, params: &SimulationParameters) -> Self {
        Self::with_adaptive_config(kind, params, AdaptiveConfig::from_parameters(params))
    }

    /// Like [`Strategy::from_parameters`] with explicit adaptive constants.
    pub fn with_adaptive_config(
        kind: StrategyKind,
        params: &SimulationParameters,
        config: AdaptiveConfig,
    ) -> Self {
        match kind {
            StrategyKind::EqualDaily => {
                Strategy::EqualDaily(EqualDaily::with_horizon(params.baseline_horizon()))
            }
            StrategyKind::Adaptive => Strategy::Adaptive(AdaptiveStrategy::with_config(config)),
            StrategyKind::DiscountedAdaptive => Strategy::DiscountedAdaptive(
                DiscountedAdaptive::new(params.discount_rate).with_config(config),
            ),
        }
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::EqualDaily(_) => StrategyKind::EqualDaily,
            Strategy::Adaptive(_) => StrategyKind::Adaptive,
            Strategy::DiscountedAdaptive(_) => StrategyKind::DiscountedAdaptive,
        }
    }

    fn inner(&self) -> &dyn ExecutionStrategy {
        match self {
            Strategy::EqualDaily(s) => s,
            Strategy::Adaptive(s) => s,
            Strategy::DiscountedAdaptive(s) => s,
        }
    }
}

impl ExecutionStrategy for Strategy {
    fn execute(
        &self,
        path: &PricePath,
        benchmark: &BenchmarkSeries,
        budget: Decimal,
        max_duration: usize,
    ) -> BuybackResult<PurchaseSchedule> {
        self.inner().execute(path, benchmark, budget, max_duration)
    }

    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn benchmark_discount(&self) -> f64 {
        self.inner().benchmark_discount()
    }
}

/// Rejects budgets and horizons no strategy can work with.
pub(crate) fn check_inputs(budget: Decimal, max_duration: usize) -> BuybackResult<()> {
    if budget <= Decimal::ZERO {
        return Err(BuybackError::validation("budget", "must be > 0"));
    }
    if max_duration == 0 {
        return Err(BuybackError::validation("max_duration", "must be >= 1"));
    }
    Ok(())
}

/// Number of days a schedule can trade on `path`.
pub(crate) fn trading_days(path: &PricePath, max_duration: usize) -> usize {
    max_duration.min(path.len())
}

/// Price on `day` as an exact decimal.
pub(crate) fn trading_price(path: &PricePath, day: usize) -> BuybackResult<Price> {
    let value = path.price(day).unwrap_or(f64::NAN);
    Price::try_from_f64(value).ok_or(BuybackError::NumericOverflow { day, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_from_parameters_selects_kind() {
        let params = SimulationParameters::new(dec!(1000), 10).with_discount_rate(0.01);
        for kind in StrategyKind::ALL {
            let strategy = Strategy::from_parameters(kind, &params);
            assert_eq!(strategy.kind(), kind);
            assert_eq!(strategy.name(), kind.name());
        }

        let discounted = Strategy::from_parameters(StrategyKind::DiscountedAdaptive, &params);
        assert_eq!(discounted.benchmark_discount(), 0.01);
        let adaptive = Strategy::from_parameters(StrategyKind::Adaptive, &params);
        assert_eq!(adaptive.benchmark_discount(), 0.0);
    }

    #[test]
    fn test_trading_price_rejects_non_finite() {
        let path = PricePath::new(vec![100.0, f64::INFINITY]);
        assert!(trading_price(&path, 0).is_ok());
        assert_eq!(
            trading_price(&path, 1),
            Err(BuybackError::NumericOverflow {
                day: 1,
                value: f64::INFINITY
            })
        );
    }

    #[test]
    fn test_all_strategies_respect_ledger_invariants() {
        let prices = vec![100.0, 105.0, 95.0, 110.0, 90.0, 100.0, 95.0, 105.0, 99.0];
        let path = PricePath::new(prices);
        let budget = dec!(10000);
        let max_duration = 8;
        let params = SimulationParameters::new(budget, max_duration).with_discount_bps(50);

        for kind in StrategyKind::ALL {
            let strategy = Strategy::from_parameters(kind, &params);
            let benchmark = strategy.benchmark_for(&path);
            let schedule = strategy
                .execute(&path, &benchmark, budget, max_duration)
                .unwrap();

            assert!(schedule.len() <= max_duration, "{kind}");
            assert!(schedule.total_usd() <= budget, "{kind}");
            assert!(schedule.is_exhausted(), "{kind}");
            assert!(schedule.fills().iter().all(|f| f.usd_spent > Decimal::ZERO));
        }
    }
}
