//! Benchmark-relative adaptive execution.
//!
//! Each day the current price is compared with the running benchmark:
//! - at or below the benchmark the strategy buys faster than the equal-daily
//!   baseline,
//! - above it the strategy slows down.
//!
//! Spend never drops below `remaining / days_left`, so the full notional is
//! committed by `max_duration` even if prices never turn favorable.

use super::{ExecutionStrategy, check_inputs, trading_days, trading_price};
use crate::benchmark::BenchmarkSeries;
use crate::price_path::PricePath;
use buyback_domain::entities::PurchaseSchedule;
use buyback_domain::parameters::SimulationParameters;
use buyback_domain::{BuybackError, BuybackResult};
use rust_decimal::Decimal;

/// Upper bound on the warm-up derived from `min_duration`.
pub const MAX_WARMUP_DAYS: usize = 10;

/// Tuning constants for adaptive execution.
#[derive(Debug, Clone, PartialEq)]
pub struct AdaptiveConfig {
    /// Multiple of the baseline spent on favorable days.
    pub acceleration_factor: Decimal,
    /// Multiple of the baseline spent on unfavorable days, before the floor.
    pub deceleration_factor: Decimal,
    /// Leading days traded at the baseline regardless of price.
    pub warmup_days: usize,
    /// Baseline horizon: baseline spend is `budget / target_duration`.
    /// `None` uses `max_duration`.
    pub target_duration: Option<usize>,
    /// When set, favorable days before this day pace the remainder to finish
    /// on it instead of accelerating.
    pub min_duration: Option<usize>,
}

impl Default for AdaptiveConfig {
    fn default() -> Self {
        Self {
            acceleration_factor: Decimal::from(5),
            deceleration_factor: Decimal::new(1, 1), // 0.1x
            warmup_days: 0,
            target_duration: None,
            min_duration: None,
        }
    }
}

impl AdaptiveConfig {
    /// Default constants with the durations taken from `params`.
    ///
    /// When `min_duration` is set, the first `min(10, min_duration)` days are
    /// traded at the baseline before the benchmark rule engages.
    ///
    /// # Arguments
    ///
    /// * `params` - Simulation parameters providing the target and minimum durations
    pub fn from_parameters(params: &SimulationParameters) -> Self {
        Self {
            warmup_days: params
                .min_duration
                .map_or(0, |min| min.min(MAX_WARMUP_DAYS)),
            target_duration: params.target_duration,
            min_duration: params.min_duration,
            ..Default::default()
        }
    }

    /// Sets the multiple of the baseline spent on favorable days.
    ///
    /// # Arguments
    ///
    /// * `factor` - Acceleration multiple, at least 1
    #[must_use]
    pub fn with_acceleration(mut self, factor: Decimal) -> Self {
        self.acceleration_factor = factor;
        self
    }

    /// Sets the multiple of the baseline spent on unfavorable days.
    ///
    /// # Arguments
    ///
    /// * `factor` - Deceleration multiple in [0, 1]
    #[must_use]
    pub fn with_deceleration(mut self, factor: Decimal) -> Self {
        self.deceleration_factor = factor;
        self
    }

    /// Sets the number of leading days traded at the baseline.
    #[must_use]
    pub fn with_warmup_days(mut self, days: usize) -> Self {
        self.warmup_days = days;
        self
    }

    /// Sets the baseline horizon in days.
    #[must_use]
    pub fn with_target_duration(mut self, days: usize) -> Self {
        self.target_duration = Some(days);
        self
    }

    /// Sets the day favorable pacing aims to finish on.
    #[must_use]
    pub fn with_min_duration(mut self, days: usize) -> Self {
        self.min_duration = Some(days);
        self
    }

    /// Checks the factors and durations.
    ///
    /// # Errors
    ///
    /// Returns [`BuybackError::Validation`] naming the first invalid field.
    pub fn validate(&self) -> BuybackResult<()> {
        if self.acceleration_factor < Decimal::ONE {
            return Err(BuybackError::validation(
                "acceleration_factor",
                "must be >= 1",
            ));
        }
        if self.deceleration_factor < Decimal::ZERO || self.deceleration_factor > Decimal::ONE {
            return Err(BuybackError::validation(
                "deceleration_factor",
                "must be in [0, 1]",
            ));
        }
        if self.target_duration == Some(0) {
            return Err(BuybackError::validation("target_duration", "must be >= 1"));
        }
        if self.min_duration == Some(0) {
            return Err(BuybackError::validation("min_duration", "must be >= 1"));
        }
        Ok(())
    }
}

/// Adaptive strategy trading against the benchmark it is given.
///
/// The decision rule for each day, in order:
/// 1. During warm-up, spend the baseline.
/// 2. At or below the benchmark, spend `acceleration_factor` times the
///    baseline, or pace toward `min_duration` when that day is still ahead.
/// 3. Above the benchmark, spend `deceleration_factor` times the baseline.
///
/// The result is raised to `remaining / days_left` and capped at `remaining`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdaptiveStrategy {
    pub config: AdaptiveConfig,
}

impl AdaptiveStrategy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a strategy with explicit tuning constants.
    ///
    /// # Arguments
    ///
    /// * `config` - Acceleration, deceleration and duration settings
    #[must_use]
    pub fn with_config(config: AdaptiveConfig) -> Self {
        Self { config }
    }

    /// USD to spend on `day` before the remaining-budget cap.
    fn planned_spend(
        &self,
        day: usize,
        price: f64,
        benchmark: f64,
        baseline: Decimal,
        remaining: Decimal,
    ) -> Decimal {
        let config = &self.config;
        if day < config.warmup_days {
            return baseline;
        }

        if price <= benchmark {
            match config.min_duration {
                Some(min_duration) if day < min_duration => {
                    remaining / Decimal::from(min_duration - day)
                }
                // Saturates; the caller caps spend at the remaining budget.
            _ => baseline
                .checked_mul(config.acceleration_factor)
                .unwrap_or(remaining),
            }
        } else {
            baseline * config.deceleration_factor
        }
    }
}

impl ExecutionStrategy for AdaptiveStrategy {
    fn execute(
        &self,
        path: &PricePath,
        benchmark: &BenchmarkSeries,
        budget: Decimal,
        max_duration: usize,
    ) -> BuybackResult<PurchaseSchedule> {
        check_inputs(budget, max_duration)?;
        self.config.validate()?;

        let horizon = self.config.target_duration.unwrap_or(max_duration);
        let baseline = budget / Decimal::from(horizon);
        let mut schedule = PurchaseSchedule::new(budget, max_duration);

        for day in 0..trading_days(path, max_duration) {
            if schedule.is_exhausted() {
                break;
            }

            let price = trading_price(path, day)?;
            let raw_price = path.price(day).unwrap_or(f64::NAN);
            let reference = benchmark.value_or_last(day).unwrap_or(f64::NAN);
            if !reference.is_finite() {
                return Err(BuybackError::NumericOverflow {
                    day,
                    value: reference,
                });
            }

            let remaining = schedule.remaining();
            let days_left = Decimal::from(max_duration - day);
            let floor = remaining / days_left;

            let planned = self.planned_spend(day, raw_price, reference, baseline, remaining);
            let mut usd = planned.max(floor).min(remaining);
            if usd <= Decimal::ZERO {
                // Floor rounded to zero on a dust remainder.
                usd = remaining;
            }

            schedule.record(day, price, usd)?;
        }

        Ok(schedule)
    }

    fn name(&self) -> &'static str {
        "Adaptive"
    }
}
