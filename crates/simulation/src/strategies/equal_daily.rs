//! Equal daily spend.
//!
//! Spends `budget / horizon` every day, ignoring the benchmark. It is the
//! passive baseline the adaptive strategies are compared against.

use super::{ExecutionStrategy, check_inputs, trading_days, trading_price};
use crate::benchmark::BenchmarkSeries;
use crate::price_path::PricePath;
use buyback_domain::entities::PurchaseSchedule;
use buyback_domain::{BuybackError, BuybackResult};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Equal daily spend strategy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EqualDaily {
    /// Days the budget is spread over. `None` uses `max_duration`.
    pub horizon: Option<usize>,
}

impl EqualDaily {
    /// Creates a strategy spreading the budget over `max_duration`.
    #[must_use]
    pub fn new() -> Self {
        Self { horizon: None }
    }

    /// Creates a strategy spreading the budget over `horizon` days.
    ///
    /// A horizon longer than `max_duration` leaves the remainder unexecuted.
    ///
    /// # Arguments
    ///
    /// * `horizon` - Number of days the budget is divided over
    #[must_use]
    pub fn with_horizon(horizon: usize) -> Self {
        Self {
            horizon: Some(horizon),
        }
    }
}

/// `budget * (day + 1) / horizon`, exactly `budget` on the last day.
fn cumulative_target(budget: Decimal, day: usize, horizon: usize) -> BuybackResult<Decimal> {
    if day + 1 >= horizon {
        return Ok(budget);
    }
    budget
        .checked_mul(Decimal::from(day + 1))
        .and_then(|v| v.checked_div(Decimal::from(horizon)))
        .ok_or_else(|| BuybackError::NumericOverflow {
            day,
            value: budget.to_f64().unwrap_or(f64::INFINITY),
        })
}

impl ExecutionStrategy for EqualDaily {
    fn execute(
        &self,
        path: &PricePath,
        _benchmark: &BenchmarkSeries,
        budget: Decimal,
        max_duration: usize,
    ) -> BuybackResult<PurchaseSchedule> {
        check_inputs(budget, max_duration)?;
        let horizon = self.horizon.unwrap_or(max_duration);
        if horizon == 0 {
            return Err(BuybackError::validation("horizon", "must be >= 1"));
        }

        let mut schedule = PurchaseSchedule::new(budget, max_duration);
        let days = horizon.min(trading_days(path, max_duration));

        // Daily amounts are differences of the cumulative target, so a full
        // horizon spends exactly the budget. A day whose share rounds to zero
        // is skipped and carried into the next one.
        let mut allocated = Decimal::ZERO;
        for day in 0..days {
            let target = cumulative_target(budget, day, horizon)?;
            let usd = (target - allocated).min(schedule.remaining());
            if usd <= Decimal::ZERO {
                continue;
            }
            allocated = target;

            let price = trading_price(path, day)?;
            schedule.record(day, price, usd)?;
        }

        Ok(schedule)
    }

    fn name(&self) -> &'static str {
        "Equal Daily"
    }
}
