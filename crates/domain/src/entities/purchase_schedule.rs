use crate::error::{BuybackError, BuybackResult};
use crate::value_objects::price::Price;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// One day's purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    /// Trading day index (0-based).
    pub day: usize,
    /// Execution price for the day.
    pub price: Price,
    /// Shares bought.
    pub shares: Decimal,
    /// USD spent.
    pub usd_spent: Decimal,
}

/// Daily purchases made against a fixed notional.
///
/// The schedule never spends more than its budget and never holds more than
/// `max_duration` fills. Budget left when the schedule ends is reported by
/// [`PurchaseSchedule::unexecuted_usd`]; nothing fills it automatically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseSchedule {
    budget: Decimal,
    max_duration: usize,
    fills: Vec<Fill>,
    spent: Decimal,
    shares: Decimal,
}

impl PurchaseSchedule {
    /// Creates an empty schedule.
    pub fn new(budget: Decimal, max_duration: usize) -> Self {
        Self {
            budget,
            max_duration,
            fills: Vec::with_capacity(max_duration),
            spent: Decimal::ZERO,
            shares: Decimal::ZERO,
        }
    }

    /// Builds a schedule from existing fills, checking the ledger invariants.
    pub fn from_fills(
        budget: Decimal,
        max_duration: usize,
        fills: Vec<Fill>,
    ) -> BuybackResult<Self> {
        let mut schedule = Self::new(budget, max_duration);
        for fill in fills {
            schedule.check_capacity(fill.day, fill.usd_spent)?;
            schedule.shares = schedule.add_shares(fill.day, fill.shares)?;
            schedule.spent += fill.usd_spent;
            schedule.fills.push(fill);
        }
        Ok(schedule)
    }

    /// Records a purchase of `usd` at `price` on `day`.
    ///
    /// Shares are `usd / price`.
    pub fn record(&mut self, day: usize, price: Price, usd: Decimal) -> BuybackResult<&Fill> {
        self.check_capacity(day, usd)?;
        let shares = usd.checked_div(price.value).ok_or_else(|| {
            BuybackError::division_undefined(format!(
                "share count at price {} on day {day}",
                price.value
            ))
        })?;
        let total_shares = self.add_shares(day, shares)?;

        // Spending the whole remainder closes the ledger exactly.
        if usd == self.remaining() {
            self.spent = self.budget;
        } else {
            self.spent += usd;
        }
        self.shares = total_shares;
        self.fills.push(Fill {
            day,
            price,
            shares,
            usd_spent: usd,
        });
        Ok(&self.fills[self.fills.len() - 1])
    }

    fn add_shares(&self, day: usize, shares: Decimal) -> BuybackResult<Decimal> {
        self.shares
            .checked_add(shares)
            .ok_or_else(|| BuybackError::NumericOverflow {
                day,
                value: shares.to_f64().unwrap_or(f64::INFINITY),
            })
    }

    fn check_capacity(&self, day: usize, usd: Decimal) -> BuybackResult<()> {
        if self.fills.len() >= self.max_duration || day >= self.max_duration {
            return Err(BuybackError::validation(
                "day",
                format!("day {day} is beyond max duration {}", self.max_duration),
            ));
        }
        if let Some(last) = self.fills.last()
            && day <= last.day
        {
            return Err(BuybackError::validation(
                "day",
                format!("day {day} does not follow day {}", last.day),
            ));
        }
        if usd <= Decimal::ZERO {
            return Err(BuybackError::validation("usd_spent", "must be > 0"));
        }
        if usd > self.remaining() {
            return Err(BuybackError::validation(
                "usd_spent",
                format!("{usd} exceeds remaining budget {}", self.remaining()),
            ));
        }
        Ok(())
    }

    pub fn fills(&self) -> &[Fill] {
        &self.fills
    }

    pub fn len(&self) -> usize {
        self.fills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fills.is_empty()
    }

    pub fn budget(&self) -> Decimal {
        self.budget
    }

    pub fn max_duration(&self) -> usize {
        self.max_duration
    }

    /// Trading days used: last fill day + 1, or 0 when nothing was bought.
    pub fn duration(&self) -> usize {
        self.fills.last().map_or(0, |f| f.day + 1)
    }

    pub fn total_usd(&self) -> Decimal {
        self.spent
    }

    pub fn total_shares(&self) -> Decimal {
        self.shares
    }

    /// Budget not yet spent.
    pub fn remaining(&self) -> Decimal {
        self.budget - self.spent
    }

    /// Budget left unexecuted. Same as [`remaining`](Self::remaining) once the
    /// schedule is complete.
    pub fn unexecuted_usd(&self) -> Decimal {
        self.remaining()
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() <= Decimal::ZERO
    }

    /// Running share count after each fill.
    ///
    /// Every prefix is bounded by [`total_shares`](Self::total_shares), which
    /// `record` has already checked.
    pub fn cumulative_shares(&self) -> Vec<Decimal> {
        self.fills
            .iter()
            .scan(Decimal::ZERO, |acc, f| {
                *acc += f.shares;
                Some(*acc)
            })
            .collect()
    }
}
