//! Simulation configuration.
//!
//! [`SimulationParameters`] is the single input object of a simulation run.
//! It can be built in code with the `with_*` setters or parsed from JSON;
//! omitted fields take their defaults. Either way, [`SimulationParameters::validate`]
//! must pass before any simulation work starts.

use crate::error::{BuybackError, BuybackResult};
use crate::value_objects::basis_points::BasisPoints;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Trading days per year used to derive the daily time step.
pub const TRADING_DAYS_PER_YEAR: u32 = 252;

/// Largest accepted notional, in USD.
///
/// Keeps daily allocations and their accelerated multiples well inside the
/// range of [`Decimal`].
pub const MAX_TOTAL_NOTIONAL: u64 = 1_000_000_000_000_000_000;

/// Configuration for a buyback simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParameters {
    /// Day-0 share price.
    pub initial_price: f64,
    /// Annualized drift as a decimal (0.05 = 5%).
    pub drift: f64,
    /// Annualized volatility as a decimal (0.25 = 25%).
    pub volatility: f64,
    /// Number of simulated paths.
    pub num_paths: usize,
    /// Maximum trading days a schedule may use.
    pub max_duration: usize,
    /// Total USD to spend.
    pub total_notional: Decimal,
    /// Seed for a reproducible random stream.
    pub seed: Option<u64>,
    /// Benchmark discount as a decimal in [0, 1).
    pub discount_rate: f64,
    /// Horizon of the equal-daily baseline. Defaults to `max_duration`.
    pub target_duration: Option<usize>,
    /// Earliest day adaptive strategies aim to finish on favorable prices.
    pub min_duration: Option<usize>,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            initial_price: 100.0,
            drift: 0.0,
            volatility: 0.25,
            num_paths: 10_000,
            max_duration: 125,
            total_notional: Decimal::from(1_000_000_000u64),
            seed: None,
            discount_rate: 0.0,
            target_duration: None,
            min_duration: None,
        }
    }
}

impl SimulationParameters {
    /// Creates parameters with the given budget and horizon, defaults elsewhere.
    pub fn new(total_notional: Decimal, max_duration: usize) -> Self {
        Self {
            total_notional,
            max_duration,
            ..Default::default()
        }
    }

    /// Parses parameters from a JSON document and validates them.
    pub fn from_json(json: &str) -> BuybackResult<Self> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Sets the day-0 share price.
    ///
    /// # Arguments
    ///
    /// * `price` - Starting price, finite and positive
    #[must_use]
    pub fn with_initial_price(mut self, price: f64) -> Self {
        self.initial_price = price;
        self
    }

    /// Sets the annualized drift.
    ///
    /// # Arguments
    ///
    /// * `drift` - Expected annual return as a decimal (0.05 = 5%)
    #[must_use]
    pub fn with_drift(mut self, drift: f64) -> Self {
        self.drift = drift;
        self
    }

    /// Sets the annualized volatility.
    ///
    /// # Arguments
    ///
    /// * `volatility` - Annual standard deviation of log returns, non-negative
    #[must_use]
    pub fn with_volatility(mut self, volatility: f64) -> Self {
        self.volatility = volatility;
        self
    }

    /// Sets the number of simulated paths.
    #[must_use]
    pub fn with_num_paths(mut self, num_paths: usize) -> Self {
        self.num_paths = num_paths;
        self
    }

    /// Sets the maximum number of trading days.
    #[must_use]
    pub fn with_max_duration(mut self, days: usize) -> Self {
        self.max_duration = days;
        self
    }

    /// Sets the USD budget.
    ///
    /// # Arguments
    ///
    /// * `notional` - Total USD to spend, positive and at most [`MAX_TOTAL_NOTIONAL`]
    #[must_use]
    pub fn with_total_notional(mut self, notional: Decimal) -> Self {
        self.total_notional = notional;
        self
    }

    /// Fixes the random stream for reproducible paths.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the benchmark discount as a decimal rate.
    ///
    /// # Arguments
    ///
    /// * `rate` - Discount in [0, 1) (0.005 = 50 bps)
    #[must_use]
    pub fn with_discount_rate(mut self, rate: f64) -> Self {
        self.discount_rate = rate;
        self
    }

    /// Sets the benchmark discount in basis points (100 bps = 1%).
    #[must_use]
    pub fn with_discount_bps(mut self, bps: u32) -> Self {
        self.discount_rate = BasisPoints::from_bps(bps)
            .to_rate()
            .to_f64()
            .unwrap_or(0.0);
        self
    }

    /// Sets the equal-daily horizon.
    #[must_use]
    pub fn with_target_duration(mut self, days: usize) -> Self {
        self.target_duration = Some(days);
        self
    }

    /// Sets the earliest finishing day for adaptive pacing.
    ///
    /// Also shortens the adaptive warm-up to at most this many days.
    #[must_use]
    pub fn with_min_duration(mut self, days: usize) -> Self {
        self.min_duration = Some(days);
        self
    }

    /// Time step in years.
    pub fn time_step(&self) -> f64 {
        1.0 / f64::from(TRADING_DAYS_PER_YEAR)
    }

    /// Number of prices per path, including day 0.
    pub fn path_len(&self) -> usize {
        self.max_duration + 1
    }

    /// Equal-daily horizon: `target_duration` or `max_duration`.
    pub fn baseline_horizon(&self) -> usize {
        self.target_duration.unwrap_or(self.max_duration)
    }

    /// Checks every field; the first violation is returned.
    pub fn validate(&self) -> BuybackResult<()> {
        if !self.initial_price.is_finite() || self.initial_price <= 0.0 {
            return Err(BuybackError::validation(
                "initial_price",
                format!("must be finite and > 0, got {}", self.initial_price),
            ));
        }
        if !self.drift.is_finite() {
            return Err(BuybackError::validation("drift", "must be finite"));
        }
        if !self.volatility.is_finite() || self.volatility < 0.0 {
            return Err(BuybackError::validation(
                "volatility",
                format!("must be finite and >= 0, got {}", self.volatility),
            ));
        }
        if self.num_paths == 0 {
            return Err(BuybackError::validation("num_paths", "must be >= 1"));
        }
        if self.max_duration == 0 {
            return Err(BuybackError::validation("max_duration", "must be >= 1"));
        }
        if self.total_notional <= Decimal::ZERO
            || self.total_notional > Decimal::from(MAX_TOTAL_NOTIONAL)
        {
            return Err(BuybackError::validation(
                "total_notional",
                format!(
                    "must be in (0, {MAX_TOTAL_NOTIONAL}], got {}",
                    self.total_notional
                ),
            ));
        }
        if !self.discount_rate.is_finite() || !(0.0..1.0).contains(&self.discount_rate) {
            return Err(BuybackError::validation(
                "discount_rate",
                format!("must be in [0, 1), got {}", self.discount_rate),
            ));
        }
        if self.target_duration == Some(0) {
            return Err(BuybackError::validation("target_duration", "must be >= 1"));
        }
        if let Some(min) = self.min_duration
            && (min == 0 || min > self.max_duration)
        {
            return Err(BuybackError::validation(
                "min_duration",
                format!("must be in [1, {}], got {min}", self.max_duration),
            ));
        }
        Ok(())
    }
}
