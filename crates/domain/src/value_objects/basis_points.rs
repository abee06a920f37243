use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;

const BPS_PER_UNIT: i64 = 10_000;

/// A quantity expressed in basis points (1 bp = 0.01%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BasisPoints(pub Decimal);

impl BasisPoints {
    pub const ZERO: BasisPoints = BasisPoints(Decimal::ZERO);

    pub fn from_bps(bps: u32) -> Self {
        Self(Decimal::from(bps))
    }

    /// Converts a decimal rate (0.01 = 1%) to basis points.
    pub fn from_rate(rate: Decimal) -> Self {
        Self(rate * Decimal::from(BPS_PER_UNIT))
    }

    /// Like [`from_rate`](Self::from_rate), `None` when the result is out of range.
    pub fn checked_from_rate(rate: Decimal) -> Option<Self> {
        rate.checked_mul(Decimal::from(BPS_PER_UNIT)).map(Self)
    }

    /// Returns the decimal rate (100 bps = 0.01).
    pub fn to_rate(&self) -> Decimal {
        self.0 / Decimal::from(BPS_PER_UNIT)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} bps", self.0.round_dp(2))
    }
}
