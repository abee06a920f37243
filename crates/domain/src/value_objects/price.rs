use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

/// Execution price in USD per share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Price {
    pub value: Decimal,
}

impl Price {
    pub fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Converts a simulated `f64` price.
    ///
    /// Returns `None` for non-finite, non-positive, or out-of-range values,
    /// which a GBM path can produce under pathological parameters.
    pub fn try_from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() || value <= 0.0 {
            return None;
        }
        Decimal::from_f64(value)
            .filter(|d| d.is_sign_positive() && !d.is_zero())
            .map(Self::new)
    }

    pub fn to_f64(&self) -> f64 {
        self.value.to_f64().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_try_from_f64() {
        assert_eq!(Price::try_from_f64(101.5), Some(Price::new(dec!(101.5))));
        assert_eq!(Price::try_from_f64(f64::NAN), None);
        assert_eq!(Price::try_from_f64(f64::INFINITY), None);
        assert_eq!(Price::try_from_f64(0.0), None);
        assert_eq!(Price::try_from_f64(-3.0), None);
        assert_eq!(Price::try_from_f64(1e300), None);
    }
}
