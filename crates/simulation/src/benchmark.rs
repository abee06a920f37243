//! Reference price trajectories for scoring execution.

use crate::price_path::PricePath;
use serde::{Deserialize, Serialize};

/// Running arithmetic mean of a path, optionally discounted.
///
/// `value_at(t)` is `mean(P[0..=t]) * (1 - discount_rate)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkSeries {
    running_mean: Vec<f64>,
    values: Vec<f64>,
    discount_rate: f64,
}

impl BenchmarkSeries {
    /// Undiscounted running mean.
    pub fn arithmetic_mean(path: &PricePath) -> Self {
        Self::compute(path, 0.0)
    }

    /// Running mean scaled by `1 - discount_rate`.
    pub fn compute(path: &PricePath, discount_rate: f64) -> Self {
        // Incremental update: a constant path stays exactly constant.
        let running_mean: Vec<f64> = path
            .prices()
            .iter()
            .enumerate()
            .scan(0.0, |mean, (day, p)| {
                *mean += (p - *mean) / (day + 1) as f64;
                Some(*mean)
            })
            .collect();

        Self::from_running_mean(running_mean, discount_rate)
    }

    fn from_running_mean(running_mean: Vec<f64>, discount_rate: f64) -> Self {
        let values = if discount_rate == 0.0 {
            running_mean.clone()
        } else {
            let factor = 1.0 - discount_rate;
            running_mean.iter().map(|b| b * factor).collect()
        };

        Self {
            running_mean,
            values,
            discount_rate,
        }
    }

    /// Same path, different discount.
    pub fn with_discount(&self, discount_rate: f64) -> Self {
        Self::from_running_mean(self.running_mean.clone(), discount_rate)
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Benchmark on `day`, or `None` past the end of the path.
    pub fn value_at(&self, day: usize) -> Option<f64> {
        self.values.get(day).copied()
    }

    /// Benchmark on `day`, holding the last value past the end of the path.
    pub fn value_or_last(&self, day: usize) -> Option<f64> {
        self.value_at(day).or_else(|| self.values.last().copied())
    }

    /// First `len` values.
    pub fn prefix(&self, len: usize) -> &[f64] {
        &self.values[..len.min(self.values.len())]
    }

    pub fn discount_rate(&self) -> f64 {
        self.discount_rate
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Mean of `prices[0..=day]`, or `None` if `day` is out of range.
pub fn running_mean(prices: &[f64], day: usize) -> Option<f64> {
    let window = prices.get(..=day)?;
    Some(
        window
            .iter()
            .enumerate()
            .fold(0.0, |mean, (i, p)| mean + (p - mean) / (i + 1) as f64),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(prices: &[f64]) -> PricePath {
        PricePath::new(prices.to_vec())
    }

    #[test]
    fn test_constant_path() {
        let bench = BenchmarkSeries::arithmetic_mean(&path(&[100.0, 100.0, 100.0]));
        assert_eq!(bench.values(), &[100.0, 100.0, 100.0]);
    }

    #[test]
    fn test_constant_non_round_path_is_exact() {
        for price in [33.33, 97.3, 101.37, 123.456789, 0.07] {
            let bench = BenchmarkSeries::arithmetic_mean(&path(&[price; 50]));
            assert!(bench.values().iter().all(|b| *b == price), "{price}");
        }
    }

    #[test]
    fn test_running_mean() {
        let bench = BenchmarkSeries::arithmetic_mean(&path(&[100.0, 110.0, 90.0]));
        assert_eq!(bench.values(), &[100.0, 105.0, 100.0]);
        assert_eq!(bench.len(), 3);
    }

    #[test]
    fn test_discount() {
        let bench = BenchmarkSeries::compute(&path(&[100.0, 110.0, 90.0]), 0.01);
        let expected = [99.0, 103.95, 99.0];
        for (got, want) in bench.values().iter().zip(expected) {
            assert!((got - want).abs() < 1e-9);
        }
        assert_eq!(bench.discount_rate(), 0.01);
    }

    #[test]
    fn test_zero_discount_is_noop() {
        let p = path(&[100.0, 97.0, 104.0, 88.0]);
        assert_eq!(
            BenchmarkSeries::compute(&p, 0.0),
            BenchmarkSeries::arithmetic_mean(&p)
        );
    }

    #[test]
    fn test_with_discount_rescales_from_undiscounted() {
        let p = path(&[100.0, 110.0, 90.0]);
        let discounted = BenchmarkSeries::compute(&p, 0.02);
        assert_eq!(discounted.with_discount(0.0), BenchmarkSeries::arithmetic_mean(&p));
        assert_eq!(discounted.with_discount(0.01), BenchmarkSeries::compute(&p, 0.01));
    }

    #[test]
    fn test_prefix_queries() {
        let prices = [100.0, 110.0, 90.0, 120.0];
        let bench = BenchmarkSeries::arithmetic_mean(&path(&prices));

        assert_eq!(bench.prefix(2), &[100.0, 105.0]);
        assert_eq!(bench.prefix(10).len(), 4);
        assert_eq!(bench.value_at(3), Some(105.0));
        assert_eq!(bench.value_at(4), None);
        assert_eq!(bench.value_or_last(9), Some(105.0));

        assert_eq!(running_mean(&prices, 1), Some(105.0));
        assert_eq!(running_mean(&[33.33; 9], 8), Some(33.33));
        assert_eq!(running_mean(&prices, 4), None);
    }

    #[test]
    fn test_empty_path() {
        let bench = BenchmarkSeries::arithmetic_mean(&path(&[]));
        assert!(bench.is_empty());
        assert_eq!(bench.value_or_last(0), None);
    }
}
