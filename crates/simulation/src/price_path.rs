//! Synthetic price paths.
//!
//! Paths are plain `f64` arrays: Monte Carlo batches of 100k+ paths stay cheap,
//! and prices are converted to exact decimals only when a strategy trades.

use buyback_domain::parameters::SimulationParameters;
use buyback_domain::{BuybackError, BuybackResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Produces one price path at a time.
pub trait PricePathGenerator {
    /// Generates `steps` moves, i.e. `steps + 1` prices including day 0.
    fn generate(&mut self, steps: usize) -> PricePath;
}

/// Daily prices indexed from day 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePath {
    prices: Vec<f64>,
}

impl PricePath {
    pub fn new(prices: Vec<f64>) -> Self {
        Self { prices }
    }

    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    pub fn price(&self, day: usize) -> Option<f64> {
        self.prices.get(day).copied()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Fails on the first day whose price is non-finite or not positive.
    pub fn check_finite(&self) -> BuybackResult<()> {
        match self
            .prices
            .iter()
            .enumerate()
            .find(|(_, p)| !p.is_finite() || **p <= 0.0)
        {
            Some((day, value)) => Err(BuybackError::NumericOverflow { day, value: *value }),
            None => Ok(()),
        }
    }
}

impl From<Vec<f64>> for PricePath {
    fn from(prices: Vec<f64>) -> Self {
        Self::new(prices)
    }
}

/// All paths of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePathSet {
    paths: Vec<PricePath>,
}

impl PricePathSet {
    pub fn new(paths: Vec<PricePath>) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &[PricePath] {
        &self.paths
    }

    pub fn get(&self, index: usize) -> Option<&PricePath> {
        self.paths.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PricePath> {
        self.paths.iter()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl FromIterator<PricePath> for PricePathSet {
    fn from_iter<I: IntoIterator<Item = PricePath>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Discretized geometric Brownian motion.
///
/// The generator owns its random stream, so two generators built from the
/// same seed produce identical paths and never interfere with each other.
pub struct GeometricBrownianMotion<R: Rng = StdRng> {
    pub initial_price: f64,
    pub drift: f64,      // annualized drift (mu)
    pub volatility: f64, // annualized volatility (sigma)
    pub time_step: f64,  // time step in years (dt), 1/252 for trading days
    rng: R,
}

impl GeometricBrownianMotion<StdRng> {
    /// Creates a generator seeded from `seed`, or from OS entropy when `None`.
    pub fn new(
        initial_price: f64,
        drift: f64,
        volatility: f64,
        time_step: f64,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(initial_price, drift, volatility, time_step, rng)
    }

    /// Creates a generator from validated simulation parameters.
    pub fn from_parameters(params: &SimulationParameters) -> BuybackResult<Self> {
        params.validate()?;
        Ok(Self::new(
            params.initial_price,
            params.drift,
            params.volatility,
            params.time_step(),
            params.seed,
        ))
    }
}

impl<R: Rng> GeometricBrownianMotion<R> {
    /// Creates a generator drawing from an explicit random stream.
    pub fn with_rng(initial_price: f64, drift: f64, volatility: f64, time_step: f64, rng: R) -> Self {
        Self {
            initial_price,
            drift,
            volatility,
            time_step,
            rng,
        }
    }

    fn validate(&self, num_paths: usize) -> BuybackResult<()> {
        if num_paths == 0 {
            return Err(BuybackError::validation("num_paths", "must be >= 1"));
        }
        if !self.initial_price.is_finite() || self.initial_price <= 0.0 {
            return Err(BuybackError::validation(
                "initial_price",
                "must be finite and > 0",
            ));
        }
        if !self.drift.is_finite() {
            return Err(BuybackError::validation("drift", "must be finite"));
        }
        if !self.volatility.is_finite() || self.volatility < 0.0 {
            return Err(BuybackError::validation(
                "volatility",
                "must be finite and >= 0",
            ));
        }
        Ok(())
    }

    /// Per-step log drift and diffusion scale.
    fn step_terms(&self) -> (f64, f64) {
        let dt = self.time_step;
        let drift_term = (self.drift - 0.5 * self.volatility.powi(2)) * dt;
        let vol_term = self.volatility * dt.sqrt();
        (drift_term, vol_term)
    }

    /// Generates `num_paths` paths of `steps` moves each.
    ///
    /// Shocks are drawn path-major (every day of path 0, then path 1, ...)
    /// into one growth-factor matrix, which is then compounded row by row.
    pub fn generate_batch(&mut self, num_paths: usize, steps: usize) -> BuybackResult<PricePathSet> {
        self.validate(num_paths)?;
        debug!(num_paths, steps, "Generating GBM price paths");

        let s0 = self.initial_price;
        if steps == 0 {
            return Ok((0..num_paths).map(|_| PricePath::new(vec![s0])).collect());
        }

        let (drift_term, vol_term) = self.step_terms();
        let growth: Vec<f64> = (&mut self.rng)
            .sample_iter(StandardNormal)
            .take(num_paths * steps)
            .map(|z: f64| (drift_term + vol_term * z).exp())
            .collect();

        let paths = growth
            .chunks_exact(steps)
            .map(|row| {
                let mut prices = Vec::with_capacity(steps + 1);
                prices.push(s0);
                let mut current = s0;
                for factor in row {
                    current *= factor;
                    prices.push(current);
                }
                PricePath::new(prices)
            })
            .collect();

        Ok(paths)
    }
}

impl<R: Rng> PricePathGenerator for GeometricBrownianMotion<R> {
    fn generate(&mut self, steps: usize) -> PricePath {
        let (drift_term, vol_term) = self.step_terms();
        let mut prices = Vec::with_capacity(steps + 1);
        prices.push(self.initial_price);

        let mut current_price = self.initial_price;
        for _ in 0..steps {
            let z: f64 = self.rng.sample(StandardNormal);
            current_price *= (drift_term + vol_term * z).exp();
            prices.push(current_price);
        }

        PricePath::new(prices)
    }
}

/// Replays a fixed sequence of prices.
#[derive(Debug, Clone)]
pub struct DeterministicPricePath {
    pub prices: Vec<f64>,
}

impl DeterministicPricePath {
    pub fn new(prices: Vec<f64>) -> Self {
        Self { prices }
    }
}

impl PricePathGenerator for DeterministicPricePath {
    fn generate(&mut self, _steps: usize) -> PricePath {
        PricePath::new(self.prices.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f64 = 1.0 / 252.0;

    #[test]
    fn test_gbm_generation() {
        let mut gbm = GeometricBrownianMotion::new(100.0, 0.0, 0.2, DT, Some(42));
        let path = gbm.generate(10);

        assert_eq!(path.len(), 11); // initial + 10 steps
        assert_eq!(path.price(0), Some(100.0));

        // Check that prices are not all same (unless vol is 0)
        let all_same = path.prices().iter().all(|p| *p == 100.0);
        assert!(!all_same);
        assert!(path.check_finite().is_ok());
    }

    #[test]
    fn test_batch_shape() {
        let mut gbm = GeometricBrownianMotion::new(50.0, 0.05, 0.3, DT, Some(1));
        let paths = gbm.generate_batch(25, 20).unwrap();

        assert_eq!(paths.len(), 25);
        for path in paths.iter() {
            assert_eq!(path.len(), 21);
            assert_eq!(path.price(0), Some(50.0));
        }
    }

    #[test]
    fn test_same_seed_is_bit_identical() {
        let a = GeometricBrownianMotion::new(100.0, 0.1, 0.4, DT, Some(7))
            .generate_batch(50, 30)
            .unwrap();
        let b = GeometricBrownianMotion::new(100.0, 0.1, 0.4, DT, Some(7))
            .generate_batch(50, 30)
            .unwrap();

        let bits = |set: &PricePathSet| -> Vec<u64> {
            set.iter()
                .flat_map(|p| p.prices().iter().map(|x| x.to_bits()))
                .collect()
        };
        assert_eq!(bits(&a), bits(&b));
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = GeometricBrownianMotion::new(100.0, 0.0, 0.25, DT, Some(1))
            .generate_batch(5, 10)
            .unwrap();
        let b = GeometricBrownianMotion::new(100.0, 0.0, 0.25, DT, Some(2))
            .generate_batch(5, 10)
            .unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_batch_matches_single_path_draw_order() {
        // Path-major draws: the first batch path equals the first single path.
        let batch = GeometricBrownianMotion::new(100.0, 0.0, 0.25, DT, Some(9))
            .generate_batch(3, 15)
            .unwrap();
        let single = GeometricBrownianMotion::new(100.0, 0.0, 0.25, DT, Some(9)).generate(15);

        let first = batch.get(0).unwrap();
        for (a, b) in first.prices().iter().zip(single.prices()) {
            assert!((a - b).abs() <= 1e-12 * b.abs());
        }
    }

    #[test]
    fn test_zero_volatility_is_deterministic_drift() {
        let drift = 0.1;
        let path = GeometricBrownianMotion::new(100.0, drift, 0.0, DT, None)
            .generate_batch(1, 252)
            .unwrap();
        let last = path.get(0).unwrap().price(252).unwrap();
        assert!((last - 100.0 * drift.exp()).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_parameters_fail_fast() {
        let mut gbm = GeometricBrownianMotion::new(100.0, f64::NAN, 0.2, DT, Some(1));
        assert!(matches!(
            gbm.generate_batch(10, 5),
            Err(BuybackError::Validation { .. })
        ));

        let mut gbm = GeometricBrownianMotion::new(100.0, 0.0, f64::INFINITY, DT, Some(1));
        assert!(gbm.generate_batch(10, 5).is_err());

        let mut gbm = GeometricBrownianMotion::new(100.0, 0.0, 0.2, DT, Some(1));
        assert!(gbm.generate_batch(0, 5).is_err());
    }

    #[test]
    fn test_pathological_parameters_overflow_per_path() {
        let path = GeometricBrownianMotion::new(100.0, 1e6, 0.0, DT, Some(3))
            .generate_batch(1, 252)
            .unwrap();
        assert!(matches!(
            path.get(0).unwrap().check_finite(),
            Err(BuybackError::NumericOverflow { .. })
        ));
    }

    #[test]
    fn test_deterministic_path() {
        let mut det = DeterministicPricePath::new(vec![100.0, 101.0, 99.5]);
        let path = det.generate(100);
        assert_eq!(path.prices(), &[100.0, 101.0, 99.5]);
    }
}
