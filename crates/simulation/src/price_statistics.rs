//! Cross-path price statistics.

use crate::price_path::PricePathSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-day mean and population standard deviation across paths.
///
/// Paths containing a non-finite price are left out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceStatistics {
    pub mean: Vec<f64>,
    pub std_dev: Vec<f64>,
    /// Number of paths the statistics were computed from.
    pub path_count: usize,
}

impl PriceStatistics {
    /// Computes statistics over the days shared by every finite path.
    pub fn from_paths(paths: &PricePathSet) -> Self {
        let finite: Vec<&[f64]> = paths
            .iter()
            .map(|p| p.prices())
            .filter(|prices| prices.iter().all(|p| p.is_finite()))
            .collect();

        let days = finite.iter().map(|p| p.len()).min().unwrap_or(0);
        let n = finite.len() as f64;

        let mut mean = Vec::with_capacity(days);
        let mut std_dev = Vec::with_capacity(days);
        for day in 0..days {
            let m = finite.iter().map(|p| p[day]).sum::<f64>() / n;
            let variance = finite.iter().map(|p| (p[day] - m).powi(2)).sum::<f64>() / n;
            mean.push(m);
            std_dev.push(variance.sqrt());
        }

        Self {
            mean,
            std_dev,
            path_count: finite.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    /// `mean + k * std_dev` for every day. Negative `k` gives the lower band.
    pub fn envelope(&self, k: f64) -> Vec<f64> {
        self.mean
            .iter()
            .zip(&self.std_dev)
            .map(|(m, s)| m + k * s)
            .collect()
    }

    /// Upper and lower bands for each multiple, keyed `"+1σ"`, `"-1σ"`, ...
    pub fn envelopes(&self, multiples: &[u32]) -> BTreeMap<String, Vec<f64>> {
        let mut bands = BTreeMap::new();
        for &k in multiples {
            let k_f = f64::from(k);
            bands.insert(format!("+{k}σ"), self.envelope(k_f));
            bands.insert(format!("-{k}σ"), self.envelope(-k_f));
        }
        bands
    }
}
