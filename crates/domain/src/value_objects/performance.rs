use crate::value_objects::basis_points::BasisPoints;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Execution quality of one strategy on one price path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceResult {
    /// Volume-weighted average execution price.
    pub vwap: Decimal,
    /// Shares acquired over the whole schedule.
    pub total_shares: Decimal,
    /// USD actually spent.
    pub total_usd: Decimal,
    /// Budget left unexecuted when the schedule ended.
    pub unexecuted_usd: Decimal,
    /// Trading days used.
    pub duration: usize,
    /// Benchmark price on the last trading day.
    pub benchmark_price: Decimal,
    /// (benchmark - vwap) / benchmark, positive when the buyer beat the benchmark.
    pub performance: BasisPoints,
}

/// Cross-path statistics for one strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateStatistics {
    /// Number of path results aggregated.
    pub count: usize,
    pub mean_bps: f64,
    pub std_dev_bps: f64,
    /// std_dev / sqrt(count); zero for a single path.
    pub std_error_bps: f64,
    pub median_bps: f64,
    pub p25_bps: f64,
    pub p75_bps: f64,
    pub min_bps: f64,
    pub max_bps: f64,
    pub mean_duration: f64,
    pub std_error_duration: f64,
}
