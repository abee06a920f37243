//! Execution quality metrics.
//!
//! Per path, a purchase schedule is scored by its VWAP against the benchmark
//! on its last trading day. Across paths, basis-point scores and durations are
//! summarized with population statistics.

use crate::benchmark::BenchmarkSeries;
use buyback_domain::entities::PurchaseSchedule;
use buyback_domain::value_objects::{AggregateStatistics, BasisPoints, PerformanceResult};
use buyback_domain::{BuybackError, BuybackResult};
use rust_decimal::Decimal;
use rust_decimal::prelude::*;

/// Decimal places kept in a VWAP.
///
/// Share counts carry rounding in their last digits; rounding the quotient
/// removes it, so a constant price comes back exactly.
pub const VWAP_SCALE: u32 = 18;

/// Total USD spent divided by total shares acquired, rounded to [`VWAP_SCALE`].
pub fn vwap(schedule: &PurchaseSchedule) -> BuybackResult<Decimal> {
    let total_shares = schedule.total_shares();
    if total_shares.is_zero() {
        return Err(BuybackError::division_undefined(
            "VWAP with zero shares acquired",
        ));
    }
    schedule
        .total_usd()
        .checked_div(total_shares)
        .map(|v| v.round_dp(VWAP_SCALE))
        .ok_or_else(|| BuybackError::division_undefined("VWAP overflow"))
}

/// `(benchmark - vwap) / benchmark` in basis points; positive favors the buyer.
pub fn performance_bps(vwap: Decimal, benchmark: Decimal) -> BuybackResult<BasisPoints> {
    let relative = (benchmark - vwap)
        .checked_div(benchmark)
        .ok_or_else(|| BuybackError::division_undefined("performance against a zero benchmark"))?;
    BasisPoints::checked_from_rate(relative).ok_or_else(|| {
        BuybackError::division_undefined(format!(
            "performance of VWAP {vwap} against benchmark {benchmark} is out of range"
        ))
    })
}

/// Scores one schedule against the benchmark it traded on.
pub fn summarize(
    schedule: &PurchaseSchedule,
    benchmark: &BenchmarkSeries,
) -> BuybackResult<PerformanceResult> {
    let vwap = vwap(schedule)?;
    let duration = schedule.duration();

    let last_day = duration.saturating_sub(1);
    let benchmark_value = benchmark.value_or_last(last_day).ok_or_else(|| {
        BuybackError::division_undefined("benchmark for an empty price path")
    })?;
    let benchmark_price = Decimal::from_f64(benchmark_value).ok_or(BuybackError::NumericOverflow {
        day: last_day,
        value: benchmark_value,
    })?;

    Ok(PerformanceResult {
        vwap,
        total_shares: schedule.total_shares(),
        total_usd: schedule.total_usd(),
        unexecuted_usd: schedule.unexecuted_usd(),
        duration,
        benchmark_price,
        performance: performance_bps(vwap, benchmark_price)?,
    })
}

/// Cross-path statistics of basis-point performance and duration.
///
/// Standard deviation is the population deviation, so a single result has a
/// standard error of zero. An empty slice is undefined.
pub fn aggregate(results: &[PerformanceResult]) -> BuybackResult<AggregateStatistics> {
    if results.is_empty() {
        return Err(BuybackError::division_undefined(
            "aggregate over zero path results",
        ));
    }

    let mut bps: Vec<f64> = results.iter().map(|r| r.performance.to_f64()).collect();
    let durations: Vec<f64> = results.iter().map(|r| r.duration as f64).collect();

    let (mean_bps, std_dev_bps) = mean_and_std(&bps);
    let (mean_duration, std_dev_duration) = mean_and_std(&durations);
    let sqrt_n = (results.len() as f64).sqrt();

    bps.sort_by(|a, b| a.total_cmp(b));

    Ok(AggregateStatistics {
        count: results.len(),
        mean_bps,
        std_dev_bps,
        std_error_bps: std_dev_bps / sqrt_n,
        median_bps: percentile(&bps, 0.5),
        p25_bps: percentile(&bps, 0.25),
        p75_bps: percentile(&bps, 0.75),
        min_bps: bps[0],
        max_bps: bps[bps.len() - 1],
        mean_duration,
        std_error_duration: std_dev_duration / sqrt_n,
    })
}

/// Mean and population standard deviation of a non-empty slice.
pub(crate) fn mean_and_std(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

/// Linearly interpolated percentile of a sorted, non-empty slice.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let rank = q * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}
