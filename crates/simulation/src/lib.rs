//! Monte Carlo simulation of share buyback execution.
//!
//! This crate provides:
//! - Seeded GBM price path generation
//! - Running-mean benchmarks, optionally discounted
//! - Equal-daily and adaptive execution strategies
//! - VWAP and basis-point performance metrics with cross-path aggregates
//! - A batch runner and a plain-text summary report

/// Prelude module for convenient imports.
pub mod prelude;

/// Benchmark series.
pub mod benchmark;
/// Execution quality metrics.
pub mod metrics;
/// Monte Carlo runner.
pub mod monte_carlo;
/// Price path generators.
pub mod price_path;
/// Cross-path price statistics.
pub mod price_statistics;
/// Summary report formatting.
pub mod report;
/// Execution strategies.
pub mod strategies;
