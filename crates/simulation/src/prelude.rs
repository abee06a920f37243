//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use buyback_simulation::prelude::*;
//! ```

// Benchmark
pub use crate::benchmark::{BenchmarkSeries, running_mean};

// Metrics
pub use crate::metrics::{aggregate, performance_bps, summarize, vwap};

// Monte Carlo
pub use crate::monte_carlo::{
    MonteCarloRunner, PathFailure, PathResult, PathRun, RetainedSchedule, SimulationReport,
    StrategyReport,
};

// Price path generators
pub use crate::price_path::{
    DeterministicPricePath, GeometricBrownianMotion, PricePath, PricePathGenerator, PricePathSet,
};

// Price statistics
pub use crate::price_statistics::PriceStatistics;

// Report
pub use crate::report::format_summary;

// Strategies
pub use crate::strategies::{
    AdaptiveConfig, AdaptiveStrategy, DiscountedAdaptive, EqualDaily, ExecutionStrategy, Strategy,
};

// Domain
pub use buyback_domain::entities::{Fill, PurchaseSchedule};
pub use buyback_domain::enums::StrategyKind;
pub use buyback_domain::value_objects::{AggregateStatistics, BasisPoints, PerformanceResult, Price};
pub use buyback_domain::{BuybackError, BuybackResult, SimulationParameters};
