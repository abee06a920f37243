//! Monte Carlo evaluation of buyback strategies.
//!
//! One batch of GBM paths is generated per run and every requested strategy
//! trades each path independently. Path-scoped failures are collected next to
//! the successful results and left out of the aggregates.

use crate::benchmark::BenchmarkSeries;
use crate::metrics::{aggregate, summarize};
use crate::price_path::{GeometricBrownianMotion, PricePath, PricePathSet};
use crate::price_statistics::PriceStatistics;
use crate::strategies::{AdaptiveConfig, ExecutionStrategy, Strategy};
use buyback_domain::entities::PurchaseSchedule;
use buyback_domain::enums::StrategyKind;
use buyback_domain::parameters::SimulationParameters;
use buyback_domain::value_objects::{AggregateStatistics, PerformanceResult};
use buyback_domain::{BuybackError, BuybackResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Runs all strategies over one seeded batch of paths.
#[derive(Debug, Clone)]
pub struct MonteCarloRunner {
    pub params: SimulationParameters,
    pub strategies: Vec<StrategyKind>,
    pub adaptive_config: AdaptiveConfig,
    /// Number of leading paths whose full schedules are kept in the report.
    pub retained_schedules: usize,
}

/// Successful evaluation of one path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathResult {
    pub path_index: usize,
    pub performance: PerformanceResult,
}

/// Path-scoped failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathFailure {
    pub path_index: usize,
    pub error: BuybackError,
}

/// Full schedule kept for one of the leading paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetainedSchedule {
    pub path_index: usize,
    pub schedule: PurchaseSchedule,
}

/// Everything one strategy produced over the batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyReport {
    pub kind: StrategyKind,
    pub results: Vec<PathResult>,
    pub failures: Vec<PathFailure>,
    /// `None` when every path failed.
    pub aggregate: Option<AggregateStatistics>,
    pub schedules: Vec<RetainedSchedule>,
}

impl StrategyReport {
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn success_count(&self) -> usize {
        self.results.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }
}

/// Outcome of a full run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub parameters: SimulationParameters,
    pub paths: PricePathSet,
    pub price_statistics: PriceStatistics,
    pub strategies: Vec<StrategyReport>,
}

impl SimulationReport {
    /// Report for `kind`, if it was part of the run.
    pub fn strategy(&self, kind: StrategyKind) -> Option<&StrategyReport> {
        self.strategies.iter().find(|s| s.kind == kind)
    }
}

/// All intermediate products of one strategy on one path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathRun {
    pub benchmark: BenchmarkSeries,
    pub schedule: PurchaseSchedule,
    pub performance: PerformanceResult,
}

impl MonteCarloRunner {
    /// Creates a runner for every strategy kind with adaptive constants taken
    /// from `params`.
    pub fn new(params: SimulationParameters) -> Self {
        let adaptive_config = AdaptiveConfig::from_parameters(&params);
        Self {
            params,
            strategies: StrategyKind::ALL.to_vec(),
            adaptive_config,
            retained_schedules: 0,
        }
    }

    /// Restricts the run to `strategies`, reported in the given order.
    #[must_use]
    pub fn with_strategies(mut self, strategies: Vec<StrategyKind>) -> Self {
        self.strategies = strategies;
        self
    }

    /// Overrides the constants used by both adaptive strategies.
    #[must_use]
    pub fn with_adaptive_config(mut self, config: AdaptiveConfig) -> Self {
        self.adaptive_config = config;
        self
    }

    /// Keeps the full schedules of the first `count` paths.
    ///
    /// # Arguments
    ///
    /// * `count` - Number of leading paths, 0 keeps none
    #[must_use]
    pub fn with_retained_schedules(mut self, count: usize) -> Self {
        self.retained_schedules = count;
        self
    }

    /// Validates parameters, generates the path batch and evaluates it.
    pub fn run(&self) -> BuybackResult<SimulationReport> {
        self.params.validate()?;
        self.adaptive_config.validate()?;
        info!(
            num_paths = self.params.num_paths,
            max_duration = self.params.max_duration,
            seed = ?self.params.seed,
            "Starting buyback simulation"
        );

        let mut gbm = GeometricBrownianMotion::from_parameters(&self.params)?;
        let paths = gbm.generate_batch(self.params.num_paths, self.params.max_duration)?;
        self.evaluate(paths)
    }

    /// Evaluates every configured strategy on an existing batch of paths.
    pub fn evaluate(&self, paths: PricePathSet) -> BuybackResult<SimulationReport> {
        self.params.validate()?;
        self.adaptive_config.validate()?;

        let strategies = self
            .strategies
            .iter()
            .map(|kind| self.evaluate_strategy(*kind, &paths))
            .collect::<BuybackResult<Vec<_>>>()?;

        Ok(SimulationReport {
            parameters: self.params.clone(),
            price_statistics: PriceStatistics::from_paths(&paths),
            paths,
            strategies,
        })
    }

    fn evaluate_strategy(
        &self,
        kind: StrategyKind,
        paths: &PricePathSet,
    ) -> BuybackResult<StrategyReport> {
        let strategy = self.strategy(kind);
        let mut results = Vec::with_capacity(paths.len());
        let mut failures = Vec::new();
        let mut schedules = Vec::with_capacity(self.retained_schedules.min(paths.len()));

        for (path_index, path) in paths.iter().enumerate() {
            match self.run_with(&strategy, path) {
                Ok(run) => {
                    if path_index < self.retained_schedules {
                        schedules.push(RetainedSchedule {
                            path_index,
                            schedule: run.schedule,
                        });
                    }
                    results.push(PathResult {
                        path_index,
                        performance: run.performance,
                    });
                }
                Err(error) if error.is_path_scoped() => {
                    debug!(strategy = %kind, path_index, error = %error, "Path failed");
                    failures.push(PathFailure { path_index, error });
                }
                Err(error) => return Err(error),
            }
        }

        if !failures.is_empty() {
            warn!(
                strategy = %kind,
                failed = failures.len(),
                total = paths.len(),
                "Paths excluded from aggregation"
            );
        }

        let performances: Vec<PerformanceResult> =
            results.iter().map(|r| r.performance.clone()).collect();
        let aggregate = if performances.is_empty() {
            None
        } else {
            Some(aggregate(&performances)?)
        };

        if let Some(stats) = &aggregate {
            info!(
                strategy = %kind,
                mean_bps = stats.mean_bps,
                std_error_bps = stats.std_error_bps,
                mean_duration = stats.mean_duration,
                "Strategy evaluated"
            );
        }

        Ok(StrategyReport {
            kind,
            results,
            failures,
            aggregate,
            schedules,
        })
    }

    /// Runs one strategy on one path and keeps every intermediate product.
    pub fn run_path(&self, kind: StrategyKind, path: &PricePath) -> BuybackResult<PathRun> {
        self.run_with(&self.strategy(kind), path)
    }

    fn strategy(&self, kind: StrategyKind) -> Strategy {
        Strategy::with_adaptive_config(kind, &self.params, self.adaptive_config.clone())
    }

    fn run_with(&self, strategy: &Strategy, path: &PricePath) -> BuybackResult<PathRun> {
        path.check_finite()?;
        let benchmark = strategy.benchmark_for(path);
        let schedule = strategy.execute(
            path,
            &benchmark,
            self.params.total_notional,
            self.params.max_duration,
        )?;
        let performance = summarize(&schedule, &benchmark)?;

        Ok(PathRun {
            benchmark,
            schedule,
            performance,
        })
    }
}
