// tests/simulation_tests.rs
//
// End-to-end runs of the buyback simulator through its public API.

use buyback_simulation::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn base_params() -> SimulationParameters {
    SimulationParameters::new(dec!(1000000000), 60)
        .with_num_paths(200)
        .with_volatility(0.3)
        .with_seed(2024)
        .with_discount_bps(50)
}

// =============================================================================
// Reproducibility
// =============================================================================

#[test]
fn test_same_seed_gives_identical_reports() {
    let a = MonteCarloRunner::new(base_params()).run().unwrap();
    let b = MonteCarloRunner::new(base_params()).run().unwrap();

    assert_eq!(a.paths, b.paths);
    assert_eq!(a, b);
}

#[test]
fn test_different_seeds_give_different_paths() {
    let a = MonteCarloRunner::new(base_params()).run().unwrap();
    let b = MonteCarloRunner::new(base_params().with_seed(2025))
        .run()
        .unwrap();

    assert_ne!(a.paths, b.paths);
}

// =============================================================================
// Ledger invariants over a seeded batch
// =============================================================================

#[test]
fn test_ledger_invariants_hold_on_every_path() {
    let params = base_params();
    let budget = params.total_notional;
    let max_duration = params.max_duration;
    let report = MonteCarloRunner::new(params)
        .with_retained_schedules(200)
        .run()
        .unwrap();

    for strategy in &report.strategies {
        assert_eq!(strategy.failure_count(), 0, "{}", strategy.name());
        for retained in &strategy.schedules {
            let schedule = &retained.schedule;
            assert!(schedule.len() <= max_duration);
            assert!(schedule.total_usd() <= budget);
            if schedule.duration() < max_duration {
                assert_eq!(schedule.total_usd(), budget);
            }
            assert!(schedule.fills().iter().all(|f| f.usd_spent > Decimal::ZERO));
        }
        for result in &strategy.results {
            let perf = &result.performance;
            assert!(perf.total_usd <= budget);
            assert!(perf.unexecuted_usd >= Decimal::ZERO);
            assert!(perf.duration >= 1 && perf.duration <= max_duration);
        }
    }
}

#[test]
fn test_adaptive_never_exceeds_max_duration() {
    let report = MonteCarloRunner::new(base_params()).run().unwrap();
    let adaptive = report.strategy(StrategyKind::Adaptive).unwrap();
    let equal = report.strategy(StrategyKind::EqualDaily).unwrap();

    let adaptive_stats = adaptive.aggregate.as_ref().unwrap();
    let equal_stats = equal.aggregate.as_ref().unwrap();
    assert!(adaptive_stats.mean_duration <= 60.0);
    assert_eq!(equal_stats.mean_duration, 60.0);
    assert_eq!(equal_stats.std_error_duration, 0.0);
}

// =============================================================================
// Known paths
// =============================================================================

#[test]
fn test_constant_prices_score_zero_for_equal_daily() {
    let params = SimulationParameters::new(dec!(1000000), 20)
        .with_num_paths(5)
        .with_volatility(0.0)
        .with_seed(1);
    let report = MonteCarloRunner::new(params)
        .with_strategies(vec![StrategyKind::EqualDaily])
        .run()
        .unwrap();

    let equal = report.strategy(StrategyKind::EqualDaily).unwrap();
    for result in &equal.results {
        assert_eq!(result.performance.vwap, dec!(100));
        assert_eq!(result.performance.duration, 20);
        assert_eq!(result.performance.performance, BasisPoints::ZERO);
    }
    let stats = equal.aggregate.as_ref().unwrap();
    assert_eq!(stats.mean_bps, 0.0);
    assert_eq!(stats.std_error_bps, 0.0);
}

#[test]
fn test_decreasing_path_adaptive_finishes_no_later() {
    let runner = MonteCarloRunner::new(SimulationParameters::new(dec!(1000000), 30));
    let path: PricePath = (0..31).map(|i| 100.0 - i as f64).collect::<Vec<_>>().into();

    let adaptive = runner.run_path(StrategyKind::Adaptive, &path).unwrap();
    let equal = runner.run_path(StrategyKind::EqualDaily, &path).unwrap();

    assert!(adaptive.schedule.duration() <= equal.schedule.duration());
    assert!(adaptive.performance.performance.value() > Decimal::ZERO);
}

#[test]
fn test_zero_discount_matches_adaptive() {
    let params = base_params().with_discount_rate(0.0);
    let report = MonteCarloRunner::new(params)
        .with_strategies(vec![StrategyKind::Adaptive, StrategyKind::DiscountedAdaptive])
        .run()
        .unwrap();

    let adaptive = report.strategy(StrategyKind::Adaptive).unwrap();
    let discounted = report.strategy(StrategyKind::DiscountedAdaptive).unwrap();
    assert_eq!(adaptive.results, discounted.results);
    assert_eq!(adaptive.aggregate, discounted.aggregate);
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn test_overflowing_paths_do_not_abort_batch() {
    // exp(drift * dt) overflows on the first step.
    let params = SimulationParameters::new(dec!(1000), 5)
        .with_num_paths(4)
        .with_drift(1e6)
        .with_seed(9);
    let report = MonteCarloRunner::new(params).run().unwrap();

    for strategy in &report.strategies {
        assert_eq!(strategy.failure_count(), 4);
        assert!(strategy.aggregate.is_none());
        assert!(strategy.failures.iter().all(|f| matches!(
            f.error,
            BuybackError::NumericOverflow { day: 1, .. }
        )));
    }
    assert!(format_summary(&report).contains("4/4"));
}

#[test]
fn test_invalid_parameters_are_rejected() {
    let err = MonteCarloRunner::new(base_params().with_num_paths(0))
        .run()
        .unwrap_err();
    assert_eq!(
        err,
        BuybackError::Validation {
            field: "num_paths".to_string(),
            reason: "must be >= 1".to_string(),
        }
    );
}

// =============================================================================
// Serialization
// =============================================================================

#[test]
fn test_report_serializes_to_json() {
    let params = SimulationParameters::from_json(
        r#"{ "num_paths": 10, "max_duration": 15, "total_notional": "5000000", "seed": 11 }"#,
    )
    .unwrap();
    let report = MonteCarloRunner::new(params).run().unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["parameters"]["num_paths"], 10);
    assert_eq!(json["strategies"].as_array().unwrap().len(), 3);
    assert_eq!(json["strategies"][0]["kind"], "equal_daily");
    assert_eq!(json["price_statistics"]["path_count"], 10);
}
