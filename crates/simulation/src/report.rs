//! Plain-text summary of a simulation run.

use crate::monte_carlo::{SimulationReport, StrategyReport};
use prettytable::format::consts::FORMAT_BOX_CHARS;
use prettytable::{Table, row};

/// Renders one row per strategy with its cross-path statistics.
pub fn format_summary(report: &SimulationReport) -> String {
    let params = &report.parameters;
    let mut out = format!(
        "Buyback simulation: {} paths, max {} days, notional ${}\n",
        report.paths.len(),
        params.max_duration,
        params.total_notional,
    );

    let mut table = Table::new();
    table.set_format(*FORMAT_BOX_CHARS);
    table.set_titles(row![
        "Strategy",
        "Mean (bps)",
        "Median (bps)",
        "Std Dev (bps)",
        "Range (bps)",
        "Mean Duration",
        "Failed Paths"
    ]);

    for strategy in &report.strategies {
        table.add_row(strategy_row(strategy));
    }

    out.push_str(&table.to_string());
    out
}

fn strategy_row(strategy: &StrategyReport) -> prettytable::Row {
    let total = strategy.failure_count() + strategy.success_count();
    let failed = format!("{}/{total}", strategy.failure_count());
    match &strategy.aggregate {
        Some(stats) => row![
            strategy.name(),
            format!("{:.2} ± {:.2}", stats.mean_bps, stats.std_error_bps),
            format!("{:.2}", stats.median_bps),
            format!("{:.2}", stats.std_dev_bps),
            format!("[{:.2}, {:.2}]", stats.min_bps, stats.max_bps),
            format!("{:.1} ± {:.1}", stats.mean_duration, stats.std_error_duration),
            failed
        ],
        None => row![strategy.name(), "-", "-", "-", "-", "-", failed],
    }
}
