use serde::{Deserialize, Serialize};
use std::fmt;

/// Execution policy used to spend the buyback notional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Same USD amount every day.
    EqualDaily,
    /// Speeds up below the running benchmark, slows down above it.
    Adaptive,
    /// Adaptive logic against a discounted benchmark.
    DiscountedAdaptive,
}

impl StrategyKind {
    /// All strategy kinds, in reporting order.
    pub const ALL: [StrategyKind; 3] = [
        StrategyKind::EqualDaily,
        StrategyKind::Adaptive,
        StrategyKind::DiscountedAdaptive,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StrategyKind::EqualDaily => "Equal Daily",
            StrategyKind::Adaptive => "Adaptive",
            StrategyKind::DiscountedAdaptive => "Discounted Adaptive",
        }
    }

    /// Whether the benchmark used for decisions and scoring is discounted.
    pub fn uses_discount(&self) -> bool {
        matches!(self, StrategyKind::DiscountedAdaptive)
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
