//! Domain types for buyback execution simulation.
//!
//! This crate holds the value objects shared by the simulation engine:
//! - Simulation parameters and their validation
//! - Purchase schedules produced by execution strategies
//! - Per-path performance results and cross-path aggregates
//! - The error taxonomy used across the workspace

/// Purchase schedules and fills.
pub mod entities;
/// Strategy selection enums.
pub mod enums;
/// Error types.
pub mod error;
/// Simulation configuration.
pub mod parameters;
/// Value objects (prices, basis points, results).
pub mod value_objects;

pub use error::{BuybackError, BuybackResult};
pub use parameters::SimulationParameters;
