pub mod basis_points;
pub mod performance;
pub mod price;

pub use basis_points::BasisPoints;
pub use performance::{AggregateStatistics, PerformanceResult};
pub use price::Price;
