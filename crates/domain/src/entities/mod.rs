pub mod purchase_schedule;

// Re-export for easier access
pub use purchase_schedule::{Fill, PurchaseSchedule};
