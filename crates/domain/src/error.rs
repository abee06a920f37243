use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by the buyback simulation engine.
///
/// `Validation` is raised before any simulation work starts. The other two
/// variants are per-path conditions: callers collect them next to successful
/// results instead of aborting a whole batch.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum BuybackError {
    #[error("Invalid parameter: {field} ({reason})")]
    Validation { field: String, reason: String },

    #[error("Division undefined: {context}")]
    DivisionUndefined { context: String },

    #[error("Numeric overflow on day {day}: {value} is not representable")]
    NumericOverflow { day: usize, value: f64 },
}

impl BuybackError {
    /// Creates a validation error for the given field.
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a division-undefined error with context.
    pub fn division_undefined(context: impl Into<String>) -> Self {
        Self::DivisionUndefined {
            context: context.into(),
        }
    }

    /// Returns true for errors scoped to a single path.
    pub fn is_path_scoped(&self) -> bool {
        !matches!(self, Self::Validation { .. })
    }
}

impl From<serde_json::Error> for BuybackError {
    fn from(e: serde_json::Error) -> Self {
        BuybackError::validation("document", e.to_string())
    }
}

pub type BuybackResult<T> = Result<T, BuybackError>;
