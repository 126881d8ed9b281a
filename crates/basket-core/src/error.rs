//! # Error Types
//!
//! Domain-specific error types for basket-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  basket-core errors (this file)                                        │
//! │  ├── CoreError        - Money parsing and domain errors                │
//! │  └── ValidationError  - Invalid snapshots / persisted rows             │
//! │                                                                         │
//! │  basket-store errors (separate crate)                                  │
//! │  ├── SlotError        - Storage medium failures                        │
//! │  └── StoreError       - Config loading + slot failures                 │
//! │                                                                         │
//! │  Cart operations themselves never fail: unknown ids are no-ops and     │
//! │  quantities <= 0 mean "remove".                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised by basket-core.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A price could not be interpreted as a currency amount.
    ///
    /// ## When This Occurs
    /// - `--price abc` on the command line
    /// - More than two decimal places (`1.999`)
    /// - NaN / infinity in a persisted number
    #[error("Invalid price '{input}': {reason}")]
    InvalidPrice { input: String, reason: String },

    /// A snapshot or row failed validation.
    #[error("Invalid cart data: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    pub(crate) fn invalid_price(input: impl Into<String>, reason: impl Into<String>) -> Self {
        CoreError::InvalidPrice {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// A catalog snapshot or persisted cart row breaks a cart invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Empty or blank.
    #[error("{field} must not be empty")]
    Required { field: String },

    /// Below zero.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Zero or below.
    #[error("{field} must be at least 1")]
    MustBePositive { field: String },

    /// Two rows share a product id.
    #[error("duplicate {field} '{value}'")]
    Duplicate { field: String, value: String },

    #[error("{field} must be within {min}..={max}")]
    OutOfRange { field: String, min: i64, max: i64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Result alias for basket-core.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_price_message() {
        let err = CoreError::invalid_price("1.999", "at most two decimal places");
        assert_eq!(
            err.to_string(),
            "Invalid price '1.999': at most two decimal places"
        );
    }

    #[test]
    fn test_invariant_messages() {
        let err = ValidationError::Required {
            field: "id".to_string(),
        };
        assert_eq!(err.to_string(), "id must not be empty");

        let err = ValidationError::Duplicate {
            field: "id".to_string(),
            value: "apple".to_string(),
        };
        assert_eq!(err.to_string(), "duplicate id 'apple'");
    }

    #[test]
    fn test_snapshot_failure_wraps_into_core_error() {
        let err: CoreError = ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Invalid cart data: price must not be negative");
    }
}
