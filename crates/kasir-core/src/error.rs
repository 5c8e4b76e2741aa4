//! # Error Types
//!
//! Domain-specific error types for kasir-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  kasir-core errors (this file)                                         │
//! │  ├── ValidationError  - Input validation failures                      │
//! │  ├── CoreError        - Business rule rejections                       │
//! │  └── CheckoutError<E> - CoreError, or the store's own error E          │
//! │                                                                         │
//! │  kasir-db errors (separate crate)                                      │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  kasir-api errors (in app)                                             │
//! │  └── ApiError         - What HTTP clients see (status + JSON body)     │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CheckoutError<DbError> → ApiError │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule rejections.
///
/// Every variant is a client-side problem: the request can be fixed and
/// resubmitted. Storage failures never appear here.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Checkout was submitted without any line items.
    #[error("Basket is empty")]
    EmptyBasket,

    /// A basket line references a product id that does not exist.
    #[error("product id {0} not found")]
    ProductNotFound(i64),

    /// Selling the requested quantity would drive stock below zero.
    ///
    /// ## User Workflow
    /// ```text
    /// Checkout [{product 1, qty 25}]
    ///      │
    ///      ▼
    /// Stock for product 1: 20
    ///      │
    ///      ▼
    /// InsufficientStock { product_id: 1, available: 20, requested: 25 }
    ///      │
    ///      ▼
    /// HTTP 409, nothing committed
    /// ```
    #[error("Insufficient stock for {name} (id {product_id}): available {available}, requested {requested}")]
    InsufficientStock {
        product_id: i64,
        name: String,
        available: i64,
        requested: i64,
    },

    /// A subtotal or the running total does not fit in an i64.
    #[error("Amount overflow while pricing product id {product_id}")]
    AmountOverflow { product_id: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Checkout Error
// =============================================================================

/// Failure of a checkout run against a store with error type `E`.
///
/// Either way the unit of work is discarded, so no effect is visible.
#[derive(Debug, Error)]
pub enum CheckoutError<E> {
    /// The basket was rejected by a business rule.
    #[error(transparent)]
    Rejected(#[from] CoreError),

    /// The backing store failed (connectivity, constraint, ...).
    #[error("storage failure: {0}")]
    Store(E),
}

impl<E> CheckoutError<E> {
    /// Returns the business rejection, if this was one.
    pub fn rejection(&self) -> Option<&CoreError> {
        match self {
            CheckoutError::Rejected(err) => Some(err),
            CheckoutError::Store(_) => None,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g. invalid date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            product_id: 1,
            name: "Indomie Goreng".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Indomie Goreng (id 1): available 3, requested 5"
        );

        assert_eq!(CoreError::ProductNotFound(99).to_string(), "product id 99 not found");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "items".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }

    #[test]
    fn test_checkout_error_exposes_rejection() {
        let err: CheckoutError<std::io::Error> = CoreError::EmptyBasket.into();
        assert_eq!(err.rejection(), Some(&CoreError::EmptyBasket));
        assert_eq!(err.to_string(), "Basket is empty");

        let err: CheckoutError<std::io::Error> =
            CheckoutError::Store(std::io::Error::other("disk full"));
        assert!(err.rejection().is_none());
        assert_eq!(err.to_string(), "storage failure: disk full");
    }
}
