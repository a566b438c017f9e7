//! # Error Types
//!
//! Domain-specific error types for shopverse-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shopverse-core errors (this file)                                      │
//! │  ├── CoreError        - Cart rejections, bad input, empty checkout      │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  shopverse-locator errors (separate crate)                              │
//! │  └── LocatorError     - Catalog read/parse failures                     │
//! │                                                                         │
//! │  storefront-cli errors (in app)                                         │
//! │  └── AppError         - What the terminal sees                          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → LocatorError → AppError            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant here is a local, recoverable condition. The core never
//! retries and never logs; translating a variant into a user message
//! ("insufficient stock", ...) is the screen's job.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// Malformed input (out-of-range coordinate, negative radius, ...).
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    /// No cart line exists for the composite key.
    ///
    /// ## When This Occurs
    /// - The line was deleted by another screen before the tap landed
    /// - The cart was reloaded and the product is gone
    ///
    /// The cart is left untouched.
    #[error("Cart line not found: user {user_id}, product {product_id}")]
    LineNotFound {
        user_id: String,
        product_id: String,
    },

    /// Incrementing would take the quantity above the known stock.
    ///
    /// ## User Workflow
    /// ```text
    /// Tap "+" (qty: 1, stock: 1)
    ///      │
    ///      ▼
    /// request_increment → StockExceeded { available: 1, requested: 2 }
    ///      │
    ///      ▼
    /// UI shows: "Not enough stock"
    /// ```
    #[error("Insufficient stock for {product_id}: available {available}, requested {requested}")]
    StockExceeded {
        product_id: String,
        available: i64,
        requested: i64,
    },

    /// Decrementing would take the quantity below the minimum.
    #[error("Quantity for {product_id} cannot go below {minimum}")]
    BelowMinimum { product_id: String, minimum: i64 },

    /// Incrementing would take the quantity above the per-line cap.
    #[error("Quantity for {product_id} cannot go above {maximum}")]
    AboveMaximum { product_id: String, maximum: i64 },

    /// Checkout was started with no lines.
    #[error("Cannot check out an empty cart")]
    EmptyCheckout,
}

impl CoreError {
    /// Creates a LineNotFound error for a composite key.
    pub fn line_not_found(user_id: impl Into<String>, product_id: impl Into<String>) -> Self {
        CoreError::LineNotFound {
            user_id: user_id.into(),
            product_id: product_id.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used for early validation before business logic runs, and wrapped into
/// [`CoreError::InvalidInput`] when surfaced from a core operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    /// Value is NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Duplicate value (e.g., two stores sharing an id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
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
        let err = CoreError::StockExceeded {
            product_id: "p2".to_string(),
            available: 1,
            requested: 2,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for p2: available 1, requested 2"
        );

        let err = CoreError::line_not_found("u1", "p9");
        assert_eq!(err.to_string(), "Cart line not found: user u1, product p9");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::OutOfRange {
            field: "latitude".to_string(),
            min: -90.0,
            max: 90.0,
        };
        assert_eq!(err.to_string(), "latitude must be between -90 and 90");

        let err = ValidationError::Required {
            field: "shipping address".to_string(),
        };
        assert_eq!(err.to_string(), "shipping address is required");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Negative {
            field: "radius_km".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::InvalidInput(_)));
    }
}
