//! # Validation Module
//!
//! Input validation utilities shared by the locator, the cart and checkout.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Screen                                                        │
//! │  └── Empty-field checks, immediate feedback                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: shopverse-core                                                │
//! │  └── THIS MODULE: coordinates, radius, quantity, address                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend                                                       │
//! │  └── CHECK (quantity > 0), primary keys, foreign keys                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shopverse_core::validation::{validate_latitude, validate_quantity};
//!
//! assert!(validate_latitude(21.0285).is_ok());
//! assert!(validate_quantity(0).is_err());
//! ```

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::CartLine;
use crate::{MAX_AMOUNT, MAX_CART_LINES, MAX_LINE_QUANTITY, MIN_LINE_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Geographic Validators
// =============================================================================

fn validate_degrees(field: &str, value: f64, limit: f64) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
        });
    }

    if !(-limit..=limit).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: -limit,
            max: limit,
        });
    }

    Ok(())
}

/// Validates a latitude in degrees: finite and within [-90, 90].
pub fn validate_latitude(latitude: f64) -> ValidationResult<()> {
    validate_degrees("latitude", latitude, 90.0)
}

/// Validates a longitude in degrees: finite and within [-180, 180].
pub fn validate_longitude(longitude: f64) -> ValidationResult<()> {
    validate_degrees("longitude", longitude, 180.0)
}

/// Validates a search radius in kilometers.
///
/// ## Rules
/// - Must be finite
/// - Zero is allowed (only exact matches qualify)
/// - Must not be negative
pub fn validate_radius_km(radius_km: f64) -> ValidationResult<()> {
    if !radius_km.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "radius_km".to_string(),
        });
    }

    if radius_km < 0.0 {
        return Err(ValidationError::Negative {
            field: "radius_km".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Cart Validators
// =============================================================================

/// Validates a cart line quantity.
///
/// ## Rules
/// - Must be at least [`MIN_LINE_QUANTITY`] (the backend enforces
///   `CHECK (quantity > 0)` on `cart_items`)
/// - Must not exceed [`MAX_LINE_QUANTITY`] (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty < MIN_LINE_QUANTITY {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: MIN_LINE_QUANTITY as f64,
            max: MAX_LINE_QUANTITY as f64,
        });
    }

    Ok(())
}

/// Validates a unit price or fee.
///
/// ## Rules
/// - Must not be negative
/// - Zero is allowed (free items, free shipping)
/// - Must not exceed [`MAX_AMOUNT`]
///
/// ## Example
/// ```rust
/// use shopverse_core::money::Money;
/// use shopverse_core::validation::validate_amount;
///
/// assert!(validate_amount("unit_price", Money::from_minor(150_000)).is_ok());
/// assert!(validate_amount("unit_price", Money::zero()).is_ok());
/// assert!(validate_amount("unit_price", Money::from_minor(-1)).is_err());
/// ```
pub fn validate_amount(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    if amount > MAX_AMOUNT {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0.0,
            max: MAX_AMOUNT.minor() as f64,
        });
    }

    Ok(())
}

/// Validates the number of lines in a cart.
///
/// ## Rules
/// - Must not exceed [`MAX_CART_LINES`] (100)
pub fn validate_cart_size(line_count: usize) -> ValidationResult<()> {
    if line_count > MAX_CART_LINES {
        return Err(ValidationError::OutOfRange {
            field: "cart lines".to_string(),
            min: 0.0,
            max: MAX_CART_LINES as f64,
        });
    }

    Ok(())
}

/// Validates a batch of cart lines before a cart takes them.
///
/// ## Rules
/// - At most [`MAX_CART_LINES`] lines
/// - Every line passes [`CartLine::validate`]
/// - No two lines share a `(user_id, product_id)` key
pub fn validate_cart_lines(lines: &[CartLine]) -> ValidationResult<()> {
    validate_cart_size(lines.len())?;

    let mut seen = HashSet::with_capacity(lines.len());
    for line in lines {
        line.validate()?;
        if !seen.insert((line.user_id.as_str(), line.product_id.as_str())) {
            return Err(ValidationError::Duplicate {
                field: "cart line".to_string(),
                value: line.composite_key(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates that a text field is present after trimming.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a shipping address and returns it trimmed.
///
/// ## Example
/// ```rust
/// use shopverse_core::validation::validate_shipping_address;
///
/// assert_eq!(
///     validate_shipping_address("  12 Tran Hung Dao ").unwrap(),
///     "12 Tran Hung Dao"
/// );
/// assert!(validate_shipping_address("   ").is_err());
/// ```
pub fn validate_shipping_address(address: &str) -> ValidationResult<String> {
    validate_required("shipping address", address)?;
    Ok(address.trim().to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_latitude() {
        assert!(validate_latitude(0.0).is_ok());
        assert!(validate_latitude(90.0).is_ok());
        assert!(validate_latitude(-90.0).is_ok());

        assert!(validate_latitude(90.0001).is_err());
        assert!(validate_latitude(-91.0).is_err());
        assert_eq!(
            validate_latitude(f64::NAN),
            Err(ValidationError::NotFinite {
                field: "latitude".to_string()
            })
        );
    }

    #[test]
    fn test_validate_longitude() {
        assert!(validate_longitude(180.0).is_ok());
        assert!(validate_longitude(-180.0).is_ok());
        assert!(validate_longitude(105.8542).is_ok());

        assert!(validate_longitude(180.5).is_err());
        assert!(validate_longitude(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_radius_km() {
        assert!(validate_radius_km(0.0).is_ok());
        assert!(validate_radius_km(10.0).is_ok());

        assert!(validate_radius_km(-0.5).is_err());
        assert!(validate_radius_km(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(42).is_ok());

        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
        assert_eq!(
            validate_quantity(1000),
            Err(ValidationError::OutOfRange {
                field: "quantity".to_string(),
                min: 1.0,
                max: 999.0
            })
        );
        assert!(validate_quantity(i64::MAX).is_err());
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount("unit_price", MAX_AMOUNT).is_ok());

        assert_eq!(
            validate_amount("unit_price", Money::from_minor(-100)),
            Err(ValidationError::Negative {
                field: "unit_price".to_string()
            })
        );
        assert!(validate_amount("shipping_fee", Money::from_minor(i64::MAX)).is_err());
    }

    #[test]
    fn test_validate_cart_size() {
        assert!(validate_cart_size(0).is_ok());
        assert!(validate_cart_size(MAX_CART_LINES).is_ok());
        assert!(validate_cart_size(MAX_CART_LINES + 1).is_err());
    }

    #[test]
    fn test_validate_cart_lines() {
        let lines = vec![CartLine::new("u1", "p1", 1), CartLine::new("u1", "p2", 3)];
        assert!(validate_cart_lines(&lines).is_ok());
        assert!(validate_cart_lines(&[]).is_ok());

        let zero = vec![CartLine::new("u1", "p1", 0)];
        assert!(matches!(
            validate_cart_lines(&zero),
            Err(ValidationError::MustBePositive { .. })
        ));

        let duplicate = vec![CartLine::new("u1", "p1", 1), CartLine::new("u1", "p1", 2)];
        assert_eq!(
            validate_cart_lines(&duplicate),
            Err(ValidationError::Duplicate {
                field: "cart line".to_string(),
                value: "u1_p1".to_string()
            })
        );

        let too_many: Vec<CartLine> = (0..=MAX_CART_LINES)
            .map(|i| CartLine::new("u1", format!("p{i}"), 1))
            .collect();
        assert!(validate_cart_lines(&too_many).is_err());
    }

    #[test]
    fn test_validate_shipping_address() {
        assert!(validate_shipping_address("").is_err());
        assert!(validate_shipping_address("\t\n").is_err());
        assert_eq!(
            validate_shipping_address(" 1 Le Loi ").unwrap(),
            "1 Le Loi"
        );
    }
}
