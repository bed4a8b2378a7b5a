//! # Validation Module
//!
//! Input checks shared by money and the pricing strategies.
//!
//! ## Where Validation Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Points                                  │
//! │                                                                         │
//! │  Construction (fail-fast, once)                                        │
//! │  ├── scale within 0..=28                                               │
//! │  ├── amounts / rates / bucket bounds non-negative                      │
//! │  └── integer-family bucket bounds are whole numbers                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  calculate(quantity) (every call)                                      │
//! │  ├── quantity non-negative                                             │
//! │  └── integer family: quantity is a whole number                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pricing_core::validation::{validate_quantity, validate_whole_quantity};
//! use rust_decimal_macros::dec;
//!
//! assert!(validate_quantity(dec!(2.5)).is_ok());
//! assert!(validate_quantity(dec!(-1)).is_err());
//! assert_eq!(validate_whole_quantity(dec!(3)).unwrap(), 3);
//! assert!(validate_whole_quantity(dec!(3.5)).is_err());
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::MAX_SCALE;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates that a named decimal is zero or greater.
pub fn validate_non_negative(field: &str, value: Decimal) -> ValidationResult<()> {
    if value < Decimal::ZERO {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
            value,
        });
    }

    Ok(())
}

/// Validates a purchase quantity.
///
/// ## Rules
/// - Must be non-negative (zero is a legal, free purchase)
/// - Fractional quantities are allowed here; integer strategies add
///   [`validate_whole_quantity`] on top
pub fn validate_quantity(quantity: Decimal) -> ValidationResult<()> {
    validate_non_negative("quantity", quantity)
}

/// Validates that a decimal is a whole number and returns it as `i64`.
///
/// `field` names the value in the error, so callers can report which bucket
/// boundary or contribution was fractional.
pub fn validate_whole_number(field: &str, value: Decimal) -> ValidationResult<i64> {
    if !value.fract().is_zero() {
        return Err(ValidationError::NotWholeNumber {
            field: field.to_string(),
            value,
        });
    }

    value.to_i64().ok_or_else(|| ValidationError::OutOfRange {
        field: field.to_string(),
        reason: format!("{} does not fit in a 64-bit integer", value),
    })
}

/// Validates an integer-family purchase quantity.
///
/// ## Rules
/// - Must be non-negative
/// - Must be a whole number (`3` and `3.00` pass, `3.5` fails)
pub fn validate_whole_quantity(quantity: Decimal) -> ValidationResult<i64> {
    validate_quantity(quantity)?;
    validate_whole_number("quantity", quantity)
}

/// Validates a money scale (number of fractional digits).
///
/// ## Rules
/// - Must be between 0 and 28 (the decimal engine's precision limit)
pub fn validate_scale(scale: i64) -> ValidationResult<u32> {
    if scale < 0 || scale > i64::from(MAX_SCALE) {
        return Err(ValidationError::OutOfRange {
            field: "scale".to_string(),
            reason: format!("{} is not between 0 and {}", scale, MAX_SCALE),
        });
    }

    // In range by the check above.
    Ok(scale as u32)
}

/// Validates a proportional adjustment factor (markup / markdown).
pub fn validate_factor(factor: Decimal) -> ValidationResult<()> {
    validate_non_negative("factor", factor)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(dec!(0)).is_ok());
        assert!(validate_quantity(dec!(1.5)).is_ok());
        assert!(validate_quantity(dec!(1000000)).is_ok());

        assert!(matches!(
            validate_quantity(dec!(-0.01)),
            Err(ValidationError::MustBeNonNegative { .. })
        ));
    }

    #[test]
    fn test_validate_whole_quantity() {
        assert_eq!(validate_whole_quantity(dec!(0)).unwrap(), 0);
        assert_eq!(validate_whole_quantity(dec!(12.000)).unwrap(), 12);

        assert!(matches!(
            validate_whole_quantity(dec!(12.5)),
            Err(ValidationError::NotWholeNumber { .. })
        ));
        assert!(matches!(
            validate_whole_quantity(dec!(-2)),
            Err(ValidationError::MustBeNonNegative { .. })
        ));
    }

    #[test]
    fn test_validate_whole_number_names_field() {
        let err = validate_whole_number("bucket 2 max_qty", dec!(7.5)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "bucket 2 max_qty must be a whole number, got 7.5"
        );
    }

    #[test]
    fn test_validate_scale() {
        assert_eq!(validate_scale(0).unwrap(), 0);
        assert_eq!(validate_scale(2).unwrap(), 2);
        assert_eq!(validate_scale(28).unwrap(), 28);

        assert!(validate_scale(-1).is_err());
        assert!(validate_scale(29).is_err());
    }

    #[test]
    fn test_validate_factor() {
        assert!(validate_factor(dec!(0)).is_ok());
        assert!(validate_factor(dec!(1.15)).is_ok());
        assert!(validate_factor(dec!(-0.5)).is_err());
    }
}
