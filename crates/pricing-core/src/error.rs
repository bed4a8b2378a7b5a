//! # Error Types
//!
//! Domain-specific error types for pricing-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  PricingError         - Domain failures (currency, tiers, overflow)    │
//! │  └── ValidationError  - Input shape failures (missing, negative, ...)  │
//! │                                                                         │
//! │  ErrorKind            - Stable taxonomy callers branch on              │
//! │                                                                         │
//! │  Flow: ValidationError → PricingError → caller (reject / log / fix)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every error here is a permanent, caller-correctable rejection. Nothing is
//! retried and nothing is replaced by a default value.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Error Kind
// =============================================================================

/// Coarse classification of every failure the engine can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// A required value is missing.
    Existence,
    /// A value lies outside its permitted range or shape.
    Range,
    /// Two operands (or two buckets) disagree on currency or money policy.
    CurrencyMismatch,
    /// A non-negative invariant was violated.
    NegativeValue,
    /// A tiered strategy was given no buckets.
    EmptyCollection,
    /// An integer-family strategy saw a fractional quantity.
    NonIntegerQuantity,
    /// No volume bucket contains the quantity.
    NoTierMatched,
}

// =============================================================================
// Pricing Error
// =============================================================================

/// Pricing engine errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    /// Operands carry different currencies.
    ///
    /// ## When This Occurs
    /// - `Money::add` / `subtract` / `compare` across currencies
    /// - Scaled strategy with base and rate in different currencies
    /// - Tier bucket priced in a currency other than the first bucket's
    #[error("Currency mismatch in {context}: expected {expected}, found {found}")]
    CurrencyMismatch {
        context: String,
        expected: String,
        found: String,
    },

    /// Same currency but a different scale or rounding mode.
    #[error("Money policy mismatch in {context}: expected {expected}, found {found}")]
    PolicyMismatch {
        context: String,
        expected: String,
        found: String,
    },

    /// A collection that must hold at least one entry is empty.
    #[error("{field} must not be empty")]
    EmptyCollection { field: String },

    /// The quantity does not fall inside any configured bucket.
    #[error("No tier matches quantity {quantity}")]
    NoTierMatched { quantity: Decimal },

    /// Sorted buckets leave a gap or overlap.
    ///
    /// ## Example
    /// ```text
    /// [0, 10) [12, ∞)   → gap at bucket 1 (expected min 10, found 12)
    /// [0, 10) [8, ∞)    → overlap at bucket 1 (expected min 10, found 8)
    /// ```
    #[error("Tier bucket {index} must start at {expected}, found {found}")]
    NonContiguousTiers {
        index: usize,
        expected: Decimal,
        found: Decimal,
    },

    /// Decimal arithmetic left the representable range.
    #[error("Arithmetic overflow while computing {operation}")]
    Overflow { operation: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl PricingError {
    /// Maps the error onto the stable [`ErrorKind`] taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PricingError::CurrencyMismatch { .. } | PricingError::PolicyMismatch { .. } => {
                ErrorKind::CurrencyMismatch
            }
            PricingError::EmptyCollection { .. } => ErrorKind::EmptyCollection,
            PricingError::NoTierMatched { .. } => ErrorKind::NoTierMatched,
            PricingError::NonContiguousTiers { .. } | PricingError::Overflow { .. } => {
                ErrorKind::Range
            }
            PricingError::Validation(err) => err.kind(),
        }
    }

    pub(crate) fn overflow(operation: impl Into<String>) -> Self {
        PricingError::Overflow {
            operation: operation.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when an input value doesn't have the required shape.
/// They are checked before any pricing math runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative, got {value}")]
    MustBeNonNegative { field: String, value: Decimal },

    /// Value must be strictly greater than zero.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} is out of range: {reason}")]
    OutOfRange { field: String, reason: String },

    /// Invalid format (e.g., malformed currency code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// An integer-only quantity carried a fractional part.
    #[error("{field} must be a whole number, got {value}")]
    NotWholeNumber { field: String, value: Decimal },
}

impl ValidationError {
    /// Maps the error onto the stable [`ErrorKind`] taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::Required { .. } => ErrorKind::Existence,
            ValidationError::MustBeNonNegative { .. } => ErrorKind::NegativeValue,
            ValidationError::MustBePositive { .. }
            | ValidationError::OutOfRange { .. }
            | ValidationError::InvalidFormat { .. } => ErrorKind::Range,
            ValidationError::NotWholeNumber { .. } => ErrorKind::NonIntegerQuantity,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with PricingError.
pub type PricingResult<T> = Result<T, PricingError>;

// =============================================================================
// Unit Tests
// =============================================================================
