//! # Domain Types
//!
//! Small value types shared by money and every pricing strategy.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────────────────────────────┐     │
//! │  │  CurrencyCode   │   │            RoundingMode                 │     │
//! │  │  ─────────────  │   │  ─────────────────────────────────────  │     │
//! │  │  "USD", "EUR"   │   │  HalfUp (default)   1.005 → 1.01        │     │
//! │  │  3 ASCII letters│   │  HalfEven           1.005 → 1.00        │     │
//! │  │  upper-cased    │   │  HalfDown / Up / Down / Ceiling / Floor │     │
//! │  └─────────────────┘   └─────────────────────────────────────────┘     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::RoundingStrategy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Currency Code
// =============================================================================

/// ISO-4217-style currency code.
///
/// Always three ASCII letters, stored upper-cased. The engine never converts
/// between currencies; it only refuses to mix them.
///
/// ## Example
/// ```rust
/// use pricing_core::CurrencyCode;
///
/// let usd = CurrencyCode::parse(" usd ").unwrap();
/// assert_eq!(usd.as_str(), "USD");
/// assert!(CurrencyCode::parse("").is_err());
/// assert!(CurrencyCode::parse("US").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Parses and normalizes a currency code.
    ///
    /// ## Errors
    /// - `Required` (EXISTENCE) when the input is empty or blank
    /// - `InvalidFormat` when it is not exactly three ASCII letters
    pub fn parse(code: &str) -> Result<Self, ValidationError> {
        let code = code.trim();

        if code.is_empty() {
            return Err(ValidationError::Required {
                field: "currency".to_string(),
            });
        }

        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValidationError::InvalidFormat {
                field: "currency".to_string(),
                reason: format!("'{}' is not a three-letter ISO 4217 code", code),
            });
        }

        Ok(CurrencyCode(code.to_ascii_uppercase()))
    }

    /// Returns the code as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CurrencyCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CurrencyCode::parse(s)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        CurrencyCode::parse(&value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

// =============================================================================
// Rounding Mode
// =============================================================================

/// Rule used to drop digits when an amount is rescaled.
///
/// ## Mode Comparison (to 2 decimal places)
/// ```text
/// ┌──────────────┬─────────┬─────────┬─────────┬──────────┐
/// │ Mode         │  1.005  │  1.015  │ -1.005  │  1.001   │
/// ├──────────────┼─────────┼─────────┼─────────┼──────────┤
/// │ HalfUp       │  1.01   │  1.02   │ -1.01   │  1.00    │
/// │ HalfEven     │  1.00   │  1.02   │ -1.00   │  1.00    │
/// │ HalfDown     │  1.00   │  1.01   │ -1.00   │  1.00    │
/// │ Up           │  1.01   │  1.02   │ -1.01   │  1.01    │
/// │ Down         │  1.00   │  1.01   │ -1.00   │  1.00    │
/// │ Ceiling      │  1.01   │  1.02   │ -1.00   │  1.01    │
/// │ Floor        │  1.00   │  1.01   │ -1.01   │  1.00    │
/// └──────────────┴─────────┴─────────┴─────────┴──────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Round half away from zero (commercial rounding).
    #[default]
    HalfUp,
    /// Round half to the nearest even digit (bankers rounding).
    HalfEven,
    /// Round half toward zero.
    HalfDown,
    /// Always away from zero.
    Up,
    /// Always toward zero (truncate).
    Down,
    /// Toward positive infinity.
    Ceiling,
    /// Toward negative infinity.
    Floor,
}

impl RoundingMode {
    /// The equivalent strategy in the decimal engine.
    pub(crate) fn strategy(self) -> RoundingStrategy {
        match self {
            RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::HalfEven => RoundingStrategy::MidpointNearestEven,
            RoundingMode::HalfDown => RoundingStrategy::MidpointTowardZero,
            RoundingMode::Up => RoundingStrategy::AwayFromZero,
            RoundingMode::Down => RoundingStrategy::ToZero,
            RoundingMode::Ceiling => RoundingStrategy::ToPositiveInfinity,
            RoundingMode::Floor => RoundingStrategy::ToNegativeInfinity,
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundingMode::HalfUp => write!(f, "half_up"),
            RoundingMode::HalfEven => write!(f, "half_even"),
            RoundingMode::HalfDown => write!(f, "half_down"),
            RoundingMode::Up => write!(f, "up"),
            RoundingMode::Down => write!(f, "down"),
            RoundingMode::Ceiling => write!(f, "ceiling"),
            RoundingMode::Floor => write!(f, "floor"),
        }
    }
}

impl FromStr for RoundingMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "half_up" => Ok(RoundingMode::HalfUp),
            "half_even" | "bankers" => Ok(RoundingMode::HalfEven),
            "half_down" => Ok(RoundingMode::HalfDown),
            "up" => Ok(RoundingMode::Up),
            "down" | "truncate" => Ok(RoundingMode::Down),
            "ceiling" => Ok(RoundingMode::Ceiling),
            "floor" => Ok(RoundingMode::Floor),
            "" => Err(ValidationError::Required {
                field: "rounding".to_string(),
            }),
            other => Err(ValidationError::InvalidFormat {
                field: "rounding".to_string(),
                reason: format!(
                    "unknown rounding mode '{}'. Valid options: half_up, half_even, half_down, up, down, ceiling, floor",
                    other
                ),
            }),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
