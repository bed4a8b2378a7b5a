//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │    1.005 rounds to 1.00 (it is really 1.00499999...)                   │
//! │                                                                         │
//! │  OUR SOLUTION: Scaled Decimal + Explicit Policy                          │
//! │    amount   = rust_decimal::Decimal (base-10, exact)                   │
//! │    policy   = { scale: 2, rounding: HalfUp }                           │
//! │    1.005 USD → 1.01 USD, on every call, on every machine               │
//! │                                                                         │
//! │  Every operation returns a NEW Money, rescaled to its policy.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pricing_core::Money;
//! use rust_decimal_macros::dec;
//!
//! let price = Money::new(dec!(10.00), "USD").unwrap();
//! let total = price.add(&Money::new(dec!(5.50), "USD").unwrap()).unwrap();
//! assert_eq!(total.amount(), dec!(15.50));
//!
//! // Mixing currencies is refused, never converted
//! let euros = Money::new(dec!(5), "EUR").unwrap();
//! assert!(price.add(&euros).is_err());
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::error::{PricingError, PricingResult, ValidationError};
use crate::types::{CurrencyCode, RoundingMode};
use crate::validation::{validate_non_negative, validate_scale};
use crate::wire::MoneyDto;
use crate::{DEFAULT_ROUNDING, DEFAULT_SCALE};

// =============================================================================
// Money Policy
// =============================================================================

/// Precision and rounding rule a Money amount is held to.
///
/// Two Money values can only be added or subtracted when their policies are
/// identical; otherwise the result's precision would be ambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoneyPolicy {
    scale: u32,
    rounding: RoundingMode,
}

impl MoneyPolicy {
    /// Creates a policy.
    ///
    /// ## Errors
    /// `OutOfRange` (RANGE) when `scale` is negative or above 28.
    pub fn new(scale: i64, rounding: RoundingMode) -> Result<Self, ValidationError> {
        Ok(MoneyPolicy {
            scale: validate_scale(scale)?,
            rounding,
        })
    }

    /// Two decimal places, round half up.
    pub const fn standard() -> Self {
        MoneyPolicy {
            scale: DEFAULT_SCALE,
            rounding: DEFAULT_ROUNDING,
        }
    }

    #[inline]
    pub const fn scale(&self) -> u32 {
        self.scale
    }

    #[inline]
    pub const fn rounding(&self) -> RoundingMode {
        self.rounding
    }

    /// Rounds `amount` to this policy and pins its scale exactly.
    fn apply(&self, amount: Decimal) -> Decimal {
        let mut value = amount.round_dp_with_strategy(self.scale, self.rounding.strategy());
        // round_dp never adds digits; rescale pads 12.5 out to 12.50.
        value.rescale(self.scale);
        if value.is_zero() {
            value.set_sign_positive(true);
        }
        value
    }
}

impl Default for MoneyPolicy {
    fn default() -> Self {
        MoneyPolicy::standard()
    }
}

impl fmt::Display for MoneyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scale={}, rounding={}", self.scale, self.rounding)
    }
}

// =============================================================================
// Money Type
// =============================================================================

/// An immutable, currency-scoped, fixed-precision monetary value.
///
/// ## Invariant
/// `amount` is always stored already rounded to `policy.scale` digits using
/// `policy.rounding`. Constructors and every arithmetic operation enforce it.
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Fixed price ────────────┐                                              │
/// │  Scaled base / rate ─────┼──► calculate(quantity) ──► Money total      │
/// │  Tier price per unit ────┘                                              │
/// │                                                                         │
/// │  EVERY monetary value in the engine flows through this type            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "MoneyDto", into = "MoneyDto")]
pub struct Money {
    amount: Decimal,
    currency: CurrencyCode,
    policy: MoneyPolicy,
}

impl Money {
    /// Creates Money with the default policy (2 places, half up).
    ///
    /// ## Example
    /// ```rust
    /// use pricing_core::Money;
    /// use rust_decimal_macros::dec;
    ///
    /// let price = Money::new(dec!(1.005), "USD").unwrap();
    /// assert_eq!(price.amount(), dec!(1.01));
    /// assert_eq!(price.to_string(), "1.01 USD");
    /// ```
    ///
    /// ## Errors
    /// - `Required` (EXISTENCE) for an empty currency
    /// - `InvalidFormat` for a malformed currency
    pub fn new(amount: Decimal, currency: &str) -> PricingResult<Money> {
        let currency = CurrencyCode::parse(currency)?;
        Ok(Money::from_parts(amount, currency, MoneyPolicy::standard()))
    }

    /// Creates Money with an explicit scale and rounding mode.
    ///
    /// ## Example
    /// ```rust
    /// use pricing_core::{Money, RoundingMode};
    /// use rust_decimal_macros::dec;
    ///
    /// let rate = Money::with_scale(dec!(0.123456), "EUR", 4, RoundingMode::HalfEven).unwrap();
    /// assert_eq!(rate.amount(), dec!(0.1235));
    ///
    /// assert!(Money::with_scale(dec!(1), "EUR", -1, RoundingMode::HalfUp).is_err());
    /// ```
    pub fn with_scale(
        amount: Decimal,
        currency: &str,
        scale: i64,
        rounding: RoundingMode,
    ) -> PricingResult<Money> {
        let currency = CurrencyCode::parse(currency)?;
        let policy = MoneyPolicy::new(scale, rounding)?;
        Ok(Money::from_parts(amount, currency, policy))
    }

    /// Creates Money from already-validated parts. Cannot fail.
    pub fn from_parts(amount: Decimal, currency: CurrencyCode, policy: MoneyPolicy) -> Money {
        Money {
            amount: policy.apply(amount),
            currency,
            policy,
        }
    }

    /// Returns zero in `currency` with the default policy.
    pub fn zero(currency: &CurrencyCode) -> Money {
        Money::zero_with(currency, MoneyPolicy::standard())
    }

    /// Returns zero in `currency` with an explicit policy.
    pub fn zero_with(currency: &CurrencyCode, policy: MoneyPolicy) -> Money {
        Money::from_parts(Decimal::ZERO, currency.clone(), policy)
    }

    #[inline]
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    #[inline]
    pub fn currency(&self) -> &CurrencyCode {
        &self.currency
    }

    #[inline]
    pub fn policy(&self) -> MoneyPolicy {
        self.policy
    }

    #[inline]
    pub fn scale(&self) -> u32 {
        self.policy.scale
    }

    #[inline]
    pub fn rounding(&self) -> RoundingMode {
        self.policy.rounding
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Checks if the value is greater than zero.
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    /// Checks if the value is less than zero.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    /// Value equality: same scaled amount and same currency.
    #[inline]
    pub fn equals_value(&self, other: &Money) -> bool {
        self == other
    }

    /// Re-expresses this amount under another policy.
    pub fn with_policy(&self, policy: MoneyPolicy) -> Money {
        Money::from_parts(self.amount, self.currency.clone(), policy)
    }

    // -------------------------------------------------------------------------
    // Arithmetic
    // -------------------------------------------------------------------------

    /// Adds two amounts of the same currency and policy.
    ///
    /// ## Errors
    /// - `CurrencyMismatch` when currencies differ
    /// - `PolicyMismatch` when scale or rounding differ
    pub fn add(&self, other: &Money) -> PricingResult<Money> {
        self.ensure_compatible(other, "add")?;
        let sum = self
            .amount
            .checked_add(other.amount)
            .ok_or_else(|| PricingError::overflow("add"))?;
        Ok(self.derive(sum))
    }

    /// Subtracts `other` from this amount. Same rules as [`Money::add`].
    pub fn subtract(&self, other: &Money) -> PricingResult<Money> {
        self.ensure_compatible(other, "subtract")?;
        let difference = self
            .amount
            .checked_sub(other.amount)
            .ok_or_else(|| PricingError::overflow("subtract"))?;
        Ok(self.derive(difference))
    }

    /// Flips the sign, keeping currency and policy.
    pub fn negate(&self) -> Money {
        self.derive(-self.amount)
    }

    /// Returns the absolute value.
    pub fn abs(&self) -> Money {
        self.derive(self.amount.abs())
    }

    /// Multiplies by a whole-unit count.
    ///
    /// ## Example
    /// ```rust
    /// use pricing_core::Money;
    /// use rust_decimal_macros::dec;
    ///
    /// let unit = Money::new(dec!(2.99), "USD").unwrap();
    /// assert_eq!(unit.multiply(3).unwrap().amount(), dec!(8.97));
    /// assert_eq!(unit.multiply(0).unwrap().amount(), dec!(0.00));
    /// assert!(unit.multiply(-1).is_err());
    /// ```
    pub fn multiply(&self, multiplier: i64) -> PricingResult<Money> {
        validate_non_negative("multiplier", Decimal::from(multiplier))?;
        let product = self
            .amount
            .checked_mul(Decimal::from(multiplier))
            .ok_or_else(|| PricingError::overflow("multiply"))?;
        Ok(self.derive(product))
    }

    /// Multiplies by a fractional factor (1.5 kg × rate, 1.10 markup).
    ///
    /// The product is rounded once, using this Money's policy.
    pub fn multiply_by(&self, factor: Decimal) -> PricingResult<Money> {
        validate_non_negative("factor", factor)?;
        let product = self
            .amount
            .checked_mul(factor)
            .ok_or_else(|| PricingError::overflow("multiply"))?;
        Ok(self.derive(product))
    }

    /// Divides by a positive whole divisor, rounding with this Money's mode.
    ///
    /// ## Example
    /// ```rust
    /// use pricing_core::Money;
    /// use rust_decimal_macros::dec;
    ///
    /// let bill = Money::new(dec!(10.00), "USD").unwrap();
    /// assert_eq!(bill.divide(3).unwrap().amount(), dec!(3.33));
    /// assert!(bill.divide(0).is_err());
    /// ```
    pub fn divide(&self, divisor: i64) -> PricingResult<Money> {
        if divisor <= 0 {
            return Err(ValidationError::MustBePositive {
                field: "divisor".to_string(),
            }
            .into());
        }
        let quotient = self
            .amount
            .checked_div(Decimal::from(divisor))
            .ok_or_else(|| PricingError::overflow("divide"))?;
        Ok(self.derive(quotient))
    }

    /// Orders two amounts of the same currency.
    ///
    /// ## Errors
    /// `CurrencyMismatch` when currencies differ. Policies may differ; the
    /// comparison is numeric.
    pub fn compare(&self, other: &Money) -> PricingResult<Ordering> {
        self.ensure_same_currency(other, "compare")?;
        Ok(self.amount.cmp(&other.amount))
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    fn derive(&self, amount: Decimal) -> Money {
        Money::from_parts(amount, self.currency.clone(), self.policy)
    }

    pub(crate) fn ensure_same_currency(&self, other: &Money, context: &str) -> PricingResult<()> {
        if self.currency != other.currency {
            return Err(PricingError::CurrencyMismatch {
                context: context.to_string(),
                expected: self.currency.to_string(),
                found: other.currency.to_string(),
            });
        }
        Ok(())
    }

    pub(crate) fn ensure_compatible(&self, other: &Money, context: &str) -> PricingResult<()> {
        self.ensure_same_currency(other, context)?;
        if self.policy != other.policy {
            return Err(PricingError::PolicyMismatch {
                context: context.to_string(),
                expected: self.policy.to_string(),
                found: other.policy.to_string(),
            });
        }
        Ok(())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as `"<amount> <currency>"`, e.g. `12.50 USD`.
///
/// ## Note
/// This is for logs and debugging. Localized formatting belongs to the UI.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

impl PartialEq for Money {
    fn eq(&self, other: &Self) -> bool {
        self.currency == other.currency && self.amount == other.amount
    }
}

impl Eq for Money {}

// =============================================================================
// Unit Tests
// =============================================================================
