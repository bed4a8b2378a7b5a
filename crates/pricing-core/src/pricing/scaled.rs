//! Base fee plus a per-unit rate.
//!
//! ```text
//! total = base + rate × quantity
//!
//! Fractional:  10.00 + 2.00 × 3.5 = 17.00
//! Integer:     10.00 + 2.00 × 3   = 16.00   (3.5 is rejected)
//! ```

use rust_decimal::Decimal;

use crate::error::PricingResult;
use crate::money::Money;
use crate::quote::{LineKind, PriceQuote, QuoteLine};
use crate::validation::{validate_non_negative, validate_quantity, validate_whole_quantity};

/// Base and per-unit rate shared by the two scaled strategies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaledPricing {
    base: Money,
    rate: Money,
}

impl ScaledPricing {
    /// ## Errors
    /// - `CurrencyMismatch` / `PolicyMismatch` when base and rate disagree
    /// - `MustBeNonNegative` (NEGATIVE_VALUE) for a negative base or rate
    pub fn new(base: Money, rate: Money) -> PricingResult<ScaledPricing> {
        base.ensure_compatible(&rate, "scaled pricing")?;
        validate_non_negative("base", base.amount())?;
        validate_non_negative("rate", rate.amount())?;
        Ok(ScaledPricing { base, rate })
    }

    #[inline]
    pub fn base(&self) -> &Money {
        &self.base
    }

    /// Per-unit rate (the scaling factor of the integer strategy).
    #[inline]
    pub fn rate(&self) -> &Money {
        &self.rate
    }

    /// `base + rate × quantity` with a fractional quantity.
    pub fn quote_fractional(&self, quantity: Decimal) -> PricingResult<PriceQuote> {
        validate_quantity(quantity)?;
        let per_unit = self.rate.multiply_by(quantity)?;
        self.assemble(quantity, per_unit)
    }

    /// `base + rate × quantity` with a whole quantity.
    pub fn quote_integer(&self, quantity: Decimal) -> PricingResult<PriceQuote> {
        let units = validate_whole_quantity(quantity)?;
        let per_unit = self.rate.multiply(units)?;
        self.assemble(quantity, per_unit)
    }

    pub fn adjusted_by(&self, factor: Decimal) -> PricingResult<ScaledPricing> {
        Ok(ScaledPricing {
            base: self.base.multiply_by(factor)?,
            rate: self.rate.multiply_by(factor)?,
        })
    }

    fn assemble(&self, quantity: Decimal, per_unit: Money) -> PricingResult<PriceQuote> {
        let total = self.base.add(&per_unit)?;
        let lines = vec![
            QuoteLine::flat(&self.base),
            QuoteLine::priced(LineKind::PerUnit, quantity, &self.rate, per_unit),
        ];
        Ok(PriceQuote::new(quantity, lines, total))
    }
}
