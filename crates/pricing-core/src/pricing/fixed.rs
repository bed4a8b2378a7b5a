//! Flat price regardless of quantity.

use rust_decimal::Decimal;

use crate::error::PricingResult;
use crate::money::Money;
use crate::quote::{PriceQuote, QuoteLine};
use crate::validation::{validate_non_negative, validate_quantity};

/// A single non-negative price charged for any quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedPricing {
    price: Money,
}

impl FixedPricing {
    /// ## Errors
    /// `MustBeNonNegative` (NEGATIVE_VALUE) for a negative price.
    pub fn new(price: Money) -> PricingResult<FixedPricing> {
        validate_non_negative("price", price.amount())?;
        Ok(FixedPricing { price })
    }

    #[inline]
    pub fn price(&self) -> &Money {
        &self.price
    }

    pub fn quote(&self, quantity: Decimal) -> PricingResult<PriceQuote> {
        validate_quantity(quantity)?;
        Ok(PriceQuote::new(
            quantity,
            vec![QuoteLine::flat(&self.price)],
            self.price.clone(),
        ))
    }

    pub fn adjusted_by(&self, factor: Decimal) -> PricingResult<FixedPricing> {
        Ok(FixedPricing {
            price: self.price.multiply_by(factor)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use rust_decimal_macros::dec;

    #[test]
    fn test_fixed_ignores_quantity() {
        let fixed = FixedPricing::new(Money::new(dec!(49.99), "USD").unwrap()).unwrap();
        for quantity in [dec!(0), dec!(1), dec!(2.5), dec!(10000)] {
            assert_eq!(fixed.quote(quantity).unwrap().total(), fixed.price());
        }
    }

    #[test]
    fn test_fixed_rejects_negative_price() {
        let err = FixedPricing::new(Money::new(dec!(-1), "USD").unwrap()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NegativeValue);
    }

    #[test]
    fn test_fixed_adjusted_by() {
        let fixed = FixedPricing::new(Money::new(dec!(20.00), "USD").unwrap()).unwrap();
        assert_eq!(fixed.adjusted_by(dec!(0.75)).unwrap().price().amount(), dec!(15.00));
    }
}
