//! # Simple Pricing Factory
//!
//! Callers that only ever deal in flat prices (catalog defaults, free
//! samples) depend on this narrow surface instead of the full strategy set.
//!
//! ```text
//! PurchasePricingFactory ──► SimplePurchasePricing { Fixed | None }
//!                                       │
//!                                       └── From ──► PurchasePricing
//! ```

use rust_decimal::Decimal;

use crate::error::PricingResult;
use crate::money::Money;
use crate::pricing::{FixedPricing, PurchasePricing};
use crate::quote::PriceQuote;
use crate::types::CurrencyCode;

// =============================================================================
// Simple Purchase Pricing
// =============================================================================

/// The two non-tiered, non-scaled strategies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimplePurchasePricing {
    Fixed(FixedPricing),
    None(CurrencyCode),
}

impl SimplePurchasePricing {
    pub fn calculate(&self, quantity: Decimal) -> PricingResult<Money> {
        self.quote(quantity).map(PriceQuote::into_total)
    }

    pub fn quote(&self, quantity: Decimal) -> PricingResult<PriceQuote> {
        PurchasePricing::from(self.clone()).quote(quantity)
    }

    pub fn adjusted_by(&self, factor: Decimal) -> PricingResult<SimplePurchasePricing> {
        match PurchasePricing::from(self.clone()).adjusted_by(factor)? {
            PurchasePricing::Fixed(fixed) => Ok(SimplePurchasePricing::Fixed(fixed)),
            _ => Ok(self.clone()),
        }
    }

    pub fn currency(&self) -> &CurrencyCode {
        match self {
            SimplePurchasePricing::Fixed(fixed) => fixed.price().currency(),
            SimplePurchasePricing::None(currency) => currency,
        }
    }
}

impl From<SimplePurchasePricing> for PurchasePricing {
    fn from(simple: SimplePurchasePricing) -> Self {
        match simple {
            SimplePurchasePricing::Fixed(fixed) => PurchasePricing::Fixed(fixed),
            SimplePurchasePricing::None(currency) => PurchasePricing::None(currency),
        }
    }
}

// =============================================================================
// Factory
// =============================================================================

/// Creational seam for the simple strategies.
pub trait PurchasePricingFactory {
    /// ## Errors
    /// `MustBeNonNegative` (NEGATIVE_VALUE) for a negative price.
    fn create_fixed_purchase(&self, price: Money) -> PricingResult<SimplePurchasePricing>;

    fn create_none_purchase(&self, currency: CurrencyCode) -> SimplePurchasePricing;
}

/// Factory producing the plain validated strategies.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPricingFactory;

impl PurchasePricingFactory for DefaultPricingFactory {
    fn create_fixed_purchase(&self, price: Money) -> PricingResult<SimplePurchasePricing> {
        Ok(SimplePurchasePricing::Fixed(FixedPricing::new(price)?))
    }

    fn create_none_purchase(&self, currency: CurrencyCode) -> SimplePurchasePricing {
        SimplePurchasePricing::None(currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::pricing::PricingKind;
    use rust_decimal_macros::dec;

    #[test]
    fn test_factory_creates_fixed() {
        let factory = DefaultPricingFactory;
        let price = Money::new(dec!(9.99), "USD").unwrap();
        let fixed = factory.create_fixed_purchase(price.clone()).unwrap();

        assert_eq!(fixed.calculate(dec!(7)).unwrap(), price);
        assert_eq!(PurchasePricing::from(fixed).kind(), PricingKind::Fixed);
    }

    #[test]
    fn test_factory_creates_none() {
        let factory = DefaultPricingFactory;
        let currency = CurrencyCode::parse("EUR").unwrap();
        let none = factory.create_none_purchase(currency.clone());

        assert!(none.calculate(dec!(3)).unwrap().is_zero());
        assert_eq!(none.currency(), &currency);
    }

    #[test]
    fn test_factory_rejects_negative_price() {
        let err = DefaultPricingFactory
            .create_fixed_purchase(Money::new(dec!(-5), "USD").unwrap())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NegativeValue);
    }

    #[test]
    fn test_simple_adjusted_by() {
        let fixed = DefaultPricingFactory
            .create_fixed_purchase(Money::new(dec!(10), "USD").unwrap())
            .unwrap();
        let marked_up = fixed.adjusted_by(dec!(1.25)).unwrap();
        assert_eq!(marked_up.calculate(dec!(1)).unwrap().amount(), dec!(12.50));

        let none = DefaultPricingFactory.create_none_purchase(CurrencyCode::parse("USD").unwrap());
        assert_eq!(none.adjusted_by(dec!(9)).unwrap(), none);
    }

    #[test]
    fn test_simple_rejects_negative_quantity() {
        let none = DefaultPricingFactory.create_none_purchase(CurrencyCode::parse("USD").unwrap());
        assert_eq!(
            none.calculate(dec!(-1)).unwrap_err().kind(),
            ErrorKind::NegativeValue
        );
    }
}
