//! # Price Quotes
//!
//! A quote is the audited form of `calculate()`: the total plus the lines
//! that produced it.
//!
//! ```text
//! Graduated, 15 units over [0,10) @ 1.00 and [10,∞) @ 0.50
//!
//!   kind      quantity   unit_price   amount
//!   tier 0        10       1.00 USD   10.00 USD
//!   tier 1         5       0.50 USD    2.50 USD
//!   ─────────────────────────────────────────
//!   total                             12.50 USD
//! ```

use rust_decimal::Decimal;
use serde::Serialize;

use crate::money::Money;

/// What a quote line charges for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "index", rename_all = "snake_case")]
pub enum LineKind {
    /// A flat charge independent of quantity (fixed price, scaled base).
    Flat,
    /// The per-unit part of a scaled strategy.
    PerUnit,
    /// The portion billed in the bucket at this index.
    Tier(usize),
}

/// One priced component of a quote.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteLine {
    pub kind: LineKind,
    pub quantity: Decimal,
    pub unit_price: Money,
    pub amount: Money,
}

impl QuoteLine {
    pub(crate) fn flat(price: &Money) -> QuoteLine {
        QuoteLine {
            kind: LineKind::Flat,
            quantity: Decimal::ONE,
            unit_price: price.clone(),
            amount: price.clone(),
        }
    }

    pub(crate) fn priced(kind: LineKind, quantity: Decimal, unit_price: &Money, amount: Money) -> QuoteLine {
        QuoteLine {
            kind,
            quantity,
            unit_price: unit_price.clone(),
            amount,
        }
    }
}

/// The result of pricing one purchase.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    quantity: Decimal,
    lines: Vec<QuoteLine>,
    total: Money,
}

impl PriceQuote {
    pub(crate) fn new(quantity: Decimal, lines: Vec<QuoteLine>, total: Money) -> PriceQuote {
        PriceQuote {
            quantity,
            lines,
            total,
        }
    }

    #[inline]
    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    #[inline]
    pub fn lines(&self) -> &[QuoteLine] {
        &self.lines
    }

    #[inline]
    pub fn total(&self) -> &Money {
        &self.total
    }

    /// Consumes the quote, keeping only the total.
    pub fn into_total(self) -> Money {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_quote_serializes_lines() {
        let price = Money::new(dec!(4.00), "USD").unwrap();
        let quote = PriceQuote::new(
            dec!(2),
            vec![
                QuoteLine::flat(&price),
                QuoteLine::priced(LineKind::Tier(1), dec!(2), &price, price.multiply(2).unwrap()),
            ],
            Money::new(dec!(12.00), "USD").unwrap(),
        );

        let json = serde_json::to_value(&quote).unwrap();
        assert_eq!(json["lines"][0]["kind"]["type"], "flat");
        assert_eq!(json["lines"][1]["kind"]["type"], "tier");
        assert_eq!(json["lines"][1]["kind"]["index"], 1);
        assert_eq!(json["lines"][1]["unitPrice"]["amount"], "4.00");
        assert_eq!(json["total"]["amount"], "12.00");
        assert_eq!(quote.into_total().amount(), dec!(12.00));
    }
}
