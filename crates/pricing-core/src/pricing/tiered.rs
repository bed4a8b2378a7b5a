//! # Tiered Pricing
//!
//! The two ways a tier schedule turns a quantity into a total.
//!
//! ```text
//! Buckets: [0,10) @ 1.00    [10,∞) @ 0.50         quantity = 15
//!
//! GRADUATED (staircase)                 VOLUME (bracket)
//! ─────────────────────                 ────────────────
//! first 10 units  × 1.00 = 10.00        15 falls in [10,∞)
//! next   5 units  × 0.50 =  2.50        15 units × 0.50 = 7.50
//! total                  = 12.50        total           = 7.50
//! ```
//!
//! The integer family bills whole units only: the quantity must be whole
//! and each graduated contribution must convert exactly to a whole count.

use rust_decimal::Decimal;
use tracing::trace;

use crate::error::{PricingError, PricingResult};
use crate::money::Money;
use crate::quote::{LineKind, PriceQuote, QuoteLine};
use crate::tier::{TierBucket, TierSchedule};
use crate::validation::{validate_quantity, validate_whole_number, validate_whole_quantity};

/// Whether quantities are billed as decimals or as whole units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Units {
    Fractional,
    Integer,
}

impl Units {
    fn check_quantity(self, quantity: Decimal) -> PricingResult<()> {
        match self {
            Units::Fractional => validate_quantity(quantity)?,
            Units::Integer => {
                validate_whole_quantity(quantity)?;
            }
        }
        Ok(())
    }

    fn charge(self, bucket: &TierBucket, index: usize, quantity: Decimal) -> PricingResult<Money> {
        match self {
            Units::Fractional => bucket.price_per_unit().multiply_by(quantity),
            Units::Integer => {
                let units = validate_whole_number(&format!("tier {} contribution", index), quantity)?;
                bucket.price_per_unit().multiply(units)
            }
        }
    }
}

/// Staircase pricing: each portion of the quantity is billed at the rate
/// of the bucket it falls into.
pub(crate) fn graduated_quote(
    schedule: &TierSchedule,
    quantity: Decimal,
    units: Units,
) -> PricingResult<PriceQuote> {
    units.check_quantity(quantity)?;

    let mut remaining = quantity;
    let mut total = Money::zero_with(schedule.currency(), schedule.policy());
    let mut lines = Vec::new();

    for (index, bucket) in schedule.buckets().iter().enumerate() {
        if remaining <= Decimal::ZERO {
            break;
        }

        let contribution = match bucket.width() {
            Some(width) => remaining.min(width),
            None => remaining,
        };
        let amount = units.charge(bucket, index, contribution)?;

        trace!(
            tier = index,
            contribution = %contribution,
            amount = %amount,
            "Graduated tier contribution"
        );

        total = total.add(&amount)?;
        lines.push(QuoteLine::priced(
            LineKind::Tier(index),
            contribution,
            bucket.price_per_unit(),
            amount,
        ));
        remaining -= contribution;
    }

    // Only reachable when the last bucket is bounded.
    if remaining > Decimal::ZERO {
        return Err(PricingError::NoTierMatched { quantity });
    }

    Ok(PriceQuote::new(quantity, lines, total))
}

/// Bracket pricing: the bucket holding the quantity prices all of it.
pub(crate) fn volume_quote(
    schedule: &TierSchedule,
    quantity: Decimal,
    units: Units,
) -> PricingResult<PriceQuote> {
    units.check_quantity(quantity)?;

    let (index, bucket) = schedule
        .bucket_for(quantity)
        .ok_or(PricingError::NoTierMatched { quantity })?;
    let amount = units.charge(bucket, index, quantity)?;

    trace!(tier = index, amount = %amount, "Volume tier matched");

    let line = QuoteLine::priced(
        LineKind::Tier(index),
        quantity,
        bucket.price_per_unit(),
        amount.clone(),
    );
    Ok(PriceQuote::new(quantity, vec![line], amount))
}
