//! Property tests for pricing invariants.

mod common;

use common::usd;
use pricing_core::{CurrencyCode, PurchasePricing, TierBucket};
use proptest::prelude::*;
use rust_decimal::Decimal;

// =============================================================================
// Strategies
// =============================================================================

/// Whole quantities from 0 to 10 000.
fn quantity() -> impl Strategy<Value = Decimal> {
    (0u32..=10_000).prop_map(Decimal::from)
}

/// Quantities with up to three fractional digits.
fn fractional_quantity() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000_000).prop_map(|milli| Decimal::new(milli, 3))
}

/// Prices in cents from 0.00 to 1 000.00.
fn price() -> impl Strategy<Value = Decimal> {
    (0i64..=100_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// A contiguous schedule from 0 whose unit price never rises.
///
/// Widths are whole, so the same buckets serve the integer variants.
fn decreasing_schedule() -> impl Strategy<Value = Vec<TierBucket>> {
    (
        prop::collection::vec(1u32..=50, 0..5),
        prop::collection::vec(0i64..=10_000, 1..=6),
    )
        .prop_map(|(widths, mut cents)| {
            cents.sort_unstable_by(|a, b| b.cmp(a));
            let mut buckets = Vec::new();
            let mut floor = Decimal::ZERO;

            for (width, unit) in widths.iter().zip(&cents) {
                let ceiling = floor + Decimal::from(*width);
                buckets.push(TierBucket::bounded(floor, ceiling, usd(Decimal::new(*unit, 2))).unwrap());
                floor = ceiling;
            }

            let last = cents[widths.len().min(cents.len() - 1)];
            buckets.push(TierBucket::unbounded(floor, usd(Decimal::new(last, 2))).unwrap());
            buckets
        })
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_fixed_ignores_quantity(amount in price(), q in fractional_quantity()) {
        let fixed = PurchasePricing::fixed(usd(amount)).unwrap();
        prop_assert_eq!(fixed.calculate(q).unwrap(), usd(amount));
    }

    #[test]
    fn prop_none_is_always_zero(q in fractional_quantity()) {
        let none = PurchasePricing::none(CurrencyCode::parse("USD").unwrap());
        prop_assert!(none.calculate(q).unwrap().is_zero());
    }

    #[test]
    fn prop_scaled_is_affine(base in price(), rate in price(), q in quantity()) {
        let scaled = PurchasePricing::scaled_integer(usd(base), usd(rate)).unwrap();
        prop_assert_eq!(scaled.calculate(q).unwrap().amount(), base + rate * q);
    }

    #[test]
    fn prop_bucket_order_is_irrelevant(buckets in decreasing_schedule(), q in fractional_quantity()) {
        let mut reversed = buckets.clone();
        reversed.reverse();

        let graduated = PurchasePricing::tiered_graduated_fractional(buckets.clone()).unwrap();
        let graduated_rev = PurchasePricing::tiered_graduated_fractional(reversed.clone()).unwrap();
        prop_assert_eq!(graduated.calculate(q).unwrap(), graduated_rev.calculate(q).unwrap());

        let volume = PurchasePricing::tiered_volume_fractional(buckets).unwrap();
        let volume_rev = PurchasePricing::tiered_volume_fractional(reversed).unwrap();
        prop_assert_eq!(volume.calculate(q).unwrap(), volume_rev.calculate(q).unwrap());
    }

    #[test]
    fn prop_graduated_never_below_volume(buckets in decreasing_schedule(), q in quantity()) {
        let graduated = PurchasePricing::tiered_graduated_integer(buckets.clone()).unwrap();
        let volume = PurchasePricing::tiered_volume_integer(buckets).unwrap();

        let g = graduated.calculate(q).unwrap();
        let v = volume.calculate(q).unwrap();
        prop_assert!(g.amount() >= v.amount(), "graduated {} < volume {}", g, v);
    }

    #[test]
    fn prop_calculate_matches_quote_total(buckets in decreasing_schedule(), q in quantity()) {
        let graduated = PurchasePricing::tiered_graduated_integer(buckets).unwrap();
        let quote = graduated.quote(q).unwrap();

        let summed = quote
            .lines()
            .iter()
            .try_fold(usd(Decimal::ZERO), |acc, line| acc.add(&line.amount))
            .unwrap();
        prop_assert_eq!(&summed, quote.total());
        prop_assert_eq!(graduated.calculate(q).unwrap(), summed);
    }

    #[test]
    fn prop_negative_quantity_always_rejected(milli in 1i64..=10_000_000, buckets in decreasing_schedule()) {
        let q = Decimal::new(-milli, 3);
        prop_assert!(PurchasePricing::tiered_graduated_fractional(buckets.clone()).unwrap().calculate(q).is_err());
        prop_assert!(PurchasePricing::tiered_volume_fractional(buckets).unwrap().calculate(q).is_err());
    }
}
