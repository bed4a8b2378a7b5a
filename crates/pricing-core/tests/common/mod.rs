//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use pricing_core::{CurrencyCode, Money, PurchasePricing, TierBucket};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing_subscriber::EnvFilter;

/// Installs a test-writer subscriber once; later calls are no-ops.
///
/// Set `RUST_LOG=pricing_core=trace` to see every tier contribution.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

pub fn usd(amount: Decimal) -> Money {
    Money::new(amount, "USD").unwrap()
}

/// `[0,10) @ 1.00`, `[10,∞) @ 0.50`
pub fn two_tier_buckets() -> Vec<TierBucket> {
    vec![
        TierBucket::bounded(dec!(0), dec!(10), usd(dec!(1.00))).unwrap(),
        TierBucket::unbounded(dec!(10), usd(dec!(0.50))).unwrap(),
    ]
}

/// `[0,10) @ 2.00`, `[10,100) @ 1.50`, `[100,∞) @ 1.00`
pub fn three_tier_buckets() -> Vec<TierBucket> {
    vec![
        TierBucket::bounded(dec!(0), dec!(10), usd(dec!(2.00))).unwrap(),
        TierBucket::bounded(dec!(10), dec!(100), usd(dec!(1.50))).unwrap(),
        TierBucket::unbounded(dec!(100), usd(dec!(1.00))).unwrap(),
    ]
}

/// One instance of every strategy, all in USD.
pub fn all_strategies() -> Vec<PurchasePricing> {
    vec![
        PurchasePricing::fixed(usd(dec!(25.00))).unwrap(),
        PurchasePricing::none(CurrencyCode::parse("USD").unwrap()),
        PurchasePricing::scaled_fractional(usd(dec!(10.00)), usd(dec!(2.00))).unwrap(),
        PurchasePricing::scaled_integer(usd(dec!(10.00)), usd(dec!(2.00))).unwrap(),
        PurchasePricing::tiered_graduated_fractional(two_tier_buckets()).unwrap(),
        PurchasePricing::tiered_graduated_integer(two_tier_buckets()).unwrap(),
        PurchasePricing::tiered_volume_fractional(two_tier_buckets()).unwrap(),
        PurchasePricing::tiered_volume_integer(two_tier_buckets()).unwrap(),
    ]
}
