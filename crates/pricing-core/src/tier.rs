//! # Tier Buckets
//!
//! Priced quantity ranges shared by every tiered strategy.
//!
//! ## Bucket Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  quantity:  0 ─────── 10 ─────────── 50 ───────────────────────► ∞     │
//! │             │ bucket 0 │   bucket 1   │        bucket 2 (open)          │
//! │             │ $1.00/u  │   $0.80/u    │        $0.50/u                  │
//! │             [0, 10)    [10, 50)       [50, ∞)                           │
//! │                                                                         │
//! │  Rules enforced by TierSchedule::new:                                  │
//! │  • at least one bucket                                                 │
//! │  • one currency and one money policy for every price                   │
//! │  • sorted ascending by min_qty (input order does not matter)           │
//! │  • first bucket starts at 0, no gaps, no overlaps                      │
//! │  • only the last bucket may be unbounded                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{PricingError, PricingResult, ValidationError};
use crate::money::{Money, MoneyPolicy};
use crate::types::CurrencyCode;
use crate::validation::{validate_factor, validate_non_negative, validate_whole_number};

// =============================================================================
// Tier Bucket
// =============================================================================

/// A priced quantity sub-range `[min_qty, max_qty)`.
///
/// `max_qty = None` marks the final, open-ended bucket.
///
/// ## Example
/// ```rust
/// use pricing_core::{Money, TierBucket};
/// use rust_decimal_macros::dec;
///
/// let price = Money::new(dec!(0.50), "USD").unwrap();
/// let bucket = TierBucket::bounded(dec!(10), dec!(20), price).unwrap();
/// assert!(bucket.contains(dec!(10)));
/// assert!(!bucket.contains(dec!(20)));
/// assert_eq!(bucket.width(), Some(dec!(10)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierBucket {
    min_qty: Decimal,
    max_qty: Option<Decimal>,
    price_per_unit: Money,
}

impl TierBucket {
    /// Creates a bucket.
    ///
    /// ## Errors
    /// - `MustBeNonNegative` for a negative `min_qty` or price
    /// - `OutOfRange` when a bounded `max_qty` is not above `min_qty`
    pub fn new(
        min_qty: Decimal,
        max_qty: Option<Decimal>,
        price_per_unit: Money,
    ) -> PricingResult<TierBucket> {
        validate_non_negative("min_qty", min_qty)?;
        validate_non_negative("price_per_unit", price_per_unit.amount())?;

        if let Some(max) = max_qty {
            if max <= min_qty {
                return Err(ValidationError::OutOfRange {
                    field: "max_qty".to_string(),
                    reason: format!("{} must be greater than min_qty {}", max, min_qty),
                }
                .into());
            }
        }

        Ok(TierBucket {
            min_qty,
            max_qty,
            price_per_unit,
        })
    }

    /// Creates a bucket covering `[min_qty, max_qty)`.
    pub fn bounded(
        min_qty: Decimal,
        max_qty: Decimal,
        price_per_unit: Money,
    ) -> PricingResult<TierBucket> {
        TierBucket::new(min_qty, Some(max_qty), price_per_unit)
    }

    /// Creates the open-ended bucket covering `[min_qty, ∞)`.
    pub fn unbounded(min_qty: Decimal, price_per_unit: Money) -> PricingResult<TierBucket> {
        TierBucket::new(min_qty, None, price_per_unit)
    }

    #[inline]
    pub fn min_qty(&self) -> Decimal {
        self.min_qty
    }

    #[inline]
    pub fn max_qty(&self) -> Option<Decimal> {
        self.max_qty
    }

    #[inline]
    pub fn price_per_unit(&self) -> &Money {
        &self.price_per_unit
    }

    #[inline]
    pub fn is_unbounded(&self) -> bool {
        self.max_qty.is_none()
    }

    /// Capacity of the bucket, `None` when unbounded.
    pub fn width(&self) -> Option<Decimal> {
        self.max_qty.map(|max| max - self.min_qty)
    }

    /// Half-open membership test: `min_qty <= quantity < max_qty`.
    pub fn contains(&self, quantity: Decimal) -> bool {
        quantity >= self.min_qty && self.max_qty.map_or(true, |max| quantity < max)
    }

    fn adjusted_by(&self, factor: Decimal) -> PricingResult<TierBucket> {
        Ok(TierBucket {
            min_qty: self.min_qty,
            max_qty: self.max_qty,
            price_per_unit: self.price_per_unit.multiply_by(factor)?,
        })
    }
}

// =============================================================================
// Tier Schedule
// =============================================================================

/// A validated, owned, ascending list of buckets.
///
/// The schedule owns its buckets: callers hand them over (or a copy of them)
/// and cannot reach the stored list afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierSchedule {
    buckets: Vec<TierBucket>,
}

impl TierSchedule {
    /// Validates and sorts a bucket list.
    ///
    /// ## Errors
    /// - `EmptyCollection` for zero buckets
    /// - `CurrencyMismatch` / `PolicyMismatch` naming the offending bucket
    ///   (by its position in the input)
    /// - `NonContiguousTiers` for a gap, an overlap, or a first bucket that
    ///   does not start at 0
    /// - `OutOfRange` when an unbounded bucket is not the last one
    pub fn new(buckets: impl IntoIterator<Item = TierBucket>) -> PricingResult<TierSchedule> {
        let mut buckets: Vec<TierBucket> = buckets.into_iter().collect();

        let first = buckets.first().ok_or_else(|| PricingError::EmptyCollection {
            field: "buckets".to_string(),
        })?;

        let reference = first.price_per_unit.clone();
        for (index, bucket) in buckets.iter().enumerate().skip(1) {
            reference.ensure_compatible(&bucket.price_per_unit, &format!("tier bucket {}", index))?;
        }

        buckets.sort_by(|a, b| a.min_qty.cmp(&b.min_qty));

        let mut expected_min = Decimal::ZERO;
        let last = buckets.len() - 1;
        for (index, bucket) in buckets.iter().enumerate() {
            if bucket.min_qty != expected_min {
                return Err(PricingError::NonContiguousTiers {
                    index,
                    expected: expected_min,
                    found: bucket.min_qty,
                });
            }
            match bucket.max_qty {
                Some(max) => expected_min = max,
                None if index != last => {
                    return Err(ValidationError::OutOfRange {
                        field: format!("tier bucket {} max_qty", index),
                        reason: "only the final bucket may be unbounded".to_string(),
                    }
                    .into());
                }
                None => {}
            }
        }

        debug!(
            buckets = buckets.len(),
            currency = %reference.currency(),
            open_ended = buckets[last].is_unbounded(),
            "Tier schedule validated"
        );

        Ok(TierSchedule { buckets })
    }

    /// Additionally requires whole-number boundaries (integer strategies).
    ///
    /// With whole boundaries every graduated contribution of a whole
    /// quantity is whole too.
    pub(crate) fn require_whole_bounds(self) -> PricingResult<TierSchedule> {
        for (index, bucket) in self.buckets.iter().enumerate() {
            validate_whole_number(&format!("tier bucket {} min_qty", index), bucket.min_qty)?;
            if let Some(max) = bucket.max_qty {
                validate_whole_number(&format!("tier bucket {} max_qty", index), max)?;
            }
        }
        Ok(self)
    }

    /// Buckets in ascending `min_qty` order.
    #[inline]
    pub fn buckets(&self) -> &[TierBucket] {
        &self.buckets
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Always false; an empty schedule cannot be built.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Currency shared by every bucket.
    pub fn currency(&self) -> &CurrencyCode {
        self.buckets[0].price_per_unit.currency()
    }

    /// Money policy shared by every bucket.
    pub fn policy(&self) -> MoneyPolicy {
        self.buckets[0].price_per_unit.policy()
    }

    /// Upper bound of the whole schedule, `None` when open-ended.
    pub fn ceiling(&self) -> Option<Decimal> {
        self.buckets[self.buckets.len() - 1].max_qty
    }

    /// Finds the bucket whose `[min, max)` range holds `quantity`.
    pub fn bucket_for(&self, quantity: Decimal) -> Option<(usize, &TierBucket)> {
        self.buckets
            .iter()
            .enumerate()
            .find(|(_, bucket)| bucket.contains(quantity))
    }

    /// Multiplies every price by `factor`, keeping the boundaries.
    pub fn adjusted_by(&self, factor: Decimal) -> PricingResult<TierSchedule> {
        validate_factor(factor)?;
        let buckets = self
            .buckets
            .iter()
            .map(|bucket| bucket.adjusted_by(factor))
            .collect::<PricingResult<Vec<_>>>()?;
        Ok(TierSchedule { buckets })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::types::RoundingMode;
    use rust_decimal_macros::dec;

    fn usd(amount: Decimal) -> Money {
        Money::new(amount, "USD").unwrap()
    }

    fn standard_buckets() -> Vec<TierBucket> {
        vec![
            TierBucket::bounded(dec!(0), dec!(10), usd(dec!(1.00))).unwrap(),
            TierBucket::bounded(dec!(10), dec!(50), usd(dec!(0.80))).unwrap(),
            TierBucket::unbounded(dec!(50), usd(dec!(0.50))).unwrap(),
        ]
    }

    #[test]
    fn test_bucket_rejects_bad_bounds() {
        let err = TierBucket::bounded(dec!(10), dec!(10), usd(dec!(1))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);

        let err = TierBucket::unbounded(dec!(-1), usd(dec!(1))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NegativeValue);

        let err = TierBucket::unbounded(dec!(0), usd(dec!(-1))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NegativeValue);
    }

    #[test]
    fn test_bucket_contains_is_half_open() {
        let bucket = TierBucket::bounded(dec!(10), dec!(50), usd(dec!(1))).unwrap();
        assert!(!bucket.contains(dec!(9.99)));
        assert!(bucket.contains(dec!(10)));
        assert!(bucket.contains(dec!(49.999)));
        assert!(!bucket.contains(dec!(50)));

        let open = TierBucket::unbounded(dec!(50), usd(dec!(1))).unwrap();
        assert!(open.contains(dec!(1000000)));
        assert_eq!(open.width(), None);
    }

    #[test]
    fn test_schedule_sorts_input() {
        let mut reversed = standard_buckets();
        reversed.reverse();
        let schedule = TierSchedule::new(reversed).unwrap();

        let mins: Vec<Decimal> = schedule.buckets().iter().map(|b| b.min_qty()).collect();
        assert_eq!(mins, vec![dec!(0), dec!(10), dec!(50)]);
        assert_eq!(schedule, TierSchedule::new(standard_buckets()).unwrap());
    }

    #[test]
    fn test_schedule_rejects_empty() {
        let err = TierSchedule::new(Vec::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyCollection);
    }

    #[test]
    fn test_schedule_names_offending_currency() {
        let buckets = vec![
            TierBucket::bounded(dec!(0), dec!(10), usd(dec!(1))).unwrap(),
            TierBucket::unbounded(dec!(10), Money::new(dec!(1), "EUR").unwrap()).unwrap(),
        ];
        let err = TierSchedule::new(buckets).unwrap_err();
        match err {
            PricingError::CurrencyMismatch { context, found, .. } => {
                assert_eq!(context, "tier bucket 1");
                assert_eq!(found, "EUR");
            }
            other => panic!("Expected CurrencyMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_schedule_rejects_mixed_policies() {
        let fine = Money::with_scale(dec!(1), "USD", 4, RoundingMode::HalfUp).unwrap();
        let buckets = vec![
            TierBucket::bounded(dec!(0), dec!(10), usd(dec!(1))).unwrap(),
            TierBucket::unbounded(dec!(10), fine).unwrap(),
        ];
        let err = TierSchedule::new(buckets).unwrap_err();
        assert!(matches!(err, PricingError::PolicyMismatch { .. }));
    }

    #[test]
    fn test_schedule_rejects_gap_overlap_and_offset_start() {
        let gap = vec![
            TierBucket::bounded(dec!(0), dec!(10), usd(dec!(1))).unwrap(),
            TierBucket::unbounded(dec!(12), usd(dec!(1))).unwrap(),
        ];
        assert_eq!(
            TierSchedule::new(gap).unwrap_err(),
            PricingError::NonContiguousTiers {
                index: 1,
                expected: dec!(10),
                found: dec!(12),
            }
        );

        let overlap = vec![
            TierBucket::bounded(dec!(0), dec!(10), usd(dec!(1))).unwrap(),
            TierBucket::unbounded(dec!(8), usd(dec!(1))).unwrap(),
        ];
        assert!(matches!(
            TierSchedule::new(overlap).unwrap_err(),
            PricingError::NonContiguousTiers { index: 1, .. }
        ));

        let offset = vec![TierBucket::unbounded(dec!(5), usd(dec!(1))).unwrap()];
        assert!(matches!(
            TierSchedule::new(offset).unwrap_err(),
            PricingError::NonContiguousTiers { index: 0, .. }
        ));
    }

    #[test]
    fn test_schedule_rejects_unbounded_before_last() {
        let buckets = vec![
            TierBucket::unbounded(dec!(0), usd(dec!(1))).unwrap(),
            TierBucket::unbounded(dec!(0), usd(dec!(2))).unwrap(),
        ];
        let err = TierSchedule::new(buckets).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
    }

    #[test]
    fn test_bounded_schedule_has_ceiling() {
        let buckets = vec![
            TierBucket::bounded(dec!(0), dec!(10), usd(dec!(1))).unwrap(),
            TierBucket::bounded(dec!(10), dec!(100), usd(dec!(0.9))).unwrap(),
        ];
        let schedule = TierSchedule::new(buckets).unwrap();
        assert_eq!(schedule.ceiling(), Some(dec!(100)));
        assert!(schedule.bucket_for(dec!(100)).is_none());
        assert_eq!(schedule.bucket_for(dec!(99.5)).map(|(i, _)| i), Some(1));
    }

    #[test]
    fn test_require_whole_bounds() {
        let fractional = vec![
            TierBucket::bounded(dec!(0), dec!(2.5), usd(dec!(1))).unwrap(),
            TierBucket::unbounded(dec!(2.5), usd(dec!(1))).unwrap(),
        ];
        let err = TierSchedule::new(fractional)
            .unwrap()
            .require_whole_bounds()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NonIntegerQuantity);

        assert!(TierSchedule::new(standard_buckets())
            .unwrap()
            .require_whole_bounds()
            .is_ok());
    }

    #[test]
    fn test_adjusted_by_scales_prices_only() {
        let schedule = TierSchedule::new(standard_buckets()).unwrap();
        let marked_up = schedule.adjusted_by(dec!(1.10)).unwrap();

        assert_eq!(marked_up.buckets()[0].price_per_unit().amount(), dec!(1.10));
        assert_eq!(marked_up.buckets()[1].price_per_unit().amount(), dec!(0.88));
        assert_eq!(marked_up.buckets()[2].price_per_unit().amount(), dec!(0.55));
        assert_eq!(marked_up.buckets()[1].max_qty(), Some(dec!(50)));

        assert_eq!(
            schedule.adjusted_by(dec!(-1)).unwrap_err().kind(),
            ErrorKind::NegativeValue
        );
    }
}
