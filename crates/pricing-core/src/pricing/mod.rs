//! # Purchase Pricing Strategies
//!
//! The closed set of strategies that map a quantity to a Money total.
//!
//! ## Strategy Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      PurchasePricing (8 variants)                       │
//! │                                                                         │
//! │  Simple                 Scaled                 Tiered                   │
//! │  ──────                 ──────                 ──────                   │
//! │  Fixed(price)           ScaledFractional       TieredGraduatedFractional│
//! │  None(currency)         ScaledInteger          TieredGraduatedInteger   │
//! │                         (base + rate × q)      TieredVolumeFractional   │
//! │                                                TieredVolumeInteger      │
//! │                                                                         │
//! │  calculate(q) ──► validate q ≥ 0 ──► match variant ──► Money            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every strategy is validated when it is built and never changes after
//! that, so a single instance can be shared freely across threads.

mod fixed;
mod scaled;
mod tiered;

pub use fixed::FixedPricing;
pub use scaled::ScaledPricing;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;
use ts_rs::TS;

use crate::error::PricingResult;
use crate::money::Money;
use crate::quote::PriceQuote;
use crate::tier::{TierBucket, TierSchedule};
use crate::types::CurrencyCode;
use crate::validation::{validate_factor, validate_quantity};
use tiered::{graduated_quote, volume_quote, Units};

// =============================================================================
// Pricing Kind
// =============================================================================

/// Discriminator of a strategy, as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PricingKind {
    #[serde(rename = "FIXED")]
    Fixed,
    #[serde(rename = "NONE")]
    None,
    #[serde(rename = "SCALED_FRACT")]
    ScaledFractional,
    #[serde(rename = "SCALED_INT")]
    ScaledInteger,
    #[serde(rename = "TIERED_GRAD_FRACT")]
    TieredGraduatedFractional,
    #[serde(rename = "TIERED_GRAD_INT")]
    TieredGraduatedInteger,
    #[serde(rename = "TIERED_VOL_FRACT")]
    TieredVolumeFractional,
    #[serde(rename = "TIERED_VOL_INT")]
    TieredVolumeInteger,
}

impl PricingKind {
    /// Every kind, in declaration order.
    pub const ALL: [PricingKind; 8] = [
        PricingKind::Fixed,
        PricingKind::None,
        PricingKind::ScaledFractional,
        PricingKind::ScaledInteger,
        PricingKind::TieredGraduatedFractional,
        PricingKind::TieredGraduatedInteger,
        PricingKind::TieredVolumeFractional,
        PricingKind::TieredVolumeInteger,
    ];

    /// True for the integer family (whole-unit quantities only).
    pub fn is_discrete(&self) -> bool {
        matches!(
            self,
            PricingKind::ScaledInteger
                | PricingKind::TieredGraduatedInteger
                | PricingKind::TieredVolumeInteger
        )
    }

    /// True for the four bucket-based strategies.
    pub fn is_tiered(&self) -> bool {
        matches!(
            self,
            PricingKind::TieredGraduatedFractional
                | PricingKind::TieredGraduatedInteger
                | PricingKind::TieredVolumeFractional
                | PricingKind::TieredVolumeInteger
        )
    }

    /// Wire code, e.g. `TIERED_GRAD_INT`.
    pub fn code(&self) -> &'static str {
        match self {
            PricingKind::Fixed => "FIXED",
            PricingKind::None => "NONE",
            PricingKind::ScaledFractional => "SCALED_FRACT",
            PricingKind::ScaledInteger => "SCALED_INT",
            PricingKind::TieredGraduatedFractional => "TIERED_GRAD_FRACT",
            PricingKind::TieredGraduatedInteger => "TIERED_GRAD_INT",
            PricingKind::TieredVolumeFractional => "TIERED_VOL_FRACT",
            PricingKind::TieredVolumeInteger => "TIERED_VOL_INT",
        }
    }
}

impl fmt::Display for PricingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// =============================================================================
// Purchase Pricing
// =============================================================================

/// A pricing strategy: one of eight closed variants.
///
/// Build variants through the associated constructors, which validate every
/// invariant up front. `calculate` never sees a partially valid strategy.
///
/// ## Example
/// ```rust
/// use pricing_core::{Money, PurchasePricing, TierBucket};
/// use rust_decimal_macros::dec;
///
/// let usd = |a| Money::new(a, "USD").unwrap();
/// let buckets = vec![
///     TierBucket::bounded(dec!(0), dec!(10), usd(dec!(1.00))).unwrap(),
///     TierBucket::unbounded(dec!(10), usd(dec!(0.50))).unwrap(),
/// ];
///
/// let graduated = PurchasePricing::tiered_graduated_fractional(buckets.clone()).unwrap();
/// let volume = PurchasePricing::tiered_volume_fractional(buckets).unwrap();
///
/// assert_eq!(graduated.calculate(dec!(15)).unwrap().amount(), dec!(12.50));
/// assert_eq!(volume.calculate(dec!(15)).unwrap().amount(), dec!(7.50));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchasePricing {
    /// One price for any quantity.
    Fixed(FixedPricing),
    /// Always free, in the given currency.
    None(CurrencyCode),
    /// `base + rate × q`, fractional `q`.
    ScaledFractional(ScaledPricing),
    /// `base + factor × q`, whole `q` only.
    ScaledInteger(ScaledPricing),
    /// Staircase over buckets, fractional quantities.
    TieredGraduatedFractional(TierSchedule),
    /// Staircase over buckets, whole units.
    TieredGraduatedInteger(TierSchedule),
    /// Bracket over buckets, fractional quantities.
    TieredVolumeFractional(TierSchedule),
    /// Bracket over buckets, whole units.
    TieredVolumeInteger(TierSchedule),
}

impl PurchasePricing {
    // -------------------------------------------------------------------------
    // Constructors
    // -------------------------------------------------------------------------

    pub fn fixed(price: Money) -> PricingResult<PurchasePricing> {
        let pricing = PurchasePricing::Fixed(FixedPricing::new(price)?);
        pricing.log_built();
        Ok(pricing)
    }

    pub fn none(currency: CurrencyCode) -> PurchasePricing {
        let pricing = PurchasePricing::None(currency);
        pricing.log_built();
        pricing
    }

    pub fn scaled_fractional(base: Money, rate: Money) -> PricingResult<PurchasePricing> {
        let pricing = PurchasePricing::ScaledFractional(ScaledPricing::new(base, rate)?);
        pricing.log_built();
        Ok(pricing)
    }

    pub fn scaled_integer(base: Money, scaling_factor: Money) -> PricingResult<PurchasePricing> {
        let pricing = PurchasePricing::ScaledInteger(ScaledPricing::new(base, scaling_factor)?);
        pricing.log_built();
        Ok(pricing)
    }

    pub fn tiered_graduated_fractional(
        buckets: impl IntoIterator<Item = TierBucket>,
    ) -> PricingResult<PurchasePricing> {
        let pricing = PurchasePricing::TieredGraduatedFractional(TierSchedule::new(buckets)?);
        pricing.log_built();
        Ok(pricing)
    }

    /// ## Errors
    /// Besides the schedule rules, every bucket boundary must be a whole
    /// number (`NotWholeNumber`, NON_INTEGER_QUANTITY).
    pub fn tiered_graduated_integer(
        buckets: impl IntoIterator<Item = TierBucket>,
    ) -> PricingResult<PurchasePricing> {
        let schedule = TierSchedule::new(buckets)?.require_whole_bounds()?;
        let pricing = PurchasePricing::TieredGraduatedInteger(schedule);
        pricing.log_built();
        Ok(pricing)
    }

    pub fn tiered_volume_fractional(
        buckets: impl IntoIterator<Item = TierBucket>,
    ) -> PricingResult<PurchasePricing> {
        let pricing = PurchasePricing::TieredVolumeFractional(TierSchedule::new(buckets)?);
        pricing.log_built();
        Ok(pricing)
    }

    /// ## Errors
    /// Same whole-number boundary rule as
    /// [`PurchasePricing::tiered_graduated_integer`].
    pub fn tiered_volume_integer(
        buckets: impl IntoIterator<Item = TierBucket>,
    ) -> PricingResult<PurchasePricing> {
        let schedule = TierSchedule::new(buckets)?.require_whole_bounds()?;
        let pricing = PurchasePricing::TieredVolumeInteger(schedule);
        pricing.log_built();
        Ok(pricing)
    }

    // -------------------------------------------------------------------------
    // Calculation
    // -------------------------------------------------------------------------

    /// Prices `quantity` units.
    ///
    /// ## Errors
    /// - `MustBeNonNegative` (NEGATIVE_VALUE) for any negative quantity
    /// - `NotWholeNumber` (NON_INTEGER_QUANTITY) in the integer family
    /// - `NoTierMatched` when a bounded schedule does not reach `quantity`
    pub fn calculate(&self, quantity: Decimal) -> PricingResult<Money> {
        self.quote(quantity).map(PriceQuote::into_total)
    }

    /// Prices `quantity` units and keeps the line breakdown.
    pub fn quote(&self, quantity: Decimal) -> PricingResult<PriceQuote> {
        let quote = match self {
            PurchasePricing::Fixed(fixed) => fixed.quote(quantity)?,
            PurchasePricing::None(currency) => {
                validate_quantity(quantity)?;
                PriceQuote::new(quantity, Vec::new(), Money::zero(currency))
            }
            PurchasePricing::ScaledFractional(scaled) => scaled.quote_fractional(quantity)?,
            PurchasePricing::ScaledInteger(scaled) => scaled.quote_integer(quantity)?,
            PurchasePricing::TieredGraduatedFractional(schedule) => {
                graduated_quote(schedule, quantity, Units::Fractional)?
            }
            PurchasePricing::TieredGraduatedInteger(schedule) => {
                graduated_quote(schedule, quantity, Units::Integer)?
            }
            PurchasePricing::TieredVolumeFractional(schedule) => {
                volume_quote(schedule, quantity, Units::Fractional)?
            }
            PurchasePricing::TieredVolumeInteger(schedule) => {
                volume_quote(schedule, quantity, Units::Integer)?
            }
        };

        debug!(
            kind = %self.kind(),
            quantity = %quantity,
            total = %quote.total(),
            "Priced purchase"
        );

        Ok(quote)
    }

    /// Returns a new strategy with every monetary component multiplied by
    /// `factor` (1.10 = 10% markup, 0.80 = 20% markdown).
    ///
    /// `None` stays `None`: zero scaled by anything is still zero.
    ///
    /// ## Errors
    /// `MustBeNonNegative` (NEGATIVE_VALUE) for a negative factor.
    pub fn adjusted_by(&self, factor: Decimal) -> PricingResult<PurchasePricing> {
        validate_factor(factor)?;
        Ok(match self {
            PurchasePricing::Fixed(fixed) => PurchasePricing::Fixed(fixed.adjusted_by(factor)?),
            PurchasePricing::None(_) => self.clone(),
            PurchasePricing::ScaledFractional(scaled) => {
                PurchasePricing::ScaledFractional(scaled.adjusted_by(factor)?)
            }
            PurchasePricing::ScaledInteger(scaled) => {
                PurchasePricing::ScaledInteger(scaled.adjusted_by(factor)?)
            }
            PurchasePricing::TieredGraduatedFractional(schedule) => {
                PurchasePricing::TieredGraduatedFractional(schedule.adjusted_by(factor)?)
            }
            PurchasePricing::TieredGraduatedInteger(schedule) => {
                PurchasePricing::TieredGraduatedInteger(schedule.adjusted_by(factor)?)
            }
            PurchasePricing::TieredVolumeFractional(schedule) => {
                PurchasePricing::TieredVolumeFractional(schedule.adjusted_by(factor)?)
            }
            PurchasePricing::TieredVolumeInteger(schedule) => {
                PurchasePricing::TieredVolumeInteger(schedule.adjusted_by(factor)?)
            }
        })
    }

    // -------------------------------------------------------------------------
    // Introspection
    // -------------------------------------------------------------------------

    pub fn kind(&self) -> PricingKind {
        match self {
            PurchasePricing::Fixed(_) => PricingKind::Fixed,
            PurchasePricing::None(_) => PricingKind::None,
            PurchasePricing::ScaledFractional(_) => PricingKind::ScaledFractional,
            PurchasePricing::ScaledInteger(_) => PricingKind::ScaledInteger,
            PurchasePricing::TieredGraduatedFractional(_) => PricingKind::TieredGraduatedFractional,
            PurchasePricing::TieredGraduatedInteger(_) => PricingKind::TieredGraduatedInteger,
            PurchasePricing::TieredVolumeFractional(_) => PricingKind::TieredVolumeFractional,
            PurchasePricing::TieredVolumeInteger(_) => PricingKind::TieredVolumeInteger,
        }
    }

    /// Currency every total of this strategy is expressed in.
    pub fn currency(&self) -> &CurrencyCode {
        match self {
            PurchasePricing::Fixed(fixed) => fixed.price().currency(),
            PurchasePricing::None(currency) => currency,
            PurchasePricing::ScaledFractional(scaled) | PurchasePricing::ScaledInteger(scaled) => {
                scaled.base().currency()
            }
            PurchasePricing::TieredGraduatedFractional(schedule)
            | PurchasePricing::TieredGraduatedInteger(schedule)
            | PurchasePricing::TieredVolumeFractional(schedule)
            | PurchasePricing::TieredVolumeInteger(schedule) => schedule.currency(),
        }
    }

    #[inline]
    pub fn is_discrete(&self) -> bool {
        self.kind().is_discrete()
    }

    /// Bucket list of a tiered strategy, ascending by `min_qty`.
    pub fn buckets(&self) -> Option<&[TierBucket]> {
        match self {
            PurchasePricing::TieredGraduatedFractional(schedule)
            | PurchasePricing::TieredGraduatedInteger(schedule)
            | PurchasePricing::TieredVolumeFractional(schedule)
            | PurchasePricing::TieredVolumeInteger(schedule) => Some(schedule.buckets()),
            _ => None,
        }
    }

    fn log_built(&self) {
        debug!(
            kind = %self.kind(),
            currency = %self.currency(),
            buckets = self.buckets().map_or(0, <[TierBucket]>::len),
            "Purchase pricing built"
        );
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
