//! # Wire Shapes
//!
//! Flat, serializable forms of Money and of every pricing strategy, for APIs,
//! persistence layers and admin UIs (TypeScript bindings via ts-rs).
//!
//! ## Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PurchasePricing ──── From<&_> ────► PurchasePricingDto (JSON)          │
//! │        ▲                                     │                          │
//! │        └──── to_pricing(&PricingConfig) ◄────┘  re-validates everything │
//! │                                                                         │
//! │  {                                                                      │
//! │    "kind": "TIERED_GRAD_INT",                                          │
//! │    "currency": "USD",                                                  │
//! │    "isDiscrete": true,                                                 │
//! │    "tiers": [                                                          │
//! │      { "minQty": "0",  "maxQty": "10", "pricePerUnit": "1.00" },       │
//! │      { "minQty": "10",                 "pricePerUnit": "0.50" }        │
//! │    ]                                                                   │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Decimals travel as strings so no precision is lost in JSON numbers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::config::PricingConfig;
use crate::error::{PricingError, PricingResult, ValidationError};
use crate::money::{Money, MoneyPolicy};
use crate::pricing::{PricingKind, PurchasePricing};
use crate::tier::TierBucket;
use crate::types::{CurrencyCode, RoundingMode};

fn required<T>(value: Option<T>, field: &str) -> Result<T, ValidationError> {
    value.ok_or_else(|| ValidationError::Required {
        field: field.to_string(),
    })
}

// =============================================================================
// Money DTO
// =============================================================================

/// Serialized form of [`Money`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MoneyDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<String>")]
    pub amount: Option<Decimal>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rounding: Option<RoundingMode>,
}

impl From<Money> for MoneyDto {
    fn from(money: Money) -> Self {
        MoneyDto {
            amount: Some(money.amount()),
            currency: Some(money.currency().to_string()),
            scale: i32::try_from(money.scale()).ok(),
            rounding: Some(money.rounding()),
        }
    }
}

impl TryFrom<MoneyDto> for Money {
    type Error = PricingError;

    /// Missing scale / rounding fall back to the crate defaults.
    fn try_from(dto: MoneyDto) -> Result<Self, Self::Error> {
        let amount = required(dto.amount, "amount")?;
        let currency = CurrencyCode::parse(&required(dto.currency, "currency")?)?;
        let defaults = MoneyPolicy::standard();
        let policy = MoneyPolicy::new(
            dto.scale.map_or(i64::from(defaults.scale()), i64::from),
            dto.rounding.unwrap_or(defaults.rounding()),
        )?;
        Ok(Money::from_parts(amount, currency, policy))
    }
}

// =============================================================================
// Tier DTO
// =============================================================================

/// Serialized form of a [`TierBucket`]. Prices share the strategy currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TierDto {
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub min_qty: Option<Decimal>,

    /// Absent for the final, open-ended bucket.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<String>")]
    pub max_qty: Option<Decimal>,

    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub price_per_unit: Option<Decimal>,
}

impl From<&TierBucket> for TierDto {
    fn from(bucket: &TierBucket) -> Self {
        TierDto {
            min_qty: Some(bucket.min_qty()),
            max_qty: bucket.max_qty(),
            price_per_unit: Some(bucket.price_per_unit().amount()),
        }
    }
}

// =============================================================================
// Purchase Pricing DTO
// =============================================================================

/// Flattened strategy with a `kind` discriminator.
///
/// | kind                 | uses                          |
/// |----------------------|-------------------------------|
/// | `FIXED`              | `baseAmount` (the price)      |
/// | `NONE`               | `currency` only               |
/// | `SCALED_*`           | `baseAmount`, `rateAmount`    |
/// | `TIERED_*`           | `tiers`                       |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PurchasePricingDto {
    pub kind: PricingKind,

    #[serde(default)]
    pub currency: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<String>")]
    pub base_amount: Option<Decimal>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<String>")]
    pub rate_amount: Option<Decimal>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiers: Option<Vec<TierDto>>,

    /// Integer family flag; when present it must agree with `kind`.
    #[serde(default)]
    pub is_discrete: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rounding: Option<RoundingMode>,
}

impl PurchasePricingDto {
    /// Rebuilds and re-validates the strategy.
    ///
    /// ## Errors
    /// - `Required` (EXISTENCE) for a missing currency, amount, tier list or
    ///   tier field
    /// - `InvalidFormat` when `isDiscrete` contradicts `kind`
    /// - any construction error of the strategy itself
    ///
    /// ## Example
    /// ```rust
    /// use pricing_core::{PricingConfig, PurchasePricingDto};
    /// use rust_decimal_macros::dec;
    ///
    /// let dto: PurchasePricingDto = serde_json::from_str(r#"{
    ///     "kind": "SCALED_FRACT",
    ///     "currency": "USD",
    ///     "baseAmount": "10.00",
    ///     "rateAmount": "2.00"
    /// }"#).unwrap();
    ///
    /// let pricing = dto.to_pricing(&PricingConfig::default()).unwrap();
    /// assert_eq!(pricing.calculate(dec!(3.5)).unwrap().amount(), dec!(17.00));
    /// ```
    pub fn to_pricing(&self, config: &PricingConfig) -> PricingResult<PurchasePricing> {
        if let Some(discrete) = self.is_discrete {
            if discrete != self.kind.is_discrete() {
                return Err(ValidationError::InvalidFormat {
                    field: "isDiscrete".to_string(),
                    reason: format!("{} does not match kind {}", discrete, self.kind),
                }
                .into());
            }
        }

        let currency = CurrencyCode::parse(required(self.currency.as_deref(), "currency")?)?;
        let policy = MoneyPolicy::new(
            self.scale.map_or(config.default_scale, i64::from),
            self.rounding.unwrap_or(config.default_rounding),
        )?;
        let money = |amount: Decimal| Money::from_parts(amount, currency.clone(), policy);

        match self.kind {
            PricingKind::Fixed => {
                PurchasePricing::fixed(money(required(self.base_amount, "baseAmount")?))
            }
            PricingKind::None => Ok(PurchasePricing::none(currency.clone())),
            PricingKind::ScaledFractional => PurchasePricing::scaled_fractional(
                money(required(self.base_amount, "baseAmount")?),
                money(required(self.rate_amount, "rateAmount")?),
            ),
            PricingKind::ScaledInteger => PurchasePricing::scaled_integer(
                money(required(self.base_amount, "baseAmount")?),
                money(required(self.rate_amount, "rateAmount")?),
            ),
            PricingKind::TieredGraduatedFractional => {
                PurchasePricing::tiered_graduated_fractional(self.buckets(&money)?)
            }
            PricingKind::TieredGraduatedInteger => {
                PurchasePricing::tiered_graduated_integer(self.buckets(&money)?)
            }
            PricingKind::TieredVolumeFractional => {
                PurchasePricing::tiered_volume_fractional(self.buckets(&money)?)
            }
            PricingKind::TieredVolumeInteger => {
                PurchasePricing::tiered_volume_integer(self.buckets(&money)?)
            }
        }
    }

    fn buckets(&self, money: &impl Fn(Decimal) -> Money) -> PricingResult<Vec<TierBucket>> {
        required(self.tiers.as_ref(), "tiers")?
            .iter()
            .enumerate()
            .map(|(index, tier)| {
                let min_qty = required(tier.min_qty, &format!("tiers[{}].minQty", index))?;
                let price = required(tier.price_per_unit, &format!("tiers[{}].pricePerUnit", index))?;
                TierBucket::new(min_qty, tier.max_qty, money(price))
            })
            .collect()
    }
}

impl From<&PurchasePricing> for PurchasePricingDto {
    fn from(pricing: &PurchasePricing) -> Self {
        let mut dto = PurchasePricingDto {
            kind: pricing.kind(),
            currency: Some(pricing.currency().to_string()),
            base_amount: None,
            rate_amount: None,
            tiers: None,
            is_discrete: Some(pricing.is_discrete()),
            scale: None,
            rounding: None,
        };

        let policy = match pricing {
            PurchasePricing::Fixed(fixed) => {
                dto.base_amount = Some(fixed.price().amount());
                Some(fixed.price().policy())
            }
            PurchasePricing::None(_) => None,
            PurchasePricing::ScaledFractional(scaled) | PurchasePricing::ScaledInteger(scaled) => {
                dto.base_amount = Some(scaled.base().amount());
                dto.rate_amount = Some(scaled.rate().amount());
                Some(scaled.base().policy())
            }
            PurchasePricing::TieredGraduatedFractional(schedule)
            | PurchasePricing::TieredGraduatedInteger(schedule)
            | PurchasePricing::TieredVolumeFractional(schedule)
            | PurchasePricing::TieredVolumeInteger(schedule) => {
                dto.tiers = Some(schedule.buckets().iter().map(TierDto::from).collect());
                Some(schedule.policy())
            }
        };

        if let Some(policy) = policy {
            dto.scale = i32::try_from(policy.scale()).ok();
            dto.rounding = Some(policy.rounding());
        }
        dto
    }
}

impl TryFrom<PurchasePricingDto> for PurchasePricing {
    type Error = PricingError;

    /// Uses the default [`PricingConfig`].
    fn try_from(dto: PurchasePricingDto) -> Result<Self, Self::Error> {
        dto.to_pricing(&PricingConfig::default())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
