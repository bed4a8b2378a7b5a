//! # pricing-core: Purchase Pricing Calculation Engine
//!
//! Given a pricing strategy and a purchase quantity, compute an exact
//! monetary total. Pure functions only, zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Purchase Pricing Flow                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │         Callers (catalog, checkout, price-list admin)           │   │
//! │  │   build a strategy once ──► call calculate(quantity) often      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ pricing-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │   tier    │  │  pricing  │  │   wire    │  │   │
//! │  │   │   Money   │  │  Bucket   │  │ 8 variants│  │   DTOs    │  │   │
//! │  │   │  Policy   │  │ Schedule  │  │   quote   │  │  ts-rs    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FLOATS • IMMUTABLE VALUES                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Decimal Money with explicit scale and rounding
//! - [`types`] - Currency codes and rounding modes
//! - [`tier`] - Tier buckets and validated schedules
//! - [`pricing`] - The eight purchase pricing strategies
//! - [`quote`] - Line-by-line breakdown of a calculation
//! - [`factory`] - Narrow factory for the simple strategies
//! - [`wire`] - Serializable shapes with TypeScript bindings
//! - [`config`] - Engine defaults
//! - [`error`] - Error types and the error-kind taxonomy
//! - [`validation`] - Shared input checks
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same strategy + same quantity = same Money, always
//! 2. **Decimal Money**: `rust_decimal` everywhere, floats never touch amounts
//! 3. **Fail Fast**: strategies are validated at construction, not at use
//! 4. **Explicit Errors**: every failure is typed, never a panic
//!
//! ## Example Usage
//!
//! ```rust
//! use pricing_core::{Money, PurchasePricing};
//! use rust_decimal_macros::dec;
//!
//! let base = Money::new(dec!(10.00), "USD").unwrap();
//! let rate = Money::new(dec!(2.00), "USD").unwrap();
//! let metered = PurchasePricing::scaled_fractional(base, rate).unwrap();
//!
//! // 10.00 + 2.00 × 3.5
//! assert_eq!(metered.calculate(dec!(3.5)).unwrap().amount(), dec!(17.00));
//! assert!(metered.calculate(dec!(-1)).is_err());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod factory;
pub mod money;
pub mod pricing;
pub mod quote;
pub mod tier;
pub mod types;
pub mod validation;
pub mod wire;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use config::PricingConfig;
pub use error::{ErrorKind, PricingError, PricingResult, ValidationError};
pub use factory::{DefaultPricingFactory, PurchasePricingFactory, SimplePurchasePricing};
pub use money::{Money, MoneyPolicy};
pub use pricing::{FixedPricing, PricingKind, PurchasePricing, ScaledPricing};
pub use quote::{LineKind, PriceQuote, QuoteLine};
pub use tier::{TierBucket, TierSchedule};
pub use types::{CurrencyCode, RoundingMode};
pub use wire::{MoneyDto, PurchasePricingDto, TierDto};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Fractional digits kept by Money unless a policy says otherwise.
pub const DEFAULT_SCALE: u32 = 2;

/// Rounding applied by Money unless a policy says otherwise.
pub const DEFAULT_ROUNDING: RoundingMode = RoundingMode::HalfUp;

/// Largest scale the decimal engine can represent.
pub const MAX_SCALE: u32 = 28;
