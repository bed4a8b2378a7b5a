//! # Pricing Configuration
//!
//! Defaults applied when a wire shape does not carry its own money policy.
//!
//! ## Configuration Format
//! ```json
//! {
//!   "default_scale": 2,
//!   "default_rounding": "half_up"
//! }
//! ```
//!
//! Every field is optional; missing fields fall back to the crate defaults
//! (2 places, half up). Loading the text is the host's job; this module only
//! parses and validates it.

use serde::{Deserialize, Serialize};

use crate::error::{PricingError, PricingResult, ValidationError};
use crate::money::MoneyPolicy;
use crate::types::RoundingMode;
use crate::{DEFAULT_ROUNDING, DEFAULT_SCALE};

/// Engine-wide defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Fractional digits kept when a wire shape omits `scale`.
    #[serde(default = "default_scale")]
    pub default_scale: i64,

    /// Rounding mode used when a wire shape omits `rounding`.
    #[serde(default = "default_rounding")]
    pub default_rounding: RoundingMode,
}

fn default_scale() -> i64 {
    i64::from(DEFAULT_SCALE)
}

fn default_rounding() -> RoundingMode {
    DEFAULT_ROUNDING
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            default_scale: default_scale(),
            default_rounding: default_rounding(),
        }
    }
}

impl PricingConfig {
    /// Parses and validates a JSON document.
    ///
    /// ## Example
    /// ```rust
    /// use pricing_core::{PricingConfig, RoundingMode};
    ///
    /// let config = PricingConfig::from_json(r#"{ "default_rounding": "half_even" }"#).unwrap();
    /// assert_eq!(config.default_scale, 2);
    /// assert_eq!(config.default_rounding, RoundingMode::HalfEven);
    ///
    /// assert!(PricingConfig::from_json(r#"{ "default_scale": -1 }"#).is_err());
    /// ```
    pub fn from_json(text: &str) -> PricingResult<PricingConfig> {
        let config: PricingConfig = serde_json::from_str(text).map_err(|e| {
            PricingError::from(ValidationError::InvalidFormat {
                field: "pricing config".to_string(),
                reason: e.to_string(),
            })
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the defaults form a usable policy.
    pub fn validate(&self) -> PricingResult<()> {
        self.policy().map(|_| ())
    }

    /// The default money policy described by this config.
    pub fn policy(&self) -> PricingResult<MoneyPolicy> {
        Ok(MoneyPolicy::new(self.default_scale, self.default_rounding)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_default_config() {
        let config = PricingConfig::default();
        assert_eq!(config.default_scale, 2);
        assert_eq!(config.default_rounding, RoundingMode::HalfUp);
        assert_eq!(config.policy().unwrap(), MoneyPolicy::standard());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        assert_eq!(PricingConfig::from_json("{}").unwrap(), PricingConfig::default());
    }

    #[test]
    fn test_full_document() {
        let config =
            PricingConfig::from_json(r#"{ "default_scale": 4, "default_rounding": "floor" }"#)
                .unwrap();
        let policy = config.policy().unwrap();
        assert_eq!(policy.scale(), 4);
        assert_eq!(policy.rounding(), RoundingMode::Floor);
    }

    #[test]
    fn test_invalid_documents() {
        let err = PricingConfig::from_json(r#"{ "default_scale": 40 }"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);

        let err = PricingConfig::from_json("not json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);

        assert!(PricingConfig::from_json(r#"{ "default_rounding": "sideways" }"#).is_err());
    }
}
