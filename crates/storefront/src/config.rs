//! Environment-driven storefront settings.

use marketplace_catalog::{ExchangeRate, FilterEngine};

pub const FX_RATE_ENV: &str = "MARKETPLACE_FX_RATE";
pub const CURRENCY_ENV: &str = "MARKETPLACE_CURRENCY";

const DEFAULT_CURRENCY: &str = "USD";

#[derive(Debug, Clone, PartialEq)]
pub struct StorefrontConfig {
    /// Display currency code.
    pub currency: String,
    /// Base-to-display conversion applied to every price.
    pub rate: ExchangeRate,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            rate: ExchangeRate::identity(),
        }
    }
}

impl StorefrontConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; invalid values fall back to defaults with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(FX_RATE_ENV) {
            match raw.trim().parse::<f64>().map_err(|e| e.to_string()).and_then(|r| {
                ExchangeRate::new(r).map_err(|e| e.to_string())
            }) {
                Ok(rate) => config.rate = rate,
                Err(err) => {
                    tracing::warn!(value = %raw, error = %err, "{FX_RATE_ENV} invalid; using 1.0");
                }
            }
        }

        if let Some(raw) = lookup(CURRENCY_ENV) {
            let code = raw.trim();
            if code.is_empty() {
                tracing::warn!("{CURRENCY_ENV} empty; using {DEFAULT_CURRENCY}");
            } else {
                config.currency = code.to_ascii_uppercase();
            }
        }

        config
    }

    pub fn engine(&self) -> FilterEngine {
        FilterEngine::new(self.rate)
    }
}
