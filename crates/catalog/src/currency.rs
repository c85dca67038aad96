//! Fixed-rate currency conversion.

use marketplace_core::{DomainError, ValueObject};

/// Multiplicative rate from base currency units to display units.
///
/// A single rate is applied to every price, so bracket membership is
/// consistent across the whole catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExchangeRate(f64);

impl ValueObject for ExchangeRate {}

impl ExchangeRate {
    pub fn new(rate: f64) -> Result<Self, DomainError> {
        if !(rate.is_finite() && rate > 0.0) {
            return Err(DomainError::validation(format!(
                "exchange rate must be a finite positive number (got {rate})"
            )));
        }
        Ok(Self(rate))
    }

    /// Rate of 1.0 (display currency equals base currency).
    pub fn identity() -> Self {
        Self(1.0)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn convert(&self, amount: u64) -> f64 {
        amount as f64 * self.0
    }
}

impl Default for ExchangeRate {
    fn default() -> Self {
        Self::identity()
    }
}
