//! PEN/USD exchange rate.
//!
//! Providers never fail from the caller's point of view: any problem while
//! obtaining a live rate is logged and answered with the fallback rate.

pub mod open_er_api;

use async_trait::async_trait;
use thiserror::Error;

pub use open_er_api::OpenErApiProvider;

/// Soles per US dollar used when no live rate is available.
pub const FALLBACK_PEN_PER_USD: f64 = 3.75;

/// Reasons a live rate could not be obtained. Never returned to callers of
/// [`ExchangeRateProvider`].
#[derive(Debug, Error)]
pub enum ExchangeRateError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("response has no USD rate")]
    MissingRate,

    #[error("invalid USD rate {0}")]
    InvalidRate(f64),
}

/// Source of the PEN-per-USD rate.
#[async_trait]
pub trait ExchangeRateProvider: Send + Sync {
    /// Provider name for logs.
    fn name(&self) -> &'static str;

    /// Soles per dollar. Must not fail; implementations fall back internally.
    async fn pen_per_usd(&self) -> f64;
}

/// Provider returning a constant rate (offline use, tests).
#[derive(Debug, Clone, Copy)]
pub struct FixedRate(pub f64);

impl Default for FixedRate {
    fn default() -> Self {
        Self(FALLBACK_PEN_PER_USD)
    }
}

#[async_trait]
impl ExchangeRateProvider for FixedRate {
    fn name(&self) -> &'static str {
        "fixed"
    }

    async fn pen_per_usd(&self) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_rate() {
        let provider = FixedRate(3.71);
        assert_eq!(tokio_test::block_on(provider.pen_per_usd()), 3.71);
        assert_eq!(provider.name(), "fixed");
    }

    #[test]
    fn test_fixed_rate_default_is_fallback() {
        let rate = tokio_test::block_on(FixedRate::default().pen_per_usd());
        assert_eq!(rate, FALLBACK_PEN_PER_USD);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(ExchangeRateError::Status(503).to_string(), "unexpected status 503");
        assert_eq!(
            ExchangeRateError::MissingRate.to_string(),
            "response has no USD rate"
        );
    }
}
