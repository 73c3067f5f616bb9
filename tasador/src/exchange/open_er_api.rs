//! Exchange rate from open.er-api.com.
//!
//! `GET /v6/latest/PEN` answers with the value of one sol in other
//! currencies; the PEN-per-USD rate is the inverse of `rates.USD`.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tasador_common::config::ExchangeRateConfig;
use tracing::{debug, warn};

use super::{ExchangeRateError, ExchangeRateProvider, FALLBACK_PEN_PER_USD};

/// Default endpoint (PEN base).
pub const DEFAULT_URL: &str = "https://open.er-api.com/v6/latest/PEN";

#[derive(Debug, Deserialize)]
struct LatestRates {
    #[serde(default)]
    rates: Option<HashMap<String, f64>>,
}

/// Extract PEN per USD from a `latest/PEN` response body.
pub fn parse_pen_per_usd(body: &str) -> Result<f64, ExchangeRateError> {
    let latest: LatestRates =
        serde_json::from_str(body).map_err(|e| ExchangeRateError::Malformed(e.to_string()))?;

    let usd_per_pen = latest
        .rates
        .as_ref()
        .and_then(|rates| rates.get("USD"))
        .copied()
        .ok_or(ExchangeRateError::MissingRate)?;

    if !usd_per_pen.is_finite() || usd_per_pen <= 0.0 {
        return Err(ExchangeRateError::InvalidRate(usd_per_pen));
    }

    Ok(1.0 / usd_per_pen)
}

/// Live rate provider. One request per call, no retry, no cache.
pub struct OpenErApiProvider {
    client: reqwest::Client,
    url: String,
    fallback: f64,
}

impl OpenErApiProvider {
    /// Create with the default endpoint and fallback.
    pub fn new() -> Self {
        Self::with_url(DEFAULT_URL)
    }

    /// Create against a custom endpoint.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self::build(url.into(), FALLBACK_PEN_PER_USD, Duration::from_secs(10))
    }

    /// Create from configuration.
    pub fn from_config(config: &ExchangeRateConfig) -> Self {
        Self::build(
            config.url.clone(),
            config.fallback_rate,
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn build(url: String, fallback: f64, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            url,
            fallback,
        }
    }

    pub fn fallback(&self) -> f64 {
        self.fallback
    }

    /// Fetch the live rate, surfacing every failure.
    pub async fn fetch(&self) -> Result<f64, ExchangeRateError> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExchangeRateError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        parse_pen_per_usd(&body)
    }
}

impl Default for OpenErApiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExchangeRateProvider for OpenErApiProvider {
    fn name(&self) -> &'static str {
        "open-er-api"
    }

    async fn pen_per_usd(&self) -> f64 {
        match self.fetch().await {
            Ok(rate) => {
                debug!(rate, "Fetched PEN/USD rate");
                rate
            }
            Err(e) => {
                warn!(error = %e, fallback = self.fallback, "Exchange rate unavailable, using fallback");
                self.fallback
            }
        }
    }
}
