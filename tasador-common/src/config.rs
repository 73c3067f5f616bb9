//! Configuration management for the Tasador service.
//!
//! The service reads an optional configuration file at `~/.tasador/config.json`.
//! Every section and field has a default, so an empty file (or no file at all)
//! yields a working configuration backed by the built-in Lima price table.
//!
//! # Configuration Priority
//!
//! 1. Environment variables (TASADOR_* prefix)
//! 2. Explicit config file values
//! 3. Default values
//!
//! # Environment Variable Mapping
//!
//! - `TASADOR_HOST` → server.host
//! - `TASADOR_PORT` → server.port
//! - `TASADOR_FX_URL` → exchange_rate.url
//! - `TASADOR_FX_FALLBACK` → exchange_rate.fallback_rate
//! - `TASADOR_PRICE_TABLE` → valuation.price_table_path
//! - `TASADOR_FACTORS` → valuation.factors_path
//! - `TASADOR_LOG_LEVEL` → observability.log_level
//! - `TASADOR_LOG_FORMAT` → observability.log_format

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the configuration directory path.
pub fn config_dir() -> PathBuf {
    directories::UserDirs::new().map_or_else(
        || PathBuf::from(".tasador"),
        |dirs| dirs.home_dir().join(".tasador"),
    )
}

/// Get the configuration file path.
pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

// ============================================================================
// Server
// ============================================================================

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address. Default "127.0.0.1" (local only).
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".into()
}

fn default_port() -> u16 {
    4480
}

// ============================================================================
// Exchange Rate
// ============================================================================

/// PEN/USD exchange rate source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeRateConfig {
    /// Endpoint returning the latest rates with PEN as base currency.
    #[serde(default = "default_fx_url")]
    pub url: String,

    /// PEN per USD used whenever the endpoint cannot be read.
    #[serde(default = "default_fallback_rate")]
    pub fallback_rate: f64,

    /// Request timeout in seconds
    #[serde(default = "default_fx_timeout")]
    pub timeout_secs: u64,
}

impl Default for ExchangeRateConfig {
    fn default() -> Self {
        Self {
            url: default_fx_url(),
            fallback_rate: default_fallback_rate(),
            timeout_secs: default_fx_timeout(),
        }
    }
}

fn default_fx_url() -> String {
    "https://open.er-api.com/v6/latest/PEN".into()
}

fn default_fallback_rate() -> f64 {
    3.75
}

fn default_fx_timeout() -> u64 {
    10
}

// ============================================================================
// Valuation Data
// ============================================================================

/// Locations of the data files backing the valuation engine.
///
/// Both are optional: without a price table the built-in Lima dataset is
/// used, and without a factors file every coefficient keeps its default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValuationConfig {
    /// JSON file with districts, their property types and zone prices.
    #[serde(default)]
    pub price_table_path: Option<PathBuf>,

    /// JSON file overriding adjustment coefficients.
    #[serde(default)]
    pub factors_path: Option<PathBuf>,
}

// ============================================================================
// Observability
// ============================================================================

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level", alias = "level")]
    pub log_level: String,

    /// Log format (json, pretty)
    #[serde(default = "default_log_format", alias = "format")]
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "pretty".into()
}

// ============================================================================
// Root
// ============================================================================

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server
    #[serde(default)]
    pub server: ServerConfig,

    /// Exchange rate source
    #[serde(default)]
    pub exchange_rate: ExchangeRateConfig,

    /// Price table and factor files
    #[serde(default)]
    pub valuation: ValuationConfig,

    /// Logging
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Load configuration from the default path, falling back to defaults
    /// when the file does not exist.
    pub fn load() -> Result<Self> {
        let path = config_path();
        if !path.exists() {
            tracing::info!("Config file not found, using defaults");
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Load configuration with environment variable overrides.
    pub fn load_with_env() -> Result<Self> {
        let mut config = Self::load()?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides to the configuration.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup.
    ///
    /// Unparsable numeric values are ignored and the current value is kept.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("TASADOR_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("TASADOR_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        if let Some(url) = lookup("TASADOR_FX_URL") {
            self.exchange_rate.url = url;
        }
        if let Some(rate) = lookup("TASADOR_FX_FALLBACK") {
            if let Ok(r) = rate.parse() {
                self.exchange_rate.fallback_rate = r;
            }
        }

        if let Some(path) = lookup("TASADOR_PRICE_TABLE") {
            self.valuation.price_table_path = Some(PathBuf::from(path));
        }
        if let Some(path) = lookup("TASADOR_FACTORS") {
            self.valuation.factors_path = Some(PathBuf::from(path));
        }

        if let Some(level) = lookup("TASADOR_LOG_LEVEL") {
            self.observability.log_level = level;
        }
        if let Some(format) = lookup("TASADOR_LOG_FORMAT") {
            self.observability.log_format = format;
        }
    }

    /// Socket address string the HTTP server binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
