//! Configuration validation for the Tasador service.
//!
//! Every section is checked and all problems are reported together.

use thiserror::Error;

use crate::config::{Config, ExchangeRateConfig, ObservabilityConfig, ServerConfig};

/// Configuration validation error.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid port {port}: must be between 1 and 65535")]
    InvalidPort { port: u16, field: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Multiple validation errors: {0:?}")]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Trait for validatable configuration sections.
pub trait Validate {
    /// Validate this configuration section.
    fn validate(&self) -> ValidationResult<()>;
}

impl Config {
    /// Validate the entire configuration.
    pub fn validate(&self) -> ValidationResult<()> {
        let mut errors = Vec::new();

        if let Err(e) = self.server.validate() {
            errors.push(e);
        }
        if let Err(e) = self.exchange_rate.validate() {
            errors.push(e);
        }
        if let Err(e) = self.observability.validate() {
            errors.push(e);
        }

        let mut flat = Vec::new();
        for error in errors {
            match error {
                ValidationError::Multiple(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }

        if flat.is_empty() {
            Ok(())
        } else if flat.len() == 1 {
            Err(flat.remove(0))
        } else {
            Err(ValidationError::Multiple(flat))
        }
    }

    /// Load (with environment overrides) and validate configuration.
    pub fn load_and_validate() -> anyhow::Result<Self> {
        let config = Self::load_with_env()?;
        config.validate().map_err(|e| anyhow::anyhow!("{}", e))?;
        Ok(config)
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> ValidationResult<()> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort {
                port: self.port,
                field: "server.port".into(),
            });
        }
        Ok(())
    }
}

impl Validate for ExchangeRateConfig {
    fn validate(&self) -> ValidationResult<()> {
        let mut errors = Vec::new();

        if !self.fallback_rate.is_finite() || self.fallback_rate <= 0.0 {
            errors.push(ValidationError::InvalidValue {
                field: "exchange_rate.fallback_rate".into(),
                reason: format!("must be a positive number, got {}", self.fallback_rate),
            });
        }
        if self.timeout_secs == 0 {
            errors.push(ValidationError::InvalidValue {
                field: "exchange_rate.timeout_secs".into(),
                reason: "must be greater than 0".into(),
            });
        }

        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            _ => Err(ValidationError::Multiple(errors)),
        }
    }
}

impl Validate for ObservabilityConfig {
    fn validate(&self) -> ValidationResult<()> {
        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.log_format.as_str()) {
            return Err(ValidationError::InvalidValue {
                field: "observability.log_format".into(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            });
        }
        Ok(())
    }
}
