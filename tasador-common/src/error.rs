//! Error types for loading Tasador data files.

use thiserror::Error;

/// Result type alias using the Tasador error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while reading configuration-adjacent data (price tables,
/// factor overrides).
#[derive(Error, Debug)]
pub enum Error {
    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input or data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create an error with additional context.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Check if this is a not-found error, looking through context layers.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound(_) => true,
            Self::WithContext { source, .. } => source.is_not_found(),
            _ => false,
        }
    }
}

/// Extension trait for adding context to any error type.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_with_context() {
        let err = Error::NotFound("prices.json".into());
        let with_ctx = err.with_context("loading price table");
        assert!(matches!(with_ctx, Error::WithContext { .. }));
        assert!(with_ctx.is_not_found());
        assert_eq!(
            with_ctx.to_string(),
            "loading price table: Not found: prices.json"
        );
    }

    #[test]
    fn test_result_ext_wraps_json_error() {
        let parsed: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let err = parsed.context("parsing factors").unwrap_err();
        assert!(err.to_string().starts_with("parsing factors: JSON error"));
        assert!(!err.is_not_found());
    }
}
