//! Error types for tasador.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Reasons an estimate cannot be produced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EstimateError {
    /// One or more input rules failed; every violation is listed.
    #[error("{}", .0.join(". "))]
    Validation(Vec<String>),

    #[error("No price found for zone {zone} in {district}")]
    UnknownZone { district: String, zone: String },

    #[error("District not found: {0}")]
    UnknownDistrict(String),

    /// Request body is not a readable property description.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

impl From<JsonRejection> for EstimateError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection.body_text())
    }
}

impl EstimateError {
    /// Messages to show the user.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Validation(errors) => errors.clone(),
            other => vec![other.to_string()],
        }
    }

    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_FAILED"),
            Self::UnknownZone { .. } => (StatusCode::NOT_FOUND, "UNKNOWN_ZONE"),
            Self::UnknownDistrict(_) => (StatusCode::NOT_FOUND, "UNKNOWN_DISTRICT"),
            Self::InvalidBody(_) => (StatusCode::BAD_REQUEST, "INVALID_BODY"),
        }
    }
}

/// API error response.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl IntoResponse for EstimateError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let body = serde_json::json!({
            "success": false,
            "error": ApiError {
                code: code.to_string(),
                message: self.to_string(),
            },
            "errors": self.messages(),
        });

        (status, axum::Json(body)).into_response()
    }
}
