use crate::models::FieldErrors;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// Application-specific error types.
///
/// Channel-level failures never reach this type: every delivery error is
/// captured as [`crate::models::DeliveryOutcome`] data. `AppError` covers
/// only the HTTP surface.
#[derive(Debug, Clone)]
pub enum AppError {
    /// One or more form fields failed validation; carries the per-field map.
    ValidationFailed(FieldErrors),
    /// Every delivery channel failed for a submission.
    DeliveryFailed(String),
    /// Internal server error.
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ValidationFailed(errors) => {
                write!(f, "Validation failed for {} field(s)", errors.len())
            }
            AppError::DeliveryFailed(msg) => write!(f, "Delivery failed: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl IntoResponse for AppError {
    /// Converts the error into an HTTP response.
    ///
    /// Maps each error variant to an appropriate HTTP status code and JSON body.
    /// Logs errors appropriately based on their severity.
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::ValidationFailed(errors) => {
                tracing::debug!("Validation failed: {} field error(s)", errors.len());
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    json!({
                        "error": "Validation failed",
                        "fields": errors,
                    }),
                )
            }
            AppError::DeliveryFailed(msg) => {
                tracing::error!("All delivery channels failed: {}", msg);
                (StatusCode::BAD_GATEWAY, json!({ "error": msg }))
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
