//! Two-tier request failure mapping.
//!
//! Bad input gets a specific 400 body; everything else collapses to a
//! generic 500 whose real cause is logged server-side, never exposed.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Body message for every non-validation failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Error interno del servidor";

#[derive(Debug)]
pub enum ApiError {
    /// Missing/empty required field, undecodable payload, malformed body.
    Validation(String),
    /// Engine faults and anything else unexpected.
    Internal(anyhow::Error),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }
}

impl From<rostro_core::DecodeError> for ApiError {
    fn from(err: rostro_core::DecodeError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<rostro_core::EngineError> for ApiError {
    fn from(err: rostro_core::EngineError) -> Self {
        ApiError::Internal(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(message) => {
                tracing::warn!(error = %message, "request rejected");
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            ApiError::Internal(cause) => {
                tracing::error!(cause = ?cause, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": INTERNAL_ERROR_MESSAGE })),
                )
                    .into_response()
            }
        }
    }
}
