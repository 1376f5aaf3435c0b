//! Shared API types
//!
//! Every error response uses the same envelope:
//! `{"error": "<kind>", "code": "<CODE>", "message": "<text>"}`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::data::DataError;
use crate::data::filters::FilterError;

/// Standard API error response
#[derive(Debug)]
pub enum ApiError {
    BadRequest { code: String, message: String },
    Internal { message: String },
}

impl ApiError {
    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Map a filter rejection to a client error
    pub fn from_filter(e: FilterError) -> Self {
        tracing::debug!(error = %e, "Rejected filter");
        let code = match e {
            FilterError::InvalidShape { .. } => "INVALID_FILTER",
            FilterError::DepthExceeded { .. } => "FILTER_TOO_DEEP",
        };
        Self::bad_request(code, e.to_string())
    }

    /// Log the backend failure and hide its details from the client
    pub fn from_data(e: DataError) -> Self {
        tracing::error!(error = %e, backend = e.backend(), transient = e.is_transient(), "Data error");
        Self::internal("Database operation failed")
    }
}

impl From<FilterError> for ApiError {
    fn from(e: FilterError) -> Self {
        Self::from_filter(e)
    }
}

impl From<DataError> for ApiError {
    fn from(e: DataError) -> Self {
        Self::from_data(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, code, message) = match self {
            Self::BadRequest { code, message } => {
                (StatusCode::BAD_REQUEST, "bad_request", code, message)
            }
            Self::Internal { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "INTERNAL".to_string(),
                message,
            ),
        };
        (
            status,
            Json(serde_json::json!({
                "error": error_type,
                "code": code,
                "message": message
            })),
        )
            .into_response()
    }
}
