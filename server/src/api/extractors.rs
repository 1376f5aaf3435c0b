//! Request body extractors for API routes

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::response::{IntoResponse, Response};

use crate::api::types::ApiError;
use crate::data::filters::{FilterError, FilterNode, parse_filter};

/// Rejection for filter bodies, rendered in the standard error envelope
#[derive(Debug)]
pub enum FilterRejection {
    /// Body is not valid JSON (or has the wrong content type)
    Json(JsonRejection),
    /// Body is JSON but not a valid filter
    Filter(FilterError),
}

impl IntoResponse for FilterRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Json(rejection) => {
                tracing::debug!(error = %rejection.body_text(), "Rejected request body");
                (
                    rejection.status(),
                    Json(serde_json::json!({
                        "error": "bad_request",
                        "code": "JSON_PARSE_ERROR",
                        "message": rejection.body_text()
                    })),
                )
                    .into_response()
            }
            Self::Filter(e) => ApiError::from_filter(e).into_response(),
        }
    }
}

/// JSON body extractor that parses and validates a filter tree.
///
/// Returns a `FilterRejection` on parse or validation failure, before any
/// SQL is built.
#[derive(Debug)]
pub struct FilterJson(pub FilterNode);

impl<S> FromRequest<S> for FilterJson
where
    S: Send + Sync,
{
    type Rejection = FilterRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<serde_json::Value>::from_request(req, state)
            .await
            .map_err(FilterRejection::Json)?;
        let filter = parse_filter(&value).map_err(FilterRejection::Filter)?;
        Ok(Self(filter))
    }
}
