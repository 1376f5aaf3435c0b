//! OpenAPI specification

use axum::http::header;
use axum::response::{IntoResponse, Json};
use utoipa::OpenApi;

use crate::api::routes::{health, jobs};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "JobQuery API",
        version = env!("CARGO_PKG_VERSION"),
        description = "Boolean search over job postings"
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "jobs", description = "Job posting search")
    ),
    paths(health::health, jobs::search_jobs),
    components(schemas(
        health::HealthResponse,
        jobs::types::JobDto,
        jobs::types::JobFilter,
    ))
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
pub async fn openapi_json() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        Json(ApiDoc::openapi()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_documents_routes() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();

        assert!(doc["paths"]["/api/v1/health"]["get"].is_object());
        assert!(doc["paths"]["/api/v1/jobs"]["post"].is_object());
        assert!(doc["components"]["schemas"]["JobDto"].is_object());
        assert!(doc["components"]["schemas"]["JobFilter"].is_object());
    }
}
