//! Job search API endpoints

pub mod types;

use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, State};
use axum::routing::post;
use axum::{Json, Router};

use crate::api::extractors::FilterJson;
use crate::api::types::ApiError;
use crate::core::constants::MAX_FILTER_JSON_SIZE;
use crate::data::JobSearchRepository;
use crate::data::filters::compile_query;

use types::JobDto;

/// Shared state for job search endpoints
#[derive(Clone)]
pub struct JobsApiState {
    pub repository: Arc<dyn JobSearchRepository>,
}

/// Build job search routes
pub fn routes(repository: Arc<dyn JobSearchRepository>) -> Router<()> {
    let state = JobsApiState { repository };

    Router::new()
        .route("/", post(search_jobs))
        .layer(DefaultBodyLimit::max(MAX_FILTER_JSON_SIZE))
        .with_state(state)
}

/// Search job postings with a boolean filter
///
/// Returns at most 10 postings ordered by id ascending.
#[utoipa::path(
    post,
    path = "/api/v1/jobs",
    tag = "jobs",
    request_body = types::JobFilter,
    responses(
        (status = 200, description = "Matching job postings", body = Vec<JobDto>),
        (status = 400, description = "Malformed JSON, invalid filter, or filter too deep"),
        (status = 500, description = "Search execution failed")
    )
)]
pub async fn search_jobs(
    State(state): State<JobsApiState>,
    FilterJson(filter): FilterJson,
) -> Result<Json<Vec<JobDto>>, ApiError> {
    let query = compile_query(&filter);

    let rows = state
        .repository
        .search_jobs(&query)
        .await
        .map_err(ApiError::from_data)?;

    tracing::debug!(count = rows.len(), "Job search completed");
    Ok(Json(rows.into_iter().map(JobDto::from).collect()))
}
