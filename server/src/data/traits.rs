//! Repository traits for the search backend
//!
//! The HTTP layer depends only on these traits, so handlers can be exercised
//! without a live database.

use async_trait::async_trait;

use crate::data::error::DataError;
use crate::data::filters::CompiledQuery;
use crate::data::types::JobRow;

/// Executes compiled job search statements
#[async_trait]
pub trait JobSearchRepository: Send + Sync {
    /// Run a compiled query, binding its parameters in order
    ///
    /// Rows come back in statement order (id ascending, at most 10).
    async fn search_jobs(&self, query: &CompiledQuery) -> Result<Vec<JobRow>, DataError>;

    /// Cheap liveness probe for the backend
    async fn ping(&self) -> Result<(), DataError>;
}
