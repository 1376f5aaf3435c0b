//! Job search API types

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::data::types::JobRow;

/// Job posting returned by a search
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct JobDto {
    pub id: i64,
    pub job_title: Option<String>,
    pub organization: Option<String>,
    pub location: Option<String>,
}

impl From<JobRow> for JobDto {
    fn from(row: JobRow) -> Self {
        Self {
            id: row.id,
            job_title: row.job_title,
            organization: row.organization,
            location: row.location,
        }
    }
}

/// Filter request body
///
/// A node is either a combinator (`and_`, `or_`, `not_`, first present wins
/// in that order) or a leaf of facet patterns. Leaf patterns match the facet
/// name or slug as a case-insensitive substring; several patterns on one leaf
/// must all match. An empty object matches every posting.
#[derive(Debug, Deserialize, ToSchema)]
pub struct JobFilter {
    /// Every child filter must match
    #[schema(value_type = Option<Vec<Object>>)]
    pub and_: Option<Vec<serde_json::Value>>,
    /// At least one child filter must match
    #[schema(value_type = Option<Vec<Object>>)]
    pub or_: Option<Vec<serde_json::Value>>,
    /// Postings not matching the child filter
    #[schema(value_type = Option<Object>)]
    pub not_: Option<serde_json::Value>,
    /// Technology name or slug substring (alias: `tech`)
    pub technology: Option<String>,
    /// Organization name or slug substring
    pub organization: Option<String>,
    /// Job function name or slug substring
    pub job_function: Option<String>,
}
