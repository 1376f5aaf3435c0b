//! Result records returned by the job search backend

use serde::Serialize;

/// One matching job posting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobRow {
    pub id: i64,
    pub job_title: Option<String>,
    pub organization: Option<String>,
    pub location: Option<String>,
}
