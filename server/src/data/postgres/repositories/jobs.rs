//! Job search repository for PostgreSQL operations

use sqlx::PgPool;

use crate::data::filters::CompiledQuery;
use crate::data::postgres::PostgresError;
use crate::data::types::JobRow;

/// SQLSTATE raised when `statement_timeout` cancels a query
const QUERY_CANCELED: &str = "57014";

/// Execute a compiled search, binding every parameter in placeholder order
pub async fn search(pool: &PgPool, query: &CompiledQuery) -> Result<Vec<JobRow>, PostgresError> {
    let mut statement = sqlx::query_as::<_, (i64, Option<String>, Option<String>, Option<String>)>(
        &query.sql,
    );
    for value in &query.params.values {
        statement = statement.bind(value);
    }

    let rows = statement.fetch_all(pool).await?;

    Ok(rows
        .into_iter()
        .map(|(id, job_title, organization, location)| JobRow {
            id,
            job_title,
            organization,
            location,
        })
        .collect())
}

/// Whether an error is a statement timeout cancellation
pub fn is_statement_timeout(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == QUERY_CANCELED)
}
