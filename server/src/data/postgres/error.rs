//! PostgreSQL error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PostgresError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = PostgresError::Config("invalid URL".to_string());
        assert_eq!(err.to_string(), "Configuration error: invalid URL");
    }

    #[test]
    fn test_database_error_from_sqlx() {
        let err: PostgresError = sqlx::Error::RowNotFound.into();
        assert!(err.to_string().starts_with("Database error:"));
    }
}
