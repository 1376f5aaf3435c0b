//! PostgreSQL database service
//!
//! Owns the connection pool used to execute compiled job searches:
//! - Connection pooling with min/max bounds
//! - Idle connection cleanup and lifetime cycling
//! - Connection-level `statement_timeout` so a runaway search fails instead
//!   of holding a connection
//!
//! The job dataset is maintained elsewhere; this service never migrates it.

pub mod error;
pub mod repositories;

pub use error::PostgresError;
pub use sqlx::PgPool;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::ConnectOptions;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::log::LevelFilter;

use crate::core::config::PostgresConfig;
use crate::core::constants::{
    POSTGRES_DEFAULT_ACQUIRE_TIMEOUT_SECS, POSTGRES_DEFAULT_IDLE_TIMEOUT_SECS,
    POSTGRES_DEFAULT_MAX_CONNECTIONS, POSTGRES_DEFAULT_MAX_LIFETIME_SECS,
    POSTGRES_DEFAULT_MIN_CONNECTIONS, POSTGRES_HEALTH_CHECK_INTERVAL_SECS,
};
use crate::data::error::DataError;
use crate::data::filters::CompiledQuery;
use crate::data::traits::JobSearchRepository;
use crate::data::types::JobRow;

/// PostgreSQL database service
///
/// Should be created once at server startup and shared across handlers.
pub struct PostgresService {
    pool: PgPool,
    statement_timeout_secs: u64,
}

/// Use the configured value, or the default when unset (0)
fn or_default<T: PartialEq + Default>(value: T, default: T) -> T {
    if value == T::default() { default } else { value }
}

/// Build connect options from the URL, or from `PG*` env vars when no URL is set
pub fn connect_options(config: &PostgresConfig) -> Result<PgConnectOptions, PostgresError> {
    let mut options = match config.url.as_deref().map(str::trim) {
        Some(url) if !url.is_empty() => url
            .parse::<PgConnectOptions>()
            .map_err(|e| PostgresError::Config(format!("Invalid PostgreSQL URL: {}", e)))?,
        _ => PgConnectOptions::new(),
    };

    options = options.log_statements(LevelFilter::Trace);

    if config.statement_timeout_secs > 0 {
        options = options.options([(
            "statement_timeout",
            format!("{}s", config.statement_timeout_secs),
        )]);
    }

    Ok(options)
}

impl PostgresService {
    /// Initialize the database service from configuration
    ///
    /// Connects eagerly so a bad URL or unreachable server fails at startup.
    pub async fn init(config: &PostgresConfig) -> Result<Self, PostgresError> {
        let options = connect_options(config)?;

        let max_connections = or_default(config.max_connections, POSTGRES_DEFAULT_MAX_CONNECTIONS);
        let min_connections = or_default(config.min_connections, POSTGRES_DEFAULT_MIN_CONNECTIONS)
            .min(max_connections);
        let acquire_timeout =
            or_default(config.acquire_timeout_secs, POSTGRES_DEFAULT_ACQUIRE_TIMEOUT_SECS);
        let idle_timeout = or_default(config.idle_timeout_secs, POSTGRES_DEFAULT_IDLE_TIMEOUT_SECS);
        let max_lifetime = or_default(config.max_lifetime_secs, POSTGRES_DEFAULT_MAX_LIFETIME_SECS);

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(acquire_timeout))
            .idle_timeout(Duration::from_secs(idle_timeout))
            .max_lifetime(Duration::from_secs(max_lifetime))
            .connect_with(options)
            .await?;

        tracing::debug!(
            max_connections,
            min_connections,
            acquire_timeout_secs = acquire_timeout,
            idle_timeout_secs = idle_timeout,
            max_lifetime_secs = max_lifetime,
            statement_timeout_secs = config.statement_timeout_secs,
            "PostgresService initialized"
        );
        Ok(Self {
            pool,
            statement_timeout_secs: config.statement_timeout_secs,
        })
    }

    /// Pool that never connects until used
    #[cfg(test)]
    pub(crate) fn init_lazy(config: &PostgresConfig) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .min_connections(0)
            .connect_lazy_with(connect_options(config)?);
        Ok(Self {
            pool,
            statement_timeout_secs: config.statement_timeout_secs,
        })
    }

    #[cfg(test)]
    pub(crate) fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Close the connection pool gracefully
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::debug!("PostgreSQL pool closed");
    }

    /// Start a background health check task
    pub fn start_health_check_task(
        self: &Arc<Self>,
        mut shutdown_rx: watch::Receiver<bool>,
    ) -> JoinHandle<()> {
        let db = Arc::clone(self);
        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(Duration::from_secs(POSTGRES_HEALTH_CHECK_INTERVAL_SECS));
            loop {
                tokio::select! {
                    biased;
                    _ = shutdown_rx.changed() => {
                        if *shutdown_rx.borrow() {
                            tracing::debug!("PostgreSQL health check task shutting down");
                            break;
                        }
                    }
                    _ = interval.tick() => {
                        if let Err(e) = db.ping().await {
                            tracing::warn!("PostgreSQL health check failed: {}", e);
                        }
                    }
                }
            }
        })
    }

    fn map_error(&self, e: PostgresError) -> DataError {
        match e {
            PostgresError::Database(ref db) if repositories::jobs::is_statement_timeout(db) => {
                DataError::timeout("postgres", self.statement_timeout_secs)
            }
            other => other.into(),
        }
    }
}

#[async_trait]
impl JobSearchRepository for PostgresService {
    async fn search_jobs(&self, query: &CompiledQuery) -> Result<Vec<JobRow>, DataError> {
        repositories::jobs::search(&self.pool, query)
            .await
            .map_err(|e| self.map_error(e))
    }

    async fn ping(&self) -> Result<(), DataError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(DataError::from_postgres)
    }
}
