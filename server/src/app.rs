//! Core application

use std::fmt::Write as _;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt, reload};

use crate::api::ApiServer;
use crate::core::banner;
use crate::core::cli::{self, CliConfig, Commands};
use crate::core::config::AppConfig;
use crate::core::constants::{APP_NAME_LOWER, ENV_LOG};
use crate::core::shutdown::ShutdownService;
use crate::data::PostgresService;
use crate::data::filters::{CompiledQuery, compile_query, parse_filter_str};

type LogFilterHandle = reload::Handle<EnvFilter, Registry>;

pub struct CoreApp {
    pub shutdown: ShutdownService,
    pub config: AppConfig,
    pub database: Arc<PostgresService>,
}

impl CoreApp {
    /// Run the application with CLI argument parsing
    pub async fn run() -> Result<()> {
        dotenvy::dotenv().ok();

        let (cli_config, command) = cli::parse();
        let log_handle = Self::init_logging(cli_config.debug);

        tracing::debug!("Application starting");
        tracing::trace!(command = ?command, "Parsed command");

        match command {
            Some(Commands::Explain { filter }) => Self::explain(&filter),
            Some(Commands::Start) | None => {
                let app = Self::init(&cli_config).await?;
                Self::apply_config_debug(&log_handle, cli_config.debug, app.config.debug);
                Self::start_server(app).await
            }
        }
    }

    async fn init(cli: &CliConfig) -> Result<Self> {
        let config = AppConfig::load(cli)?;

        let database = PostgresService::init(&config.database.postgres)
            .await
            .context("Failed to connect to PostgreSQL")?;
        let database = Arc::new(database);
        let shutdown = ShutdownService::new(database.clone());

        Ok(Self {
            shutdown,
            config,
            database,
        })
    }

    /// Compile a filter and print the statement without executing it
    fn explain(filter: &str) -> Result<()> {
        let filter = parse_filter_str(filter).context("Invalid filter")?;
        let query = compile_query(&filter);
        print!("{}", render_explain(&query));
        Ok(())
    }

    fn init_logging(debug: bool) -> LogFilterHandle {
        let (filter, handle) = reload::Layer::new(EnvFilter::new(log_filter(debug)));

        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_level(true)
                    .with_ansi(true)
                    .compact(),
            )
            .init();

        handle
    }

    /// Raise app logging to debug when only the config file asks for it
    ///
    /// The config file is read after logging starts, so its `debug` flag
    /// swaps the active filter in place.
    fn apply_config_debug(handle: &LogFilterHandle, cli_debug: bool, config_debug: bool) -> bool {
        if cli_debug || !config_debug {
            return false;
        }

        match handle.reload(EnvFilter::new(log_filter(true))) {
            Ok(()) => {
                tracing::debug!("Debug logging enabled by config");
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to enable debug logging");
                false
            }
        }
    }

    async fn start_server(app: Self) -> Result<()> {
        // Install signal handlers FIRST (before any blocking calls)
        app.shutdown.install_signal_handlers();

        app.start_background_tasks().await;

        banner::print_banner(&app.config);

        let server = ApiServer::new(app);
        let app = server.start().await?;
        app.shutdown.shutdown().await;

        Ok(())
    }

    pub async fn start_background_tasks(&self) {
        self.shutdown
            .register(
                self.database
                    .start_health_check_task(self.shutdown.subscribe()),
            )
            .await;

        tracing::debug!("Background tasks started");
    }
}

/// Log filter from `JOBQUERY_LOG`, then `RUST_LOG`, then the app default
fn log_filter(debug: bool) -> String {
    std::env::var(ENV_LOG)
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| default_log_filter(debug))
}

fn default_log_filter(debug: bool) -> String {
    let level = if debug { "debug" } else { "info" };
    format!("info,{}={}", APP_NAME_LOWER, level)
}

/// Human-readable statement and numbered parameters
pub fn render_explain(query: &CompiledQuery) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "-- SQL");
    let _ = writeln!(out, "{}", query.sql);
    let _ = writeln!(out, "-- Parameters ({})", query.params.len());
    for (i, value) in query.params.values.iter().enumerate() {
        let _ = writeln!(out, "${} = {:?}", i + 1, value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_explain_numbers_params() {
        let filter = parse_filter_str(r#"{"technology": "rust"}"#).unwrap();
        let out = render_explain(&compile_query(&filter));

        assert!(out.starts_with("-- SQL\nWITH c1 AS ("));
        assert!(out.contains("-- Parameters (2)\n"));
        assert!(out.ends_with("$1 = \"%rust%\"\n$2 = \"%rust%\"\n"));
    }

    #[test]
    fn test_render_explain_empty_filter() {
        let filter = parse_filter_str("{}").unwrap();
        let out = render_explain(&compile_query(&filter));

        assert!(out.contains("FROM (SELECT id FROM job_posts) AS ids"));
        assert!(out.ends_with("-- Parameters (0)\n"));
    }

    #[test]
    fn test_default_log_filter() {
        assert_eq!(default_log_filter(false), "info,jobquery=info");
        assert_eq!(default_log_filter(true), "info,jobquery=debug");
    }

    #[test]
    fn test_config_debug_reloads_filter() {
        let (layer, handle) = reload::Layer::new(EnvFilter::new("info"));
        let _subscriber = tracing_subscriber::registry().with(layer);

        assert!(!CoreApp::apply_config_debug(&handle, false, false));
        assert!(!CoreApp::apply_config_debug(&handle, true, true));
        assert!(CoreApp::apply_config_debug(&handle, false, true));
    }

    #[test]
    fn test_config_debug_without_subscriber() {
        let (layer, handle) = reload::Layer::<EnvFilter, Registry>::new(EnvFilter::new("info"));
        drop(layer);

        assert!(!CoreApp::apply_config_debug(&handle, false, true));
    }

    #[test]
    fn test_explain_rejects_invalid_filter() {
        assert!(CoreApp::explain(r#"{"and_": []}"#).is_err());
        assert!(CoreApp::explain("not json").is_err());
    }
}
