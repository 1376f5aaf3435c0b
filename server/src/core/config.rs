use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::utils::file::expand_path;

use super::cli::CliConfig;
use super::constants::{
    APP_DOT_FOLDER, CONFIG_FILE_NAME, DEFAULT_HOST, DEFAULT_PORT,
    POSTGRES_DEFAULT_ACQUIRE_TIMEOUT_SECS, POSTGRES_DEFAULT_IDLE_TIMEOUT_SECS,
    POSTGRES_DEFAULT_MAX_CONNECTIONS, POSTGRES_DEFAULT_MAX_LIFETIME_SECS,
    POSTGRES_DEFAULT_MIN_CONNECTIONS, POSTGRES_DEFAULT_STATEMENT_TIMEOUT_SECS,
};

// =============================================================================
// File Config Structs (JSON deserialization)
// =============================================================================

/// Server configuration section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ServerFileConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// PostgreSQL configuration section (from JSON config file)
#[derive(Debug, Default, Clone, Deserialize)]
pub struct PostgresFileConfig {
    /// PostgreSQL connection URL (or use JOBQUERY_POSTGRES_URL env var)
    pub url: Option<String>,
    /// Maximum number of connections in the pool (default: 20)
    pub max_connections: Option<u32>,
    /// Minimum number of connections to keep warm (default: 1)
    pub min_connections: Option<u32>,
    /// Connection acquire timeout in seconds (default: 30)
    pub acquire_timeout_secs: Option<u64>,
    /// Idle connection timeout in seconds (default: 600)
    pub idle_timeout_secs: Option<u64>,
    /// Max connection lifetime in seconds (default: 1800)
    pub max_lifetime_secs: Option<u64>,
    /// Statement timeout in seconds, 0 to disable (default: 25)
    pub statement_timeout_secs: Option<u64>,
}

/// Database configuration section (from JSON config file)
#[derive(Debug, Default, Clone, Deserialize)]
pub struct DatabaseFileConfig {
    pub postgres: Option<PostgresFileConfig>,
}

/// File-based configuration (JSON)
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub server: Option<ServerFileConfig>,
    pub database: Option<DatabaseFileConfig>,
    pub debug: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl FileConfig {
    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::trace!(config = ?config, "Parsed config file");
        Ok(config)
    }

    /// Warn about unknown top-level fields in the config
    fn warn_unknown_fields(&self) {
        if !self.extra.is_empty() {
            let keys_str: String = self
                .extra
                .keys()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            tracing::warn!(
                fields = %keys_str,
                "Unknown fields in config file (possible typos)"
            );
        }
    }

    /// Merge another FileConfig into this one (other takes precedence)
    fn merge(&mut self, other: FileConfig) {
        if let Some(server) = other.server {
            let current = self.server.get_or_insert_with(ServerFileConfig::default);
            if server.host.is_some() {
                tracing::trace!(host = ?server.host, "Merging server.host");
                current.host = server.host;
            }
            if server.port.is_some() {
                tracing::trace!(port = ?server.port, "Merging server.port");
                current.port = server.port;
            }
        }

        if let Some(database) = other.database
            && let Some(postgres) = database.postgres
        {
            let current_pg = self
                .database
                .get_or_insert_with(DatabaseFileConfig::default)
                .postgres
                .get_or_insert_with(PostgresFileConfig::default);
            if postgres.url.is_some() {
                tracing::trace!(url = "***", "Merging database.postgres.url");
                current_pg.url = postgres.url;
            }
            if postgres.max_connections.is_some() {
                current_pg.max_connections = postgres.max_connections;
            }
            if postgres.min_connections.is_some() {
                current_pg.min_connections = postgres.min_connections;
            }
            if postgres.acquire_timeout_secs.is_some() {
                current_pg.acquire_timeout_secs = postgres.acquire_timeout_secs;
            }
            if postgres.idle_timeout_secs.is_some() {
                current_pg.idle_timeout_secs = postgres.idle_timeout_secs;
            }
            if postgres.max_lifetime_secs.is_some() {
                current_pg.max_lifetime_secs = postgres.max_lifetime_secs;
            }
            if postgres.statement_timeout_secs.is_some() {
                tracing::trace!(
                    statement_timeout_secs = ?postgres.statement_timeout_secs,
                    "Merging database.postgres.statement_timeout_secs"
                );
                current_pg.statement_timeout_secs = postgres.statement_timeout_secs;
            }
        }

        if other.debug.is_some() {
            self.debug = other.debug;
        }

        self.extra.extend(other.extra);
    }
}

// =============================================================================
// Runtime Config Structs (final merged configuration)
// =============================================================================

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// PostgreSQL configuration (final/runtime)
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Connection URL; `None` means use the `PG*` environment variables
    pub url: Option<String>,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to keep warm
    pub min_connections: u32,
    /// Connection acquire timeout in seconds
    pub acquire_timeout_secs: u64,
    /// Idle connection timeout in seconds
    pub idle_timeout_secs: u64,
    /// Max connection lifetime in seconds
    pub max_lifetime_secs: u64,
    /// Statement timeout in seconds (0 = disabled)
    pub statement_timeout_secs: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: POSTGRES_DEFAULT_MAX_CONNECTIONS,
            min_connections: POSTGRES_DEFAULT_MIN_CONNECTIONS,
            acquire_timeout_secs: POSTGRES_DEFAULT_ACQUIRE_TIMEOUT_SECS,
            idle_timeout_secs: POSTGRES_DEFAULT_IDLE_TIMEOUT_SECS,
            max_lifetime_secs: POSTGRES_DEFAULT_MAX_LIFETIME_SECS,
            statement_timeout_secs: POSTGRES_DEFAULT_STATEMENT_TIMEOUT_SECS,
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Default)]
pub struct DatabaseConfig {
    pub postgres: PostgresConfig,
}

/// Final merged application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub debug: bool,
}

impl AppConfig {
    /// Load configuration from all sources
    ///
    /// Priority (lowest to highest):
    /// 1. Defaults
    /// 2. Profile directory config (~/.jobquery/jobquery.json)
    /// 3. Local directory config OR CLI-specified config path
    /// 4. CLI arguments (which include env var fallbacks via clap)
    pub fn load(cli: &CliConfig) -> Result<Self> {
        tracing::debug!("Loading application configuration");
        tracing::trace!(cli = ?cli, "CLI config");

        let mut file_config = FileConfig::default();
        let mut found_configs: Vec<String> = Vec::new();

        if let Some(profile_path) = get_profile_config_path()
            && profile_path.exists()
        {
            let profile_config = FileConfig::load_from_file(&profile_path)?;
            profile_config.warn_unknown_fields();
            file_config.merge(profile_config);
            found_configs.push(profile_path.display().to_string());
        }

        let overlay_path = if let Some(ref path) = cli.config {
            let expanded = expand_path(&path.to_string_lossy());
            if !expanded.exists() {
                anyhow::bail!("Config file not found: {}", expanded.display());
            }
            Some(expanded)
        } else {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if local.exists() { Some(local) } else { None }
        };

        if let Some(path) = overlay_path {
            let overlay_config = FileConfig::load_from_file(&path)?;
            overlay_config.warn_unknown_fields();
            file_config.merge(overlay_config);
            found_configs.push(path.display().to_string());
        }

        tracing::debug!(configs = ?found_configs, "Config files loaded");

        let config = Self::from_layers(cli, file_config);
        config.validate()?;

        tracing::debug!(
            host = %config.server.host,
            port = config.server.port,
            postgres_url_set = config.database.postgres.url.is_some(),
            debug = config.debug,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Layer defaults, merged file config and CLI/env overrides
    fn from_layers(cli: &CliConfig, file_config: FileConfig) -> Self {
        let file_server = file_config.server.unwrap_or_default();
        let file_pg = file_config
            .database
            .unwrap_or_default()
            .postgres
            .unwrap_or_default();
        let defaults = PostgresConfig::default();

        let host = cli
            .host
            .clone()
            .or(file_server.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = cli.port.or(file_server.port).unwrap_or(DEFAULT_PORT);

        let url = cli
            .postgres_url
            .clone()
            .or(file_pg.url)
            .filter(|url| !url.trim().is_empty());

        let postgres = PostgresConfig {
            url,
            max_connections: file_pg.max_connections.unwrap_or(defaults.max_connections),
            min_connections: file_pg.min_connections.unwrap_or(defaults.min_connections),
            acquire_timeout_secs: file_pg
                .acquire_timeout_secs
                .unwrap_or(defaults.acquire_timeout_secs),
            idle_timeout_secs: file_pg
                .idle_timeout_secs
                .unwrap_or(defaults.idle_timeout_secs),
            max_lifetime_secs: file_pg
                .max_lifetime_secs
                .unwrap_or(defaults.max_lifetime_secs),
            statement_timeout_secs: file_pg
                .statement_timeout_secs
                .unwrap_or(defaults.statement_timeout_secs),
        };

        Self {
            server: ServerConfig { host, port },
            database: DatabaseConfig { postgres },
            debug: cli.debug || file_config.debug.unwrap_or(false),
        }
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            anyhow::bail!("Configuration error: server.host must not be empty");
        }

        // Port 0 would bind an ephemeral port nobody knows about
        if self.server.port == 0 {
            anyhow::bail!("Configuration error: server.port must be greater than 0");
        }

        let pg = &self.database.postgres;
        if pg.max_connections > 0 && pg.min_connections > pg.max_connections {
            anyhow::bail!(
                "Configuration error: database.postgres.min_connections ({}) exceeds max_connections ({})",
                pg.min_connections,
                pg.max_connections
            );
        }

        if pg.statement_timeout_secs == 0 {
            tracing::warn!(
                "database.postgres.statement_timeout_secs is 0, search queries can run without a time limit"
            );
        }

        if is_all_interfaces(&self.server.host) {
            tracing::warn!(
                host = %self.server.host,
                "Binding to all network interfaces exposes the search API to your network"
            );
        }

        Ok(())
    }
}

/// Get the profile config path (~/.jobquery/jobquery.json)
fn get_profile_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(APP_DOT_FOLDER).join(CONFIG_FILE_NAME))
}

/// Check if host binds to all network interfaces
pub(crate) fn is_all_interfaces(host: &str) -> bool {
    matches!(host, "0.0.0.0" | "::" | "[::]")
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn temp_config(json: &str) -> tempfile::NamedTempFile {
        let mut temp_file = tempfile::NamedTempFile::new().unwrap();
        temp_file.write_all(json.as_bytes()).unwrap();
        temp_file
    }

    #[test]
    fn test_file_config_parse_full() {
        let json = r#"{
            "server": { "host": "0.0.0.0", "port": 8080 },
            "database": { "postgres": { "url": "postgres://db/jobs", "statement_timeout_secs": 5 } },
            "debug": true
        }"#;
        let config: FileConfig = serde_json::from_str(json).unwrap();

        let server = config.server.unwrap();
        assert_eq!(server.host, Some("0.0.0.0".to_string()));
        assert_eq!(server.port, Some(8080));
        let pg = config.database.unwrap().postgres.unwrap();
        assert_eq!(pg.url.as_deref(), Some("postgres://db/jobs"));
        assert_eq!(pg.statement_timeout_secs, Some(5));
        assert_eq!(config.debug, Some(true));
        assert!(config.extra.is_empty());
    }

    #[test]
    fn test_file_config_parse_empty() {
        let config: FileConfig = serde_json::from_str("{}").unwrap();
        assert!(config.server.is_none());
        assert!(config.database.is_none());
        assert!(config.debug.is_none());
    }

    #[test]
    fn test_file_config_parse_extra_fields() {
        let json = r#"{ "server": { "port": 9000 }, "sever": {}, "telemetry": true }"#;
        let config: FileConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.server.unwrap().port, Some(9000));
        assert!(config.extra.contains_key("sever"));
        assert!(config.extra.contains_key("telemetry"));
    }

    #[test]
    fn test_file_config_merge() {
        let mut base: FileConfig = serde_json::from_str(
            r#"{
                "server": { "host": "base.host", "port": 1000 },
                "database": { "postgres": { "url": "postgres://base", "max_connections": 5 } }
            }"#,
        )
        .unwrap();
        let overlay: FileConfig = serde_json::from_str(
            r#"{
                "server": { "port": 2000 },
                "database": { "postgres": { "max_connections": 50 } },
                "debug": true
            }"#,
        )
        .unwrap();

        base.merge(overlay);

        let server = base.server.as_ref().unwrap();
        assert_eq!(server.host.as_deref(), Some("base.host"));
        assert_eq!(server.port, Some(2000));
        let pg = base.database.as_ref().unwrap().postgres.as_ref().unwrap();
        assert_eq!(pg.url.as_deref(), Some("postgres://base"));
        assert_eq!(pg.max_connections, Some(50));
        assert_eq!(base.debug, Some(true));
    }

    #[test]
    fn test_from_layers_defaults() {
        let config = AppConfig::from_layers(&CliConfig::default(), FileConfig::default());

        assert_eq!(config.server.host, DEFAULT_HOST);
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert!(config.database.postgres.url.is_none());
        assert_eq!(
            config.database.postgres.statement_timeout_secs,
            POSTGRES_DEFAULT_STATEMENT_TIMEOUT_SECS
        );
        assert!(!config.debug);
    }

    #[test]
    fn test_from_layers_cli_overrides_file() {
        let file: FileConfig = serde_json::from_str(
            r#"{
                "server": { "host": "file.host", "port": 1000 },
                "database": { "postgres": { "url": "postgres://file" } }
            }"#,
        )
        .unwrap();
        let cli = CliConfig {
            host: Some("cli.host".to_string()),
            port: Some(3000),
            debug: true,
            config: None,
            postgres_url: Some("postgres://cli".to_string()),
        };

        let config = AppConfig::from_layers(&cli, file);

        assert_eq!(config.server.host, "cli.host");
        assert_eq!(config.server.port, 3000);
        assert_eq!(
            config.database.postgres.url.as_deref(),
            Some("postgres://cli")
        );
        assert!(config.debug);
    }

    #[test]
    fn test_from_layers_blank_url_is_unset() {
        let cli = CliConfig {
            postgres_url: Some("  ".to_string()),
            ..Default::default()
        };
        let config = AppConfig::from_layers(&cli, FileConfig::default());
        assert!(config.database.postgres.url.is_none());
    }

    #[test]
    fn test_app_config_load_from_file() {
        let file = temp_config(
            r#"{
                "server": { "port": 9100 },
                "database": { "postgres": { "statement_timeout_secs": 0, "min_connections": 2 } }
            }"#,
        );
        let cli = CliConfig {
            config: Some(file.path().to_path_buf()),
            ..Default::default()
        };

        let config = AppConfig::load(&cli).unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.database.postgres.statement_timeout_secs, 0);
        assert_eq!(config.database.postgres.min_connections, 2);
    }

    #[test]
    fn test_app_config_missing_file() {
        let cli = CliConfig {
            config: Some(PathBuf::from("/nonexistent/jobquery.json")),
            ..Default::default()
        };
        let err = AppConfig::load(&cli).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_app_config_invalid_json() {
        let file = temp_config("{ not json");
        let cli = CliConfig {
            config: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        let err = AppConfig::load(&cli).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_app_config_validation_empty_host() {
        let cli = CliConfig {
            host: Some(String::new()),
            ..Default::default()
        };
        let result = AppConfig::from_layers(&cli, FileConfig::default()).validate();
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("server.host must not be empty")
        );
    }

    #[test]
    fn test_app_config_validation_port_zero() {
        let cli = CliConfig {
            port: Some(0),
            ..Default::default()
        };
        let result = AppConfig::from_layers(&cli, FileConfig::default()).validate();
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("server.port must be greater than 0")
        );
    }

    #[test]
    fn test_app_config_validation_min_exceeds_max() {
        let file: FileConfig = serde_json::from_str(
            r#"{ "database": { "postgres": { "min_connections": 10, "max_connections": 2 } } }"#,
        )
        .unwrap();
        let result = AppConfig::from_layers(&CliConfig::default(), file).validate();
        assert!(result.unwrap_err().to_string().contains("min_connections"));
    }

    #[test]
    fn test_is_all_interfaces() {
        assert!(is_all_interfaces("0.0.0.0"));
        assert!(is_all_interfaces("::"));
        assert!(is_all_interfaces("[::]"));

        assert!(!is_all_interfaces("127.0.0.1"));
        assert!(!is_all_interfaces("localhost"));
        assert!(!is_all_interfaces("::1"));
    }
}
