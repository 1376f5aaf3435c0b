// =============================================================================
// Application Identity
// =============================================================================

/// Application name in title case (for display)
pub const APP_NAME: &str = "JobQuery";

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "jobquery";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".jobquery";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "jobquery.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "JOBQUERY_CONFIG";

// =============================================================================
// Environment Variables - Debug
// =============================================================================

/// Environment variable for debug mode
pub const ENV_DEBUG: &str = "JOBQUERY_DEBUG";

// =============================================================================
// Environment Variables - Server
// =============================================================================

/// Environment variable for server host
pub const ENV_HOST: &str = "JOBQUERY_HOST";

/// Environment variable for server port
pub const ENV_PORT: &str = "JOBQUERY_PORT";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "JOBQUERY_LOG";

// =============================================================================
// Server Defaults
// =============================================================================

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 8000;

// =============================================================================
// Request Body Limits
// =============================================================================

/// Default body limit for API requests (1 MB)
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

// =============================================================================
// Job Search
// =============================================================================

/// Maximum filter nesting: nodes at depth >= this are rejected (root is depth 0)
pub const MAX_FILTER_DEPTH: usize = 10;

/// Maximum size of a filter JSON document in bytes (64KB)
pub const MAX_FILTER_JSON_SIZE: usize = 64 * 1024;

/// Rows returned per search
pub const SEARCH_RESULT_LIMIT: u32 = 10;

// =============================================================================
// PostgreSQL Database
// =============================================================================

/// Environment variable for PostgreSQL connection URL
pub const ENV_POSTGRES_URL: &str = "JOBQUERY_POSTGRES_URL";

/// Default max connections for PostgreSQL pool
pub const POSTGRES_DEFAULT_MAX_CONNECTIONS: u32 = 20;

/// Default min connections for PostgreSQL pool
pub const POSTGRES_DEFAULT_MIN_CONNECTIONS: u32 = 1;

/// Default acquire timeout in seconds
pub const POSTGRES_DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;

/// Default idle timeout in seconds (10 minutes)
pub const POSTGRES_DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600;

/// Default max connection lifetime in seconds (30 minutes)
pub const POSTGRES_DEFAULT_MAX_LIFETIME_SECS: u64 = 1800;

/// Default statement timeout in seconds
pub const POSTGRES_DEFAULT_STATEMENT_TIMEOUT_SECS: u64 = 25;

/// Health check interval for the connection pool
pub const POSTGRES_HEALTH_CHECK_INTERVAL_SECS: u64 = 60;

// =============================================================================
// Shutdown
// =============================================================================

/// Timeout waiting for background tasks during shutdown
pub const SHUTDOWN_TIMEOUT_SECS: u64 = 10;
