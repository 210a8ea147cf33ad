use webbuilder_db::config::env_parsed;
use webbuilder_db::{ConfigError, DatabaseConfig};

const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Server configuration loaded from environment variables.
///
/// All fields except the database URL have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Largest accepted request body in bytes (default: 10 MiB). Project
    /// uploads carry the whole site markup in `file_content`.
    pub max_body_bytes: usize,
    /// Apply pending migrations at startup (default: `true`).
    pub run_migrations: bool,
    /// Connection settings for the `projects` store.
    pub database: DatabaseConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default   |
    /// |------------------------|-----------|
    /// | `HOST`                 | `0.0.0.0` |
    /// | `PORT`                 | `3000`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`      |
    /// | `MAX_BODY_BYTES`       | `10485760`|
    /// | `RUN_MIGRATIONS`       | `true`    |
    ///
    /// Database variables are documented on [`DatabaseConfig::from_env`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = env_parsed("PORT", "u16")?.unwrap_or(3000);
        let request_timeout_secs = env_parsed("REQUEST_TIMEOUT_SECS", "u64")?.unwrap_or(30);
        let max_body_bytes = env_parsed("MAX_BODY_BYTES", "usize")?.unwrap_or(DEFAULT_MAX_BODY_BYTES);
        let run_migrations = env_parsed("RUN_MIGRATIONS", "bool")?.unwrap_or(true);
        let database = DatabaseConfig::from_env()?;

        Ok(Self {
            host,
            port,
            request_timeout_secs,
            max_body_bytes,
            run_migrations,
            database,
        })
    }
}
