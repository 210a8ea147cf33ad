/// Errors raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} must be a valid {expected} (got '{value}')")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Database connection settings.
///
/// Built once at startup and handed to [`crate::create_pool`]; nothing reads
/// the connection string from the environment after that.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Postgres connection string.
    pub url: String,
    /// Upper bound on pooled connections (default: `10`).
    pub max_connections: u32,
    /// Seconds to wait for a free connection before failing (default: `5`).
    pub acquire_timeout_secs: u64,
}

impl DatabaseConfig {
    /// Settings for `url` with default pool sizing.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            acquire_timeout_secs: 5,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// | Env Var                   | Default    |
    /// |---------------------------|------------|
    /// | `DATABASE_URL`            | (required) |
    /// | `DB_MAX_CONNECTIONS`      | `10`       |
    /// | `DB_ACQUIRE_TIMEOUT_SECS` | `5`        |
    pub fn from_env() -> Result<Self, ConfigError> {
        let url = std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;
        let mut config = Self::new(url);

        if let Some(value) = env_parsed("DB_MAX_CONNECTIONS", "u32")? {
            config.max_connections = value;
        }
        if let Some(value) = env_parsed("DB_ACQUIRE_TIMEOUT_SECS", "u64")? {
            config.acquire_timeout_secs = value;
        }

        Ok(config)
    }
}

/// Read and parse an optional environment variable.
pub fn env_parsed<T: std::str::FromStr>(
    name: &'static str,
    expected: &'static str,
) -> Result<Option<T>, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid {
                name,
                expected,
                value,
            }),
        Err(_) => Ok(None),
    }
}
