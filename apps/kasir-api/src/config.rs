//! API server configuration.
//!
//! Loaded once at startup, lowest to highest precedence:
//! 1. Built-in defaults
//! 2. `kasir.toml` in the working directory (optional)
//! 3. Environment variables (`.env` is read into the environment first)
//!
//! | Key                  | Default   |
//! |----------------------|-----------|
//! | `HOST`               | `0.0.0.0` |
//! | `PORT`               | `8080`    |
//! | `DB_CONN`            | `kasir.db`|
//! | `DB_MAX_CONNECTIONS` | `5`       |

use ::config::{Config, Environment, File};
use kasir_db::DbConfig;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: i64 = 8080;
const DEFAULT_DB_CONN: &str = "kasir.db";
const DEFAULT_DB_MAX_CONNECTIONS: i64 = 5;

/// API server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Interface to bind
    pub host: String,

    /// HTTP port
    pub port: u16,

    /// SQLite database file path
    pub db_conn: String,

    /// Pool size
    pub db_max_connections: u32,
}

impl AppConfig {
    /// Load configuration from defaults, `kasir.toml` and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_env_source(Environment::default().try_parsing(true))
    }

    fn from_env_source(env: Environment) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("host", DEFAULT_HOST)?
            .set_default("port", DEFAULT_PORT)?
            .set_default("db_conn", DEFAULT_DB_CONN)?
            .set_default("db_max_connections", DEFAULT_DB_MAX_CONNECTIONS)?
            .add_source(File::with_name("kasir").required(false))
            .add_source(env)
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidValue("PORT".to_string()));
        }
        if self.db_conn.trim().is_empty() {
            return Err(ConfigError::MissingRequired("DB_CONN".to_string()));
        }
        if self.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()));
        }
        Ok(())
    }

    /// `host:port` for the TCP listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Pool settings derived from this configuration.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.db_conn).max_connections(self.db_max_connections)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
