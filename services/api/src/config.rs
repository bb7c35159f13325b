//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use argon2::password_hash::PasswordHash;
use std::net::SocketAddr;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub database_url: String,
    pub log_level: Level,
    pub db_max_connections: u32,
    pub cors_origin: String,
    /// Argon2 PHC hash of the bearer token that unlocks writes. `None` means
    /// the service is read-only.
    pub admin_token_hash: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // --- Load Server and Database Settings ---
        let bind_address_str = var("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let database_url =
            var("DATABASE_URL").ok_or_else(|| ConfigError::MissingVar("DATABASE_URL".to_string()))?;

        let log_level_str = var("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let db_max_connections = match var("DB_MAX_CONNECTIONS") {
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    ConfigError::InvalidValue(
                        "DB_MAX_CONNECTIONS".to_string(),
                        format!("'{}' is not a positive integer", raw),
                    )
                })?,
            None => 5,
        };

        let cors_origin =
            var("CORS_ORIGIN").unwrap_or_else(|| "http://localhost:3000".to_string());

        // --- Load the write credential (optional) ---
        let admin_token_hash = var("ADMIN_TOKEN_HASH").filter(|h| !h.trim().is_empty());
        if let Some(hash) = &admin_token_hash {
            PasswordHash::new(hash).map_err(|e| {
                ConfigError::InvalidValue("ADMIN_TOKEN_HASH".to_string(), e.to_string())
            })?;
        }

        Ok(Self {
            bind_address,
            database_url,
            log_level,
            db_max_connections,
            cors_origin,
            admin_token_hash,
        })
    }
}
