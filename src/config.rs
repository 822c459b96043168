use std::time::Duration;

use sqlx::postgres::PgConnectOptions;

use crate::utils::RetryConfig;

// ============================================================================
// Service Configuration
// ============================================================================
//
// Built once at startup from the process environment and handed to the
// connection manager and HTTP server. Nothing reads the environment after
// this point.
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
    pub max_connections: u32,
    pub connect_attempts: u32,
    pub connect_retry_delay: Duration,
    pub acquire_timeout: Duration,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup; missing or empty keys fall
    /// back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Ok(Self {
            database: DatabaseConfig {
                host: get("DB_HOST", "order-db"),
                port: parse(&lookup, "DB_PORT", 5432)?,
                name: get("DB_NAME", "order_db"),
                user: get("DB_USER", "order_user"),
                password: get("DB_PASS", "order_pass"),
                max_connections: parse(&lookup, "DB_MAX_CONNECTIONS", 5)?,
                connect_attempts: parse(&lookup, "DB_CONNECT_ATTEMPTS", 10)?,
                connect_retry_delay: Duration::from_secs(parse(
                    &lookup,
                    "DB_CONNECT_RETRY_SECS",
                    3,
                )?),
                acquire_timeout: Duration::from_secs(parse(
                    &lookup,
                    "DB_ACQUIRE_TIMEOUT_SECS",
                    5,
                )?),
            },
            server: ServerConfig {
                host: get("BIND_HOST", "0.0.0.0"),
                port: parse(&lookup, "PORT", 8080)?,
            },
        })
    }
}

fn parse<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key).filter(|v| !v.is_empty()) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
    }
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.name)
            .username(&self.user)
            .password(&self.password)
    }

    pub fn retry_config(&self) -> RetryConfig {
        // At least one attempt, even if configured with zero
        RetryConfig::fixed(self.connect_attempts.max(1), self.connect_retry_delay)
    }
}
