//! Coupon API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// Coupon API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Interface to bind
    pub host: String,

    /// HTTP server port
    pub port: u16,

    /// SQLite database file
    pub database_path: String,

    /// Maximum pooled SQLite connections
    pub db_max_connections: u32,

    /// Page size for `GET /coupons` when the request gives no `limit`
    pub default_page_limit: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            host: "0.0.0.0".to_string(),
            port: 8000,
            database_path: "./coupons.db".to_string(),
            db_max_connections: 5,
            default_page_limit: 100,
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ApiConfig::default();

        let config = ApiConfig {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port)?,
            database_path: lookup("DATABASE_PATH").unwrap_or(defaults.database_path),
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", defaults.db_max_connections)?,
            default_page_limit: parse_or(&lookup, "DEFAULT_PAGE_LIMIT", defaults.default_page_limit)?,
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()));
        }

        Ok(config)
    }

    /// `host:port` for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:8000");
        assert_eq!(config.database_path, "./coupons.db");
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.default_page_limit, 100);
    }

    #[test]
    fn test_overrides() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "9090"),
            ("DATABASE_PATH", "/tmp/c.db"),
            ("DEFAULT_PAGE_LIMIT", " 25 "),
        ]))
        .unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:9090");
        assert_eq!(config.database_path, "/tmp/c.db");
        assert_eq!(config.default_page_limit, 25);
    }

    #[test]
    fn test_invalid_values() {
        let err = ApiConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for PORT");

        let err = ApiConfig::from_lookup(lookup(&[("DB_MAX_CONNECTIONS", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(key) if key == "DB_MAX_CONNECTIONS"));
    }
}
