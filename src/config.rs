//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Which `StoreClient` implementation backs the facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Remote Redis server at `redis_url`
    Redis,
    /// Process-local map, for development without a Redis server
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redis" => Ok(StoreBackend::Redis),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(format!("unknown store backend '{}'", other)),
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Redis connection URL
    pub redis_url: String,
    /// Per-command timeout in milliseconds
    pub redis_timeout_ms: u64,
    /// Store implementation to use
    pub store_backend: StoreBackend,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `REDIS_URL` - Redis endpoint (default: redis://127.0.0.1:6379)
    /// - `REDIS_TIMEOUT_MS` - Per-command timeout (default: 2000)
    /// - `STORE_BACKEND` - `redis` or `memory` (default: redis)
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            redis_url: env::var("REDIS_URL").unwrap_or(defaults.redis_url),
            redis_timeout_ms: env::var("REDIS_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.redis_timeout_ms),
            store_backend: env::var("STORE_BACKEND")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.store_backend),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
        }
    }

    /// Per-command timeout as a Duration.
    pub fn redis_timeout(&self) -> Duration {
        Duration::from_millis(self.redis_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            redis_url: "redis://127.0.0.1:6379".to_string(),
            redis_timeout_ms: 2000,
            store_backend: StoreBackend::Redis,
            server_port: 8080,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.redis_url, "redis://127.0.0.1:6379");
        assert_eq!(config.redis_timeout(), Duration::from_secs(2));
        assert_eq!(config.store_backend, StoreBackend::Redis);
        assert_eq!(config.server_port, 8080);
    }

    #[test]
    fn test_config_from_env() {
        env::set_var("REDIS_URL", "redis://cache:6380");
        env::set_var("REDIS_TIMEOUT_MS", "500");
        env::set_var("STORE_BACKEND", "Memory");
        env::set_var("SERVER_PORT", "not-a-port");

        let config = Config::from_env();
        assert_eq!(config.redis_url, "redis://cache:6380");
        assert_eq!(config.redis_timeout_ms, 500);
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.server_port, 8080);

        env::remove_var("REDIS_URL");
        env::remove_var("REDIS_TIMEOUT_MS");
        env::remove_var("STORE_BACKEND");
        env::remove_var("SERVER_PORT");
    }

    #[test]
    fn test_store_backend_parse() {
        assert_eq!("redis".parse::<StoreBackend>(), Ok(StoreBackend::Redis));
        assert!("etcd".parse::<StoreBackend>().is_err());
    }
}
