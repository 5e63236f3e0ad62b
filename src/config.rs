//! Configuration Module
//!
//! Loads the service configuration once at startup. Nothing below `main`
//! reads the process environment; everything receives a `Config`.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Deployment mode selected by `MENU_ENV`.
///
/// Only production mode composes the response cache into the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Development,
    Test,
    Production,
}

impl Mode {
    /// Whether GET responses should go through the TTL cache.
    pub fn caching_enabled(self) -> bool {
        matches!(self, Mode::Production)
    }
}

impl FromStr for Mode {
    type Err = std::convert::Infallible;

    /// Unknown values fall back to development, which never caches.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" | "app" => Mode::Production,
            "test" | "testing" => Mode::Test,
            _ => Mode::Development,
        })
    }
}

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// sqlx connection URL of the relational store
    pub database_url: String,
    /// Upper bound of the connection pool
    pub db_max_connections: u32,
    /// Deployment mode
    pub mode: Mode,
    /// Lifetime of a cached response in seconds
    pub cache_ttl: u64,
    /// Maximum number of cached responses
    pub cache_max_entries: usize,
    /// Interval in seconds between expired-entry purges
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8000)
    /// - `DATABASE_URL` - sqlx connection URL (default: `sqlite:menu.db`)
    /// - `DATABASE_MAX_CONNECTIONS` - pool size (default: 10)
    /// - `MENU_ENV` - `production` enables caching (default: development)
    /// - `CACHE_TTL` - cached response lifetime in seconds (default: 60)
    /// - `CACHE_MAX_ENTRIES` - cache admission bound (default: 1000)
    /// - `CLEANUP_INTERVAL` - purge frequency in seconds (default: 30)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            db_max_connections: parse_var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or(defaults.db_max_connections),
            mode: parse_var("MENU_ENV").unwrap_or(defaults.mode),
            cache_ttl: parse_var("CACHE_TTL").unwrap_or(defaults.cache_ttl),
            cache_max_entries: parse_var("CACHE_MAX_ENTRIES")
                .unwrap_or(defaults.cache_max_entries),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
        }
    }

    /// Configuration for tests: a private in-memory database, caching off.
    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            db_max_connections: 1,
            mode: Mode::Test,
            ..Self::default()
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8000,
            database_url: "sqlite:menu.db".to_string(),
            db_max_connections: 10,
            mode: Mode::Development,
            cache_ttl: 60,
            cache_max_entries: 1000,
            cleanup_interval: 30,
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 8000);
        assert_eq!(config.db_max_connections, 10);
        assert_eq!(config.mode, Mode::Development);
        assert_eq!(config.cache_ttl(), Duration::from_secs(60));
        assert_eq!(config.cleanup_interval, 30);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("SERVER_PORT");
        env::remove_var("DATABASE_MAX_CONNECTIONS");
        env::remove_var("MENU_ENV");
        env::remove_var("CACHE_TTL");

        let config = Config::from_env();
        assert_eq!(config.server_port, 8000);
        assert_eq!(config.db_max_connections, 10);
        assert_eq!(config.mode, Mode::Development);
        assert_eq!(config.cache_ttl, 60);
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("production".parse::<Mode>(), Ok(Mode::Production));
        assert_eq!("APP".parse::<Mode>(), Ok(Mode::Production));
        assert_eq!("test".parse::<Mode>(), Ok(Mode::Test));
        assert_eq!("staging".parse::<Mode>(), Ok(Mode::Development));
    }

    #[test]
    fn test_only_production_caches() {
        assert!(Mode::Production.caching_enabled());
        assert!(!Mode::Development.caching_enabled());
        assert!(!Mode::Test.caching_enabled());
    }

    #[test]
    fn test_in_memory_config() {
        let config = Config::in_memory();
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.db_max_connections, 1);
        assert!(!config.mode.caching_enabled());
    }
}
