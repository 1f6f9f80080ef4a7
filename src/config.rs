//! Configuration Module
//!
//! Cache options plus the admin server settings loaded from environment
//! variables.

use std::env;
use std::time::Duration;

// == Defaults ==
/// Default lifetime of organically cached entries (5 minutes)
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Default entry-count ceiling
pub const DEFAULT_MAX_CACHE_SIZE: usize = 100;

// == Cache Config ==
/// Options accepted by `SearchCache::new`.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheConfig {
    /// TTL applied when `set` is called without one
    pub default_ttl: Duration,
    /// Entry-count ceiling triggering eviction
    pub max_cache_size: usize,
    /// Emit debug lines on hit/miss/evict/expire
    pub enable_logging: bool,
}

impl CacheConfig {
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    pub fn with_max_cache_size(mut self, max_cache_size: usize) -> Self {
        self.max_cache_size = max_cache_size;
        self
    }

    pub fn with_logging(mut self, enable_logging: bool) -> Self {
        self.enable_logging = enable_logging;
        self
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl: DEFAULT_TTL,
            max_cache_size: DEFAULT_MAX_CACHE_SIZE,
            enable_logging: false,
        }
    }
}

/// Admin server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Options for the shared cache instance
    pub cache: CacheConfig,
    /// HTTP server port
    pub server_port: u16,
    /// Periodic sweep interval in seconds, 0 disables the sweep task
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_DEFAULT_TTL` - Default TTL in seconds (default: 300)
    /// - `CACHE_MAX_SIZE` - Maximum cache entries (default: 100)
    /// - `CACHE_ENABLE_LOGGING` - `1`, `true`, `yes` or `on` (default: off)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CACHE_CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 0, disabled)
    pub fn from_env() -> Self {
        let defaults = CacheConfig::default();
        Self {
            cache: CacheConfig {
                default_ttl: env::var("CACHE_DEFAULT_TTL")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .map(Duration::from_secs)
                    .unwrap_or(defaults.default_ttl),
                max_cache_size: env::var("CACHE_MAX_SIZE")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.max_cache_size),
                enable_logging: env::var("CACHE_ENABLE_LOGGING")
                    .ok()
                    .map(|v| parse_flag(&v))
                    .unwrap_or(defaults.enable_logging),
            },
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            cleanup_interval: env::var("CACHE_CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            server_port: 3000,
            cleanup_interval: 0,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
