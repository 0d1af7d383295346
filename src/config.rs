//! Configuration Module
//!
//! Handles loading and validating cache configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::error::{CacheError, Result};

const DEFAULT_CAPACITY: usize = 1000;
const DEFAULT_FRESHNESS_SECS: u64 = 300;

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold
    pub capacity: usize,
    /// Maximum age of an entry before it is reloaded; zero reloads on every access
    pub freshness_window: Duration,
}

impl CacheConfig {
    pub fn new(capacity: usize, freshness_window: Duration) -> Self {
        Self {
            capacity,
            freshness_window,
        }
    }

    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 1000)
    /// - `CACHE_FRESHNESS_SECS` - Freshness window in seconds (default: 300)
    pub fn from_env() -> Self {
        Self {
            capacity: env::var("CACHE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CAPACITY),
            freshness_window: Duration::from_secs(
                env::var("CACHE_FRESHNESS_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_FRESHNESS_SECS),
            ),
        }
    }

    /// Rejects configurations that cannot produce a working cache.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(CacheError::InvalidConfiguration(
                "capacity must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            freshness_window: Duration::from_secs(DEFAULT_FRESHNESS_SECS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.capacity, 1000);
        assert_eq!(config.freshness_window, Duration::from_secs(300));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_env() {
        // Both cases live in one test so parallel tests never race on the variables
        env::remove_var("CACHE_CAPACITY");
        env::remove_var("CACHE_FRESHNESS_SECS");

        let config = CacheConfig::from_env();
        assert_eq!(config, CacheConfig::default());

        env::set_var("CACHE_CAPACITY", "16");
        env::set_var("CACHE_FRESHNESS_SECS", "not-a-number");

        let config = CacheConfig::from_env();
        assert_eq!(config.capacity, 16);
        assert_eq!(config.freshness_window, Duration::from_secs(300));

        env::remove_var("CACHE_CAPACITY");
        env::remove_var("CACHE_FRESHNESS_SECS");
    }

    #[test]
    fn test_validate_rejects_zero_capacity() {
        let config = CacheConfig::new(0, Duration::from_secs(1));
        assert!(matches!(
            config.validate(),
            Err(CacheError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_validate_accepts_zero_window() {
        let config = CacheConfig::new(1, Duration::ZERO);
        assert!(config.validate().is_ok());
    }
}
