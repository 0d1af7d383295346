//! Error types for the handle cache
//!
//! Provides unified error handling using thiserror.
//!
//! Loader failures are not represented here: `ExpiringCache::get` hands the
//! loader's own error back to the caller untouched.

use thiserror::Error;

// == Cache Error Enum ==
/// Errors raised while building a cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Construction parameters are unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

// == Result Type Alias ==
/// Convenience Result type for cache construction.
pub type Result<T> = std::result::Result<T, CacheError>;
