//! Handle Cache - A bounded, time-expiring cache for remote object handles
//!
//! Loads values on demand through a [`Loader`], serves them while they are
//! fresh, and evicts the least recently used entry when full.

pub mod cache;
pub mod config;
pub mod error;
pub mod loader;

pub use cache::ExpiringCache;
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use loader::{CastingLoader, Loader};
