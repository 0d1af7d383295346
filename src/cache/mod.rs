//! Cache Module
//!
//! Provides an in-memory cache with freshness expiry and generation-based LRU eviction.

mod entry;
mod generation;
mod store;


// Re-export public types
pub use store::ExpiringCache;

#[cfg(test)]
pub(crate) use generation::Generations;
