//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with freshness and recency metadata.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

// == Cache Entry ==
/// A loaded value together with its load time and last-access generation.
///
/// The generation is atomic so readers holding only shared access can
/// record a hit.
#[derive(Debug)]
pub(crate) struct CacheEntry<V> {
    /// The cached value
    pub(crate) value: V,
    /// When the loader produced the value
    pub(crate) loaded_at: Instant,
    /// Generation stamped at the last access; creation counts as one
    generation: AtomicU64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates an entry loaded now with the given generation.
    pub(crate) fn new(value: V, generation: u64) -> Self {
        Self::loaded_at(value, generation, Instant::now())
    }

    pub(crate) fn loaded_at(value: V, generation: u64, loaded_at: Instant) -> Self {
        Self {
            value,
            loaded_at,
            generation: AtomicU64::new(generation),
        }
    }

    // == Generation ==
    pub(crate) fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Records an access with a freshly issued generation.
    ///
    /// Two readers touching the same entry may finish in either order; the
    /// entry keeps the larger generation so it never moves backwards.
    pub(crate) fn touch(&self, generation: u64) {
        self.generation.fetch_max(generation, Ordering::AcqRel);
    }

    // == Freshness ==
    /// Age of the value: current time minus load time.
    pub(crate) fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.loaded_at)
    }

    /// Checks whether the entry may still be served.
    ///
    /// Boundary condition: an entry exactly `window` old is still fresh.
    /// A zero window never serves a cached value.
    pub(crate) fn is_fresh(&self, window: Duration, now: Instant) -> bool {
        !window.is_zero() && self.age(now) <= window
    }
}
