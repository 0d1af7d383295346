//! Cache Store Module
//!
//! Main cache engine combining a guarded HashMap with generation-based LRU
//! eviction and freshness expiry.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use tracing::{debug, trace, warn};

use crate::cache::entry::CacheEntry;
use crate::cache::generation::Generations;
use crate::config::CacheConfig;
use crate::error::Result;
use crate::loader::Loader;

/// Outcome of the shared-access lookup.
enum Lookup<V> {
    Fresh(V),
    Stale,
    Missing,
}

// == Expiring Cache ==
/// Bounded, time-expiring cache that loads missing values on demand.
///
/// Reads share the guard. Loads, evictions and stale removals take it
/// exclusively, and the loader runs under that exclusive guard, so a slow
/// loader stalls every key. Concurrent misses on one key load it once:
/// whoever gets the guard second finds the value already stored.
pub struct ExpiringCache<K, V, L> {
    /// Key-value storage
    entries: RwLock<HashMap<K, CacheEntry<V>>>,
    /// Recency counter and eviction cursor
    generations: Generations,
    loader: L,
    /// Maximum number of entries allowed
    capacity: usize,
    freshness_window: Duration,
}

impl<K, V, L> ExpiringCache<K, V, L>
where
    K: Hash + Eq + Clone,
    V: Clone,
    L: Loader<K, V>,
{
    // == Constructor ==
    /// Creates a cache holding at most `capacity` entries, each served for at
    /// most `freshness_window` after it was loaded.
    ///
    /// # Errors
    /// `CacheError::InvalidConfiguration` if `capacity` is zero.
    pub fn new(capacity: usize, freshness_window: Duration, loader: L) -> Result<Self> {
        Self::from_config(&CacheConfig::new(capacity, freshness_window), loader)
    }

    pub fn from_config(config: &CacheConfig, loader: L) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            entries: RwLock::new(HashMap::new()),
            generations: Generations::new(),
            loader,
            capacity: config.capacity,
            freshness_window: config.freshness_window,
        })
    }

    // == Get ==
    /// Returns the value for `key`, loading it if absent or stale.
    ///
    /// # Errors
    /// Whatever the loader returned for `key`. Nothing is cached for the key
    /// afterwards, so the next call retries the load.
    pub fn get(&self, key: &K) -> std::result::Result<V, L::Error> {
        match self.lookup(key) {
            Lookup::Fresh(value) => Ok(value),
            Lookup::Stale | Lookup::Missing => self.load(key),
        }
    }

    /// Shared-access half of `get`.
    fn lookup(&self, key: &K) -> Lookup<V> {
        let entries = self.entries.read();
        let Some(entry) = entries.get(key) else {
            return Lookup::Missing;
        };

        if entry.is_fresh(self.freshness_window, Instant::now()) {
            let generation = self.generations.issue();
            entry.touch(generation);
            trace!(generation, "cache hit");
            Lookup::Fresh(entry.value.clone())
        } else {
            Lookup::Stale
        }
    }

    /// Exclusive-access half of `get`.
    ///
    /// The shared guard is released before this runs, so the state is checked
    /// again: another caller may have loaded, refreshed or evicted the key in
    /// between.
    fn load(&self, key: &K) -> std::result::Result<V, L::Error> {
        let mut entries = self.entries.write();

        if let Some(entry) = entries.get(key) {
            if entry.is_fresh(self.freshness_window, Instant::now()) {
                let generation = self.generations.issue();
                entry.touch(generation);
                trace!(generation, "cache hit after re-check");
                return Ok(entry.value.clone());
            }

            entries.remove(key);
            debug!(size = entries.len(), "removed stale entry");
        }

        let value = match self.loader.load(key) {
            Ok(value) => value,
            Err(err) => {
                warn!(size = entries.len(), "loader failed, nothing cached");
                return Err(err);
            }
        };

        if entries.len() >= self.capacity {
            self.evict_one(&mut entries);
        }

        // Issued after the load so a failed load consumes no generation
        let generation = self.generations.issue();
        entries.insert(key.clone(), CacheEntry::new(value.clone(), generation));
        debug!(generation, size = entries.len(), "loaded entry");

        Ok(value)
    }

    // == Evict ==
    /// Removes the least recently used entry. Caller holds exclusive access.
    fn evict_one(&self, entries: &mut HashMap<K, CacheEntry<V>>) {
        let victim = self
            .generations
            .advance_cursor(entries.iter().map(|(key, entry)| (key, entry.generation())))
            .map(|(key, generation)| (key.clone(), generation));

        if let Some((key, generation)) = victim {
            entries.remove(&key);
            debug!(generation, "evicted least recently used entry");
        }
    }

    // == Size ==
    /// Returns the current number of entries in the cache.
    pub fn size(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn freshness_window(&self) -> Duration {
        self.freshness_window
    }
}

impl<K, V, L> fmt::Debug for ExpiringCache<K, V, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpiringCache")
            .field("size", &self.entries.read().len())
            .field("capacity", &self.capacity)
            .field("freshness_window", &self.freshness_window)
            .field("generation", &self.generations.current())
            .field("eviction_cursor", &self.generations.cursor())
            .finish()
    }
}
