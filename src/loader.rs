//! Loader Module
//!
//! Defines how the cache obtains values on a miss.

// == Loader Trait ==
/// Produces the value for a key the cache does not hold.
///
/// The cache calls `load` while holding its exclusive guard, so an
/// implementation must not call back into the same cache.
pub trait Loader<K, V> {
    /// Failure reported by the loader, returned unchanged from `get`
    type Error;

    fn load(&self, key: &K) -> Result<V, Self::Error>;
}

impl<K, V, E, F> Loader<K, V> for F
where
    F: Fn(&K) -> Result<V, E>,
{
    type Error = E;

    fn load(&self, key: &K) -> Result<V, E> {
        self(key)
    }
}

// == Casting Loader ==
/// Fetches a generic handle and casts it to the concrete cached type.
///
/// Remote lookups usually return an untyped handle; the cast step narrows it
/// before the cache stores anything, so a failed cast caches nothing.
#[derive(Debug, Clone)]
pub struct CastingLoader<F, C> {
    fetch: F,
    cast: C,
}

impl<F, C> CastingLoader<F, C> {
    pub fn new(fetch: F, cast: C) -> Self {
        Self { fetch, cast }
    }
}

impl<K, H, V, E, F, C> Loader<K, V> for CastingLoader<F, C>
where
    F: Fn(&K) -> Result<H, E>,
    C: Fn(H) -> Result<V, E>,
{
    type Error = E;

    fn load(&self, key: &K) -> Result<V, E> {
        let handle = (self.fetch)(key)?;
        (self.cast)(handle)
    }
}
