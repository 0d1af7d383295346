//! Generation Module
//!
//! Implements recency tracking for LRU eviction with a monotonic counter
//! instead of an ordered list.

use std::sync::atomic::{AtomicU64, Ordering};

// == Generations ==
/// Issues access generations and tracks the eviction cursor.
///
/// Every hit or insert takes a new generation, so the entry holding the
/// smallest generation is the least recently used one. Live entries always
/// hold generations above the cursor: the cursor only moves onto the
/// generation of the entry it is about to evict, and every generation issued
/// afterwards is larger.
#[derive(Debug, Default)]
pub(crate) struct Generations {
    /// Last generation handed out
    next: AtomicU64,
    /// Generation of the most recent eviction victim
    cursor: AtomicU64,
}

impl Generations {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Issue ==
    /// Hands out the next generation. Safe to call under shared access.
    pub fn issue(&self) -> u64 {
        self.next.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Returns the last generation handed out.
    pub fn current(&self) -> u64 {
        self.next.load(Ordering::Acquire)
    }

    /// Returns the eviction cursor position.
    pub fn cursor(&self) -> u64 {
        self.cursor.load(Ordering::Acquire)
    }

    // == Advance Cursor ==
    /// Moves the cursor forward to the next generation still held by a live
    /// entry and returns that entry's key.
    ///
    /// Stepping the cursor one value at a time until it meets a live
    /// generation lands on the smallest live generation, so the scan takes
    /// that minimum in one pass over `live` instead. Must run under
    /// exclusive access so no generation changes mid-scan.
    ///
    /// Returns None if `live` is empty.
    pub fn advance_cursor<'a, K, I>(&self, live: I) -> Option<(&'a K, u64)>
    where
        K: 'a,
        I: IntoIterator<Item = (&'a K, u64)>,
    {
        let (key, generation) = live
            .into_iter()
            .min_by_key(|&(_, generation)| generation)?;

        debug_assert!(
            generation > self.cursor(),
            "live generation {} at or behind eviction cursor {}",
            generation,
            self.cursor()
        );
        debug_assert!(generation <= self.current());

        self.cursor.fetch_max(generation, Ordering::AcqRel);
        Some((key, generation))
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generations_new() {
        let generations = Generations::new();
        assert_eq!(generations.current(), 0);
        assert_eq!(generations.cursor(), 0);
    }

    #[test]
    fn test_issue_is_strictly_increasing() {
        let generations = Generations::new();

        assert_eq!(generations.issue(), 1);
        assert_eq!(generations.issue(), 2);
        assert_eq!(generations.issue(), 3);
        assert_eq!(generations.current(), 3);
    }

    #[test]
    fn test_advance_cursor_picks_oldest() {
        let generations = Generations::new();
        let a = generations.issue();
        let b = generations.issue();
        let c = generations.issue();

        let live = vec![("b", b), ("c", c), ("a", a)];
        let victim = generations.advance_cursor(live.iter().map(|(k, g)| (k, *g)));

        assert_eq!(victim, Some((&"a", a)));
        assert_eq!(generations.cursor(), a);
    }

    #[test]
    fn test_advance_cursor_skips_retired_generations() {
        let generations = Generations::new();
        let _a = generations.issue();
        let b = generations.issue();
        // "a" is touched again and gives up its first generation
        let a = generations.issue();

        let live = vec![("a", a), ("b", b)];
        let victim = generations.advance_cursor(live.iter().map(|(k, g)| (k, *g)));

        assert_eq!(victim, Some((&"b", b)));
        assert_eq!(generations.cursor(), b);
    }

    #[test]
    fn test_advance_cursor_empty() {
        let generations = Generations::new();
        let live: Vec<(&str, u64)> = Vec::new();

        assert_eq!(generations.advance_cursor(live.iter().map(|(k, g)| (k, *g))), None);
        assert_eq!(generations.cursor(), 0);
    }

    #[test]
    fn test_cursor_never_passes_next_generation() {
        let generations = Generations::new();
        let mut live: Vec<(u32, u64)> = (0..5).map(|k| (k, generations.issue())).collect();

        while !live.is_empty() {
            let (key, _) = generations
                .advance_cursor(live.iter().map(|(k, g)| (k, *g)))
                .map(|(k, g)| (*k, g))
                .unwrap();
            live.retain(|(k, _)| *k != key);
            assert!(generations.cursor() <= generations.current());
        }
        assert_eq!(generations.cursor(), generations.current());
    }

    #[test]
    fn test_eviction_order_follows_access_order() {
        let generations = Generations::new();
        let mut live: Vec<(&str, u64)> = ["a", "b", "c"]
            .iter()
            .map(|k| (*k, generations.issue()))
            .collect();

        // touch a, then c
        live[0].1 = generations.issue();
        live[2].1 = generations.issue();

        let mut order = Vec::new();
        while let Some((key, _)) = generations
            .advance_cursor(live.iter().map(|(k, g)| (k, *g)))
            .map(|(k, g)| (*k, g))
        {
            order.push(key);
            live.retain(|(k, _)| *k != key);
        }

        assert_eq!(order, vec!["b", "a", "c"]);
    }
}
