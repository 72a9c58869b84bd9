//! Parse memoization keyed on the raw lyrics text

use super::parser::LyricsTimeline;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Bounded cache of parsed timelines. Identical raw text yields the same
/// shared timeline until it is evicted.
#[derive(Debug)]
pub struct LyricsCache {
    entries: LruCache<String, Arc<LyricsTimeline>>,
    hits: u64,
    misses: u64,
}

impl LyricsCache {
    pub const DEFAULT_CAPACITY: usize = 16;

    /// A capacity of 0 is treated as 1
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Return the timeline for `raw`, parsing it on a miss
    pub fn get_or_parse(&mut self, raw: &str) -> Arc<LyricsTimeline> {
        if let Some(timeline) = self.entries.get(raw) {
            self.hits += 1;
            return Arc::clone(timeline);
        }

        self.misses += 1;
        let timeline = Arc::new(LyricsTimeline::parse(raw));
        if let Some((evicted, _)) = self.entries.push(raw.to_string(), Arc::clone(&timeline)) {
            tracing::debug!(bytes = evicted.len(), "evicted cached lyrics");
        }
        timeline
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }

    /// (hits, misses) since creation or the last clear
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }
}

impl Default for LyricsCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
