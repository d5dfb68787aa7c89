use hashbrown::HashMap as FastHashMap;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::pattern::{WildcardPattern, compile};

pub const DEFAULT_CACHE_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PatternCacheKey {
    pattern: Box<str>,
    separator: Option<char>,
}

impl PatternCacheKey {
    pub fn new(pattern: &str, separator: Option<char>) -> Self {
        Self {
            pattern: pattern.into(),
            separator,
        }
    }
}

#[derive(Debug)]
struct Slot {
    pattern: Arc<WildcardPattern>,
    last_used: u64,
}

/// Entries stamped with a use counter; the smallest stamp is the least
/// recently used.
#[derive(Debug)]
struct Entries {
    capacity: usize,
    clock: u64,
    slots: FastHashMap<PatternCacheKey, Slot>,
    evictions: u64,
}

impl Entries {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn lookup(&mut self, key: &PatternCacheKey) -> Option<Arc<WildcardPattern>> {
        let now = self.tick();
        let slot = self.slots.get_mut(key)?;
        slot.last_used = now;
        Some(Arc::clone(&slot.pattern))
    }

    /// Stores `pattern` unless a racing caller already did, and returns the
    /// instance that ends up cached.
    fn store(&mut self, key: PatternCacheKey, pattern: Arc<WildcardPattern>) -> Arc<WildcardPattern> {
        let now = self.tick();
        if let Some(slot) = self.slots.get_mut(&key) {
            slot.last_used = now;
            return Arc::clone(&slot.pattern);
        }

        if self.slots.len() >= self.capacity {
            self.evict_oldest();
        }
        self.slots.insert(
            key,
            Slot {
                pattern: Arc::clone(&pattern),
                last_used: now,
            },
        );
        pattern
    }

    fn evict_oldest(&mut self) {
        let oldest = self
            .slots
            .iter()
            .min_by_key(|(_, slot)| slot.last_used)
            .map(|(key, _)| key.clone());

        if let Some(key) = oldest {
            tracing::trace!(pattern = %key.pattern, separator = ?key.separator, "pattern cache evicted entry");
            self.slots.remove(&key);
            self.evictions += 1;
        }
    }
}

/// Bounded LRU of compiled patterns keyed by `(pattern, separator)`.
///
/// Compilation is pure, so the cache only saves work: a miss compiles and
/// stores, a hit hands out the shared instance.
#[derive(Debug)]
pub struct PatternCache {
    entries: Mutex<Entries>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Default for PatternCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl PatternCache {
    /// A cache holding at most `capacity` patterns; zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: Mutex::new(Entries {
                capacity,
                clock: 0,
                slots: FastHashMap::with_capacity(capacity),
                evictions: 0,
            }),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    #[tracing::instrument(level = "trace", skip(self))]
    pub fn get_or_compile(&self, pattern: &str, separator: Option<char>) -> Arc<WildcardPattern> {
        let key = PatternCacheKey::new(pattern, separator);

        if let Some(found) = self.entries.lock().lookup(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return found;
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        // compiled outside the lock; the first stored instance wins a race
        let compiled = Arc::new(compile(pattern, separator));
        self.entries.lock().store(key, compiled)
    }

    pub fn contains(&self, pattern: &str, separator: Option<char>) -> bool {
        self.entries
            .lock()
            .slots
            .contains_key(&PatternCacheKey::new(pattern, separator))
    }

    pub fn capacity(&self) -> usize {
        self.entries.lock().capacity
    }

    pub fn len(&self) -> usize {
        self.entries.lock().slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every entry. Counters keep running.
    pub fn clear(&self) {
        self.entries.lock().slots.clear();
    }

    /// `(hits, misses)` since construction.
    pub fn stats(&self) -> (u64, u64) {
        (
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
        )
    }

    /// Entries dropped to make room since construction.
    pub fn evictions(&self) -> u64 {
        self.entries.lock().evictions
    }
}
