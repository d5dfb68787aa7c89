mod lru;

pub use lru::{DEFAULT_CACHE_CAPACITY, PatternCache, PatternCacheKey};
