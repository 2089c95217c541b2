//! Expression result memoization
//!
//! An optional LRU memo for [`crate::calculate`] keyed by the expression
//! string. Purely a performance layer: the numeric contract is identical to
//! the uncached path, and only successful evaluations are retained.

use std::num::NonZeroUsize;

use lru::LruCache;
use once_cell::sync::Lazy;
use parking_lot::Mutex;

use crate::expr::{calculate, ExprResult};

const CACHE_CAPACITY: usize = 1024;

/// Snapshot of cache effectiveness counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that fell through to evaluation
    pub misses: u64,
    /// Entries currently held
    pub len: usize,
    /// Maximum entries held
    pub capacity: usize,
}

impl CacheStats {
    /// Hits as a fraction of all lookups; 0.0 when nothing was looked up
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

struct MemoInner {
    entries: LruCache<String, f64>,
    hits: u64,
    misses: u64,
}

static MEMO: Lazy<Mutex<MemoInner>> = Lazy::new(|| {
    let capacity = NonZeroUsize::new(CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN);
    Mutex::new(MemoInner { entries: LruCache::new(capacity), hits: 0, misses: 0 })
});

/// [`calculate`] with memoization of successful results.
///
/// Failing expressions are re-evaluated on every call.
pub fn calculate_cached(expression: &str) -> ExprResult<f64> {
    {
        let mut memo = MEMO.lock();
        if let Some(&value) = memo.entries.get(expression) {
            memo.hits += 1;
            return Ok(value);
        }
        memo.misses += 1;
    }

    // Evaluate outside the lock; worst case a racing caller computes the
    // same value twice.
    let value = calculate(expression)?;
    MEMO.lock().entries.put(expression.to_string(), value);
    Ok(value)
}

/// Current counters and occupancy
pub fn cache_stats() -> CacheStats {
    let memo = MEMO.lock();
    CacheStats {
        hits: memo.hits,
        misses: memo.misses,
        len: memo.entries.len(),
        capacity: CACHE_CAPACITY,
    }
}

/// Drop all entries and reset the counters
pub fn clear_cache() {
    let mut memo = MEMO.lock();
    memo.entries.clear();
    memo.hits = 0;
    memo.misses = 0;
}
