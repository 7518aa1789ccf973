//! Compiled pattern cache.
//!
//! Compiling a pattern builds a regular expression, which is far more
//! expensive than matching one. The cache memoises compiled [`PathPattern`]s
//! keyed by the pattern string so that routes sharing a pattern (typically
//! the same path under several methods) share one matcher.
//!
//! The cache is read-mostly: lookups take a shared `RwLock` read guard and
//! only a miss takes the write guard. Because compilation is pure, a cached
//! matcher is indistinguishable from a freshly compiled one.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;

use super::pattern::PathPattern;
use crate::error::RouterError;

/// Thread-safe memo of compiled patterns
#[derive(Debug)]
pub struct PatternCache {
    entries: RwLock<HashMap<String, Arc<PathPattern>>>,
    size_limit: usize,
}

impl PatternCache {
    /// Create an empty cache compiling with the given regex size limit
    #[must_use]
    pub fn new(size_limit: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            size_limit,
        }
    }

    /// Return the cached matcher for `pattern`, compiling it on first use.
    ///
    /// Malformed patterns are not cached; every attempt reports the error.
    ///
    /// # Errors
    ///
    /// Returns a [`RouterError`] when the pattern fails to compile.
    pub fn get_or_compile(&self, pattern: &str) -> Result<Arc<PathPattern>, RouterError> {
        {
            let entries = self.entries.read().expect("pattern cache lock poisoned");
            if let Some(hit) = entries.get(pattern) {
                debug!(pattern = %pattern, "Pattern cache hit");
                return Ok(Arc::clone(hit));
            }
        }

        let compiled = Arc::new(PathPattern::parse_with_limit(pattern, self.size_limit)?);
        let mut entries = self.entries.write().expect("pattern cache lock poisoned");
        // Another writer may have raced us; keep whichever landed first
        let entry = Arc::clone(
            entries
                .entry(pattern.to_string())
                .or_insert_with(|| Arc::clone(&compiled)),
        );
        debug!(
            pattern = %pattern,
            cached_patterns = entries.len(),
            "Pattern cache miss - compiled"
        );
        Ok(entry)
    }

    /// Number of distinct compiled patterns
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().expect("pattern cache lock poisoned").len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached matcher
    pub fn clear(&self) {
        self.entries
            .write()
            .expect("pattern cache lock poisoned")
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::pattern::DEFAULT_SIZE_LIMIT;

    #[test]
    fn test_same_pattern_shares_matcher() {
        let cache = PatternCache::new(DEFAULT_SIZE_LIMIT);
        let a = cache.get_or_compile("/users/:id").unwrap();
        let b = cache.get_or_compile("/users/:id").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let cache = PatternCache::new(DEFAULT_SIZE_LIMIT);
        assert!(cache.get_or_compile("/users/{id").is_err());
        assert!(cache.get_or_compile("/users/{id").is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_miss_then_hit_after_concurrent_compile() {
        let cache = Arc::new(PatternCache::new(DEFAULT_SIZE_LIMIT));
        let workers: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || cache.get_or_compile("/shared/:id").unwrap())
            })
            .collect();
        let compiled: Vec<_> = workers.into_iter().map(|w| w.join().unwrap()).collect();
        assert_eq!(cache.len(), 1);
        let cached = cache.get_or_compile("/shared/:id").unwrap();
        assert!(compiled.iter().all(|c| Arc::ptr_eq(c, &cached)));
    }

    #[test]
    fn test_clear() {
        let cache = PatternCache::new(DEFAULT_SIZE_LIMIT);
        cache.get_or_compile("/a/:b").unwrap();
        cache.clear();
        assert!(cache.is_empty());
    }
}
