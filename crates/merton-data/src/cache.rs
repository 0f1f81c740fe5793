//! Memoization of series loads.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use merton_traits::RawSeries;
use tracing::debug;

use crate::Result;
use crate::source::{CacheKey, SeriesSource};

/// Caches loaded series by [`CacheKey`].
///
/// Entries live until explicitly invalidated; there is no expiry.
#[derive(Debug, Default)]
pub struct SeriesCache {
    entries: HashMap<CacheKey, RawSeries>,
}

impl SeriesCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached series for `source`, loading it on first use.
    ///
    /// Failed loads are not cached.
    pub fn get_or_load(&mut self, source: &dyn SeriesSource) -> Result<&RawSeries> {
        let key = source.cache_key();
        match self.entries.entry(key) {
            Entry::Occupied(entry) => {
                debug!(series = source.name(), "cache hit");
                Ok(entry.into_mut())
            }
            Entry::Vacant(entry) => {
                debug!(series = source.name(), "cache miss, loading");
                let series = source.load()?;
                Ok(entry.insert(series))
            }
        }
    }

    /// Whether `key` is cached.
    #[must_use]
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Drop one entry. Returns whether it was present.
    pub fn invalidate(&mut self, key: &CacheKey) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DataError;
    use merton_traits::{Date, Observation, SeriesKind};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        id: &'static str,
        loads: AtomicUsize,
        fail: bool,
    }

    impl CountingSource {
        fn new(id: &'static str) -> Self {
            Self {
                id,
                loads: AtomicUsize::new(0),
                fail: false,
            }
        }
    }

    impl SeriesSource for CountingSource {
        fn name(&self) -> &str {
            self.id
        }

        fn kind(&self) -> SeriesKind {
            SeriesKind::Cpi
        }

        fn cache_key(&self) -> CacheKey {
            CacheKey::new("test").param("id", self.id)
        }

        fn load(&self) -> Result<RawSeries> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(DataError::NoData {
                    series: self.id.to_string(),
                });
            }
            let date = Date::from_ymd_opt(2024, 1, 1).unwrap();
            Ok(RawSeries::new(
                self.id,
                SeriesKind::Cpi,
                vec![Observation::new(date, 300.0)],
            ))
        }
    }

    #[test]
    fn test_loads_once() {
        let mut cache = SeriesCache::new();
        let source = CountingSource::new("cpi");

        let first = cache.get_or_load(&source).unwrap().clone();
        let second = cache.get_or_load(&source).unwrap().clone();
        assert_eq!(first, second);
        assert_eq!(source.loads.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_invalidate_forces_reload() {
        let mut cache = SeriesCache::new();
        let source = CountingSource::new("cpi");

        cache.get_or_load(&source).unwrap();
        assert!(cache.invalidate(&source.cache_key()));
        assert!(!cache.contains(&source.cache_key()));
        cache.get_or_load(&source).unwrap();
        assert_eq!(source.loads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_failures_not_cached() {
        let mut cache = SeriesCache::new();
        let source = CountingSource {
            fail: true,
            ..CountingSource::new("pe")
        };
        assert!(cache.get_or_load(&source).is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut cache = SeriesCache::new();
        cache.get_or_load(&CountingSource::new("a")).unwrap();
        cache.get_or_load(&CountingSource::new("b")).unwrap();
        assert_eq!(cache.len(), 2);
        cache.clear();
        assert!(cache.is_empty());
    }
}
