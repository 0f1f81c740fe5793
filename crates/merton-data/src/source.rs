//! Source abstraction and cache keys.

use std::collections::BTreeMap;

use merton_traits::{RawSeries, SeriesKind};

use crate::Result;

/// Identifies a load by source and parameters.
///
/// Parameters are kept in a `BTreeMap` so equal keys compare and hash
/// identically regardless of insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey {
    /// Source type, e.g. `csv` or `fred`.
    pub source: String,
    /// Load parameters.
    pub params: BTreeMap<String, String>,
}

impl CacheKey {
    /// Create a key with no parameters.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            params: BTreeMap::new(),
        }
    }

    /// Add a parameter.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }
}

/// Something that produces one raw input series.
pub trait SeriesSource: Send + Sync {
    /// Series name used in logs and errors.
    fn name(&self) -> &str;

    /// What the series measures.
    fn kind(&self) -> SeriesKind;

    /// Key identifying this load for memoization.
    fn cache_key(&self) -> CacheKey;

    /// Load the series.
    fn load(&self) -> Result<RawSeries>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_order_independent() {
        let a = CacheKey::new("fred")
            .param("series_id", "CPILFESL")
            .param("frequency", "m");
        let b = CacheKey::new("fred")
            .param("frequency", "m")
            .param("series_id", "CPILFESL");
        assert_eq!(a, b);
    }

    #[test]
    fn test_key_distinguishes_params() {
        let a = CacheKey::new("csv").param("path", "a.csv");
        let b = CacheKey::new("csv").param("path", "b.csv");
        assert_ne!(a, b);
    }
}
