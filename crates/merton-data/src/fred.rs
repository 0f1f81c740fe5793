//! FRED `series/observations` documents.

use std::fs;
use std::path::PathBuf;

use merton_traits::{Observation, RawSeries, SeriesKind};
use serde::Deserialize;
use tracing::debug;

use crate::Result;
use crate::error::DataError;
use crate::parse::{parse_date, parse_value};
use crate::source::{CacheKey, SeriesSource};

/// Top-level FRED observations response.
#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    observations: Vec<FredObservation>,
}

/// One FRED observation. Values are strings; `.` means missing.
#[derive(Debug, Deserialize)]
struct FredObservation {
    date: String,
    value: String,
}

/// Loads a series from a saved FRED observations JSON document.
///
/// Documents may be sorted either way (`sort_order=desc` is common for yield
/// series); observations are returned in ascending date order.
#[derive(Debug, Clone)]
pub struct FredObservationsSource {
    name: String,
    kind: SeriesKind,
    path: PathBuf,
}

impl FredObservationsSource {
    /// Create a loader for `path`.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: SeriesKind, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            kind,
            path: path.into(),
        }
    }

    /// Parse a FRED observations document.
    pub fn parse(&self, text: &str) -> Result<RawSeries> {
        let response: ObservationsResponse =
            serde_json::from_str(text).map_err(|source| DataError::Json {
                series: self.name.clone(),
                source,
            })?;

        let mut observations = response
            .observations
            .iter()
            .enumerate()
            .map(|(i, obs)| {
                let parse_err = |reason: String| DataError::Parse {
                    series: self.name.clone(),
                    row: i + 1,
                    reason,
                };
                let date = parse_date(&obs.date)
                    .ok_or_else(|| parse_err(format!("date '{}' is not YYYY-MM-DD", obs.date)))?;
                let value = parse_value(&obs.value).map_err(parse_err)?;
                Ok(Observation { date, value })
            })
            .collect::<Result<Vec<_>>>()?;

        if observations.is_empty() {
            return Err(DataError::NoData {
                series: self.name.clone(),
            });
        }

        // Stable: duplicates keep their document order.
        observations.sort_by_key(|o| o.date);

        debug!(series = %self.name, rows = observations.len(), "parsed FRED observations");
        Ok(RawSeries::new(self.name.clone(), self.kind, observations))
    }
}

impl SeriesSource for FredObservationsSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> SeriesKind {
        self.kind
    }

    fn cache_key(&self) -> CacheKey {
        CacheKey::new("fred")
            .param("path", self.path.display().to_string())
            .param("kind", format!("{:?}", self.kind))
    }

    fn load(&self) -> Result<RawSeries> {
        let text = fs::read_to_string(&self.path).map_err(|source| DataError::Io {
            series: self.name.clone(),
            source,
        })?;
        self.parse(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use merton_traits::Date;

    fn source() -> FredObservationsSource {
        FredObservationsSource::new("tips", SeriesKind::RiskFreeYield, "tips.json")
    }

    #[test]
    fn test_parse_descending_document() {
        let text = r#"{
            "realtime_start": "2024-03-01",
            "observations": [
                {"realtime_start": "2024-03-01", "date": "2024-01-03", "value": "1.72"},
                {"realtime_start": "2024-03-01", "date": "2024-01-02", "value": "."},
                {"realtime_start": "2024-03-01", "date": "2024-01-01", "value": "1.70"}
            ]
        }"#;
        let series = source().parse(text).unwrap();
        let d = |day| Date::from_ymd_opt(2024, 1, day).unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series.observations[0], Observation::new(d(1), 1.70));
        assert_eq!(series.observations[1], Observation::missing(d(2)));
        assert_eq!(series.observations[2], Observation::new(d(3), 1.72));
    }

    #[test]
    fn test_parse_rejects_garbage_value() {
        let text = r#"{"observations": [{"date": "2024-01-01", "value": "abc"}]}"#;
        let err = source().parse(text).unwrap_err();
        assert!(matches!(err, DataError::Parse { row: 1, .. }));
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        let err = source().parse("{\"observations\": 3}").unwrap_err();
        assert!(matches!(err, DataError::Json { .. }));
    }

    #[test]
    fn test_empty_document() {
        let err = source().parse(r#"{"observations": []}"#).unwrap_err();
        assert!(matches!(err, DataError::NoData { .. }));
    }
}
