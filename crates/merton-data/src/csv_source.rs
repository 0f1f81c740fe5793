//! Two-column CSV loader.

use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use merton_traits::{Observation, RawSeries, SeriesKind};
use tracing::debug;

use crate::Result;
use crate::error::DataError;
use crate::parse::{parse_date, parse_value};
use crate::source::{CacheKey, SeriesSource};

/// Loads a series from a CSV file with a header row.
///
/// By default the first column is the date and the second the value; named
/// columns can be selected with [`with_columns`](Self::with_columns).
#[derive(Debug, Clone)]
pub struct CsvSeriesSource {
    name: String,
    kind: SeriesKind,
    path: PathBuf,
    columns: Option<(String, String)>,
}

impl CsvSeriesSource {
    /// Create a loader for `path`.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: SeriesKind, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            kind,
            path: path.into(),
            columns: None,
        }
    }

    /// Select the date and value columns by header name.
    #[must_use]
    pub fn with_columns(mut self, date: impl Into<String>, value: impl Into<String>) -> Self {
        self.columns = Some((date.into(), value.into()));
        self
    }

    /// Parse CSV text from any reader.
    pub fn read<R: Read>(&self, reader: R) -> Result<RawSeries> {
        let csv_err = |source| DataError::Csv {
            series: self.name.clone(),
            source,
        };

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers().map_err(csv_err)?.clone();
        let (date_idx, value_idx) = match &self.columns {
            Some((date, value)) => (
                self.position(&headers, date)?,
                self.position(&headers, value)?,
            ),
            None => (0, 1),
        };

        let mut observations = Vec::new();
        for (i, record) in rdr.records().enumerate() {
            let row = i + 1;
            let record = record.map_err(csv_err)?;
            let parse_err = |reason: String| DataError::Parse {
                series: self.name.clone(),
                row,
                reason,
            };

            let date_text = record
                .get(date_idx)
                .ok_or_else(|| parse_err("missing date field".to_string()))?;
            let date = parse_date(date_text)
                .ok_or_else(|| parse_err(format!("date '{date_text}' is not YYYY-MM-DD")))?;
            let value_text = record.get(value_idx).unwrap_or("");
            let value = parse_value(value_text).map_err(parse_err)?;

            observations.push(Observation { date, value });
        }

        if observations.is_empty() {
            return Err(DataError::NoData {
                series: self.name.clone(),
            });
        }

        debug!(series = %self.name, rows = observations.len(), "parsed CSV series");
        Ok(RawSeries::new(self.name.clone(), self.kind, observations))
    }

    fn position(&self, headers: &csv::StringRecord, column: &str) -> Result<usize> {
        headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| DataError::Parse {
                series: self.name.clone(),
                row: 0,
                reason: format!("no '{column}' column in header"),
            })
    }
}

impl SeriesSource for CsvSeriesSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> SeriesKind {
        self.kind
    }

    fn cache_key(&self) -> CacheKey {
        let key = CacheKey::new("csv")
            .param("path", self.path.display().to_string())
            .param("kind", format!("{:?}", self.kind));
        match &self.columns {
            Some((date, value)) => key.param("date_column", date).param("value_column", value),
            None => key,
        }
    }

    fn load(&self) -> Result<RawSeries> {
        let file = File::open(&self.path).map_err(|source| DataError::Io {
            series: self.name.clone(),
            source,
        })?;
        self.read(file)
    }
}
