//! Error types for input loading.

use merton_traits::MertonError;
use thiserror::Error;

/// Errors that can occur while loading an input series.
///
/// Every variant names the series it concerns, so the pipeline can report
/// which input failed.
#[derive(Debug, Error)]
pub enum DataError {
    /// The file could not be read.
    #[error("failed to read input: {source}")]
    Io {
        /// Series being loaded.
        series: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// CSV decoding failed.
    #[error("failed to parse CSV: {source}")]
    Csv {
        /// Series being loaded.
        series: String,
        /// Underlying CSV error.
        source: csv::Error,
    },

    /// JSON decoding failed.
    #[error("failed to parse JSON document: {source}")]
    Json {
        /// Series being loaded.
        series: String,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// A row carried an unparseable date or value.
    #[error("row {row}: {reason}")]
    Parse {
        /// Series being loaded.
        series: String,
        /// One-based data row number.
        row: usize,
        /// What could not be parsed.
        reason: String,
    },

    /// The input contained no observations.
    #[error("no observations")]
    NoData {
        /// Series being loaded.
        series: String,
    },
}

impl DataError {
    /// Name of the series that failed to load.
    #[must_use]
    pub fn series(&self) -> &str {
        match self {
            Self::Io { series, .. }
            | Self::Csv { series, .. }
            | Self::Json { series, .. }
            | Self::Parse { series, .. }
            | Self::NoData { series } => series,
        }
    }
}

impl From<DataError> for MertonError {
    fn from(err: DataError) -> Self {
        Self::upstream(err.series().to_string(), err.to_string())
    }
}
