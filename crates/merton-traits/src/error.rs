//! Error types for the merton pipeline.
//!
//! Only conditions that abort a computation are errors. Rows that lack history
//! or produce a degenerate allocation are represented as nulls inside the table.

use thiserror::Error;

/// The main error type for merton operations.
#[derive(Debug, Error)]
pub enum MertonError {
    /// Configuration rejected before any computation starts.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A required input series is absent, empty or malformed.
    #[error("Invalid input series '{series}': {reason}")]
    UpstreamData {
        /// Name of the offending series.
        series: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A stage needs a column the table does not carry.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A date could not be parsed or represented.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

impl MertonError {
    /// Build an [`MertonError::UpstreamData`] for the named series.
    #[must_use]
    pub fn upstream(series: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UpstreamData {
            series: series.into(),
            reason: reason.into(),
        }
    }
}

/// A specialized Result type for merton operations.
pub type Result<T> = std::result::Result<T, MertonError>;
