//! Input series for merton.
//!
//! The pipeline only needs dated `(date, value)` pairs. This crate turns files
//! saved from the upstream providers into [`RawSeries`](merton_traits::RawSeries)
//! and memoizes loads so that changing allocation parameters never re-reads
//! inputs.
//!
//! Supported formats:
//!
//! - two-column CSV (`date,value`), as exported by most data portals
//! - FRED `series/observations` JSON documents, where `.` marks a missing value
//!
//! # Usage
//!
//! ```rust,no_run
//! use merton_data::{CsvSeriesSource, FredObservationsSource, SeriesCache};
//! use merton_traits::SeriesKind;
//!
//! let mut cache = SeriesCache::new();
//! let cpi = FredObservationsSource::new("cpi", SeriesKind::Cpi, "data/CPILFESL.json");
//! let pe = CsvSeriesSource::new("pe", SeriesKind::PeRatio, "data/sp-500-pe.csv");
//!
//! let cpi_series = cache.get_or_load(&cpi)?.clone();
//! let pe_series = cache.get_or_load(&pe)?.clone();
//! # Ok::<(), merton_data::DataError>(())
//! ```

mod cache;
mod csv_source;
mod error;
mod fred;
mod parse;
mod source;

pub use cache::SeriesCache;
pub use csv_source::CsvSeriesSource;
pub use error::DataError;
pub use fred::FredObservationsSource;
pub use parse::{parse_date, parse_value};
pub use source::{CacheKey, SeriesSource};

/// Result type for data loading operations.
pub type Result<T> = std::result::Result<T, DataError>;
