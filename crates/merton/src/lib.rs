#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/merton/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # merton
//!
//! merton is an umbrella crate that re-exports all merton sub-crates and
//! chains them into a [`Pipeline`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use merton::data::{CsvSeriesSource, FredObservationsSource, SeriesCache};
//! use merton::{AllocationConfig, Pipeline, PipelineConfig, PipelineInputs, SeriesKind};
//!
//! # fn main() -> merton::Result<()> {
//! let mut cache = SeriesCache::new();
//! let inputs = PipelineInputs::load(
//!     &mut cache,
//!     &CsvSeriesSource::new("close", SeriesKind::Price, "data/sp500.csv"),
//!     &FredObservationsSource::new("cpi", SeriesKind::Cpi, "data/CPILFESL.json"),
//!     &CsvSeriesSource::new("pe", SeriesKind::PeRatio, "data/sp-500-pe.csv"),
//!     &FredObservationsSource::new("tips", SeriesKind::RiskFreeYield, "data/DFII10.json"),
//! )?;
//!
//! let pipeline = Pipeline::new(PipelineConfig::default())?;
//! let derived = pipeline.prelim(&pipeline.collect(&inputs)?)?;
//!
//! // Only the allocation stage runs again when parameters change.
//! for risk_aversion in 1..=3 {
//!     let config = AllocationConfig::new(100_000.0, risk_aversion, 0.5)?;
//!     let latest = pipeline.allocate(&derived, &config)?.latest()?;
//!     println!("{risk_aversion}: {:?}", latest.optimal_bet_fraction_pct());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Organization
//!
//! - [`traits`] - Shared types, configuration and errors
//! - [`align`] - Daily calendar alignment and merging
//! - [`metrics`] - CAPE, real yield, monthly returns and market risk
//! - [`allocation`] - Merton share and the allocation table
//! - [`data`] - CSV and FRED loaders with a load cache
//!
//! ## Architecture
//!
//! 1. **Collect**: every input is reindexed onto a gap-free daily calendar and
//!    left-joined onto the price dates
//! 2. **Prelim**: derived metrics are added; market risk is blended evenly
//! 3. **Allocate**: market risk is re-blended with the chosen long-term weight
//!    and the Merton share is evaluated on every row

mod pipeline;

pub use pipeline::{Pipeline, PipelineInputs};

/// Version information for the merton crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Core Types
// ============================================================================

/// Shared types, configuration value objects and errors.
pub mod traits {
    pub use merton_traits::*;
}

pub use merton_traits::{
    AllocationConfig, Date, LongtermWeight, MergedTable, MonthlyPlacement, PipelineConfig,
    RawSeries, RiskAversion, SeriesKind, Wealth, columns,
};
pub use merton_traits::{MertonError, Result};

// ============================================================================
// Stages
// ============================================================================

/// Daily calendar alignment and merging.
///
/// Prices are linearly interpolated across non-trading days; CPI, P/E and
/// the risk-free yield are carried forward from their last publication.
pub mod align {
    pub use merton_align::*;
}

/// Derived metrics.
///
/// ```text
/// Real_Price     = Close    * CPI_latest / CPI
/// Earnings       = Close / PE_Ratio
/// CAPE           = Real_Price / mean(Real_Earnings over 3600 rows)
/// Real_Yield     = 1 / CAPE
/// Market_Risk    = (1 - w) * std_90(returns) + w * std_1800(returns)
/// ```
pub mod metrics {
    pub use merton_metrics::*;
}

/// Merton share allocation.
pub mod allocation {
    pub use merton_alloc::*;
}

pub use merton_alloc::{Allocation, AllocationStatus, AllocationTable, LatestSummary};

// ============================================================================
// Data
// ============================================================================

/// Input series loaders.
pub mod data {
    pub use merton_data::*;
}

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```rust
/// use merton::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        AllocationConfig, AllocationTable, MertonError, Pipeline, PipelineConfig, PipelineInputs,
        Result, SeriesKind,
    };
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2, "Version should have at least major.minor");
    }

    #[test]
    fn test_data_errors_convert() {
        let err: MertonError = data::DataError::NoData {
            series: "cpi".to_string(),
        }
        .into();
        assert!(matches!(err, MertonError::UpstreamData { ref series, .. } if series == "cpi"));
    }
}
