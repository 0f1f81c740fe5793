#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/merton/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types for the Merton share allocation pipeline.
//!
//! This crate provides the vocabulary shared by every stage: raw and aligned
//! dated series, the merged daily table, configuration value objects and the
//! rolling-window statistics the derived metrics are built on.

/// The version of the merton-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod config;
pub mod error;
pub mod stats;
pub mod table;
pub mod types;

// Re-exports
pub use config::{
    AllocationConfig, LongtermWeight, MonthlyPlacement, PipelineConfig, RiskAversion, Wealth,
};
pub use error::{MertonError, Result};
pub use table::{MergedTable, columns};
pub use types::{DatedSeries, Date, FillPolicy, Observation, RawSeries, SeriesKind};
