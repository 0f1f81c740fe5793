//! Derived metrics for the merton allocation pipeline.
//!
//! Starting from the merged daily table (`Close`, `CPI`, `PE_Ratio`,
//! `TIPS_10yr`), this crate adds, in order:
//!
//! 1. `Real_Price` - close restated in the purchasing power of the last row
//! 2. `Earnings` - close divided by the P/E ratio
//! 3. `Real_Earnings` - earnings restated like the price
//! 4. `CAPE` - real price over the trailing mean of real earnings
//! 5. `Real_Yield` - reciprocal of CAPE
//! 6. `Monthly_Returns` - change in the monthly mean close, broadcast to days
//! 7. `Risk_Short`, `Risk_Long`, `Market_Risk` - rolling volatility of monthly
//!    returns and their weighted blend
//!
//! Every rolling column is null until its window holds enough history.
//!
//! # Examples
//!
//! ```rust,no_run
//! use merton_metrics::DerivedMetricsEngine;
//! use merton_traits::{MergedTable, PipelineConfig};
//!
//! # fn run(merged: &MergedTable) -> merton_traits::Result<()> {
//! let engine = DerivedMetricsEngine::new(PipelineConfig::default())?;
//! let derived = engine.compute(merged)?;
//! println!("{:?}", derived.last_value("CAPE")?);
//! # Ok(())
//! # }
//! ```

mod engine;
pub mod monthly;
pub mod risk;
pub mod valuation;

pub use engine::DerivedMetricsEngine;
