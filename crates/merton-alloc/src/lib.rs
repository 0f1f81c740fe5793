//! Merton share allocation for merton.
//!
//! The optimal fraction of wealth to hold in the equity index is
//!
//! ```text
//! (Real_Yield - TIPS_10yr) / (risk_aversion * Market_Risk^2)
//! ```
//!
//! evaluated on every row of the derived metrics table. Rows without enough
//! history, or with zero market risk, are marked as undefined rather than
//! producing infinities.
//!
//! # Examples
//!
//! ```rust,no_run
//! use merton_alloc::AllocationCalculator;
//! use merton_traits::{AllocationConfig, MergedTable};
//!
//! # fn run(derived: &MergedTable) -> merton_traits::Result<()> {
//! let calculator = AllocationCalculator::default();
//! let config = AllocationConfig::new(100_000.0, 2, 0.5)?;
//! let allocation = calculator.recompute(derived, &config)?;
//! let latest = allocation.latest()?;
//! println!("invest {:?}", latest.wealth_to_invest);
//! # Ok(())
//! # }
//! ```

mod calculator;
mod share;
mod summary;
mod table;

pub use calculator::AllocationCalculator;
pub use share::{Allocation, AllocationStatus, merton_share};
pub use summary::LatestSummary;
pub use table::AllocationTable;
