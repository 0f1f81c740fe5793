//! Daily calendar alignment for merton input series.
//!
//! Input providers publish at different frequencies: prices daily with
//! weekend gaps, CPI monthly, P/E ratios irregularly. This crate puts every
//! series onto a gap-free daily calendar and joins them into one table keyed
//! by the price series' dates.
//!
//! # Examples
//!
//! ```rust,no_run
//! use merton_align::{SeriesAligner, SeriesMerger};
//! use merton_traits::{Date, Observation, RawSeries, SeriesKind};
//!
//! let d = |m, day| Date::from_ymd_opt(2024, m, day).unwrap();
//! let price = RawSeries::new(
//!     "close",
//!     SeriesKind::Price,
//!     vec![Observation::new(d(1, 2), 100.0), Observation::new(d(1, 5), 103.0)],
//! );
//! let cpi = RawSeries::new("cpi", SeriesKind::Cpi, vec![Observation::new(d(1, 1), 310.0)]);
//!
//! let aligner = SeriesAligner::default();
//! let price = aligner.align_to_own_end(&price).unwrap();
//! let end = price.end().unwrap();
//! let cpi = aligner.align(&cpi, end).unwrap();
//!
//! let table = SeriesMerger::new().merge(&price, &[cpi]).unwrap();
//! assert_eq!(table.height(), 4);
//! ```

mod aligner;
mod filler;
mod forward_fill;
mod linear;
mod merger;

// Re-export main types
pub use aligner::{AlignerConfig, SeriesAligner};
pub use filler::{GapFiller, filler_for};
pub use forward_fill::ForwardFill;
pub use linear::LinearInterpolation;
pub use merger::SeriesMerger;
