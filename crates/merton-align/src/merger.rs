//! Left-join of aligned series onto the price calendar.

use std::collections::HashSet;

use merton_traits::{DatedSeries, MergedTable, MertonError, Result, columns};
use tracing::debug;

/// Joins aligned series into a [`MergedTable`].
///
/// The index series (the price) defines the calendar. Every other series is
/// left-joined on date: dates the secondary series does not cover are null
/// in its column. Pure function of its inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeriesMerger;

impl SeriesMerger {
    /// Create a merger.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Merge `others` onto the calendar of `index`.
    ///
    /// Each series lands in the column named by its kind.
    ///
    /// # Errors
    ///
    /// Returns [`MertonError::UpstreamData`] if the index series is empty and
    /// [`MertonError::InvalidInput`] if two series map to the same column.
    pub fn merge(&self, index: &DatedSeries, others: &[DatedSeries]) -> Result<MergedTable> {
        if index.is_empty() {
            return Err(MertonError::upstream(index.name(), "series is empty"));
        }

        let mut seen = HashSet::new();
        seen.insert(index.kind().column());
        for series in others {
            let column = series.kind().column();
            if column == columns::DATE || !seen.insert(column) {
                return Err(MertonError::InvalidInput(format!(
                    "series '{}' maps to column '{column}' which is already present",
                    series.name()
                )));
            }
        }

        let dates = index.dates();
        let mut table = MergedTable::from_dates(&dates)?;
        table.set_column(index.kind().column(), index.values().to_vec())?;

        for series in others {
            let joined: Vec<Option<f64>> = dates.iter().map(|d| series.value_on(*d)).collect();
            let uncovered = joined.iter().filter(|v| v.is_none()).count();
            debug!(
                series = series.name(),
                column = series.kind().column(),
                uncovered,
                "joined series onto price calendar"
            );
            table.set_column(series.kind().column(), joined)?;
        }

        Ok(table)
    }
}
