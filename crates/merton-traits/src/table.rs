//! The merged daily table.
//!
//! `MergedTable` wraps a Polars DataFrame with one row per calendar day. The
//! `Date` column is the index; every other column is `Float64` with null for
//! undefined values, except `Allocation_Status` which is a string column.

use polars::prelude::*;

use crate::error::{MertonError, Result};
use crate::types::Date;

/// Column names used throughout the pipeline.
pub mod columns {
    /// Calendar date index.
    pub const DATE: &str = "Date";
    /// Index close price.
    pub const CLOSE: &str = "Close";
    /// Consumer price index.
    pub const CPI: &str = "CPI";
    /// Price-to-earnings ratio.
    pub const PE_RATIO: &str = "PE_Ratio";
    /// Risk-free real yield as a fraction.
    pub const TIPS_10YR: &str = "TIPS_10yr";
    /// Close in today's purchasing power.
    pub const REAL_PRICE: &str = "Real_Price";
    /// Nominal earnings implied by the P/E ratio.
    pub const EARNINGS: &str = "Earnings";
    /// Earnings in today's purchasing power.
    pub const REAL_EARNINGS: &str = "Real_Earnings";
    /// Cyclically adjusted price-to-earnings ratio.
    pub const CAPE: &str = "CAPE";
    /// Earnings yield, the reciprocal of CAPE.
    pub const REAL_YIELD: &str = "Real_Yield";
    /// Month-over-month change of the monthly mean close.
    pub const MONTHLY_RETURNS: &str = "Monthly_Returns";
    /// Short-horizon volatility of monthly returns.
    pub const RISK_SHORT: &str = "Risk_Short";
    /// Long-horizon volatility of monthly returns.
    pub const RISK_LONG: &str = "Risk_Long";
    /// Blended market risk.
    pub const MARKET_RISK: &str = "Market_Risk";
    /// Merton share, as a fraction of wealth.
    pub const OPTIMAL_BET_FRACTION: &str = "Optimal_Bet_Fraction";
    /// Per-row allocation status.
    pub const ALLOCATION_STATUS: &str = "Allocation_Status";
}

/// Days between 0001-01-01 and 1970-01-01; Polars stores dates as days since the epoch.
const CE_TO_UNIX_EPOCH_DAYS: i32 = 719_163;

/// Daily table keyed by date.
///
/// # Example
///
/// ```no_run
/// use merton_traits::{Date, MergedTable};
///
/// let start = Date::from_ymd_opt(2024, 1, 1).unwrap();
/// let dates: Vec<Date> = start.iter_days().take(3).collect();
/// let mut table = MergedTable::from_dates(&dates).unwrap();
/// table.set_column("Close", vec![Some(1.0), None, Some(3.0)]).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct MergedTable {
    data: DataFrame,
}

impl MergedTable {
    /// Wrap a DataFrame, checking that it carries the `Date` index.
    pub fn new(data: DataFrame) -> Result<Self> {
        let has_date = data
            .get_column_names()
            .iter()
            .any(|s| s.as_str() == columns::DATE);
        if !has_date {
            return Err(MertonError::MissingColumn(columns::DATE.to_string()));
        }
        Ok(Self { data })
    }

    /// Create a table holding only the date index.
    pub fn from_dates(dates: &[Date]) -> Result<Self> {
        let date_col = Column::new(columns::DATE.into(), dates);
        Ok(Self {
            data: DataFrame::new(vec![date_col])?,
        })
    }

    /// Returns a reference to the underlying DataFrame.
    #[must_use]
    pub const fn data(&self) -> &DataFrame {
        &self.data
    }

    /// Consumes self and returns the underlying DataFrame.
    #[must_use]
    pub fn into_inner(self) -> DataFrame {
        self.data
    }

    /// Number of rows (calendar days).
    #[must_use]
    pub fn height(&self) -> usize {
        self.data.height()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.height() == 0
    }

    /// Column names in order.
    #[must_use]
    pub fn columns(&self) -> Vec<String> {
        self.data
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Checks if a column exists.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.data
            .get_column_names()
            .iter()
            .any(|s| s.as_str() == name)
    }

    /// Decode the date index.
    pub fn dates(&self) -> Result<Vec<Date>> {
        let col = self
            .data
            .column(columns::DATE)
            .map_err(|_| MertonError::MissingColumn(columns::DATE.to_string()))?;

        col.as_materialized_series()
            .date()?
            .into_iter()
            .map(|d: Option<i32>| {
                d.and_then(|days| Date::from_num_days_from_ce_opt(days + CE_TO_UNIX_EPOCH_DAYS))
                    .ok_or_else(|| MertonError::InvalidDate("null or out-of-range date".to_string()))
            })
            .collect()
    }

    /// Read a numeric column.
    ///
    /// A column that exists but is not `Float64` means an upstream series
    /// carried values of the wrong type; that is reported against the column.
    pub fn f64_column(&self, name: &str) -> Result<Vec<Option<f64>>> {
        let col = self
            .data
            .column(name)
            .map_err(|_| MertonError::MissingColumn(name.to_string()))?;

        let values = col
            .as_materialized_series()
            .f64()
            .map_err(|e| MertonError::upstream(name, format!("expected numeric values: {e}")))?;

        Ok(values.into_iter().collect())
    }

    /// Insert or replace a numeric column.
    pub fn set_column(&mut self, name: &str, values: Vec<Option<f64>>) -> Result<()> {
        self.check_height(name, values.len())?;
        self.data.with_column(Series::new(name.into(), values))?;
        Ok(())
    }

    /// Insert or replace a string column.
    pub fn set_str_column(&mut self, name: &str, values: Vec<&str>) -> Result<()> {
        self.check_height(name, values.len())?;
        self.data.with_column(Series::new(name.into(), values))?;
        Ok(())
    }

    /// Read a string column.
    pub fn str_column(&self, name: &str) -> Result<Vec<Option<String>>> {
        let col = self
            .data
            .column(name)
            .map_err(|_| MertonError::MissingColumn(name.to_string()))?;
        Ok(col
            .as_materialized_series()
            .str()?
            .into_iter()
            .map(|s: Option<&str>| s.map(str::to_string))
            .collect())
    }

    /// Value of a numeric column on the last row.
    pub fn last_value(&self, name: &str) -> Result<Option<f64>> {
        Ok(self.f64_column(name)?.last().copied().flatten())
    }

    fn check_height(&self, name: &str, len: usize) -> Result<()> {
        if len != self.data.height() {
            return Err(MertonError::InvalidInput(format!(
                "column '{name}' has {len} values but the table has {} rows",
                self.data.height()
            )));
        }
        Ok(())
    }
}

impl AsRef<DataFrame> for MergedTable {
    fn as_ref(&self) -> &DataFrame {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates(n: usize) -> Vec<Date> {
        Date::from_ymd_opt(2024, 1, 30)
            .unwrap()
            .iter_days()
            .take(n)
            .collect()
    }

    #[test]
    fn test_from_dates_roundtrips_index() {
        let ds = dates(4);
        let table = MergedTable::from_dates(&ds).unwrap();
        assert_eq!(table.height(), 4);
        assert_eq!(table.dates().unwrap(), ds);
    }

    #[test]
    fn test_new_requires_date_column() {
        let df = df! { "Close" => &[1.0, 2.0] }.unwrap();
        let err = MergedTable::new(df).unwrap_err();
        assert!(matches!(err, MertonError::MissingColumn(ref c) if c == "Date"));
    }

    #[test]
    fn test_set_and_read_column() {
        let mut table = MergedTable::from_dates(&dates(3)).unwrap();
        table
            .set_column(columns::CLOSE, vec![Some(1.0), None, Some(3.0)])
            .unwrap();
        assert!(table.has_column(columns::CLOSE));
        assert_eq!(
            table.f64_column(columns::CLOSE).unwrap(),
            vec![Some(1.0), None, Some(3.0)]
        );
        assert_eq!(table.last_value(columns::CLOSE).unwrap(), Some(3.0));
    }

    #[test]
    fn test_set_column_rejects_wrong_length() {
        let mut table = MergedTable::from_dates(&dates(3)).unwrap();
        assert!(table.set_column(columns::CPI, vec![Some(1.0)]).is_err());
    }

    #[test]
    fn test_non_numeric_column_is_upstream_error() {
        let df = df! {
            "Date" => dates(2),
            "CPI" => &["a", "b"],
        }
        .unwrap();
        let table = MergedTable::new(df).unwrap();
        let err = table.f64_column(columns::CPI).unwrap_err();
        assert!(matches!(err, MertonError::UpstreamData { ref series, .. } if series == "CPI"));
    }

    #[test]
    fn test_missing_column() {
        let table = MergedTable::from_dates(&dates(1)).unwrap();
        assert!(matches!(
            table.f64_column("nope"),
            Err(MertonError::MissingColumn(_))
        ));
    }

    #[test]
    fn test_string_column() {
        let mut table = MergedTable::from_dates(&dates(2)).unwrap();
        table
            .set_str_column(columns::ALLOCATION_STATUS, vec!["defined", "degenerate"])
            .unwrap();
        assert_eq!(
            table.str_column(columns::ALLOCATION_STATUS).unwrap(),
            vec![Some("defined".to_string()), Some("degenerate".to_string())]
        );
    }
}
