//! The final allocation table.

use std::io::Write;

use merton_traits::{AllocationConfig, Date, MergedTable, MertonError, Result, columns};
use polars::prelude::*;

use crate::share::{Allocation, AllocationStatus};
use crate::summary::LatestSummary;

/// Full history with one allocation per date, plus the configuration that
/// produced it.
#[derive(Debug, Clone)]
pub struct AllocationTable {
    table: MergedTable,
    config: AllocationConfig,
}

impl AllocationTable {
    pub(crate) const fn new(table: MergedTable, config: AllocationConfig) -> Self {
        Self { table, config }
    }

    /// The merged table with every derived and allocation column.
    #[must_use]
    pub const fn table(&self) -> &MergedTable {
        &self.table
    }

    /// The underlying DataFrame.
    #[must_use]
    pub const fn frame(&self) -> &DataFrame {
        self.table.data()
    }

    /// The configuration used.
    #[must_use]
    pub const fn config(&self) -> &AllocationConfig {
        &self.config
    }

    /// Number of rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.table.height()
    }

    /// Allocation outcome on every date.
    pub fn allocations(&self) -> Result<Vec<(Date, Allocation)>> {
        let dates = self.table.dates()?;
        let fractions = self.table.f64_column(columns::OPTIMAL_BET_FRACTION)?;
        let statuses = self.table.str_column(columns::ALLOCATION_STATUS)?;

        dates
            .into_iter()
            .zip(fractions)
            .zip(statuses)
            .map(|((date, fraction), status)| {
                let status = parse_status(status.as_deref())?;
                let allocation = match (status, fraction) {
                    (AllocationStatus::Defined, Some(f)) => Allocation::Fraction(f),
                    (AllocationStatus::Degenerate, _) => Allocation::Degenerate,
                    _ => Allocation::InsufficientHistory,
                };
                Ok((date, allocation))
            })
            .collect()
    }

    /// Values of the most recent row, with the wealth to invest.
    pub fn latest(&self) -> Result<LatestSummary> {
        let date = self
            .table
            .dates()?
            .last()
            .copied()
            .ok_or_else(|| MertonError::InvalidInput("allocation table is empty".to_string()))?;

        let status = self
            .table
            .str_column(columns::ALLOCATION_STATUS)?
            .pop()
            .flatten();
        let status = parse_status(status.as_deref())?;

        let optimal_bet_fraction = self.table.last_value(columns::OPTIMAL_BET_FRACTION)?;
        let wealth = self.config.wealth.value();

        Ok(LatestSummary {
            date,
            real_yield: self.table.last_value(columns::REAL_YIELD)?,
            risk_free_rate: self.table.last_value(columns::TIPS_10YR)?,
            cape: self.table.last_value(columns::CAPE)?,
            market_risk: self.table.last_value(columns::MARKET_RISK)?,
            optimal_bet_fraction,
            status,
            wealth,
            wealth_to_invest: optimal_bet_fraction.map(|f| wealth * f),
        })
    }

    /// Write the full table as CSV with a header row.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut frame = self.table.data().clone();
        CsvWriter::new(writer)
            .include_header(true)
            .finish(&mut frame)?;
        Ok(())
    }
}

fn parse_status(label: Option<&str>) -> Result<AllocationStatus> {
    label.and_then(AllocationStatus::parse).ok_or_else(|| {
        MertonError::InvalidInput(format!(
            "unknown allocation status {:?}",
            label.unwrap_or("null")
        ))
    })
}
