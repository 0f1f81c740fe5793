//! Allocation over the whole table.

use merton_metrics::risk::blend;
use merton_traits::{AllocationConfig, MergedTable, Result, RiskAversion, columns};
use tracing::{info, warn};

use crate::share::{Allocation, merton_share};
use crate::table::AllocationTable;

/// Applies the Merton share to every row of a derived metrics table.
///
/// Stateless: recomputing with the same inputs yields identical output.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllocationCalculator;

impl AllocationCalculator {
    /// Create a calculator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Add `Optimal_Bet_Fraction` and `Allocation_Status` using the table's
    /// current `Market_Risk`.
    pub fn merton_share(&self, table: &MergedTable, risk_aversion: RiskAversion) -> Result<MergedTable> {
        let real_yield = table.f64_column(columns::REAL_YIELD)?;
        let risk_free = table.f64_column(columns::TIPS_10YR)?;
        let market_risk = table.f64_column(columns::MARKET_RISK)?;

        let allocations: Vec<Allocation> = real_yield
            .iter()
            .zip(&risk_free)
            .zip(&market_risk)
            .map(|((ry, rf), risk)| merton_share(*ry, *rf, *risk, risk_aversion))
            .collect();

        let degenerate = allocations
            .iter()
            .filter(|a| matches!(a, Allocation::Degenerate))
            .count();
        if degenerate > 0 {
            warn!(rows = degenerate, "market risk is zero, allocation undefined on these rows");
        }

        let mut out = table.clone();
        out.set_column(
            columns::OPTIMAL_BET_FRACTION,
            allocations.iter().map(|a| a.fraction()).collect(),
        )?;
        out.set_str_column(
            columns::ALLOCATION_STATUS,
            allocations.iter().map(|a| a.status().as_str()).collect(),
        )?;
        Ok(out)
    }

    /// Re-blend market risk with the configured weight and apply the Merton
    /// share with the configured risk aversion.
    ///
    /// `derived` must carry the columns produced by
    /// [`DerivedMetricsEngine::compute`](merton_metrics::DerivedMetricsEngine::compute);
    /// nothing upstream is recomputed.
    pub fn recompute(&self, derived: &MergedTable, config: &AllocationConfig) -> Result<AllocationTable> {
        let short = derived.f64_column(columns::RISK_SHORT)?;
        let long = derived.f64_column(columns::RISK_LONG)?;
        let mut reblended = derived.clone();
        reblended.set_column(
            columns::MARKET_RISK,
            blend(&short, &long, config.longterm_weight),
        )?;
        let table = self.merton_share(&reblended, config.risk_aversion)?;
        info!(
            risk_aversion = config.risk_aversion.value(),
            longterm_weight = config.longterm_weight.long(),
            rows = table.height(),
            "allocation recomputed"
        );
        Ok(AllocationTable::new(table, *config))
    }
}
