//! The derived metrics engine.

use merton_traits::{LongtermWeight, MergedTable, MertonError, PipelineConfig, Result, columns};
use tracing::{debug, info};

use crate::monthly::monthly_returns;
use crate::risk::RiskComponents;
use crate::valuation::{cape, deflate, earnings, real_yield};

/// Computes every derived column of the merged table.
///
/// The engine is stateless apart from its configuration; computing twice on
/// the same table yields identical output.
#[derive(Debug, Clone, Default)]
pub struct DerivedMetricsEngine {
    config: PipelineConfig,
}

impl DerivedMetricsEngine {
    /// Create an engine, validating the configuration.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The engine configuration.
    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Add all derived columns to `table`, blending market risk evenly.
    ///
    /// # Errors
    ///
    /// Fails with [`MertonError::UpstreamData`] when `Close`, `CPI` or
    /// `PE_Ratio` hold non-numeric data or no values at all, or when the final
    /// row has no CPI to restate prices with. Fails with
    /// [`MertonError::MissingColumn`] when one of them is absent.
    pub fn compute(&self, table: &MergedTable) -> Result<MergedTable> {
        let dates = table.dates()?;
        let close = required(table, columns::CLOSE)?;
        let cpi = required(table, columns::CPI)?;
        let pe_ratio = required(table, columns::PE_RATIO)?;

        let cpi_latest = cpi.last().copied().flatten().ok_or_else(|| {
            let last = dates.last().map(ToString::to_string).unwrap_or_default();
            MertonError::upstream(columns::CPI, format!("no CPI value on the final date {last}"))
        })?;

        let real_price = deflate(&close, &cpi, cpi_latest);
        let nominal_earnings = earnings(&close, &pe_ratio);
        let real_earnings = deflate(&nominal_earnings, &cpi, cpi_latest);
        let cape = cape(&real_price, &real_earnings, self.config.cape_window);
        let real_yield = real_yield(&cape);

        let returns = monthly_returns(&dates, &close, self.config.monthly_returns);
        let risk = RiskComponents::compute(
            &returns,
            self.config.short_risk_window,
            self.config.long_risk_window,
        );
        let market_risk = risk.blend(LongtermWeight::default());

        debug!(
            rows = dates.len(),
            cpi_latest,
            defined_cape = defined(&cape),
            defined_risk = defined(&market_risk),
            "computed derived columns"
        );

        let mut out = table.clone();
        out.set_column(columns::REAL_PRICE, real_price)?;
        out.set_column(columns::EARNINGS, nominal_earnings)?;
        out.set_column(columns::REAL_EARNINGS, real_earnings)?;
        out.set_column(columns::CAPE, cape)?;
        out.set_column(columns::REAL_YIELD, real_yield)?;
        out.set_column(columns::MONTHLY_RETURNS, returns)?;
        out.set_column(columns::RISK_SHORT, risk.short)?;
        out.set_column(columns::RISK_LONG, risk.long)?;
        out.set_column(columns::MARKET_RISK, market_risk)?;

        info!(rows = out.height(), "derived metrics ready");
        Ok(out)
    }
}

/// Read an input column that must carry at least one value.
fn required(table: &MergedTable, name: &str) -> Result<Vec<Option<f64>>> {
    let values = table.f64_column(name)?;
    if values.iter().all(Option::is_none) {
        return Err(MertonError::upstream(name, "column has no values"));
    }
    Ok(values)
}

fn defined(values: &[Option<f64>]) -> usize {
    values.iter().filter(|v| v.is_some()).count()
}
