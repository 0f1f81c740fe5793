//! CLI subcommand modules.
//!
//! Arguments shared by every subcommand live here.

pub(crate) mod allocate;
pub(crate) mod export;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use merton::{AllocationConfig, LongtermWeight, MergedTable, Pipeline, RiskAversion, Wealth};
use tracing::info;

use crate::data;

/// Input series files. Each accepts `.csv` or FRED observations `.json`.
#[derive(Debug, Args)]
pub(crate) struct InputArgs {
    /// Daily index close
    #[arg(long, env = "MERTON_PRICE")]
    pub(crate) price: PathBuf,

    /// Consumer price index
    #[arg(long, env = "MERTON_CPI")]
    pub(crate) cpi: PathBuf,

    /// Index P/E ratio
    #[arg(long, env = "MERTON_PE")]
    pub(crate) pe: PathBuf,

    /// 10-year TIPS yield, in percent
    #[arg(long, env = "MERTON_TIPS")]
    pub(crate) tips: PathBuf,

    /// Pipeline configuration (JSON)
    #[arg(long, env = "MERTON_CONFIG")]
    pub(crate) config: Option<PathBuf>,
}

/// Allocation parameters.
#[derive(Debug, Args)]
pub(crate) struct AllocationArgs {
    /// Investable wealth
    #[arg(short, long, env = "MERTON_WEALTH", default_value = "0")]
    pub(crate) wealth: String,

    /// Risk aversion (1, 2 or 3)
    #[arg(short, long, env = "MERTON_RISK_AVERSION", default_value_t = 1)]
    pub(crate) risk_aversion: u8,

    /// Weight of long-horizon volatility in market risk (0 to 1)
    #[arg(short, long, env = "MERTON_LONGTERM_WEIGHT", default_value_t = 0.5)]
    pub(crate) longterm_weight: f64,
}

impl AllocationArgs {
    /// Validate the parameters before any data is read.
    pub(crate) fn config(&self) -> Result<AllocationConfig> {
        Ok(AllocationConfig {
            wealth: Wealth::parse(&self.wealth)?,
            risk_aversion: RiskAversion::new(self.risk_aversion)?,
            longterm_weight: LongtermWeight::new(self.longterm_weight)?,
        })
    }
}

/// How `allocate` prints its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable summary
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Load inputs and compute the derived metrics table.
pub(crate) fn prepare(inputs: &InputArgs) -> Result<(Pipeline, MergedTable)> {
    let config = data::load_pipeline_config(inputs.config.as_deref())?;
    let pipeline = Pipeline::new(config)?;

    let series = data::load_inputs(inputs)?;
    let merged = pipeline.collect(&series).context("collecting input series")?;
    let derived = pipeline.prelim(&merged).context("computing derived metrics")?;
    info!(rows = derived.height(), "derived metrics ready");
    Ok((pipeline, derived))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(wealth: &str, risk_aversion: u8, longterm_weight: f64) -> AllocationArgs {
        AllocationArgs {
            wealth: wealth.to_string(),
            risk_aversion,
            longterm_weight,
        }
    }

    #[test]
    fn test_config_valid() {
        let config = args("2500.5", 3, 0.25).config().unwrap();
        assert_eq!(config.wealth.value(), 2500.5);
        assert_eq!(config.risk_aversion.value(), 3);
        assert_eq!(config.longterm_weight.long(), 0.25);
    }

    #[test]
    fn test_config_rejects_bad_values() {
        assert!(args("lots", 1, 0.5).config().is_err());
        assert!(args("-1", 1, 0.5).config().is_err());
        assert!(args("100", 4, 0.5).config().is_err());
        assert!(args("100", 1, 1.5).config().is_err());
    }
}
