//! Data loading utilities for the Merton CLI.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use merton::data::{CsvSeriesSource, FredObservationsSource, SeriesCache, SeriesSource};
use merton::{PipelineConfig, PipelineInputs, SeriesKind};

use crate::cmd::InputArgs;

/// Pick a loader from the file extension.
pub(crate) fn source_for(
    name: &str,
    kind: SeriesKind,
    path: &Path,
) -> Result<Box<dyn SeriesSource>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("csv") => Ok(Box::new(CsvSeriesSource::new(name, kind, path))),
        Some("json") => Ok(Box::new(FredObservationsSource::new(name, kind, path))),
        _ => bail!(
            "{name}: unsupported input file '{}', expected .csv or .json",
            path.display()
        ),
    }
}

/// Load the four input series.
pub(crate) fn load_inputs(args: &InputArgs) -> Result<PipelineInputs> {
    let price = source_for("close", SeriesKind::Price, &args.price)?;
    let cpi = source_for("cpi", SeriesKind::Cpi, &args.cpi)?;
    let pe = source_for("pe_ratio", SeriesKind::PeRatio, &args.pe)?;
    let tips = source_for("tips_10yr", SeriesKind::RiskFreeYield, &args.tips)?;

    let mut cache = SeriesCache::new();
    let inputs = PipelineInputs::load(
        &mut cache,
        price.as_ref(),
        cpi.as_ref(),
        pe.as_ref(),
        tips.as_ref(),
    )?;
    Ok(inputs)
}

/// Read a pipeline configuration file, or use the defaults.
pub(crate) fn load_pipeline_config(path: Option<&Path>) -> Result<PipelineConfig> {
    let Some(path) = path else {
        return Ok(PipelineConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config file '{}'", path.display()))?;
    parse_pipeline_config(&text).with_context(|| format!("in config file '{}'", path.display()))
}

/// Parse and validate a JSON pipeline configuration. Missing keys take
/// their default values.
pub(crate) fn parse_pipeline_config(text: &str) -> Result<PipelineConfig> {
    let config: PipelineConfig = serde_json::from_str(text)?;
    config.validate()?;
    Ok(config)
}
