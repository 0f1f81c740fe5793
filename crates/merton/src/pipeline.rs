//! End-to-end allocation pipeline.

use merton_align::{AlignerConfig, SeriesAligner, SeriesMerger};
use merton_alloc::{AllocationCalculator, AllocationTable};
use merton_data::{SeriesCache, SeriesSource};
use merton_metrics::DerivedMetricsEngine;
use merton_traits::{
    AllocationConfig, MergedTable, MertonError, PipelineConfig, RawSeries, Result, SeriesKind,
};
use tracing::info;

/// The four raw input series.
#[derive(Debug, Clone)]
pub struct PipelineInputs {
    /// Daily equity index close.
    pub price: RawSeries,
    /// Consumer price index.
    pub cpi: RawSeries,
    /// Index price/earnings ratio.
    pub pe_ratio: RawSeries,
    /// 10-year TIPS yield, in percent.
    pub risk_free: RawSeries,
}

impl PipelineInputs {
    /// Load all four series through `cache`.
    ///
    /// Sources already in the cache are not read again.
    pub fn load(
        cache: &mut SeriesCache,
        price: &dyn SeriesSource,
        cpi: &dyn SeriesSource,
        pe_ratio: &dyn SeriesSource,
        risk_free: &dyn SeriesSource,
    ) -> Result<Self> {
        Ok(Self {
            price: cache.get_or_load(price)?.clone(),
            cpi: cache.get_or_load(cpi)?.clone(),
            pe_ratio: cache.get_or_load(pe_ratio)?.clone(),
            risk_free: cache.get_or_load(risk_free)?.clone(),
        })
    }

    fn slots(&self) -> [(&RawSeries, SeriesKind); 4] {
        [
            (&self.price, SeriesKind::Price),
            (&self.cpi, SeriesKind::Cpi),
            (&self.pe_ratio, SeriesKind::PeRatio),
            (&self.risk_free, SeriesKind::RiskFreeYield),
        ]
    }
}

/// Collect, derive and allocate.
///
/// The stages are exposed separately so that a caller holding the derived
/// table from [`prelim`](Self::prelim) can call [`allocate`](Self::allocate)
/// again with new parameters without touching the inputs.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    aligner: SeriesAligner,
    merger: SeriesMerger,
    engine: DerivedMetricsEngine,
    calculator: AllocationCalculator,
}

impl Pipeline {
    /// Build a pipeline, validating `config`.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        let aligner = SeriesAligner::new(AlignerConfig {
            percent_to_fraction: config.percent_to_fraction,
        });
        let engine = DerivedMetricsEngine::new(config)?;
        Ok(Self {
            aligner,
            merger: SeriesMerger::new(),
            engine,
            calculator: AllocationCalculator::new(),
        })
    }

    /// The pipeline configuration.
    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        self.engine.config()
    }

    /// Align every input onto the price calendar and merge them.
    ///
    /// The price series is aligned to its own last date and the others to
    /// that same date. Every other series must have at least one value on
    /// the price calendar.
    pub fn collect(&self, inputs: &PipelineInputs) -> Result<MergedTable> {
        for (series, expected) in inputs.slots() {
            if series.kind != expected {
                return Err(MertonError::upstream(
                    &series.name,
                    format!("expected a {expected:?} series, got {:?}", series.kind),
                ));
            }
        }

        let price = self.aligner.align_to_own_end(&inputs.price)?;
        let end = price
            .end()
            .ok_or_else(|| MertonError::upstream(&inputs.price.name, "series is empty"))?;

        let others = [&inputs.cpi, &inputs.pe_ratio, &inputs.risk_free]
            .into_iter()
            .map(|raw| self.aligner.align(raw, end))
            .collect::<Result<Vec<_>>>()?;

        let table = self.merger.merge(&price, &others)?;
        for raw in [&inputs.cpi, &inputs.pe_ratio, &inputs.risk_free] {
            if table.f64_column(raw.kind.column())?.iter().all(Option::is_none) {
                return Err(MertonError::upstream(
                    &raw.name,
                    format!("no value on the price calendar ending {end}"),
                ));
            }
        }
        info!(rows = table.height(), start = %price.start(), %end, "inputs collected");
        Ok(table)
    }

    /// Add the derived metrics, with market risk blended evenly.
    pub fn prelim(&self, merged: &MergedTable) -> Result<MergedTable> {
        self.engine.compute(merged)
    }

    /// Re-blend market risk and apply the Merton share for `config`.
    pub fn allocate(&self, derived: &MergedTable, config: &AllocationConfig) -> Result<AllocationTable> {
        self.calculator.recompute(derived, config)
    }

    /// Run every stage.
    pub fn run(&self, inputs: &PipelineInputs, config: &AllocationConfig) -> Result<AllocationTable> {
        let merged = self.collect(inputs)?;
        let derived = self.prelim(&merged)?;
        self.allocate(&derived, config)
    }
}
