//! Reindexing of raw series onto a full daily calendar.

use std::collections::HashSet;

use merton_traits::{DatedSeries, Date, MertonError, Observation, RawSeries, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::filler::filler_for;

/// Configuration for series alignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlignerConfig {
    /// Multiplier applied to series quoted in percent.
    pub percent_to_fraction: f64,
}

impl Default for AlignerConfig {
    fn default() -> Self {
        Self {
            percent_to_fraction: 0.01,
        }
    }
}

/// Puts a raw series onto one slot per calendar day.
///
/// The calendar runs from the earliest observation to the later of the
/// requested end date and the last observation, so observed data is never
/// dropped. Duplicate dates keep their first occurrence. Gaps are filled by
/// the series kind's [`FillPolicy`](merton_traits::FillPolicy).
#[derive(Debug, Clone, Default)]
pub struct SeriesAligner {
    config: AlignerConfig,
}

impl SeriesAligner {
    /// Create an aligner with the given configuration.
    #[must_use]
    pub const fn new(config: AlignerConfig) -> Self {
        Self { config }
    }

    /// Align `raw` onto the calendar `[first observation, target_end]`.
    ///
    /// # Errors
    ///
    /// Returns [`MertonError::UpstreamData`] if the series is empty, has no
    /// defined value at all, or contains non-finite values.
    pub fn align(&self, raw: &RawSeries, target_end: Date) -> Result<DatedSeries> {
        let observations = self.prepare(raw)?;

        let (Some(first), Some(last)) = (observations.first(), observations.last()) else {
            return Err(MertonError::upstream(&raw.name, "series is empty"));
        };
        let start = first.date;
        let end = if target_end < last.date {
            debug!(
                series = %raw.name,
                %target_end,
                last_observed = %last.date,
                "end date precedes last observation, extending calendar"
            );
            last.date
        } else {
            target_end
        };

        let len = usize::try_from((end - start).num_days() + 1)
            .map_err(|_| MertonError::InvalidDate(format!("{start} .. {end}")))?;
        let scale = if raw.kind.is_percent() {
            self.config.percent_to_fraction
        } else {
            1.0
        };

        let mut values = vec![None; len];
        for obs in &observations {
            // Offsets are non-negative: observations are sorted and start at `start`.
            let offset = (obs.date - start).num_days() as usize;
            values[offset] = obs.value.map(|v| v * scale);
        }

        let filler = filler_for(raw.kind.fill_policy());
        filler.fill(&mut values);

        debug!(
            series = %raw.name,
            filler = filler.name(),
            observations = observations.len(),
            rows = len,
            %start,
            %end,
            "aligned series"
        );

        Ok(DatedSeries::new(raw.name.clone(), raw.kind, start, values))
    }

    /// Align `raw` onto a calendar ending at its own last observation.
    pub fn align_to_own_end(&self, raw: &RawSeries) -> Result<DatedSeries> {
        let end = raw
            .last_date()
            .ok_or_else(|| MertonError::upstream(&raw.name, "series is empty"))?;
        self.align(raw, end)
    }

    /// Validate, deduplicate and sort observations.
    fn prepare(&self, raw: &RawSeries) -> Result<Vec<Observation>> {
        if raw.is_empty() {
            return Err(MertonError::upstream(&raw.name, "series is empty"));
        }

        if let Some(bad) = raw
            .observations
            .iter()
            .find(|o| o.value.is_some_and(|v| !v.is_finite()))
        {
            return Err(MertonError::upstream(
                &raw.name,
                format!("non-finite value on {}", bad.date),
            ));
        }

        if raw.observations.iter().all(|o| o.value.is_none()) {
            return Err(MertonError::upstream(&raw.name, "series has no values"));
        }

        let mut seen = HashSet::with_capacity(raw.len());
        let mut observations: Vec<Observation> = raw
            .observations
            .iter()
            .filter(|o| seen.insert(o.date))
            .copied()
            .collect();

        let dropped = raw.len() - observations.len();
        if dropped > 0 {
            warn!(series = %raw.name, dropped, "dropped duplicate dates, keeping first occurrence");
        }

        // Dates are unique after dedup.
        observations.sort_by_key(|o| o.date);
        Ok(observations)
    }
}
