//! Dated series types.
//!
//! A [`RawSeries`] is what an input provider hands over: observations in any
//! density, possibly with duplicates and explicit gaps. A [`DatedSeries`] is the
//! aligned form with exactly one slot per calendar day.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::table::columns;

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// How gaps in an aligned series are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillPolicy {
    /// Carry the most recent known value forward.
    ForwardFill,
    /// Straight line between the bracketing known values.
    Linear,
}

/// The four inputs the pipeline consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    /// Daily close of the equity index.
    Price,
    /// Core consumer price index.
    Cpi,
    /// Price-to-earnings ratio of the index.
    PeRatio,
    /// Real yield of the 10-year inflation-protected Treasury, in percent.
    RiskFreeYield,
}

impl SeriesKind {
    /// All kinds, in merge order.
    pub const ALL: [Self; 4] = [Self::Price, Self::Cpi, Self::PeRatio, Self::RiskFreeYield];

    /// Column name the aligned series occupies in the merged table.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Price => columns::CLOSE,
            Self::Cpi => columns::CPI,
            Self::PeRatio => columns::PE_RATIO,
            Self::RiskFreeYield => columns::TIPS_10YR,
        }
    }

    /// Gap-filling policy for this kind of series.
    ///
    /// Prices move continuously, everything else is published as steps.
    #[must_use]
    pub const fn fill_policy(self) -> FillPolicy {
        match self {
            Self::Price => FillPolicy::Linear,
            Self::Cpi | Self::PeRatio | Self::RiskFreeYield => FillPolicy::ForwardFill,
        }
    }

    /// Whether raw values are quoted in percent and need dividing by 100.
    #[must_use]
    pub const fn is_percent(self) -> bool {
        matches!(self, Self::RiskFreeYield)
    }
}

/// A single raw observation. `None` marks a published-but-missing value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Observation date.
    pub date: Date,
    /// Observed value, if any.
    pub value: Option<f64>,
}

impl Observation {
    /// Create an observation with a known value.
    #[must_use]
    pub const fn new(date: Date, value: f64) -> Self {
        Self {
            date,
            value: Some(value),
        }
    }

    /// Create an explicitly missing observation.
    #[must_use]
    pub const fn missing(date: Date) -> Self {
        Self { date, value: None }
    }
}

/// An input series as delivered by a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSeries {
    /// Human-readable name used in error messages.
    pub name: String,
    /// What the series measures.
    pub kind: SeriesKind,
    /// Observations in provider order.
    pub observations: Vec<Observation>,
}

impl RawSeries {
    /// Create a raw series.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: SeriesKind, observations: Vec<Observation>) -> Self {
        Self {
            name: name.into(),
            kind,
            observations,
        }
    }

    /// Number of observations, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the series has no observations at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Earliest observation date.
    #[must_use]
    pub fn first_date(&self) -> Option<Date> {
        self.observations.iter().map(|o| o.date).min()
    }

    /// Latest observation date.
    #[must_use]
    pub fn last_date(&self) -> Option<Date> {
        self.observations.iter().map(|o| o.date).max()
    }
}

/// A series with exactly one slot per calendar day, starting at `start`.
///
/// Dates are implicit: slot `i` belongs to `start + i days`, so the calendar can
/// never contain gaps or duplicates.
#[derive(Debug, Clone, PartialEq)]
pub struct DatedSeries {
    name: String,
    kind: SeriesKind,
    start: Date,
    values: Vec<Option<f64>>,
}

impl DatedSeries {
    /// Create an aligned series from its first date and daily values.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        kind: SeriesKind,
        start: Date,
        values: Vec<Option<f64>>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            start,
            values,
        }
    }

    /// Series name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Series kind.
    #[must_use]
    pub const fn kind(&self) -> SeriesKind {
        self.kind
    }

    /// First calendar day.
    #[must_use]
    pub const fn start(&self) -> Date {
        self.start
    }

    /// Last calendar day, or `None` for an empty series.
    #[must_use]
    pub fn end(&self) -> Option<Date> {
        self.date_at(self.values.len().checked_sub(1)?)
    }

    /// Number of daily slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the series has no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Daily values, one per calendar day.
    #[must_use]
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Calendar date of slot `index`.
    #[must_use]
    pub fn date_at(&self, index: usize) -> Option<Date> {
        if index >= self.values.len() {
            return None;
        }
        self.start
            .checked_add_signed(Duration::days(i64::try_from(index).ok()?))
    }

    /// Value on `date`, `None` if outside the calendar or undefined.
    #[must_use]
    pub fn value_on(&self, date: Date) -> Option<f64> {
        let offset = usize::try_from((date - self.start).num_days()).ok()?;
        self.values.get(offset).copied().flatten()
    }

    /// Iterate over `(date, value)` pairs.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = (Date, Option<f64>)> + '_ {
        self.start
            .iter_days()
            .zip(self.values.iter().copied())
    }

    /// All calendar dates of the series.
    #[must_use]
    pub fn dates(&self) -> Vec<Date> {
        self.iter().map(|(d, _)| d).collect()
    }

    /// Consume the series, returning its values.
    #[must_use]
    pub fn into_values(self) -> Vec<Option<f64>> {
        self.values
    }
}
