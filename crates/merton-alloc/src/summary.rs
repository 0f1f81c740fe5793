//! Most recent values for display.

use merton_traits::Date;
use serde::Serialize;

use crate::share::AllocationStatus;

/// Values of the last row of an allocation table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatestSummary {
    /// Date of the last row.
    pub date: Date,
    /// Earnings yield (1 / CAPE).
    pub real_yield: Option<f64>,
    /// Risk-free real yield, as a fraction.
    pub risk_free_rate: Option<f64>,
    /// Cyclically adjusted P/E.
    pub cape: Option<f64>,
    /// Blended market risk.
    pub market_risk: Option<f64>,
    /// Merton share as a fraction of wealth.
    pub optimal_bet_fraction: Option<f64>,
    /// Whether the allocation on the last row is defined.
    pub status: AllocationStatus,
    /// Investable wealth from the configuration.
    pub wealth: f64,
    /// `wealth * optimal_bet_fraction`.
    pub wealth_to_invest: Option<f64>,
}

impl LatestSummary {
    /// Merton share in percent.
    #[must_use]
    pub fn optimal_bet_fraction_pct(&self) -> Option<f64> {
        self.optimal_bet_fraction.map(|f| f * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_and_serialization() {
        let summary = LatestSummary {
            date: Date::from_ymd_opt(2024, 6, 30).unwrap(),
            real_yield: Some(0.04),
            risk_free_rate: Some(0.01),
            cape: Some(25.0),
            market_risk: Some(0.15),
            optimal_bet_fraction: Some(0.5),
            status: AllocationStatus::Defined,
            wealth: 1000.0,
            wealth_to_invest: Some(500.0),
        };
        assert_eq!(summary.optimal_bet_fraction_pct(), Some(50.0));

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["date"], "2024-06-30");
        assert_eq!(json["status"], "defined");
        assert_eq!(json["wealth_to_invest"], 500.0);
    }
}
