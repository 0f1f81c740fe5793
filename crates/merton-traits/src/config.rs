//! Configuration value objects.
//!
//! Allocation parameters are validated newtypes: once an [`AllocationConfig`]
//! exists it is known to be in range, so the calculator never re-checks.
//! [`PipelineConfig`] carries the window sizes and other knobs of the derived
//! metrics and is loadable from JSON.

use serde::{Deserialize, Serialize};

use crate::error::{MertonError, Result};

/// Investable wealth. Finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize)]
pub struct Wealth(f64);

impl Wealth {
    /// Create a wealth value.
    pub fn new(value: f64) -> Result<Self> {
        if !value.is_finite() || value < 0.0 {
            return Err(MertonError::InvalidInput(format!(
                "wealth must be a non-negative number, got {value}"
            )));
        }
        Ok(Self(value))
    }

    /// Parse wealth from user text, e.g. `"250000"` or `" 1e6 "`.
    pub fn parse(text: &str) -> Result<Self> {
        let value = text.trim().parse::<f64>().map_err(|_| {
            MertonError::InvalidInput(format!("wealth '{text}' is not a valid number"))
        })?;
        Self::new(value)
    }

    /// The amount.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

/// Risk aversion coefficient, one of 1, 2 or 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RiskAversion(u8);

impl RiskAversion {
    /// Smallest accepted coefficient.
    pub const MIN: u8 = 1;
    /// Largest accepted coefficient.
    pub const MAX: u8 = 3;

    /// Create a coefficient.
    pub fn new(value: u8) -> Result<Self> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(MertonError::InvalidInput(format!(
                "risk aversion must be between {} and {}, got {value}",
                Self::MIN,
                Self::MAX
            )));
        }
        Ok(Self(value))
    }

    /// The coefficient.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// The coefficient as a float, for use in formulas.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }
}

impl Default for RiskAversion {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

/// Weight of the long-horizon volatility estimate, in `[0, 1]`.
///
/// The short-horizon estimate receives `1 - weight`. Out-of-range values are
/// rejected, never clamped.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct LongtermWeight(f64);

impl LongtermWeight {
    /// Create a weight.
    pub fn new(value: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&value) {
            return Err(MertonError::InvalidInput(format!(
                "long-term weight must be within [0, 1], got {value}"
            )));
        }
        Ok(Self(value))
    }

    /// Weight of the long-horizon estimate.
    #[must_use]
    pub const fn long(self) -> f64 {
        self.0
    }

    /// Weight of the short-horizon estimate.
    #[must_use]
    pub fn short(self) -> f64 {
        1.0 - self.0
    }
}

impl Default for LongtermWeight {
    fn default() -> Self {
        Self(0.5)
    }
}

/// Per-session allocation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct AllocationConfig {
    /// Investable wealth.
    pub wealth: Wealth,
    /// Risk aversion coefficient.
    pub risk_aversion: RiskAversion,
    /// Weight of the long-horizon volatility.
    pub longterm_weight: LongtermWeight,
}

impl AllocationConfig {
    /// Validate raw parameters into a configuration.
    ///
    /// Every parameter is checked before any computation can start.
    pub fn new(wealth: f64, risk_aversion: u8, longterm_weight: f64) -> Result<Self> {
        Ok(Self {
            wealth: Wealth::new(wealth)?,
            risk_aversion: RiskAversion::new(risk_aversion)?,
            longterm_weight: LongtermWeight::new(longterm_weight)?,
        })
    }
}

/// Where a month's return is written in the daily table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthlyPlacement {
    /// Every day of the month carries that month's return. The return uses
    /// the whole month's mean, so early days see later closes.
    #[default]
    WithinMonth,
    /// The return lands on the month's last calendar day and is carried
    /// forward until the next month-end.
    /// No row sees closes later than its own date.
    MonthEnd,
}

/// Knobs of the derived metrics engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Rows averaged for the CAPE denominator (ten 360-day years).
    pub cape_window: usize,
    /// Rows in the short-horizon volatility window (three 30-day months).
    pub short_risk_window: usize,
    /// Rows in the long-horizon volatility window (five 360-day years).
    pub long_risk_window: usize,
    /// Placement of monthly returns in the daily table.
    pub monthly_returns: MonthlyPlacement,
    /// Multiplier turning the quoted risk-free yield into a fraction.
    pub percent_to_fraction: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            cape_window: 30 * 12 * 10,
            short_risk_window: 90,
            long_risk_window: 30 * 12 * 5,
            monthly_returns: MonthlyPlacement::WithinMonth,
            percent_to_fraction: 0.01,
        }
    }
}

impl PipelineConfig {
    /// Check window sizes and the yield scale.
    pub fn validate(&self) -> Result<()> {
        if self.cape_window == 0 {
            return Err(MertonError::InvalidInput(
                "cape_window must be at least 1".to_string(),
            ));
        }
        for (name, window) in [
            ("short_risk_window", self.short_risk_window),
            ("long_risk_window", self.long_risk_window),
        ] {
            if window < 2 {
                return Err(MertonError::InvalidInput(format!(
                    "{name} must be at least 2, got {window}"
                )));
            }
        }
        if !self.percent_to_fraction.is_finite() || self.percent_to_fraction <= 0.0 {
            return Err(MertonError::InvalidInput(format!(
                "percent_to_fraction must be positive, got {}",
                self.percent_to_fraction
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_aversion_domain() {
        assert!(RiskAversion::new(0).is_err());
        assert!(RiskAversion::new(4).is_err());
        for v in 1..=3 {
            assert_eq!(RiskAversion::new(v).unwrap().value(), v);
        }
    }

    #[test]
    fn test_longterm_weight_domain() {
        assert!(LongtermWeight::new(1.5).is_err());
        assert!(LongtermWeight::new(-0.1).is_err());
        assert!(LongtermWeight::new(f64::NAN).is_err());

        let w = LongtermWeight::new(0.6).unwrap();
        assert_eq!(w.long(), 0.6);
        assert_eq!(w.short(), 1.0 - 0.6);
        assert!(LongtermWeight::new(0.0).is_ok());
        assert!(LongtermWeight::new(1.0).is_ok());
    }

    #[test]
    fn test_wealth_parse() {
        assert_eq!(Wealth::parse(" 2500.5 ").unwrap().value(), 2500.5);
        assert!(Wealth::parse("ten dollars").is_err());
        assert!(Wealth::parse("-1").is_err());
        assert!(Wealth::parse("inf").is_err());
        assert_eq!(Wealth::parse("0").unwrap().value(), 0.0);
    }

    #[test]
    fn test_allocation_config_rejects_before_use() {
        assert!(AllocationConfig::new(1000.0, 0, 0.5).is_err());
        assert!(AllocationConfig::new(1000.0, 4, 0.5).is_err());
        assert!(AllocationConfig::new(1000.0, 2, 1.5).is_err());
        assert!(AllocationConfig::new(-5.0, 2, 0.5).is_err());

        let cfg = AllocationConfig::new(1000.0, 2, 0.25).unwrap();
        assert_eq!(cfg.risk_aversion.value(), 2);
        assert_eq!(cfg.longterm_weight.long(), 0.25);
    }

    #[test]
    fn test_allocation_config_default() {
        let cfg = AllocationConfig::default();
        assert_eq!(cfg.wealth.value(), 0.0);
        assert_eq!(cfg.risk_aversion.value(), 1);
        assert_eq!(cfg.longterm_weight.long(), 0.5);
    }

    #[test]
    fn test_pipeline_config_defaults() {
        let cfg = PipelineConfig::default();
        assert_eq!(cfg.cape_window, 3600);
        assert_eq!(cfg.short_risk_window, 90);
        assert_eq!(cfg.long_risk_window, 1800);
        assert_eq!(cfg.monthly_returns, MonthlyPlacement::WithinMonth);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_pipeline_config_validation() {
        let cfg = PipelineConfig {
            short_risk_window: 1,
            ..PipelineConfig::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = PipelineConfig {
            cape_window: 0,
            ..PipelineConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_pipeline_config_partial_json() {
        let cfg: PipelineConfig =
            serde_json::from_str(r#"{"cape_window": 120, "monthly_returns": "month_end"}"#)
                .unwrap();
        assert_eq!(cfg.cape_window, 120);
        assert_eq!(cfg.long_risk_window, 1800);
        assert_eq!(cfg.monthly_returns, MonthlyPlacement::MonthEnd);
    }
}
