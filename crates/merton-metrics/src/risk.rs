//! Short- and long-horizon market risk.

use merton_traits::LongtermWeight;
use merton_traits::stats::rolling_std;

/// Rolling volatility of monthly returns over two horizons.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskComponents {
    /// Sample standard deviation over the short window.
    pub short: Vec<Option<f64>>,
    /// Sample standard deviation over the long window.
    pub long: Vec<Option<f64>>,
}

impl RiskComponents {
    /// Compute both horizons from daily monthly-return rows.
    #[must_use]
    pub fn compute(monthly_returns: &[Option<f64>], short_window: usize, long_window: usize) -> Self {
        Self {
            short: rolling_std(monthly_returns, short_window),
            long: rolling_std(monthly_returns, long_window),
        }
    }

    /// Blend the horizons: `(1 - w) * short + w * long`.
    #[must_use]
    pub fn blend(&self, weight: LongtermWeight) -> Vec<Option<f64>> {
        blend(&self.short, &self.long, weight)
    }
}

/// `(1 - w) * short + w * long` row by row; undefined unless both are defined.
#[must_use]
pub fn blend(
    short: &[Option<f64>],
    long: &[Option<f64>],
    weight: LongtermWeight,
) -> Vec<Option<f64>> {
    short
        .iter()
        .zip(long)
        .map(|(s, l)| match (s, l) {
            (Some(s), Some(l)) => Some(weight.short() * s + weight.long() * l),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_weight_normalization() {
        let short = vec![Some(0.02), Some(0.03)];
        let long = vec![Some(0.05), Some(0.01)];
        let w = LongtermWeight::new(0.6).unwrap();
        let out = blend(&short, &long, w);
        assert_eq!(out[0], Some(0.4 * 0.02 + 0.6 * 0.05));
        assert_eq!(out[1], Some(0.4 * 0.03 + 0.6 * 0.01));
    }

    #[test]
    fn test_default_blend_is_average() {
        let out = blend(&[Some(0.1)], &[Some(0.3)], LongtermWeight::default());
        assert_relative_eq!(out[0].unwrap(), 0.2);
    }

    #[test]
    fn test_blend_needs_both_horizons() {
        let out = blend(&[Some(0.1), None], &[None, Some(0.2)], LongtermWeight::default());
        assert_eq!(out, vec![None, None]);
    }

    #[test]
    fn test_components_warmup() {
        let returns: Vec<Option<f64>> = (0..10).map(|i| Some(f64::from(i % 3) * 0.01)).collect();
        let risk = RiskComponents::compute(&returns, 3, 6);
        assert!(risk.short[..2].iter().all(Option::is_none));
        assert!(risk.short[2].is_some());
        assert!(risk.long[..5].iter().all(Option::is_none));
        assert!(risk.long[5].is_some());

        let blended = risk.blend(LongtermWeight::new(1.0).unwrap());
        assert_eq!(blended[4], None);
        assert_eq!(blended[9], risk.long[9]);
    }
}
