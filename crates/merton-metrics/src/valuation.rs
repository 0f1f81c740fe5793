//! Inflation-adjusted valuation metrics.
//!
//! All functions are row-wise over aligned columns. A row is `None` when any
//! input is undefined or the arithmetic is not finite (e.g. a zero P/E).

use merton_traits::stats::rolling_mean;

fn finite(x: f64) -> Option<f64> {
    x.is_finite().then_some(x)
}

fn zip_with<F>(a: &[Option<f64>], b: &[Option<f64>], f: F) -> Vec<Option<f64>>
where
    F: Fn(f64, f64) -> f64,
{
    a.iter()
        .zip(b)
        .map(|(x, y)| match (x, y) {
            (Some(x), Some(y)) => finite(f(*x, *y)),
            _ => None,
        })
        .collect()
}

/// Restate `nominal` in the purchasing power of `cpi_latest`.
///
/// `nominal / cpi * cpi_latest`, row by row.
#[must_use]
pub fn deflate(nominal: &[Option<f64>], cpi: &[Option<f64>], cpi_latest: f64) -> Vec<Option<f64>> {
    zip_with(nominal, cpi, |n, c| n / c * cpi_latest)
}

/// Earnings implied by price and P/E ratio.
#[must_use]
pub fn earnings(close: &[Option<f64>], pe_ratio: &[Option<f64>]) -> Vec<Option<f64>> {
    zip_with(close, pe_ratio, |p, pe| p / pe)
}

/// Cyclically adjusted P/E: real price over the trailing `window`-row mean of
/// real earnings. Undefined for the first `window - 1` rows.
#[must_use]
pub fn cape(
    real_price: &[Option<f64>],
    real_earnings: &[Option<f64>],
    window: usize,
) -> Vec<Option<f64>> {
    let smoothed = rolling_mean(real_earnings, window);
    zip_with(real_price, &smoothed, |p, e| p / e)
}

/// Earnings yield, the reciprocal of CAPE.
#[must_use]
pub fn real_yield(cape: &[Option<f64>]) -> Vec<Option<f64>> {
    cape.iter()
        .map(|c| c.and_then(|c| finite(1.0 / c)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_real_price() {
        let out = deflate(&[Some(100.0)], &[Some(100.0)], 110.0);
        assert_relative_eq!(out[0].unwrap(), 110.0);
    }

    #[test]
    fn test_real_earnings() {
        let e = earnings(&[Some(100.0)], &[Some(20.0)]);
        assert_relative_eq!(e[0].unwrap(), 5.0);
        let real = deflate(&e, &[Some(100.0)], 110.0);
        assert_relative_eq!(real[0].unwrap(), 5.5, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_pe_is_undefined() {
        assert_eq!(earnings(&[Some(100.0)], &[Some(0.0)]), vec![None]);
    }

    #[test]
    fn test_missing_input_propagates() {
        let out = deflate(&[Some(100.0), None], &[None, Some(100.0)], 110.0);
        assert_eq!(out, vec![None, None]);
    }

    #[test]
    fn test_cape_window() {
        let price = vec![Some(40.0); 4];
        let real_earnings = vec![Some(1.0), Some(2.0), Some(3.0), Some(5.0)];
        let out = cape(&price, &real_earnings, 2);
        assert_eq!(out[0], None);
        assert_relative_eq!(out[1].unwrap(), 40.0 / 1.5);
        assert_relative_eq!(out[2].unwrap(), 40.0 / 2.5);
        assert_relative_eq!(out[3].unwrap(), 10.0);

        let ry = real_yield(&out);
        assert_eq!(ry[0], None);
        assert_relative_eq!(ry[3].unwrap(), 0.1);
    }
}
