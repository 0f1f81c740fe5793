//! Rolling-window statistics over daily rows.
//!
//! Windows count rows, not calendar periods. A window yields a value only when
//! it is full and every value in it is defined; otherwise the output row is
//! `None`. This matches the "undefined until enough history" rule of every
//! derived column.

use ndarray::{Array1, ArrayView1};

/// Minimum threshold below which a standard deviation is treated as zero.
pub const MIN_STD_THRESHOLD: f64 = 1e-12;

/// Trailing mean over `window` rows.
///
/// # Examples
///
/// ```
/// use merton_traits::stats::rolling_mean;
///
/// let values = vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)];
/// assert_eq!(rolling_mean(&values, 2), vec![None, Some(1.5), Some(2.5), Some(3.5)]);
/// ```
#[must_use]
pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, |view| view.mean())
}

/// Trailing sample standard deviation (`n - 1` denominator) over `window` rows.
///
/// Windows of fewer than two rows have no sample deviation and yield `None`
/// throughout.
///
/// # Examples
///
/// ```
/// use merton_traits::stats::rolling_std;
///
/// let values = vec![Some(1.0), Some(3.0), None, Some(5.0), Some(7.0)];
/// let std = rolling_std(&values, 2);
/// assert_eq!(std[0], None);
/// assert!((std[1].unwrap() - 2f64.sqrt()).abs() < 1e-12);
/// assert_eq!(std[2], None);
/// assert_eq!(std[3], None);
/// assert!((std[4].unwrap() - 2f64.sqrt()).abs() < 1e-12);
/// ```
#[must_use]
pub fn rolling_std(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    if window < 2 {
        return vec![None; values.len()];
    }
    rolling(values, window, |view| Some(view.std(1.0)))
}

/// Apply `stat` to every full, fully-defined trailing window.
fn rolling<F>(values: &[Option<f64>], window: usize, stat: F) -> Vec<Option<f64>>
where
    F: Fn(ArrayView1<'_, f64>) -> Option<f64>,
{
    let n = values.len();
    let mut out = vec![None; n];
    if window == 0 || window > n {
        return out;
    }

    let data: Array1<f64> = values.iter().map(|v| v.unwrap_or(f64::NAN)).collect();

    // Running count of undefined values inside the current window.
    let mut undefined = data
        .iter()
        .take(window)
        .filter(|v| !v.is_finite())
        .count();

    for (offset, view) in data.windows(window).into_iter().enumerate() {
        if offset > 0 {
            if !data[offset - 1].is_finite() {
                undefined -= 1;
            }
            if !data[offset + window - 1].is_finite() {
                undefined += 1;
            }
        }
        if undefined == 0 {
            out[offset + window - 1] = stat(view).filter(|v| v.is_finite());
        }
    }

    out
}

/// Sample standard deviation of the defined values in `values`.
///
/// Returns `None` with fewer than two defined values.
#[must_use]
pub fn sample_std(values: &[Option<f64>]) -> Option<f64> {
    let defined: Array1<f64> = values.iter().flatten().copied().collect();
    if defined.len() < 2 {
        return None;
    }
    Some(defined.std(1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn some(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    #[test]
    fn test_rolling_mean_warmup() {
        let out = rolling_mean(&some(&[1.0, 2.0, 3.0, 4.0, 5.0]), 3);
        assert_eq!(out[..2], [None, None]);
        assert_relative_eq!(out[2].unwrap(), 2.0);
        assert_relative_eq!(out[3].unwrap(), 3.0);
        assert_relative_eq!(out[4].unwrap(), 4.0);
    }

    #[test]
    fn test_rolling_mean_window_larger_than_input() {
        let out = rolling_mean(&some(&[1.0, 2.0]), 3);
        assert_eq!(out, vec![None, None]);
    }

    #[test]
    fn test_rolling_mean_gap_poisons_window() {
        let values = vec![Some(1.0), None, Some(3.0), Some(5.0), Some(7.0)];
        let out = rolling_mean(&values, 2);
        assert_eq!(out[1], None);
        assert_eq!(out[2], None);
        assert_relative_eq!(out[3].unwrap(), 4.0);
        assert_relative_eq!(out[4].unwrap(), 6.0);
    }

    #[test]
    fn test_rolling_std_sample() {
        // Sample std of [2, 4, 4, 4, 5, 5, 7, 9] is sqrt(32 / 7)
        let values = some(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        let out = rolling_std(&values, 8);
        assert!(out[..7].iter().all(Option::is_none));
        assert_relative_eq!(out[7].unwrap(), (32.0f64 / 7.0).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_rolling_std_constant_is_zero() {
        let out = rolling_std(&some(&[0.01; 5]), 3);
        assert_relative_eq!(out[4].unwrap(), 0.0);
    }

    #[test]
    fn test_rolling_std_window_of_one() {
        assert_eq!(rolling_std(&some(&[1.0, 2.0]), 1), vec![None, None]);
    }

    #[test]
    fn test_sample_std() {
        assert_eq!(sample_std(&[Some(1.0)]), None);
        assert_relative_eq!(
            sample_std(&[Some(1.0), None, Some(3.0)]).unwrap(),
            2f64.sqrt()
        );
    }
}
