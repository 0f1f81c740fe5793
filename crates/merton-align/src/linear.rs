//! Linear interpolation for continuously moving series.

use crate::filler::GapFiller;

/// Straight-line interpolation between bracketing known values.
///
/// Slots after the last known value carry that value; slots before the first
/// known value stay undefined.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearInterpolation;

impl GapFiller for LinearInterpolation {
    fn fill(&self, values: &mut [Option<f64>]) {
        let known: Vec<usize> = values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|_| i))
            .collect();

        for pair in known.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);
            if hi - lo < 2 {
                continue;
            }
            let (Some(v_lo), Some(v_hi)) = (values[lo], values[hi]) else {
                continue;
            };
            let span = (hi - lo) as f64;
            for (step, slot) in values[lo + 1..hi].iter_mut().enumerate() {
                let t = (step + 1) as f64 / span;
                *slot = Some(v_lo + (v_hi - v_lo) * t);
            }
        }

        if let Some(&last) = known.last() {
            let tail = values[last];
            for slot in values.iter_mut().skip(last + 1) {
                *slot = tail;
            }
        }
    }

    fn name(&self) -> &str {
        "linear"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_midpoint_is_average() {
        let mut values = vec![Some(100.0), None, None, None, Some(104.0)];
        LinearInterpolation.fill(&mut values);
        assert_relative_eq!(values[2].unwrap(), 102.0);
        assert_relative_eq!(values[1].unwrap(), 101.0);
        assert_relative_eq!(values[3].unwrap(), 103.0);
        assert_eq!(values[0], Some(100.0));
        assert_eq!(values[4], Some(104.0));
    }

    #[test]
    fn test_weekend_gap() {
        // Friday 10, Monday 16: Saturday and Sunday are 12 and 14
        let mut values = vec![Some(10.0), None, None, Some(16.0)];
        LinearInterpolation.fill(&mut values);
        assert_relative_eq!(values[1].unwrap(), 12.0);
        assert_relative_eq!(values[2].unwrap(), 14.0);
    }

    #[test]
    fn test_edges() {
        let mut values = vec![None, Some(1.0), None, Some(3.0), None, None];
        LinearInterpolation.fill(&mut values);
        assert_eq!(values[0], None);
        assert_relative_eq!(values[2].unwrap(), 2.0);
        assert_eq!(values[4], Some(3.0));
        assert_eq!(values[5], Some(3.0));
    }

    #[test]
    fn test_nothing_known() {
        let mut values = vec![None, None];
        LinearInterpolation.fill(&mut values);
        assert_eq!(values, vec![None, None]);
    }
}
