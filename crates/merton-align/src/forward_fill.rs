//! Last-observation-carried-forward filling for step-like series.

use crate::filler::GapFiller;

/// Carries the most recent known value forward.
///
/// Used for CPI, P/E ratio and risk-free yield, which are published as
/// levels that hold until the next release.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForwardFill;

impl GapFiller for ForwardFill {
    fn fill(&self, values: &mut [Option<f64>]) {
        let mut last = None;
        for slot in values.iter_mut() {
            match slot {
                Some(v) => last = Some(*v),
                None => *slot = last,
            }
        }
    }

    fn name(&self) -> &str {
        "forward_fill"
    }
}
