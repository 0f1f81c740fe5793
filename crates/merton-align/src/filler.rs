//! Core trait definition for gap-filling strategies.

use merton_traits::FillPolicy;

use crate::{ForwardFill, LinearInterpolation};

/// Fills undefined slots of a daily series in place.
///
/// Slots are one calendar day apart. Implementations must never look ahead
/// past the last known value, and must leave slots before the first known
/// value undefined.
///
/// # Examples
///
/// ```rust
/// use merton_align::GapFiller;
///
/// struct ZeroFill;
///
/// impl GapFiller for ZeroFill {
///     fn fill(&self, values: &mut [Option<f64>]) {
///         for v in values.iter_mut() {
///             v.get_or_insert(0.0);
///         }
///     }
///
///     fn name(&self) -> &str {
///         "zero_fill"
///     }
/// }
/// ```
pub trait GapFiller: Send + Sync {
    /// Fill gaps in `values`, one slot per calendar day.
    fn fill(&self, values: &mut [Option<f64>]);

    /// Name of this strategy, used in logs.
    fn name(&self) -> &str;
}

/// The filler implementing `policy`.
#[must_use]
pub fn filler_for(policy: FillPolicy) -> Box<dyn GapFiller> {
    match policy {
        FillPolicy::ForwardFill => Box::new(ForwardFill),
        FillPolicy::Linear => Box::new(LinearInterpolation),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filler_for_policy() {
        assert_eq!(filler_for(FillPolicy::ForwardFill).name(), "forward_fill");
        assert_eq!(filler_for(FillPolicy::Linear).name(), "linear");
    }
}
