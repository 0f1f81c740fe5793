//! The Merton share formula for a single row.

use merton_traits::RiskAversion;
use merton_traits::stats::MIN_STD_THRESHOLD;
use serde::{Deserialize, Serialize};

/// Why a row does or does not carry an allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationStatus {
    /// The allocation is a finite number.
    Defined,
    /// Real yield, risk-free yield or market risk is not yet defined.
    InsufficientHistory,
    /// Market risk is zero, so the formula divides by zero.
    Degenerate,
}

impl AllocationStatus {
    /// Label written to the `Allocation_Status` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Defined => "defined",
            Self::InsufficientHistory => "insufficient_history",
            Self::Degenerate => "degenerate",
        }
    }

    /// Parse a label written by [`as_str`](Self::as_str).
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "defined" => Some(Self::Defined),
            "insufficient_history" => Some(Self::InsufficientHistory),
            "degenerate" => Some(Self::Degenerate),
            _ => None,
        }
    }
}

/// Outcome of the Merton share on one row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Allocation {
    /// Fraction of wealth to invest; may be negative or above one.
    Fraction(f64),
    /// An input is not yet defined on this row.
    InsufficientHistory,
    /// Market risk is zero.
    Degenerate,
}

impl Allocation {
    /// The fraction, if defined.
    #[must_use]
    pub const fn fraction(self) -> Option<f64> {
        match self {
            Self::Fraction(f) => Some(f),
            _ => None,
        }
    }

    /// The fraction in percent, if defined.
    #[must_use]
    pub fn percent(self) -> Option<f64> {
        self.fraction().map(|f| f * 100.0)
    }

    /// Status label of this outcome.
    #[must_use]
    pub const fn status(self) -> AllocationStatus {
        match self {
            Self::Fraction(_) => AllocationStatus::Defined,
            Self::InsufficientHistory => AllocationStatus::InsufficientHistory,
            Self::Degenerate => AllocationStatus::Degenerate,
        }
    }
}

/// `(real_yield - risk_free) / (risk_aversion * market_risk^2)`.
///
/// # Examples
///
/// ```
/// use merton_alloc::merton_share;
/// use merton_traits::RiskAversion;
///
/// let ra = RiskAversion::new(2).unwrap();
/// let share = merton_share(Some(0.04), Some(0.01), Some(0.15), ra);
/// assert!((share.fraction().unwrap() - 0.6667).abs() < 1e-4);
/// ```
#[must_use]
pub fn merton_share(
    real_yield: Option<f64>,
    risk_free: Option<f64>,
    market_risk: Option<f64>,
    risk_aversion: RiskAversion,
) -> Allocation {
    let (Some(real_yield), Some(risk_free), Some(market_risk)) = (real_yield, risk_free, market_risk)
    else {
        return Allocation::InsufficientHistory;
    };

    if market_risk.abs() < MIN_STD_THRESHOLD {
        return Allocation::Degenerate;
    }

    let fraction = (real_yield - risk_free) / (risk_aversion.as_f64() * market_risk.powi(2));
    if fraction.is_finite() {
        Allocation::Fraction(fraction)
    } else {
        Allocation::Degenerate
    }
}
