//! Allocate command implementation.

use anyhow::Result;
use merton::{AllocationStatus, LatestSummary};

use super::{AllocationArgs, InputArgs, OutputFormat, prepare};

/// Print the allocation on the most recent date.
pub(crate) fn run(inputs: &InputArgs, params: &AllocationArgs, format: OutputFormat) -> Result<()> {
    let config = params.config()?;
    let (pipeline, derived) = prepare(inputs)?;
    let latest = pipeline.allocate(&derived, &config)?.latest()?;

    match format {
        OutputFormat::Text => print!("{}", render_text(&latest)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&latest)?),
    }
    Ok(())
}

fn percent(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.2}%", v * 100.0))
}

/// Human-readable summary of the last row.
pub(crate) fn render_text(latest: &LatestSummary) -> String {
    let mut out = String::new();
    out.push_str("\n╔══════════════════════════════════════════════════════════════╗\n");
    out.push_str("║                 Optimal Equity Allocation                    ║\n");
    out.push_str("╚══════════════════════════════════════════════════════════════╝\n\n");

    out.push_str(&format!("Date:                  {}\n", latest.date));
    out.push_str(&format!("Real yield:            {}\n", percent(latest.real_yield)));
    out.push_str(&format!("Risk-free rate:        {}\n", percent(latest.risk_free_rate)));
    out.push_str(&format!(
        "CAPE:                  {}\n",
        latest
            .cape
            .map_or_else(|| "n/a".to_string(), |c| format!("{c:.2}"))
    ));
    out.push_str(&format!("Market risk:           {}\n", percent(latest.market_risk)));
    out.push('\n');

    match latest.status {
        AllocationStatus::Defined => {
            out.push_str(&format!(
                "Optimal bet fraction:  {}\n",
                percent(latest.optimal_bet_fraction)
            ));
            out.push_str(&format!("Wealth:                {:.2}\n", latest.wealth));
            out.push_str(&format!(
                "Wealth to invest:      {}\n",
                latest
                    .wealth_to_invest
                    .map_or_else(|| "n/a".to_string(), |w| format!("{w:.2}"))
            ));
        }
        status => {
            out.push_str(&format!(
                "Optimal bet fraction:  undefined ({})\n",
                status.as_str()
            ));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use merton::Date;

    fn summary(status: AllocationStatus, fraction: Option<f64>) -> LatestSummary {
        LatestSummary {
            date: Date::from_ymd_opt(2024, 6, 28).unwrap(),
            real_yield: Some(0.035),
            risk_free_rate: Some(0.021),
            cape: Some(28.57),
            market_risk: Some(0.04),
            optimal_bet_fraction: fraction,
            status,
            wealth: 10_000.0,
            wealth_to_invest: fraction.map(|f| f * 10_000.0),
        }
    }

    #[test]
    fn test_render_defined() {
        let text = render_text(&summary(AllocationStatus::Defined, Some(0.875)));
        assert!(text.contains("Date:                  2024-06-28"));
        assert!(text.contains("Real yield:            3.50%"));
        assert!(text.contains("CAPE:                  28.57"));
        assert!(text.contains("Optimal bet fraction:  87.50%"));
        assert!(text.contains("Wealth to invest:      8750.00"));
    }

    #[test]
    fn test_render_undefined() {
        let text = render_text(&summary(AllocationStatus::InsufficientHistory, None));
        assert!(text.contains("undefined (insufficient_history)"));
        assert!(!text.contains("Wealth to invest"));
    }
}
