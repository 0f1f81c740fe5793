//! Monthly returns broadcast onto the daily calendar.

use chrono::Datelike;
use merton_traits::{Date, MonthlyPlacement};

/// One calendar month of the daily table.
#[derive(Debug, Clone, Copy, PartialEq)]
struct MonthSpan {
    first_row: usize,
    last_row: usize,
    mean: Option<f64>,
}

/// Split the calendar into months and average the defined closes of each.
fn month_spans(dates: &[Date], close: &[Option<f64>]) -> Vec<MonthSpan> {
    let mut spans: Vec<MonthSpan> = Vec::new();
    let mut sum = 0.0;
    let mut count = 0usize;

    for (row, date) in dates.iter().enumerate() {
        let new_month = row == 0 || {
            let prev = dates[row - 1];
            prev.month() != date.month() || prev.year() != date.year()
        };
        if new_month {
            if let Some(span) = spans.last_mut() {
                span.mean = (count > 0).then(|| sum / count as f64);
            }
            spans.push(MonthSpan {
                first_row: row,
                last_row: row,
                mean: None,
            });
            sum = 0.0;
            count = 0;
        }
        if let Some(span) = spans.last_mut() {
            span.last_row = row;
        }
        if let Some(v) = close[row] {
            sum += v;
            count += 1;
        }
    }
    if let Some(span) = spans.last_mut() {
        span.mean = (count > 0).then(|| sum / count as f64);
    }
    spans
}

fn is_month_end(date: Date) -> bool {
    date.succ_opt().is_none_or(|next| next.month() != date.month())
}

/// Percent change of the monthly mean close, one value per daily row.
///
/// Each month is compared with the most recent earlier month that has a mean;
/// the first month has nothing to compare with and stays undefined.
///
/// With [`MonthlyPlacement::WithinMonth`] every row of a month carries that
/// month's change. With [`MonthlyPlacement::MonthEnd`] the change is written
/// on the month's last calendar day and carried forward, so a month whose last
/// day lies beyond the table never appears.
#[must_use]
pub fn monthly_returns(
    dates: &[Date],
    close: &[Option<f64>],
    placement: MonthlyPlacement,
) -> Vec<Option<f64>> {
    let spans = month_spans(dates, close);

    let mut previous_mean: Option<f64> = None;
    let changes: Vec<Option<f64>> = spans
        .iter()
        .map(|span| {
            let change = match (previous_mean, span.mean) {
                (Some(prev), Some(cur)) if prev != 0.0 => Some(cur / prev - 1.0),
                _ => None,
            };
            if span.mean.is_some() {
                previous_mean = span.mean;
            }
            change
        })
        .collect();

    let mut out = vec![None; dates.len()];
    match placement {
        MonthlyPlacement::WithinMonth => {
            for (span, change) in spans.iter().zip(&changes) {
                out[span.first_row..=span.last_row].fill(*change);
            }
        }
        MonthlyPlacement::MonthEnd => {
            for (span, change) in spans.iter().zip(&changes) {
                if is_month_end(dates[span.last_row]) {
                    out[span.last_row] = *change;
                }
            }
            let mut carried = None;
            for slot in &mut out {
                match slot {
                    Some(v) => carried = Some(*v),
                    None => *slot = carried,
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn calendar(start: Date, n: usize) -> Vec<Date> {
        start.iter_days().take(n).collect()
    }

    /// Jan 2024 at 100, Feb at 110, Mar 1-10 at 121.
    fn fixture() -> (Vec<Date>, Vec<Option<f64>>) {
        let dates = calendar(Date::from_ymd_opt(2024, 1, 1).unwrap(), 31 + 29 + 10);
        let close = dates
            .iter()
            .map(|d| match d.month() {
                1 => Some(100.0),
                2 => Some(110.0),
                _ => Some(121.0),
            })
            .collect();
        (dates, close)
    }

    #[test]
    fn test_within_month_broadcast() {
        let (dates, close) = fixture();
        let out = monthly_returns(&dates, &close, MonthlyPlacement::WithinMonth);

        assert!(out[..31].iter().all(Option::is_none));
        for v in &out[31..60] {
            assert_relative_eq!(v.unwrap(), 0.1, epsilon = 1e-12);
        }
        for v in &out[60..] {
            assert_relative_eq!(v.unwrap(), 0.1, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_month_end_placement() {
        let (dates, close) = fixture();
        let out = monthly_returns(&dates, &close, MonthlyPlacement::MonthEnd);

        // January's change is undefined and February's lands on Feb 29.
        assert!(out[..59].iter().all(Option::is_none));
        assert_relative_eq!(out[59].unwrap(), 0.1, epsilon = 1e-12);
        // March is incomplete: February's value carries to the end.
        for v in &out[60..] {
            assert_relative_eq!(v.unwrap(), 0.1, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_monthly_mean_not_last_value() {
        // Two days in January (100, 200) then one day in February (165).
        let dates = vec![
            Date::from_ymd_opt(2024, 1, 30).unwrap(),
            Date::from_ymd_opt(2024, 1, 31).unwrap(),
            Date::from_ymd_opt(2024, 2, 1).unwrap(),
        ];
        let close = vec![Some(100.0), Some(200.0), Some(165.0)];
        let out = monthly_returns(&dates, &close, MonthlyPlacement::WithinMonth);
        assert_eq!(out[0], None);
        assert_relative_eq!(out[2].unwrap(), 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_month_without_prices_is_skipped() {
        let dates = calendar(Date::from_ymd_opt(2024, 1, 31).unwrap(), 31);
        // Jan 31 = 100, all of February missing, Mar 1-2 = 120.
        let close: Vec<Option<f64>> = dates
            .iter()
            .map(|d| match d.month() {
                1 => Some(100.0),
                2 => None,
                _ => Some(120.0),
            })
            .collect();
        let out = monthly_returns(&dates, &close, MonthlyPlacement::WithinMonth);
        assert_eq!(out[1], None);
        assert_relative_eq!(out[30].unwrap(), 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_year_boundary_is_new_month() {
        let dates = calendar(Date::from_ymd_opt(2023, 12, 31).unwrap(), 2);
        let close = vec![Some(50.0), Some(55.0)];
        let out = monthly_returns(&dates, &close, MonthlyPlacement::WithinMonth);
        assert_relative_eq!(out[1].unwrap(), 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_calendar() {
        assert!(monthly_returns(&[], &[], MonthlyPlacement::MonthEnd).is_empty());
    }
}
