//! Compounded change over sub-ranges of an indexed series.

use crate::core::period::PeriodLabel;
use crate::core::series::{IndexedObservation, IndexedSeries};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Trailing window used for the headline inflation figure.
pub const TRAILING_MONTHS: usize = 12;

/// Picks a contiguous run of observations out of a sorted series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    /// The most recent `n` observations, ignoring calendar boundaries.
    TrailingN(usize),
    /// Every observation dated in the given year.
    CalendarYear(i32),
    /// Observations of `year` up to and including `through_month`.
    YearToDate { year: i32, through_month: u32 },
    /// Observations between two labels, both inclusive.
    Between { from: PeriodLabel, to: PeriodLabel },
}

impl Selector {
    pub fn select<'a>(&self, series: &'a IndexedSeries) -> &'a [IndexedObservation] {
        let observations = series.observations();
        let key = |o: &IndexedObservation| (o.date().year(), o.date().month());
        let (start, end) = match *self {
            Selector::TrailingN(n) => (observations.len().saturating_sub(n), observations.len()),
            Selector::CalendarYear(year) => (
                observations.partition_point(|o| o.date().year() < year),
                observations.partition_point(|o| o.date().year() <= year),
            ),
            Selector::YearToDate {
                year,
                through_month,
            } => (
                observations.partition_point(|o| o.date().year() < year),
                observations.partition_point(|o| key(o) <= (year, through_month)),
            ),
            Selector::Between { from, to } => (
                observations.partition_point(|o| key(o) < (from.year(), from.month())),
                observations.partition_point(|o| key(o) <= (to.year(), to.month())),
            ),
        };
        if start >= end {
            return &[];
        }
        &observations[start..end]
    }
}

fn compound<'a>(observations: impl Iterator<Item = &'a IndexedObservation>) -> (f64, usize) {
    observations.fold((1.0, 0), |(product, count), o| {
        (product * o.observation.factor(), count + 1)
    })
}

/// Compounded percentage change over the observations picked by `selector`.
///
/// Returns `0.0` when nothing is selected.
pub fn compounded_change(series: &IndexedSeries, selector: &Selector) -> f64 {
    let (product, count) = compound(selector.select(series).iter());
    debug!(?selector, count, "Compounded selected observations");
    if count == 0 {
        return 0.0;
    }
    (product - 1.0) * 100.0
}

/// Compounded percentage change over the observations whose date matches
/// `predicate`, in ascending date order.
pub fn compounded_change_by<P>(series: &IndexedSeries, predicate: P) -> f64
where
    P: Fn(NaiveDate) -> bool,
{
    let (product, count) = compound(
        series
            .observations()
            .iter()
            .filter(|o| predicate(o.date())),
    );
    if count == 0 {
        return 0.0;
    }
    (product - 1.0) * 100.0
}

/// Headline inflation figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InflationSummary {
    pub latest: Option<PeriodLabel>,
    pub trailing_12m: f64,
    pub current_year: i32,
    pub year_to_date: f64,
    pub full_years: BTreeMap<i32, f64>,
}

impl InflationSummary {
    pub fn compute(series: &IndexedSeries, current_year: i32, comparison_years: &[i32]) -> Self {
        let full_years = comparison_years
            .iter()
            .map(|year| (*year, compounded_change(series, &Selector::CalendarYear(*year))))
            .collect();

        Self {
            latest: series.last().map(|o| o.label()),
            trailing_12m: compounded_change(series, &Selector::TrailingN(TRAILING_MONTHS)),
            current_year,
            year_to_date: compounded_change(series, &Selector::CalendarYear(current_year)),
            full_years,
        }
    }
}

/// Monthly values per year, for side by side comparison of the same month
/// across years. Years without observations are left out.
pub fn monthly_comparison(
    series: &IndexedSeries,
    years: &[i32],
) -> BTreeMap<i32, BTreeMap<u32, f64>> {
    let mut table: BTreeMap<i32, BTreeMap<u32, f64>> = BTreeMap::new();
    for year in years {
        for o in Selector::CalendarYear(*year).select(series) {
            table
                .entry(*year)
                .or_default()
                .insert(o.date().month(), o.value());
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::series::{RawObservation, normalize};

    fn monthly(values: &[(i32, u32, f64)]) -> IndexedSeries {
        normalize(values.iter().map(|(y, m, v)| {
            RawObservation::new(NaiveDate::from_ymd_opt(*y, *m, 1).unwrap(), *v)
        }))
    }

    fn label(y: i32, m: u32) -> PeriodLabel {
        PeriodLabel::new(y, m).unwrap()
    }

    #[test]
    fn test_two_months_of_ten_percent() {
        let series = monthly(&[(2024, 1, 10.0), (2024, 2, 10.0)]);
        let total = compounded_change(&series, &Selector::TrailingN(2));
        assert!((total - 21.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_selection_is_zero() {
        let empty = IndexedSeries::empty();
        assert_eq!(compounded_change(&empty, &Selector::TrailingN(12)), 0.0);
        assert_eq!(compounded_change_by(&empty, |_| true), 0.0);

        let series = monthly(&[(2024, 1, 10.0)]);
        assert_eq!(compounded_change(&series, &Selector::CalendarYear(2019)), 0.0);
        assert_eq!(compounded_change(&series, &Selector::TrailingN(0)), 0.0);
    }

    #[test]
    fn test_trailing_crosses_year_boundary() {
        let series = monthly(&[
            (2023, 10, 8.3),
            (2023, 11, 12.8),
            (2023, 12, 25.5),
            (2024, 1, 20.6),
        ]);
        let selected = Selector::TrailingN(2).select(&series);
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].label(), label(2023, 12));

        let expected = (1.255 * 1.206 - 1.0) * 100.0;
        let total = compounded_change(&series, &Selector::TrailingN(2));
        assert!((total - expected).abs() < 1e-9);

        // Asking for more than available takes everything.
        assert_eq!(Selector::TrailingN(50).select(&series).len(), 4);
    }

    #[test]
    fn test_calendar_year_and_year_to_date() {
        let series = monthly(&[
            (2023, 12, 25.5),
            (2024, 1, 20.6),
            (2024, 2, 13.2),
            (2024, 3, 11.0),
            (2025, 1, 2.2),
        ]);

        assert_eq!(Selector::CalendarYear(2024).select(&series).len(), 3);
        let ytd = Selector::YearToDate {
            year: 2024,
            through_month: 2,
        };
        assert_eq!(ytd.select(&series).len(), 2);

        let by_predicate = compounded_change_by(&series, |d| d.year() == 2024 && d.month() <= 2);
        assert!((compounded_change(&series, &ytd) - by_predicate).abs() < 1e-12);
    }

    #[test]
    fn test_split_ranges_compound_to_whole() {
        let series = monthly(&[
            (2024, 1, 20.6),
            (2024, 2, 13.2),
            (2024, 3, 11.0),
            (2024, 4, 8.8),
            (2024, 5, 4.2),
            (2024, 6, -0.5),
        ]);
        let whole = compounded_change(
            &series,
            &Selector::Between {
                from: label(2024, 1),
                to: label(2024, 6),
            },
        );
        let a = compounded_change(
            &series,
            &Selector::Between {
                from: label(2024, 1),
                to: label(2024, 3),
            },
        ) / 100.0;
        let b = compounded_change(
            &series,
            &Selector::Between {
                from: label(2024, 4),
                to: label(2024, 6),
            },
        ) / 100.0;

        assert!((((1.0 + a) * (1.0 + b) - 1.0) * 100.0 - whole).abs() < 1e-9);
    }

    #[test]
    fn test_inverted_range_selects_nothing() {
        let series = monthly(&[(2024, 1, 20.6), (2024, 2, 13.2)]);
        let selector = Selector::Between {
            from: label(2024, 2),
            to: label(2024, 1),
        };
        assert!(selector.select(&series).is_empty());
    }

    #[test]
    fn test_summary() {
        let series = monthly(&[
            (2024, 11, 2.4),
            (2024, 12, 2.7),
            (2025, 1, 2.2),
            (2025, 2, 2.4),
        ]);
        let summary = InflationSummary::compute(&series, 2025, &[2024, 2023]);

        assert_eq!(summary.latest, Some(label(2025, 2)));
        assert_eq!(summary.current_year, 2025);
        let ytd = (1.022 * 1.024 - 1.0) * 100.0;
        assert!((summary.year_to_date - ytd).abs() < 1e-9);
        let year_2024 = (1.024 * 1.027 - 1.0) * 100.0;
        assert!((summary.full_years[&2024] - year_2024).abs() < 1e-9);
        assert_eq!(summary.full_years[&2023], 0.0);
        let all = (1.024 * 1.027 * 1.022 * 1.024 - 1.0) * 100.0;
        assert!((summary.trailing_12m - all).abs() < 1e-9);
    }

    #[test]
    fn test_monthly_comparison() {
        let series = monthly(&[(2024, 1, 20.6), (2024, 2, 13.2), (2025, 1, 2.2)]);
        let table = monthly_comparison(&series, &[2024, 2025, 2026]);

        assert_eq!(table.len(), 2);
        assert_eq!(table[&2024][&2], 13.2);
        assert_eq!(table[&2025].len(), 1);
        assert!(!table.contains_key(&2026));
    }
}
