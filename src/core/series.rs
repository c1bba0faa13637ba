//! Series normalization and the derived cumulative index.
//!
//! A raw feed of `(date, percentage change)` pairs is turned into an
//! [`IndexedSeries`]: sorted ascending, unique by date, with a running
//! product index. The index is seeded at `1.0` strictly before the first
//! observation, so the first observation already carries its own change:
//!
//! ```text
//! index[0] = 1 + value[0] / 100
//! index[i] = index[i - 1] * (1 + value[i] / 100)
//! ```

use crate::core::period::PeriodLabel;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// An observation as delivered by a source, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawObservation {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

impl RawObservation {
    pub fn new(date: NaiveDate, value: impl Into<Option<f64>>) -> Self {
        Self {
            date,
            value: value.into(),
        }
    }
}

/// One period's percentage change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: f64,
}

impl Observation {
    pub fn label(&self) -> PeriodLabel {
        PeriodLabel::from_date(self.date)
    }

    /// Growth factor for the period, `1 + value / 100`.
    pub fn factor(&self) -> f64 {
        1.0 + self.value / 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexedObservation {
    pub observation: Observation,
    pub index: f64,
}

impl IndexedObservation {
    pub fn date(&self) -> NaiveDate {
        self.observation.date
    }

    pub fn value(&self) -> f64 {
        self.observation.value
    }

    pub fn label(&self) -> PeriodLabel {
        self.observation.label()
    }
}

/// Observations sorted strictly ascending by date, each with its index.
///
/// Only [`normalize`] builds one; a series cannot be deserialized directly:
///
/// ```compile_fail
/// let _: datainfo::core::IndexedSeries = serde_json::from_str("{}").unwrap();
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IndexedSeries {
    observations: Vec<IndexedObservation>,
}

impl IndexedSeries {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn observations(&self) -> &[IndexedObservation] {
        &self.observations
    }

    pub fn first(&self) -> Option<&IndexedObservation> {
        self.observations.first()
    }

    pub fn last(&self) -> Option<&IndexedObservation> {
        self.observations.last()
    }

    /// Looks up the observation for a period label.
    ///
    /// Sources publish one observation per month; should a feed carry two
    /// dates in the same month the latest one is returned.
    pub fn find(&self, label: PeriodLabel) -> Option<&IndexedObservation> {
        self.observations.iter().rev().find(|o| o.label() == label)
    }

    /// Period labels, newest first.
    pub fn labels(&self) -> Vec<PeriodLabel> {
        let mut labels: Vec<PeriodLabel> = self.observations.iter().map(|o| o.label()).collect();
        labels.dedup();
        labels.reverse();
        labels
    }

    /// Distinct calendar years present, ascending.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.observations.iter().map(|o| o.date().year()).collect();
        years.dedup();
        years
    }
}

/// Builds an [`IndexedSeries`] from raw, possibly unsorted and duplicated
/// observations.
///
/// Entries without a finite value are dropped. When two entries share a
/// date the one listed last wins. Empty input yields an empty series.
pub fn normalize<I>(raw: I) -> IndexedSeries
where
    I: IntoIterator<Item = RawObservation>,
{
    let mut valid: Vec<Observation> = Vec::new();
    let mut dropped = 0usize;
    for entry in raw {
        match entry.value {
            Some(value) if value.is_finite() => valid.push(Observation {
                date: entry.date,
                value,
            }),
            _ => dropped += 1,
        }
    }

    // Stable sort keeps input order within a date, so the last element of
    // each run is the last-listed entry.
    valid.sort_by_key(|o| o.date);
    let mut unique: Vec<Observation> = Vec::with_capacity(valid.len());
    for observation in valid {
        match unique.last_mut() {
            Some(prev) if prev.date == observation.date => *prev = observation,
            _ => unique.push(observation),
        }
    }

    let mut index = 1.0;
    let observations: Vec<IndexedObservation> = unique
        .into_iter()
        .map(|observation| {
            index *= observation.factor();
            IndexedObservation { observation, index }
        })
        .collect();

    debug!(
        kept = observations.len(),
        dropped, "Normalized observation series"
    );
    IndexedSeries { observations }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_empty_input_gives_empty_series() {
        let series = normalize(Vec::<RawObservation>::new());
        assert!(series.is_empty());
        assert!(series.last().is_none());
        assert!(series.labels().is_empty());
    }

    #[test]
    fn test_sorts_and_indexes() {
        let series = normalize(vec![
            RawObservation::new(date(2024, 2, 29), 10.0),
            RawObservation::new(date(2024, 1, 31), 10.0),
        ]);

        assert_eq!(series.len(), 2);
        assert_eq!(series.observations()[0].date(), date(2024, 1, 31));
        assert!((series.observations()[0].index - 1.10).abs() < 1e-12);
        assert!((series.observations()[1].index - 1.21).abs() < 1e-12);
    }

    #[test]
    fn test_duplicate_date_keeps_last_listed() {
        let series = normalize(vec![
            RawObservation::new(date(2024, 1, 31), 20.4),
            RawObservation::new(date(2024, 2, 29), 13.2),
            RawObservation::new(date(2024, 1, 31), 25.5),
        ]);

        assert_eq!(series.len(), 2);
        assert_eq!(series.observations()[0].value(), 25.5);
    }

    #[test]
    fn test_drops_missing_and_non_finite_values() {
        let series = normalize(vec![
            RawObservation::new(date(2024, 1, 31), None::<f64>),
            RawObservation::new(date(2024, 2, 29), f64::NAN),
            RawObservation::new(date(2024, 3, 31), 11.0),
        ]);

        assert_eq!(series.len(), 1);
        assert_eq!(series.observations()[0].value(), 11.0);
        assert!((series.observations()[0].index - 1.11).abs() < 1e-12);
    }

    #[test]
    fn test_dates_strictly_increasing_and_negative_values_allowed() {
        let raw = vec![
            RawObservation::new(date(2023, 5, 31), 7.8),
            RawObservation::new(date(2023, 3, 31), -1.0),
            RawObservation::new(date(2023, 5, 31), 7.7),
            RawObservation::new(date(2023, 4, 30), 8.4),
            RawObservation::new(date(2023, 3, 31), 7.7),
        ];
        let series = normalize(raw);

        assert!(
            series
                .observations()
                .windows(2)
                .all(|w| w[0].date() < w[1].date())
        );
        assert_eq!(series.observations()[0].value(), 7.7);
        assert_eq!(series.observations()[2].value(), 7.7);

        let deflation = normalize(vec![
            RawObservation::new(date(2020, 1, 31), 2.0),
            RawObservation::new(date(2020, 2, 29), -3.0),
        ]);
        assert!(deflation.observations()[1].index < deflation.observations()[0].index);
    }

    #[test]
    fn test_series_serializes_normalized_observations() {
        let series = normalize(vec![
            RawObservation::new(date(2024, 2, 29), 10.0),
            RawObservation::new(date(2024, 1, 31), 10.0),
        ]);

        let json = serde_json::to_value(&series).unwrap();
        let observations = json["observations"].as_array().unwrap();
        assert_eq!(observations.len(), 2);
        assert_eq!(observations[0]["observation"]["date"], "2024-01-31");
        assert!((observations[1]["index"].as_f64().unwrap() - 1.21).abs() < 1e-12);
    }

    #[test]
    fn test_labels_and_lookup() {
        let series = normalize(vec![
            RawObservation::new(date(2023, 12, 31), 25.5),
            RawObservation::new(date(2024, 1, 31), 20.6),
        ]);

        let labels = series.labels();
        assert_eq!(labels[0].to_string(), "2024-01");
        assert_eq!(labels[1].to_string(), "2023-12");
        assert_eq!(series.years(), vec![2023, 2024]);

        let dec = PeriodLabel::new(2023, 12).unwrap();
        assert_eq!(series.find(dec).unwrap().value(), 25.5);
        assert!(series.find(PeriodLabel::new(2022, 1).unwrap()).is_none());
    }
}
