//! Currency quotes and deposit rate snapshots

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Buy/sell prices for one currency on one day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrencyQuote {
    pub date: NaiveDate,
    pub buy: f64,
    pub sell: f64,
}

/// Quote history per currency label, each sorted ascending by date and
/// unique by date.
#[derive(Debug, Clone, Default)]
pub struct QuoteBoard {
    histories: BTreeMap<String, Vec<CurrencyQuote>>,
}

impl QuoteBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the quotes of one currency. Duplicate dates keep the last listed
    /// quote.
    pub fn insert(&mut self, label: impl Into<String>, mut quotes: Vec<CurrencyQuote>) {
        quotes.sort_by_key(|q| q.date);
        let mut unique: Vec<CurrencyQuote> = Vec::with_capacity(quotes.len());
        for quote in quotes {
            match unique.last_mut() {
                Some(prev) if prev.date == quote.date => *prev = quote,
                _ => unique.push(quote),
            }
        }
        self.histories.insert(label.into(), unique);
    }

    pub fn is_empty(&self) -> bool {
        self.histories.values().all(|h| h.is_empty())
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.histories.keys().map(String::as_str)
    }

    pub fn latest(&self, label: &str) -> Option<&CurrencyQuote> {
        self.histories.get(label).and_then(|h| h.last())
    }

    /// The quote before the latest one, i.e. the previous close.
    pub fn previous(&self, label: &str) -> Option<&CurrencyQuote> {
        self.histories
            .get(label)
            .and_then(|h| h.len().checked_sub(2).map(|i| &h[i]))
    }

    pub fn latest_all(&self) -> BTreeMap<&str, &CurrencyQuote> {
        self.histories
            .iter()
            .filter_map(|(label, h)| h.last().map(|q| (label.as_str(), q)))
            .collect()
    }

    /// Up to `n` most recent quotes, newest first.
    pub fn recent(&self, label: &str, n: usize) -> Vec<&CurrencyQuote> {
        self.histories
            .get(label)
            .map(|h| h.iter().rev().take(n).collect())
            .unwrap_or_default()
    }

    /// Dates present in any history, newest first, at most `n`.
    pub fn recent_dates(&self, n: usize) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self
            .histories
            .values()
            .flat_map(|h| h.iter().map(|q| q.date))
            .collect();
        dates.sort_unstable_by(|a, b| b.cmp(a));
        dates.dedup();
        dates.truncate(n);
        dates
    }

    pub fn on(&self, label: &str, date: NaiveDate) -> Option<&CurrencyQuote> {
        self.histories.get(label).and_then(|h| {
            h.binary_search_by_key(&date, |q| q.date)
                .ok()
                .map(|i| &h[i])
        })
    }
}

/// Nominal annual rate (TNA, in percent) offered by one institution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateQuote {
    pub entity: String,
    pub annual_rate: f64,
}

/// Deposit rates unique by entity, ordered by rate descending.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateSnapshot {
    quotes: Vec<RateQuote>,
}

impl RateSnapshot {
    /// Builds a snapshot from quotes in fetch order. An entity listed more
    /// than once keeps its last quote. Quotes with a non-finite rate are
    /// dropped.
    pub fn from_quotes(quotes: impl IntoIterator<Item = RateQuote>) -> Self {
        let mut by_entity: HashMap<String, f64> = HashMap::new();
        for quote in quotes {
            if quote.annual_rate.is_finite() {
                by_entity.insert(quote.entity, quote.annual_rate);
            }
        }
        let mut quotes: Vec<RateQuote> = by_entity
            .into_iter()
            .map(|(entity, annual_rate)| RateQuote {
                entity,
                annual_rate,
            })
            .collect();
        quotes.sort_by(|a, b| {
            b.annual_rate
                .total_cmp(&a.annual_rate)
                .then_with(|| a.entity.cmp(&b.entity))
        });
        Self { quotes }
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RateQuote> {
        self.quotes.iter()
    }

    /// Case-insensitive lookup by entity name, accents included
    /// (`nación` matches `NACIÓN`).
    pub fn get(&self, entity: &str) -> Option<&RateQuote> {
        let wanted = entity.trim().to_lowercase();
        self.quotes
            .iter()
            .find(|q| q.entity.to_lowercase() == wanted)
    }

    pub fn best(&self) -> Option<&RateQuote> {
        self.quotes.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(y: i32, m: u32, d: u32, buy: f64, sell: f64) -> CurrencyQuote {
        CurrencyQuote {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            buy,
            sell,
        }
    }

    fn rate(entity: &str, annual_rate: f64) -> RateQuote {
        RateQuote {
            entity: entity.to_string(),
            annual_rate,
        }
    }

    #[test]
    fn test_quote_board_latest_and_previous() {
        let mut board = QuoteBoard::new();
        board.insert(
            "Dólar Blue",
            vec![
                quote(2025, 3, 12, 1200.0, 1220.0),
                quote(2025, 3, 10, 1180.0, 1200.0),
                quote(2025, 3, 11, 1190.0, 1210.0),
            ],
        );
        board.insert("Dólar Divisa", vec![]);

        assert_eq!(board.latest("Dólar Blue").unwrap().sell, 1220.0);
        assert_eq!(board.previous("Dólar Blue").unwrap().sell, 1210.0);
        assert!(board.latest("Dólar Divisa").is_none());
        assert!(board.previous("Dólar Divisa").is_none());
        assert_eq!(board.latest_all().len(), 1);

        let recent = board.recent("Dólar Blue", 2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].buy, 1200.0);
        assert_eq!(recent[1].buy, 1190.0);
        assert_eq!(board.recent_dates(10).len(), 3);
        assert_eq!(
            board
                .on("Dólar Blue", NaiveDate::from_ymd_opt(2025, 3, 11).unwrap())
                .unwrap()
                .buy,
            1190.0
        );
    }

    #[test]
    fn test_quote_board_duplicate_dates() {
        let mut board = QuoteBoard::new();
        board.insert(
            "Dólar Billete",
            vec![
                quote(2025, 3, 10, 1000.0, 1050.0),
                quote(2025, 3, 10, 1010.0, 1060.0),
            ],
        );
        assert!(board.previous("Dólar Billete").is_none());
        assert_eq!(board.latest("Dólar Billete").unwrap().buy, 1010.0);
    }

    #[test]
    fn test_empty_board() {
        let board = QuoteBoard::new();
        assert!(board.is_empty());
        assert!(board.recent("x", 30).is_empty());
    }

    #[test]
    fn test_rate_snapshot_dedup_and_order() {
        let snapshot = RateSnapshot::from_quotes(vec![
            rate("BANCO DE LA NACION ARGENTINA", 29.0),
            rate("BANCO GALICIA", 30.0),
            rate("BANCO DE LA NACION ARGENTINA", 31.5),
            rate("BANCO MACRO", f64::NAN),
        ]);

        assert_eq!(snapshot.len(), 2);
        assert_eq!(
            snapshot.best().unwrap().entity,
            "BANCO DE LA NACION ARGENTINA"
        );
        assert_eq!(snapshot.best().unwrap().annual_rate, 31.5);
        assert_eq!(snapshot.get("banco galicia").unwrap().annual_rate, 30.0);
        assert!(snapshot.get("BANCO MACRO").is_none());
    }

    #[test]
    fn test_rate_lookup_ignores_case_of_accented_letters() {
        let snapshot = RateSnapshot::from_quotes(vec![
            rate("BANCO DE LA NACIÓN ARGENTINA", 29.0),
            rate("BANCO GALICIA", 30.0),
        ]);

        let quote = snapshot.get("banco de la nación argentina").unwrap();
        assert_eq!(quote.entity, "BANCO DE LA NACIÓN ARGENTINA");
        assert_eq!(snapshot.get("  Banco De La Nación Argentina ").unwrap().annual_rate, 29.0);
        assert!(snapshot.get("banco de la nacion argentina").is_none());
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = RateSnapshot::from_quotes(Vec::<RateQuote>::new());
        assert!(snapshot.is_empty());
        assert!(snapshot.best().is_none());
    }
}
