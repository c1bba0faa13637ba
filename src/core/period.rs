//! Year-month period labels

use crate::core::error::EngineError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Identifies one monthly observation, e.g. `2024-03`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct PeriodLabel {
    year: i32,
    month: u32,
}

impl PeriodLabel {
    pub fn new(year: i32, month: u32) -> Result<Self, EngineError> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::InvalidInput(format!(
                "month must be between 1 and 12, got {month}"
            )));
        }
        Ok(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Short form used in compact tables, e.g. `03/24`.
    pub fn short(&self) -> String {
        format!("{:02}/{:02}", self.month, self.year.rem_euclid(100))
    }

    /// Spanish month abbreviation, as shown in the year comparison table.
    pub fn month_name(month: u32) -> &'static str {
        match month {
            1 => "Ene",
            2 => "Feb",
            3 => "Mar",
            4 => "Abr",
            5 => "May",
            6 => "Jun",
            7 => "Jul",
            8 => "Ago",
            9 => "Sep",
            10 => "Oct",
            11 => "Nov",
            12 => "Dic",
            _ => "?",
        }
    }
}

impl Display for PeriodLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for PeriodLabel {
    type Err = EngineError;

    /// Accepts `YYYY-MM` and `MM/YYYY`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidInput(format!("invalid period label: {s}"));
        let s = s.trim();
        let (year, month) = if let Some((year, month)) = s.split_once('-') {
            (year, month)
        } else if let Some((month, year)) = s.split_once('/') {
            (year, month)
        } else {
            return Err(invalid());
        };
        if year.len() != 4 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}
