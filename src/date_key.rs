//! Canonical `YYYY-MM-DD` keys for per-day data.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateKeyError {
    #[error("date key is empty")]
    Empty,
    #[error("'{0}' is not a YYYY-MM-DD date")]
    Malformed(String),
    #[error("year {0} is outside 1..=9999")]
    YearOutOfRange(i32),
}

/// A calendar day identified by its ISO date.
///
/// Only years 1..=9999 are representable so the textual form is always
/// exactly ten characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub const MIN_YEAR: i32 = 1;
    pub const MAX_YEAR: i32 = 9999;

    pub fn new(date: NaiveDate) -> Result<Self, DateKeyError> {
        if (Self::MIN_YEAR..=Self::MAX_YEAR).contains(&date.year()) {
            Ok(Self(date))
        } else {
            Err(DateKeyError::YearOutOfRange(date.year()))
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Long form used in listings, e.g. "March 15, 2024"
    pub fn long_form(&self) -> String {
        self.0.format("%B %-d, %Y").to_string()
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for DateKey {
    type Err = DateKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DateKeyError::Empty);
        }

        let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| DateKeyError::Malformed(s.to_string()))?;
        let key = Self::new(date)?;

        // Reject unpadded forms like 2024-3-5
        if key.to_string() != s {
            return Err(DateKeyError::Malformed(s.to_string()));
        }
        Ok(key)
    }
}

impl TryFrom<String> for DateKey {
    type Error = DateKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DateKey> for String {
    fn from(key: DateKey) -> Self {
        key.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_display_is_zero_padded() {
        let key = DateKey::new(ymd(2024, 3, 5)).unwrap();
        assert_eq!(key.to_string(), "2024-03-05");
    }

    #[test]
    fn test_parse_canonical() {
        let key: DateKey = "2024-03-15".parse().unwrap();
        assert_eq!(key.date(), ymd(2024, 3, 15));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!("".parse::<DateKey>(), Err(DateKeyError::Empty));
        assert!(matches!("2024-3-5".parse::<DateKey>(), Err(DateKeyError::Malformed(_))));
        assert!(matches!("2024-02-30".parse::<DateKey>(), Err(DateKeyError::Malformed(_))));
        assert!(matches!("tomorrow".parse::<DateKey>(), Err(DateKeyError::Malformed(_))));
    }

    #[test]
    fn test_year_range() {
        assert_eq!(
            DateKey::new(ymd(10000, 1, 1)),
            Err(DateKeyError::YearOutOfRange(10000))
        );
        assert!(DateKey::new(ymd(1, 1, 1)).is_ok());
    }

    #[test]
    fn test_long_form() {
        let key: DateKey = "2024-03-05".parse().unwrap();
        assert_eq!(key.long_form(), "March 5, 2024");
    }

    #[test]
    fn test_serde_as_string() {
        let key: DateKey = "2025-01-01".parse().unwrap();
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"2025-01-01\"");
        let back: DateKey = serde_json::from_str("\"2025-01-01\"").unwrap();
        assert_eq!(back, key);
        assert!(serde_json::from_str::<DateKey>("\"nope\"").is_err());
    }
}
