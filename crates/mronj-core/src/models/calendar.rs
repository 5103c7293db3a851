//! Calendar month values.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Year/month pair that does not name a representable calendar month.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid calendar month: {year}-{month:02}")]
pub struct InvalidYearMonth {
    pub year: i32,
    pub month: u32,
}

/// A calendar month. Always maps onto a real date (its first day).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "YearMonthParts", into = "YearMonthParts")]
pub struct YearMonth(NaiveDate);

/// Serialized form of [`YearMonth`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct YearMonthParts {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, InvalidYearMonth> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(YearMonth)
            .ok_or(InvalidYearMonth { year, month })
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Month number, 1-12.
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Day 1 of the month.
    pub fn first_day(&self) -> NaiveDate {
        self.0
    }
}

impl TryFrom<YearMonthParts> for YearMonth {
    type Error = InvalidYearMonth;

    fn try_from(parts: YearMonthParts) -> Result<Self, Self::Error> {
        YearMonth::new(parts.year, parts.month)
    }
}

impl From<YearMonth> for YearMonthParts {
    fn from(ym: YearMonth) -> Self {
        YearMonthParts {
            year: ym.year(),
            month: ym.month(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_month() {
        let ym = YearMonth::new(2021, 3).unwrap();
        assert_eq!(ym.year(), 2021);
        assert_eq!(ym.month(), 3);
        assert_eq!(ym.first_day(), NaiveDate::from_ymd_opt(2021, 3, 1).unwrap());
        assert_eq!(ym.to_string(), "2021-03");
    }

    #[test]
    fn test_rejects_unrepresentable_months() {
        assert_eq!(
            YearMonth::new(2020, 13),
            Err(InvalidYearMonth {
                year: 2020,
                month: 13
            })
        );
        assert!(YearMonth::new(2020, 0).is_err());
        assert!(YearMonth::new(i32::MAX, 1).is_err());
    }

    #[test]
    fn test_ordering() {
        assert!(YearMonth::new(2020, 12).unwrap() < YearMonth::new(2021, 1).unwrap());
    }

    #[test]
    fn test_serde_validates() {
        let ym = YearMonth::new(2022, 5).unwrap();
        let json = serde_json::to_string(&ym).unwrap();
        assert_eq!(json, r#"{"year":2022,"month":5}"#);
        assert_eq!(serde_json::from_str::<YearMonth>(&json).unwrap(), ym);

        assert!(serde_json::from_str::<YearMonth>(r#"{"year":2022,"month":13}"#).is_err());
    }
}
