//! Calendar month key.

use crate::error::{InsightError, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A calendar month (year + month, day discarded).
///
/// Ordering is chronological. Serialized as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    /// Create a month key, validating the month number (1-12).
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(InsightError::InvalidDate {
                value: format!("{year}-{month}"),
                reason: "month must be between 1 and 12".to_string(),
            });
        }
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(InsightError::InvalidDate {
                value: format!("{year}-{month}"),
                reason: "year out of range".to_string(),
            });
        }
        Ok(Self { year, month })
    }

    /// Month containing the given date.
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

    /// First day of the month; the timestamp used for forecast series.
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .expect("month keys are validated on construction")
    }

    /// Months elapsed since year 0, January. Differences between two
    /// ordinals give the number of months between them.
    pub fn ordinal(&self) -> i64 {
        self.year as i64 * 12 + (self.month as i64 - 1)
    }

    fn from_ordinal(ordinal: i64) -> Self {
        Self {
            year: ordinal.div_euclid(12) as i32,
            month: ordinal.rem_euclid(12) as u32 + 1,
        }
    }

    /// Shift by `n` months (negative shifts go back in time).
    pub fn offset(&self, n: i64) -> Self {
        Self::from_ordinal(self.ordinal() + n)
    }

    /// The following month.
    pub fn succ(&self) -> Self {
        self.offset(1)
    }

    /// Number of months from `earlier` to `self`.
    pub fn months_since(&self, earlier: Month) -> i64 {
        self.ordinal() - earlier.ordinal()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Month {
    type Err = InsightError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: &str| InsightError::InvalidDate {
            value: s.to_string(),
            reason: reason.to_string(),
        };

        let (year, month) = s.trim().split_once('-').ok_or_else(|| invalid("expected YYYY-MM"))?;
        let year: i32 = year.parse().map_err(|_| invalid("year is not a number"))?;
        let month: u32 = month.parse().map_err(|_| invalid("month is not a number"))?;
        Month::new(year, month)
    }
}

impl TryFrom<String> for Month {
    type Error = InsightError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Month> for String {
    fn from(month: Month) -> Self {
        month.to_string()
    }
}
