//! # Dates Module
//!
//! Capture-date acceptance ranges.
//!
//! ## Accepted range syntax
//! | Input                   | Meaning                          |
//! |-------------------------|----------------------------------|
//! | `2023`                  | the whole year                   |
//! | `2023-06`               | the whole month                  |
//! | `2023-06-15`            | the whole day                    |
//! | `2023-06,2024-01-10`    | start of the first to end of the second |
//!
//! Both bounds are inclusive. The default range is unbounded.

use crate::error::ConfigError;
use chrono::{DateTime, Datelike, Days, Months, NaiveDate, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Predicate deciding whether a capture date is acceptable
pub trait DateFilter: Send + Sync {
    fn in_range(&self, t: &DateTime<Utc>) -> bool;
}

/// Inclusive range of acceptable capture dates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// Earliest accepted instant (None = no lower bound)
    pub after: Option<DateTime<Utc>>,
    /// Latest accepted instant (None = no upper bound)
    pub before: Option<DateTime<Utc>>,
}

impl DateRange {
    /// A range that accepts every timestamp
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// A range between two instants, both inclusive
    pub fn between(after: DateTime<Utc>, before: DateTime<Utc>) -> Self {
        Self {
            after: Some(after),
            before: Some(before),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.after.is_none() && self.before.is_none()
    }
}

impl DateFilter for DateRange {
    fn in_range(&self, t: &DateTime<Utc>) -> bool {
        self.after.map_or(true, |after| *t >= after) && self.before.map_or(true, |before| *t <= before)
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.after, self.before) {
            (None, None) => write!(f, "any date"),
            (Some(a), None) => write!(f, "from {}", a.format("%Y-%m-%d %H:%M:%S")),
            (None, Some(b)) => write!(f, "until {}", b.format("%Y-%m-%d %H:%M:%S")),
            (Some(a), Some(b)) => write!(
                f,
                "{} to {}",
                a.format("%Y-%m-%d %H:%M:%S"),
                b.format("%Y-%m-%d %H:%M:%S")
            ),
        }
    }
}

impl FromStr for DateRange {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ConfigError::InvalidDateRange {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(invalid("empty range"));
        }

        let (start, end) = match trimmed.split_once(',') {
            Some((first, second)) => {
                let (start, _) = parse_period(first.trim()).map_err(|r| invalid(&r))?;
                let (_, end) = parse_period(second.trim()).map_err(|r| invalid(&r))?;
                (start, end)
            }
            None => parse_period(trimmed).map_err(|r| invalid(&r))?,
        };

        if start > end {
            return Err(invalid("start is after end"));
        }

        Ok(DateRange::between(start, end))
    }
}

/// Parse `YYYY`, `YYYY-MM` or `YYYY-MM-DD` into its first and last instant
fn parse_period(part: &str) -> Result<(DateTime<Utc>, DateTime<Utc>), String> {
    let fields: Vec<&str> = part.split('-').collect();
    let number = |field: &str, name: &str| -> Result<u32, String> {
        if field.is_empty() || !field.chars().all(|c| c.is_ascii_digit()) {
            return Err(format!("'{}' is not a valid {}", field, name));
        }
        field
            .parse::<u32>()
            .map_err(|_| format!("'{}' is not a valid {}", field, name))
    };

    let (first_day, span) = match fields.as_slice() {
        [year] if year.len() == 4 => {
            let year = number(*year, "year")? as i32;
            (NaiveDate::from_ymd_opt(year, 1, 1), Span::Year)
        }
        [year, month] if year.len() == 4 => {
            let year = number(*year, "year")? as i32;
            let month = number(*month, "month")?;
            (NaiveDate::from_ymd_opt(year, month, 1), Span::Month)
        }
        [year, month, day] if year.len() == 4 => {
            let year = number(*year, "year")? as i32;
            let month = number(*month, "month")?;
            let day = number(*day, "day")?;
            (NaiveDate::from_ymd_opt(year, month, day), Span::Day)
        }
        _ => return Err(format!("'{}' is not YYYY, YYYY-MM or YYYY-MM-DD", part)),
    };

    let first_day = first_day.ok_or_else(|| format!("'{}' is not a calendar date", part))?;
    let next = match span {
        Span::Year => NaiveDate::from_ymd_opt(first_day.year() + 1, 1, 1),
        Span::Month => first_day.checked_add_months(Months::new(1)),
        Span::Day => first_day.checked_add_days(Days::new(1)),
    }
    .ok_or_else(|| format!("'{}' is out of range", part))?;

    let start = first_day
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| format!("'{}' is out of range", part))?
        .and_utc();
    let end = next
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| format!("'{}' is out of range", part))?
        .and_utc()
        - TimeDelta::nanoseconds(1);

    Ok((start, end))
}

enum Span {
    Year,
    Month,
    Day,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn default_range_accepts_everything() {
        let range = DateRange::default();
        assert!(range.is_unbounded());
        assert!(range.in_range(&at(1826, 1, 1, 0, 0, 0)));
        assert!(range.in_range(&at(2099, 12, 31, 23, 59, 59)));
        assert!(range.in_range(&Utc.timestamp_opt(0, 0).unwrap()));
    }

    #[test]
    fn bounds_are_inclusive() {
        let range = DateRange::between(at(2020, 1, 1, 0, 0, 0), at(2020, 1, 2, 0, 0, 0));
        assert!(range.in_range(&at(2020, 1, 1, 0, 0, 0)));
        assert!(range.in_range(&at(2020, 1, 2, 0, 0, 0)));
        assert!(!range.in_range(&at(2020, 1, 2, 0, 0, 1)));
        assert!(!range.in_range(&at(2019, 12, 31, 23, 59, 59)));
    }

    #[test]
    fn parses_whole_year() {
        let range: DateRange = "2023".parse().unwrap();
        assert!(range.in_range(&at(2023, 1, 1, 0, 0, 0)));
        assert!(range.in_range(&at(2023, 12, 31, 23, 59, 59)));
        assert!(!range.in_range(&at(2024, 1, 1, 0, 0, 0)));
    }

    #[test]
    fn parses_whole_month_including_leap_day() {
        let range: DateRange = "2024-02".parse().unwrap();
        assert!(range.in_range(&at(2024, 2, 29, 12, 0, 0)));
        assert!(!range.in_range(&at(2024, 3, 1, 0, 0, 0)));
        assert!(!range.in_range(&at(2024, 1, 31, 23, 59, 59)));
    }

    #[test]
    fn parses_single_day() {
        let range: DateRange = "2023-06-15".parse().unwrap();
        assert!(range.in_range(&at(2023, 6, 15, 23, 59, 59)));
        assert!(!range.in_range(&at(2023, 6, 16, 0, 0, 0)));
    }

    #[test]
    fn parses_pair_from_start_of_first_to_end_of_second() {
        let range: DateRange = "2023-06, 2024".parse().unwrap();
        assert_eq!(range.after, Some(at(2023, 6, 1, 0, 0, 0)));
        assert!(range.in_range(&at(2024, 12, 31, 23, 59, 59)));
        assert!(!range.in_range(&at(2025, 1, 1, 0, 0, 0)));
    }

    #[test]
    fn rejects_malformed_input() {
        for input in ["", "  ", "20", "2023-13", "2023-02-30", "abcd", "2023-6-x", "2023/06"] {
            let result = input.parse::<DateRange>();
            assert!(
                matches!(result, Err(ConfigError::InvalidDateRange { .. })),
                "expected error for {:?}",
                input
            );
        }
    }

    #[test]
    fn rejects_reversed_pair() {
        let result = "2024,2023".parse::<DateRange>();
        assert!(matches!(result, Err(ConfigError::InvalidDateRange { .. })));
    }

    #[test]
    fn display_mentions_bounds() {
        assert_eq!(DateRange::default().to_string(), "any date");
        let range: DateRange = "2023-06-15".parse().unwrap();
        assert!(range.to_string().starts_with("2023-06-15 00:00:00 to 2023-06-15"));
    }
}
