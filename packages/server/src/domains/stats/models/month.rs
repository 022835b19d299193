//! Calendar-month arithmetic for the statistics window.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};

use crate::common::AppError;

/// A year + month pair, the unit of the statistics time series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    pub fn new(year: i32, month: u32) -> Result<Self, AppError> {
        if !(1..=12).contains(&month) || !(1..=9999).contains(&year) {
            return Err(AppError::Validation(format!(
                "invalid month: {year:04}-{month:02}"
            )));
        }
        Ok(Self { year, month })
    }

    /// Parse `YYYY-MM` (primary) or bare `YYYYMM`.
    pub fn parse(s: &str) -> Result<Self, AppError> {
        let invalid = || AppError::Validation(format!("invalid month: {s}"));
        // Both formats are pure ASCII; slicing a multibyte string by byte
        // index would panic.
        if !s.is_ascii() {
            return Err(invalid());
        }
        let (year_part, month_part) = match s.len() {
            7 if s.as_bytes()[4] == b'-' => (&s[..4], &s[5..]),
            6 => (&s[..4], &s[4..]),
            _ => return Err(invalid()),
        };
        let year: i32 = year_part.parse().map_err(|_| invalid())?;
        let month: u32 = month_part.parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }

    /// The month containing the current instant (UTC).
    pub fn current() -> Self {
        let now = Utc::now();
        Self {
            year: now.year(),
            month: now.month(),
        }
    }

    /// `YYYY-MM` label, the shape every consumer of the series expects.
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    /// The following month, rolling over year boundaries.
    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// `n` months earlier, rolling over year boundaries.
    pub fn minus_months(self, n: u32) -> Self {
        let total = self.year as i64 * 12 + (self.month as i64 - 1) - n as i64;
        Self {
            year: (total.div_euclid(12)) as i32,
            month: (total.rem_euclid(12) + 1) as u32,
        }
    }

    /// First calendar day of the month.
    pub fn first_day(&self) -> NaiveDate {
        // Safe: month is validated to 1..=12 on construction.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap()
    }

    /// Midnight UTC on the first day, for timestamp range bounds.
    pub fn start_datetime(&self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self.first_day().and_hms_opt(0, 0, 0).unwrap())
    }

    /// The inclusive, contiguous sequence `[start, end]`. Every month in
    /// range appears exactly once; no gaps across year boundaries.
    pub fn expand(start: Month, end: Month) -> Vec<Month> {
        let mut months = Vec::new();
        let mut current = start;
        while current <= end {
            months.push(current);
            current = current.next();
        }
        months
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_formats() {
        assert_eq!(Month::parse("2024-01").unwrap(), Month::new(2024, 1).unwrap());
        assert_eq!(Month::parse("202401").unwrap(), Month::new(2024, 1).unwrap());
        assert!(Month::parse("2024-13").is_err());
        assert!(Month::parse("2024/01").is_err());
        assert!(Month::parse("24-01").is_err());
        assert!(Month::parse("").is_err());
    }

    #[test]
    fn multibyte_input_is_rejected_not_panicking() {
        // Byte length matches a valid format, but byte 4 is inside a
        // multibyte character.
        assert!(Month::parse("202\u{e9}1").is_err());
        assert!(Month::parse("20\u{e9}4-01").is_err());
        assert!(Month::parse("\u{4e00}\u{4e8c}").is_err());
    }

    #[test]
    fn expand_rolls_over_year_boundary() {
        let months = Month::expand(
            Month::parse("2023-11").unwrap(),
            Month::parse("2024-02").unwrap(),
        );
        let labels: Vec<String> = months.iter().map(Month::label).collect();
        assert_eq!(labels, vec!["2023-11", "2023-12", "2024-01", "2024-02"]);
    }

    #[test]
    fn expand_single_month() {
        let m = Month::parse("2024-06").unwrap();
        assert_eq!(Month::expand(m, m), vec![m]);
    }

    #[test]
    fn expand_empty_when_start_after_end() {
        let months = Month::expand(
            Month::parse("2024-03").unwrap(),
            Month::parse("2024-01").unwrap(),
        );
        assert!(months.is_empty());
    }

    #[test]
    fn minus_months_crosses_years() {
        let m = Month::parse("2024-02").unwrap();
        assert_eq!(m.minus_months(5), Month::parse("2023-09").unwrap());
        assert_eq!(m.minus_months(0), m);
        assert_eq!(m.minus_months(26), Month::parse("2021-12").unwrap());
    }

    #[test]
    fn trailing_six_month_window_has_six_labels() {
        let end = Month::parse("2024-03").unwrap();
        let start = end.minus_months(5);
        assert_eq!(Month::expand(start, end).len(), 6);
    }

    #[test]
    fn range_bounds() {
        let m = Month::parse("2024-12").unwrap();
        assert_eq!(m.first_day(), NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
        assert_eq!(
            m.next().first_day(),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
        );
    }
}
