//! Quarter reference parsing and resolution

use crate::domain::fiscal::FiscalQuarter;
use crate::error::{FyqError, Result};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

fn bare_year_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^\d{4}$").expect("valid regex"))
}

fn month_year_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^(\d{4})-(\d{1,2})$").expect("valid regex"))
}

/// A reference that can be resolved to a fiscal quarter
///
/// Shapes are tried in a fixed order so that a bare four-digit year is always
/// read as a fiscal year, never as a day count or a date fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuarterRef {
    /// A quarter label in either style (FY18Q2 / Q2FY18)
    Label(FiscalQuarter),
    /// A bare fiscal year; resolves to that year's Q1
    FiscalYear(i32),
    /// A calendar month; resolves to the quarter containing its first day
    Month { year: i32, month: u32 },
    /// A specific calendar date
    Date(NaiveDate),
}

impl QuarterRef {
    /// Parse a quarter reference string
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();

        if let Ok(quarter) = FiscalQuarter::parse(trimmed) {
            return Ok(QuarterRef::Label(quarter));
        }

        if bare_year_regex().is_match(trimmed) {
            let year: i32 = trimmed.parse().expect("four digits");
            return Ok(QuarterRef::FiscalYear(year));
        }

        if let Some(captures) = month_year_regex().captures(trimmed) {
            let year: i32 = captures[1].parse().expect("four digits");
            let month: u32 = captures[2].parse().expect("digits");
            if !(1..=12).contains(&month) {
                return Err(FyqError::InvalidQuarterReference(input.to_string()));
            }
            return Ok(QuarterRef::Month { year, month });
        }

        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(trimmed, "%d-%m-%Y"))
            .map(QuarterRef::Date)
            .map_err(|_| FyqError::InvalidQuarterReference(input.to_string()))
    }

    /// Resolve this reference to the fiscal quarter it names
    pub fn resolve(&self) -> FiscalQuarter {
        match self {
            QuarterRef::Label(quarter) => *quarter,
            QuarterRef::FiscalYear(year) => FiscalQuarter {
                fiscal_year: *year,
                quarter: 1,
            },
            QuarterRef::Month { year, month } => {
                let first = NaiveDate::from_ymd_opt(*year, *month, 1).expect("valid month");
                FiscalQuarter::for_date(first)
            }
            QuarterRef::Date(date) => FiscalQuarter::for_date(*date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_label_current_style() {
        assert_eq!(
            QuarterRef::parse("FY18Q2").unwrap(),
            QuarterRef::Label(FiscalQuarter::new(2018, 2).unwrap())
        );
    }

    #[test]
    fn test_parse_label_legacy_style() {
        assert_eq!(
            QuarterRef::parse("Q2FY18").unwrap(),
            QuarterRef::Label(FiscalQuarter::new(2018, 2).unwrap())
        );
    }

    #[test]
    fn test_parse_bare_year() {
        assert_eq!(QuarterRef::parse("2017").unwrap(), QuarterRef::FiscalYear(2017));
    }

    #[test]
    fn test_bare_year_resolves_to_q1_start() {
        let quarter = QuarterRef::parse("2017").unwrap().resolve();
        assert_eq!(quarter, FiscalQuarter::new(2017, 1).unwrap());
        assert_eq!(
            quarter.start(),
            NaiveDate::from_ymd_opt(2016, 6, 1).unwrap()
        );
    }

    #[test]
    fn test_parse_month_year() {
        assert_eq!(
            QuarterRef::parse("2017-11").unwrap(),
            QuarterRef::Month {
                year: 2017,
                month: 11
            }
        );
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(
            QuarterRef::parse("2016-04-25").unwrap(),
            QuarterRef::Date(NaiveDate::from_ymd_opt(2016, 4, 25).unwrap())
        );
    }

    #[test]
    fn test_parse_day_first_date() {
        assert_eq!(
            QuarterRef::parse("25-04-2016").unwrap(),
            QuarterRef::Date(NaiveDate::from_ymd_opt(2016, 4, 25).unwrap())
        );
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(
            QuarterRef::parse("  2017  ").unwrap(),
            QuarterRef::FiscalYear(2017)
        );
    }

    #[test]
    fn test_parse_invalid() {
        assert!(QuarterRef::parse("quarterly").is_err());
        assert!(QuarterRef::parse("2017-13").is_err());
        assert!(QuarterRef::parse("2016-02-30").is_err());
        assert!(QuarterRef::parse("17").is_err());
        assert!(QuarterRef::parse("").is_err());
    }

    #[test]
    fn test_resolve_date() {
        let quarter = QuarterRef::parse("2016-04-25").unwrap().resolve();
        assert_eq!(quarter, FiscalQuarter::new(2016, 4).unwrap());
    }

    #[test]
    fn test_resolve_month() {
        // November 2017 shifted 7 months is June 2018, so Q2 of fiscal 2018
        let quarter = QuarterRef::parse("2017-11").unwrap().resolve();
        assert_eq!(quarter, FiscalQuarter::new(2018, 2).unwrap());
    }

    #[test]
    fn test_resolve_label() {
        let quarter = QuarterRef::parse("Q4FY16").unwrap().resolve();
        assert_eq!(quarter, FiscalQuarter::new(2016, 4).unwrap());
    }
}
