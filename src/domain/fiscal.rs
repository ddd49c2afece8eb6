//! Fiscal quarter arithmetic and labeling
//!
//! The fiscal calendar is offset from the calendar year: the fiscal quarter of
//! a date is the calendar quarter of that date shifted seven months forward,
//! and the fiscal year is the calendar year of the shifted date. Fiscal year N
//! therefore begins on 1 June of calendar year N-1.

use crate::error::{FyqError, Result};
use chrono::{Datelike, Duration, NaiveDate};
use regex::Regex;
use std::sync::OnceLock;

/// Calendar months to shift forward so calendar-quarter boundaries line up
/// with fiscal-quarter boundaries.
const QUARTER_MONTH_SHIFT: i32 = 7;

fn current_label_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^FY(\d{2})Q([1-4])$").expect("valid regex"))
}

fn legacy_label_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^Q([1-4])FY(\d{2})$").expect("valid regex"))
}

/// First day of the month identified by a linear month index (year * 12 + month0)
fn month_start(index: i32) -> NaiveDate {
    let year = index.div_euclid(12);
    let month0 = index.rem_euclid(12) as u32;
    NaiveDate::from_ymd_opt(year, month0 + 1, 1).expect("valid month")
}

/// Label style for a fiscal quarter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuarterStyle {
    /// Current style: FY26Q1
    Current,
    /// Legacy style: Q1FY26
    Legacy,
}

/// A fiscal quarter: a (fiscal year, quarter) pair
///
/// Ordering is chronological: by fiscal year, then quarter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FiscalQuarter {
    pub fiscal_year: i32,
    pub quarter: u8,
}

impl FiscalQuarter {
    /// Create a fiscal quarter, validating the quarter number
    pub fn new(fiscal_year: i32, quarter: u8) -> Result<Self> {
        if !(1..=4).contains(&quarter) {
            return Err(FyqError::Config(format!(
                "Quarter must be 1-4, got {}",
                quarter
            )));
        }
        Ok(FiscalQuarter {
            fiscal_year,
            quarter,
        })
    }

    /// The fiscal quarter containing a calendar date
    ///
    /// Total over all dates; a date on a quarter boundary belongs to the
    /// quarter it starts.
    pub fn for_date(date: NaiveDate) -> Self {
        let shifted = date.year() * 12 + date.month0() as i32 + QUARTER_MONTH_SHIFT;
        FiscalQuarter {
            fiscal_year: shifted.div_euclid(12),
            quarter: (shifted.rem_euclid(12) / 3 + 1) as u8,
        }
    }

    /// First calendar day of this quarter
    pub fn start(&self) -> NaiveDate {
        let shifted = self.fiscal_year * 12 + (self.quarter as i32 - 1) * 3;
        month_start(shifted - QUARTER_MONTH_SHIFT)
    }

    /// Last calendar day of this quarter (next quarter's start minus one day)
    pub fn end(&self) -> NaiveDate {
        self.next().start() - Duration::days(1)
    }

    /// The quarter immediately before this one
    pub fn previous(&self) -> Self {
        if self.quarter == 1 {
            FiscalQuarter {
                fiscal_year: self.fiscal_year - 1,
                quarter: 4,
            }
        } else {
            FiscalQuarter {
                fiscal_year: self.fiscal_year,
                quarter: self.quarter - 1,
            }
        }
    }

    /// The quarter immediately after this one
    pub fn next(&self) -> Self {
        if self.quarter == 4 {
            FiscalQuarter {
                fiscal_year: self.fiscal_year + 1,
                quarter: 1,
            }
        } else {
            FiscalQuarter {
                fiscal_year: self.fiscal_year,
                quarter: self.quarter + 1,
            }
        }
    }

    /// Render this quarter as a label in the requested style
    pub fn format(&self, style: QuarterStyle) -> String {
        let yy = self.fiscal_year.rem_euclid(100);
        match style {
            QuarterStyle::Current => format!("FY{:02}Q{}", yy, self.quarter),
            QuarterStyle::Legacy => format!("Q{}FY{:02}", self.quarter, yy),
        }
    }

    /// Parse a quarter label in either style
    ///
    /// Accepts FY{yy}Q{q} and Q{q}FY{yy}, case-insensitively. Two-digit years
    /// resolve to 2000-2099.
    pub fn parse(label: &str) -> Result<Self> {
        let normalized = label.trim().to_uppercase();

        if let Some(captures) = current_label_regex().captures(&normalized) {
            let yy: i32 = captures[1].parse().expect("two digits");
            let quarter: u8 = captures[2].parse().expect("one digit");
            return FiscalQuarter::new(2000 + yy, quarter);
        }
        if let Some(captures) = legacy_label_regex().captures(&normalized) {
            let quarter: u8 = captures[1].parse().expect("one digit");
            let yy: i32 = captures[2].parse().expect("two digits");
            return FiscalQuarter::new(2000 + yy, quarter);
        }

        Err(FyqError::InvalidQuarterLabel(label.to_string()))
    }

    /// The `count` quarters ending at (and including) this one
    ///
    /// Sorted ascending by start date, oldest first. Ranges are contiguous
    /// and non-overlapping.
    pub fn history(&self, count: usize) -> Vec<QuarterRange> {
        let mut quarters = Vec::with_capacity(count);
        let mut quarter = *self;
        for _ in 0..count {
            quarters.push(quarter);
            quarter = quarter.previous();
        }
        quarters.reverse();
        quarters.into_iter().map(QuarterRange::for_quarter).collect()
    }
}

impl std::fmt::Display for FiscalQuarter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.format(QuarterStyle::Current))
    }
}

/// A fiscal quarter materialized with its boundary dates and both labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuarterRange {
    pub quarter: FiscalQuarter,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub label_current: String,
    pub label_legacy: String,
}

impl QuarterRange {
    /// Materialize the range for a quarter
    pub fn for_quarter(quarter: FiscalQuarter) -> Self {
        QuarterRange {
            quarter,
            start: quarter.start(),
            end: quarter.end(),
            label_current: quarter.format(QuarterStyle::Current),
            label_legacy: quarter.format(QuarterStyle::Legacy),
        }
    }
}
