//! Quarter reporting use cases

use crate::domain::fiscal::{FiscalQuarter, QuarterRange, QuarterStyle};
use crate::domain::quarter_ref::QuarterRef;
use crate::error::Result;
use chrono::NaiveDate;

/// Everything worth printing about one fiscal quarter
#[derive(Debug, Clone)]
pub struct QuarterSummary {
    pub quarter: FiscalQuarter,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub label_current: String,
    pub label_legacy: String,
    pub previous: FiscalQuarter,
}

/// Service resolving quarter references into summaries and history tables
pub struct QuarterReportService;

impl QuarterReportService {
    /// Summarize the quarter a reference resolves to
    pub fn summary(reference: &str) -> Result<QuarterSummary> {
        let quarter = QuarterRef::parse(reference)?.resolve();
        Ok(QuarterSummary {
            quarter,
            start: quarter.start(),
            end: quarter.end(),
            label_current: quarter.format(QuarterStyle::Current),
            label_legacy: quarter.format(QuarterStyle::Legacy),
            previous: quarter.previous(),
        })
    }

    /// The `count` quarters ending at the referenced one, oldest first
    pub fn history(reference: &str, count: usize) -> Result<Vec<QuarterRange>> {
        let quarter = QuarterRef::parse(reference)?.resolve();
        Ok(quarter.history(count))
    }
}
