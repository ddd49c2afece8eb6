//! Application layer - Use cases and orchestration

pub mod quarter_report;
pub mod run_reports;
pub mod tag_records;

pub use quarter_report::{QuarterReportService, QuarterSummary};
pub use run_reports::{parse_vars, RunOptions, RunReportsService};
pub use tag_records::{TagOptions, TagRecordsService, TagReport};
