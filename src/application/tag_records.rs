//! Record tagging use case: CSV in, classified CSV out

use crate::domain::tagging::{DroppedRecord, Record, RuleSet, RuleSpec, RuleTally, TaggedRecord};
use crate::error::Result;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Options for a tagging run
#[derive(Debug, Clone)]
pub struct TagOptions {
    /// Input CSV with a header row
    pub input: PathBuf,

    /// Rule-set TOML file
    pub rules: PathBuf,

    /// Output CSV path (None = classify without writing)
    pub output: Option<PathBuf>,

    /// Categories to exclude from the output after classification
    pub drop: Vec<String>,
}

/// What a tagging run did
#[derive(Debug)]
pub struct TagReport {
    pub written: Option<PathBuf>,
    pub tagged: usize,
    pub dropped: Vec<DroppedRecord>,
    pub tallies: Vec<RuleTally>,
}

/// Service classifying CSV records with a rule file
pub struct TagRecordsService;

impl TagRecordsService {
    /// Execute the tagging run
    pub fn execute(options: &TagOptions) -> Result<TagReport> {
        let spec = RuleSpec::load(&options.rules)?;
        let ruleset = RuleSet::from_spec(&spec)?;

        let (headers, records) = read_records(&options.input)?;

        let filter: Option<BTreeSet<String>> = if options.drop.is_empty() {
            None
        } else {
            Some(options.drop.iter().cloned().collect())
        };
        let outcome = ruleset.tag(records, filter.as_ref())?;

        let written = match &options.output {
            Some(path) => {
                write_tagged(&headers, &outcome.records, path)?;
                Some(path.clone())
            }
            None => None,
        };

        Ok(TagReport {
            written,
            tagged: outcome.records.len(),
            dropped: outcome.dropped,
            tallies: outcome.tallies,
        })
    }
}

/// Read a CSV file into header names and records keyed by header
fn read_records(path: &Path) -> Result<(Vec<String>, Vec<Record>)> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let values = headers
            .iter()
            .cloned()
            .zip(row.iter().map(str::to_string))
            .collect();
        records.push(Record::new(values));
    }
    Ok((headers, records))
}

/// Write tagged records with appended category and category_rank columns
fn write_tagged(headers: &[String], tagged: &[TaggedRecord], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    let mut out_headers = headers.to_vec();
    out_headers.push("category".to_string());
    out_headers.push("category_rank".to_string());
    writer.write_record(&out_headers)?;

    for entry in tagged {
        let mut row: Vec<String> = headers
            .iter()
            .map(|h| entry.record.values.get(h).cloned().unwrap_or_default())
            .collect();
        row.push(entry.category.clone());
        row.push(entry.rank.to_string());
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}
