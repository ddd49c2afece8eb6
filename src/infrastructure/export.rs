//! Bulk CSV export of in-memory tables

use crate::error::Result;
use crate::infrastructure::db::Table;
use chrono::NaiveDateTime;
use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Write every table whose name matches `pattern` to a timestamped CSV file
///
/// Files are named `{name}_{YYYYmmdd_HHMMSS}.csv`. Returns the written paths
/// in table-name order.
pub fn export_tables(
    tables: &BTreeMap<String, Table>,
    pattern: &Regex,
    dir: &Path,
    stamp: NaiveDateTime,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let suffix = stamp.format("%Y%m%d_%H%M%S");

    let mut written = Vec::new();
    for (name, table) in tables {
        if !pattern.is_match(name) {
            continue;
        }
        let path = dir.join(format!("{}_{}.csv", name, suffix));
        write_table(table, &path)?;
        written.push(path);
    }
    Ok(written)
}

/// Write one table as CSV with a header row
pub fn write_table(table: &Table, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&table.columns)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}
