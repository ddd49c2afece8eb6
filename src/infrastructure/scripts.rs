//! SQL script loading, templating and execution
//!
//! Scripts are plain `.sql` files in one directory. The derived name strips
//! the `qry_` prefix and `.sql` suffix convention, so `qry_bookings.sql`
//! becomes `bookings`. Loading and running both return explicit mappings;
//! nothing is stashed in ambient state.

use crate::error::Result;
use crate::infrastructure::db::{QueryRunner, Table};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Read every `.sql` file in a directory, substituting `{NAME}` placeholders
///
/// Unknown placeholders are left intact so a missed variable shows up in the
/// query text instead of vanishing.
pub fn load_scripts(
    dir: &Path,
    vars: &BTreeMap<String, String>,
) -> Result<BTreeMap<String, String>> {
    let mut scripts = BTreeMap::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(stem) = file_name.strip_suffix(".sql") else {
            continue;
        };
        let name = stem.strip_prefix("qry_").unwrap_or(stem).to_string();

        let contents = fs::read_to_string(&path)?;
        scripts.insert(name, substitute(&contents, vars));
    }

    Ok(scripts)
}

/// Replace `{NAME}` placeholders with their values
fn substitute(text: &str, vars: &BTreeMap<String, String>) -> String {
    let mut result = text.to_string();
    for (name, value) in vars {
        result = result.replace(&format!("{{{}}}", name), value);
    }
    result
}

/// Execute each named query, producing a mapping from name to result table
///
/// Runner failures surface unmodified; no retries, no partial results.
pub fn run_scripts(
    runner: &mut dyn QueryRunner,
    scripts: &BTreeMap<String, String>,
) -> Result<BTreeMap<String, Table>> {
    let mut tables = BTreeMap::new();
    for (name, sql) in scripts {
        tables.insert(name.clone(), runner.run(sql)?);
    }
    Ok(tables)
}
