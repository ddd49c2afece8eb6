//! Report pipeline use case: load scripts, run them, export the results

use crate::error::Result;
use crate::infrastructure::db::{DbConfig, QueryRunner};
use crate::infrastructure::export::export_tables;
use crate::infrastructure::scripts::{load_scripts, run_scripts};
use chrono::Local;
use regex::Regex;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Options for a report pipeline run
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Connection config TOML file
    pub config: PathBuf,

    /// Directory of SQL scripts
    pub scripts: PathBuf,

    /// Template variables substituted into the scripts
    pub vars: BTreeMap<String, String>,

    /// Directory for exported CSV files
    pub out_dir: PathBuf,

    /// Export only tables whose name matches this pattern (default: all)
    pub only: Option<String>,
}

/// Service orchestrating scripts -> queries -> CSV export
pub struct RunReportsService;

impl RunReportsService {
    /// Connect per the config and run the full pipeline
    pub fn execute(options: &RunOptions) -> Result<Vec<PathBuf>> {
        let config = DbConfig::load(&options.config)?;
        let mut client = config.connect()?;
        Self::execute_with_runner(&mut client, options)
    }

    /// Run the pipeline against an already-open runner
    pub fn execute_with_runner(
        runner: &mut dyn QueryRunner,
        options: &RunOptions,
    ) -> Result<Vec<PathBuf>> {
        let scripts = load_scripts(&options.scripts, &options.vars)?;
        let tables = run_scripts(runner, &scripts)?;

        let pattern = Regex::new(options.only.as_deref().unwrap_or(".*"))?;
        export_tables(
            &tables,
            &pattern,
            &options.out_dir,
            Local::now().naive_local(),
        )
    }
}

/// Parse `NAME=value` variable assignments from the command line
pub fn parse_vars(pairs: &[String]) -> Result<BTreeMap<String, String>> {
    let mut vars = BTreeMap::new();
    for pair in pairs {
        match pair.split_once('=') {
            Some((name, value)) if !name.trim().is_empty() => {
                vars.insert(name.trim().to_string(), value.to_string());
            }
            _ => {
                return Err(crate::error::FyqError::Config(format!(
                    "Invalid variable '{}', expected NAME=value",
                    pair
                )))
            }
        }
    }
    Ok(vars)
}
