//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "fyq")]
#[command(about = "Fiscal-quarter reporting helpers", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the fiscal quarter for a date, month, year or quarter label
    Quarter {
        /// Quarter reference (e.g. 2016-04-25, 2017-11, 2017, FY16Q4; default: today)
        #[arg(value_name = "REF")]
        reference: Option<String>,
    },

    /// List the quarters ending at a reference, oldest first
    History {
        /// Quarter reference (default: today)
        #[arg(value_name = "REF")]
        reference: Option<String>,

        /// Number of quarters to list
        #[arg(short, long, default_value_t = 8)]
        count: usize,
    },

    /// Classify CSV records with an ordered keyword rule file
    Tag {
        /// Input CSV with a header row
        #[arg(short, long)]
        input: PathBuf,

        /// Rule-set TOML file
        #[arg(short, long)]
        rules: PathBuf,

        /// Output CSV (omit to classify without writing)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Categories to exclude from the output, comma-separated
        #[arg(long, value_delimiter = ',')]
        drop: Vec<String>,
    },

    /// Print the most recently modified file matching a pattern
    Latest {
        /// Directory to scan
        dir: PathBuf,

        /// Regular expression matched against file names
        #[arg(default_value = ".*")]
        pattern: String,
    },

    /// Look up brand colors
    Colors {
        /// Exact color names (unknown names print NA)
        names: Vec<String>,

        /// Show colors whose name contains a fragment
        #[arg(long)]
        find: Vec<String>,

        /// Show every color except these, comma-separated
        #[arg(long = "not", value_delimiter = ',')]
        exclude: Vec<String>,
    },

    /// Run a directory of SQL scripts and export the results as CSV
    Run {
        /// Connection config TOML file
        #[arg(short, long)]
        config: PathBuf,

        /// Directory of .sql scripts
        #[arg(short, long)]
        scripts: PathBuf,

        /// Template variables, NAME=value (repeatable)
        #[arg(long = "var")]
        vars: Vec<String>,

        /// Output directory for CSV exports
        #[arg(short, long, default_value = ".")]
        out: PathBuf,

        /// Export only tables whose name matches this pattern
        #[arg(long)]
        only: Option<String>,
    },
}
