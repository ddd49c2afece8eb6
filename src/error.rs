//! Error types for fyq

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the fyq toolkit
#[derive(Debug, Error)]
pub enum FyqError {
    #[error("Invalid quarter label: {0}")]
    InvalidQuarterLabel(String),

    #[error("Invalid quarter reference: {0}")]
    InvalidQuarterReference(String),

    #[error("Unresolved category: {0}")]
    UnresolvedCategory(String),

    #[error("Invalid rule pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("No file matching '{pattern}' in {dir}")]
    NoMatchingFile { dir: PathBuf, pattern: String },

    #[error("Unsupported database driver: {0}")]
    UnsupportedDriver(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Database error: {0}")]
    Db(#[from] postgres::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl FyqError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            FyqError::InvalidQuarterLabel(_) | FyqError::InvalidQuarterReference(_) => 2,
            FyqError::UnresolvedCategory(_) | FyqError::InvalidPattern(_) => 3,
            FyqError::NoMatchingFile { .. } => 4,
            FyqError::UnsupportedDriver(_) => 5,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            FyqError::InvalidQuarterLabel(label) => {
                format!(
                    "Invalid quarter label: '{}'\n\n\
                    Valid quarter labels:\n\
                    • Current style: FY26Q1, FY18Q3, ...\n\
                    • Legacy style: Q1FY26, Q3FY18, ...\n\n\
                    The two-digit year is the fiscal year (2000-2099).",
                    label
                )
            }
            FyqError::InvalidQuarterReference(ref_str) => {
                format!(
                    "Invalid quarter reference: '{}'\n\n\
                    Valid quarter references:\n\
                    • Quarter labels: FY26Q1 or Q1FY26\n\
                    • A bare fiscal year: 2017 (resolves to that year's Q1)\n\
                    • A month: 2017-11\n\
                    • A date: 2017-11-03 or 03-11-2017\n\n\
                    Examples:\n\
                    fyq quarter FY18Q2\n\
                    fyq history 2016-04-25 --count 8",
                    ref_str
                )
            }
            FyqError::UnresolvedCategory(category) => {
                format!(
                    "Unresolved category: '{}'\n\n\
                    Suggestions:\n\
                    • Every rule category and the default category must appear\n\
                      in category_order in the rules file\n\
                    • Set default_category to the catch-all bucket (e.g. \"customer\")",
                    category
                )
            }
            FyqError::NoMatchingFile { dir, pattern } => {
                format!(
                    "No file matching '{}' in {}\n\n\
                    Suggestions:\n\
                    • Check the directory path and the file name pattern\n\
                    • The pattern is a regular expression matched against file names",
                    pattern,
                    dir.display()
                )
            }
            FyqError::UnsupportedDriver(detail) => {
                format!(
                    "Unsupported database driver: {}\n\n\
                    fyq connects natively to Postgres-compatible services only.\n\
                    For JDBC drivers, use the rendered URL with your JDBC tooling.",
                    detail
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using FyqError
pub type Result<T> = std::result::Result<T, FyqError>;
