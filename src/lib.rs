//! fyq - Fiscal-quarter reporting helpers
//!
//! A command-line toolkit for business-reporting workflows: fiscal calendar
//! arithmetic and quarter labeling, priority-ordered keyword tagging of
//! tabular records, and thin collaborators for SQL script pipelines, bulk CSV
//! export, brand colors and file discovery.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::FyqError;
