//! Infrastructure layer - External I/O and collaborators

pub mod db;
pub mod discovery;
pub mod export;
pub mod scripts;

pub use db::{DbClient, DbConfig, DriverKind, QueryRunner, Table};
pub use discovery::latest_file;
pub use export::{export_tables, write_table};
pub use scripts::{load_scripts, run_scripts};
