//! Integration tests for the report pipeline
//!
//! The live path needs a Postgres service, so the pipeline is exercised
//! through the runner seam with an in-memory SQLite connection. The run
//! command itself is covered via the JDBC refusal path, which needs no
//! database at all.

use fyq::application::{RunOptions, RunReportsService};
use fyq::error::{FyqError, Result};
use fyq::infrastructure::{QueryRunner, Table};
use predicates::prelude::*;
use rusqlite::types::Value;
use rusqlite::Connection;
use std::collections::BTreeMap;
use std::fs;
use tempfile::TempDir;

mod common;
use common::fyq_cmd;

struct SqliteRunner {
    conn: Connection,
}

impl QueryRunner for SqliteRunner {
    fn run(&mut self, sql: &str) -> Result<Table> {
        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(|e| FyqError::Config(e.to_string()))?;
        let columns: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();

        let mut table = Table::new(columns.clone());
        let mut rows = stmt
            .query([])
            .map_err(|e| FyqError::Config(e.to_string()))?;
        while let Some(row) = rows.next().map_err(|e| FyqError::Config(e.to_string()))? {
            let mut rendered = Vec::with_capacity(columns.len());
            for index in 0..columns.len() {
                let value: Value = row
                    .get(index)
                    .map_err(|e| FyqError::Config(e.to_string()))?;
                rendered.push(match value {
                    Value::Null => String::new(),
                    Value::Integer(v) => v.to_string(),
                    Value::Real(v) => v.to_string(),
                    Value::Text(v) => v,
                    Value::Blob(_) => String::new(),
                });
            }
            table.push_row(rendered);
        }
        Ok(table)
    }
}

fn seeded_runner() -> SqliteRunner {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "create table bookings (qtr text, amount integer);
         insert into bookings values ('FY16Q4', 1200), ('FY16Q4', 800), ('FY17Q1', 500);",
    )
    .unwrap();
    SqliteRunner { conn }
}

fn pipeline_options(temp: &TempDir) -> RunOptions {
    let scripts = temp.path().join("scripts");
    fs::create_dir(&scripts).unwrap();
    fs::write(
        scripts.join("qry_bookings.sql"),
        "select qtr, amount from bookings where qtr = '{QUARTER}' order by amount",
    )
    .unwrap();
    fs::write(
        scripts.join("qry_totals.sql"),
        "select qtr, sum(amount) as total from bookings group by qtr order by qtr",
    )
    .unwrap();
    RunOptions {
        config: temp.path().join("db.toml"),
        scripts,
        vars: [("QUARTER".to_string(), "FY16Q4".to_string())]
            .into_iter()
            .collect(),
        out_dir: temp.path().join("out"),
        only: None,
    }
}

#[test]
fn test_pipeline_exports_query_results() {
    let temp = TempDir::new().unwrap();
    let written =
        RunReportsService::execute_with_runner(&mut seeded_runner(), &pipeline_options(&temp))
            .unwrap();
    assert_eq!(written.len(), 2);

    let bookings = fs::read_to_string(&written[0]).unwrap();
    assert_eq!(bookings, "qtr,amount\nFY16Q4,800\nFY16Q4,1200\n");

    let totals = fs::read_to_string(&written[1]).unwrap();
    assert_eq!(totals, "qtr,total\nFY16Q4,2000\nFY17Q1,500\n");
}

#[test]
fn test_pipeline_filenames_carry_timestamp() {
    let temp = TempDir::new().unwrap();
    let mut opts = pipeline_options(&temp);
    opts.only = Some("^totals$".to_string());

    let written = RunReportsService::execute_with_runner(&mut seeded_runner(), &opts).unwrap();
    assert_eq!(written.len(), 1);

    let name = written[0].file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("totals_20"));
    assert!(name.ends_with(".csv"));
}

#[test]
fn test_pipeline_null_renders_blank() {
    let temp = TempDir::new().unwrap();
    let scripts = temp.path().join("scripts");
    fs::create_dir(&scripts).unwrap();
    fs::write(scripts.join("qry_nulls.sql"), "select null as missing").unwrap();

    let opts = RunOptions {
        config: temp.path().join("db.toml"),
        scripts,
        vars: BTreeMap::new(),
        out_dir: temp.path().join("out"),
        only: None,
    };
    let written = RunReportsService::execute_with_runner(&mut seeded_runner(), &opts).unwrap();
    let nulls = fs::read_to_string(&written[0]).unwrap();
    assert_eq!(nulls, "missing\n\"\"\n");
}

#[test]
fn test_run_refuses_jdbc_driver_with_url() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("db.toml");
    fs::write(
        &config,
        r#"
host = "warehouse.example.com"
database = "sales"
driver = "com.teradata.jdbc.TeraDriver"
user = "analyst"
"#,
    )
    .unwrap();
    let scripts = temp.path().join("scripts");
    fs::create_dir(&scripts).unwrap();
    fs::write(scripts.join("qry_bookings.sql"), "select 1").unwrap();

    fyq_cmd()
        .arg("run")
        .args(["--config", config.to_str().unwrap()])
        .args(["--scripts", scripts.to_str().unwrap()])
        .assert()
        .failure()
        .code(5)
        .stderr(predicate::str::contains("com.teradata.jdbc.TeraDriver"))
        .stderr(predicate::str::contains(
            "jdbc:postgresql://warehouse.example.com:5432/sales",
        ));
}

#[test]
fn test_run_missing_config_fails() {
    let temp = TempDir::new().unwrap();
    let scripts = temp.path().join("scripts");
    fs::create_dir(&scripts).unwrap();

    fyq_cmd()
        .arg("run")
        .args(["--config", temp.path().join("absent.toml").to_str().unwrap()])
        .args(["--scripts", scripts.to_str().unwrap()])
        .assert()
        .failure()
        .code(1);
}
