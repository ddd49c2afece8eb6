//! Integration tests for the latest command

use predicates::prelude::*;
use std::fs;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

mod common;
use common::fyq_cmd;

fn backdate(path: &std::path::Path, seconds: u64) {
    let file = fs::File::options().write(true).open(path).unwrap();
    file.set_modified(SystemTime::now() - Duration::from_secs(seconds))
        .unwrap();
}

#[test]
fn test_latest_picks_newest_matching_file() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("bookings_2016_03.csv"), "old").unwrap();
    fs::write(temp.path().join("bookings_2016_04.csv"), "new").unwrap();
    fs::write(temp.path().join("notes.txt"), "ignore").unwrap();
    backdate(&temp.path().join("bookings_2016_03.csv"), 3600);

    fyq_cmd()
        .arg("latest")
        .arg(temp.path())
        .arg(r"^bookings_.*\.csv$")
        .assert()
        .success()
        .stdout(predicate::str::contains("bookings_2016_04.csv"));
}

#[test]
fn test_latest_defaults_to_any_file() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("only.csv"), "x").unwrap();

    fyq_cmd()
        .arg("latest")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("only.csv"));
}

#[test]
fn test_latest_no_match_exits_4() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("notes.txt"), "x").unwrap();

    fyq_cmd()
        .arg("latest")
        .arg(temp.path())
        .arg(r"\.csv$")
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("No file matching"));
}

#[test]
fn test_latest_invalid_pattern_exits_3() {
    let temp = TempDir::new().unwrap();

    fyq_cmd()
        .arg("latest")
        .arg(temp.path())
        .arg("(")
        .assert()
        .failure()
        .code(3);
}
