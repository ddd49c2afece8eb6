//! Most-recent-file discovery

use crate::error::{FyqError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

/// The single most-recently-modified file in `dir` whose name matches
/// `pattern`
///
/// Only the top directory level is scanned. Ties on modification time are
/// broken by taking the last entry of the (mtime, name) sort order. Fails if
/// nothing matches.
pub fn latest_file(dir: &Path, pattern: &Regex) -> Result<PathBuf> {
    let mut matches: Vec<(SystemTime, String, PathBuf)> = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let Ok(entry) = entry else {
            continue;
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        if !pattern.is_match(name) {
            continue;
        }
        let Some(modified) = entry.metadata().ok().and_then(|m| m.modified().ok()) else {
            continue;
        };
        matches.push((modified, name.to_string(), entry.into_path()));
    }

    matches.sort_by(|a, b| (a.0, &a.1).cmp(&(b.0, &b.1)));
    matches
        .pop()
        .map(|(_, _, path)| path)
        .ok_or_else(|| FyqError::NoMatchingFile {
            dir: dir.to_path_buf(),
            pattern: pattern.as_str().to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;

    fn backdate(path: &Path, seconds: u64) {
        let file = fs::File::options().write(true).open(path).unwrap();
        file.set_modified(SystemTime::now() - Duration::from_secs(seconds))
            .unwrap();
    }

    #[test]
    fn test_latest_by_modification_time() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("report_a.csv"), "a").unwrap();
        fs::write(temp.path().join("report_z.csv"), "z").unwrap();
        // z sorts last by name but is older
        backdate(&temp.path().join("report_z.csv"), 3600);

        let pattern = Regex::new(r"^report_.*\.csv$").unwrap();
        let latest = latest_file(temp.path(), &pattern).unwrap();
        assert!(latest.ends_with("report_a.csv"));
    }

    #[test]
    fn test_pattern_filters_candidates() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("report.csv"), "r").unwrap();
        fs::write(temp.path().join("notes.txt"), "n").unwrap();

        let pattern = Regex::new(r"\.csv$").unwrap();
        let latest = latest_file(temp.path(), &pattern).unwrap();
        assert!(latest.ends_with("report.csv"));
    }

    #[test]
    fn test_tie_broken_by_sort_order() {
        let temp = TempDir::new().unwrap();
        let when = SystemTime::now() - Duration::from_secs(60);
        for name in ["report_a.csv", "report_b.csv"] {
            let path = temp.path().join(name);
            fs::write(&path, "x").unwrap();
            let file = fs::File::options().write(true).open(&path).unwrap();
            file.set_modified(when).unwrap();
        }

        let pattern = Regex::new(r"^report_.*\.csv$").unwrap();
        let latest = latest_file(temp.path(), &pattern).unwrap();
        assert!(latest.ends_with("report_b.csv"));
    }

    #[test]
    fn test_no_match_fails() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("notes.txt"), "n").unwrap();

        let pattern = Regex::new(r"\.csv$").unwrap();
        let result = latest_file(temp.path(), &pattern);
        assert!(matches!(result, Err(FyqError::NoMatchingFile { .. })));
    }

    #[test]
    fn test_subdirectories_are_ignored() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("archive")).unwrap();
        fs::write(temp.path().join("archive").join("old.csv"), "o").unwrap();
        fs::write(temp.path().join("fresh.csv"), "f").unwrap();

        let pattern = Regex::new(r"\.csv$").unwrap();
        let latest = latest_file(temp.path(), &pattern).unwrap();
        assert!(latest.ends_with("fresh.csv"));
    }
}
