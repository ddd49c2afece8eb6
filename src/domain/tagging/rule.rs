//! Keyword rule definitions and rule-file loading

use crate::error::Result;
use regex::{RegexSet, RegexSetBuilder};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Which configured record field a rule inspects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchField {
    Primary,
    Alternate,
}

/// How a rule's patterns are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    #[default]
    Substring,
    Regex,
}

/// Compiled pattern set; both kinds match case-insensitively
#[derive(Debug)]
enum Patterns {
    Substring(Vec<String>),
    Regex(RegexSet),
}

impl Patterns {
    fn matches(&self, normalized: &str) -> bool {
        match self {
            Patterns::Substring(needles) => {
                needles.iter().any(|needle| normalized.contains(needle.as_str()))
            }
            Patterns::Regex(set) => set.is_match(normalized),
        }
    }
}

/// A single classification rule
///
/// Rules live in a priority-ordered list; the list position, not anything in
/// the rule itself, decides precedence.
#[derive(Debug)]
pub struct KeywordRule {
    pub category: String,
    pub field: MatchField,
    patterns: Patterns,
}

impl KeywordRule {
    /// Build a rule matching case-insensitive substrings
    pub fn substring<S: AsRef<str>>(category: &str, field: MatchField, patterns: &[S]) -> Self {
        KeywordRule {
            category: category.to_string(),
            field,
            patterns: Patterns::Substring(
                patterns
                    .iter()
                    .map(|p| p.as_ref().to_lowercase())
                    .collect(),
            ),
        }
    }

    /// Build a rule matching case-insensitive regular expressions
    pub fn regex<S: AsRef<str>>(category: &str, field: MatchField, patterns: &[S]) -> Result<Self> {
        let set = RegexSetBuilder::new(patterns.iter().map(|p| p.as_ref()))
            .case_insensitive(true)
            .build()?;
        Ok(KeywordRule {
            category: category.to_string(),
            field,
            patterns: Patterns::Regex(set),
        })
    }

    /// Test the rule against a field value
    pub fn matches(&self, value: &str) -> bool {
        self.patterns.matches(&value.to_lowercase())
    }
}

/// One `[[rules]]` entry of a rules file
#[derive(Debug, Deserialize)]
pub struct RuleEntry {
    pub category: String,
    pub field: MatchField,
    #[serde(rename = "match", default)]
    pub match_kind: MatchKind,
    pub patterns: Vec<String>,
}

/// Declarative rule-set file, deserialized from TOML
#[derive(Debug, Deserialize)]
pub struct RuleSpec {
    pub primary_field: String,
    pub alternate_field: String,
    #[serde(default)]
    pub required_fields: Vec<String>,
    pub default_category: String,
    pub category_order: Vec<String>,
    pub rules: Vec<RuleEntry>,
}

impl RuleSpec {
    /// Load a rule spec from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Compile the declarative entries into ordered keyword rules
    pub fn compile_rules(&self) -> Result<Vec<KeywordRule>> {
        self.rules
            .iter()
            .map(|entry| match entry.match_kind {
                MatchKind::Substring => Ok(KeywordRule::substring(
                    &entry.category,
                    entry.field,
                    &entry.patterns,
                )),
                MatchKind::Regex => {
                    KeywordRule::regex(&entry.category, entry.field, &entry.patterns)
                }
            })
            .collect()
    }
}
