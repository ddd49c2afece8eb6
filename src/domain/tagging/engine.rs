//! Tagging engine: ordered rule evaluation over record tables
//!
//! Rules are applied in list order; the first matching rule wins and a
//! classified record is never re-evaluated. Records unmatched by every rule
//! fall into the configured default category. Evaluation is sequential and
//! deterministic: identical input and rule list always yields identical
//! classification.

use crate::domain::tagging::rule::{KeywordRule, MatchField, RuleSpec};
use crate::error::{FyqError, Result};
use std::collections::{BTreeMap, BTreeSet};

/// One input row, keyed by column name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub values: BTreeMap<String, String>,
}

impl Record {
    pub fn new(values: BTreeMap<String, String>) -> Self {
        Record { values }
    }

    fn value(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    /// A required field counts as present only when non-blank
    fn has(&self, field: &str) -> bool {
        !self.value(field).trim().is_empty()
    }
}

/// A record with its derived classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedRecord {
    pub record: Record,
    pub category: String,
    pub rank: usize,
}

/// A record excluded before classification, and why
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedRecord {
    /// Position in the input sequence
    pub index: usize,
    pub missing_field: String,
}

/// Running per-rule match count; the last entry covers the default category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTally {
    pub category: String,
    pub matched: usize,
    pub cumulative: usize,
}

/// Result of one tagging pass
#[derive(Debug)]
pub struct TagOutcome {
    pub records: Vec<TaggedRecord>,
    pub dropped: Vec<DroppedRecord>,
    pub tallies: Vec<RuleTally>,
}

/// A compiled, validated rule set ready to classify records
#[derive(Debug)]
pub struct RuleSet {
    rules: Vec<KeywordRule>,
    primary_field: String,
    alternate_field: String,
    required_fields: Vec<String>,
    default_category: String,
    category_order: Vec<String>,
}

impl RuleSet {
    /// Build a rule set, failing fast on category configuration errors
    ///
    /// Every rule category and the default category must appear in
    /// `category_order`; a missing default is a configuration error, never a
    /// silent drop at tagging time.
    pub fn new(
        rules: Vec<KeywordRule>,
        primary_field: &str,
        alternate_field: &str,
        required_fields: Vec<String>,
        default_category: &str,
        category_order: Vec<String>,
    ) -> Result<Self> {
        if default_category.trim().is_empty() {
            return Err(FyqError::UnresolvedCategory(
                "no default category supplied".to_string(),
            ));
        }
        if !category_order.iter().any(|c| c == default_category) {
            return Err(FyqError::UnresolvedCategory(default_category.to_string()));
        }
        for rule in &rules {
            if !category_order.iter().any(|c| c == &rule.category) {
                return Err(FyqError::UnresolvedCategory(rule.category.clone()));
            }
        }

        Ok(RuleSet {
            rules,
            primary_field: primary_field.to_string(),
            alternate_field: alternate_field.to_string(),
            required_fields,
            default_category: default_category.to_string(),
            category_order,
        })
    }

    /// Compile a declarative rule spec into a validated rule set
    pub fn from_spec(spec: &RuleSpec) -> Result<Self> {
        RuleSet::new(
            spec.compile_rules()?,
            &spec.primary_field,
            &spec.alternate_field,
            spec.required_fields.clone(),
            &spec.default_category,
            spec.category_order.clone(),
        )
    }

    /// Position of a category in the fixed ordering
    fn rank_of(&self, category: &str) -> Result<usize> {
        self.category_order
            .iter()
            .position(|c| c == category)
            .ok_or_else(|| FyqError::UnresolvedCategory(category.to_string()))
    }

    fn missing_required(&self, record: &Record) -> Option<String> {
        self.required_fields
            .iter()
            .find(|field| !record.has(field))
            .cloned()
    }

    /// Classify each record into exactly one category
    ///
    /// Records missing a required field are dropped (and documented in the
    /// outcome), not errored on. `filter` is an exclusion set: classification
    /// runs in full, then records whose category is in the filter are removed
    /// from the output. Tallies reflect classification before filtering.
    pub fn tag(
        &self,
        records: Vec<Record>,
        filter: Option<&BTreeSet<String>>,
    ) -> Result<TagOutcome> {
        let mut valid = Vec::with_capacity(records.len());
        let mut dropped = Vec::new();
        for (index, record) in records.into_iter().enumerate() {
            match self.missing_required(&record) {
                Some(missing_field) => dropped.push(DroppedRecord {
                    index,
                    missing_field,
                }),
                None => valid.push(record),
            }
        }

        // One pass per rule, in priority order; assigned slots are final.
        let mut assigned: Vec<Option<String>> = vec![None; valid.len()];
        let mut tallies = Vec::with_capacity(self.rules.len() + 1);
        let mut cumulative = 0;
        for rule in &self.rules {
            let field = match rule.field {
                MatchField::Primary => &self.primary_field,
                MatchField::Alternate => &self.alternate_field,
            };
            let mut matched = 0;
            for (slot, record) in assigned.iter_mut().zip(&valid) {
                if slot.is_some() {
                    continue;
                }
                if rule.matches(record.value(field)) {
                    *slot = Some(rule.category.clone());
                    matched += 1;
                }
            }
            cumulative += matched;
            tallies.push(RuleTally {
                category: rule.category.clone(),
                matched,
                cumulative,
            });
        }

        let defaulted = assigned.iter().filter(|slot| slot.is_none()).count();
        cumulative += defaulted;
        tallies.push(RuleTally {
            category: self.default_category.clone(),
            matched: defaulted,
            cumulative,
        });

        let mut tagged = Vec::with_capacity(valid.len());
        for (record, slot) in valid.into_iter().zip(assigned) {
            let category = slot.unwrap_or_else(|| self.default_category.clone());
            let rank = self.rank_of(&category)?;
            if filter.is_some_and(|f| f.contains(&category)) {
                continue;
            }
            tagged.push(TaggedRecord {
                record,
                category,
                rank,
            });
        }

        Ok(TagOutcome {
            records: tagged,
            dropped,
            tallies,
        })
    }
}
