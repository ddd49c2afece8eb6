//! Priority-ordered keyword classification of tabular records

pub mod engine;
pub mod rule;

pub use engine::{DroppedRecord, Record, RuleSet, RuleTally, TagOutcome, TaggedRecord};
pub use rule::{KeywordRule, MatchField, MatchKind, RuleSpec};
