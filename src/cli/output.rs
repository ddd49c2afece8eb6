//! Output formatting utilities

use crate::application::QuarterSummary;
use crate::domain::colors::BrandColor;
use crate::domain::fiscal::QuarterRange;
use crate::domain::tagging::{DroppedRecord, RuleTally};
use std::collections::BTreeMap;

/// Format a quarter summary for display
pub fn format_summary(summary: &QuarterSummary) -> String {
    format!(
        "{} ({})\nstart:    {}\nend:      {}\nprevious: {}\n",
        summary.label_current,
        summary.label_legacy,
        summary.start.format("%Y-%m-%d"),
        summary.end.format("%Y-%m-%d"),
        summary.previous
    )
}

/// Format a quarter history as an aligned table, oldest first
pub fn format_history(ranges: &[QuarterRange]) -> String {
    if ranges.is_empty() {
        return "No quarters requested".to_string();
    }

    let mut output = String::new();
    for range in ranges {
        output.push_str(&format!(
            "{}  {}  {}  {}\n",
            range.label_current,
            range.label_legacy,
            range.start.format("%Y-%m-%d"),
            range.end.format("%Y-%m-%d")
        ));
    }
    output
}

/// Format per-rule tallies; the last line is the catch-all category
pub fn format_tallies(tallies: &[RuleTally]) -> String {
    let width = tallies
        .iter()
        .map(|t| t.category.len())
        .max()
        .unwrap_or(0);

    let mut output = String::new();
    for tally in tallies {
        output.push_str(&format!(
            "{:<width$}  {:>6}  (cumulative {})\n",
            tally.category,
            tally.matched,
            tally.cumulative,
            width = width
        ));
    }
    output
}

/// Format the records dropped for missing required fields
pub fn format_dropped(dropped: &[DroppedRecord]) -> String {
    let mut output = String::new();
    for record in dropped {
        output.push_str(&format!(
            "dropped row {}: missing {}\n",
            record.index + 1,
            record.missing_field
        ));
    }
    output
}

/// Format color swatches with 24-bit ANSI backgrounds
pub fn format_swatches(colors: &[BrandColor]) -> String {
    if colors.is_empty() {
        return "No matching colors".to_string();
    }

    let mut output = String::new();
    for color in colors {
        match hex_to_rgb(color.hex) {
            Some((r, g, b)) => output.push_str(&format!(
                "\x1b[48;2;{};{};{}m    \x1b[0m {:<12} {}\n",
                r, g, b, color.name, color.hex
            )),
            None => output.push_str(&format!("     {:<12} {}\n", color.name, color.hex)),
        }
    }
    output
}

/// Format exact lookups, printing NA for unknown names
pub fn format_exact(result: &BTreeMap<String, Option<&'static str>>) -> String {
    let mut output = String::new();
    for (name, hex) in result {
        output.push_str(&format!("{:<12} {}\n", name, hex.unwrap_or("NA")));
    }
    output
}

fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some((r, g, b))
}
