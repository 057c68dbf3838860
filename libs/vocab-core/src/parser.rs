//! Tolerant parser for comma-separated vocabulary files.
//!
//! # Format
//! ```text
//! No,Grammar,Category,Korean,English,Source
//! 1,Noun,Food,사과,apple,Unit 1
//! 2,"Verb, irregular",Action,가다,to go,"Unit 2, p.5"
//! ```
//!
//! The first non-blank line is a header and is ignored. Double quotes toggle a
//! quoted section in which commas are literal. A doubled quote is *not* an
//! escaped quote character: every `"` toggles, so `""` inside a field is an
//! empty quoted section.

use crate::error::{IngestError, Result};
use crate::types::VocabularyRecord;

/// Number of positional columns a row must provide.
pub const FIELD_COUNT: usize = 6;

/// Parse raw tabular text into validated vocabulary records.
///
/// Rows with fewer than [`FIELD_COUNT`] fields, or with an empty source or
/// target text, are skipped. Fails only when no row is accepted.
pub fn ingest(content: &str) -> Result<Vec<VocabularyRecord>> {
    let mut records = Vec::new();
    let mut skipped = 0usize;

    let rows = content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .skip(1);

    for (idx, line) in rows {
        match parse_row(line.trim()) {
            Some(record) => records.push(record),
            None => {
                skipped += 1;
                tracing::debug!(line = idx + 1, "skipping malformed vocabulary row");
            }
        }
    }

    if records.is_empty() {
        return Err(IngestError::Empty);
    }

    tracing::debug!(accepted = records.len(), skipped, "ingested vocabulary");
    Ok(records)
}

/// Split one line into fields, honoring double-quoted sections.
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);

    fields
}

fn parse_row(line: &str) -> Option<VocabularyRecord> {
    let fields = split_fields(line);
    if fields.len() < FIELD_COUNT {
        return None;
    }

    let mut fields = fields.into_iter().map(|f| f.trim().to_string());
    // Length was checked above, so the six positional fields are present.
    let mut next = || fields.next().unwrap_or_default();
    let record = VocabularyRecord {
        id: next(),
        grammar: next(),
        category: next(),
        source_text: next(),
        target_text: next(),
        source_label: next(),
    };

    if record.source_text.is_empty() || record.target_text.is_empty() {
        return None;
    }
    Some(record)
}
