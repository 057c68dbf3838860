//! Tag filtering over the loaded vocabulary.

use std::borrow::Borrow;
use std::collections::BTreeSet;

use crate::types::{FilterOptions, FilterSelection, VocabularyRecord};

/// Whether a record satisfies both tag constraints of a selection.
pub fn matches(record: &VocabularyRecord, selection: &FilterSelection) -> bool {
    let grammar_match = selection
        .grammar
        .as_deref()
        .map_or(true, |g| g == record.grammar);
    let category_match = selection
        .category
        .as_deref()
        .map_or(true, |c| c == record.category);
    grammar_match && category_match
}

/// Records matching the selection, in input order.
///
/// An empty result is not an error; callers decide what it means.
pub fn filter<R>(records: &[R], selection: &FilterSelection) -> Vec<R>
where
    R: Borrow<VocabularyRecord> + Clone,
{
    records
        .iter()
        .filter(|r| matches(<R as Borrow<VocabularyRecord>>::borrow(r), selection))
        .cloned()
        .collect()
}

/// Distinct non-empty grammar and category values, sorted.
pub fn filter_options<R>(records: &[R]) -> FilterOptions
where
    R: Borrow<VocabularyRecord>,
{
    let mut grammars = BTreeSet::new();
    let mut categories = BTreeSet::new();

    for record in records.iter().map(<R as Borrow<VocabularyRecord>>::borrow) {
        if !record.grammar.is_empty() {
            grammars.insert(record.grammar.clone());
        }
        if !record.category.is_empty() {
            categories.insert(record.category.clone());
        }
    }

    FilterOptions {
        grammars: grammars.into_iter().collect(),
        categories: categories.into_iter().collect(),
    }
}
