//! Core types for the vocabulary drill.

use serde::{Deserialize, Serialize};

/// One bilingual vocabulary pair read from the tabular source.
///
/// Texts are kept exactly as read apart from surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyRecord {
    pub id: String,
    pub grammar: String,
    pub category: String,
    pub source_text: String,
    pub target_text: String,
    pub source_label: String,
}

/// Tag constraints applied when a session starts. `None` means unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grammar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl FilterSelection {
    /// Build a selection, treating blank values as "no constraint".
    pub fn new(grammar: Option<&str>, category: Option<&str>) -> Self {
        Self {
            grammar: normalize_tag(grammar),
            category: normalize_tag(category),
        }
    }

    /// Selection without any constraint.
    pub fn any() -> Self {
        Self::default()
    }
}

fn normalize_tag(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Distinct tag values available for filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub grammars: Vec<String>,
    pub categories: Vec<String>,
}

/// Which of the two fixed languages is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    SourceToTarget,
    TargetToSource,
}

impl Direction {
    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            Self::SourceToTarget => Self::TargetToSource,
            Self::TargetToSource => Self::SourceToTarget,
        }
    }

    /// Language the answer is written in.
    pub fn answer_language(self) -> Language {
        match self {
            Self::SourceToTarget => Language::Target,
            Self::TargetToSource => Language::Source,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SourceToTarget => "source_to_target",
            Self::TargetToSource => "target_to_source",
        }
    }
}

/// One of the two fixed languages present in the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    Source,
    Target,
}

/// Display strings derived from the current card and direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    /// The text the question asks about.
    pub term: String,
    pub question: String,
    pub answer: String,
    pub source_label: String,
}
