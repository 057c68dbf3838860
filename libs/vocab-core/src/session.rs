//! Practice-session state machine.
//!
//! A [`DeckSession`] is either empty (no deck) or active (a non-empty,
//! shuffled deck with a cursor). Cursor, flip and direction live in a
//! [`SessionState`] value; each operation computes the next value with a pure
//! transition and replaces the old one.

use std::str::FromStr;
use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{ParseTermExtractorError, SessionError};
use crate::filter;
use crate::types::{Direction, FilterSelection, Prompt, VocabularyRecord};

/// Cursor, flip and direction of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionState {
    pub cursor: usize,
    pub is_flipped: bool,
    pub direction: Direction,
}

impl SessionState {
    pub fn new(direction: Direction) -> Self {
        Self {
            cursor: 0,
            is_flipped: false,
            direction,
        }
    }

    /// Move the cursor by `step`, clamped to `[0, len)`.
    ///
    /// Moving to a different card unflips; a clamped move is a no-op.
    pub fn navigate(self, step: isize, len: usize) -> Self {
        if len == 0 {
            return self;
        }
        let last = len - 1;
        let target = if step.is_negative() {
            self.cursor.saturating_sub(step.unsigned_abs())
        } else {
            self.cursor.saturating_add(step.unsigned_abs()).min(last)
        };

        if target == self.cursor {
            self
        } else {
            Self {
                cursor: target,
                is_flipped: false,
                ..self
            }
        }
    }

    /// Flip the card over. No-op on an empty deck.
    pub fn toggle_flip(self, len: usize) -> Self {
        if len == 0 {
            return self;
        }
        Self {
            is_flipped: !self.is_flipped,
            ..self
        }
    }

    /// Swap prompt and answer languages, showing the question side.
    pub fn toggle_direction(self) -> Self {
        Self {
            direction: self.direction.toggled(),
            is_flipped: false,
            ..self
        }
    }
}

/// How the asked-about term is derived from a record's source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TermExtractor {
    /// Last whitespace-delimited token. Loses context for multi-word phrases.
    #[default]
    LastWord,
    /// The whole source text.
    FullText,
}

impl TermExtractor {
    pub fn extract<'a>(&self, text: &'a str) -> &'a str {
        let text = text.trim();
        match self {
            Self::LastWord => text.split_whitespace().last().unwrap_or(text),
            Self::FullText => text,
        }
    }

}

impl FromStr for TermExtractor {
    type Err = ParseTermExtractorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "last-word" => Ok(Self::LastWord),
            "full-text" => Ok(Self::FullText),
            _ => Err(ParseTermExtractorError(s.to_string())),
        }
    }
}

/// Display names used when phrasing questions.
///
/// Defaults follow the usual file layout: Korean in the source column,
/// English in the target column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageNames {
    pub source: String,
    pub target: String,
}

impl Default for LanguageNames {
    fn default() -> Self {
        Self {
            source: "Korean".to_string(),
            target: "English".to_string(),
        }
    }
}

/// The working deck and its state for one practice session.
#[derive(Debug, Clone, Default)]
pub struct DeckSession {
    deck: Vec<Arc<VocabularyRecord>>,
    state: SessionState,
    extractor: TermExtractor,
    names: LanguageNames,
}

impl DeckSession {
    pub fn new(extractor: TermExtractor, names: LanguageNames) -> Self {
        Self {
            deck: Vec::new(),
            state: SessionState::default(),
            extractor,
            names,
        }
    }

    /// Filter `records` and deal a freshly shuffled deck.
    ///
    /// Returns the deck size. With no matches the session becomes empty.
    /// The direction carries over from the previous deck.
    pub fn start<R>(
        &mut self,
        records: &[Arc<VocabularyRecord>],
        selection: &FilterSelection,
        rng: &mut R,
    ) -> Result<usize, SessionError>
    where
        R: Rng + ?Sized,
    {
        let mut deck = filter::filter(records, selection);
        if deck.is_empty() {
            self.deck.clear();
            self.state = SessionState::new(self.state.direction);
            return Err(SessionError::NoMatches);
        }

        // Fisher-Yates: every ordering is equally likely.
        deck.shuffle(rng);
        self.deck = deck;
        self.state = SessionState::new(self.state.direction);
        Ok(self.deck.len())
    }

    /// Deal again from the master set; never reshuffles the current order.
    pub fn reset<R>(
        &mut self,
        records: &[Arc<VocabularyRecord>],
        selection: &FilterSelection,
        rng: &mut R,
    ) -> Result<usize, SessionError>
    where
        R: Rng + ?Sized,
    {
        self.start(records, selection, rng)
    }

    pub fn navigate(&mut self, step: isize) {
        self.state = self.state.navigate(step, self.deck.len());
    }

    pub fn toggle_flip(&mut self) {
        self.state = self.state.toggle_flip(self.deck.len());
    }

    pub fn toggle_direction(&mut self) {
        self.state = self.state.toggle_direction();
    }

    pub fn is_active(&self) -> bool {
        !self.deck.is_empty()
    }

    pub fn len(&self) -> usize {
        self.deck.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deck.is_empty()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn extractor(&self) -> TermExtractor {
        self.extractor
    }

    pub fn deck(&self) -> &[Arc<VocabularyRecord>] {
        &self.deck
    }

    pub fn current_record(&self) -> Option<&VocabularyRecord> {
        self.deck.get(self.state.cursor).map(Arc::as_ref)
    }

    /// Question and answer for the current card, or `None` when empty.
    pub fn current_prompt(&self) -> Option<Prompt> {
        let record = self.current_record()?;
        let (term, answer, answer_language) = match self.state.direction {
            Direction::SourceToTarget => (
                self.extractor.extract(&record.source_text),
                record.target_text.as_str(),
                &self.names.target,
            ),
            Direction::TargetToSource => (
                record.target_text.as_str(),
                record.source_text.as_str(),
                &self.names.source,
            ),
        };

        Some(Prompt {
            term: term.to_string(),
            question: format!("What is the {} word for '{}'?", answer_language, term),
            answer: answer.to_string(),
            source_label: record.source_label.clone(),
        })
    }
}
