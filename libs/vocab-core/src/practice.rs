//! Application root: loaded vocabulary, current filter and the active deck.
//!
//! [`Practice`] is the surface a presentation layer drives. It owns the master
//! record set for as long as it is not replaced by another ingestion, and
//! derives decks from it on demand.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tokio::task::JoinHandle;

use crate::clipboard::Clipboard;
use crate::error::{CopyError, IngestError, SessionError};
use crate::filter;
use crate::parser;
use crate::session::{DeckSession, LanguageNames, SessionState, TermExtractor};
use crate::speech::Pronouncer;
use crate::types::{Direction, FilterOptions, FilterSelection, Language, Prompt, VocabularyRecord};

/// What to say when pronouncing the current answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechRequest {
    pub text: String,
    pub language: Language,
}

/// Read-only view of the session for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub loaded: usize,
    pub deck_size: usize,
    pub state: SessionState,
    pub selection: FilterSelection,
    pub prompt: Option<Prompt>,
}

pub struct Practice {
    records: Option<Vec<Arc<VocabularyRecord>>>,
    selection: FilterSelection,
    session: DeckSession,
    rng: StdRng,
}

impl Default for Practice {
    fn default() -> Self {
        Self::new(TermExtractor::default(), LanguageNames::default())
    }
}

impl Practice {
    pub fn new(extractor: TermExtractor, names: LanguageNames) -> Self {
        Self::with_rng(extractor, names, StdRng::from_entropy())
    }

    /// Build with a fixed RNG, for reproducible shuffles.
    pub fn with_rng(extractor: TermExtractor, names: LanguageNames, rng: StdRng) -> Self {
        Self {
            records: None,
            selection: FilterSelection::default(),
            session: DeckSession::new(extractor, names),
            rng,
        }
    }

    /// Replace the vocabulary with records parsed from `content`.
    ///
    /// On success the filter selection is cleared; the current deck keeps
    /// playing until the next start. On failure nothing changes.
    pub fn ingest(&mut self, content: &str) -> Result<usize, IngestError> {
        let records = parser::ingest(content)?;
        let count = records.len();
        self.records = Some(records.into_iter().map(Arc::new).collect());
        self.selection = FilterSelection::default();
        tracing::info!(count, "vocabulary loaded");
        Ok(count)
    }

    pub fn is_ingested(&self) -> bool {
        self.records.is_some()
    }

    pub fn records(&self) -> &[Arc<VocabularyRecord>] {
        self.records.as_deref().unwrap_or_default()
    }

    pub fn filter_options(&self) -> FilterOptions {
        filter::filter_options(self.records())
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    /// Set the tag constraints used by the next start or reset.
    pub fn set_filter(&mut self, grammar: Option<&str>, category: Option<&str>) {
        self.selection = FilterSelection::new(grammar, category);
    }

    /// Deal a shuffled deck from the current selection.
    pub fn start_session(&mut self) -> Result<usize, SessionError> {
        let records = self.records.as_deref().ok_or(SessionError::NotIngested)?;
        let size = self.session.start(records, &self.selection, &mut self.rng)?;
        tracing::debug!(size, selection = ?self.selection, "session started");
        Ok(size)
    }

    /// Re-filter and deal a fresh permutation.
    pub fn reset_session(&mut self) -> Result<usize, SessionError> {
        let records = self.records.as_deref().ok_or(SessionError::NotIngested)?;
        self.session.reset(records, &self.selection, &mut self.rng)
    }

    pub fn navigate(&mut self, step: isize) {
        self.session.navigate(step);
    }

    pub fn toggle_flip(&mut self) {
        self.session.toggle_flip();
    }

    pub fn toggle_direction(&mut self) {
        self.session.toggle_direction();
    }

    pub fn direction(&self) -> Direction {
        self.session.state().direction
    }

    pub fn session(&self) -> &DeckSession {
        &self.session
    }

    pub fn current_prompt(&self) -> Option<Prompt> {
        self.session.current_prompt()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            loaded: self.records().len(),
            deck_size: self.session.len(),
            state: self.session.state(),
            selection: self.selection.clone(),
            prompt: self.current_prompt(),
        }
    }

    /// Copy the current answer. Does nothing without an active deck.
    pub fn copy_answer(&self, clipboard: &Clipboard) -> Result<(), CopyError> {
        match self.current_prompt() {
            Some(prompt) => clipboard.copy(&prompt.answer),
            None => Ok(()),
        }
    }

    /// Text and language for pronouncing the current answer.
    ///
    /// Source-language answers go through the term extractor, so the spoken
    /// text matches what a source-language question shows.
    pub fn answer_speech(&self) -> Option<SpeechRequest> {
        let record = self.session.current_record()?;
        let language = self.direction().answer_language();
        let text = match language {
            Language::Target => record.target_text.trim(),
            Language::Source => self.session.extractor().extract(&record.source_text),
        };
        if text.is_empty() {
            return None;
        }
        Some(SpeechRequest {
            text: text.to_string(),
            language,
        })
    }

    /// Pronounce the current answer in the background.
    pub fn pronounce_answer(&self, pronouncer: &Pronouncer) -> Option<JoinHandle<()>> {
        let request = self.answer_speech()?;
        pronouncer.pronounce(request.text, request.language)
    }
}
