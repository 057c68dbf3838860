//! API request and response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use vocab_core::types::{Direction, FilterOptions, FilterSelection};
use vocab_core::Practice;

/// Identity of one dealt deck. A new id means the deck was reshuffled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionMeta {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
}

impl SessionMeta {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
        }
    }
}

impl Default for SessionMeta {
    fn default() -> Self {
        Self::new()
    }
}

// === Vocabulary ===

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabularyResponse {
    pub loaded: usize,
    pub options: FilterOptions,
}

// === Filters ===

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiltersResponse {
    pub options: FilterOptions,
    pub selection: FilterSelection,
}

/// PUT /api/filters body. Missing or blank values mean "any".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFilterRequest {
    #[serde(default)]
    pub grammar: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

// === Session ===

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NavigateRequest {
    pub step: isize,
}

/// The face of the current card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardFace {
    pub id: String,
    pub grammar: String,
    pub category: String,
    pub term: String,
    pub question: String,
    pub answer: String,
    pub source_label: String,
}

/// Everything a client needs to render the practice screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub active: bool,
    pub session_id: Option<Uuid>,
    pub started_at: Option<DateTime<Utc>>,
    pub position: usize,
    pub total: usize,
    pub is_flipped: bool,
    pub direction: Direction,
    pub has_previous: bool,
    pub has_next: bool,
    pub card: Option<CardFace>,
}

impl CardView {
    pub fn from_practice(practice: &Practice, meta: Option<&SessionMeta>) -> Self {
        let session = practice.session();
        let state = session.state();
        let total = session.len();
        let active = session.is_active();

        let card = session
            .current_record()
            .zip(session.current_prompt())
            .map(|(record, prompt)| CardFace {
                id: record.id.clone(),
                grammar: record.grammar.clone(),
                category: record.category.clone(),
                term: prompt.term,
                question: prompt.question,
                answer: prompt.answer,
                source_label: prompt.source_label,
            });

        Self {
            active,
            session_id: meta.map(|m| m.id),
            started_at: meta.map(|m| m.started_at),
            position: if active { state.cursor + 1 } else { 0 },
            total,
            is_flipped: state.is_flipped,
            direction: state.direction,
            has_previous: active && state.cursor > 0,
            has_next: active && state.cursor + 1 < total,
            card,
        }
    }
}

// === Card actions ===

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CopyResponse {
    pub copied: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PronounceResponse {
    pub queued: bool,
}
