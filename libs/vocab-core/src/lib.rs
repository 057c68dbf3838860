//! Core vocabulary drill library used by the practice server.
//!
//! Provides:
//! - Tolerant CSV ingestion of bilingual vocabulary
//! - Tag filtering and the shuffled practice-session state machine
//! - Voice scoring for pronunciation and a bounded-wait speech controller
//! - Clipboard copy with fallback
//! - Shared types (VocabularyRecord, FilterSelection, Direction, etc.)

pub mod clipboard;
pub mod error;
pub mod filter;
pub mod parser;
pub mod practice;
pub mod session;
pub mod speech;
pub mod types;
pub mod voice;

pub use clipboard::{Clipboard, ClipboardBackend};
pub use error::{
    CopyError, IngestError, ParseTermExtractorError, Result, SessionError, SpeechError,
};
pub use filter::{filter, filter_options};
pub use parser::{ingest, split_fields};
pub use practice::{Practice, Snapshot, SpeechRequest};
pub use session::{DeckSession, LanguageNames, SessionState, TermExtractor};
pub use speech::{Pronouncer, SpeechEngine, SpeechSettings, Utterance, VoicePolling};
pub use types::{Direction, FilterOptions, FilterSelection, Language, Prompt, VocabularyRecord};
pub use voice::{select_voice, LanguageProfile, VoiceDescriptor, VoiceSelector};
