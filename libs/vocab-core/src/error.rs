//! Error types for vocab-core.

use thiserror::Error;

/// Result type alias using IngestError.
pub type Result<T> = std::result::Result<T, IngestError>;

/// Errors that can occur while acquiring and ingesting a vocabulary source.
///
/// Malformed rows are not represented here: they are dropped during ingestion.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("vocabulary source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("no valid vocabulary rows found")]
    Empty,
}

/// Errors returned when a practice session cannot start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("no vocabulary has been loaded")]
    NotIngested,

    #[error("no vocabulary matches the selected filters")]
    NoMatches,
}

/// An unrecognized prompt term mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown prompt term mode: {0} (expected last-word or full-text)")]
pub struct ParseTermExtractorError(pub String);

/// Errors from copying the current answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CopyError {
    #[error("clipboard write failed: {0}")]
    PrimaryFailed(String),

    #[error("clipboard write failed ({primary}), fallback failed too ({fallback})")]
    FallbackFailed { primary: String, fallback: String },
}

/// Errors reported by a speech engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpeechError {
    #[error("speech synthesis unsupported: {0}")]
    Unsupported(String),

    #[error("speech engine error: {0}")]
    Engine(String),
}
