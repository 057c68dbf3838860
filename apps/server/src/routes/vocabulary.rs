//! Vocabulary and filter endpoints

use axum::{extract::State, Json};

use crate::error::Result;
use crate::models::*;
use crate::services::source;
use crate::AppState;

/// Acquire the configured source and ingest it.
///
/// The source is fetched without holding the practice lock.
pub async fn load_configured(state: &AppState) -> std::result::Result<usize, vocab_core::IngestError> {
    let content = source::load(&state.vocab_source).await?;
    state.lock().practice.ingest(&content)
}

/// POST /api/vocabulary
///
/// Body is the raw CSV text.
pub async fn ingest(State(state): State<AppState>, body: String) -> Result<Json<VocabularyResponse>> {
    let mut guard = state.lock();
    let loaded = guard.practice.ingest(&body)?;

    Ok(Json(VocabularyResponse {
        loaded,
        options: guard.practice.filter_options(),
    }))
}

/// POST /api/vocabulary/reload
pub async fn reload(State(state): State<AppState>) -> Result<Json<VocabularyResponse>> {
    let loaded = load_configured(&state).await?;
    tracing::info!(loaded, source = %state.vocab_source, "Vocabulary reloaded");

    let guard = state.lock();
    Ok(Json(VocabularyResponse {
        loaded,
        options: guard.practice.filter_options(),
    }))
}

/// GET /api/filters
pub async fn filters(State(state): State<AppState>) -> Json<FiltersResponse> {
    let guard = state.lock();
    Json(FiltersResponse {
        options: guard.practice.filter_options(),
        selection: guard.practice.selection().clone(),
    })
}

/// PUT /api/filters
///
/// Takes effect on the next start or reset.
pub async fn update_filters(
    State(state): State<AppState>,
    Json(request): Json<UpdateFilterRequest>,
) -> Json<FiltersResponse> {
    let mut guard = state.lock();
    guard
        .practice
        .set_filter(request.grammar.as_deref(), request.category.as_deref());

    Json(FiltersResponse {
        options: guard.practice.filter_options(),
        selection: guard.practice.selection().clone(),
    })
}
