//! Current card endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// GET /api/card
pub async fn current(State(state): State<AppState>) -> Json<CardView> {
    let guard = state.lock();
    Json(CardView::from_practice(&guard.practice, guard.session.as_ref()))
}

/// POST /api/card/copy
///
/// Clipboard backends may block, so the copy runs on the blocking pool.
pub async fn copy(State(state): State<AppState>) -> Result<Json<CopyResponse>> {
    let copied = tokio::task::spawn_blocking(move || {
        let guard = state.lock();
        if !guard.practice.session().is_active() {
            return Ok(false);
        }
        guard.practice.copy_answer(&state.clipboard).map(|()| true)
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))??;

    Ok(Json(CopyResponse { copied }))
}

/// POST /api/card/pronounce
///
/// Returns as soon as speech is queued; playback outcome is only logged.
pub async fn pronounce(State(state): State<AppState>) -> (StatusCode, Json<PronounceResponse>) {
    let guard = state.lock();
    let queued = guard.practice.pronounce_answer(&state.pronouncer).is_some();
    (StatusCode::ACCEPTED, Json(PronounceResponse { queued }))
}
