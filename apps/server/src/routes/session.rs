//! Session endpoints

use axum::{extract::State, Json};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::{AppState, PracticeState};

fn view(state: &PracticeState) -> CardView {
    CardView::from_practice(&state.practice, state.session.as_ref())
}

/// POST /api/session/start
pub async fn start(State(state): State<AppState>) -> Result<Json<CardView>> {
    let mut guard = state.lock();
    match guard.practice.start_session() {
        Ok(size) => {
            let meta = SessionMeta::new();
            tracing::info!(session_id = %meta.id, size, "Session started");
            guard.session = Some(meta);
            Ok(Json(view(&guard)))
        }
        Err(err) => {
            guard.session = None;
            Err(err.into())
        }
    }
}

/// POST /api/session/reset
pub async fn reset(State(state): State<AppState>) -> Result<Json<CardView>> {
    let mut guard = state.lock();
    match guard.practice.reset_session() {
        Ok(size) => {
            let meta = SessionMeta::new();
            tracing::info!(session_id = %meta.id, size, "Session reset");
            guard.session = Some(meta);
            Ok(Json(view(&guard)))
        }
        Err(err) => {
            guard.session = None;
            Err(err.into())
        }
    }
}

/// POST /api/session/navigate
pub async fn navigate(
    State(state): State<AppState>,
    Json(request): Json<NavigateRequest>,
) -> Result<Json<CardView>> {
    if request.step != 1 && request.step != -1 {
        return Err(ApiError::BadRequest(format!(
            "step must be -1 or 1, got {}",
            request.step
        )));
    }

    let mut guard = state.lock();
    guard.practice.navigate(request.step);
    Ok(Json(view(&guard)))
}

/// POST /api/session/flip
pub async fn flip(State(state): State<AppState>) -> Json<CardView> {
    let mut guard = state.lock();
    guard.practice.toggle_flip();
    Json(view(&guard))
}

/// POST /api/session/direction
pub async fn direction(State(state): State<AppState>) -> Json<CardView> {
    let mut guard = state.lock();
    guard.practice.toggle_direction();
    Json(view(&guard))
}
