pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vocab_core::{Clipboard, LanguageNames, Practice, Pronouncer};

use crate::config::Config;
use crate::models::SessionMeta;
use crate::services::speech::CommandSpeechEngine;

/// The practice root plus the identity of the deck currently dealt.
pub struct PracticeState {
    pub practice: Practice,
    pub session: Option<SessionMeta>,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub practice: Arc<Mutex<PracticeState>>,
    pub pronouncer: Arc<Pronouncer>,
    pub clipboard: Arc<Clipboard>,
    pub vocab_source: Arc<str>,
}

impl AppState {
    pub fn new(
        practice: Practice,
        pronouncer: Pronouncer,
        clipboard: Clipboard,
        vocab_source: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            practice: Arc::new(Mutex::new(PracticeState {
                practice,
                session: None,
            })),
            pronouncer: Arc::new(pronouncer),
            clipboard: Arc::new(clipboard),
            vocab_source: vocab_source.into(),
        }
    }

    /// Lock the practice state. Never hold the guard across an `.await`.
    pub fn lock(&self) -> MutexGuard<'_, PracticeState> {
        self.practice.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Build the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Vocabulary routes
        .route("/api/vocabulary", post(routes::vocabulary::ingest))
        .route("/api/vocabulary/reload", post(routes::vocabulary::reload))
        .route(
            "/api/filters",
            get(routes::vocabulary::filters).put(routes::vocabulary::update_filters),
        )
        // Session routes
        .route("/api/session/start", post(routes::session::start))
        .route("/api/session/reset", post(routes::session::reset))
        .route("/api/session/navigate", post(routes::session::navigate))
        .route("/api/session/flip", post(routes::session::flip))
        .route("/api/session/direction", post(routes::session::direction))
        // Card routes
        .route("/api/card", get(routes::card::current))
        .route("/api/card/copy", post(routes::card::copy))
        .route("/api/card/pronounce", post(routes::card::pronounce))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    tracing::info!(command = %config.speech_command, "Starting speech engine...");
    let engine = Arc::new(CommandSpeechEngine::new(config.speech_command.clone()));
    engine.spawn_voice_discovery();

    let names = LanguageNames {
        source: config.voices.source.name.clone(),
        target: config.voices.target.name.clone(),
    };
    let practice = Practice::new(config.term_extractor, names);
    let pronouncer = Pronouncer::new(engine, config.voices.clone());
    let clipboard = services::clipboard::system_clipboard(&config.clipboard_command);

    let state = AppState::new(practice, pronouncer, clipboard, config.vocab_source.as_str());

    // Initial load runs in the background; until it lands the practice stays empty.
    let loader = state.clone();
    tokio::spawn(async move {
        match routes::vocabulary::load_configured(&loader).await {
            Ok(count) => tracing::info!(count, source = %loader.vocab_source, "Vocabulary ready"),
            Err(err) => tracing::warn!(error = %err, source = %loader.vocab_source, "Initial vocabulary load failed"),
        }
    });

    let app = router(state);
    let addr = config.bind_addr();

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
