//! Common test utilities for integration tests.
//!
//! Provides a TestContext that wires the router to in-memory collaborators:
//! - a speech engine that records utterances instead of playing them
//! - a clipboard that records copied text
//! - a temporary vocabulary file as the configured source

pub mod fixtures;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;
use rand::rngs::StdRng;
use rand::SeedableRng;
use uuid::Uuid;

use vocab_core::{
    Clipboard, ClipboardBackend, LanguageNames, Practice, Pronouncer, SpeechEngine, SpeechError,
    TermExtractor, Utterance, VoiceDescriptor, VoiceSelector,
};
use vocab_drill_server::{router, AppState};

/// Speech engine double that records what it was asked to say.
#[derive(Default)]
pub struct RecordingEngine {
    pub voices: Vec<VoiceDescriptor>,
    pub spoken: Mutex<Vec<Utterance>>,
}

#[async_trait]
impl SpeechEngine for RecordingEngine {
    fn list_voices(&self) -> Vec<VoiceDescriptor> {
        self.voices.clone()
    }

    async fn speak(&self, utterance: Utterance) -> Result<(), SpeechError> {
        self.spoken.lock().unwrap().push(utterance);
        Ok(())
    }

    fn cancel_all(&self) {}
}

/// Clipboard double that can be told to fail.
#[derive(Clone, Default)]
pub struct RecordingClipboard {
    pub fail: bool,
    pub written: Arc<Mutex<Vec<String>>>,
}

impl ClipboardBackend for RecordingClipboard {
    fn name(&self) -> &str {
        "recording"
    }

    fn write_text(&self, text: &str) -> Result<(), String> {
        if self.fail {
            return Err("no clipboard".to_string());
        }
        self.written.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// Test context holding the router and handles on its collaborators.
pub struct TestContext {
    pub engine: Arc<RecordingEngine>,
    pub clipboard: RecordingClipboard,
    pub source_path: PathBuf,
    app: Router,
}

impl TestContext {
    /// Context whose configured source holds the standard fixture CSV.
    pub fn new() -> Self {
        Self::with_options(fixtures::sample_csv(), fixtures::installed_voices(), false)
    }

    /// Context whose clipboard always fails.
    pub fn with_failing_clipboard() -> Self {
        Self::with_options(fixtures::sample_csv(), fixtures::installed_voices(), true)
    }

    pub fn with_options(source: String, voices: Vec<VoiceDescriptor>, clipboard_fails: bool) -> Self {
        let source_path = std::env::temp_dir().join(format!("vocab-{}.csv", Uuid::new_v4()));
        std::fs::write(&source_path, source).expect("Failed to write vocabulary fixture");

        let engine = Arc::new(RecordingEngine {
            voices,
            spoken: Mutex::new(Vec::new()),
        });
        let clipboard = RecordingClipboard {
            fail: clipboard_fails,
            ..RecordingClipboard::default()
        };

        let practice = Practice::with_rng(
            TermExtractor::LastWord,
            LanguageNames::default(),
            StdRng::seed_from_u64(7),
        );
        let pronouncer = Pronouncer::new(engine.clone(), VoiceSelector::default());
        let state = AppState::new(
            practice,
            pronouncer,
            Clipboard::new(Box::new(clipboard.clone())),
            source_path.to_string_lossy().to_string(),
        );

        Self {
            engine,
            clipboard,
            source_path,
            app: router(state),
        }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).expect("Failed to start test server")
    }

    /// Server with the fixture CSV already ingested.
    pub async fn loaded_server(&self) -> TestServer {
        let server = self.server();
        server
            .post("/api/vocabulary")
            .text(fixtures::sample_csv())
            .await
            .assert_status_ok();
        server
    }

    pub fn spoken(&self) -> Vec<Utterance> {
        self.engine.spoken.lock().unwrap().clone()
    }

    pub fn copied(&self) -> Vec<String> {
        self.clipboard.written.lock().unwrap().clone()
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.source_path);
    }
}
