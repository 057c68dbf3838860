//! Speech engine backed by the `espeak-ng` command line.

use std::process::Stdio;
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::sync::Notify;
use vocab_core::{SpeechEngine, SpeechError, Utterance, VoiceDescriptor};

/// Words per minute at rate 1.0.
const BASE_WORDS_PER_MINUTE: f32 = 175.0;

/// The voice espeak-ng uses when none is requested.
const ENGINE_DEFAULT_LANGUAGE: &str = "en";

pub struct CommandSpeechEngine {
    program: String,
    voices: Arc<RwLock<Vec<VoiceDescriptor>>>,
    cancel: Notify,
}

impl CommandSpeechEngine {
    /// Create an engine with an empty voice list.
    ///
    /// Call [`spawn_voice_discovery`](Self::spawn_voice_discovery) to fill it.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            voices: Arc::new(RwLock::new(Vec::new())),
            cancel: Notify::new(),
        }
    }

    /// Load the installed voices in the background.
    pub fn spawn_voice_discovery(&self) -> tokio::task::JoinHandle<()> {
        let program = self.program.clone();
        let voices = Arc::clone(&self.voices);

        tokio::spawn(async move {
            match list_installed_voices(&program).await {
                Ok(found) => {
                    tracing::info!(count = found.len(), "Speech voices loaded");
                    *voices.write().unwrap_or_else(PoisonError::into_inner) = found;
                }
                Err(err) => tracing::warn!(error = %err, "Could not list speech voices"),
            }
        })
    }
}

#[async_trait]
impl SpeechEngine for CommandSpeechEngine {
    fn list_voices(&self) -> Vec<VoiceDescriptor> {
        self.voices
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    async fn speak(&self, utterance: Utterance) -> Result<(), SpeechError> {
        // Registered before the child starts so a cancel during startup is not missed.
        let cancelled = self.cancel.notified();

        let mut child = Command::new(&self.program)
            .args(espeak_args(&utterance))
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| spawn_error(&self.program, e))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(utterance.text.as_bytes())
                .await
                .map_err(|e| SpeechError::Engine(e.to_string()))?;
        }

        tokio::select! {
            output = child.wait_with_output() => {
                let output = output.map_err(|e| SpeechError::Engine(e.to_string()))?;
                if output.status.success() {
                    Ok(())
                } else {
                    Err(SpeechError::Engine(format!(
                        "{} exited with {}: {}",
                        self.program,
                        output.status,
                        String::from_utf8_lossy(&output.stderr).trim()
                    )))
                }
            }
            // Dropping the output future kills the child.
            _ = cancelled => {
                tracing::debug!("speech cancelled");
                Ok(())
            }
        }
    }

    fn cancel_all(&self) {
        self.cancel.notify_waiters();
    }
}

fn spawn_error(program: &str, err: std::io::Error) -> SpeechError {
    if err.kind() == std::io::ErrorKind::NotFound {
        SpeechError::Unsupported(format!("{} not found", program))
    } else {
        SpeechError::Engine(err.to_string())
    }
}

/// Command-line arguments for one utterance. The text itself goes to stdin.
fn espeak_args(utterance: &Utterance) -> Vec<String> {
    let voice = match &utterance.voice {
        Some(voice) => voice.name.clone(),
        None => primary_language(&utterance.lang_tag),
    };
    let speed = (BASE_WORDS_PER_MINUTE * utterance.rate).round().max(1.0) as u32;
    let pitch = (50.0 * utterance.pitch).round().clamp(0.0, 99.0) as u32;
    let amplitude = (100.0 * utterance.volume).round().clamp(0.0, 200.0) as u32;

    vec![
        "-v".to_string(),
        voice,
        "-s".to_string(),
        speed.to_string(),
        "-p".to_string(),
        pitch.to_string(),
        "-a".to_string(),
        amplitude.to_string(),
        "--stdin".to_string(),
    ]
}

fn primary_language(tag: &str) -> String {
    tag.split(['-', '_'])
        .next()
        .unwrap_or(tag)
        .to_ascii_lowercase()
}

async fn list_installed_voices(program: &str) -> Result<Vec<VoiceDescriptor>, SpeechError> {
    let output = Command::new(program)
        .arg("--voices")
        .output()
        .await
        .map_err(|e| spawn_error(program, e))?;

    if !output.status.success() {
        return Err(SpeechError::Engine(format!(
            "{} --voices exited with {}",
            program, output.status
        )));
    }

    Ok(parse_voice_list(&String::from_utf8_lossy(&output.stdout)))
}

/// Parse the table printed by `espeak-ng --voices`.
///
/// Columns: priority, language, age/gender, voice name, file, other languages.
fn parse_voice_list(output: &str) -> Vec<VoiceDescriptor> {
    output
        .lines()
        .skip(1)
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 4 {
                return None;
            }
            Some(VoiceDescriptor {
                name: fields[3].to_string(),
                lang_tag: fields[1].to_string(),
                is_platform_default: fields[1] == ENGINE_DEFAULT_LANGUAGE,
            })
        })
        .collect()
}
