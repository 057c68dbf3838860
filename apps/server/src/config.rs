//! Server configuration from environment variables.

use thiserror::Error;
use vocab_core::{LanguageProfile, TermExtractor, VoiceSelector};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value}")]
    Invalid { var: &'static str, value: String },

    #[error("could not read voice profiles from {path}: {reason}")]
    Profiles { path: String, reason: String },
}

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// File path or http(s) URL of the vocabulary loaded at startup.
    pub vocab_source: String,
    pub voices: VoiceSelector,
    pub term_extractor: TermExtractor,
    pub speech_command: String,
    /// Fallback copy command, program followed by its arguments.
    pub clipboard_command: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            vocab_source: "vocabulary.csv".to_string(),
            voices: VoiceSelector::default(),
            term_extractor: TermExtractor::default(),
            speech_command: "espeak-ng".to_string(),
            clipboard_command: default_clipboard_command(),
        }
    }
}

impl Config {
    /// Read configuration from the environment.
    ///
    /// Recognized variables:
    /// - HOST, PORT: bind address (default 127.0.0.1:3000)
    /// - VOCAB_SOURCE: vocabulary file or URL (default vocabulary.csv)
    /// - SOURCE_LANGUAGE, TARGET_LANGUAGE: built-in profiles for columns 4 and 5
    ///   (default ko, en)
    /// - VOICE_PROFILES: JSON file with `source` and `target` profiles
    /// - PROMPT_TERM: last-word or full-text
    /// - SPEECH_COMMAND: speech synthesizer executable (default espeak-ng)
    /// - CLIPBOARD_COMMAND: fallback copy command line
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.port = port
                .parse()
                .map_err(|_| ConfigError::Invalid { var: "PORT", value: port })?;
        }
        if let Some(source) = lookup("VOCAB_SOURCE") {
            config.vocab_source = source;
        }

        if let Some(code) = lookup("SOURCE_LANGUAGE") {
            config.voices.source = builtin_profile("SOURCE_LANGUAGE", code)?;
        }
        if let Some(code) = lookup("TARGET_LANGUAGE") {
            config.voices.target = builtin_profile("TARGET_LANGUAGE", code)?;
        }
        if let Some(path) = lookup("VOICE_PROFILES") {
            config.voices = read_profiles(&path)?;
        }

        if let Some(term) = lookup("PROMPT_TERM") {
            config.term_extractor = term
                .parse()
                .map_err(|_| ConfigError::Invalid { var: "PROMPT_TERM", value: term })?;
        }
        if let Some(command) = lookup("SPEECH_COMMAND") {
            config.speech_command = command;
        }
        if let Some(command) = lookup("CLIPBOARD_COMMAND") {
            config.clipboard_command = command.split_whitespace().map(str::to_string).collect();
        }

        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn builtin_profile(var: &'static str, code: String) -> Result<LanguageProfile, ConfigError> {
    LanguageProfile::builtin(&code).ok_or(ConfigError::Invalid { var, value: code })
}

fn read_profiles(path: &str) -> Result<VoiceSelector, ConfigError> {
    let to_err = |reason: String| ConfigError::Profiles {
        path: path.to_string(),
        reason,
    };
    let content = std::fs::read_to_string(path).map_err(|e| to_err(e.to_string()))?;
    serde_json::from_str(&content).map_err(|e| to_err(e.to_string()))
}

fn default_clipboard_command() -> Vec<String> {
    let command: &[&str] = if cfg!(target_os = "macos") {
        &["pbcopy"]
    } else if cfg!(target_os = "windows") {
        &["clip"]
    } else {
        &["xclip", "-selection", "clipboard"]
    };
    command.iter().map(|s| s.to_string()).collect()
}
