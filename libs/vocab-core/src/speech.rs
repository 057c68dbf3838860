//! Pronunciation through an injected speech engine.
//!
//! The engine may report no voices at first and fill its list later, so voice
//! lookup polls a bounded number of times before settling for whatever is
//! available. Playback is fire-and-forget: a new request aborts the one in
//! flight, so at most one utterance is speaking.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tokio::task::{AbortHandle, JoinHandle};

use crate::error::SpeechError;
use crate::types::Language;
use crate::voice::{select_voice, LanguageProfile, VoiceDescriptor, VoiceSelector};

/// A text-to-speech backend.
#[async_trait]
pub trait SpeechEngine: Send + Sync {
    /// Voices currently known to the engine. May be empty while loading.
    fn list_voices(&self) -> Vec<VoiceDescriptor>;

    /// Speak an utterance, resolving when it ends or fails.
    async fn speak(&self, utterance: Utterance) -> Result<(), SpeechError>;

    /// Stop anything currently speaking.
    fn cancel_all(&self);
}

/// Prosody applied to every utterance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeechSettings {
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        // Slightly slow for clarity.
        Self {
            rate: 0.85,
            pitch: 1.0,
            volume: 1.0,
        }
    }
}

/// One request to the speech engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub lang_tag: String,
    /// `None` lets the engine pick its default voice for `lang_tag`.
    pub voice: Option<VoiceDescriptor>,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl Utterance {
    pub fn new(
        text: &str,
        lang_tag: &str,
        voice: Option<VoiceDescriptor>,
        settings: SpeechSettings,
    ) -> Self {
        Self {
            text: text.to_string(),
            lang_tag: lang_tag.to_string(),
            voice,
            rate: settings.rate,
            pitch: settings.pitch,
            volume: settings.volume,
        }
    }
}

/// Bound on waiting for the engine's voice list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoicePolling {
    /// Re-checks after the first empty answer.
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for VoicePolling {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            interval: Duration::from_millis(200),
        }
    }
}

/// Poll the engine until it reports voices or the attempt cap is reached.
pub async fn wait_for_voices(engine: &dyn SpeechEngine, polling: VoicePolling) -> Vec<VoiceDescriptor> {
    let mut voices = engine.list_voices();
    let mut attempts = 0;

    while voices.is_empty() && attempts < polling.max_attempts {
        attempts += 1;
        tokio::time::sleep(polling.interval).await;
        voices = engine.list_voices();
    }

    if voices.is_empty() {
        tracing::debug!(attempts, "speech engine reported no voices");
    }
    voices
}

/// Speak `text` with the best voice for `profile`.
///
/// If the engine fails with an explicit voice, tries once more with only the
/// language tag.
pub async fn speak_with_fallback(
    engine: &dyn SpeechEngine,
    profile: &LanguageProfile,
    text: &str,
    settings: SpeechSettings,
    polling: VoicePolling,
) -> Result<(), SpeechError> {
    let voices = wait_for_voices(engine, polling).await;
    let voice = select_voice(&voices, profile).cloned();

    match &voice {
        Some(v) => tracing::debug!(voice = %v.name, lang = %v.lang_tag, "using voice"),
        None => tracing::debug!(lang = %profile.tag, "no specific voice found, using engine default"),
    }

    let utterance = Utterance::new(text, &profile.tag, voice, settings);
    match engine.speak(utterance.clone()).await {
        Ok(()) => Ok(()),
        Err(err) if utterance.voice.is_some() => {
            tracing::warn!(error = %err, "speech failed, retrying without a specific voice");
            engine
                .speak(Utterance {
                    voice: None,
                    ..utterance
                })
                .await
        }
        Err(err) => Err(err),
    }
}

/// Issues pronunciations, keeping at most one in flight.
pub struct Pronouncer {
    engine: Arc<dyn SpeechEngine>,
    selector: Arc<VoiceSelector>,
    settings: SpeechSettings,
    polling: VoicePolling,
    in_flight: Mutex<Option<AbortHandle>>,
}

impl Pronouncer {
    pub fn new(engine: Arc<dyn SpeechEngine>, selector: VoiceSelector) -> Self {
        Self {
            engine,
            selector: Arc::new(selector),
            settings: SpeechSettings::default(),
            polling: VoicePolling::default(),
            in_flight: Mutex::new(None),
        }
    }

    pub fn with_settings(mut self, settings: SpeechSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_polling(mut self, polling: VoicePolling) -> Self {
        self.polling = polling;
        self
    }

    pub fn selector(&self) -> &VoiceSelector {
        &self.selector
    }

    /// Start speaking `text` in `language`, interrupting any earlier request.
    ///
    /// Must be called within a tokio runtime. Returns `None` for blank text.
    /// Failures are logged, never returned.
    pub fn pronounce(&self, text: String, language: Language) -> Option<JoinHandle<()>> {
        if text.trim().is_empty() {
            return None;
        }

        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = in_flight.take() {
            previous.abort();
        }
        self.engine.cancel_all();

        let engine = Arc::clone(&self.engine);
        let selector = Arc::clone(&self.selector);
        let settings = self.settings;
        let polling = self.polling;

        let handle = tokio::spawn(async move {
            let profile = selector.profile(language);
            if let Err(err) =
                speak_with_fallback(engine.as_ref(), profile, &text, settings, polling).await
            {
                tracing::warn!(error = %err, lang = %profile.tag, "pronunciation failed");
            }
        });
        *in_flight = Some(handle.abort_handle());

        Some(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakeEngine {
        voices: Vec<VoiceDescriptor>,
        /// Number of `list_voices` calls answered with an empty list.
        empty_for: usize,
        list_calls: AtomicUsize,
        cancels: AtomicUsize,
        fail_with_voice: bool,
        fail_always: bool,
        hold_first: AtomicBool,
        spoken: Mutex<Vec<Utterance>>,
    }

    impl FakeEngine {
        fn with_voices(voices: Vec<VoiceDescriptor>) -> Self {
            Self {
                voices,
                ..Self::default()
            }
        }

        fn spoken(&self) -> Vec<Utterance> {
            self.spoken.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SpeechEngine for FakeEngine {
        fn list_voices(&self) -> Vec<VoiceDescriptor> {
            let call = self.list_calls.fetch_add(1, Ordering::SeqCst);
            if call < self.empty_for {
                Vec::new()
            } else {
                self.voices.clone()
            }
        }

        async fn speak(&self, utterance: Utterance) -> Result<(), SpeechError> {
            let has_voice = utterance.voice.is_some();
            self.spoken.lock().unwrap().push(utterance);
            if self.hold_first.swap(false, Ordering::SeqCst) {
                std::future::pending::<()>().await;
            }
            if self.fail_always || (self.fail_with_voice && has_voice) {
                return Err(SpeechError::Engine("synthesis-failed".to_string()));
            }
            Ok(())
        }

        fn cancel_all(&self) {
            self.cancels.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn voice(name: &str, lang: &str) -> VoiceDescriptor {
        VoiceDescriptor {
            name: name.to_string(),
            lang_tag: lang.to_string(),
            is_platform_default: false,
        }
    }

    fn korean_voices() -> Vec<VoiceDescriptor> {
        vec![voice("Jinho", "ko-KR"), voice("Yuna", "ko-KR"), voice("Samantha", "en-US")]
    }

    #[tokio::test(start_paused = true)]
    async fn polling_gives_up_after_bound() {
        let engine = FakeEngine {
            empty_for: usize::MAX,
            ..FakeEngine::default()
        };
        let started = tokio::time::Instant::now();
        let voices = wait_for_voices(&engine, VoicePolling::default()).await;

        assert!(voices.is_empty());
        assert_eq!(engine.list_calls.load(Ordering::SeqCst), 6);
        assert_eq!(started.elapsed(), Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn polling_stops_when_voices_appear() {
        let engine = FakeEngine {
            empty_for: 2,
            ..FakeEngine::with_voices(korean_voices())
        };
        let voices = wait_for_voices(&engine, VoicePolling::default()).await;

        assert_eq!(voices.len(), 3);
        assert_eq!(engine.list_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn immediate_voices_do_not_wait() {
        let engine = FakeEngine::with_voices(korean_voices());
        wait_for_voices(&engine, VoicePolling::default()).await;
        assert_eq!(engine.list_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn speaks_with_best_voice_and_settings() {
        let engine = FakeEngine::with_voices(korean_voices());
        speak_with_fallback(
            &engine,
            &LanguageProfile::korean(),
            "사과",
            SpeechSettings::default(),
            VoicePolling::default(),
        )
        .await
        .unwrap();

        let spoken = engine.spoken();
        assert_eq!(spoken.len(), 1);
        assert_eq!(spoken[0].text, "사과");
        assert_eq!(spoken[0].lang_tag, "ko-KR");
        assert_eq!(spoken[0].voice.as_ref().map(|v| v.name.as_str()), Some("Yuna"));
        assert_eq!(spoken[0].rate, 0.85);
    }

    #[tokio::test]
    async fn retries_once_without_voice() {
        let engine = FakeEngine {
            fail_with_voice: true,
            ..FakeEngine::with_voices(korean_voices())
        };
        let result = speak_with_fallback(
            &engine,
            &LanguageProfile::korean(),
            "사과",
            SpeechSettings::default(),
            VoicePolling::default(),
        )
        .await;

        assert_eq!(result, Ok(()));
        let spoken = engine.spoken();
        assert_eq!(spoken.len(), 2);
        assert!(spoken[0].voice.is_some());
        assert_eq!(spoken[1].voice, None);
        assert_eq!(spoken[1].lang_tag, "ko-KR");
    }

    #[tokio::test]
    async fn gives_up_after_retry() {
        let engine = FakeEngine {
            fail_always: true,
            ..FakeEngine::with_voices(korean_voices())
        };
        let result = speak_with_fallback(
            &engine,
            &LanguageProfile::korean(),
            "사과",
            SpeechSettings::default(),
            VoicePolling::default(),
        )
        .await;

        assert!(matches!(result, Err(SpeechError::Engine(_))));
        assert_eq!(engine.spoken().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn no_voices_uses_engine_default_without_retry() {
        let engine = FakeEngine {
            fail_always: true,
            ..FakeEngine::default()
        };
        let result = speak_with_fallback(
            &engine,
            &LanguageProfile::english(),
            "apple",
            SpeechSettings::default(),
            VoicePolling::default(),
        )
        .await;

        assert!(result.is_err());
        let spoken = engine.spoken();
        assert_eq!(spoken.len(), 1);
        assert_eq!(spoken[0].voice, None);
        assert_eq!(spoken[0].lang_tag, "en-US");
    }

    #[tokio::test]
    async fn pronounce_uses_language_profile() {
        let engine = Arc::new(FakeEngine::with_voices(korean_voices()));
        let pronouncer = Pronouncer::new(engine.clone(), VoiceSelector::default());

        let handle = pronouncer.pronounce("apple".to_string(), Language::Target).unwrap();
        handle.await.unwrap();
        let handle = pronouncer.pronounce("사과".to_string(), Language::Source).unwrap();
        handle.await.unwrap();

        let spoken = engine.spoken();
        assert_eq!(spoken[0].voice.as_ref().map(|v| v.name.as_str()), Some("Samantha"));
        assert_eq!(spoken[0].lang_tag, "en-US");
        assert_eq!(spoken[1].voice.as_ref().map(|v| v.name.as_str()), Some("Yuna"));
        assert_eq!(spoken[1].lang_tag, "ko-KR");
        assert_eq!(engine.cancels.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn blank_text_is_not_spoken() {
        let engine = Arc::new(FakeEngine::with_voices(korean_voices()));
        let pronouncer = Pronouncer::new(engine.clone(), VoiceSelector::default());
        assert!(pronouncer.pronounce("  ".to_string(), Language::Target).is_none());
        assert_eq!(engine.cancels.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn newest_request_wins() {
        let engine = Arc::new(FakeEngine {
            hold_first: AtomicBool::new(true),
            ..FakeEngine::with_voices(korean_voices())
        });
        let pronouncer = Pronouncer::new(engine.clone(), VoiceSelector::default());

        let first = pronouncer.pronounce("하나".to_string(), Language::Source).unwrap();
        while engine.spoken().is_empty() {
            tokio::task::yield_now().await;
        }

        let second = pronouncer.pronounce("둘".to_string(), Language::Source).unwrap();
        second.await.unwrap();

        let err = first.await.unwrap_err();
        assert!(err.is_cancelled());
        assert_eq!(engine.cancels.load(Ordering::SeqCst), 2);
        let texts: Vec<_> = engine.spoken().into_iter().map(|u| u.text).collect();
        assert_eq!(texts, vec!["하나", "둘"]);
    }
}
