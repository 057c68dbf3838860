//! Voice selection for pronunciation.
//!
//! Candidates are narrowed to the requested language, scored with an additive
//! heuristic over their names and metadata, and the highest score wins. Ties
//! go to the voice listed first, so the result is deterministic for a given
//! voice list.

pub mod profile;

use serde::{Deserialize, Serialize};

use crate::types::Language;
pub use profile::LanguageProfile;

pub const QUALITY_BONUS: i32 = 100;
pub const CLEAR_VOICE_BONUS: i32 = 50;
pub const PREFERRED_VOICE_BONUS: i32 = 30;
pub const DISFAVORED_VOICE_PENALTY: i32 = -20;
pub const REGION_MATCH_BONUS: i32 = 20;
pub const PLATFORM_DEFAULT_BONUS: i32 = 10;

/// A synthesis voice as reported by the speech engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceDescriptor {
    pub name: String,
    pub lang_tag: String,
    #[serde(default)]
    pub is_platform_default: bool,
}

/// Whether a voice belongs to the profile's language family.
pub fn is_candidate(voice: &VoiceDescriptor, profile: &LanguageProfile) -> bool {
    let wanted = profile.primary_subtag();
    if !wanted.is_empty() && profile::primary_subtag(&voice.lang_tag) == wanted {
        return true;
    }
    mentions_any(&voice.name.to_lowercase(), &profile.keywords)
}

fn mentions_any(lowercase_name: &str, needles: &[String]) -> bool {
    needles
        .iter()
        .any(|n| lowercase_name.contains(n.to_lowercase().as_str()))
}

/// Heuristic score of a voice for a language profile.
pub fn score(voice: &VoiceDescriptor, profile: &LanguageProfile) -> i32 {
    let name = voice.name.to_lowercase();

    let mut score = 0;
    if mentions_any(&name, &profile.quality_markers) {
        score += QUALITY_BONUS;
    }
    if mentions_any(&name, &profile.clear_voices) {
        score += CLEAR_VOICE_BONUS;
    }
    if mentions_any(&name, &profile.preferred_voices) {
        score += PREFERRED_VOICE_BONUS;
    }
    if mentions_any(&name, &profile.disfavored_voices) {
        score += DISFAVORED_VOICE_PENALTY;
    }
    if profile::normalize_tag(&voice.lang_tag) == profile::normalize_tag(&profile.tag) {
        score += REGION_MATCH_BONUS;
    }
    if voice.is_platform_default {
        score += PLATFORM_DEFAULT_BONUS;
    }
    score
}

/// Best voice for the profile, or `None` when no voice fits the language.
pub fn select_voice<'a>(
    voices: &'a [VoiceDescriptor],
    profile: &LanguageProfile,
) -> Option<&'a VoiceDescriptor> {
    let mut best: Option<(&VoiceDescriptor, i32)> = None;

    for voice in voices.iter().filter(|v| is_candidate(v, profile)) {
        let s = score(voice, profile);
        // Strictly greater, so the first of equal scores is kept.
        if best.map_or(true, |(_, top)| s > top) {
            best = Some((voice, s));
        }
    }

    best.map(|(voice, _)| voice)
}

/// Language profiles for the two fixed languages.
///
/// The default pairs a Korean source column with an English target column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceSelector {
    pub source: LanguageProfile,
    pub target: LanguageProfile,
}

impl Default for VoiceSelector {
    fn default() -> Self {
        Self {
            source: LanguageProfile::korean(),
            target: LanguageProfile::english(),
        }
    }
}

impl VoiceSelector {
    pub fn new(source: LanguageProfile, target: LanguageProfile) -> Self {
        Self { source, target }
    }

    pub fn profile(&self, language: Language) -> &LanguageProfile {
        match language {
            Language::Source => &self.source,
            Language::Target => &self.target,
        }
    }

    pub fn select<'a>(
        &self,
        voices: &'a [VoiceDescriptor],
        language: Language,
    ) -> Option<&'a VoiceDescriptor> {
        select_voice(voices, self.profile(language))
    }
}
