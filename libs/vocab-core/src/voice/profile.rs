//! Per-language voice preferences.

use serde::{Deserialize, Serialize};

/// Curated data the voice heuristic scores against.
///
/// All name lists are matched as case-insensitive substrings of a voice name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageProfile {
    /// Display name, e.g. "Korean".
    pub name: String,
    /// Expected regional tag, e.g. "ko-KR".
    pub tag: String,
    /// Words in a voice name that identify the language when its tag is
    /// missing or wrong.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Markers of an enhanced quality tier.
    #[serde(default = "default_quality_markers")]
    pub quality_markers: Vec<String>,
    /// Voices known to be clear for learners.
    #[serde(default)]
    pub clear_voices: Vec<String>,
    /// Voices specifically preferred for this language.
    #[serde(default)]
    pub preferred_voices: Vec<String>,
    /// Voices that sound markedly different from the preferred profile.
    #[serde(default)]
    pub disfavored_voices: Vec<String>,
}

fn default_quality_markers() -> Vec<String> {
    strings(&["enhanced", "premium", "neural"])
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl LanguageProfile {
    pub fn english() -> Self {
        Self {
            name: "English".to_string(),
            tag: "en-US".to_string(),
            keywords: strings(&["english"]),
            quality_markers: default_quality_markers(),
            clear_voices: strings(&["female", "samantha", "susan", "karen", "victoria"]),
            preferred_voices: strings(&["samantha", "susan"]),
            disfavored_voices: strings(&["alex", "daniel"]),
        }
    }

    pub fn korean() -> Self {
        Self {
            name: "Korean".to_string(),
            tag: "ko-KR".to_string(),
            keywords: strings(&["korean", "한국"]),
            quality_markers: default_quality_markers(),
            clear_voices: strings(&["female", "yuna", "sora", "nara"]),
            preferred_voices: strings(&["yuna", "sora", "nara"]),
            disfavored_voices: strings(&["younghoon", "jinho"]),
        }
    }

    /// Look up a built-in profile by language code or name.
    pub fn builtin(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "en" | "en-us" | "english" => Some(Self::english()),
            "ko" | "ko-kr" | "korean" => Some(Self::korean()),
            _ => None,
        }
    }

    /// Primary language subtag, lowercased ("ko" for "ko-KR").
    pub fn primary_subtag(&self) -> String {
        primary_subtag(&self.tag)
    }
}

/// Lowercased primary subtag of a BCP-47-ish tag; `_` counts as a separator.
pub(crate) fn primary_subtag(tag: &str) -> String {
    tag.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Lowercased tag with `_` normalized to `-`.
pub(crate) fn normalize_tag(tag: &str) -> String {
    tag.trim().replace('_', "-").to_lowercase()
}
