//! Final analysis report.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::emotion::EmotionSummary;
use crate::platform::Platform;
use crate::scores::{EmotionScore, HookScore, PacingScore, StructureScore};
use crate::transcript::AudioStats;
use crate::video::{MediaInfo, PlatformFit};

/// Rewrite and editing suggestions from the generative text service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActionSuggestions {
    pub hook_rewrite: String,
    pub cta_rewrite: String,
    pub title_suggestions: Vec<String>,
    pub editing_tips: Vec<String>,
    pub description: String,
}

impl ActionSuggestions {
    /// Deterministic fallback used when the generative service fails or
    /// returns an unparseable payload.
    pub fn fallback() -> Self {
        Self {
            hook_rewrite: "Open with your strongest moment or a direct question in the first \
                           two seconds."
                .to_string(),
            cta_rewrite: "End with one clear ask: follow for more, or check the link in bio."
                .to_string(),
            title_suggestions: Vec::new(),
            editing_tips: vec![
                "Cut silences and dead air to tighten pacing".to_string(),
                "Add a cut or zoom in the first three seconds".to_string(),
            ],
            description: String::new(),
        }
    }
}

/// Terminal, immutable output of one pipeline run.
///
/// A run that completed with degraded signals still produces a full
/// report; the `degraded_signals` notes say which modalities fell back to
/// defaults.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisReport {
    /// Probed source video information
    pub media: MediaInfo,
    /// Full transcript text (empty when transcription was unavailable)
    pub transcript: String,
    /// Transcript language code ("" when unknown)
    pub language: String,
    /// Derived speech statistics
    pub audio: AudioStats,
    /// Number of frames that went through emotion classification
    pub frames_analyzed: u32,
    /// Run-level emotion aggregate
    pub emotion_summary: EmotionSummary,
    pub hook: HookScore,
    pub pacing: PacingScore,
    pub emotion: EmotionScore,
    pub structure: StructureScore,
    pub platform_fit: PlatformFit,
    /// Argmax of `platform_fit`, fixed priority tie-break
    pub best_platform: Platform,
    pub suggestions: ActionSuggestions,
    /// One note per modality that degraded to a documented default
    pub degraded_signals: Vec<String>,
}
