//! Scorer result types.
//!
//! Each scorer produces a 0-100 score plus the qualitative feedback and
//! signal breakdown the suggestion stage and the report consumer need.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::emotion::Emotion;

/// Hook (opening seconds) score and which signals fired.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HookScore {
    /// Score clamped to [0, 100]
    pub score: u8,
    /// Length of the analyzed hook window in seconds
    pub window_seconds: f64,
    /// A speech segment starts inside the hook window
    pub has_speech: bool,
    /// At least one face was detected inside the hook window
    pub has_face: bool,
    /// At least one scene cut occurs inside the hook window
    pub has_fast_cuts: bool,
    /// The transcript opening contains a hook-lexicon phrase
    pub has_hook_keyword: bool,
    /// Overall speech rate exceeds the high-energy threshold
    pub high_energy_start: bool,
    pub feedback: String,
}

/// Pacing classification of a single shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ShotTag {
    Fast,
    Medium,
    Slow,
}

/// One shot between consecutive scene boundaries.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Shot {
    /// Shot start in seconds
    pub start: f64,
    /// Shot end in seconds
    pub end: f64,
    pub duration_seconds: f64,
    pub tag: ShotTag,
}

/// Pacing score with the metrics it was derived from.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PacingScore {
    /// Score clamped to [0, 100]
    pub score: u8,
    /// Mean shot length in seconds
    pub average_shot_length: f64,
    pub cuts_per_minute: f64,
    /// Shots in chronological order; never empty (a cut-free video is one
    /// long take spanning the whole duration)
    pub shots: Vec<Shot>,
    pub feedback: String,
}

/// Emotional-energy score.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EmotionScore {
    /// Score clamped to [0, 100]
    pub score: u8,
    pub dominant_emotion: Emotion,
    pub feedback: String,
    /// Set when the score is a neutral default (no emotion data)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// A half-open time range in seconds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
pub struct Span {
    pub start: f64,
    pub end: f64,
}

/// Intro/body/outro split of the video timeline.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StructureSections {
    pub intro: Span,
    pub body: Span,
    pub outro: Span,
}

/// Structural-completeness score.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StructureScore {
    /// Score clamped to [0, 100]
    pub score: u8,
    pub sections: StructureSections,
    /// A call-to-action phrase was found in the outro window
    pub has_cta: bool,
    pub feedback: String,
}
