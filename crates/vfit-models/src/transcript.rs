//! Transcript types and derived audio statistics.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A single transcribed word with timing.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct WordTiming {
    pub word: String,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
}

/// A transcribed segment (phrase/sentence) with timing.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SegmentTiming {
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
    pub text: String,
}

/// Transcription result for one video's audio track.
///
/// An empty transcript with `error` set is a valid degraded state: the
/// scorers treat it as "no speech signal" rather than failing.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
pub struct AudioTranscript {
    /// Full transcript text (empty when transcription failed)
    pub text: String,
    /// Detected language code, e.g. "en"
    pub language: String,
    /// Audio duration reported by the transcription service, in seconds
    pub duration_seconds: f64,
    /// Word-level timestamps, chronological
    pub words: Vec<WordTiming>,
    /// Segment-level timestamps, chronological
    pub segments: Vec<SegmentTiming>,
    /// Diagnostic note when transcription failed or was skipped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AudioTranscript {
    /// Empty transcript carrying a failure note.
    pub fn empty_with_error(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Default::default()
        }
    }

    /// True when no speech signal is available.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// A silence gap between consecutive speech segments.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SilenceGap {
    /// Gap start in seconds (end of the preceding segment)
    pub start: f64,
    /// Gap end in seconds (start of the following segment)
    pub end: f64,
    pub duration_seconds: f64,
}

/// Statistics derived from a transcript's timing data.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
pub struct AudioStats {
    /// Speech rate over the full audio duration
    pub words_per_minute: f64,
    /// Number of filler-lexicon hits ("um", "uh", ...)
    pub filler_count: u32,
    /// Gaps between segments longer than the silence threshold
    pub silences: Vec<SilenceGap>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_with_error_is_empty() {
        let t = AudioTranscript::empty_with_error("transcription timed out");
        assert!(t.is_empty());
        assert!(t.words.is_empty());
        assert!(t.segments.is_empty());
        assert_eq!(t.error.as_deref(), Some("transcription timed out"));
    }

    #[test]
    fn whitespace_only_counts_as_empty() {
        let t = AudioTranscript {
            text: "   \n".to_string(),
            ..Default::default()
        };
        assert!(t.is_empty());
    }
}
