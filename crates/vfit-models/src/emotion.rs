//! Emotion categories and per-frame emotion distributions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Closed set of emotion categories recognized by the classifier.
///
/// Adding a category is a schema change: every distribution and weight
/// table handles the full set exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    #[default]
    Neutral,
    Happy,
    Sad,
    Angry,
    Surprised,
    Fearful,
}

impl Emotion {
    /// All categories in canonical order.
    pub const ALL: [Emotion; 6] = [
        Emotion::Neutral,
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Angry,
        Emotion::Surprised,
        Emotion::Fearful,
    ];

    /// Returns the category as a string for display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Angry => "angry",
            Self::Surprised => "surprised",
            Self::Fearful => "fearful",
        }
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Probability mass over the emotion categories.
///
/// A valid distribution is non-negative and sums to 1; use
/// [`EmotionDistribution::normalized`] to enforce that after accumulating
/// raw evidence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EmotionDistribution {
    pub neutral: f64,
    pub happy: f64,
    pub sad: f64,
    pub angry: f64,
    pub surprised: f64,
    pub fearful: f64,
}

impl Default for EmotionDistribution {
    fn default() -> Self {
        Self::neutral_only()
    }
}

impl EmotionDistribution {
    /// Distribution with all mass on `neutral`.
    pub fn neutral_only() -> Self {
        Self {
            neutral: 1.0,
            happy: 0.0,
            sad: 0.0,
            angry: 0.0,
            surprised: 0.0,
            fearful: 0.0,
        }
    }

    /// Distribution with zero mass everywhere (accumulator seed).
    pub fn zero() -> Self {
        Self {
            neutral: 0.0,
            happy: 0.0,
            sad: 0.0,
            angry: 0.0,
            surprised: 0.0,
            fearful: 0.0,
        }
    }

    /// Mass assigned to one category.
    pub fn get(&self, emotion: Emotion) -> f64 {
        match emotion {
            Emotion::Neutral => self.neutral,
            Emotion::Happy => self.happy,
            Emotion::Sad => self.sad,
            Emotion::Angry => self.angry,
            Emotion::Surprised => self.surprised,
            Emotion::Fearful => self.fearful,
        }
    }

    /// Mutable access to one category's mass.
    pub fn get_mut(&mut self, emotion: Emotion) -> &mut f64 {
        match emotion {
            Emotion::Neutral => &mut self.neutral,
            Emotion::Happy => &mut self.happy,
            Emotion::Sad => &mut self.sad,
            Emotion::Angry => &mut self.angry,
            Emotion::Surprised => &mut self.surprised,
            Emotion::Fearful => &mut self.fearful,
        }
    }

    /// Total mass across all categories.
    pub fn sum(&self) -> f64 {
        Emotion::ALL.iter().map(|e| self.get(*e)).sum()
    }

    /// Renormalize so values are non-negative and sum to 1.
    ///
    /// Negative entries are clamped to zero first. A distribution with no
    /// remaining mass collapses to `neutral_only`.
    pub fn normalized(&self) -> Self {
        let mut out = Self::zero();
        for emotion in Emotion::ALL {
            *out.get_mut(emotion) = self.get(emotion).max(0.0);
        }
        let total = out.sum();
        if total <= f64::EPSILON {
            return Self::neutral_only();
        }
        for emotion in Emotion::ALL {
            *out.get_mut(emotion) /= total;
        }
        out
    }

    /// Category with the highest mass.
    ///
    /// Ties resolve to the category listed first in [`Emotion::ALL`].
    pub fn dominant(&self) -> Emotion {
        let mut best = Emotion::ALL[0];
        let mut best_mass = self.get(best);
        for emotion in &Emotion::ALL[1..] {
            let mass = self.get(*emotion);
            if mass > best_mass {
                best = *emotion;
                best_mass = mass;
            }
        }
        best
    }
}

/// Emotion classification result for a single sampled frame.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EmotionFrame {
    /// Timestamp of the frame in seconds from video start
    pub timestamp_seconds: f64,
    /// Number of faces detected in the frame
    pub faces_detected: u32,
    /// Category with the highest mass in `scores`
    pub dominant_emotion: Emotion,
    /// Normalized emotion distribution for the frame
    pub scores: EmotionDistribution,
}

impl EmotionFrame {
    /// Frame with no detected faces: all mass on `neutral`.
    pub fn no_faces(timestamp_seconds: f64) -> Self {
        Self {
            timestamp_seconds,
            faces_detected: 0,
            dominant_emotion: Emotion::Neutral,
            scores: EmotionDistribution::neutral_only(),
        }
    }
}

/// Run-level aggregate of per-frame emotion classification.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EmotionSummary {
    /// Number of frames that were classified
    pub frames_analyzed: u32,
    /// Total faces detected across all frames
    pub total_faces_detected: u32,
    /// Mode of per-frame dominant emotions, ties broken by first appearance
    pub dominant_emotion: Emotion,
    /// Share of frames per dominant emotion (sums to 1 when frames > 0)
    pub distribution: EmotionDistribution,
    /// Set when the classifier ran in a degraded mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl EmotionSummary {
    /// Summary for a run where the classifier was unavailable.
    pub fn disabled(frames: u32, note: impl Into<String>) -> Self {
        Self {
            frames_analyzed: frames,
            total_faces_detected: 0,
            dominant_emotion: Emotion::Neutral,
            distribution: EmotionDistribution::neutral_only(),
            note: Some(note.into()),
        }
    }

    /// True when at least one face was seen during the run.
    pub fn any_face(&self) -> bool {
        self.total_faces_detected > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_sums_to_one() {
        let mut dist = EmotionDistribution::zero();
        dist.happy = 2.0;
        dist.surprised = 1.0;
        dist.sad = 1.0;

        let norm = dist.normalized();
        assert!((norm.sum() - 1.0).abs() < 1e-9);
        assert!((norm.happy - 0.5).abs() < 1e-9);
    }

    #[test]
    fn normalized_empty_collapses_to_neutral() {
        let norm = EmotionDistribution::zero().normalized();
        assert_eq!(norm, EmotionDistribution::neutral_only());
        assert_eq!(norm.dominant(), Emotion::Neutral);
    }

    #[test]
    fn normalized_clamps_negative_mass() {
        let mut dist = EmotionDistribution::zero();
        dist.happy = 1.0;
        dist.sad = -0.5;

        let norm = dist.normalized();
        assert_eq!(norm.sad, 0.0);
        assert!((norm.happy - 1.0).abs() < 1e-9);
    }

    #[test]
    fn dominant_tie_uses_canonical_order() {
        let mut dist = EmotionDistribution::zero();
        dist.happy = 0.5;
        dist.surprised = 0.5;
        // Happy precedes surprised in Emotion::ALL
        assert_eq!(dist.dominant(), Emotion::Happy);
    }

    #[test]
    fn no_faces_frame_is_neutral() {
        let frame = EmotionFrame::no_faces(2.0);
        assert_eq!(frame.faces_detected, 0);
        assert_eq!(frame.scores, EmotionDistribution::neutral_only());
        assert!((frame.scores.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn emotion_serde_round_trip() {
        let json = serde_json::to_string(&Emotion::Surprised).unwrap();
        assert_eq!(json, "\"surprised\"");
        let back: Emotion = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Emotion::Surprised);
    }
}
