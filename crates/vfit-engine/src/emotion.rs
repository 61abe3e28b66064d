//! Emotional-energy scorer.
//!
//! Weighted sum over the run's emotion distribution, favoring
//! high-arousal and positive affect. A run with no emotion data at all
//! (classifier disabled or no frames) gets a neutral default with a
//! note rather than an error.

use tracing::debug;
use vfit_models::{Emotion, EmotionScore, EmotionSummary};

/// Per-emotion weights applied to frame shares.
#[derive(Debug, Clone)]
pub struct EmotionWeights {
    pub happy: f64,
    pub sad: f64,
    pub angry: f64,
    pub surprised: f64,
    pub fearful: f64,
    pub neutral: f64,
    /// Bonus when at least one face was detected anywhere in the run
    pub face_presence_bonus: f64,
}

impl Default for EmotionWeights {
    fn default() -> Self {
        Self {
            happy: 1.2,
            sad: 0.8,
            angry: 1.1,
            surprised: 1.5,
            fearful: 1.1,
            neutral: 0.5,
            face_presence_bonus: 10.0,
        }
    }
}

impl EmotionWeights {
    fn weight(&self, emotion: Emotion) -> f64 {
        match emotion {
            Emotion::Happy => self.happy,
            Emotion::Sad => self.sad,
            Emotion::Angry => self.angry,
            Emotion::Surprised => self.surprised,
            Emotion::Fearful => self.fearful,
            Emotion::Neutral => self.neutral,
        }
    }
}

/// Neutral default when the classifier produced no usable signal.
const NO_DATA_SCORE: u8 = 50;

/// Score emotional energy from the run-level emotion summary.
pub fn score_emotion(weights: &EmotionWeights, summary: &EmotionSummary) -> EmotionScore {
    if summary.note.is_some() || summary.frames_analyzed == 0 {
        return EmotionScore {
            score: NO_DATA_SCORE,
            dominant_emotion: Emotion::Neutral,
            feedback: "No emotion data available, assuming neutral tone".to_string(),
            note: Some(
                summary
                    .note
                    .clone()
                    .unwrap_or_else(|| "no frames analyzed".to_string()),
            ),
        };
    }

    let mut weighted = 0.0;
    for emotion in Emotion::ALL {
        weighted += summary.distribution.get(emotion) * weights.weight(emotion);
    }
    let mut score = weighted * 100.0;
    if summary.any_face() {
        score += weights.face_presence_bonus;
    }
    let score = score.clamp(0.0, 100.0).round() as u8;

    let feedback = if score >= 70 {
        "High emotional energy on screen".to_string()
    } else if score >= 50 {
        "Moderate emotional energy".to_string()
    } else {
        "Flat emotional tone, little on-screen reaction".to_string()
    };

    debug!(
        score,
        dominant = %summary.dominant_emotion,
        faces = summary.total_faces_detected,
        "Scored emotion"
    );

    EmotionScore {
        score,
        dominant_emotion: summary.dominant_emotion,
        feedback,
        note: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vfit_models::EmotionDistribution;

    fn summary_with(distribution: EmotionDistribution, faces: u32) -> EmotionSummary {
        EmotionSummary {
            frames_analyzed: 10,
            total_faces_detected: faces,
            dominant_emotion: distribution.dominant(),
            distribution,
            note: None,
        }
    }

    #[test]
    fn disabled_summary_gets_neutral_default() {
        let summary = EmotionSummary::disabled(5, "disabled: face detection model unavailable");
        let score = score_emotion(&EmotionWeights::default(), &summary);
        assert_eq!(score.score, 50);
        assert_eq!(score.dominant_emotion, Emotion::Neutral);
        assert!(score.note.is_some());
    }

    #[test]
    fn zero_frames_gets_neutral_default() {
        let summary = EmotionSummary {
            frames_analyzed: 0,
            total_faces_detected: 0,
            dominant_emotion: Emotion::Neutral,
            distribution: EmotionDistribution::neutral_only(),
            note: None,
        };
        let score = score_emotion(&EmotionWeights::default(), &summary);
        assert_eq!(score.score, 50);
        assert!(score.note.is_some());
    }

    #[test]
    fn surprised_dominant_scores_highest() {
        let mut dist = EmotionDistribution::zero();
        dist.surprised = 1.0;
        let score = score_emotion(&EmotionWeights::default(), &summary_with(dist, 4));
        // 1.0 * 1.5 * 100 + 10, clamped
        assert_eq!(score.score, 100);
    }

    #[test]
    fn all_neutral_with_faces_scores_sixty() {
        let score = score_emotion(
            &EmotionWeights::default(),
            &summary_with(EmotionDistribution::neutral_only(), 3),
        );
        // 1.0 * 0.5 * 100 + 10
        assert_eq!(score.score, 60);
    }

    #[test]
    fn neutral_without_faces_skips_bonus() {
        let score = score_emotion(
            &EmotionWeights::default(),
            &summary_with(EmotionDistribution::neutral_only(), 0),
        );
        assert_eq!(score.score, 50);
        assert!(score.note.is_none());
    }

    #[test]
    fn happy_dominant_scores_above_neutral() {
        let mut dist = EmotionDistribution::zero();
        dist.happy = 0.7;
        dist.neutral = 0.3;
        let dist = dist.normalized();
        let score = score_emotion(&EmotionWeights::default(), &summary_with(dist, 5));
        // 0.7*1.2 + 0.3*0.5 = 0.99 -> 99 + 10, clamped
        assert_eq!(score.score, 100);
        assert_eq!(score.dominant_emotion, Emotion::Happy);
    }
}
