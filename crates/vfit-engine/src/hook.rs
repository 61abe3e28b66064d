//! Hook (opening seconds) scorer.
//!
//! Measures whether the first moments of the video give a viewer a
//! reason to keep watching: speech, a face, a cut, a hook phrase, or
//! overall energy. A dead opening with none of the first three takes a
//! flat penalty.

use tracing::debug;
use vfit_models::{AudioStats, AudioTranscript, EmotionFrame, HookScore};

use crate::lexicons::{contains_any, HOOK_PHRASES};

/// Tuning constants for the hook scorer.
///
/// Calibration values, not invariants; the defaults match production.
#[derive(Debug, Clone)]
pub struct HookConfig {
    /// Hard cap on the hook window length in seconds
    pub window_cap_seconds: f64,
    /// Fraction of the video duration considered the opening
    pub window_fraction: f64,
    pub base_score: i32,
    pub speech_bonus: i32,
    pub face_bonus: i32,
    pub cut_bonus: i32,
    pub keyword_bonus: i32,
    pub energy_bonus: i32,
    /// Penalty applied when no speech, face or cut lands in the window
    pub dead_opening_penalty: i32,
    /// Words per minute above which the delivery counts as high energy
    pub high_energy_wpm: f64,
    /// How much of the transcript opening is searched for hook phrases
    pub opening_chars: usize,
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            window_cap_seconds: 3.0,
            window_fraction: 0.1,
            base_score: 50,
            speech_bonus: 10,
            face_bonus: 10,
            cut_bonus: 10,
            keyword_bonus: 15,
            energy_bonus: 5,
            dead_opening_penalty: 20,
            high_energy_wpm: 150.0,
            opening_chars: 100,
        }
    }
}

/// Score the opening window of a video.
pub fn score_hook(
    config: &HookConfig,
    transcript: &AudioTranscript,
    stats: &AudioStats,
    frames: &[EmotionFrame],
    boundaries: &[f64],
    duration_seconds: f64,
) -> HookScore {
    let window = config
        .window_cap_seconds
        .min(config.window_fraction * duration_seconds)
        .max(0.0);

    let has_speech = transcript.segments.iter().any(|s| s.start < window);
    let has_face = frames
        .iter()
        .any(|f| f.timestamp_seconds <= window && f.faces_detected > 0);
    let has_fast_cuts = boundaries.iter().any(|&b| b > 0.0 && b <= window);

    let opening: String = transcript
        .text
        .chars()
        .take(config.opening_chars)
        .collect::<String>()
        .to_lowercase();
    let has_hook_keyword = contains_any(&opening, HOOK_PHRASES);

    let high_energy_start = stats.words_per_minute > config.high_energy_wpm;

    let mut score = config.base_score;
    if has_speech {
        score += config.speech_bonus;
    }
    if has_face {
        score += config.face_bonus;
    }
    if has_fast_cuts {
        score += config.cut_bonus;
    }
    if has_hook_keyword {
        score += config.keyword_bonus;
    }
    if high_energy_start {
        score += config.energy_bonus;
    }
    if !has_speech && !has_face && !has_fast_cuts {
        score -= config.dead_opening_penalty;
    }

    let score = score.clamp(0, 100) as u8;

    let feedback = if score >= 80 {
        "Strong opening that should hold attention".to_string()
    } else if score >= 60 {
        "Decent opening, could be punchier in the first seconds".to_string()
    } else {
        "Weak opening, the first seconds risk losing viewers".to_string()
    };

    debug!(
        score,
        window,
        has_speech,
        has_face,
        has_fast_cuts,
        has_hook_keyword,
        "Scored hook"
    );

    HookScore {
        score,
        window_seconds: window,
        has_speech,
        has_face,
        has_fast_cuts,
        has_hook_keyword,
        high_energy_start,
        feedback,
    }
}
