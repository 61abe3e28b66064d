//! Pacing scorer.
//!
//! Turns the scene boundary list into shot lengths and scores the edit
//! rhythm. A video with no detected cuts is treated as one long take
//! spanning the whole duration.

use tracing::debug;
use vfit_models::{PacingScore, Shot, ShotTag};

/// Whether the scoring target is a short-form feed or long-form viewing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformClass {
    ShortForm,
    LongForm,
}

impl PlatformClass {
    /// Classify by duration: anything over 90 seconds is scored against
    /// long-form expectations.
    pub fn for_duration(duration_seconds: f64) -> Self {
        if duration_seconds > 90.0 {
            Self::LongForm
        } else {
            Self::ShortForm
        }
    }
}

/// Tuning constants for the pacing scorer.
#[derive(Debug, Clone)]
pub struct PacingConfig {
    /// (upper bound on average shot length, score) pairs, ascending
    pub buckets: Vec<(f64, i32)>,
    /// Score when the average exceeds every bucket bound
    pub floor_score: i32,
    pub short_form_slow_penalty: i32,
    pub short_form_slow_threshold: f64,
    pub short_form_fast_bonus: i32,
    pub short_form_fast_threshold: f64,
    pub long_form_slow_penalty: i32,
    pub long_form_slow_threshold: f64,
    /// Shots shorter than this are tagged fast
    pub fast_shot_seconds: f64,
    /// Shots longer than this are tagged slow
    pub slow_shot_seconds: f64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            buckets: vec![(2.0, 90), (4.0, 70), (8.0, 50), (15.0, 30)],
            floor_score: 10,
            short_form_slow_penalty: 20,
            short_form_slow_threshold: 5.0,
            short_form_fast_bonus: 5,
            short_form_fast_threshold: 1.5,
            long_form_slow_penalty: 10,
            long_form_slow_threshold: 10.0,
            fast_shot_seconds: 3.0,
            slow_shot_seconds: 10.0,
        }
    }
}

/// Score edit pacing from scene boundaries.
pub fn score_pacing(
    config: &PacingConfig,
    boundaries: &[f64],
    duration_seconds: f64,
    class: PlatformClass,
) -> PacingScore {
    let duration = duration_seconds.max(0.0);
    let shots = build_shots(config, boundaries, duration);

    let average_shot_length = if shots.is_empty() {
        duration
    } else {
        shots.iter().map(|s| s.duration_seconds).sum::<f64>() / shots.len() as f64
    };

    let cuts_per_minute = if duration > 0.0 {
        boundaries.len() as f64 / (duration / 60.0)
    } else {
        0.0
    };

    let mut score = config.floor_score;
    for &(bound, bucket_score) in &config.buckets {
        if average_shot_length < bound {
            score = bucket_score;
            break;
        }
    }

    match class {
        PlatformClass::ShortForm => {
            if average_shot_length > config.short_form_slow_threshold {
                score -= config.short_form_slow_penalty;
            }
            if average_shot_length < config.short_form_fast_threshold {
                score += config.short_form_fast_bonus;
            }
        }
        PlatformClass::LongForm => {
            if average_shot_length > config.long_form_slow_threshold {
                score -= config.long_form_slow_penalty;
            }
        }
    }

    let score = score.clamp(0, 100) as u8;

    let feedback = if average_shot_length < 2.0 {
        "Very fast cuts, well suited to short-form feeds".to_string()
    } else if average_shot_length < 4.0 {
        "Good rhythm with regular cuts".to_string()
    } else if average_shot_length < 8.0 {
        "Moderate pacing, consider tightening some shots".to_string()
    } else if average_shot_length < 15.0 {
        "Slow pacing for social feeds".to_string()
    } else {
        "Very slow pacing, long takes dominate".to_string()
    };

    debug!(
        score,
        average_shot_length,
        cuts_per_minute,
        shots = shots.len(),
        "Scored pacing"
    );

    PacingScore {
        score,
        average_shot_length,
        cuts_per_minute,
        shots,
        feedback,
    }
}

/// Build the chronological shot list from `[0, ...boundaries, duration]`.
///
/// Boundaries outside `(0, duration)` and duplicates collapse away so a
/// boundary at exactly 0 or duration never yields an empty shot.
fn build_shots(config: &PacingConfig, boundaries: &[f64], duration: f64) -> Vec<Shot> {
    let mut points: Vec<f64> = Vec::with_capacity(boundaries.len() + 2);
    points.push(0.0);
    points.extend(
        boundaries
            .iter()
            .copied()
            .filter(|b| b.is_finite() && *b > 0.0 && *b < duration),
    );
    points.push(duration);
    points.sort_by(|a, b| a.total_cmp(b));
    points.dedup();

    let mut shots = Vec::with_capacity(points.len().saturating_sub(1));
    for pair in points.windows(2) {
        let length = pair[1] - pair[0];
        if length <= 0.0 {
            continue;
        }
        let tag = if length < config.fast_shot_seconds {
            ShotTag::Fast
        } else if length > config.slow_shot_seconds {
            ShotTag::Slow
        } else {
            ShotTag::Medium
        };
        shots.push(Shot {
            start: pair[0],
            end: pair[1],
            duration_seconds: length,
            tag,
        });
    }
    shots
}
