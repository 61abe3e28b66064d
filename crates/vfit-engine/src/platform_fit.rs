//! Platform fit aggregator.
//!
//! Pure fusion of the four scores plus duration into a per-platform fit
//! map. The weighting constants are empirically tuned, so they live in
//! [`PlatformFitConfig`] rather than the match arms.

use tracing::debug;
use vfit_models::{Emotion, PlatformFit};

/// Tuning constants for the platform fit rules.
#[derive(Debug, Clone)]
pub struct PlatformFitConfig {
    pub short_form_base: i32,
    /// Ideal short-form duration range in seconds (tiktok/shorts)
    pub short_form_duration_range: (f64, f64),
    pub short_form_duration_bonus: i32,
    pub pacing_bonus_threshold: u8,
    pub pacing_bonus: i32,
    pub emotion_bonus_threshold: u8,
    pub emotion_bonus: i32,
    pub hook_bonus_threshold: u8,
    pub hook_bonus: i32,
    /// Reels accepts anything up to this many seconds
    pub reels_max_duration: f64,
    pub reels_duration_bonus: i32,
    pub reels_affect_bonus: i32,
    pub long_form_base: i32,
    pub long_form_min_duration: f64,
    pub long_form_duration_bonus: i32,
    /// Exclusive pacing range youtube rewards
    pub long_form_pacing_range: (u8, u8),
    pub long_form_pacing_bonus: i32,
    pub long_form_cta_bonus: i32,
}

impl Default for PlatformFitConfig {
    fn default() -> Self {
        Self {
            short_form_base: 60,
            short_form_duration_range: (15.0, 60.0),
            short_form_duration_bonus: 20,
            pacing_bonus_threshold: 70,
            pacing_bonus: 10,
            emotion_bonus_threshold: 70,
            emotion_bonus: 10,
            hook_bonus_threshold: 80,
            hook_bonus: 10,
            reels_max_duration: 90.0,
            reels_duration_bonus: 15,
            reels_affect_bonus: 10,
            long_form_base: 50,
            long_form_min_duration: 120.0,
            long_form_duration_bonus: 30,
            long_form_pacing_range: (40, 80),
            long_form_pacing_bonus: 10,
            long_form_cta_bonus: 10,
        }
    }
}

/// Scorer outputs the aggregator consumes.
#[derive(Debug, Clone, Copy)]
pub struct FitInputs {
    pub duration_seconds: f64,
    pub hook_score: u8,
    pub pacing_score: u8,
    pub emotion_score: u8,
    pub dominant_emotion: Emotion,
    pub has_cta: bool,
}

/// Compute per-platform fit scores.
pub fn aggregate_fit(config: &PlatformFitConfig, inputs: &FitInputs) -> PlatformFit {
    let short_form = short_form_score(config, inputs);

    let mut reels = config.short_form_base;
    if inputs.duration_seconds <= config.reels_max_duration {
        reels += config.reels_duration_bonus;
    }
    if matches!(inputs.dominant_emotion, Emotion::Happy | Emotion::Surprised) {
        reels += config.reels_affect_bonus;
    }

    let mut youtube = config.long_form_base;
    if inputs.duration_seconds > config.long_form_min_duration {
        youtube += config.long_form_duration_bonus;
    }
    let (pacing_lo, pacing_hi) = config.long_form_pacing_range;
    if inputs.pacing_score > pacing_lo && inputs.pacing_score < pacing_hi {
        youtube += config.long_form_pacing_bonus;
    }
    if inputs.has_cta {
        youtube += config.long_form_cta_bonus;
    }

    let fit = PlatformFit {
        tiktok: clamp(short_form),
        reels: clamp(reels),
        shorts: clamp(short_form),
        youtube: clamp(youtube),
    };

    debug!(
        tiktok = fit.tiktok,
        reels = fit.reels,
        shorts = fit.shorts,
        youtube = fit.youtube,
        best = %fit.best(),
        "Aggregated platform fit"
    );

    fit
}

fn short_form_score(config: &PlatformFitConfig, inputs: &FitInputs) -> i32 {
    let mut score = config.short_form_base;
    let (lo, hi) = config.short_form_duration_range;
    if inputs.duration_seconds >= lo && inputs.duration_seconds <= hi {
        score += config.short_form_duration_bonus;
    }
    if inputs.pacing_score > config.pacing_bonus_threshold {
        score += config.pacing_bonus;
    }
    if inputs.emotion_score > config.emotion_bonus_threshold {
        score += config.emotion_bonus;
    }
    if inputs.hook_score > config.hook_bonus_threshold {
        score += config.hook_bonus;
    }
    score
}

fn clamp(score: i32) -> u8 {
    score.clamp(0, 100) as u8
}
