//! Pure scoring engine.
//!
//! Deterministic functions from extracted signals (transcript, scene
//! boundaries, per-frame emotion data) to 0-100 scores and the fused
//! platform fit map. No IO, no async, no hidden state; the empirically
//! tuned constants live in per-scorer config structs.

pub mod audio_features;
pub mod emotion;
pub mod hook;
pub mod lexicons;
pub mod pacing;
pub mod platform_fit;
pub mod structure;

pub use audio_features::derive_stats;
pub use emotion::{score_emotion, EmotionWeights};
pub use hook::{score_hook, HookConfig};
pub use pacing::{score_pacing, PacingConfig, PlatformClass};
pub use platform_fit::{aggregate_fit, FitInputs, PlatformFitConfig};
pub use structure::{score_structure, StructureConfig};

/// All scorer configurations for one run.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub hook: HookConfig,
    pub pacing: PacingConfig,
    pub emotion: EmotionWeights,
    pub structure: StructureConfig,
    pub platform_fit: PlatformFitConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use vfit_models::{
        AudioTranscript, Emotion, EmotionDistribution, EmotionFrame, EmotionSummary, Platform,
        SegmentTiming,
    };

    fn happy_frame(t: f64) -> EmotionFrame {
        let mut scores = EmotionDistribution::zero();
        scores.happy = 1.0;
        EmotionFrame {
            timestamp_seconds: t,
            faces_detected: 1,
            dominant_emotion: Emotion::Happy,
            scores,
        }
    }

    // 30s video, 10 evenly spaced cuts, happy faces throughout,
    // transcript closing with a CTA.
    #[test]
    fn upbeat_short_video_fits_short_form() {
        let config = EngineConfig::default();
        let duration = 30.0;
        let boundaries: Vec<f64> = (1..=10).map(|i| i as f64 * duration / 11.0).collect();
        let frames: Vec<EmotionFrame> = (0..30).map(|i| happy_frame(i as f64)).collect();

        let transcript = AudioTranscript {
            text: "Watch this amazing trick. It only takes a second. \
                   If you enjoyed it, subscribe for more."
                .to_string(),
            language: "en".to_string(),
            duration_seconds: duration,
            segments: vec![
                SegmentTiming {
                    start: 0.5,
                    end: 10.0,
                    text: "Watch this amazing trick.".to_string(),
                },
                SegmentTiming {
                    start: 27.0,
                    end: 30.0,
                    text: "subscribe for more".to_string(),
                },
            ],
            ..Default::default()
        };

        let stats = derive_stats(&transcript, duration);
        let pacing = score_pacing(
            &config.pacing,
            &boundaries,
            duration,
            PlatformClass::for_duration(duration),
        );
        let structure = score_structure(&config.structure, &transcript, duration);

        let mut dist = EmotionDistribution::zero();
        dist.happy = 1.0;
        let summary = EmotionSummary {
            frames_analyzed: frames.len() as u32,
            total_faces_detected: frames.len() as u32,
            dominant_emotion: Emotion::Happy,
            distribution: dist,
            note: None,
        };
        let emotion = score_emotion(&config.emotion, &summary);
        let hook = score_hook(&config.hook, &transcript, &stats, &frames, &boundaries, duration);

        assert!(pacing.score >= 70);
        assert!(structure.score >= 90);

        let fit = aggregate_fit(
            &config.platform_fit,
            &FitInputs {
                duration_seconds: duration,
                hook_score: hook.score,
                pacing_score: pacing.score,
                emotion_score: emotion.score,
                dominant_emotion: emotion.dominant_emotion,
                has_cta: structure.has_cta,
            },
        );
        assert!(fit.tiktok >= 80);
        assert!(fit.shorts >= 80);
        assert!(fit.best().is_short_form());
    }

    // 10 minute video, two cuts, no transcript, no faces.
    #[test]
    fn long_quiet_video_scores_low_but_completes() {
        let config = EngineConfig::default();
        let duration = 600.0;
        let boundaries = [200.0, 400.0];

        let transcript = AudioTranscript::default();
        let stats = derive_stats(&transcript, duration);
        let pacing = score_pacing(
            &config.pacing,
            &boundaries,
            duration,
            PlatformClass::for_duration(duration),
        );
        let structure = score_structure(&config.structure, &transcript, duration);

        let summary = EmotionSummary {
            frames_analyzed: 0,
            total_faces_detected: 0,
            dominant_emotion: Emotion::Neutral,
            distribution: EmotionDistribution::neutral_only(),
            note: None,
        };
        let emotion = score_emotion(&config.emotion, &summary);
        let hook = score_hook(&config.hook, &transcript, &stats, &[], &boundaries, duration);

        assert!(pacing.score <= 30);
        assert_eq!(emotion.score, 50);
        assert!(emotion.note.is_some());
        // Dead opening penalty applies: no speech, face or cut in window
        assert!(hook.score <= 30);
        assert!(!structure.has_cta);

        let fit = aggregate_fit(
            &config.platform_fit,
            &FitInputs {
                duration_seconds: duration,
                hook_score: hook.score,
                pacing_score: pacing.score,
                emotion_score: emotion.score,
                dominant_emotion: emotion.dominant_emotion,
                has_cta: structure.has_cta,
            },
        );
        // Duration bonus keeps youtube ahead of the short-form feeds
        assert_eq!(fit.best(), Platform::Youtube);
        assert!(fit.youtube >= 80);
    }

    #[test]
    fn scorers_are_idempotent() {
        let config = EngineConfig::default();
        let transcript = AudioTranscript {
            text: "wait, you need to see this. follow for part two".to_string(),
            duration_seconds: 40.0,
            ..Default::default()
        };
        let stats = derive_stats(&transcript, 40.0);
        let boundaries = [5.0, 10.0, 20.0];

        let first = score_hook(&config.hook, &transcript, &stats, &[], &boundaries, 40.0);
        let second = score_hook(&config.hook, &transcript, &stats, &[], &boundaries, 40.0);
        assert_eq!(first.score, second.score);
        assert_eq!(first.feedback, second.feedback);
    }
}
