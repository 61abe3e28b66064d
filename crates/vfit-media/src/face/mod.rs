//! Per-frame face emotion classification.
//!
//! The [`FaceEngine`] is an injected handle constructed once per process.
//! Callers branch on its `available()` capability flag; when the
//! underlying model stack is missing the engine classifies every frame as
//! zero faces / neutral and the run carries an explicit disabled note.

pub mod detector;
pub mod expression;

use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, warn};
use vfit_models::{Emotion, EmotionDistribution, EmotionFrame, EmotionSummary, FrameSample};

pub use detector::{FaceDetection, FaceKeypoints, Point};

/// Note attached to the run summary when the classifier cannot run.
pub const DISABLED_NOTE: &str = "disabled: face detection model unavailable";

/// Face emotion classification engine.
///
/// Detection runs one frame at a time with a fixed delay between frames;
/// classifying a whole batch in parallel would saturate the model
/// runtime for no latency win.
#[derive(Debug)]
pub struct FaceEngine {
    model_path: Option<PathBuf>,
}

impl FaceEngine {
    /// Probe model availability and build the engine.
    ///
    /// Availability is resolved once per process; a failed probe keeps
    /// the engine permanently disabled.
    pub fn initialize() -> Self {
        let model_path = if detector::is_face_detection_available() {
            detector::find_model_path()
        } else {
            None
        };
        Self { model_path }
    }

    /// Engine with detection forced off, for callers and tests that need
    /// the degraded path.
    pub fn disabled() -> Self {
        Self { model_path: None }
    }

    /// Whether face detection can run in this process.
    pub fn available(&self) -> bool {
        self.model_path.is_some()
    }

    /// Classify a batch of sampled frames, oldest first.
    ///
    /// Per-frame failures degrade that frame to zero faces / neutral;
    /// they never abort the batch.
    pub async fn classify_frames(
        &self,
        frames: &[FrameSample],
        inter_frame_delay: Duration,
    ) -> Vec<EmotionFrame> {
        let mut out = Vec::with_capacity(frames.len());

        for (i, frame) in frames.iter().enumerate() {
            if i > 0 && !inter_frame_delay.is_zero() {
                tokio::time::sleep(inter_frame_delay).await;
            }
            out.push(self.classify_frame(frame));
        }

        out
    }

    fn classify_frame(&self, frame: &FrameSample) -> EmotionFrame {
        let Some(model_path) = &self.model_path else {
            return EmotionFrame::no_faces(frame.timestamp_seconds);
        };

        let faces = match detector::detect_faces(&frame.image_path, model_path) {
            Ok(faces) => faces,
            Err(e) => {
                warn!(
                    timestamp = frame.timestamp_seconds,
                    error = %e,
                    "Face detection failed for frame, treating as no faces"
                );
                return EmotionFrame::no_faces(frame.timestamp_seconds);
            }
        };

        if faces.is_empty() {
            return EmotionFrame::no_faces(frame.timestamp_seconds);
        }

        let distributions: Vec<EmotionDistribution> = faces
            .iter()
            .map(expression::distribution_for_face)
            .collect();
        let scores = expression::average_distribution(&distributions);

        debug!(
            timestamp = frame.timestamp_seconds,
            faces = faces.len(),
            dominant = %scores.dominant(),
            "Classified frame"
        );

        EmotionFrame {
            timestamp_seconds: frame.timestamp_seconds,
            faces_detected: faces.len() as u32,
            dominant_emotion: scores.dominant(),
            scores,
        }
    }

    /// Aggregate per-frame results into the run-level summary.
    ///
    /// The dominant emotion is the mode of per-frame dominants; ties
    /// break toward the tag seen first in frame order.
    pub fn summarize(&self, frames: &[EmotionFrame]) -> EmotionSummary {
        if !self.available() {
            return EmotionSummary::disabled(frames.len() as u32, DISABLED_NOTE);
        }

        let total_faces: u32 = frames.iter().map(|f| f.faces_detected).sum();

        // Counts keyed in first-seen order so the mode tie-break is stable
        let mut seen: Vec<(Emotion, u32)> = Vec::new();
        for frame in frames {
            match seen.iter_mut().find(|(e, _)| *e == frame.dominant_emotion) {
                Some((_, count)) => *count += 1,
                None => seen.push((frame.dominant_emotion, 1)),
            }
        }

        // max_by_key keeps the last maximum, so scan keeping the first
        let mut dominant = Emotion::Neutral;
        let mut best = 0u32;
        for (emotion, count) in &seen {
            if *count > best {
                dominant = *emotion;
                best = *count;
            }
        }

        let mut histogram = EmotionDistribution::zero();
        for (emotion, count) in &seen {
            *histogram.get_mut(*emotion) += *count as f64;
        }

        EmotionSummary {
            frames_analyzed: frames.len() as u32,
            total_faces_detected: total_faces,
            dominant_emotion: dominant,
            distribution: histogram.normalized(),
            note: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(t: f64, faces: u32, dominant: Emotion) -> EmotionFrame {
        let mut scores = EmotionDistribution::zero();
        *scores.get_mut(dominant) = 1.0;
        EmotionFrame {
            timestamp_seconds: t,
            faces_detected: faces,
            dominant_emotion: dominant,
            scores,
        }
    }

    fn available_engine() -> FaceEngine {
        FaceEngine {
            model_path: Some(PathBuf::from("/tmp/model.onnx")),
        }
    }

    #[tokio::test]
    async fn disabled_engine_classifies_everything_neutral() {
        let engine = FaceEngine::disabled();
        assert!(!engine.available());

        let frames = vec![
            FrameSample {
                timestamp_seconds: 0.0,
                image_path: "/tmp/frame-1.jpg".into(),
            },
            FrameSample {
                timestamp_seconds: 1.0,
                image_path: "/tmp/frame-2.jpg".into(),
            },
        ];

        let out = engine.classify_frames(&frames, Duration::ZERO).await;
        assert_eq!(out.len(), 2);
        for f in &out {
            assert_eq!(f.faces_detected, 0);
            assert_eq!(f.dominant_emotion, Emotion::Neutral);
        }

        let summary = engine.summarize(&out);
        assert_eq!(summary.note.as_deref(), Some(DISABLED_NOTE));
        assert!(!summary.any_face());
    }

    #[test]
    fn summarize_takes_mode_of_dominants() {
        let frames = vec![
            frame(0.0, 1, Emotion::Happy),
            frame(1.0, 1, Emotion::Surprised),
            frame(2.0, 2, Emotion::Happy),
        ];
        let summary = available_engine().summarize(&frames);
        assert_eq!(summary.dominant_emotion, Emotion::Happy);
        assert_eq!(summary.total_faces_detected, 4);
        assert_eq!(summary.frames_analyzed, 3);
        assert!((summary.distribution.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn summarize_tie_breaks_by_first_seen() {
        let frames = vec![
            frame(0.0, 1, Emotion::Surprised),
            frame(1.0, 1, Emotion::Happy),
            frame(2.0, 1, Emotion::Happy),
            frame(3.0, 1, Emotion::Surprised),
        ];
        // Two each; surprised was seen first
        let summary = available_engine().summarize(&frames);
        assert_eq!(summary.dominant_emotion, Emotion::Surprised);
    }

    #[test]
    fn summarize_empty_batch() {
        let summary = available_engine().summarize(&[]);
        assert_eq!(summary.frames_analyzed, 0);
        assert_eq!(summary.dominant_emotion, Emotion::Neutral);
    }
}
