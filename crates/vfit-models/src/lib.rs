//! Shared data models for the virality analysis pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Probe results and sampled frames
//! - Transcripts with word/segment timing and derived audio stats
//! - Per-frame emotion distributions and their run-level aggregate
//! - Scorer results, platform fit and the final analysis report

pub mod emotion;
pub mod platform;
pub mod report;
pub mod scores;
pub mod transcript;
pub mod video;

// Re-export common types
pub use emotion::{Emotion, EmotionDistribution, EmotionFrame, EmotionSummary};
pub use platform::Platform;
pub use report::{ActionSuggestions, AnalysisReport};
pub use scores::{
    EmotionScore, HookScore, PacingScore, Shot, ShotTag, Span, StructureScore, StructureSections,
};
pub use transcript::{AudioStats, AudioTranscript, SegmentTiming, SilenceGap, WordTiming};
pub use video::{FrameSample, MediaInfo, PlatformFit};
