//! FFmpeg CLI wrappers and face/emotion classification.
//!
//! This crate provides the media-facing stages of the analysis pipeline:
//! - Probing video files with FFprobe
//! - Sampling still frames at a fixed interval
//! - Detecting scene cuts from FFmpeg's diagnostic stream
//! - Demuxing audio for the transcription service
//! - Classifying per-frame face emotions (optional `opencv` feature)
//! - Owning the per-run scratch directory

pub mod audio;
pub mod command;
pub mod error;
pub mod face;
pub mod probe;
pub mod sampler;
pub mod scenes;
pub mod workdir;

pub use audio::extract_audio;
pub use command::{check_ffmpeg, check_ffprobe, FfmpegCommand, FfmpegRunner};
pub use error::{MediaError, MediaResult};
pub use face::{FaceEngine, DISABLED_NOTE};
pub use probe::probe_video;
pub use sampler::sample_frames;
pub use scenes::detect_scenes;
pub use workdir::RunWorkspace;
