//! Pipeline configuration.

use std::time::Duration;

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Seconds between sampled frames
    pub frame_interval_seconds: f64,
    /// Scene change sensitivity (0-1, lower is more sensitive)
    pub scene_threshold: f64,
    /// Timeout for each FFmpeg/FFprobe invocation
    pub ffmpeg_timeout_secs: u64,
    /// Delay between per-frame emotion classifications
    pub classify_delay: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            frame_interval_seconds: 1.0,
            scene_threshold: 0.3,
            ffmpeg_timeout_secs: 300,
            classify_delay: Duration::from_millis(50),
        }
    }
}

impl PipelineConfig {
    /// Create config from environment variables.
    ///
    /// Loads a `.env` file first when one is present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self {
            frame_interval_seconds: std::env::var("VFIT_FRAME_INTERVAL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1.0),
            scene_threshold: std::env::var("VFIT_SCENE_THRESHOLD")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(0.3),
            ffmpeg_timeout_secs: std::env::var("VFIT_FFMPEG_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(300),
            classify_delay: Duration::from_millis(
                std::env::var("VFIT_CLASSIFY_DELAY_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(50),
            ),
        }
    }
}
