//! Probe results, sampled frames and platform fit scores.

use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::platform::Platform;

/// Probed media file information.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MediaInfo {
    /// Duration in seconds
    pub duration_seconds: f64,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Frame rate (fps)
    pub fps: f64,
}

/// A still frame extracted from the source video.
///
/// Frames are produced oldest-first and live inside the per-run workspace
/// directory; they are removed when the run's workspace is dropped.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FrameSample {
    /// Timestamp in seconds from video start
    pub timestamp_seconds: f64,
    /// Path to the extracted JPEG
    pub image_path: PathBuf,
}

/// Fit score per target platform, each clamped to [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct PlatformFit {
    pub tiktok: u8,
    pub reels: u8,
    pub shorts: u8,
    pub youtube: u8,
}

impl PlatformFit {
    /// Fit score for one platform.
    pub fn get(&self, platform: Platform) -> u8 {
        match platform {
            Platform::Tiktok => self.tiktok,
            Platform::Reels => self.reels,
            Platform::Shorts => self.shorts,
            Platform::Youtube => self.youtube,
        }
    }

    /// Platform with the highest fit score.
    ///
    /// Ties resolve to the platform listed first in [`Platform::ALL`].
    pub fn best(&self) -> Platform {
        let mut best = Platform::ALL[0];
        let mut best_score = self.get(best);
        for platform in &Platform::ALL[1..] {
            let score = self.get(*platform);
            if score > best_score {
                best = *platform;
                best_score = score;
            }
        }
        best
    }
}
