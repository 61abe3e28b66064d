//! Target platform enumeration.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Distribution platforms the fit aggregator scores against.
///
/// The variant order doubles as the tie-break priority when two platforms
/// share the best fit score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Tiktok,
    Reels,
    Shorts,
    Youtube,
}

impl Platform {
    /// All platforms in fixed priority order.
    pub const ALL: [Platform; 4] = [
        Platform::Tiktok,
        Platform::Reels,
        Platform::Shorts,
        Platform::Youtube,
    ];

    /// Returns the platform as a string for display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tiktok => "tiktok",
            Self::Reels => "reels",
            Self::Shorts => "shorts",
            Self::Youtube => "youtube",
        }
    }

    /// Short-form platforms expect fast pacing and sub-minute durations.
    pub fn is_short_form(&self) -> bool {
        matches!(self, Self::Tiktok | Self::Reels | Self::Shorts)
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
