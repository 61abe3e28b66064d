//! Scene boundary detection.
//!
//! Runs FFmpeg's `select='gt(scene,T)'` filter with `showinfo` into a
//! null sink and parses the selected frame timestamps out of the filter's
//! stderr diagnostic stream.

use std::path::Path;

use tracing::info;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::MediaResult;

/// Detect visual scene cuts in `video`.
///
/// `threshold` is the scene-change sensitivity in (0, 1]; lower values
/// report more cuts. Returns sorted, deduplicated timestamps within
/// `[0, duration_seconds]`. May be empty.
pub async fn detect_scenes(
    video: impl AsRef<Path>,
    duration_seconds: f64,
    threshold: f64,
    timeout_secs: u64,
) -> MediaResult<Vec<f64>> {
    let cmd = FfmpegCommand::null_sink(video.as_ref())
        // showinfo logs at info level, which "-v error" would swallow
        .log_level("info")
        .video_filter(format!("select='gt(scene,{threshold})',showinfo"));

    let stderr_lines = FfmpegRunner::new()
        .with_timeout(timeout_secs)
        .run_capturing_stderr(&cmd)
        .await?;

    let boundaries = finalize_boundaries(
        stderr_lines.iter().filter_map(|l| parse_showinfo_line(l)),
        duration_seconds,
    );

    info!(
        cuts = boundaries.len(),
        threshold,
        "Scene detection complete"
    );
    Ok(boundaries)
}

/// Extract the `pts_time` from a `showinfo` diagnostic line.
///
/// Example input:
/// `[Parsed_showinfo_1 @ 0x55..] n:   0 pts:  7200 pts_time:0.24 duration: ...`
fn parse_showinfo_line(line: &str) -> Option<f64> {
    if !line.contains("showinfo") {
        return None;
    }
    let rest = line.split("pts_time:").nth(1)?;
    let value: String = rest
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    value.parse().ok()
}

/// Sort, deduplicate and clamp raw timestamps to `[0, duration]`.
fn finalize_boundaries(timestamps: impl Iterator<Item = f64>, duration: f64) -> Vec<f64> {
    let mut out: Vec<f64> = timestamps
        .filter(|t| t.is_finite() && *t >= 0.0 && *t <= duration)
        .collect();
    out.sort_by(|a, b| a.total_cmp(b));
    out.dedup();
    out
}
