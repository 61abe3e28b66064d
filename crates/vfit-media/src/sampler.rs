//! Frame sampling at a fixed time interval.

use std::path::Path;

use tracing::{debug, info};
use vfit_models::FrameSample;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};

/// Extract still frames from `video` every `interval_seconds`.
///
/// Frames land in `out_dir` as `frame-1.jpg`, `frame-2.jpg`, ... and the
/// returned samples are time-ordered, oldest first. A decode failure or
/// an empty result is an error: with no visual signal the run cannot
/// proceed.
pub async fn sample_frames(
    video: impl AsRef<Path>,
    interval_seconds: f64,
    out_dir: impl AsRef<Path>,
    timeout_secs: u64,
) -> MediaResult<Vec<FrameSample>> {
    let video = video.as_ref();
    let out_dir = out_dir.as_ref();

    if !(interval_seconds > 0.0) {
        return Err(MediaError::internal(format!(
            "Frame sampling interval must be positive, got {interval_seconds}"
        )));
    }

    let cmd = FfmpegCommand::new(video, out_dir.join("frame-%d.jpg"))
        .video_filter(format!("fps=1/{interval_seconds}"))
        .output_args(["-q:v", "2"]);

    FfmpegRunner::new()
        .with_timeout(timeout_secs)
        .run(&cmd)
        .await?;

    let samples = collect_frame_files(out_dir, interval_seconds)?;

    if samples.is_empty() {
        return Err(MediaError::NoFramesExtracted);
    }

    info!(
        frames = samples.len(),
        interval_seconds,
        "Frame sampling complete"
    );
    Ok(samples)
}

/// Gather `frame-N.jpg` files from `dir`, ordered by frame number.
///
/// FFmpeg numbers frames from 1, so frame N sits at `(N-1) * interval`.
fn collect_frame_files(dir: &Path, interval_seconds: f64) -> MediaResult<Vec<FrameSample>> {
    let mut numbered: Vec<(u64, std::path::PathBuf)> = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(number) = parse_frame_number(&name.to_string_lossy()) else {
            debug!(file = %name.to_string_lossy(), "Skipping non-frame file");
            continue;
        };
        numbered.push((number, entry.path()));
    }

    numbered.sort_by_key(|(n, _)| *n);

    Ok(numbered
        .into_iter()
        .map(|(n, path)| FrameSample {
            timestamp_seconds: (n.saturating_sub(1)) as f64 * interval_seconds,
            image_path: path,
        })
        .collect())
}

/// Parse `frame-<N>.jpg` into N.
fn parse_frame_number(name: &str) -> Option<u64> {
    name.strip_prefix("frame-")?
        .strip_suffix(".jpg")?
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_frame_number() {
        assert_eq!(parse_frame_number("frame-1.jpg"), Some(1));
        assert_eq!(parse_frame_number("frame-42.jpg"), Some(42));
        assert_eq!(parse_frame_number("frame-.jpg"), None);
        assert_eq!(parse_frame_number("thumb-1.jpg"), None);
        assert_eq!(parse_frame_number("frame-1.png"), None);
    }

    #[test]
    fn test_collect_orders_by_frame_number() {
        let dir = TempDir::new().unwrap();
        // Write out of order, including a double-digit number that would
        // sort wrong lexicographically
        for n in [3u64, 10, 1, 2] {
            std::fs::write(dir.path().join(format!("frame-{n}.jpg")), b"jpg").unwrap();
        }
        std::fs::write(dir.path().join("notes.txt"), b"ignore me").unwrap();

        let samples = collect_frame_files(dir.path(), 2.0).unwrap();
        assert_eq!(samples.len(), 4);
        let times: Vec<f64> = samples.iter().map(|s| s.timestamp_seconds).collect();
        assert_eq!(times, vec![0.0, 2.0, 4.0, 18.0]);
    }

    #[test]
    fn test_collect_empty_dir() {
        let dir = TempDir::new().unwrap();
        let samples = collect_frame_files(dir.path(), 1.0).unwrap();
        assert!(samples.is_empty());
    }

    #[tokio::test]
    async fn test_non_positive_interval_rejected() {
        let dir = TempDir::new().unwrap();
        let err = sample_frames("in.mp4", 0.0, dir.path(), 30).await.unwrap_err();
        assert!(matches!(err, MediaError::Internal(_)));
    }
}
