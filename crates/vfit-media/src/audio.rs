//! Audio demux for transcription upload.

use std::path::Path;

use tracing::debug;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};

/// Extract the audio track of `input` to a mono 16 kHz mp3 at `output`.
///
/// The transcription service only needs speech content, so the stream is
/// downmixed and resampled to keep the upload small.
pub async fn extract_audio(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    timeout_secs: u64,
) -> MediaResult<()> {
    let input = input.as_ref();
    let output = output.as_ref();

    debug!(
        input = %input.display(),
        output = %output.display(),
        "Extracting audio for transcription"
    );

    let cmd = FfmpegCommand::new(input, output).output_args([
        "-vn", // No video
        "-ac", "1", // Mono
        "-ar", "16000", // 16kHz
        "-f", "mp3",
    ]);

    FfmpegRunner::new()
        .with_timeout(timeout_secs)
        .run(&cmd)
        .await?;

    // An empty file means the source had no audio stream worth sending
    let metadata = tokio::fs::metadata(output).await?;
    if metadata.len() == 0 {
        return Err(MediaError::InvalidVideo(
            "No audio data found in file".to_string(),
        ));
    }

    debug!(output_size = metadata.len(), "Audio extraction complete");
    Ok(())
}
