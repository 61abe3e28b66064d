//! Derived speech statistics.
//!
//! Pure post-processing of a transcript's timing data. An empty
//! transcript yields zeroed stats, never an error.

use tracing::debug;
use vfit_models::{AudioStats, AudioTranscript, SilenceGap};

use crate::lexicons::{count_phrase, FILLER_WORDS};

/// Gaps between consecutive segments longer than this count as silences.
const SILENCE_THRESHOLD_SECONDS: f64 = 1.0;

/// Compute speech statistics from a transcript.
///
/// `fallback_duration` is used when the transcription service did not
/// report its own duration.
pub fn derive_stats(transcript: &AudioTranscript, fallback_duration: f64) -> AudioStats {
    if transcript.is_empty() {
        return AudioStats::default();
    }

    let duration = if transcript.duration_seconds > 0.0 {
        transcript.duration_seconds
    } else {
        fallback_duration
    };

    let words_per_minute = if duration > 0.0 {
        transcript.words.len() as f64 / (duration / 60.0)
    } else {
        0.0
    };

    let lowered = transcript.text.to_lowercase();
    let filler_count = FILLER_WORDS
        .iter()
        .map(|phrase| count_phrase(&lowered, phrase))
        .sum();

    let mut silences = Vec::new();
    for pair in transcript.segments.windows(2) {
        let gap = pair[1].start - pair[0].end;
        if gap > SILENCE_THRESHOLD_SECONDS {
            silences.push(SilenceGap {
                start: pair[0].end,
                end: pair[1].start,
                duration_seconds: gap,
            });
        }
    }

    debug!(
        words_per_minute,
        filler_count,
        silences = silences.len(),
        "Derived audio stats"
    );

    AudioStats {
        words_per_minute,
        filler_count,
        silences,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vfit_models::{SegmentTiming, WordTiming};

    fn word(w: &str, start: f64) -> WordTiming {
        WordTiming {
            word: w.to_string(),
            start,
            end: start + 0.3,
        }
    }

    fn segment(start: f64, end: f64, text: &str) -> SegmentTiming {
        SegmentTiming {
            start,
            end,
            text: text.to_string(),
        }
    }

    #[test]
    fn empty_transcript_gives_zeroed_stats() {
        let stats = derive_stats(&AudioTranscript::default(), 60.0);
        assert_eq!(stats.words_per_minute, 0.0);
        assert_eq!(stats.filler_count, 0);
        assert!(stats.silences.is_empty());
    }

    #[test]
    fn words_per_minute_uses_reported_duration() {
        let transcript = AudioTranscript {
            text: "one two three".to_string(),
            duration_seconds: 30.0,
            words: vec![word("one", 0.0), word("two", 1.0), word("three", 2.0)],
            ..Default::default()
        };
        let stats = derive_stats(&transcript, 999.0);
        assert!((stats.words_per_minute - 6.0).abs() < 1e-9);
    }

    #[test]
    fn falls_back_to_media_duration() {
        let transcript = AudioTranscript {
            text: "one two".to_string(),
            words: vec![word("one", 0.0), word("two", 1.0)],
            ..Default::default()
        };
        let stats = derive_stats(&transcript, 60.0);
        assert!((stats.words_per_minute - 2.0).abs() < 1e-9);
    }

    #[test]
    fn counts_fillers_including_french() {
        let transcript = AudioTranscript {
            text: "Um so like, you know, euh it was fine".to_string(),
            duration_seconds: 10.0,
            ..Default::default()
        };
        let stats = derive_stats(&transcript, 10.0);
        assert_eq!(stats.filler_count, 4);
    }

    #[test]
    fn finds_silence_gaps_over_threshold() {
        let transcript = AudioTranscript {
            text: "a b c".to_string(),
            duration_seconds: 20.0,
            segments: vec![
                segment(0.0, 2.0, "a"),
                segment(2.5, 4.0, "b"),
                segment(7.0, 9.0, "c"),
            ],
            ..Default::default()
        };
        let stats = derive_stats(&transcript, 20.0);
        assert_eq!(stats.silences.len(), 1);
        assert_eq!(stats.silences[0].start, 4.0);
        assert_eq!(stats.silences[0].end, 7.0);
        assert!((stats.silences[0].duration_seconds - 3.0).abs() < 1e-9);
    }
}
