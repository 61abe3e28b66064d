//! Structure scorer.
//!
//! Splits the timeline into intro/body/outro and checks the transcript
//! tail for a call to action. An empty transcript scores the base with
//! feedback flagging the missing close.

use tracing::debug;
use vfit_models::{AudioTranscript, Span, StructureScore, StructureSections};

use crate::lexicons::{contains_any, CTA_PHRASES};

/// Tuning constants for the structure scorer.
#[derive(Debug, Clone)]
pub struct StructureConfig {
    /// Intro ends at this fraction of the duration
    pub intro_fraction: f64,
    /// Outro starts at this fraction of the duration
    pub outro_fraction: f64,
    /// How much of the transcript tail is searched for CTA phrases
    pub tail_chars: usize,
    pub base_score: i32,
    pub cta_bonus: i32,
}

impl Default for StructureConfig {
    fn default() -> Self {
        Self {
            intro_fraction: 0.15,
            outro_fraction: 0.85,
            tail_chars: 500,
            base_score: 70,
            cta_bonus: 20,
        }
    }
}

/// Score structural completeness from the transcript and duration.
pub fn score_structure(
    config: &StructureConfig,
    transcript: &AudioTranscript,
    duration_seconds: f64,
) -> StructureScore {
    let duration = duration_seconds.max(0.0);
    let intro_end = config.intro_fraction * duration;
    let outro_start = config.outro_fraction * duration;

    let sections = StructureSections {
        intro: Span {
            start: 0.0,
            end: intro_end,
        },
        body: Span {
            start: intro_end,
            end: outro_start,
        },
        outro: Span {
            start: outro_start,
            end: duration,
        },
    };

    let tail = transcript_tail(&transcript.text, config.tail_chars);
    let has_cta = contains_any(&tail, CTA_PHRASES);

    let mut score = config.base_score;
    if has_cta {
        score += config.cta_bonus;
    }
    let score = score.clamp(0, 100) as u8;

    let feedback = if has_cta {
        "Clear close with a call to action".to_string()
    } else {
        "No call to action detected near the end".to_string()
    };

    debug!(score, has_cta, "Scored structure");

    StructureScore {
        score,
        sections,
        has_cta,
        feedback,
    }
}

/// Last `chars` characters of the text, lowercased.
fn transcript_tail(text: &str, chars: usize) -> String {
    let total = text.chars().count();
    let skip = total.saturating_sub(chars);
    text.chars().skip(skip).collect::<String>().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transcript(text: &str) -> AudioTranscript {
        AudioTranscript {
            text: text.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn sections_split_at_fixed_fractions() {
        let s = score_structure(&StructureConfig::default(), &transcript(""), 100.0);
        assert_eq!(s.sections.intro.start, 0.0);
        assert!((s.sections.intro.end - 15.0).abs() < 1e-9);
        assert!((s.sections.body.start - 15.0).abs() < 1e-9);
        assert!((s.sections.body.end - 85.0).abs() < 1e-9);
        assert!((s.sections.outro.end - 100.0).abs() < 1e-9);
    }

    #[test]
    fn cta_in_tail_earns_bonus() {
        let s = score_structure(
            &StructureConfig::default(),
            &transcript("great video everyone, don't forget to subscribe for more"),
            60.0,
        );
        assert!(s.has_cta);
        assert_eq!(s.score, 90);
    }

    #[test]
    fn cta_outside_tail_does_not_count() {
        let mut text = "subscribe now! ".to_string();
        text.push_str(&"filler word ".repeat(100));
        let s = score_structure(&StructureConfig::default(), &transcript(&text), 60.0);
        assert!(!s.has_cta);
        assert_eq!(s.score, 70);
    }

    #[test]
    fn empty_transcript_scores_base_without_cta() {
        let s = score_structure(
            &StructureConfig::default(),
            &AudioTranscript::empty_with_error("timed out"),
            60.0,
        );
        assert!(!s.has_cta);
        assert_eq!(s.score, 70);
        assert!(s.feedback.contains("No call to action"));
    }

    #[test]
    fn french_cta_matches() {
        let s = score_structure(
            &StructureConfig::default(),
            &transcript("merci d'avoir regardé, abonnez-vous"),
            30.0,
        );
        assert!(s.has_cta);
    }
}
