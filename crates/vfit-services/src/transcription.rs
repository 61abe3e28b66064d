//! Speech-to-text service client.
//!
//! Talks to a Whisper-compatible transcription endpoint. The pipeline
//! treats every failure here as non-fatal: the caller maps errors to an
//! empty transcript carrying a diagnostic note.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};
use vfit_models::{AudioTranscript, SegmentTiming, WordTiming};

use crate::error::{ServiceError, ServiceResult};

const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/audio/transcriptions";
const DEFAULT_MODEL: &str = "whisper-1";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Transcription service configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct TranscriptionConfig {
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl TranscriptionConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> ServiceResult<Self> {
        let api_key = std::env::var("VFIT_TRANSCRIBE_API_KEY")
            .or_else(|_| std::env::var("OPENAI_API_KEY"))
            .map_err(|_| {
                ServiceError::config(
                    "VFIT_TRANSCRIBE_API_KEY or OPENAI_API_KEY must be set for live transcription",
                )
            })?;

        Ok(Self {
            endpoint: std::env::var("VFIT_TRANSCRIBE_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string()),
            api_key,
            model: std::env::var("VFIT_TRANSCRIBE_MODEL")
                .unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            timeout_secs: std::env::var("VFIT_TRANSCRIBE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        })
    }
}

/// Transcribes an extracted audio track.
#[async_trait]
pub trait TranscriptionService: Send + Sync {
    async fn transcribe(&self, audio_path: &Path) -> ServiceResult<AudioTranscript>;
}

/// Live client for a Whisper-compatible HTTP endpoint.
pub struct LiveTranscription {
    config: TranscriptionConfig,
    client: Client,
}

/// Verbose JSON response shape of the transcription endpoint.
///
/// Timing arrays are optional on the wire; a response without them still
/// yields a usable transcript with empty timing data.
#[derive(Debug, Deserialize)]
struct VerboseTranscription {
    text: String,
    #[serde(default)]
    language: String,
    #[serde(default)]
    duration: f64,
    #[serde(default)]
    words: Vec<ApiWord>,
    #[serde(default)]
    segments: Vec<ApiSegment>,
}

#[derive(Debug, Deserialize)]
struct ApiWord {
    word: String,
    start: f64,
    end: f64,
}

#[derive(Debug, Deserialize)]
struct ApiSegment {
    start: f64,
    end: f64,
    text: String,
}

impl LiveTranscription {
    /// Build a client from the given configuration.
    pub fn new(config: TranscriptionConfig) -> ServiceResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { config, client })
    }

    /// Build a client configured from the environment.
    pub fn from_env() -> ServiceResult<Self> {
        Self::new(TranscriptionConfig::from_env()?)
    }
}

#[async_trait]
impl TranscriptionService for LiveTranscription {
    async fn transcribe(&self, audio_path: &Path) -> ServiceResult<AudioTranscript> {
        let bytes = tokio::fs::read(audio_path).await?;
        let file_name = audio_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio.mp3".to_string());

        debug!(
            path = %audio_path.display(),
            size_bytes = bytes.len(),
            "Uploading audio for transcription"
        );

        let file_part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("audio/mpeg")
            .map_err(|e| ServiceError::config(format!("Invalid audio mime type: {}", e)))?;

        let form = multipart::Form::new()
            .part("file", file_part)
            .text("model", self.config.model.clone())
            .text("response_format", "verbose_json")
            .text("timestamp_granularities[]", "word")
            .text("timestamp_granularities[]", "segment");

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let parsed: VerboseTranscription = serde_json::from_str(&body).map_err(|e| {
            ServiceError::malformed(format!("Transcription response did not parse: {}", e))
        })?;

        info!(
            language = %parsed.language,
            words = parsed.words.len(),
            segments = parsed.segments.len(),
            "Transcription complete"
        );

        Ok(AudioTranscript {
            text: parsed.text,
            language: parsed.language,
            duration_seconds: parsed.duration,
            words: parsed
                .words
                .into_iter()
                .map(|w| WordTiming {
                    word: w.word,
                    start: w.start,
                    end: w.end,
                })
                .collect(),
            segments: parsed
                .segments
                .into_iter()
                .map(|s| SegmentTiming {
                    start: s.start,
                    end: s.end,
                    text: s.text,
                })
                .collect(),
            error: None,
        })
    }
}

/// Canned transcription source for tests and offline runs.
pub struct FixtureTranscription {
    transcript: Option<AudioTranscript>,
}

impl FixtureTranscription {
    /// Always return the given transcript.
    pub fn new(transcript: AudioTranscript) -> Self {
        Self {
            transcript: Some(transcript),
        }
    }

    /// Fail every call, for exercising the degraded path.
    pub fn failing() -> Self {
        Self { transcript: None }
    }
}

#[async_trait]
impl TranscriptionService for FixtureTranscription {
    async fn transcribe(&self, _audio_path: &Path) -> ServiceResult<AudioTranscript> {
        match &self.transcript {
            Some(t) => Ok(t.clone()),
            None => Err(ServiceError::malformed("fixture configured to fail")),
        }
    }
}
