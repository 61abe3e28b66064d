//! Generative rewrite suggestions client.
//!
//! Sends a compact feature summary to a chat-completions endpoint in JSON
//! mode and parses the reply into [`ActionSuggestions`]. Any failure,
//! including a schema mismatch in the reply, surfaces as an error so the
//! pipeline can substitute the deterministic fallback.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use vfit_models::{
    ActionSuggestions, EmotionScore, HookScore, PacingScore, PlatformFit, StructureScore,
};

use crate::error::{ServiceError, ServiceResult};

const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Cap on the transcript excerpt embedded in the prompt.
const EXCERPT_CHARS: usize = 1500;

/// Everything the suggestion prompt needs from a finished scoring pass.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureSummary {
    /// Leading portion of the transcript, capped at a prompt-safe length
    pub transcript_excerpt: String,
    pub language: String,
    pub duration_seconds: f64,
    pub hook: HookScore,
    pub pacing: PacingScore,
    pub emotion: EmotionScore,
    pub structure: StructureScore,
    pub platform_fit: PlatformFit,
}

impl FeatureSummary {
    /// Truncate a full transcript to the excerpt the prompt carries.
    pub fn excerpt_of(text: &str) -> String {
        match text.char_indices().nth(EXCERPT_CHARS) {
            Some((idx, _)) => text[..idx].to_string(),
            None => text.to_string(),
        }
    }
}

/// Suggestion service configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct SuggestionConfig {
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl SuggestionConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> ServiceResult<Self> {
        let api_key = std::env::var("VFIT_SUGGEST_API_KEY")
            .or_else(|_| std::env::var("OPENAI_API_KEY"))
            .map_err(|_| {
                ServiceError::config(
                    "VFIT_SUGGEST_API_KEY or OPENAI_API_KEY must be set for live suggestions",
                )
            })?;

        Ok(Self {
            endpoint: std::env::var("VFIT_SUGGEST_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string()),
            api_key,
            model: std::env::var("VFIT_SUGGEST_MODEL")
                .unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            timeout_secs: std::env::var("VFIT_SUGGEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        })
    }
}

/// Produces rewrite and editing suggestions from a feature summary.
#[async_trait]
pub trait SuggestionService: Send + Sync {
    async fn suggest(&self, summary: &FeatureSummary) -> ServiceResult<ActionSuggestions>;
}

/// Live client for a chat-completions endpoint in JSON mode.
pub struct LiveSuggestions {
    config: SuggestionConfig,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

impl LiveSuggestions {
    /// Build a client from the given configuration.
    pub fn new(config: SuggestionConfig) -> ServiceResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { config, client })
    }

    /// Build a client configured from the environment.
    pub fn from_env() -> ServiceResult<Self> {
        Self::new(SuggestionConfig::from_env()?)
    }
}

#[async_trait]
impl SuggestionService for LiveSuggestions {
    async fn suggest(&self, summary: &FeatureSummary) -> ServiceResult<ActionSuggestions> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: build_prompt(summary),
                },
            ],
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        debug!(model = %self.config.model, "Requesting suggestions");

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&request)
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
        let chat: ChatResponse = serde_json::from_str(&body).map_err(|e| {
            ServiceError::malformed(format!("Chat response did not parse: {}", e))
        })?;

        let content = chat
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| ServiceError::malformed("Chat response had no choices"))?;

        let suggestions = parse_suggestions(content)?;
        info!(
            titles = suggestions.title_suggestions.len(),
            tips = suggestions.editing_tips.len(),
            "Suggestions received"
        );
        Ok(suggestions)
    }
}

/// Parse model output into suggestions, tolerating markdown code fences.
fn parse_suggestions(text: &str) -> ServiceResult<ActionSuggestions> {
    let text = text.trim();
    let text = text.strip_prefix("```json").unwrap_or(text);
    let text = text.strip_prefix("```").unwrap_or(text);
    let text = text.strip_suffix("```").unwrap_or(text);

    serde_json::from_str(text.trim())
        .map_err(|e| ServiceError::malformed(format!("Suggestions JSON did not parse: {}", e)))
}

const SYSTEM_PROMPT: &str = "You are a short-form video coach. You receive scored features of an \
analyzed video and respond with concrete rewrite and editing suggestions. Respond with JSON only.";

/// Build the user prompt from the scored features.
fn build_prompt(summary: &FeatureSummary) -> String {
    format!(
        r#"Video duration: {:.1}s, language: {}.

Scores (0-100):
- Hook: {} ({})
- Pacing: {} ({})
- Emotion: {} ({})
- Structure: {} ({})

Platform fit: tiktok {}, reels {}, shorts {}, youtube {}.
Call to action present: {}.

Transcript excerpt:
{}

Return ONLY a single JSON object with this schema:
{{
  "hookRewrite": "A stronger opening line for the first three seconds",
  "ctaRewrite": "A clearer closing call to action",
  "titleSuggestions": ["Title 1", "Title 2", "Title 3"],
  "editingTips": ["Tip 1", "Tip 2"],
  "description": "A social media caption with relevant hashtags"
}}"#,
        summary.duration_seconds,
        if summary.language.is_empty() {
            "unknown"
        } else {
            &summary.language
        },
        summary.hook.score,
        summary.hook.feedback,
        summary.pacing.score,
        summary.pacing.feedback,
        summary.emotion.score,
        summary.emotion.feedback,
        summary.structure.score,
        summary.structure.feedback,
        summary.platform_fit.tiktok,
        summary.platform_fit.reels,
        summary.platform_fit.shorts,
        summary.platform_fit.youtube,
        summary.structure.has_cta,
        summary.transcript_excerpt,
    )
}

/// Canned suggestion source for tests and offline runs.
pub struct FixtureSuggestions {
    suggestions: Option<ActionSuggestions>,
}

impl FixtureSuggestions {
    /// Always return the given suggestions.
    pub fn new(suggestions: ActionSuggestions) -> Self {
        Self {
            suggestions: Some(suggestions),
        }
    }

    /// Fail every call, for exercising the fallback path.
    pub fn failing() -> Self {
        Self { suggestions: None }
    }
}

#[async_trait]
impl SuggestionService for FixtureSuggestions {
    async fn suggest(&self, _summary: &FeatureSummary) -> ServiceResult<ActionSuggestions> {
        match &self.suggestions {
            Some(s) => Ok(s.clone()),
            None => Err(ServiceError::malformed("fixture configured to fail")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vfit_models::{Emotion, Span, StructureSections};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn summary_fixture() -> FeatureSummary {
        FeatureSummary {
            transcript_excerpt: "wait until you see this".to_string(),
            language: "en".to_string(),
            duration_seconds: 42.0,
            hook: HookScore {
                score: 85,
                window_seconds: 3.0,
                has_speech: true,
                has_face: true,
                has_fast_cuts: false,
                has_hook_keyword: true,
                high_energy_start: true,
                feedback: "Strong opening".to_string(),
            },
            pacing: PacingScore {
                score: 70,
                average_shot_length: 3.5,
                cuts_per_minute: 17.0,
                shots: Vec::new(),
                feedback: "Good rhythm".to_string(),
            },
            emotion: EmotionScore {
                score: 75,
                dominant_emotion: Emotion::Happy,
                feedback: "Positive energy".to_string(),
                note: None,
            },
            structure: StructureScore {
                score: 90,
                sections: StructureSections {
                    intro: Span {
                        start: 0.0,
                        end: 6.3,
                    },
                    body: Span {
                        start: 6.3,
                        end: 35.7,
                    },
                    outro: Span {
                        start: 35.7,
                        end: 42.0,
                    },
                },
                has_cta: true,
                feedback: "Clear shape".to_string(),
            },
            platform_fit: PlatformFit {
                tiktok: 90,
                reels: 75,
                shorts: 90,
                youtube: 50,
            },
        }
    }

    fn valid_suggestions_json() -> serde_json::Value {
        serde_json::json!({
            "hookRewrite": "Stop scrolling, this changes everything",
            "ctaRewrite": "Follow for part two",
            "titleSuggestions": ["One", "Two"],
            "editingTips": ["Cut faster"],
            "description": "A caption #video"
        })
    }

    fn config_for(server: &MockServer) -> SuggestionConfig {
        SuggestionConfig {
            endpoint: format!("{}/v1/chat/completions", server.uri()),
            api_key: "test-key".to_string(),
            model: "gpt-4o-mini".to_string(),
            timeout_secs: 5,
        }
    }

    #[tokio::test]
    async fn parses_plain_json_content() {
        let server = MockServer::start().await;
        let content = valid_suggestions_json().to_string();
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"content": content}}]
            })))
            .mount(&server)
            .await;

        let svc = LiveSuggestions::new(config_for(&server)).unwrap();
        let got = svc.suggest(&summary_fixture()).await.unwrap();
        assert_eq!(got.cta_rewrite, "Follow for part two");
        assert_eq!(got.title_suggestions.len(), 2);
    }

    #[tokio::test]
    async fn strips_markdown_fences() {
        let server = MockServer::start().await;
        let content = format!("```json\n{}\n```", valid_suggestions_json());
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"content": content}}]
            })))
            .mount(&server)
            .await;

        let svc = LiveSuggestions::new(config_for(&server)).unwrap();
        let got = svc.suggest(&summary_fixture()).await.unwrap();
        assert_eq!(got.editing_tips, vec!["Cut faster".to_string()]);
    }

    #[tokio::test]
    async fn schema_mismatch_is_malformed_response() {
        let server = MockServer::start().await;
        // Missing required fields
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"content": "{\"hookRewrite\": \"only this\"}"}}]
            })))
            .mount(&server)
            .await;

        let svc = LiveSuggestions::new(config_for(&server)).unwrap();
        let err = svc.suggest(&summary_fixture()).await.unwrap_err();
        assert!(matches!(err, ServiceError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn empty_choices_is_malformed_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"choices": []})),
            )
            .mount(&server)
            .await;

        let svc = LiveSuggestions::new(config_for(&server)).unwrap();
        let err = svc.suggest(&summary_fixture()).await.unwrap_err();
        assert!(matches!(err, ServiceError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn server_error_becomes_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let svc = LiveSuggestions::new(config_for(&server)).unwrap();
        let err = svc.suggest(&summary_fixture()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Status { status: 429, .. }));
    }

    #[test]
    fn excerpt_caps_length() {
        let long = "a".repeat(5000);
        let excerpt = FeatureSummary::excerpt_of(&long);
        assert_eq!(excerpt.chars().count(), 1500);

        let short = "short text";
        assert_eq!(FeatureSummary::excerpt_of(short), short);
    }

    #[test]
    fn prompt_mentions_scores_and_excerpt() {
        let prompt = build_prompt(&summary_fixture());
        assert!(prompt.contains("Hook: 85"));
        assert!(prompt.contains("wait until you see this"));
        assert!(prompt.contains("hookRewrite"));
    }
}
