//! Gemini provider implementation
//!
//! This module implements the Provider trait for Google's generative-language
//! API (`models/{model}:generateContent`). One POST per call; no streaming,
//! no retries.

use crate::config::GeminiConfig;
use crate::credentials::ApiKey;
use crate::error::{MentorError, Result};
use crate::providers::{GenerationRequest, Message, Provider, Role};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default API base used when the configuration does not override it
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Gemini API provider
///
/// # Examples
///
/// ```no_run
/// use trading_mentor::config::GeminiConfig;
/// use trading_mentor::credentials::ApiKey;
/// use trading_mentor::providers::{GeminiProvider, GenerationRequest, Message, Provider};
///
/// # async fn example() -> trading_mentor::error::Result<()> {
/// let provider = GeminiProvider::new(GeminiConfig::default(), ApiKey::new("my-key"))?;
/// let request = GenerationRequest {
///     contents: vec![Message::user("What is a stop loss?")],
///     system_instruction: "You are a trading mentor.".to_string(),
///     temperature: 0.7,
/// };
/// let reply = provider.generate(&request).await?;
/// # Ok(())
/// # }
/// ```
pub struct GeminiProvider {
    client: Client,
    config: GeminiConfig,
    api_key: ApiKey,
}

/// Request body for `generateContent`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    system_instruction: GeminiInstruction,
    generation_config: GeminiGenerationConfig,
}

/// One turn in Gemini format
#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    role: String,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

/// A content part; only text parts are produced or consumed
#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    /// Set on reasoning parts, which are not part of the reply text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    thought: Option<bool>,
}

#[derive(Debug, Serialize)]
struct GeminiInstruction {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiGenerationConfig {
    temperature: f32,
}

/// Response body from `generateContent`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

/// Error envelope returned with non-2xx statuses
#[derive(Debug, Deserialize)]
struct GeminiErrorEnvelope {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

impl GeminiPart {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            thought: None,
        }
    }
}

/// Map a conversation role onto the API's role names
fn api_role(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Assistant => "model",
    }
}

/// Convert conversation messages to Gemini contents, preserving order
fn convert_messages(messages: &[Message]) -> Vec<GeminiContent> {
    messages
        .iter()
        .map(|m| GeminiContent {
            role: api_role(m.role).to_string(),
            parts: vec![GeminiPart::text(m.content.clone())],
        })
        .collect()
}

/// Concatenate the text parts of the first candidate
///
/// Returns `None` when there is no candidate or it carries no text.
fn extract_text(response: GeminiResponse) -> Option<String> {
    let candidate = response.candidates.into_iter().next()?;
    if let Some(reason) = &candidate.finish_reason {
        tracing::debug!("Gemini finish reason: {}", reason);
    }

    let texts: Vec<String> = candidate
        .content?
        .parts
        .into_iter()
        .filter(|p| p.thought != Some(true))
        .filter_map(|p| p.text)
        .collect();

    if texts.is_empty() {
        None
    } else {
        Some(texts.concat())
    }
}

impl GeminiProvider {
    /// Create a new Gemini provider instance
    ///
    /// # Arguments
    ///
    /// * `config` - Gemini configuration (model, api base, timeout)
    /// * `api_key` - Credential resolved at runtime
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    pub fn new(config: GeminiConfig, api_key: ApiKey) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!(
            "trading-mentor/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(seconds) = config.request_timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let client = builder
            .build()
            .map_err(|e| MentorError::Provider(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!(
            "Initialized Gemini provider: api_base={}, model={}",
            config.api_base.as_deref().unwrap_or(DEFAULT_API_BASE),
            config.model
        );

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    /// Full URL of the `generateContent` endpoint for the configured model
    pub fn endpoint(&self) -> String {
        let base = self
            .config
            .api_base
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE)
            .trim_end_matches('/');
        format!("{}/v1beta/models/{}:generateContent", base, self.config.model)
    }

    fn build_request(request: &GenerationRequest) -> GeminiRequest {
        GeminiRequest {
            contents: convert_messages(&request.contents),
            system_instruction: GeminiInstruction {
                parts: vec![GeminiPart::text(request.system_instruction.clone())],
            },
            generation_config: GeminiGenerationConfig {
                temperature: request.temperature,
            },
        }
    }
}

/// Turn a failed response body into a structured API error
fn api_error(status: reqwest::StatusCode, body: &str) -> MentorError {
    match serde_json::from_str::<GeminiErrorEnvelope>(body) {
        Ok(envelope) => MentorError::Api {
            status: status.as_u16(),
            code: envelope.error.status,
            message: if envelope.error.message.is_empty() {
                status.to_string()
            } else {
                envelope.error.message
            },
        },
        Err(_) => MentorError::Api {
            status: status.as_u16(),
            code: None,
            message: if body.trim().is_empty() {
                status.to_string()
            } else {
                body.trim().to_string()
            },
        },
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    async fn generate(&self, request: &GenerationRequest) -> Result<Option<String>> {
        let url = self.endpoint();
        let body = Self::build_request(request);

        tracing::debug!(
            "Sending Gemini request: model={}, {} messages",
            self.config.model,
            body.contents.len()
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.api_key.expose())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Gemini request failed: {}", e);
                MentorError::Http(e.without_url())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini returned error {}: {}", status, error_text);
            return Err(api_error(status, &error_text).into());
        }

        let gemini_response: GeminiResponse = match response.json().await {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::error!("Failed to parse Gemini response: {}", e);
                return Err(anyhow::Error::from(MentorError::Http(e.without_url()))
                    .context("Failed to parse Gemini response"));
            }
        };

        Ok(extract_text(gemini_response))
    }

    fn model(&self) -> String {
        self.config.model.clone()
    }
}
