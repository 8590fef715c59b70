/// LLM Client — the single point of entry for all Gemini API calls.
///
/// ARCHITECTURAL RULE: No other module may call the generative-language API directly.
/// All LLM interactions MUST go through this module.
///
/// No retries and no client-side timeout: a call either resolves to text, to
/// nothing (unexpected response shape), or to an `LlmError`.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Returned by `call_ai` when the response has no candidate text.
pub const INVALID_RESPONSE_SENTINEL: &str = "Error: Invalid response from AI.";
/// Prefix of the string `call_ai` returns when the call itself fails.
pub const CALL_FAILED_PREFIX: &str = "Error calling AI: ";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

// The request URL carries the API key as a query parameter; it must never
// reach an error message, a log line or a proxy response.
impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        LlmError::Http(e.without_url())
    }
}

/// What kind of reply to ask the model for.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseFormat {
    /// Free text; the prompt carries its own format contract.
    Text,
    /// `application/json` constrained by the given response schema.
    Json(Value),
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
    response_schema: &'a Value,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CandidatePart {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl GenerateContentResponse {
    /// `candidates[0].content.parts[0].text`, treating an empty string as absent.
    pub fn text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.first())
            .and_then(|p| p.text.as_deref())
            .filter(|t| !t.is_empty())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Backend trait
// ────────────────────────────────────────────────────────────────────────────

/// Anything that can turn a prompt into generated text.
///
/// Carried in `AppState` as `Arc<dyn CompletionBackend>` so handlers and the
/// match workflow can be exercised without the network.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Raw outcome: `Ok(None)` means the upstream answered but carried no text.
    async fn generate(&self, prompt: &str, format: &ResponseFormat)
        -> Result<Option<String>, LlmError>;

    /// Infallible wrapper: every failure is folded into a descriptive string.
    async fn call_ai(&self, prompt: &str, format: &ResponseFormat) -> String {
        match self.generate(prompt, format).await {
            Ok(Some(text)) => text,
            Ok(None) => INVALID_RESPONSE_SENTINEL.to_string(),
            Err(e) => {
                warn!("AI call failed: {e}");
                format!("{CALL_FAILED_PREFIX}{e}")
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Gemini client
// ────────────────────────────────────────────────────────────────────────────

/// Wraps the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_base: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_base: String, model: String, api_key: String) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().build()?,
            api_base,
            model,
            api_key,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, LlmError> {
        Self::new(
            config.gemini_api_base.clone(),
            config.gemini_model.clone(),
            config.gemini_api_key.clone(),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base, self.model
        )
    }

    /// Makes one call and returns the decoded response body.
    ///
    /// The body is decoded whatever the status: an upstream error payload just
    /// has no candidates, which callers see as "no text".
    pub async fn call(
        &self,
        prompt: &str,
        format: &ResponseFormat,
    ) -> Result<GenerateContentResponse, LlmError> {
        let request_body = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: match format {
                ResponseFormat::Text => None,
                ResponseFormat::Json(schema) => Some(GenerationConfig {
                    response_mime_type: "application/json",
                    response_schema: schema,
                }),
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            warn!("Gemini API returned {}: {}", status, body);
        }

        let decoded: GenerateContentResponse = serde_json::from_str(&body)?;

        if let Some(usage) = &decoded.usage_metadata {
            debug!(
                "Gemini call finished: prompt_tokens={}, candidate_tokens={}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        Ok(decoded)
    }
}

#[async_trait]
impl CompletionBackend for GeminiClient {
    async fn generate(
        &self,
        prompt: &str,
        format: &ResponseFormat,
    ) -> Result<Option<String>, LlmError> {
        let response = self.call(prompt, format).await?;
        Ok(response.text().map(str::to_string))
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
