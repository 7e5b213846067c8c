/// LLM Client — the single point of entry for all text-generation calls in Postcraft.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// Everything else depends on the `TextGenerator` trait, so tests swap in fakes.
///
/// No retries happen here. A failed call is returned as-is and the caller
/// decides whether to fall back (expansion) or surface it (standalone generate).
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

const TEMPERATURE: f32 = 0.9;
const TOP_P: f32 = 0.95;
const TOP_K: u32 = 40;
const MAX_OUTPUT_TOKENS: u32 = 8192;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Who produced a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// One prior exchange fed back to the model as context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }
}

/// A file sent alongside a prompt, already base64-encoded.
///
/// Same shape the upload endpoint returns, so clients can pass it straight back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub mime_type: String,
    pub data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// Anything that can turn a prompt (plus optional files and history) into text.
///
/// Carried in the services as `Arc<dyn TextGenerator>`.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Files are placed before the prompt in the new user turn.
    async fn generate_with_files(
        &self,
        prompt: &str,
        files: &[Attachment],
        history: &[Turn],
    ) -> Result<String, LlmError>;

    /// An empty `history` means a stateless call.
    async fn generate(&self, prompt: &str, history: &[Turn]) -> Result<String, LlmError> {
        self.generate_with_files(prompt, &[], history).await
    }
}

// Gemini wire format

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    role: Role,
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum GeminiPart<'a> {
    Text {
        text: &'a str,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineDataPayload<'a>,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineDataPayload<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_output_tokens: u32,
    response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// Gemini `generateContent` client. Wraps every prompt in the house-style template.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(
        api_key: String,
        model: String,
        timeout: std::time::Duration,
    ) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Points the client at a different API root (proxies, regional endpoints).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate_with_files(
        &self,
        prompt: &str,
        files: &[Attachment],
        history: &[Turn],
    ) -> Result<String, LlmError> {
        let styled = prompts::build_post_prompt(prompt);
        let request_body = build_request(&styled, files, history);

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(api_error(status.as_u16(), body));
        }

        let parsed: GeminiResponse = serde_json::from_str(&body)?;
        if let Some(usage) = &parsed.usage_metadata {
            debug!(
                "Gemini call succeeded: prompt_tokens={}, output_tokens={}, files={}, history_turns={}",
                usage.prompt_token_count,
                usage.candidates_token_count,
                files.len(),
                history.len()
            );
        }

        extract_text(parsed)
    }
}

/// History first, then the new user turn: attached files, then the prompt text.
fn build_request<'a>(
    prompt: &'a str,
    files: &'a [Attachment],
    history: &'a [Turn],
) -> GeminiRequest<'a> {
    let mut contents: Vec<GeminiContent<'a>> = history
        .iter()
        .map(|turn| GeminiContent {
            role: turn.role,
            parts: vec![GeminiPart::Text { text: &turn.text }],
        })
        .collect();

    let mut parts: Vec<GeminiPart<'a>> = files
        .iter()
        .map(|file| GeminiPart::InlineData {
            inline_data: InlineDataPayload {
                mime_type: &file.mime_type,
                data: &file.data,
            },
        })
        .collect();
    parts.push(GeminiPart::Text { text: prompt });
    contents.push(GeminiContent {
        role: Role::User,
        parts,
    });

    GeminiRequest {
        contents,
        generation_config: GenerationConfig {
            temperature: TEMPERATURE,
            top_p: TOP_P,
            top_k: TOP_K,
            max_output_tokens: MAX_OUTPUT_TOKENS,
            response_mime_type: "text/plain",
        },
    }
}

/// Joins the text parts of the first candidate.
fn extract_text(response: GeminiResponse) -> Result<String, LlmError> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    let text = text.trim();
    if text.is_empty() {
        return Err(LlmError::EmptyContent);
    }
    Ok(text.to_string())
}

fn api_error(status: u16, body: String) -> LlmError {
    let message = serde_json::from_str::<GeminiError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);
    LlmError::Api { status, message }
}
