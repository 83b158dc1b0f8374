//! Live adapter for the `LlmClient` port using the Gemini `generateContent` API.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ports::llm::{CompletionRequest, CompletionResponse, LlmClient, LlmError, LlmFuture};

/// Default base URL of the Generative Language API.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Live LLM client that calls the Gemini API.
pub struct LiveLlmClient {
    client: Client,
    api_base: String,
    api_key: Option<String>,
}

impl LiveLlmClient {
    /// Creates a live client against `api_base`.
    ///
    /// A missing key is not an error here: every call then fails with
    /// [`LlmError::MissingApiKey`], which callers treat like any other outage.
    #[must_use]
    pub fn new(api_base: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_base: api_base.into(),
            api_key,
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{model}:generateContent", self.api_base.trim_end_matches('/'))
    }
}

/// Request body sent to `generateContent`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
}

/// Top-level `generateContent` response.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

/// Error envelope returned on non-2xx responses.
#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Extracts the generated text and token counts from a response body.
fn parse_response(body: &str) -> Result<CompletionResponse, LlmError> {
    let parsed: GenerateResponse =
        serde_json::from_str(body).map_err(|e| LlmError::Malformed(e.to_string()))?;

    let text = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect::<String>())
        .ok_or_else(|| LlmError::Malformed("response carried no candidates".to_string()))?;

    let usage = parsed.usage_metadata;
    Ok(CompletionResponse {
        text,
        prompt_tokens: usage.as_ref().map_or(0, |u| u.prompt_token_count),
        completion_tokens: usage.as_ref().map_or(0, |u| u.candidates_token_count),
    })
}

impl LlmClient for LiveLlmClient {
    fn complete(&self, request: &CompletionRequest) -> LlmFuture<'_> {
        let request = request.clone();

        Box::pin(async move {
            let api_key = self.api_key.as_deref().ok_or(LlmError::MissingApiKey)?;

            let body = GenerateRequest {
                contents: vec![Content {
                    parts: vec![Part {
                        text: &request.prompt,
                    }],
                }],
                generation_config: GenerationConfig {
                    max_output_tokens: request.max_tokens,
                },
            };

            let url = self.endpoint(&request.model);
            debug!(%url, model = %request.model, "sending generateContent request");

            let response = self
                .client
                .post(&url)
                .header("x-goog-api-key", api_key)
                .json(&body)
                .send()
                .await
                .map_err(|e| LlmError::Network(e.to_string()))?;

            let status = response.status();
            let response_text =
                response.text().await.map_err(|e| LlmError::Network(e.to_string()))?;

            if !status.is_success() {
                let message = serde_json::from_str::<ApiErrorBody>(&response_text)
                    .map(|e| e.error.message)
                    .unwrap_or(response_text);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            parse_response(&response_text)
        })
    }
}
