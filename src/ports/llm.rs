//! LLM client port for language-model completions.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Boxed future type alias used by [`LlmClient`] to keep the trait dyn-compatible.
pub type LlmFuture<'a> =
    Pin<Box<dyn Future<Output = Result<CompletionResponse, LlmError>> + Send + 'a>>;

/// Failures surfaced by an [`LlmClient`].
#[derive(Debug, Error)]
pub enum LlmError {
    /// No API key was configured for the live service.
    #[error("no API key configured (set GITMOTION_API_KEY or GEMINI_API_KEY)")]
    MissingApiKey,

    /// The request never produced an HTTP response.
    #[error("request failed: {0}")]
    Network(String),

    /// The service answered with a non-success status.
    #[error("service error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message extracted from the body, or the raw body.
        message: String,
    },

    /// The response body could not be understood.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// A recorded error replayed from a cassette.
    #[error("{0}")]
    Replayed(String),
}

/// A request to generate a completion from an LLM.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompletionRequest {
    /// The model identifier (e.g. `"gemini-3-flash-preview"`).
    pub model: String,
    /// The prompt text to send.
    pub prompt: String,
    /// Maximum number of tokens to generate.
    pub max_tokens: u32,
}

/// The response from an LLM completion call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompletionResponse {
    /// The generated text.
    pub text: String,
    /// Number of prompt tokens consumed.
    pub prompt_tokens: u32,
    /// Number of completion tokens generated.
    pub completion_tokens: u32,
}

/// Sends completion requests to a language model.
pub trait LlmClient: Send + Sync {
    /// Generates a completion for the given request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails (network, auth, quota, bad payload).
    fn complete(&self, request: &CompletionRequest) -> LlmFuture<'_>;
}
