//! Replaying adapter for the `LlmClient` port.

use std::sync::Mutex;

use serde_json::Value;

use super::next_output;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{CompletionRequest, CompletionResponse, LlmClient, LlmError, LlmFuture};

/// Serves recorded LLM completions from a cassette.
pub struct ReplayingLlmClient {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingLlmClient {
    /// Create a replaying LLM client backed by the given replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

/// Decodes the `{"ok": ..}` / `{"err": ..}` shape written by the recorder.
fn decode(output: Value) -> Result<CompletionResponse, LlmError> {
    if let Some(err) = output.get("err") {
        return Err(LlmError::Replayed(err.as_str().unwrap_or_default().to_string()));
    }
    let ok = output
        .get("ok")
        .cloned()
        .ok_or_else(|| LlmError::Malformed("recorded output has neither ok nor err".into()))?;
    serde_json::from_value(ok).map_err(|e| LlmError::Malformed(e.to_string()))
}

impl LlmClient for ReplayingLlmClient {
    fn complete(&self, _request: &CompletionRequest) -> LlmFuture<'_> {
        let output = next_output(&self.replayer, "llm", "complete");
        Box::pin(async move { decode(output) })
    }
}
