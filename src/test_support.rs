//! Deterministic port doubles shared by unit tests.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};

use crate::ports::{
    Clock, CompletionRequest, CompletionResponse, IdGenerator, LlmClient, LlmError, LlmFuture,
};

/// Epoch milliseconds reported by [`FixedClock::default`].
pub const FIXED_MILLIS: i64 = 1_700_000_000_000;

/// Clock frozen at one instant.
pub struct FixedClock(pub i64);

impl Default for FixedClock {
    fn default() -> Self {
        Self(FIXED_MILLIS)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(self.0).single().unwrap()
    }
}

/// Ids `1111111…`, `2222222…`, … so hashes read as their creation order.
#[derive(Default)]
pub struct SequentialIds(AtomicU64);

impl IdGenerator for SequentialIds {
    fn generate_id(&self) -> String {
        let n = self.0.fetch_add(1, Ordering::SeqCst) % 9 + 1;
        n.to_string().repeat(32)
    }
}

/// LLM answering every request the same way after `delay`, keeping the
/// requests it saw.
pub struct ScriptedLlm {
    pub reply: Result<&'static str, &'static str>,
    pub delay: Duration,
    pub requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedLlm {
    pub fn answering(text: &'static str) -> Self {
        Self {
            reply: Ok(text),
            delay: Duration::ZERO,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &'static str) -> Self {
        Self {
            reply: Err(message),
            delay: Duration::ZERO,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl LlmClient for ScriptedLlm {
    fn complete(&self, request: &CompletionRequest) -> LlmFuture<'_> {
        self.requests.lock().unwrap().push(request.clone());
        Box::pin(async move {
            tokio::time::sleep(self.delay).await;
            match self.reply {
                Ok(text) => Ok(CompletionResponse {
                    text: text.to_string(),
                    prompt_tokens: 10,
                    completion_tokens: 20,
                }),
                Err(msg) => Err(LlmError::Network(msg.to_string())),
            }
        })
    }
}
