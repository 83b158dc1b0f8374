//! Natural-language explanations of commands, with a soft fallback.
//!
//! Explanations never fail from the caller's point of view: every error is
//! logged and replaced by [`FALLBACK`].

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::config::Settings;
use crate::ports::{CompletionRequest, LlmClient};

/// Shown whenever the explanation service cannot be used.
pub const FALLBACK: &str = "暂时无法获取 AI 详细解说，请先参考下方的基础说明。";

/// Result of one explanation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Explanation {
    /// Text produced by the model.
    Generated(String),
    /// The service failed; [`FALLBACK`] stands in.
    Fallback,
}

impl Explanation {
    /// Text to display.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Explanation::Generated(text) => text,
            Explanation::Fallback => FALLBACK,
        }
    }
}

/// Observable state of an explanation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExplanationStatus {
    /// Request in flight.
    Pending,
    /// The model answered.
    Ready(String),
    /// The request failed and the fallback text is shown.
    Fallback(String),
}

impl ExplanationStatus {
    /// Whether the request has finished, one way or the other.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        !matches!(self, ExplanationStatus::Pending)
    }
}

impl From<Explanation> for ExplanationStatus {
    fn from(explanation: Explanation) -> Self {
        match explanation {
            Explanation::Generated(text) => ExplanationStatus::Ready(text),
            Explanation::Fallback => ExplanationStatus::Fallback(FALLBACK.to_string()),
        }
    }
}

/// Asks the model to explain commands in terms of the four areas.
pub struct Explainer {
    llm: Arc<dyn LlmClient>,
    model: String,
    max_tokens: u32,
}

impl Explainer {
    /// Creates an explainer over `llm`.
    pub fn new(llm: Arc<dyn LlmClient>, model: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            llm,
            model: model.into(),
            max_tokens,
        }
    }

    /// Creates an explainer using the model and budget from `settings`.
    #[must_use]
    pub fn from_settings(llm: Arc<dyn LlmClient>, settings: &Settings) -> Self {
        Self::new(llm, settings.model.clone(), settings.max_tokens)
    }

    /// Prompt sent for `command_name` (e.g. `git add`).
    #[must_use]
    pub fn prompt(command_name: &str) -> String {
        format!(
            "请用中文通俗易懂地解释 Git 命令 \"{command_name}\"。\
             重点描述数据是如何在“工作区”、“暂存区”、“本地仓库”和“远程仓库”之间流动的。\
             字数控制在100字以内，语气要专业且亲切。"
        )
    }

    /// Explains `command_name`. Never fails.
    pub async fn explain(&self, command_name: &str) -> Explanation {
        let request = CompletionRequest {
            model: self.model.clone(),
            prompt: Self::prompt(command_name),
            max_tokens: self.max_tokens,
        };

        match self.llm.complete(&request).await {
            Ok(response) => {
                let text = response.text.trim();
                if text.is_empty() {
                    warn!(command = command_name, "explanation service returned no text");
                    Explanation::Fallback
                } else {
                    debug!(
                        command = command_name,
                        prompt_tokens = response.prompt_tokens,
                        completion_tokens = response.completion_tokens,
                        "explanation received"
                    );
                    Explanation::Generated(text.to_string())
                }
            }
            Err(e) => {
                warn!(command = command_name, error = %e, "explanation service failed");
                Explanation::Fallback
            }
        }
    }

    /// Starts explaining `command_name` in the background.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn spawn(self: &Arc<Self>, command_name: &str) -> ExplanationTask {
        let (tx, rx) = watch::channel(ExplanationStatus::Pending);
        let explainer = Arc::clone(self);
        let command_name = command_name.to_string();

        tokio::spawn(async move {
            let explanation = explainer.explain(&command_name).await;
            // Nobody watching is fine.
            let _ = tx.send(explanation.into());
        });

        ExplanationTask { rx }
    }
}

/// Handle on a background explanation request.
pub struct ExplanationTask {
    rx: watch::Receiver<ExplanationStatus>,
}

impl ExplanationTask {
    /// Current status without waiting.
    #[must_use]
    pub fn status(&self) -> ExplanationStatus {
        self.rx.borrow().clone()
    }

    /// Waits until the request settles.
    pub async fn wait(mut self) -> ExplanationStatus {
        let settled = self.rx.wait_for(ExplanationStatus::is_settled).await.map(|s| s.clone());
        // A task that died before reporting counts as any other failure.
        settled.unwrap_or_else(|_| Explanation::Fallback.into())
    }
}
