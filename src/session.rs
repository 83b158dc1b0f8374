//! The state container driving one learner's walkthrough.
//!
//! A [`Session`] owns the repository state outright. Executing a command
//! starts two background tasks, the animation timer and the explanation
//! request. Both report back over a channel and the session folds each
//! completion into its own state, so nothing else ever writes the model.
//!
//! Timers are neither queued nor coalesced. Two commands issued within the
//! animation delay both land, each applied to whatever state is current
//! when its timer fires.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::catalog::CommandMeta;
use crate::context::ServiceContext;
use crate::explain::{Explainer, ExplanationStatus};
use crate::model::RepositoryState;
use crate::ports::{Clock, IdGenerator};
use crate::transition::apply_command;

/// Terminal lines kept on screen.
pub const LOG_CAPACITY: usize = 6;

/// Log shown when a session starts.
pub const WELCOME_LOG: [&str; 2] = ["$ git 欢迎学习 Git！", "提示：输入一个 git 命令开始吧。"];

/// Log shown after a reset.
pub const RESET_LOG: [&str; 2] = ["$ git reset --hard initial", "状态已重置。"];

/// Something a background task finished.
#[derive(Debug)]
enum Completion {
    Animation(&'static CommandMeta),
    Explanation(&'static CommandMeta, ExplanationStatus),
}

/// What [`Session::next_completion`] folded into the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The command's animation finished and its transition was applied.
    Applied(&'static CommandMeta),
    /// The command's explanation arrived (or fell back).
    Explained(&'static CommandMeta),
}

/// One learner's walkthrough.
pub struct Session {
    state: RepositoryState,
    animating: Option<&'static CommandMeta>,
    selected: Option<&'static CommandMeta>,
    explanation: Option<ExplanationStatus>,
    log: Vec<String>,
    outstanding: usize,
    delay: Duration,
    clock: Arc<dyn Clock>,
    id_gen: Arc<dyn IdGenerator>,
    explainer: Arc<Explainer>,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
}

impl Session {
    /// Starts a session at the seed state.
    #[must_use]
    pub fn new(ctx: &ServiceContext, explainer: Arc<Explainer>, delay: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state: RepositoryState::seed(),
            animating: None,
            selected: None,
            explanation: None,
            log: WELCOME_LOG.iter().map(ToString::to_string).collect(),
            outstanding: 0,
            delay,
            clock: Arc::clone(&ctx.clock),
            id_gen: Arc::clone(&ctx.id_gen),
            explainer,
            tx,
            rx,
        }
    }

    /// Current repository state.
    #[must_use]
    pub fn state(&self) -> &RepositoryState {
        &self.state
    }

    /// Command whose animation is playing, if any.
    #[must_use]
    pub fn animating(&self) -> Option<&'static CommandMeta> {
        self.animating
    }

    /// Last command the learner picked.
    #[must_use]
    pub fn selected(&self) -> Option<&'static CommandMeta> {
        self.selected
    }

    /// Explanation slot; `None` until a command is picked.
    #[must_use]
    pub fn explanation(&self) -> Option<&ExplanationStatus> {
        self.explanation.as_ref()
    }

    /// Terminal log, oldest line first.
    #[must_use]
    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// Background completions not yet folded in.
    #[must_use]
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    /// Picks `command`: starts its animation timer and explanation request.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn execute(&mut self, command: &'static CommandMeta) {
        info!(command = command.id, "executing");
        self.animating = Some(command);
        self.selected = Some(command);
        self.explanation = Some(ExplanationStatus::Pending);
        self.push_log(format!("$ {}", command.name));

        let tx = self.tx.clone();
        let delay = self.delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(Completion::Animation(command));
        });

        let tx = self.tx.clone();
        let task = self.explainer.spawn(command.name);
        tokio::spawn(async move {
            let status = task.wait().await;
            let _ = tx.send(Completion::Explanation(command, status));
        });

        self.outstanding += 2;
    }

    /// Returns to the seed state and clears the selection.
    ///
    /// Animations already in flight still land afterwards.
    pub fn reset(&mut self) {
        info!("resetting session");
        self.state = RepositoryState::seed();
        self.log = RESET_LOG.iter().map(ToString::to_string).collect();
        self.selected = None;
        self.explanation = None;
    }

    /// Waits for the next background completion and folds it in.
    ///
    /// Returns `None` immediately when nothing is outstanding.
    pub async fn next_completion(&mut self) -> Option<SessionEvent> {
        if self.outstanding == 0 {
            return None;
        }
        // The session holds a sender, so the channel never closes under us.
        let completion = self.rx.recv().await?;
        self.outstanding -= 1;

        Some(match completion {
            Completion::Animation(command) => {
                self.state =
                    apply_command(&self.state, command.id, &*self.clock, &*self.id_gen);
                self.animating = None;
                debug!(command = command.id, "animation finished");
                SessionEvent::Applied(command)
            }
            Completion::Explanation(command, status) => {
                self.explanation = Some(status);
                SessionEvent::Explained(command)
            }
        })
    }

    /// Waits until every outstanding completion has been folded in.
    pub async fn settle(&mut self) {
        while self.next_completion().await.is_some() {}
    }

    fn push_log(&mut self, line: String) {
        if self.log.len() >= LOG_CAPACITY {
            let excess = self.log.len() + 1 - LOG_CAPACITY;
            self.log.drain(..excess);
        }
        self.log.push(line);
    }
}
