//! `gitmotion play` command: the interactive walkthrough.
//!
//! Input is read concurrently with the session's background completions, so
//! a learner can type the next command while an animation is still playing
//! or an explanation is still loading. Overlapping commands race exactly as
//! the session describes.

use std::io::Write;
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::catalog;
use crate::config::Settings;
use crate::context::ServiceContext;
use crate::explain::{Explainer, ExplanationStatus};
use crate::render::Renderer;
use crate::session::{Session, SessionEvent};

const HELP: &str = "输入命令名（如 add 或 git commit）执行；:list 查看命令，:reset 重置，:help 帮助，:quit 退出。";

const PROMPT: &str = "> ";

/// What the learner typed.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Run(&'static catalog::CommandMeta),
    Reset,
    List,
    Help,
    Quit,
    Blank,
    Unknown(String),
}

fn parse_input(line: &str) -> Input {
    match line.trim() {
        "" => Input::Blank,
        ":reset" => Input::Reset,
        ":list" => Input::List,
        ":help" | "?" => Input::Help,
        ":quit" | ":q" | "exit" => Input::Quit,
        other => {
            catalog::lookup(other).map_or_else(|| Input::Unknown(other.to_string()), Input::Run)
        }
    }
}

/// Line-oriented loop over a [`Session`].
pub struct PlayLoop<R, W> {
    session: Session,
    renderer: Renderer,
    lines: Lines<R>,
    writer: W,
}

impl<R, W> PlayLoop<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    /// Creates a loop around `session` reading commands from `reader`.
    pub fn new(session: Session, renderer: Renderer, reader: R, writer: W) -> Self {
        Self {
            session,
            renderer,
            lines: reader.lines(),
            writer,
        }
    }

    /// Reads commands until end of input or `:quit`.
    ///
    /// Each command shows the in-flight frame and a loading card at once.
    /// The board is redrawn when the animation lands and the card when the
    /// explanation arrives, whichever comes first, while input keeps flowing.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails.
    pub async fn run(&mut self) -> Result<(), String> {
        self.emit(&self.renderer.board(self.session.state(), None))?;
        self.emit(&self.renderer.log(self.session.log()))?;
        self.emit(&format!("{HELP}\n"))?;
        self.emit(PROMPT)?;

        loop {
            tokio::select! {
                line = self.lines.next_line() => {
                    let line = line.map_err(|e| format!("read error: {e}"))?;
                    let Some(line) = line else { break };
                    if !self.handle(&line)? {
                        break;
                    }
                    self.emit(PROMPT)?;
                }
                Some(event) = self.session.next_completion() => self.show(event)?,
            }
        }

        // Let anything still in flight land before leaving.
        while let Some(event) = self.session.next_completion().await {
            self.show(event)?;
        }
        Ok(())
    }

    /// Acts on one input line; returns `false` when the learner quits.
    fn handle(&mut self, line: &str) -> Result<bool, String> {
        match parse_input(line) {
            Input::Blank => {}
            Input::Quit => return Ok(false),
            Input::Help => self.emit(&format!("{HELP}\n"))?,
            Input::List => self.emit(&self.renderer.catalog())?,
            Input::Unknown(text) => {
                self.emit(&format!("未知命令：{text}（输入 :list 查看可用命令）\n"))?;
            }
            Input::Reset => {
                self.session.reset();
                self.emit(&self.renderer.board(self.session.state(), None))?;
                self.emit(&self.renderer.log(self.session.log()))?;
            }
            Input::Run(meta) => {
                self.session.execute(meta);
                self.emit(&self.renderer.log(self.session.log()))?;
                let board = self.renderer.board(self.session.state(), self.session.animating());
                self.emit(&board)?;
                self.emit_card()?;
            }
        }
        Ok(true)
    }

    fn show(&mut self, event: SessionEvent) -> Result<(), String> {
        match event {
            SessionEvent::Applied(_) => {
                let board = self.renderer.board(self.session.state(), self.session.animating());
                self.emit(&board)?;
                if self.session.explanation() == Some(&ExplanationStatus::Pending) {
                    self.emit_card()?;
                }
            }
            SessionEvent::Explained(meta) => {
                let card = self.renderer.explanation_card(meta, self.session.explanation());
                self.emit(&card)?;
            }
        }
        Ok(())
    }

    /// Card for the selected command in its current explanation state.
    fn emit_card(&mut self) -> Result<(), String> {
        let Some(meta) = self.session.selected() else {
            return Ok(());
        };
        let card = self.renderer.explanation_card(meta, self.session.explanation());
        self.emit(&card)
    }

    fn emit(&mut self, text: &str) -> Result<(), String> {
        self.writer.write_all(text.as_bytes()).map_err(|e| format!("write error: {e}"))?;
        self.writer.flush().map_err(|e| format!("write error: {e}"))
    }
}

/// Execute the `play` command over the given input and output.
///
/// # Errors
///
/// Returns an error string if I/O fails.
pub async fn run<R, W>(
    ctx: &ServiceContext,
    settings: &Settings,
    renderer: Renderer,
    reader: R,
    writer: W,
) -> Result<(), String>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let explainer = Arc::new(Explainer::from_settings(Arc::clone(&ctx.llm), settings));
    let session = Session::new(ctx, explainer, settings.animation_delay);
    PlayLoop::new(session, renderer, reader, writer).run().await
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;
    use tokio::io::{AsyncWriteExt, BufReader};

    use super::*;
    use crate::explain::FALLBACK;
    use crate::test_support::{FixedClock, ScriptedLlm, SequentialIds};

    /// Types each line at its offset (ms after the previous one) and returns
    /// the transcript and the final session.
    fn play(script: &[(u64, &str)], llm: ScriptedLlm) -> (String, Session) {
        let ctx = ServiceContext::with_ports(
            Arc::new(FixedClock::default()),
            Arc::new(SequentialIds::default()),
            Arc::new(llm),
        );
        let explainer = Arc::new(Explainer::new(Arc::clone(&ctx.llm), "m", 64));
        let session = Session::new(&ctx, explainer, Duration::from_millis(1200));
        let script: Vec<(u64, String)> =
            script.iter().map(|(ms, line)| (*ms, format!("{line}\n"))).collect();

        let mut output = Vec::new();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .start_paused(true)
            .build()
            .unwrap();
        let session = runtime.block_on(async {
            let (mut keyboard, input) = tokio::io::duplex(256);
            tokio::spawn(async move {
                for (ms, line) in script {
                    tokio::time::sleep(Duration::from_millis(ms)).await;
                    keyboard.write_all(line.as_bytes()).await.unwrap();
                }
            });

            let mut play =
                PlayLoop::new(session, Renderer::new(false), BufReader::new(input), &mut output);
            play.run().await.unwrap();
            play.session
        });
        (String::from_utf8(output).unwrap(), session)
    }

    #[test]
    fn parses_meta_commands_and_catalog_names() {
        assert_eq!(parse_input("  :reset\n"), Input::Reset);
        assert_eq!(parse_input("git push"), Input::Run(catalog::lookup("push").unwrap()));
        assert_eq!(parse_input("rebase"), Input::Unknown("rebase".into()));
        assert_eq!(parse_input("\n"), Input::Blank);
    }

    #[test]
    fn commands_land_and_get_explained() {
        let llm = ScriptedLlm::answering("数据流动了。");
        let script = [(0, "add"), (2000, "commit"), (2000, "push"), (2000, ":quit")];
        let (out, session) = play(&script, llm);

        assert_eq!(session.state().remote_commits.len(), 2);
        assert!(out.contains("工作区 ──[Stage]──▶ 暂存区"));
        assert!(out.contains("本地仓库 ──[Push]──▶ 远程仓库"));
        assert_eq!(out.matches("AI 深度解说: 数据流动了。").count(), 3);
    }

    #[test]
    fn loading_card_shows_until_the_explanation_arrives() {
        let llm = ScriptedLlm::answering("慢").after(Duration::from_secs(30));
        let (out, _) = play(&[(0, "add")], llm);

        let loading = out.find("AI 解说生成中").expect("loading card");
        let answer = out.find("AI 深度解说: 慢").expect("answer card");
        assert!(loading < answer);
        // Shown once on execute and again when the animation lands first.
        assert_eq!(out.matches("AI 解说生成中").count(), 2);
    }

    #[test]
    fn input_keeps_flowing_while_an_explanation_is_slow() {
        let llm = ScriptedLlm::answering("慢").after(Duration::from_secs(30));
        let (out, session) = play(&[(0, "add"), (2000, "commit")], llm);

        let commit = out.find("$ git commit").expect("commit echoed");
        let answer = out.find("AI 深度解说: 慢").expect("answer card");
        assert!(commit < answer);
        assert_eq!(session.state().local_commits.len(), 2);
    }

    #[test]
    fn commands_typed_during_an_animation_both_land() {
        let (_, session) = play(&[(0, "add"), (100, "add")], ScriptedLlm::answering("ok"));
        assert_eq!(session.state().working_files, ["app.js"]);
        assert_eq!(session.state().staged_files, ["main.py", "style.css"]);
    }

    #[test]
    fn fallback_is_shown_when_the_model_fails() {
        let (out, _) = play(&[(0, "fetch")], ScriptedLlm::failing("offline"));
        assert!(out.contains(FALLBACK));
    }

    #[test]
    fn unknown_input_and_reset() {
        let script = [(0, "bisect"), (0, "clone"), (5000, ":reset")];
        let (out, session) = play(&script, ScriptedLlm::answering("ok"));
        assert!(out.contains("未知命令：bisect"));
        assert!(out.contains("状态已重置。"));
        assert_eq!(session.state().working_files, ["main.py", "style.css", "app.js"]);
    }
}
