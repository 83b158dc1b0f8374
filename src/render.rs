//! Plain-text rendering of the four areas, the explanation card and the log.

use std::fmt::Write as _;

use colored::{Color, Colorize};

use crate::catalog::{in_category, Category, CommandMeta};
use crate::explain::ExplanationStatus;
use crate::model::{Area, RepositoryState};
use crate::transition::flow_for;

/// Commits shown per repository area; older ones scroll off.
pub const VISIBLE_COMMITS: usize = 4;

/// Shown in an area with nothing in it.
pub const EMPTY: &str = "(空)";

/// Renders sessions for a terminal.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    /// Creates a renderer; `color` enables ANSI styling.
    #[must_use]
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            text.color(color).bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    /// The four areas side by side (one per line), with the in-flight flow.
    #[must_use]
    pub fn board(&self, state: &RepositoryState, animating: Option<&CommandMeta>) -> String {
        let flow = animating.and_then(|cmd| flow_for(cmd.id));
        let mut out = String::new();

        let head = state.head().map_or("-", |c| c.hash.as_str());
        let _ = writeln!(
            out,
            "当前分支 {}   最近版本 HEAD -> {}",
            self.paint(&state.current_branch, Color::Magenta),
            self.paint(head, Color::Green)
        );

        for area in Area::ALL {
            let touched = flow.is_some_and(|f| f.from == area || f.to == area);
            let marker = if touched { "▶" } else { " " };
            let items = self.area_items(state, area);
            let title = format!("{} ({})", area.label(), area.subtitle());
            let _ = writeln!(out, "{marker} {:<24} {items}", self.paint(&title, area_color(area)));
        }

        if let Some(flow) = flow {
            let _ = writeln!(
                out,
                "⚡ 正在执行动画演练... {} ──[{}]──▶ {}",
                flow.from.label(),
                self.paint(flow.label, area_color(flow.to)),
                flow.to.label()
            );
        } else if let Some(cmd) = animating {
            let _ = writeln!(out, "⚡ 正在执行 {}...", cmd.name);
        }
        out
    }

    fn area_items(&self, state: &RepositoryState, area: Area) -> String {
        let items: Vec<&str> = match area {
            Area::Working => state.working_files.iter().map(String::as_str).collect(),
            Area::Staging => state.staged_files.iter().map(String::as_str).collect(),
            Area::Local => recent_hashes(&state.local_commits),
            Area::Remote => recent_hashes(&state.remote_commits),
        };
        if items.is_empty() {
            self.dim(EMPTY)
        } else {
            items.join("  ")
        }
    }

    /// Static details plus the explanation slot for `command`.
    #[must_use]
    pub fn explanation_card(
        &self,
        command: &CommandMeta,
        status: Option<&ExplanationStatus>,
    ) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}  {}", self.paint(command.name, Color::White), command.description);
        let _ = writeln!(out, "  {}", command.details);
        let body = match status {
            None => "点击命令后，我将为你生成实时解说...".to_string(),
            Some(ExplanationStatus::Pending) => self.dim("AI 解说生成中..."),
            Some(ExplanationStatus::Ready(text) | ExplanationStatus::Fallback(text)) => text.clone(),
        };
        let _ = writeln!(out, "  {} {body}", self.paint("AI 深度解说:", Color::Green));
        out
    }

    /// The terminal log panel.
    #[must_use]
    pub fn log(&self, lines: &[String]) -> String {
        lines.iter().fold(String::new(), |mut out, line| {
            let _ = writeln!(out, "{} {line}", self.paint("❯", Color::Blue));
            out
        })
    }

    /// Every catalog command grouped by category.
    #[must_use]
    pub fn catalog(&self) -> String {
        let mut out = String::new();
        for category in Category::ALL {
            let _ = writeln!(out, "{}", self.paint(category.title(), Color::Cyan));
            for cmd in in_category(category) {
                let _ = writeln!(out, "  {:<12} {}", cmd.name, cmd.description);
            }
        }
        out
    }
}

fn recent_hashes(commits: &[crate::model::Commit]) -> Vec<&str> {
    let skip = commits.len().saturating_sub(VISIBLE_COMMITS);
    commits[skip..].iter().map(|c| c.hash.as_str()).collect()
}

fn area_color(area: Area) -> Color {
    match area {
        Area::Working => Color::Red,
        Area::Staging => Color::Yellow,
        Area::Local => Color::Blue,
        Area::Remote => Color::Green,
    }
}
