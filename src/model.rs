//! Simplified repository state shown across the four areas.

use serde::{Deserialize, Serialize};

/// Branch every simulated repository starts on.
pub const DEFAULT_BRANCH: &str = "main";

/// One of the four places data can live in the walkthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Area {
    /// Files being edited, not yet tracked for commit.
    Working,
    /// Files marked for the next commit.
    Staging,
    /// Commits on the learner's machine.
    Local,
    /// Commits on the server.
    Remote,
}

impl Area {
    /// All areas in left-to-right display order.
    pub const ALL: [Area; 4] = [Area::Working, Area::Staging, Area::Local, Area::Remote];

    /// Chinese display label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Area::Working => "工作区",
            Area::Staging => "暂存区",
            Area::Local => "本地仓库",
            Area::Remote => "远程仓库",
        }
    }

    /// English subtitle.
    #[must_use]
    pub fn subtitle(self) -> &'static str {
        match self {
            Area::Working => "Working Dir",
            Area::Staging => "Staging Area",
            Area::Local => "Local Repo",
            Area::Remote => "Remote Repo",
        }
    }
}

/// A named, hashed snapshot record. Carries no content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commit {
    /// Creation-order token.
    pub id: String,
    /// Free-text description.
    pub message: String,
    /// Short synthetic identifier, not a content hash.
    pub hash: String,
    /// Branch the commit was made on.
    pub branch: String,
    /// Prior commit, if recorded. Transitions never read it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl Commit {
    /// Builds a parentless commit.
    pub fn new(
        id: impl Into<String>,
        message: impl Into<String>,
        hash: impl Into<String>,
        branch: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
            hash: hash.into(),
            branch: branch.into(),
            parent_id: None,
        }
    }
}

/// The whole simulated repository. Replaced wholesale by every transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryState {
    /// Files in the working directory, in display order.
    pub working_files: Vec<String>,
    /// Files staged for the next commit, in staging order.
    pub staged_files: Vec<String>,
    /// Local history, oldest first.
    pub local_commits: Vec<Commit>,
    /// Remote history, oldest first.
    pub remote_commits: Vec<Commit>,
    /// Active branch.
    pub current_branch: String,
}

impl RepositoryState {
    /// The state every session starts from and `reset` returns to.
    #[must_use]
    pub fn seed() -> Self {
        let initial = Commit::new("1", "Initial commit", "a1b2c3d", DEFAULT_BRANCH);
        Self {
            working_files: files(&["main.py", "style.css", "app.js"]),
            staged_files: Vec::new(),
            local_commits: vec![initial.clone()],
            remote_commits: vec![initial],
            current_branch: DEFAULT_BRANCH.to_string(),
        }
    }

    /// Tip of the local history, shown as `HEAD`.
    #[must_use]
    pub fn head(&self) -> Option<&Commit> {
        self.local_commits.last()
    }
}

impl Default for RepositoryState {
    fn default() -> Self {
        Self::seed()
    }
}

pub(crate) fn files(names: &[&str]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}
