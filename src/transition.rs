//! The reducer mapping `(state, command id)` to the next state.
//!
//! Only six commands move data in the model; every other id, known to the
//! catalog or not, leaves the state untouched. The clock and id-generator
//! ports are the only sources of variation, so fixed or replayed ports make
//! every transition reproducible.

use tracing::debug;

use crate::model::{files, Area, Commit, RepositoryState, DEFAULT_BRANCH};
use crate::ports::{Clock, IdGenerator};

/// File a `pull` brings into the working directory.
pub const PULLED_FILE: &str = "update.ts";

/// Message given to every simulated commit.
pub const COMMIT_MESSAGE: &str = "新提交";

/// Length of the synthetic commit hash.
pub const SHORT_HASH_LEN: usize = 7;

/// Commands that change the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Stage the first working file.
    Add,
    /// Record staged files as a new local commit.
    Commit,
    /// Overwrite the remote history with the local one.
    Push,
    /// Overwrite the local history with the remote one.
    Pull,
    /// Start over from a fixed remote.
    Clone,
    /// Start over from the seed with a single file.
    Init,
}

impl Transition {
    /// Parses a command id. Ids without a simulated effect yield `None`.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "add" => Some(Self::Add),
            "commit" => Some(Self::Commit),
            "push" => Some(Self::Push),
            "pull" => Some(Self::Pull),
            "clone" => Some(Self::Clone),
            "init" => Some(Self::Init),
            _ => None,
        }
    }
}

/// Animated movement of data between two areas while a command plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flow {
    /// Area the data leaves.
    pub from: Area,
    /// Area the data arrives in.
    pub to: Area,
    /// Caption on the moving token.
    pub label: &'static str,
}

/// The flow to animate for `command_id`, if it has one.
///
/// `fetch` and `restore` animate even though the model has no transition
/// for them.
#[must_use]
pub fn flow_for(command_id: &str) -> Option<Flow> {
    let (from, to, label) = match command_id {
        "add" => (Area::Working, Area::Staging, "Stage"),
        "commit" => (Area::Staging, Area::Local, "Commit"),
        "push" => (Area::Local, Area::Remote, "Push"),
        "pull" => (Area::Remote, Area::Working, "Pull"),
        "fetch" => (Area::Remote, Area::Local, "Fetch"),
        "restore" => (Area::Staging, Area::Working, "Restore"),
        "clone" => (Area::Remote, Area::Local, "Clone"),
        _ => return None,
    };
    Some(Flow { from, to, label })
}

/// Applies `command_id` to `state` and returns the resulting state.
///
/// Unknown ids and unmet preconditions (nothing to add, nothing staged)
/// return an equal copy of `state`.
#[must_use]
pub fn apply_command(
    state: &RepositoryState,
    command_id: &str,
    clock: &dyn Clock,
    id_gen: &dyn IdGenerator,
) -> RepositoryState {
    let Some(transition) = Transition::from_id(command_id) else {
        return state.clone();
    };

    let mut next = state.clone();
    match transition {
        Transition::Add => {
            if !next.working_files.is_empty() {
                let file = next.working_files.remove(0);
                debug!(%file, "staging file");
                next.staged_files.push(file);
            }
        }
        Transition::Commit => {
            if !next.staged_files.is_empty() {
                let commit = Commit::new(
                    clock.now().timestamp_millis().to_string(),
                    COMMIT_MESSAGE,
                    short_hash(&id_gen.generate_id()),
                    next.current_branch.clone(),
                );
                debug!(hash = %commit.hash, files = next.staged_files.len(), "recording commit");
                next.local_commits.push(commit);
                next.staged_files.clear();
            }
        }
        Transition::Push => next.remote_commits.clone_from(&state.local_commits),
        Transition::Pull => {
            next.local_commits.clone_from(&state.remote_commits);
            if !next.working_files.iter().any(|f| f == PULLED_FILE) {
                next.working_files.push(PULLED_FILE.to_string());
            }
        }
        Transition::Clone => next = cloned_state(),
        Transition::Init => {
            next = RepositoryState {
                working_files: files(&["README.md"]),
                ..RepositoryState::seed()
            };
        }
    }
    next
}

fn cloned_state() -> RepositoryState {
    let origin = Commit::new("rem-1", "Origin", "777aaaa", DEFAULT_BRANCH);
    RepositoryState {
        working_files: files(&["README.md", "main.ts"]),
        staged_files: Vec::new(),
        local_commits: vec![origin.clone()],
        remote_commits: vec![origin],
        current_branch: DEFAULT_BRANCH.to_string(),
    }
}

/// Cuts a short lowercase alphanumeric hash out of a raw identifier.
#[must_use]
pub fn short_hash(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .take(SHORT_HASH_LEN)
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::test_support::{FixedClock, SequentialIds};

    fn apply(state: &RepositoryState, id: &str) -> RepositoryState {
        apply_command(state, id, &FixedClock::default(), &SequentialIds::default())
    }

    fn apply_all(ids: &[&str]) -> RepositoryState {
        let clock = FixedClock::default();
        let ids_gen = SequentialIds::default();
        ids.iter()
            .fold(RepositoryState::seed(), |state, id| apply_command(&state, id, &clock, &ids_gen))
    }

    #[test]
    fn add_moves_first_working_file_to_end_of_staging() {
        let state = apply_all(&["add", "add"]);
        assert_eq!(state.working_files, ["app.js"]);
        assert_eq!(state.staged_files, ["main.py", "style.css"]);
    }

    #[test]
    fn add_only_moves_one_copy_of_duplicated_names() {
        let mut state = RepositoryState::seed();
        state.working_files = files(&["a.rs", "a.rs"]);
        let next = apply(&state, "add");
        assert_eq!(next.working_files, ["a.rs"]);
        assert_eq!(next.staged_files, ["a.rs"]);
    }

    #[test]
    fn add_on_empty_working_directory_is_noop() {
        let mut state = RepositoryState::seed();
        state.working_files.clear();
        assert_eq!(apply(&state, "add"), state);
    }

    #[test]
    fn commit_records_staged_files_on_current_branch() {
        let state = apply_all(&["add", "commit"]);
        assert!(state.staged_files.is_empty());
        assert_eq!(state.local_commits.len(), 2);

        let commit = &state.local_commits[1];
        assert_eq!(commit.id, "1700000000000");
        assert_eq!(commit.message, COMMIT_MESSAGE);
        assert_eq!(commit.hash, "1111111");
        assert_eq!(commit.branch, "main");
        assert_eq!(state.remote_commits.len(), 1);
    }

    #[test]
    fn commit_with_nothing_staged_is_noop() {
        let seed = RepositoryState::seed();
        assert_eq!(apply(&seed, "commit"), seed);
    }

    #[test]
    fn push_then_pull_round_trips_history() {
        let pushed = apply_all(&["add", "commit", "push"]);
        assert_eq!(pushed.remote_commits, pushed.local_commits);

        let pulled = apply(&pushed, "pull");
        assert_eq!(pulled.local_commits, pushed.remote_commits);
        assert_eq!(pulled.working_files, ["style.css", "app.js", PULLED_FILE]);
    }

    #[test]
    fn push_discards_remote_only_commits() {
        let mut state = RepositoryState::seed();
        state.remote_commits.push(Commit::new("9", "teammate", "fffffff", "main"));
        let next = apply(&state, "push");
        assert_eq!(next.remote_commits, state.local_commits);
    }

    #[test]
    fn pull_adds_sentinel_file_only_once() {
        let state = apply_all(&["pull", "pull", "pull"]);
        let count = state.working_files.iter().filter(|f| *f == PULLED_FILE).count();
        assert_eq!(count, 1);
    }

    #[test]
    fn clone_yields_fixed_origin() {
        let state = apply_all(&["add", "clone"]);
        let origin = Commit::new("rem-1", "Origin", "777aaaa", "main");
        assert_eq!(state.remote_commits, vec![origin.clone()]);
        assert_eq!(state.local_commits, vec![origin]);
        assert_eq!(state.working_files, ["README.md", "main.ts"]);
        assert!(state.staged_files.is_empty());
    }

    #[test]
    fn init_resets_to_seed_with_single_readme() {
        let state = apply_all(&["add", "commit", "push", "init"]);
        let seed = RepositoryState::seed();
        assert_eq!(state.working_files, ["README.md"]);
        assert!(state.staged_files.is_empty());
        assert_eq!(state.local_commits, seed.local_commits);
        assert_eq!(state.remote_commits, seed.remote_commits);
    }

    #[test]
    fn catalog_only_commands_do_not_touch_state() {
        let state = apply_all(&["add"]);
        let ids = [
            "mv", "restore", "rm", "status", "log", "diff", "branch", "switch", "merge", "reset",
            "fetch", "bogus", "",
        ];
        for id in ids {
            assert_eq!(apply(&state, id), state, "{id} changed the state");
        }
    }

    #[test]
    fn flows_cover_animated_commands() {
        assert_eq!(
            flow_for("add"),
            Some(Flow {
                from: Area::Working,
                to: Area::Staging,
                label: "Stage",
            })
        );
        assert_eq!(flow_for("fetch").map(|f| (f.from, f.to)), Some((Area::Remote, Area::Local)));
        assert_eq!(flow_for("restore").map(|f| f.to), Some(Area::Working));
        assert!(flow_for("init").is_none());
        assert!(flow_for("status").is_none());
    }

    #[test]
    fn short_hash_keeps_seven_lowercase_alphanumerics() {
        assert_eq!(short_hash("9F-86-D0-81-88-4C-7D"), "9f86d08");
        assert_eq!(short_hash("ab"), "ab");
    }

    fn arb_state() -> impl Strategy<Value = RepositoryState> {
        let names = prop::collection::vec("[a-z]{1,6}\\.(rs|ts|md)", 0..6);
        let commits = prop::collection::vec("[0-9a-f]{7}", 0..4).prop_map(|hashes| {
            hashes
                .into_iter()
                .enumerate()
                .map(|(i, h)| Commit::new(i.to_string(), "msg", h, "main"))
                .collect::<Vec<_>>()
        });
        (names.clone(), names, commits.clone(), commits).prop_map(
            |(working_files, staged_files, local_commits, remote_commits)| RepositoryState {
                working_files,
                staged_files,
                local_commits,
                remote_commits,
                current_branch: "main".to_string(),
            },
        )
    }

    proptest! {
        #[test]
        fn add_preserves_the_file_multiset(state in arb_state()) {
            prop_assume!(!state.working_files.is_empty());
            let next = apply(&state, "add");
            prop_assert_eq!(next.working_files.len() + 1, state.working_files.len());
            prop_assert_eq!(next.staged_files.len(), state.staged_files.len() + 1);

            let mut before: Vec<_> =
                state.working_files.iter().chain(&state.staged_files).collect();
            let mut after: Vec<_> = next.working_files.iter().chain(&next.staged_files).collect();
            before.sort();
            after.sort();
            prop_assert_eq!(before, after);
        }

        #[test]
        fn commit_clears_staging_and_grows_history(state in arb_state()) {
            let next = apply(&state, "commit");
            if state.staged_files.is_empty() {
                prop_assert_eq!(next, state);
            } else {
                prop_assert!(next.staged_files.is_empty());
                prop_assert_eq!(next.local_commits.len(), state.local_commits.len() + 1);
            }
        }

        #[test]
        fn push_and_pull_copy_history(state in arb_state()) {
            let sentinels = |files: &[String]| files.iter().filter(|f| *f == PULLED_FILE).count();

            prop_assert_eq!(&apply(&state, "push").remote_commits, &state.local_commits);
            let pulled = apply(&apply(&state, "pull"), "pull");
            prop_assert_eq!(&pulled.local_commits, &state.remote_commits);
            prop_assert_eq!(
                sentinels(&pulled.working_files),
                sentinels(&state.working_files).max(1)
            );
        }

        #[test]
        fn init_resets_any_state_to_a_fresh_repository(state in arb_state()) {
            let next = apply(&state, "init");
            prop_assert_eq!(&next.working_files, &vec!["README.md".to_string()]);
            prop_assert!(next.staged_files.is_empty());
            prop_assert_eq!(&next.local_commits, &RepositoryState::seed().local_commits);
            prop_assert_eq!(&next.remote_commits, &RepositoryState::seed().remote_commits);
        }

        #[test]
        fn clone_discards_any_prior_state(state in arb_state()) {
            let next = apply(&state, "clone");
            prop_assert_eq!(&next, &cloned_state());
            prop_assert_eq!(&next.local_commits, &next.remote_commits);
            prop_assert_eq!(next.head().map(|c| c.hash.as_str()), Some("777aaaa"));
        }

        #[test]
        fn unknown_ids_are_ignored(state in arb_state(), id in "[A-Z]{1,8}") {
            prop_assert_eq!(apply(&state, &id), state);
        }
    }
}
