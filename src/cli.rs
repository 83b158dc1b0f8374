//! CLI argument definitions.

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `gitmotion`.
#[derive(Debug, Parser)]
#[command(
    name = "gitmotion",
    version,
    about = "Watch Git move data between the working tree, index, local and remote repositories"
)]
pub struct Cli {
    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every Git command the walkthrough knows.
    List,
    /// Apply Git commands to the starting repository and show the result.
    Simulate {
        /// Command ids or names, applied in order (e.g. `add commit push`).
        commands: Vec<String>,
        /// Print the final state as JSON.
        #[arg(long, conflicts_with = "steps")]
        json: bool,
        /// Print the four areas after every command.
        #[arg(long)]
        steps: bool,
    },
    /// Explain one Git command in plain language.
    Explain {
        /// Command id or name (e.g. `add` or "git add").
        command: String,
    },
    /// Interactive walkthrough reading commands from stdin.
    Play {
        /// Animation delay in milliseconds (overrides GITMOTION_ANIMATION_MS).
        #[arg(long)]
        delay_ms: Option<u64>,
    },
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::Parser;

    #[test]
    fn parses_simulate_with_commands() {
        let cli = Cli::parse_from(["gitmotion", "simulate", "add", "commit", "--json"]);
        match cli.command {
            Command::Simulate { commands, json, steps } => {
                assert_eq!(commands, ["add", "commit"]);
                assert!(json);
                assert!(!steps);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn json_and_steps_conflict() {
        assert!(Cli::try_parse_from(["gitmotion", "simulate", "--json", "--steps"]).is_err());
    }

    #[test]
    fn parses_play_delay_and_global_flag() {
        let cli = Cli::parse_from(["gitmotion", "play", "--delay-ms", "0", "--no-color"]);
        assert!(cli.no_color);
        assert!(matches!(cli.command, Command::Play { delay_ms: Some(0) }));
    }

    #[test]
    fn explain_requires_a_command() {
        assert!(Cli::try_parse_from(["gitmotion", "explain"]).is_err());
    }
}
