//! Command dispatch and handlers.

pub mod explain;
pub mod list;
pub mod play;
pub mod simulate;

use std::future::Future;
use std::io::IsTerminal;

use tracing::warn;

use crate::catalog::{self, CommandMeta};
use crate::cli::{Cli, Command};
use crate::config::Settings;
use crate::context::ServiceContext;
use crate::render::Renderer;

/// Dispatch a parsed command to its handler.
///
/// Ports are wired from the environment: `GITMOTION_RECORD=<file>` records
/// every port interaction to a cassette, `GITMOTION_REPLAY=<file>` serves
/// them from one.
///
/// # Errors
///
/// Returns an error string if configuration is invalid or the selected
/// command handler fails.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    let settings = Settings::from_env().map_err(|e| e.to_string())?;
    let ctx = ServiceContext::from_settings(&settings)?;
    let renderer = Renderer::new(!cli.no_color && std::io::stdout().is_terminal());

    let result = match &cli.command {
        Command::List => list::run(renderer),
        Command::Simulate { commands, json, steps } => {
            simulate::run(&ctx, renderer, commands, *json, *steps)
        }
        Command::Explain { command } => block_on(explain::run(&ctx, &settings, renderer, command)),
        Command::Play { delay_ms } => {
            let mut settings = settings.clone();
            if let Some(ms) = delay_ms {
                settings.animation_delay = std::time::Duration::from_millis(*ms);
            }
            let stdout = std::io::stdout();
            block_on(async {
                let stdin = tokio::io::BufReader::new(tokio::io::stdin());
                play::run(&ctx, &settings, renderer, stdin, stdout.lock()).await
            })
        }
    };

    // Save even when the command failed; a partial cassette still helps.
    match ctx.save_recording() {
        Ok(Some(path)) => eprintln!("Recording saved to: {}", path.display()),
        Ok(None) => {}
        Err(e) => warn!(error = %e, "failed to save recording"),
    }

    result
}

/// Resolves a user-supplied command id or name against the catalog.
///
/// # Errors
///
/// Returns an error string naming the unknown command.
pub fn resolve(query: &str) -> Result<&'static CommandMeta, String> {
    catalog::lookup(query)
        .ok_or_else(|| format!("unknown command {query:?}; run `gitmotion list` to see them all"))
}

/// Runs `future` to completion on a fresh single-threaded runtime.
fn block_on<F>(future: F) -> Result<(), String>
where
    F: Future<Output = Result<(), String>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to start async runtime: {e}"))?;
    let result = runtime.block_on(future);
    // A stdin read still parked on the blocking pool must not hold up exit.
    runtime.shutdown_background();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_accepts_names_and_rejects_strangers() {
        assert_eq!(resolve("git commit").map(|c| c.id), Ok("commit"));
        let err = resolve("stash").unwrap_err();
        assert!(err.contains("\"stash\""));
        assert!(err.contains("gitmotion list"));
    }
}
