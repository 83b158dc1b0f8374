//! `gitmotion simulate` command.

use std::io::Write;

use crate::context::ServiceContext;
use crate::model::RepositoryState;
use crate::render::Renderer;
use crate::transition::apply_command;

use super::resolve;

/// Execute the `simulate` command.
///
/// Folds the reducer over `commands` starting from the seed state, without
/// animation delay, and prints the result to stdout.
///
/// # Errors
///
/// Returns an error string if a command is not in the catalog or output fails.
pub fn run(
    ctx: &ServiceContext,
    renderer: Renderer,
    commands: &[String],
    json: bool,
    steps: bool,
) -> Result<(), String> {
    let stdout = std::io::stdout();
    simulate(ctx, renderer, commands, json, steps, &mut stdout.lock())
}

fn simulate<W: Write>(
    ctx: &ServiceContext,
    renderer: Renderer,
    commands: &[String],
    json: bool,
    steps: bool,
    out: &mut W,
) -> Result<(), String> {
    let metas = commands.iter().map(|c| resolve(c)).collect::<Result<Vec<_>, _>>()?;
    let write_err = |e: std::io::Error| format!("write error: {e}");

    let mut state = RepositoryState::seed();
    for meta in metas {
        state = apply_command(&state, meta.id, &*ctx.clock, &*ctx.id_gen);
        if steps {
            writeln!(out, "$ {}", meta.name).map_err(write_err)?;
            write!(out, "{}", renderer.board(&state, None)).map_err(write_err)?;
            writeln!(out).map_err(write_err)?;
        }
    }

    if json {
        let body = serde_json::to_string_pretty(&state)
            .map_err(|e| format!("failed to serialize state: {e}"))?;
        writeln!(out, "{body}").map_err(write_err)?;
    } else if !steps {
        write!(out, "{}", renderer.board(&state, None)).map_err(write_err)?;
    }
    Ok(())
}
