//! `gitmotion explain` command.

use std::io::Write;
use std::sync::Arc;

use crate::config::Settings;
use crate::context::ServiceContext;
use crate::explain::{ExplanationStatus, Explainer};
use crate::render::Renderer;

use super::resolve;

/// Execute the `explain` command.
///
/// Prints the static details at once, then the model's explanation (or the
/// fallback) when it arrives.
///
/// # Errors
///
/// Returns an error string if the command is not in the catalog or output fails.
pub async fn run(
    ctx: &ServiceContext,
    settings: &Settings,
    renderer: Renderer,
    query: &str,
) -> Result<(), String> {
    let meta = resolve(query)?;
    let explainer = Arc::new(Explainer::from_settings(Arc::clone(&ctx.llm), settings));
    let mut out = std::io::stdout();
    let write_err = |e: std::io::Error| format!("write error: {e}");

    let task = explainer.spawn(meta.name);
    let card = renderer.explanation_card(meta, Some(&ExplanationStatus::Pending));
    write!(out, "{card}").map_err(write_err)?;
    out.flush().map_err(write_err)?;

    let status = task.wait().await;
    let text = match &status {
        ExplanationStatus::Ready(text) | ExplanationStatus::Fallback(text) => text.as_str(),
        ExplanationStatus::Pending => "",
    };
    writeln!(out, "{text}").map_err(write_err)?;
    Ok(())
}
