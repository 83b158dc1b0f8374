//! `gitmotion list` command.

use crate::render::Renderer;

/// Execute the `list` command: print the catalog grouped by category.
///
/// # Errors
///
/// Never fails; the signature matches the other handlers.
pub fn run(renderer: Renderer) -> Result<(), String> {
    print!("{}", renderer.catalog());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_command_runs() {
        assert!(run(Renderer::new(false)).is_ok());
    }
}
