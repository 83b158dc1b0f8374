//! Cassette format for recording and replaying port interactions.
//!
//! A cassette captures every clock reading, generated id and LLM completion
//! of one run, so that a session can be replayed byte-for-byte later.

pub mod format;
pub mod recorder;
pub mod replayer;

pub use format::{Cassette, Interaction};
pub use recorder::CassetteRecorder;
pub use replayer::CassetteReplayer;

use std::path::Path;

/// Loads a cassette from a YAML file.
///
/// # Errors
///
/// Returns an error string if the file cannot be read or parsed.
pub fn load(path: &Path) -> Result<Cassette, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
    serde_yaml::from_str(&content)
        .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))
}
