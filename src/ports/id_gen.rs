//! ID generator port for producing unique identifiers.

/// Generates unique identifiers.
///
/// Synthetic commit hashes are cut from these identifiers; a predictable
/// sequence during tests and cassette playback gives predictable hashes.
pub trait IdGenerator: Send + Sync {
    /// Generates a new unique identifier string.
    fn generate_id(&self) -> String;
}
