//! Recording adapter for the `IdGenerator` port.

use std::sync::Arc;

use super::{record_interaction, SharedRecorder};
use crate::ports::IdGenerator;

/// Records generated ids while delegating to an inner implementation.
pub struct RecordingIdGenerator {
    inner: Arc<dyn IdGenerator>,
    recorder: SharedRecorder,
}

impl RecordingIdGenerator {
    /// Creates a new recording ID generator wrapping the given implementation.
    pub fn new(inner: Arc<dyn IdGenerator>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

impl IdGenerator for RecordingIdGenerator {
    fn generate_id(&self) -> String {
        let result = self.inner.generate_id();
        record_interaction(&self.recorder, "id_gen", "generate_id", &(), &result);
        result
    }
}
