//! Recording adapters that capture interactions to cassettes.

pub mod clock;
pub mod id_gen;
pub mod llm;

pub use clock::RecordingClock;
pub use id_gen::RecordingIdGenerator;
pub use llm::RecordingLlmClient;

use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde_json::{json, Value};

use crate::cassette::recorder::CassetteRecorder;

/// Shared handle to the recorder every recording adapter writes into.
pub type SharedRecorder = Arc<Mutex<CassetteRecorder>>;

/// Record an interaction with a plain (non-Result) return value.
pub(crate) fn record_interaction<I, O>(
    recorder: &SharedRecorder,
    port: &str,
    method: &str,
    input: &I,
    output: &O,
) where
    I: Serialize,
    O: Serialize,
{
    let input = serde_json::to_value(input).unwrap_or_default();
    let output = serde_json::to_value(output).unwrap_or_default();

    let mut guard = recorder.lock().expect("recorder lock poisoned");
    guard.record(port, method, input, output);
}

/// Record a `Result<T, E>` interaction.
///
/// `Ok(v)` is stored as `{"ok": v}` and `Err(e)` as `{"err": e.to_string()}`;
/// the replaying adapters read the same shape back.
pub(crate) fn record_result<T, E, I>(
    recorder: &SharedRecorder,
    port: &str,
    method: &str,
    input: &I,
    result: &Result<T, E>,
) where
    T: Serialize,
    E: std::fmt::Display,
    I: Serialize,
{
    let output: Value = match result {
        Ok(v) => json!({ "ok": serde_json::to_value(v).unwrap_or_default() }),
        Err(e) => json!({ "err": e.to_string() }),
    };
    record_interaction(recorder, port, method, input, &output);
}
