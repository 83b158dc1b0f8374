//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the simulation core and
//! something nondeterministic (wall-clock time, random identifiers, the
//! explanation model). Implementations live in `src/adapters/`.

pub mod clock;
pub mod id_gen;
pub mod llm;

pub use clock::Clock;
pub use id_gen::IdGenerator;
pub use llm::{CompletionRequest, CompletionResponse, LlmClient, LlmError, LlmFuture};
