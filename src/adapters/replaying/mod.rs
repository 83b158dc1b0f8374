//! Replaying adapters that serve recorded interactions.

pub mod clock;
pub mod id_gen;
pub mod llm;

pub use clock::ReplayingClock;
pub use id_gen::ReplayingIdGenerator;
pub use llm::ReplayingLlmClient;

use std::sync::Mutex;

use serde_json::Value;

use crate::cassette::replayer::CassetteReplayer;

/// Pulls the next recorded output for `port::method`.
pub(crate) fn next_output(replayer: &Mutex<CassetteReplayer>, port: &str, method: &str) -> Value {
    let mut replayer = replayer.lock().expect("replayer lock poisoned");
    replayer.next_interaction(port, method).output.clone()
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::Utc;
    use serde_json::{json, Value};

    use crate::cassette::{Cassette, CassetteReplayer, Interaction};

    /// Builds a replayer whose interactions all target one port/method.
    pub fn replayer_for(port: &str, method: &str, outputs: Vec<Value>) -> CassetteReplayer {
        let interactions = outputs
            .into_iter()
            .enumerate()
            .map(|(seq, output)| Interaction {
                seq: seq as u64,
                port: port.into(),
                method: method.into(),
                input: json!(null),
                output,
            })
            .collect();
        CassetteReplayer::new(&Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            interactions,
        })
    }
}
