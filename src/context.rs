//! Service context bundling all port trait objects.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::{info, warn};

use crate::adapters::live::{LiveClock, LiveIdGenerator, LiveLlmClient};
use crate::adapters::recording::{
    RecordingClock, RecordingIdGenerator, RecordingLlmClient, SharedRecorder,
};
use crate::adapters::replaying::{ReplayingClock, ReplayingIdGenerator, ReplayingLlmClient};
use crate::cassette::{self, CassetteRecorder, CassetteReplayer};
use crate::config::Settings;
use crate::ports::{Clock, IdGenerator, LlmClient};

/// Bundles all port trait objects into a single context.
///
/// Ports are reference counted so background tasks spawned by a session can
/// hold on to them. Constructors wire up live, recording or replaying
/// adapters.
pub struct ServiceContext {
    /// Clock stamping new commits.
    pub clock: Arc<dyn Clock>,
    /// Source of synthetic commit hashes.
    pub id_gen: Arc<dyn IdGenerator>,
    /// Explanation model.
    pub llm: Arc<dyn LlmClient>,
    /// Cassette recorder; saved on drop.
    recorder: Option<SharedRecorder>,
}

impl ServiceContext {
    /// Picks live, recording or replaying adapters according to `settings`.
    ///
    /// # Errors
    ///
    /// Returns an error if a replay cassette cannot be loaded.
    pub fn from_settings(settings: &Settings) -> Result<Self, String> {
        if let Some(path) = &settings.replay {
            info!(path = %path.display(), "replaying port interactions");
            return Self::replaying(path);
        }
        if let Some(path) = &settings.record {
            info!(path = %path.display(), "recording port interactions");
            return Ok(Self::recording(settings, path));
        }
        Ok(Self::live(settings))
    }

    /// Creates a context backed by the real clock, random ids and the live
    /// explanation service.
    #[must_use]
    pub fn live(settings: &Settings) -> Self {
        Self {
            clock: Arc::new(LiveClock),
            id_gen: Arc::new(LiveIdGenerator::new()),
            llm: Arc::new(LiveLlmClient::new(&settings.api_base, settings.api_key.clone())),
            recorder: None,
        }
    }

    /// Creates a recording context that writes a cassette to `path`.
    ///
    /// Uses live adapters for actual work. The cassette is saved by
    /// [`ServiceContext::save_recording`] and again when the context drops.
    #[must_use]
    pub fn recording(settings: &Settings, path: &Path) -> Self {
        let recorder: SharedRecorder =
            Arc::new(Mutex::new(CassetteRecorder::new(path, "gitmotion-session")));
        let llm = LiveLlmClient::new(&settings.api_base, settings.api_key.clone());

        Self {
            clock: Arc::new(RecordingClock::new(Arc::new(LiveClock), Arc::clone(&recorder))),
            id_gen: Arc::new(RecordingIdGenerator::new(
                Arc::new(LiveIdGenerator::new()),
                Arc::clone(&recorder),
            )),
            llm: Arc::new(RecordingLlmClient::new(Arc::new(llm), Arc::clone(&recorder))),
            recorder: Some(recorder),
        }
    }

    /// Creates a replaying context from a cassette file.
    ///
    /// Each port gets its own replayer over the same cassette so per-port
    /// cursors are independent.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let cassette = cassette::load(path)?;
        Ok(Self {
            clock: Arc::new(ReplayingClock::new(CassetteReplayer::new(&cassette))),
            id_gen: Arc::new(ReplayingIdGenerator::new(CassetteReplayer::new(&cassette))),
            llm: Arc::new(ReplayingLlmClient::new(CassetteReplayer::new(&cassette))),
            recorder: None,
        })
    }

    /// Builds a context from explicit ports. Used by tests and embedders.
    #[must_use]
    pub fn with_ports(
        clock: Arc<dyn Clock>,
        id_gen: Arc<dyn IdGenerator>,
        llm: Arc<dyn LlmClient>,
    ) -> Self {
        Self {
            clock,
            id_gen,
            llm,
            recorder: None,
        }
    }

    /// Writes the cassette if this context is recording.
    ///
    /// # Errors
    ///
    /// Returns an error string if the cassette cannot be written.
    pub fn save_recording(&self) -> Result<Option<PathBuf>, String> {
        let Some(recorder) = &self.recorder else {
            return Ok(None);
        };
        let guard = recorder.lock().map_err(|e| format!("recorder lock poisoned: {e}"))?;
        guard
            .save()
            .map(|p| Some(p.to_path_buf()))
            .map_err(|e| format!("Failed to write cassette: {e}"))
    }
}

impl Drop for ServiceContext {
    fn drop(&mut self) {
        if let Err(e) = self.save_recording() {
            warn!("{e}");
        }
    }
}
