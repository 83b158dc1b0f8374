//! Runtime settings read from the environment.
//!
//! `main` loads a `.env` file first (via `dotenvy`), so every key below can
//! also live there.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::adapters::live::llm::DEFAULT_API_BASE;

/// Model asked for explanations unless overridden.
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
/// Output budget for one explanation.
pub const DEFAULT_MAX_TOKENS: u32 = 1024;
/// How long a command "animates" before its transition lands.
pub const DEFAULT_ANIMATION: Duration = Duration::from_millis(1200);

/// Invalid configuration value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was set but could not be parsed.
    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        /// Environment variable name.
        key: &'static str,
        /// Raw value found.
        value: String,
        /// What was expected.
        reason: &'static str,
    },
    /// Recording and replaying were both requested.
    #[error("GITMOTION_RECORD and GITMOTION_REPLAY cannot be set together")]
    RecordAndReplay,
}

/// Effective settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Key for the explanation service; `None` makes every explanation fall back.
    pub api_key: Option<String>,
    /// Model id sent with each request.
    pub model: String,
    /// Base URL of the generative language API.
    pub api_base: String,
    /// Output token budget per explanation.
    pub max_tokens: u32,
    /// Delay between issuing a command and applying its transition.
    pub animation_delay: Duration,
    /// Write every port interaction to this cassette.
    pub record: Option<PathBuf>,
    /// Serve every port interaction from this cassette.
    pub replay: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            animation_delay: DEFAULT_ANIMATION,
            record: None,
            replay: None,
        }
    }
}

impl Settings {
    /// Reads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable does not parse or if recording
    /// and replaying are both requested.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, treating empty values as unset.
    ///
    /// # Errors
    ///
    /// See [`Settings::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let max_tokens = match get("GITMOTION_MAX_TOKENS") {
            Some(raw) => match raw.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "GITMOTION_MAX_TOKENS",
                        value: raw,
                        reason: "expected a positive integer",
                    })
                }
            },
            None => defaults.max_tokens,
        };

        let animation_delay = match get("GITMOTION_ANIMATION_MS") {
            Some(raw) => Duration::from_millis(raw.parse::<u64>().map_err(|_| {
                ConfigError::Invalid {
                    key: "GITMOTION_ANIMATION_MS",
                    value: raw.clone(),
                    reason: "expected milliseconds",
                }
            })?),
            None => defaults.animation_delay,
        };

        let record = get("GITMOTION_RECORD").map(PathBuf::from);
        let replay = get("GITMOTION_REPLAY").map(PathBuf::from);
        if record.is_some() && replay.is_some() {
            return Err(ConfigError::RecordAndReplay);
        }

        Ok(Self {
            api_key: get("GITMOTION_API_KEY").or_else(|| get("GEMINI_API_KEY")),
            model: get("GITMOTION_MODEL").unwrap_or(defaults.model),
            api_base: get("GITMOTION_API_BASE").unwrap_or(defaults.api_base),
            max_tokens,
            animation_delay,
            record,
            replay,
        })
    }
}
