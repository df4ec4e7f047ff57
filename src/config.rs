//! Environment-driven settings.
//!
//! Values come from the process environment, after a `.env` file in the
//! working directory (if any) has been merged in. CLI flags override them.

use std::path::PathBuf;

use crate::error::ConfigError;

/// Model used when `TECHTASKS_MODEL` is unset.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Completion budget used when `TECHTASKS_MAX_TOKENS` is unset.
pub const DEFAULT_MAX_TOKENS: u32 = 8192;

/// Runtime settings for a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Model identifier sent to the LLM (`TECHTASKS_MODEL`).
    pub model: String,
    /// Completion token budget (`TECHTASKS_MAX_TOKENS`).
    pub max_tokens: u32,
    /// Anthropic API key (`ANTHROPIC_API_KEY`).
    pub api_key: Option<String>,
    /// Directory to record port interactions into (`TECHTASKS_RECORD`).
    pub record_dir: Option<PathBuf>,
    /// Cassette serving LLM completions (`TECHTASKS_REPLAY_LLM`).
    pub replay_llm: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            api_key: None,
            record_dir: None,
            replay_llm: None,
        }
    }
}

impl Settings {
    /// Loads settings from `.env` and the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env is the normal case.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds settings from an arbitrary variable lookup.
    ///
    /// Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `TECHTASKS_MAX_TOKENS` is not a positive
    /// integer.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let max_tokens = match get("TECHTASKS_MAX_TOKENS") {
            None => defaults.max_tokens,
            Some(raw) => match raw.parse::<u32>() {
                Ok(0) => {
                    return Err(ConfigError {
                        var: "TECHTASKS_MAX_TOKENS",
                        value: raw,
                        reason: "must be greater than zero".into(),
                    })
                }
                Ok(n) => n,
                Err(e) => {
                    return Err(ConfigError {
                        var: "TECHTASKS_MAX_TOKENS",
                        value: raw,
                        reason: e.to_string(),
                    })
                }
            },
        };

        Ok(Self {
            model: get("TECHTASKS_MODEL").unwrap_or(defaults.model),
            max_tokens,
            api_key: get("ANTHROPIC_API_KEY"),
            record_dir: get("TECHTASKS_RECORD").map(PathBuf::from),
            replay_llm: get("TECHTASKS_REPLAY_LLM").map(PathBuf::from),
        })
    }
}
