//! Runtime configuration for the quiz binary.
//!
//! Values come from, in increasing priority: built-in defaults, an optional
//! JSON file, `QUIZ_*` environment variables, and command-line flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use quiz_core::model::{DEFAULT_SECONDS_PER_QUESTION, SessionSettings, SettingsError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli::Args;

pub const ENV_SECONDS: &str = "QUIZ_SECONDS";
pub const ENV_BANK: &str = "QUIZ_BANK";
pub const ENV_DELAY_MS: &str = "QUIZ_DELAY_MS";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid {var} value: {raw}")]
    InvalidEnv { var: &'static str, raw: String },
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

const fn default_seconds_per_question() -> u32 {
    DEFAULT_SECONDS_PER_QUESTION
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizConfig {
    /// Countdown applied to every question.
    #[serde(default = "default_seconds_per_question")]
    pub seconds_per_question: u32,

    /// Show the explanation after an unanswered timeout.
    #[serde(default)]
    pub reveal_explanation_on_timeout: bool,

    /// Simulated latency of the question service; zero disables it.
    #[serde(default)]
    pub service_delay_ms: u64,

    /// JSON question bank; the built-in set is used when absent.
    #[serde(default)]
    pub bank: Option<PathBuf>,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            seconds_per_question: default_seconds_per_question(),
            reveal_explanation_on_timeout: false,
            service_delay_ms: 0,
            bank: None,
        }
    }
}

impl QuizConfig {
    /// Load from a JSON file, or defaults when no path is given.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Read` or `ConfigError::Parse` for a bad file.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply `QUIZ_*` overrides using `lookup` to read variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnv` for a non-numeric number.
    pub fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(raw) = lookup(ENV_SECONDS) {
            self.seconds_per_question = parse_env(ENV_SECONDS, raw)?;
        }
        if let Some(raw) = lookup(ENV_DELAY_MS) {
            self.service_delay_ms = parse_env(ENV_DELAY_MS, raw)?;
        }
        if let Some(raw) = lookup(ENV_BANK) {
            if !raw.trim().is_empty() {
                self.bank = Some(PathBuf::from(raw.trim()));
            }
        }
        Ok(())
    }

    pub fn apply_args(&mut self, args: &Args) {
        if let Some(seconds) = args.seconds {
            self.seconds_per_question = seconds;
        }
        if let Some(delay) = args.delay_ms {
            self.service_delay_ms = delay;
        }
        if let Some(bank) = &args.bank {
            self.bank = Some(bank.clone());
        }
        if args.reveal_on_timeout {
            self.reveal_explanation_on_timeout = true;
        }
    }

    /// Resolve the full configuration for a run.
    ///
    /// # Errors
    ///
    /// Propagates file and environment errors.
    pub fn resolve(
        args: &Args,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::load(args.config.as_deref())?;
        config.apply_env(lookup)?;
        config.apply_args(args);
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns `ConfigError::Settings` for a zero countdown.
    pub fn session_settings(&self) -> Result<SessionSettings, ConfigError> {
        Ok(SessionSettings::new(
            self.seconds_per_question,
            self.reveal_explanation_on_timeout,
        )?)
    }

    #[must_use]
    pub fn service_delay(&self) -> Duration {
        Duration::from_millis(self.service_delay_ms)
    }
}

fn parse_env<T: std::str::FromStr>(var: &'static str, raw: String) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidEnv { var, raw })
}
