//! Environment configuration.

use std::env;
use std::path::PathBuf;

pub const DEBUG_ENV_VAR: &str = "MOCK_INTERVIEW_DEBUG";
pub const LOG_FILTER_ENV_VAR: &str = "MOCK_INTERVIEW_LOG";
pub const QUESTIONS_ENV_VAR: &str = "MOCK_INTERVIEW_QUESTIONS";
pub const GESTURE_SEED_ENV_VAR: &str = "MOCK_INTERVIEW_GESTURE_SEED";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvConfig {
    pub debug: bool,
    pub log_filter: Option<String>,
    pub question_bank_path: Option<PathBuf>,
    pub gesture_seed: Option<u64>,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self {
            debug: env_flag(DEBUG_ENV_VAR),
            log_filter: env_string_opt(LOG_FILTER_ENV_VAR),
            question_bank_path: env_string_opt(QUESTIONS_ENV_VAR).map(PathBuf::from),
            gesture_seed: env_string_opt(GESTURE_SEED_ENV_VAR)
                .and_then(|value| value.trim().parse().ok()),
        }
    }

    /// Filter directive handed to the log subscriber.
    pub fn log_directive(&self) -> &str {
        match self.log_filter.as_deref() {
            Some(filter) => filter,
            None if self.debug => "debug",
            None => "info",
        }
    }
}

fn env_flag(key: &str) -> bool {
    env::var(key).map(|value| value == "1").unwrap_or(false)
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    })
}
