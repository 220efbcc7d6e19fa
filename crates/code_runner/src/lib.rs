//! Minimal runner-agnostic contract for executing one code submission.
//!
//! This crate defines only the shared run lifecycle and the outcome shape the
//! interview editor renders. It excludes transport details, HTTP payloads, and
//! any editor or session state.

use std::fmt;
use std::sync::{atomic::AtomicBool, Arc};

use serde::{Deserialize, Serialize};

/// Identifier for one code run.
pub type RunId = u64;

/// Shared cancellation flag for a run.
pub type CancelSignal = Arc<AtomicBool>;

/// Error returned while constructing/configuring a runner before any run starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerInitError {
    message: String,
}

impl RunnerInitError {
    /// Creates a new runner initialization error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the underlying error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for RunnerInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for RunnerInitError {}

impl From<String> for RunnerInitError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for RunnerInitError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// Input required to start one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionRequest {
    pub run_id: RunId,
    pub language_id: u32,
    pub source_code: String,
    pub stdin: String,
}

/// Terminal classification of one submission.
///
/// Each variant carries exactly the output field its status implies; callers
/// surface that field verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExecutionOutcome {
    Accepted {
        stdout: Option<String>,
        time_secs: Option<f64>,
        memory_kb: Option<u64>,
    },
    TimeLimitExceeded,
    CompileError {
        compile_output: Option<String>,
    },
    RuntimeError {
        stderr: String,
    },
    Other {
        stdout: Option<String>,
    },
}

impl ExecutionOutcome {
    /// Returns true only for a clean, accepted execution.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

/// Runner-emitted lifecycle event for a run.
#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    Started { run_id: RunId },
    Finished { run_id: RunId, outcome: ExecutionOutcome },
    Failed { run_id: RunId, error: String },
    Cancelled { run_id: RunId },
}

impl RunEvent {
    /// Returns the run identifier associated with this event.
    #[must_use]
    pub fn run_id(&self) -> RunId {
        match self {
            Self::Started { run_id }
            | Self::Finished { run_id, .. }
            | Self::Failed { run_id, .. }
            | Self::Cancelled { run_id } => *run_id,
        }
    }

    /// Returns true when this event terminates the run lifecycle.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Finished { .. } | Self::Failed { .. } | Self::Cancelled { .. }
        )
    }
}

/// Immutable metadata describing a runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerProfile {
    pub runner_id: String,
    pub endpoint: Option<String>,
}

/// Runner interface for executing one request.
pub trait CodeRunner: Send + Sync + 'static {
    /// Returns runner identity metadata.
    fn profile(&self) -> RunnerProfile;

    /// Executes a request and emits lifecycle events in order.
    ///
    /// Implementations emit `Started` first and exactly one terminal event.
    /// Returning `Err` without a terminal event is treated as `Failed` by the
    /// caller.
    fn run(
        &self,
        req: ExecutionRequest,
        cancel: CancelSignal,
        emit: &mut dyn FnMut(RunEvent),
    ) -> Result<(), String>;
}
