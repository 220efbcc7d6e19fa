use serde::{Deserialize, Serialize};

use crate::payload::SubmissionResponse;

pub const STATUS_ACCEPTED: u32 = 3;
pub const STATUS_TIME_LIMIT_EXCEEDED: u32 = 5;
pub const STATUS_COMPILATION_ERROR: u32 = 6;

/// Classification of a finished submission by its status id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
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
        status_description: Option<String>,
    },
}

/// Classify a submission response.
///
/// Precedence: accepted, time limit, compile error, then any non-empty
/// `stderr` counts as a runtime error; everything else is `Other`.
pub fn classify_submission(response: &SubmissionResponse) -> Verdict {
    match response.status_id() {
        Some(STATUS_ACCEPTED) => Verdict::Accepted {
            stdout: response.stdout.clone(),
            time_secs: response.time_secs(),
            memory_kb: response.memory,
        },
        Some(STATUS_TIME_LIMIT_EXCEEDED) => Verdict::TimeLimitExceeded,
        Some(STATUS_COMPILATION_ERROR) => Verdict::CompileError {
            compile_output: response.compile_output.clone(),
        },
        _ => match response.stderr.as_deref().filter(|value| !value.is_empty()) {
            Some(stderr) => Verdict::RuntimeError {
                stderr: stderr.to_string(),
            },
            None => Verdict::Other {
                stdout: response.stdout.clone(),
                status_description: response
                    .status
                    .as_ref()
                    .map(|status| status.description.clone())
                    .filter(|value| !value.is_empty()),
            },
        },
    }
}
