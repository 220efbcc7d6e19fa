//! Transport-only client primitives for a Judge0-compatible execution service.
//!
//! This crate owns request building, the single synchronous-wait submission
//! call, and verdict classification. It contains no editor state and no
//! knowledge of interview sessions.
//!
//! One submission is sent per call; failed submissions are never retried, so a
//! user's explicit run request maps to exactly one remote execution.

pub mod client;
pub mod config;
pub mod error;
pub mod headers;
pub mod payload;
pub mod url;
pub mod verdict;

pub use client::{CancellationSignal, JudgeApiClient};
pub use config::JudgeApiConfig;
pub use error::JudgeApiError;
pub use payload::{SubmissionRequest, SubmissionResponse, SubmissionStatus};
pub use url::normalize_submissions_url;
pub use verdict::{classify_submission, Verdict};
