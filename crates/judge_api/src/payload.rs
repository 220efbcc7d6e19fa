use serde::{Deserialize, Serialize};

/// Request payload for one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRequest {
    pub language_id: u32,
    pub source_code: String,
    pub stdin: String,
    /// Always sent; `null` disables server-side output comparison.
    pub expected_output: Option<String>,
}

impl SubmissionRequest {
    pub fn new(language_id: u32, source_code: impl Into<String>, stdin: impl Into<String>) -> Self {
        Self {
            language_id,
            source_code: source_code.into(),
            stdin: stdin.into(),
            expected_output: None,
        }
    }
}

/// Status block attached to a finished submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionStatus {
    pub id: u32,
    #[serde(default)]
    pub description: String,
}

/// Response body of a synchronous (`wait=true`) submission.
///
/// Every field is optional on the wire; unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmissionResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub stdout: Option<String>,
    #[serde(default)]
    pub stderr: Option<String>,
    #[serde(default)]
    pub compile_output: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// Wall time in seconds, encoded as a decimal string.
    #[serde(default)]
    pub time: Option<String>,
    /// Peak memory in kilobytes.
    #[serde(default)]
    pub memory: Option<u64>,
    #[serde(default)]
    pub status: Option<SubmissionStatus>,
}

impl SubmissionResponse {
    #[must_use]
    pub fn status_id(&self) -> Option<u32> {
        self.status.as_ref().map(|status| status.id)
    }

    #[must_use]
    pub fn time_secs(&self) -> Option<f64> {
        self.time
            .as_deref()
            .and_then(|value| value.trim().parse::<f64>().ok())
    }
}
