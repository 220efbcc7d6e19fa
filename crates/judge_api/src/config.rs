use std::collections::BTreeMap;
use std::time::Duration;

use crate::url::DEFAULT_JUDGE_BASE_URL;

/// Transport configuration for submission requests.
#[derive(Debug, Clone)]
pub struct JudgeApiConfig {
    /// Key sent in `X-RapidAPI-Key`.
    pub api_key: String,
    /// Base URL of the execution service.
    pub base_url: String,
    /// Optional `X-RapidAPI-Host` override; derived from `base_url` when unset.
    pub api_host: Option<String>,
    /// Additional headers merged into request headers.
    pub extra_headers: BTreeMap<String, String>,
    /// Optional request timeout.
    pub timeout: Option<Duration>,
}

impl Default for JudgeApiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_JUDGE_BASE_URL.to_string(),
            api_host: None,
            extra_headers: BTreeMap::new(),
            timeout: None,
        }
    }
}

impl JudgeApiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_api_host(mut self, api_host: impl Into<String>) -> Self {
        self.api_host = Some(api_host.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn insert_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(key.into(), value.into());
        self
    }
}
