use std::future::Future;
use std::sync::{atomic::AtomicBool, atomic::Ordering, Arc};
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;

use crate::config::JudgeApiConfig;
use crate::error::{parse_error_message, JudgeApiError};
use crate::headers::build_headers;
use crate::payload::{SubmissionRequest, SubmissionResponse};
use crate::url::normalize_submissions_url;
use crate::verdict::{classify_submission, Verdict};

/// Optional cancellation signal shared with the submission future.
pub type CancellationSignal = Arc<AtomicBool>;

const CANCEL_POLL_INTERVAL: Duration = Duration::from_millis(25);

#[derive(Debug)]
pub struct JudgeApiClient {
    http: Client,
    config: JudgeApiConfig,
}

impl JudgeApiClient {
    pub fn new(config: JudgeApiConfig) -> Result<Self, JudgeApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(JudgeApiError::from)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &JudgeApiConfig {
        &self.config
    }

    pub fn normalized_endpoint(&self) -> String {
        normalize_submissions_url(&self.config.base_url)
    }

    pub fn build_headers(&self) -> Result<HeaderMap, JudgeApiError> {
        let headers = build_headers(&self.config)?;
        let mut out = HeaderMap::new();
        for (key, value) in headers {
            out.insert(
                HeaderName::from_bytes(key.as_bytes())
                    .map_err(|_| JudgeApiError::InvalidHeader(format!("invalid header key: {key}")))?,
                HeaderValue::from_str(&value).map_err(|_| {
                    JudgeApiError::InvalidHeader(format!("invalid header value for {key}"))
                })?,
            );
        }
        Ok(out)
    }

    pub fn build_request(
        &self,
        request: &SubmissionRequest,
    ) -> Result<reqwest::RequestBuilder, JudgeApiError> {
        let headers = self.build_headers()?;
        Ok(self
            .http
            .post(self.normalized_endpoint())
            .headers(headers)
            .json(request))
    }

    /// Sends one submission and waits for its terminal status.
    ///
    /// Non-success HTTP statuses become [`JudgeApiError::Status`] carrying the
    /// parsed error message. The request is never retried.
    pub async fn submit(
        &self,
        request: &SubmissionRequest,
        cancellation: Option<&CancellationSignal>,
    ) -> Result<SubmissionResponse, JudgeApiError> {
        if is_cancelled(cancellation) {
            return Err(JudgeApiError::Cancelled);
        }

        let pending = self.build_request(request)?.send();
        let response = await_or_cancel(pending, cancellation)
            .await?
            .map_err(JudgeApiError::from)?;

        let status = response.status();
        let body = await_or_cancel(response.text(), cancellation)
            .await?
            .map_err(JudgeApiError::from)?;

        if !status.is_success() {
            return Err(JudgeApiError::Status(
                status,
                parse_error_message(status, &body),
            ));
        }

        serde_json::from_str::<SubmissionResponse>(&body).map_err(JudgeApiError::from)
    }

    /// Submits and classifies the response into a [`Verdict`].
    pub async fn execute(
        &self,
        request: &SubmissionRequest,
        cancellation: Option<&CancellationSignal>,
    ) -> Result<Verdict, JudgeApiError> {
        let response = self.submit(request, cancellation).await?;
        Ok(classify_submission(&response))
    }
}

fn is_cancelled(cancel: Option<&CancellationSignal>) -> bool {
    cancel.is_some_and(|token| token.load(Ordering::Acquire))
}

async fn await_or_cancel<F>(
    future: F,
    cancellation: Option<&CancellationSignal>,
) -> Result<F::Output, JudgeApiError>
where
    F: Future,
{
    if cancellation.is_none() {
        return Ok(future.await);
    }

    let mut future = Box::pin(future);

    loop {
        if is_cancelled(cancellation) {
            return Err(JudgeApiError::Cancelled);
        }

        if let Ok(output) = tokio::time::timeout(CANCEL_POLL_INTERVAL, &mut future).await {
            if is_cancelled(cancellation) {
                return Err(JudgeApiError::Cancelled);
            }
            return Ok(output);
        }
    }
}
