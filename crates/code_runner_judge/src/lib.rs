//! Judge-backed implementation of the shared `code_runner` contract.
//!
//! This adapter translates `judge_api` verdicts into the `RunEvent`
//! lifecycle the interview editor consumes.

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use code_runner::{
    CancelSignal, CodeRunner, ExecutionOutcome, ExecutionRequest, RunEvent, RunnerInitError,
    RunnerProfile,
};
use judge_api::{JudgeApiClient, JudgeApiConfig, JudgeApiError, SubmissionRequest, Verdict};
use tracing::{debug, warn};

/// Stable runner identifier used by startup selection.
pub const JUDGE_RUNNER_ID: &str = "judge";

/// Runtime configuration for the judge runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JudgeRunnerConfig {
    pub api_key: String,
    pub base_url: Option<String>,
    pub api_host: Option<String>,
    pub timeout: Option<Duration>,
}

impl JudgeRunnerConfig {
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
            api_host: None,
            timeout: None,
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    #[must_use]
    pub fn with_api_host(mut self, api_host: impl Into<String>) -> Self {
        self.api_host = Some(api_host.into());
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn into_judge_api_config(self) -> JudgeApiConfig {
        let mut config = JudgeApiConfig::new(self.api_key);

        if let Some(base_url) = self.base_url {
            config = config.with_base_url(base_url);
        }

        if let Some(api_host) = self.api_host {
            config = config.with_api_host(api_host);
        }

        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }

        config
    }
}

trait Submitter: Send + Sync {
    fn endpoint(&self) -> String;

    fn execute(
        &self,
        request: &SubmissionRequest,
        cancel: &CancelSignal,
    ) -> Result<Verdict, JudgeApiError>;
}

#[derive(Debug)]
struct DefaultSubmitter {
    client: JudgeApiClient,
}

impl Submitter for DefaultSubmitter {
    fn endpoint(&self) -> String {
        self.client.normalized_endpoint()
    }

    fn execute(
        &self,
        request: &SubmissionRequest,
        cancel: &CancelSignal,
    ) -> Result<Verdict, JudgeApiError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|error| {
                JudgeApiError::Unknown(format!("failed to initialize tokio runtime: {error}"))
            })?;

        runtime.block_on(self.client.execute(request, Some(cancel)))
    }
}

/// `CodeRunner` adapter backed by `judge_api` transport primitives.
pub struct JudgeRunner {
    submitter: Arc<dyn Submitter>,
}

impl JudgeRunner {
    /// Creates a runner using real HTTP transport.
    pub fn new(config: JudgeRunnerConfig) -> Result<Self, RunnerInitError> {
        if config.api_key.trim().is_empty() {
            return Err(RunnerInitError::new(
                "Failed to initialize judge runner: api key is required",
            ));
        }

        let submitter = Arc::new(DefaultSubmitter {
            client: JudgeApiClient::new(config.into_judge_api_config()).map_err(map_init_error)?,
        });

        Ok(Self { submitter })
    }

    #[cfg(test)]
    fn with_submitter_for_tests(submitter: Arc<dyn Submitter>) -> Self {
        Self { submitter }
    }
}

impl CodeRunner for JudgeRunner {
    fn profile(&self) -> RunnerProfile {
        RunnerProfile {
            runner_id: JUDGE_RUNNER_ID.to_string(),
            endpoint: Some(self.submitter.endpoint()),
        }
    }

    fn run(
        &self,
        req: ExecutionRequest,
        cancel: CancelSignal,
        emit: &mut dyn FnMut(RunEvent),
    ) -> Result<(), String> {
        let run_id = req.run_id;

        emit(RunEvent::Started { run_id });

        if cancel.load(Ordering::Acquire) {
            emit(RunEvent::Cancelled { run_id });
            return Ok(());
        }

        let request = SubmissionRequest::new(req.language_id, req.source_code, req.stdin);
        debug!(run_id, language_id = request.language_id, "submitting code");

        match self.submitter.execute(&request, &cancel) {
            Ok(verdict) => emit(RunEvent::Finished {
                run_id,
                outcome: outcome_from_verdict(verdict),
            }),
            Err(JudgeApiError::Cancelled) => emit(RunEvent::Cancelled { run_id }),
            Err(error) => {
                warn!(run_id, %error, "code execution request failed");
                emit(RunEvent::Failed {
                    run_id,
                    error: format!("Code execution request failed: {error}"),
                });
            }
        }

        Ok(())
    }
}

fn outcome_from_verdict(verdict: Verdict) -> ExecutionOutcome {
    match verdict {
        Verdict::Accepted {
            stdout,
            time_secs,
            memory_kb,
        } => ExecutionOutcome::Accepted {
            stdout,
            time_secs,
            memory_kb,
        },
        Verdict::TimeLimitExceeded => ExecutionOutcome::TimeLimitExceeded,
        Verdict::CompileError { compile_output } => {
            ExecutionOutcome::CompileError { compile_output }
        }
        Verdict::RuntimeError { stderr } => ExecutionOutcome::RuntimeError { stderr },
        Verdict::Other { stdout, .. } => ExecutionOutcome::Other { stdout },
    }
}

fn map_init_error(error: JudgeApiError) -> RunnerInitError {
    RunnerInitError::new(format!("Failed to initialize judge runner: {error}"))
}
