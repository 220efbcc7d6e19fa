//! Deterministic mock implementation of the shared `code_runner` contract.
//!
//! This crate contains no transport logic and is intended for offline use of
//! the interview shell and for contract-level integration testing.

use std::collections::VecDeque;
use std::sync::atomic::Ordering;
use std::sync::{Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use code_runner::{
    CancelSignal, CodeRunner, ExecutionOutcome, ExecutionRequest, RunEvent, RunnerProfile,
};

/// Stable runner identifier used for explicit startup selection.
pub const MOCK_RUNNER_ID: &str = "mock";

/// One scripted reaction to a run request.
#[derive(Debug, Clone, PartialEq)]
pub enum MockStep {
    Outcome(ExecutionOutcome),
    Fail(String),
}

/// Deterministic mock runner used by interview tests and local runs.
///
/// Scripted steps are consumed in order; once exhausted every run echoes its
/// stdin back as accepted stdout.
#[derive(Debug)]
pub struct MockRunner {
    script: Mutex<VecDeque<MockStep>>,
    requests: Mutex<Vec<ExecutionRequest>>,
    delay: Duration,
}

impl MockRunner {
    const RUN_DELAY_MS: u64 = 200;
    const CANCEL_POLL_MS: u64 = 10;

    #[must_use]
    pub fn new(script: Vec<MockStep>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
            delay: Duration::from_millis(Self::RUN_DELAY_MS),
        }
    }

    /// Overrides the simulated execution latency.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns every request observed so far, in arrival order.
    #[must_use]
    pub fn requests(&self) -> Vec<ExecutionRequest> {
        lock_unpoisoned(&self.requests).clone()
    }

    fn next_step(&self, req: &ExecutionRequest) -> MockStep {
        lock_unpoisoned(&self.script)
            .pop_front()
            .unwrap_or_else(|| {
                MockStep::Outcome(ExecutionOutcome::Accepted {
                    stdout: Some(req.stdin.clone()),
                    time_secs: Some(0.012),
                    memory_kb: Some(3_200),
                })
            })
    }

    /// Sleeps for the configured delay; returns true when cancelled meanwhile.
    fn wait_or_cancelled(&self, cancel: &CancelSignal) -> bool {
        let mut remaining = self.delay;
        let poll = Duration::from_millis(Self::CANCEL_POLL_MS);

        while !remaining.is_zero() {
            if cancel.load(Ordering::SeqCst) {
                return true;
            }
            let step = remaining.min(poll);
            thread::sleep(step);
            remaining -= step;
        }

        cancel.load(Ordering::SeqCst)
    }
}

impl Default for MockRunner {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl CodeRunner for MockRunner {
    fn profile(&self) -> RunnerProfile {
        RunnerProfile {
            runner_id: MOCK_RUNNER_ID.to_string(),
            endpoint: None,
        }
    }

    fn run(
        &self,
        req: ExecutionRequest,
        cancel: CancelSignal,
        emit: &mut dyn FnMut(RunEvent),
    ) -> Result<(), String> {
        let run_id = req.run_id;
        lock_unpoisoned(&self.requests).push(req.clone());

        emit(RunEvent::Started { run_id });

        if self.wait_or_cancelled(&cancel) {
            emit(RunEvent::Cancelled { run_id });
            return Ok(());
        }

        match self.next_step(&req) {
            MockStep::Outcome(outcome) => emit(RunEvent::Finished { run_id, outcome }),
            MockStep::Fail(error) => emit(RunEvent::Failed { run_id, error }),
        }

        Ok(())
    }
}

fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
