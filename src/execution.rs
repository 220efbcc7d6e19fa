//! Background execution of editor runs.

use std::collections::VecDeque;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};

use code_runner::{CancelSignal, CodeRunner, ExecutionRequest, RunEvent, RunId};
use tracing::{debug, warn};

use crate::editor::{EditorPanel, RunHost};
use crate::host::SessionHost;

struct ActiveRun {
    run_id: RunId,
    cancel: CancelSignal,
    join_handle: Option<JoinHandle<()>>,
}

/// Runs one submission at a time on a worker thread and queues its events.
///
/// Nothing touches the panel until the owning thread calls
/// [`ExecutionRuntime::flush_pending_events`].
pub struct ExecutionRuntime {
    panel: Arc<Mutex<EditorPanel>>,
    pending_events: Mutex<VecDeque<RunEvent>>,
    next_run_id: AtomicU64,
    active_run: Mutex<Option<ActiveRun>>,
    runner: Arc<dyn CodeRunner>,
}

impl ExecutionRuntime {
    pub fn new(panel: Arc<Mutex<EditorPanel>>, runner: Arc<dyn CodeRunner>) -> Arc<Self> {
        Arc::new(Self {
            panel,
            pending_events: Mutex::new(VecDeque::new()),
            next_run_id: AtomicU64::new(1),
            active_run: Mutex::new(None),
            runner,
        })
    }

    pub fn panel(&self) -> &Arc<Mutex<EditorPanel>> {
        &self.panel
    }

    pub fn runner_id(&self) -> String {
        self.runner.profile().runner_id
    }

    /// True when no worker is outstanding and no events are queued.
    pub fn is_idle(&self) -> bool {
        self.lock_active_run().is_none() && lock_unpoisoned(&self.pending_events).is_empty()
    }

    fn start_run_internal(
        self: &Arc<Self>,
        language_id: u32,
        source_code: String,
        stdin: String,
    ) -> Result<RunId, String> {
        let mut active_run = self.lock_active_run();
        if active_run.is_some() {
            return Err("Run already active".to_string());
        }

        let run_id = self.next_run_id.fetch_add(1, Ordering::SeqCst);
        let cancel: CancelSignal = Arc::new(AtomicBool::new(false));
        let request = ExecutionRequest {
            run_id,
            language_id,
            source_code,
            stdin,
        };
        let join_handle = self.spawn_worker(request, Arc::clone(&cancel))?;

        *active_run = Some(ActiveRun {
            run_id,
            cancel,
            join_handle: Some(join_handle),
        });
        debug!(run_id, language_id, "run started");

        Ok(run_id)
    }

    fn spawn_worker(
        self: &Arc<Self>,
        request: ExecutionRequest,
        cancel: CancelSignal,
    ) -> Result<JoinHandle<()>, String> {
        let run_id = request.run_id;
        let runtime = Arc::clone(self);
        thread::Builder::new()
            .name(format!("code-run-{run_id}"))
            .spawn(move || runtime.run_worker(request, cancel))
            .map_err(|error| format!("Failed to spawn run worker: {error}"))
    }

    fn run_worker(self: Arc<Self>, request: ExecutionRequest, cancel: CancelSignal) {
        let run_id = request.run_id;
        let terminal_emitted = Arc::new(AtomicBool::new(false));
        let terminal_emitted_for_emit = Arc::clone(&terminal_emitted);
        let runtime = Arc::clone(&self);
        let runner = Arc::clone(&self.runner);

        let mut emit = move |event: RunEvent| {
            if event.is_terminal() {
                terminal_emitted_for_emit.store(true, Ordering::SeqCst);
            }
            runtime.enqueue_event(event);
        };
        let run_outcome = catch_unwind(AssertUnwindSafe(|| {
            runner.run(request, Arc::clone(&cancel), &mut emit)
        }));

        match run_outcome {
            Ok(Ok(())) => {}
            Ok(Err(error)) => emit(RunEvent::Failed { run_id, error }),
            Err(_) => emit(RunEvent::Failed {
                run_id,
                error: "Code runner panicked".to_string(),
            }),
        }

        if !terminal_emitted.load(Ordering::SeqCst) {
            warn!(run_id, "runner exited without terminal event");
            emit(RunEvent::Failed {
                run_id,
                error: "Code runner exited without terminal event".to_string(),
            });
        }
    }

    fn enqueue_event(&self, event: RunEvent) {
        lock_unpoisoned(&self.pending_events).push_back(event);
    }

    /// Applies queued events to the panel and forwards resulting notices.
    ///
    /// Returns the number of events drained.
    pub fn flush_pending_events(&self, host: &mut dyn SessionHost) -> usize {
        let mut drained = 0usize;

        loop {
            let event = {
                let mut pending_events = lock_unpoisoned(&self.pending_events);
                pending_events.pop_front()
            };

            match event {
                Some(event) => {
                    self.apply_event(event, host);
                    drained += 1;
                }
                None => break,
            }
        }

        drained
    }

    fn apply_event(&self, event: RunEvent, host: &mut dyn SessionHost) {
        let run_id = event.run_id();
        let terminal = event.is_terminal();

        let notice = lock_unpoisoned(&self.panel).apply_run_event(event);
        if let Some(notice) = notice {
            host.notify(notice);
        }

        if terminal {
            self.clear_active_run_if_matching(run_id);
        }
    }

    fn clear_active_run_if_matching(&self, run_id: RunId) {
        let mut active_run = self.lock_active_run();
        let matches = active_run.as_ref().map(|active| active.run_id) == Some(run_id);
        if !matches {
            return;
        }

        let mut completed = match active_run.take() {
            Some(completed) => completed,
            None => return,
        };

        if let Some(join_handle) = completed.join_handle.take() {
            let is_current_thread = join_handle.thread().id() == thread::current().id();
            if !is_current_thread && join_handle.is_finished() {
                let _ = join_handle.join();
            }
        }
        debug!(run_id, "run finished");
    }

    fn cancel_run_internal(&self, run_id: RunId) {
        let active_run = self.lock_active_run();
        if let Some(active_run) = active_run.as_ref() {
            if active_run.run_id == run_id {
                active_run.cancel.store(true, Ordering::SeqCst);
                debug!(run_id, "run cancellation requested");
            }
        }
    }

    fn lock_active_run(&self) -> MutexGuard<'_, Option<ActiveRun>> {
        lock_unpoisoned(&self.active_run)
    }
}

impl RunHost for Arc<ExecutionRuntime> {
    fn start_run(
        &mut self,
        language_id: u32,
        source_code: String,
        stdin: String,
    ) -> Result<RunId, String> {
        self.start_run_internal(language_id, source_code, stdin)
    }

    fn cancel_run(&mut self, run_id: RunId) {
        self.cancel_run_internal(run_id);
    }
}

pub(crate) fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
