use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use code_runner::CodeRunner;
use mock_interview::{
    find_language, grant_permission, granted_notice, human_size, validate_resume, AccessDenied,
    DeviceGrant, EditorPanel, ExecutionRuntime, GesturePoller, GestureSource, InterviewPhase,
    InterviewSession, MediaCapture, Notice, PermissionKind, QuestionBank, QuestionStep,
    ResumeCandidate, Route, SessionHost, SessionStore, Severity, Visibility, WizardController,
    WizardStep, LANGUAGES,
};
use tracing::debug;

use crate::commands::{parse_shell_command, ShellCommand, HELP_TEXT};

/// Collects everything the shell prints, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    lines: Vec<String>,
    route: Route,
}

impl Default for Transcript {
    fn default() -> Self {
        Self {
            lines: Vec::new(),
            route: Route::UploadResume,
        }
    }
}

impl Transcript {
    pub fn route(&self) -> Route {
        self.route
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }
}

impl SessionHost for Transcript {
    fn navigate(&mut self, route: Route) {
        self.route = route;
        self.lines.push(format!("-> {route}"));
    }

    fn notify(&mut self, notice: Notice) {
        let marker = match notice.severity {
            Severity::Info => "*",
            Severity::Destructive => "!",
        };
        self.lines
            .push(format!("{marker} {}: {}", notice.title, notice.body));
    }
}

/// Answers device requests from a typed `/grant` or `/deny`.
struct ConsoleCapture {
    allow: bool,
}

impl MediaCapture for ConsoleCapture {
    fn request_access(&mut self, kind: PermissionKind) -> Result<DeviceGrant, AccessDenied> {
        if self.allow {
            Ok(DeviceGrant::new(kind))
        } else {
            Err(AccessDenied {
                kind,
                reason: "denied at the prompt".to_string(),
            })
        }
    }
}

pub struct ShellApp {
    store: SessionStore,
    wizard: WizardController,
    session: InterviewSession,
    bank: QuestionBank,
    runtime: Arc<ExecutionRuntime>,
    gestures: GesturePoller,
    transcript: Transcript,
    should_exit: bool,
}

impl ShellApp {
    pub fn new(
        store: SessionStore,
        bank: QuestionBank,
        runner: Arc<dyn CodeRunner>,
        gestures: impl GestureSource + 'static,
    ) -> Self {
        let panel = Arc::new(Mutex::new(EditorPanel::new()));
        Self {
            store,
            wizard: WizardController::new(),
            session: InterviewSession::new(bank.clone()),
            bank,
            runtime: ExecutionRuntime::new(panel, runner),
            gestures: GesturePoller::new(gestures),
            transcript: Transcript::default(),
            should_exit: false,
        }
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    pub fn wizard_step(&self) -> WizardStep {
        self.wizard.current()
    }

    pub fn session(&self) -> &InterviewSession {
        &self.session
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn route(&self) -> Route {
        self.transcript.route()
    }

    pub fn runtime(&self) -> &Arc<ExecutionRuntime> {
        &self.runtime
    }

    /// Drains lines produced since the last call.
    pub fn take_output(&mut self) -> Vec<String> {
        self.transcript.take()
    }

    /// Applies finished run events and samples gestures.
    pub fn tick(&mut self, now: Instant) {
        self.runtime.flush_pending_events(&mut self.transcript);
        if let Some(reading) = self.gestures.poll(now, self.session.is_active()) {
            debug!(%reading, "gesture sample");
        }
    }

    pub fn is_idle(&self) -> bool {
        self.runtime.is_idle()
    }

    pub fn on_line(&mut self, line: &str) {
        match parse_shell_command(line) {
            Some(command) => self.on_command(command),
            None => {
                let mut panel = self.panel();
                panel.append_line(line);
            }
        }
    }

    fn on_command(&mut self, command: ShellCommand) {
        match command {
            ShellCommand::Help => self.transcript.push(HELP_TEXT),
            ShellCommand::Status => self.print_status(),
            ShellCommand::Upload {
                name,
                size_bytes,
                mime_type,
            } => self.upload(ResumeCandidate::new(name, size_bytes, mime_type)),
            ShellCommand::Remove => self.remove_resume(),
            ShellCommand::Next => self.next(),
            ShellCommand::Back => self.back(),
            ShellCommand::Grant(kind) => self.request_permission(kind, true),
            ShellCommand::Deny(kind) => self.request_permission(kind, false),
            ShellCommand::Start => self.start_interview(),
            ShellCommand::Leave => self.session.leave(&mut self.transcript),
            ShellCommand::Blur => self.visibility(Visibility::Hidden),
            ShellCommand::Focus => self.visibility(Visibility::Visible),
            ShellCommand::Question => self.print_question(),
            ShellCommand::Lang(query) => self.select_language(&query),
            ShellCommand::Stdin(stdin) => self.panel().set_stdin(stdin),
            ShellCommand::Code => {
                let code = self.panel().code().to_string();
                self.transcript.push(code);
            }
            ShellCommand::Clear => self.panel().set_code(String::new()),
            ShellCommand::Run => self.run_code(),
            ShellCommand::Cancel => {
                let mut runs = Arc::clone(&self.runtime);
                let cancelled = self.panel().cancel(&mut runs);
                if !cancelled {
                    self.transcript.push("No run in progress.");
                }
            }
            ShellCommand::SignOut => self.sign_out(),
            ShellCommand::Quit => {
                if self.session.is_active() {
                    self.session.leave(&mut self.transcript);
                }
                self.should_exit = true;
            }
            ShellCommand::Invalid { command, usage } => {
                self.transcript.push(format!("Usage for {command}: {usage}"));
            }
            ShellCommand::Unknown(command) => {
                self.transcript
                    .push(format!("Unknown command {command}. Type /help for commands."));
            }
        }
    }

    fn upload(&mut self, candidate: ResumeCandidate) {
        let meta = match validate_resume(&candidate) {
            Ok(meta) => meta,
            Err(rejected) => {
                self.transcript
                    .notify(Notice::destructive("Invalid File", rejected.to_string()));
                return;
            }
        };

        match self.store.record_resume(&meta) {
            Ok(()) => self.transcript.notify(Notice::info(
                "Resume Uploaded",
                format!(
                    "{} ({}) has been uploaded successfully.",
                    meta.name,
                    human_size(meta.size_bytes)
                ),
            )),
            Err(error) => self
                .transcript
                .notify(Notice::destructive("Upload Failed", error.to_string())),
        }
    }

    fn remove_resume(&mut self) {
        match self.store.clear_resume() {
            Ok(()) => self.transcript.push("Resume removed."),
            Err(error) => self
                .transcript
                .notify(Notice::destructive("Remove Failed", error.to_string())),
        }
    }

    fn next(&mut self) {
        if self.session.is_active() {
            if let QuestionStep::Next { .. } = self.session.next_question(&mut self.transcript) {
                self.print_question();
            }
            return;
        }

        let record = self.store.read_session();
        let _ = self.wizard.advance(&record, &mut self.transcript);
    }

    fn back(&mut self) {
        if self.session.is_active() {
            self.transcript
                .push("Interview in progress. Use /leave to exit first.");
            return;
        }
        self.wizard.go_back(&mut self.transcript);
    }

    fn request_permission(&mut self, kind: PermissionKind, allow: bool) {
        let mut capture = ConsoleCapture { allow };
        match grant_permission(&mut self.store, &mut capture, kind) {
            Ok(_) => self.transcript.notify(granted_notice(kind)),
            Err(error) => self.transcript.notify(error.notice()),
        }
    }

    fn start_interview(&mut self) {
        if self.wizard.current() != WizardStep::Interview {
            self.transcript
                .push("Reach the interview step first (/next).");
            return;
        }
        if self.session.is_active() {
            self.transcript.push("Interview already in progress.");
            return;
        }
        if self.session.phase() != InterviewPhase::Setup {
            self.session = InterviewSession::new(self.bank.clone());
        }

        let record = self.store.read_session();
        if self.session.begin(&record, &mut self.transcript).is_ok() {
            self.print_question();
        }
    }

    fn visibility(&mut self, visibility: Visibility) {
        self.session
            .on_visibility_change(visibility, &mut self.transcript);
    }

    fn print_question(&mut self) {
        let Some(question) = self.session.current_question() else {
            self.transcript.push("No question available.");
            return;
        };
        let mut lines = vec![format!(
            "{}: {}",
            self.session.questions().position_label(),
            question.text
        )];
        if let Some(prompt) = &question.programming_prompt {
            lines.push(prompt.clone());
        }
        for line in lines {
            self.transcript.push(line);
        }
    }

    fn select_language(&mut self, query: &str) {
        match find_language(query) {
            Some(language) => {
                self.panel().select_language(language);
                self.transcript
                    .push(format!("Language: {} ({})", language.name, language.id));
            }
            None => {
                let available: Vec<&str> = LANGUAGES.iter().map(|language| language.name).collect();
                self.transcript.push(format!(
                    "Unknown language '{query}'. Available: {}",
                    available.join(", ")
                ));
            }
        }
    }

    fn run_code(&mut self) {
        let mut runs = Arc::clone(&self.runtime);
        let started = self.panel().run(&mut runs);
        match started {
            Ok(run_id) => self.transcript.push(format!("Running (run {run_id})...")),
            Err(rejected) => self.transcript.notify(rejected.notice()),
        }
    }

    fn sign_out(&mut self) {
        if self.session.is_active() {
            self.session.leave(&mut self.transcript);
        }
        match self.store.teardown() {
            Ok(()) => {
                self.wizard = WizardController::new();
                self.session = InterviewSession::new(self.bank.clone());
                self.transcript.push("Signed out. Session data cleared.");
            }
            Err(error) => self
                .transcript
                .notify(Notice::destructive("Sign Out Failed", error.to_string())),
        }
    }

    fn print_status(&mut self) {
        let record = self.store.read_session();
        let resume = record
            .resume
            .as_ref()
            .map(|meta| format!("{} ({})", meta.name, human_size(meta.size_bytes)))
            .unwrap_or_else(|| "none".to_string());
        let permissions = record.permissions;
        let (language, output) = {
            let panel = self.panel();
            (panel.language().name, panel.output().to_string())
        };

        let lines = vec![
            format!("step: {} | route: {}", self.wizard.current(), self.route()),
            format!("resume: {resume}"),
            format!(
                "permissions: camera={} microphone={} screenShare={}",
                permissions.camera, permissions.microphone, permissions.screen_share
            ),
            format!(
                "interview: {:?} | violations: {} | progress: {}%",
                self.session.phase(),
                self.session.violations_label(),
                self.session.progress_percent()
            ),
            format!("gestures: {}", self.gestures.reading()),
            format!(
                "editor: {language} via {} | output: {}",
                self.runtime.runner_id(),
                if output.is_empty() { "-" } else { output.as_str() }
            ),
        ];
        for line in lines {
            self.transcript.push(line);
        }
    }

    fn panel(&self) -> MutexGuard<'_, EditorPanel> {
        lock_unpoisoned(self.runtime.panel())
    }
}

fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
