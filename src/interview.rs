//! Active interview orchestration: question progression plus focus policy.

use session_store::SessionRecord;
use tracing::info;
use uuid::Uuid;

use crate::focus::{FocusMonitor, FocusSignal, Visibility, TERMINATION_THRESHOLD};
use crate::host::{Notice, Route, SessionHost};
use crate::questions::{Advance, Question, QuestionBank, QuestionRunner};
use crate::wizard::{check_entry, PreconditionFailure, WizardStep};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterviewPhase {
    Setup,
    Active,
    Completed,
    Terminated,
}

/// What one `next_question` call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionStep {
    Next { index: usize },
    Completed,
    NotActive,
}

#[derive(Debug)]
pub struct InterviewSession {
    id: Uuid,
    phase: InterviewPhase,
    questions: QuestionRunner,
    focus: FocusMonitor,
    recording: bool,
}

impl Default for InterviewSession {
    fn default() -> Self {
        Self::new(QuestionBank::default())
    }
}

impl InterviewSession {
    pub fn new(bank: QuestionBank) -> Self {
        Self {
            id: Uuid::new_v4(),
            phase: InterviewPhase::Setup,
            questions: QuestionRunner::from_bank(bank),
            focus: FocusMonitor::new(),
            recording: false,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn phase(&self) -> InterviewPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == InterviewPhase::Active
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    pub fn questions(&self) -> &QuestionRunner {
        &self.questions
    }

    pub fn focus(&self) -> &FocusMonitor {
        &self.focus
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.current().ok()
    }

    /// Starts the interview when camera and microphone are granted.
    pub fn begin(
        &mut self,
        record: &SessionRecord,
        host: &mut dyn SessionHost,
    ) -> Result<(), PreconditionFailure> {
        if let Err(failure) = check_entry(WizardStep::Interview, record) {
            host.notify(failure.notice());
            return Err(failure);
        }

        self.questions.reset();
        self.focus.start();
        self.recording = true;
        self.phase = InterviewPhase::Active;
        info!(session = %self.id, questions = self.questions.len(), "interview started");
        host.notify(Notice::info(
            "Interview Started",
            "Good luck! Remember to maintain eye contact and stay focused.",
        ));
        Ok(())
    }

    /// Feeds a visibility change into the focus policy.
    ///
    /// On termination the monitor is already out of `Active` before the host
    /// is asked to navigate away.
    pub fn on_visibility_change(
        &mut self,
        visibility: Visibility,
        host: &mut dyn SessionHost,
    ) -> Option<FocusSignal> {
        if !self.is_active() {
            return None;
        }

        let signal = self.focus.on_visibility_change(visibility).signal?;
        host.notify(signal.notice());
        if signal == FocusSignal::Terminated {
            self.recording = false;
            self.phase = InterviewPhase::Terminated;
            info!(session = %self.id, violations = self.focus.count(), "interview terminated");
            host.navigate(Route::Dashboard);
        }
        Some(signal)
    }

    pub fn next_question(&mut self, host: &mut dyn SessionHost) -> QuestionStep {
        if !self.is_active() {
            return QuestionStep::NotActive;
        }

        match self.questions.advance() {
            Advance::Next(_) => QuestionStep::Next {
                index: self.questions.index(),
            },
            Advance::Completed => {
                self.finish(InterviewPhase::Completed);
                host.notify(Notice::info(
                    "Interview Completed",
                    "Great job! Generating your report...",
                ));
                host.navigate(Route::Dashboard);
                QuestionStep::Completed
            }
        }
    }

    /// User-initiated exit. Not counted as a violation.
    pub fn leave(&mut self, host: &mut dyn SessionHost) {
        if self.is_active() {
            self.finish(InterviewPhase::Setup);
        }
        host.navigate(Route::Dashboard);
    }

    fn finish(&mut self, phase: InterviewPhase) {
        self.focus.stop();
        self.recording = false;
        self.phase = phase;
        info!(session = %self.id, ?phase, "interview finished");
    }

    /// "{count}/3".
    pub fn violations_label(&self) -> String {
        format!("{}/{}", self.focus.count(), TERMINATION_THRESHOLD)
    }

    /// Progress in whole percent, for display.
    pub fn progress_percent(&self) -> u32 {
        (self.questions.progress_fraction() * 100.0).round() as u32
    }
}
