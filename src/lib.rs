//! Mock-interview session core.
//!
//! The candidate moves through a linear wizard (resume upload, device
//! permissions, interview). Wizard progress lives in a
//! [`session_store::SessionStore`] that callers create and pass in explicitly.
//!
//! # Public API Overview
//! - [`WizardController`] gates each step on the persisted [`SessionRecord`].
//! - [`InterviewSession`] composes a [`QuestionRunner`] with a three-strike
//!   [`FocusMonitor`].
//! - [`EditorPanel`] plus [`ExecutionRuntime`] submit code to any
//!   [`code_runner::CodeRunner`] without blocking the caller.
//! - Navigation and notices leave the core through [`SessionHost`].

pub mod config;
pub mod editor;
pub mod execution;
pub mod focus;
pub mod gesture;
pub mod host;
pub mod interview;
pub mod logging;
pub mod permissions;
pub mod questions;
pub mod resume;
pub mod wizard;

pub use crate::config::EnvConfig;
pub use crate::editor::{
    default_language, find_language, outcome_output, EditorPanel, Language, PanelMode, RunHost,
    RunRejected, LANGUAGES,
};
pub use crate::execution::ExecutionRuntime;
pub use crate::focus::{
    FocusMonitor, FocusSignal, FocusState, FocusTransition, Visibility, TERMINATION_THRESHOLD,
};
pub use crate::gesture::{
    GestureLevel, GesturePoller, GestureReading, GestureSource, RandomGestureSource,
    GESTURE_POLL_INTERVAL,
};
pub use crate::host::{Notice, Route, SessionHost, Severity};
pub use crate::interview::{InterviewPhase, InterviewSession, QuestionStep};
pub use crate::permissions::{
    grant_permission, granted_notice, AccessDenied, DeviceGrant, GrantError, MediaCapture,
};
pub use crate::questions::{
    default_questions, Advance, OutOfRangeError, Question, QuestionBank, QuestionBankError,
    QuestionKind, QuestionRunner,
};
pub use crate::resume::{
    human_size, validate_resume, ResumeCandidate, ResumeRejected, MAX_RESUME_BYTES,
};
pub use crate::wizard::{can_enter, check_entry, PreconditionFailure, WizardController, WizardStep};

pub use session_store::{
    PermissionKind, Permissions, ResumeMeta, SessionRecord, SessionStore, SessionStoreError,
};
