//! Linear setup wizard: resume upload, permission grants, interview.

use std::fmt;

use session_store::{PermissionKind, SessionRecord};
use thiserror::Error;
use tracing::{debug, info};

use crate::host::{Notice, Route, SessionHost};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WizardStep {
    UploadResume,
    GrantPermissions,
    Interview,
}

impl WizardStep {
    pub const ALL: [WizardStep; 3] = [
        Self::UploadResume,
        Self::GrantPermissions,
        Self::Interview,
    ];

    pub fn next(self) -> Option<Self> {
        match self {
            Self::UploadResume => Some(Self::GrantPermissions),
            Self::GrantPermissions => Some(Self::Interview),
            Self::Interview => None,
        }
    }

    pub fn previous(self) -> Option<Self> {
        match self {
            Self::UploadResume => None,
            Self::GrantPermissions => Some(Self::UploadResume),
            Self::Interview => Some(Self::GrantPermissions),
        }
    }

    pub fn route(self) -> Route {
        match self {
            Self::UploadResume => Route::UploadResume,
            Self::GrantPermissions => Route::GrantPermissions,
            Self::Interview => Route::Interview,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::UploadResume => "Upload Resume",
            Self::GrantPermissions => "Grant Permissions",
            Self::Interview => "Interview",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreconditionFailure {
    #[error("Please upload your resume to continue.")]
    ResumeRequired,
    #[error("Please enable camera and microphone first.")]
    PermissionsRequired { missing: Vec<PermissionKind> },
    #[error("{step} is the last step.")]
    NoNextStep { step: WizardStep },
}

impl PreconditionFailure {
    pub fn notice(&self) -> Notice {
        let title = match self {
            Self::ResumeRequired => "Resume Required",
            Self::PermissionsRequired { .. } => "Permissions Required",
            Self::NoNextStep { .. } => "Nothing Further",
        };
        Notice::destructive(title, self.to_string())
    }
}

/// Returns why `step` cannot be entered with `record`, if anything.
pub fn check_entry(step: WizardStep, record: &SessionRecord) -> Result<(), PreconditionFailure> {
    match step {
        WizardStep::UploadResume => Ok(()),
        WizardStep::GrantPermissions if record.has_resume() => Ok(()),
        WizardStep::GrantPermissions => Err(PreconditionFailure::ResumeRequired),
        WizardStep::Interview if record.permissions.interview_ready() => Ok(()),
        WizardStep::Interview => Err(PreconditionFailure::PermissionsRequired {
            missing: record.permissions.missing_required(),
        }),
    }
}

pub fn can_enter(step: WizardStep, record: &SessionRecord) -> bool {
    check_entry(step, record).is_ok()
}

/// Owns the current step. Every forward move is gated by [`can_enter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardController {
    current: WizardStep,
}

impl Default for WizardController {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardController {
    pub fn new() -> Self {
        Self::starting_at(WizardStep::UploadResume)
    }

    pub fn starting_at(step: WizardStep) -> Self {
        Self { current: step }
    }

    pub fn current(&self) -> WizardStep {
        self.current
    }

    /// Moves one step forward when the next step's precondition holds.
    ///
    /// On failure the step is unchanged and the reason is surfaced as a notice.
    pub fn advance(
        &mut self,
        record: &SessionRecord,
        host: &mut dyn SessionHost,
    ) -> Result<WizardStep, PreconditionFailure> {
        let outcome = self
            .current
            .next()
            .ok_or(PreconditionFailure::NoNextStep {
                step: self.current,
            })
            .and_then(|next| check_entry(next, record).map(|()| next));

        match outcome {
            Ok(next) => {
                info!(from = %self.current, to = %next, "wizard advanced");
                self.current = next;
                host.navigate(next.route());
                Ok(next)
            }
            Err(failure) => {
                debug!(step = %self.current, %failure, "wizard advance refused");
                host.notify(failure.notice());
                Err(failure)
            }
        }
    }

    /// Moves one step back without any precondition. Stays put on the first step.
    pub fn go_back(&mut self, host: &mut dyn SessionHost) -> WizardStep {
        if let Some(previous) = self.current.previous() {
            debug!(from = %self.current, to = %previous, "wizard moved back");
            self.current = previous;
            host.navigate(previous.route());
        }
        self.current
    }
}
