//! Boundary traits for the environment hosting an interview.

use std::fmt;

/// Navigation destinations the session core can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    UploadResume,
    GrantPermissions,
    Interview,
    Dashboard,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Self::UploadResume => "/upload-resume",
            Self::GrantPermissions => "/grant-permissions",
            Self::Interview => "/interview",
            Self::Dashboard => "/dashboard",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Destructive,
}

/// A user-visible, non-blocking message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub body: String,
    pub severity: Severity,
}

impl Notice {
    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            severity: Severity::Info,
        }
    }

    pub fn destructive(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            severity: Severity::Destructive,
        }
    }

    pub fn is_destructive(&self) -> bool {
        self.severity == Severity::Destructive
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.body)
    }
}

/// Host services consumed by the wizard and the interview session.
pub trait SessionHost {
    fn navigate(&mut self, route: Route);
    fn notify(&mut self, notice: Notice);
}
