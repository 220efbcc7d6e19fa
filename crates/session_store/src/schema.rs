use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Key holding the uploaded resume's metadata.
pub const RESUME_KEY: &str = "resumeFile";
/// Key holding the granted device permission flags.
pub const PERMISSIONS_KEY: &str = "interviewPermissions";

/// Metadata of an accepted resume upload. The file body is never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeMeta {
    pub name: String,
    #[serde(rename = "size")]
    pub size_bytes: u64,
    #[serde(rename = "type")]
    pub mime_type: String,
    #[serde(rename = "uploadDate", with = "time::serde::rfc3339")]
    pub uploaded_at: OffsetDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PermissionKind {
    Camera,
    Microphone,
    ScreenShare,
}

impl PermissionKind {
    pub const ALL: [PermissionKind; 3] = [Self::Camera, Self::Microphone, Self::ScreenShare];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Camera => "camera",
            Self::Microphone => "microphone",
            Self::ScreenShare => "screenShare",
        }
    }

    /// Required kinds gate entry into the interview; the rest are advisory.
    #[must_use]
    pub fn is_required(self) -> bool {
        matches!(self, Self::Camera | Self::Microphone)
    }
}

impl fmt::Display for PermissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePermissionKindError(pub String);

impl fmt::Display for ParsePermissionKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown permission '{}'; expected camera, microphone, or screenShare",
            self.0
        )
    }
}

impl std::error::Error for ParsePermissionKindError {}

impl FromStr for PermissionKind {
    type Err = ParsePermissionKindError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "camera" => Ok(Self::Camera),
            "microphone" | "mic" => Ok(Self::Microphone),
            "screenshare" | "screen" => Ok(Self::ScreenShare),
            _ => Err(ParsePermissionKindError(value.trim().to_string())),
        }
    }
}

/// Device grant flags. Each starts false and only ever flips to true.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Permissions {
    pub camera: bool,
    pub microphone: bool,
    pub screen_share: bool,
}

impl Permissions {
    #[must_use]
    pub fn get(&self, kind: PermissionKind) -> bool {
        match kind {
            PermissionKind::Camera => self.camera,
            PermissionKind::Microphone => self.microphone,
            PermissionKind::ScreenShare => self.screen_share,
        }
    }

    pub fn set(&mut self, kind: PermissionKind, granted: bool) {
        match kind {
            PermissionKind::Camera => self.camera = granted,
            PermissionKind::Microphone => self.microphone = granted,
            PermissionKind::ScreenShare => self.screen_share = granted,
        }
    }

    /// Camera and microphone are granted; screen share does not matter.
    #[must_use]
    pub fn interview_ready(&self) -> bool {
        self.camera && self.microphone
    }

    #[must_use]
    pub fn missing_required(&self) -> Vec<PermissionKind> {
        PermissionKind::ALL
            .into_iter()
            .filter(|kind| kind.is_required() && !self.get(*kind))
            .collect()
    }
}

/// Snapshot of everything the wizard persisted so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionRecord {
    pub resume: Option<ResumeMeta>,
    pub permissions: Permissions,
}

impl SessionRecord {
    #[must_use]
    pub fn has_resume(&self) -> bool {
        self.resume.is_some()
    }
}
