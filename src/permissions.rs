//! Device permission grants.

use session_store::{PermissionKind, Permissions, SessionStore, SessionStoreError};
use thiserror::Error;
use tracing::{debug, info};

use crate::host::Notice;

/// Proof that access to a device was granted.
///
/// Holding a grant corresponds to holding the live device; [`DeviceGrant::release`]
/// gives it back.
#[derive(Debug, PartialEq, Eq)]
pub struct DeviceGrant {
    kind: PermissionKind,
    released: bool,
}

impl DeviceGrant {
    pub fn new(kind: PermissionKind) -> Self {
        Self {
            kind,
            released: false,
        }
    }

    pub fn kind(&self) -> PermissionKind {
        self.kind
    }

    pub fn release(mut self) -> PermissionKind {
        self.released = true;
        self.kind
    }
}

impl Drop for DeviceGrant {
    fn drop(&mut self) {
        if !self.released {
            debug!(permission = %self.kind, "device grant dropped without release");
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} access denied: {reason}")]
pub struct AccessDenied {
    pub kind: PermissionKind,
    pub reason: String,
}

/// Media-capture collaborator.
pub trait MediaCapture {
    fn request_access(&mut self, kind: PermissionKind) -> Result<DeviceGrant, AccessDenied>;
}

#[derive(Debug, Error)]
pub enum GrantError {
    #[error("Failed to get {} permission. Please allow access and try again.", .0.kind)]
    Denied(AccessDenied),
    #[error(transparent)]
    Store(#[from] SessionStoreError),
}

impl GrantError {
    pub fn notice(&self) -> Notice {
        match self {
            Self::Denied(_) => Notice::destructive("Permission Denied", self.to_string()),
            Self::Store(error) => Notice::destructive("Permission Not Saved", error.to_string()),
        }
    }
}

/// Requests one device, persists the granted flag, and releases the device.
///
/// A denial leaves the stored flags untouched.
pub fn grant_permission(
    store: &mut SessionStore,
    capture: &mut dyn MediaCapture,
    kind: PermissionKind,
) -> Result<Permissions, GrantError> {
    let grant = capture.request_access(kind).map_err(GrantError::Denied)?;
    let permissions = store.set_permission(grant.kind(), true)?;
    grant.release();
    info!(permission = %kind, "permission granted");
    Ok(permissions)
}

pub fn granted_notice(kind: PermissionKind) -> Notice {
    let (title, body) = match kind {
        PermissionKind::Camera => (
            "Camera Access Granted",
            "Camera permission has been successfully granted.",
        ),
        PermissionKind::Microphone => (
            "Microphone Access Granted",
            "Microphone permission has been successfully granted.",
        ),
        PermissionKind::ScreenShare => (
            "Screen Share Access Granted",
            "Screen sharing permission has been successfully granted.",
        ),
    };
    Notice::info(title, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct DenyAll;

    impl MediaCapture for DenyAll {
        fn request_access(&mut self, kind: PermissionKind) -> Result<DeviceGrant, AccessDenied> {
            Err(AccessDenied {
                kind,
                reason: "NotAllowedError".to_string(),
            })
        }
    }

    struct AllowAll {
        issued: Vec<PermissionKind>,
    }

    impl MediaCapture for AllowAll {
        fn request_access(&mut self, kind: PermissionKind) -> Result<DeviceGrant, AccessDenied> {
            self.issued.push(kind);
            Ok(DeviceGrant::new(kind))
        }
    }

    #[test]
    fn denial_keeps_flag_false_and_formats_message() {
        let mut store = SessionStore::in_memory();
        let error = grant_permission(&mut store, &mut DenyAll, PermissionKind::Microphone)
            .expect_err("denied capture should fail");

        assert_eq!(
            error.to_string(),
            "Failed to get microphone permission. Please allow access and try again."
        );
        assert_eq!(error.notice().title, "Permission Denied");
        assert!(!store.read_session().permissions.microphone);
    }

    #[test]
    fn grant_sets_only_requested_flag() {
        let mut store = SessionStore::in_memory();
        let mut capture = AllowAll { issued: Vec::new() };

        let permissions = grant_permission(&mut store, &mut capture, PermissionKind::Camera)
            .expect("grant should succeed");

        assert!(permissions.camera);
        assert!(!permissions.microphone);
        assert_eq!(capture.issued, vec![PermissionKind::Camera]);
    }

    #[test]
    fn denial_after_grant_does_not_reset_flag() {
        let mut store = SessionStore::in_memory();
        let mut capture = AllowAll { issued: Vec::new() };
        grant_permission(&mut store, &mut capture, PermissionKind::Camera)
            .expect("grant should succeed");
        let _ = grant_permission(&mut store, &mut DenyAll, PermissionKind::Camera);

        assert!(store.read_session().permissions.camera);
    }
}
