use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::SessionStoreError;
use crate::medium::{JsonFileMedium, KeyValueMedium, MemoryMedium};
use crate::schema::{
    PermissionKind, Permissions, ResumeMeta, SessionRecord, PERMISSIONS_KEY, RESUME_KEY,
};

/// Wizard progress persisted as JSON values under two well-known keys.
///
/// Every write is a full replacement of one key. Reads never fail: missing or
/// undecodable values fall back to their defaults.
pub struct SessionStore {
    medium: Box<dyn KeyValueMedium>,
}

impl SessionStore {
    pub fn new(medium: impl KeyValueMedium + 'static) -> Self {
        Self {
            medium: Box::new(medium),
        }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryMedium::new())
    }

    /// Opens a store persisted to a flat JSON file at `path`.
    pub fn open_file(path: &Path) -> Result<Self, SessionStoreError> {
        Ok(Self::new(JsonFileMedium::open(path)?))
    }

    pub fn record_resume(&mut self, meta: &ResumeMeta) -> Result<(), SessionStoreError> {
        let encoded = serde_json::to_string(meta)
            .map_err(|source| SessionStoreError::json_serialize(RESUME_KEY, source))?;
        self.medium.set(RESUME_KEY, encoded)?;
        debug!(name = %meta.name, size = meta.size_bytes, "recorded resume metadata");
        Ok(())
    }

    /// Removes the resume entry. Clearing an absent resume is a no-op.
    pub fn clear_resume(&mut self) -> Result<(), SessionStoreError> {
        self.medium.remove(RESUME_KEY)
    }

    /// Sets one permission flag, preserving the other two.
    pub fn set_permission(
        &mut self,
        kind: PermissionKind,
        granted: bool,
    ) -> Result<Permissions, SessionStoreError> {
        let mut permissions = self.read_permissions();
        permissions.set(kind, granted);
        let encoded = serde_json::to_string(&permissions)
            .map_err(|source| SessionStoreError::json_serialize(PERMISSIONS_KEY, source))?;
        self.medium.set(PERMISSIONS_KEY, encoded)?;
        debug!(permission = %kind, granted, "updated permission flag");
        Ok(permissions)
    }

    #[must_use]
    pub fn read_session(&self) -> SessionRecord {
        SessionRecord {
            resume: self.read_value::<ResumeMeta>(RESUME_KEY),
            permissions: self.read_permissions(),
        }
    }

    /// Clears every persisted key (sign-out or tab close). The store stays
    /// usable and reads defaults afterwards.
    pub fn teardown(&mut self) -> Result<(), SessionStoreError> {
        self.medium.clear()?;
        debug!("session store torn down");
        Ok(())
    }

    fn read_permissions(&self) -> Permissions {
        self.read_value::<Permissions>(PERMISSIONS_KEY)
            .unwrap_or_default()
    }

    fn read_value<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.medium.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(error) => {
                warn!(key, %error, "failed to read session value; using default");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(error) => {
                warn!(key, %error, "stored session value is malformed; using default");
                None
            }
        }
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::in_memory()
    }
}
