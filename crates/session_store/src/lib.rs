mod error;
mod medium;
mod schema;
mod store;

pub use error::SessionStoreError;
pub use medium::{JsonFileMedium, KeyValueMedium, MemoryMedium};
pub use schema::{
    ParsePermissionKindError, PermissionKind, Permissions, ResumeMeta, SessionRecord,
    PERMISSIONS_KEY, RESUME_KEY,
};
pub use store::SessionStore;
