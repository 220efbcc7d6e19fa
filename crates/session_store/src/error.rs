use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("I/O error while {operation} at {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse key/value file {path}: {source}")]
    JsonFileParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize key/value file {path}: {source}")]
    JsonFileWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize value for key '{key}': {source}")]
    JsonSerialize {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl SessionStoreError {
    #[must_use]
    pub fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    #[must_use]
    pub fn json_file(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::JsonFileParse {
            path: path.into(),
            source,
        }
    }

    #[must_use]
    pub fn json_file_write(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::JsonFileWrite {
            path: path.into(),
            source,
        }
    }

    #[must_use]
    pub fn json_serialize(key: &'static str, source: serde_json::Error) -> Self {
        Self::JsonSerialize { key, source }
    }
}
