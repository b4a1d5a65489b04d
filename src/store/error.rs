use std::fmt;
use std::path::PathBuf;

/// Failures of the durable record store.
#[derive(Debug)]
pub enum StoreError {
    /// The storage medium could not be read or written.
    StorageUnavailable {
        path: Option<PathBuf>,
        message: String,
    },
    /// The persisted bytes do not parse into a collection.
    CorruptState {
        path: Option<PathBuf>,
        message: String,
    },
    /// An in-process lock guarding the store was poisoned.
    LockPoisoned(&'static str),
}

impl StoreError {
    pub(crate) fn unavailable(path: Option<PathBuf>, err: impl fmt::Display) -> Self {
        StoreError::StorageUnavailable {
            path,
            message: err.to_string(),
        }
    }

    pub(crate) fn corrupt(path: Option<PathBuf>, err: impl fmt::Display) -> Self {
        StoreError::CorruptState {
            path,
            message: err.to_string(),
        }
    }
}

fn describe(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!(" at {}", path.display()),
        None => String::new(),
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::StorageUnavailable { path, message } => {
                write!(f, "storage unavailable{}: {}", describe(path), message)
            }
            StoreError::CorruptState { path, message } => {
                write!(f, "corrupt collection{}: {}", describe(path), message)
            }
            StoreError::LockPoisoned(operation) => {
                write!(f, "store lock poisoned during {}", operation)
            }
        }
    }
}

impl std::error::Error for StoreError {}
