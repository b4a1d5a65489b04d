use std::fmt;

/// Failures of the gate's mutual-exclusion lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockError {
    /// The mutex behind the lock flag was poisoned.
    Poisoned(String),
    /// `unlock` was called while nobody held the lock.
    NotHeld,
}

impl fmt::Display for LockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockError::Poisoned(msg) => write!(f, "gate lock poisoned: {}", msg),
            LockError::NotHeld => write!(f, "gate lock released while not held"),
        }
    }
}

impl std::error::Error for LockError {}
