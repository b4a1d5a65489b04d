use std::error::Error;
use std::fmt;

use crate::lock::LockError;
use crate::store::StoreError;

/// Why a gated mutation cycle did not complete.
#[derive(Debug)]
pub enum GateError<E> {
    /// The gate itself could not be acquired.
    Lock(LockError),
    /// `load` or `save` failed.
    Store(StoreError),
    /// The operation rejected the snapshot; nothing was saved.
    Operation(E),
    /// The caller stopped waiting before the gate was granted; nothing was
    /// loaded or saved.
    Abandoned,
}

impl<E: fmt::Display> fmt::Display for GateError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateError::Lock(e) => write!(f, "gate error: {}", e),
            GateError::Store(e) => write!(f, "{}", e),
            GateError::Operation(e) => write!(f, "{}", e),
            GateError::Abandoned => write!(f, "mutation abandoned while waiting for the gate"),
        }
    }
}

impl<E: Error + 'static> Error for GateError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            GateError::Lock(e) => Some(e),
            GateError::Store(e) => Some(e),
            GateError::Operation(e) => Some(e),
            GateError::Abandoned => None,
        }
    }
}

impl<E> From<LockError> for GateError<E> {
    fn from(err: LockError) -> Self {
        GateError::Lock(err)
    }
}

impl<E> From<StoreError> for GateError<E> {
    fn from(err: StoreError) -> Self {
        GateError::Store(err)
    }
}
