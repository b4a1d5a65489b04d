use std::sync::{Condvar, Mutex, PoisonError};

use super::{Lock, LockError};

/// In-memory lock backed by `Mutex<bool>` + `Condvar`.
///
/// The flag is held only for the instant it takes to flip it, so a holder
/// that panics inside its critical section does not poison the waiters; the
/// guard still clears the flag while unwinding.
pub struct InMemoryLock {
    state: Mutex<bool>,
    wake: Condvar,
}

impl InMemoryLock {
    pub fn new() -> Self {
        InMemoryLock {
            state: Mutex::new(false),
            wake: Condvar::new(),
        }
    }

    /// Whether some caller currently holds the lock.
    pub fn is_locked(&self) -> Result<bool, LockError> {
        let locked = self.state.lock().map_err(poisoned)?;
        Ok(*locked)
    }
}

fn poisoned<T>(err: PoisonError<T>) -> LockError {
    LockError::Poisoned(err.to_string())
}

impl Default for InMemoryLock {
    fn default() -> Self {
        Self::new()
    }
}

impl Lock for InMemoryLock {
    fn lock(&self) -> Result<(), LockError> {
        let mut locked = self.state.lock().map_err(poisoned)?;
        while *locked {
            locked = self.wake.wait(locked).map_err(poisoned)?;
        }
        *locked = true;
        Ok(())
    }

    fn try_lock(&self) -> Result<bool, LockError> {
        let mut locked = self.state.lock().map_err(poisoned)?;
        if *locked {
            Ok(false)
        } else {
            *locked = true;
            Ok(true)
        }
    }

    fn unlock(&self) -> Result<(), LockError> {
        let mut locked = self.state.lock().map_err(poisoned)?;
        if !*locked {
            return Err(LockError::NotHeld);
        }
        *locked = false;
        self.wake.notify_one();
        Ok(())
    }
}
