use super::{LockError, LockGuard};

/// A single exclusive lock.
///
/// Implementations provide blocking lock, non-blocking try-lock, and unlock.
/// Callers should prefer [`Lock::acquire`], which pairs the lock with a guard
/// that releases it on every exit path.
pub trait Lock: Send + Sync {
    /// Acquire the lock, blocking until it becomes available.
    fn lock(&self) -> Result<(), LockError>;

    /// Try to acquire the lock without blocking.
    /// Returns `Ok(true)` if acquired, `Ok(false)` if already held.
    fn try_lock(&self) -> Result<bool, LockError>;

    /// Release the lock. Fails with [`LockError::NotHeld`] if nobody holds it.
    fn unlock(&self) -> Result<(), LockError>;

    /// Block until the lock is held and return a guard that releases it on drop.
    fn acquire(&self) -> Result<LockGuard<'_, Self>, LockError>
    where
        Self: Sized,
    {
        self.lock()?;
        Ok(LockGuard::new(self))
    }

    /// Non-blocking [`Lock::acquire`]. `Ok(None)` when another holder has it.
    fn try_acquire(&self) -> Result<Option<LockGuard<'_, Self>>, LockError>
    where
        Self: Sized,
    {
        if self.try_lock()? {
            Ok(Some(LockGuard::new(self)))
        } else {
            Ok(None)
        }
    }
}
