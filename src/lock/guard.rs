use log::warn;

use super::Lock;

/// Holds a [`Lock`] until dropped.
///
/// Only created after the lock was actually acquired, so dropping a waiter
/// that never got the lock cannot release it for the current holder.
#[must_use = "the lock is released as soon as the guard is dropped"]
pub struct LockGuard<'a, L: Lock> {
    lock: &'a L,
}

impl<'a, L: Lock> LockGuard<'a, L> {
    pub(crate) fn new(lock: &'a L) -> Self {
        LockGuard { lock }
    }
}

impl<L: Lock> Drop for LockGuard<'_, L> {
    fn drop(&mut self) {
        if let Err(err) = self.lock.unlock() {
            warn!("event=lock_release module=lock status=error error={}", err);
        }
    }
}
