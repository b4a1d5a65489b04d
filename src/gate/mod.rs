//! Concurrency Gate: one load/mutate/save cycle at a time.
//!
//! Every save rewrites the whole collection, so two cycles that overlap
//! would each persist a snapshot missing the other's change. The gate runs
//! each cycle under a single lock scoped to the entire collection, which
//! makes the mutation history serializable.
//!
//! ## Example
//!
//! ```ignore
//! use bookshelf::{CollectionGate, InMemoryRecordStore, upsert_review};
//!
//! let gate = CollectionGate::new(InMemoryRecordStore::seeded(books));
//! let change = gate.with_exclusive_access(|snapshot| {
//!     upsert_review(snapshot, "111", "alice", 5.into(), "great")
//! })?;
//! ```

mod error;

pub use error::GateError;

use log::debug;

use crate::book::Collection;
use crate::lock::{InMemoryLock, Lock};
use crate::store::RecordStore;

/// Serializes read-modify-write cycles against a [`RecordStore`].
pub struct CollectionGate<S, L: Lock = InMemoryLock> {
    store: S,
    lock: L,
}

impl<S: RecordStore> CollectionGate<S> {
    pub fn new(store: S) -> Self {
        CollectionGate {
            store,
            lock: InMemoryLock::new(),
        }
    }
}

impl<S: RecordStore, L: Lock> CollectionGate<S, L> {
    /// Create a gate with a custom lock.
    pub fn with_lock(store: S, lock: L) -> Self {
        CollectionGate { store, lock }
    }

    /// Access the underlying store. Reads through it bypass the gate.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Access the lock.
    pub fn lock(&self) -> &L {
        &self.lock
    }

    /// Run `operation` on a fresh snapshot while holding the gate, then save
    /// what it returns.
    ///
    /// The gate is released on every exit path, including a panicking
    /// operation. When `operation` fails, `save` is skipped and the durable
    /// collection stays exactly as it was loaded.
    pub fn with_exclusive_access<T, E, F>(&self, operation: F) -> Result<T, GateError<E>>
    where
        F: FnOnce(Collection) -> Result<(Collection, T), E>,
    {
        self.with_exclusive_access_if(|| true, operation)
    }

    /// [`with_exclusive_access`](Self::with_exclusive_access) for a caller
    /// that may give up while waiting.
    ///
    /// `still_wanted` is asked once, right after the gate is granted. When it
    /// returns `false` the cycle is skipped and [`GateError::Abandoned`] is
    /// returned without loading or saving.
    pub fn with_exclusive_access_if<T, E, C, F>(
        &self,
        still_wanted: C,
        operation: F,
    ) -> Result<T, GateError<E>>
    where
        C: FnOnce() -> bool,
        F: FnOnce(Collection) -> Result<(Collection, T), E>,
    {
        let _guard = self.lock.acquire()?;
        if !still_wanted() {
            debug!("event=gate_cycle module=gate status=abandoned save=skipped");
            return Err(GateError::Abandoned);
        }

        let snapshot = self.store.load()?;
        let (updated, value) = match operation(snapshot) {
            Ok(result) => result,
            Err(err) => {
                debug!("event=gate_cycle module=gate status=rejected save=skipped");
                return Err(GateError::Operation(err));
            }
        };
        self.store.save(&updated)?;

        debug!(
            "event=gate_cycle module=gate status=ok books={}",
            updated.len()
        );
        Ok(value)
    }
}
