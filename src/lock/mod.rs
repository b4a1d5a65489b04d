//! Mutual-exclusion primitives behind the concurrency gate.
//!
//! `Lock` is a trait so the gate can run on the default in-process
//! `InMemoryLock` or on a lock shared between processes (an advisory file
//! lock, a database row lock) without changing the gate itself.

mod error;
mod guard;
mod in_memory;
mod lock;

pub use error::LockError;
pub use guard::LockGuard;
pub use in_memory::InMemoryLock;
pub use lock::Lock;
