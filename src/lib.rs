//! bookshelf: a book catalog whose per-user reviews live inside one shared
//! document, with every read-modify-write of that document serialized.
//!
//! Layers, leaves first:
//!
//! - [`book`]: `Book`, `Review`, `Rating` and the `Collection` they form.
//! - [`store`]: `RecordStore`: atomic load/save of the whole collection.
//! - [`reviews`]: pure upsert/delete of one user's review on one book.
//! - [`lock`] / [`gate`]: `CollectionGate` runs load → mutate → save as one
//!   exclusive cycle.
//! - [`query`]: read projections over a snapshot.
//! - [`access`]: identity of the acting user.
//! - [`catalog`]: the service facade tying it together.
//! - `http` (feature `http`): axum routes over the catalog.

pub mod access;
pub mod book;
pub mod catalog;
pub mod gate;
pub mod lock;
pub mod query;
pub mod reviews;
pub mod store;

#[cfg(feature = "http")]
pub mod config;
#[cfg(feature = "http")]
pub mod http;
#[cfg(feature = "http")]
pub mod logging;

pub use access::{AccessError, Authenticator, Credentials, Identity};
pub use book::{Book, Collection, Rating, Review};
pub use catalog::{Catalog, CatalogError, ReviewEvent, REVIEW_DELETED, REVIEW_UPSERTED};
pub use gate::{CollectionGate, GateError};
pub use lock::{InMemoryLock, Lock, LockError, LockGuard};
pub use query::QueryError;
pub use reviews::{delete_review, upsert_review, ReviewChange, ReviewError};
pub use store::{InMemoryRecordStore, JsonFileStore, RecordStore, StoreError};

// Re-export the EventEmitter from the event_emitter_rs crate
#[cfg(feature = "emitter")]
pub use event_emitter_rs::EventEmitter;
