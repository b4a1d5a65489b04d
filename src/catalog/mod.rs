//! Catalog: the service facade over store, gate, mutator and projections.
//!
//! Queries load their own snapshot and never wait on the gate. Mutations run
//! one at a time through [`CollectionGate`], and listeners (feature
//! `emitter`) hear about them only after the new collection is saved and the
//! gate is released.
//!
//! ## Example
//!
//! ```ignore
//! use bookshelf::{Catalog, Identity, JsonFileStore};
//!
//! let catalog = Catalog::new(JsonFileStore::new("data/books.json"));
//! let alice = Identity::new("alice");
//!
//! catalog.upsert_review(&alice, "111", 5.into(), "great")?;
//! let reviews = catalog.reviews_by_isbn("111")?;
//! ```

mod error;
mod events;

pub use error::CatalogError;
pub use events::{ReviewEvent, REVIEW_DELETED, REVIEW_UPSERTED};

#[cfg(feature = "emitter")]
use std::sync::Mutex;

#[cfg(feature = "emitter")]
use event_emitter_rs::EventEmitter;
use log::{debug, error, info};

use crate::access::Identity;
use crate::book::{Book, Collection, Rating, Review};
use crate::gate::CollectionGate;
use crate::lock::{InMemoryLock, Lock};
use crate::query;
use crate::reviews::{self, ReviewChange};
use crate::store::RecordStore;

/// Book catalog with serialized review mutations.
pub struct Catalog<S: RecordStore, L: Lock = InMemoryLock> {
    gate: CollectionGate<S, L>,
    #[cfg(feature = "emitter")]
    emitter: Mutex<EventEmitter>,
}

impl<S: RecordStore> Catalog<S> {
    pub fn new(store: S) -> Self {
        Self::with_lock(store, InMemoryLock::new())
    }
}

impl<S: RecordStore, L: Lock> Catalog<S, L> {
    /// Create a catalog whose gate uses a custom lock.
    pub fn with_lock(store: S, lock: L) -> Self {
        Catalog {
            gate: CollectionGate::with_lock(store, lock),
            #[cfg(feature = "emitter")]
            emitter: Mutex::new(EventEmitter::new()),
        }
    }

    /// Access the underlying record store.
    pub fn store(&self) -> &S {
        self.gate.store()
    }

    /// Access the gate serializing mutations.
    pub fn gate(&self) -> &CollectionGate<S, L> {
        &self.gate
    }

    fn snapshot(&self) -> Result<Collection, CatalogError> {
        self.gate.store().load().map_err(|err| {
            error!("event=snapshot_load module=catalog status=error error={}", err);
            CatalogError::from(err)
        })
    }

    /// Every book, in stored order.
    pub fn all_books(&self) -> Result<Collection, CatalogError> {
        self.snapshot()
    }

    /// The book with exactly this ISBN.
    pub fn book_by_isbn(&self, isbn: &str) -> Result<Book, CatalogError> {
        let books = self.snapshot()?;
        let book = query::book_by_isbn(&books, isbn).map_err(not_found)?;
        Ok(book.clone())
    }

    /// Books by this author, ignoring case.
    pub fn books_by_author(&self, author: &str) -> Result<Vec<Book>, CatalogError> {
        let books = self.snapshot()?;
        let found = query::books_by_author(&books, author).map_err(not_found)?;
        Ok(found.into_iter().cloned().collect())
    }

    /// Books with this title, ignoring case.
    pub fn books_by_title(&self, title: &str) -> Result<Vec<Book>, CatalogError> {
        let books = self.snapshot()?;
        let found = query::books_by_title(&books, title).map_err(not_found)?;
        Ok(found.into_iter().cloned().collect())
    }

    /// Reviews of the book with this ISBN.
    pub fn reviews_by_isbn(&self, isbn: &str) -> Result<Vec<Review>, CatalogError> {
        let books = self.snapshot()?;
        let reviews = query::reviews_by_isbn(&books, isbn).map_err(not_found)?;
        Ok(reviews.to_vec())
    }

    /// Create or replace the acting user's review of `isbn`.
    pub fn upsert_review(
        &self,
        identity: &Identity,
        isbn: &str,
        rating: Rating,
        comment: &str,
    ) -> Result<ReviewChange, CatalogError> {
        self.upsert_review_if(|| true, identity, isbn, rating, comment)
    }

    /// [`upsert_review`](Self::upsert_review) for a caller that may stop
    /// waiting for the gate. See [`CollectionGate::with_exclusive_access_if`].
    pub fn upsert_review_if<C>(
        &self,
        still_wanted: C,
        identity: &Identity,
        isbn: &str,
        rating: Rating,
        comment: &str,
    ) -> Result<ReviewChange, CatalogError>
    where
        C: FnOnce() -> bool,
    {
        let user = identity.user();
        let result = self.gate.with_exclusive_access_if(still_wanted, |snapshot| {
            reviews::upsert_review(snapshot, isbn, user, rating, comment)
        });
        self.finish("review_upsert", isbn, user, result.map_err(CatalogError::from))
    }

    /// Delete the acting user's review of `isbn`.
    pub fn delete_review(&self, identity: &Identity, isbn: &str) -> Result<ReviewChange, CatalogError> {
        self.delete_review_if(|| true, identity, isbn)
    }

    /// [`delete_review`](Self::delete_review) for a caller that may stop
    /// waiting for the gate.
    pub fn delete_review_if<C>(
        &self,
        still_wanted: C,
        identity: &Identity,
        isbn: &str,
    ) -> Result<ReviewChange, CatalogError>
    where
        C: FnOnce() -> bool,
    {
        let user = identity.user();
        let result = self.gate.with_exclusive_access_if(still_wanted, |snapshot| {
            reviews::delete_review(snapshot, isbn, user)
        });
        self.finish("review_delete", isbn, user, result.map_err(CatalogError::from))
    }

    fn finish(
        &self,
        event: &str,
        isbn: &str,
        user: &str,
        result: Result<ReviewChange, CatalogError>,
    ) -> Result<ReviewChange, CatalogError> {
        match &result {
            Ok(change) => {
                info!(
                    "event={} module=catalog status=ok isbn={} user={} change={}",
                    event, isbn, user, change
                );
                self.notify(ReviewEvent {
                    isbn: isbn.to_string(),
                    user: user.to_string(),
                    change: *change,
                });
            }
            Err(CatalogError::Abandoned) => {
                debug!(
                    "event={} module=catalog status=abandoned isbn={} user={}",
                    event, isbn, user
                );
            }
            Err(err) if err.is_not_found() => {
                debug!(
                    "event={} module=catalog status=not_found isbn={} user={} reason={}",
                    event, isbn, user, err
                );
            }
            Err(err) => {
                error!(
                    "event={} module=catalog status=error isbn={} user={} error={}",
                    event, isbn, user, err
                );
            }
        }
        result
    }

    /// Register a listener for [`REVIEW_UPSERTED`] or [`REVIEW_DELETED`].
    ///
    /// Listeners run on their own threads and receive the JSON form of a
    /// [`ReviewEvent`]. Returns the listener id.
    #[cfg(feature = "emitter")]
    pub fn on<F>(&self, event: &str, listener: F) -> String
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        let mut emitter = self
            .emitter
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        emitter.on(event, listener)
    }

    #[cfg(feature = "emitter")]
    fn notify(&self, event: ReviewEvent) {
        let payload = match serde_json::to_string(&event) {
            Ok(payload) => payload,
            Err(err) => {
                error!("event=review_notify module=catalog status=error error={}", err);
                return;
            }
        };
        let mut emitter = self
            .emitter
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        emitter.emit(event.event_type(), payload);
    }

    #[cfg(not(feature = "emitter"))]
    fn notify(&self, _event: ReviewEvent) {}
}

fn not_found(err: query::QueryError) -> CatalogError {
    debug!("event=query module=catalog status=not_found reason={}", err);
    CatalogError::from(err)
}
