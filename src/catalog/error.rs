use std::error::Error;
use std::fmt;

use crate::gate::GateError;
use crate::lock::LockError;
use crate::query::QueryError;
use crate::reviews::ReviewError;
use crate::store::StoreError;

/// Every way a catalog operation can fail.
#[derive(Debug)]
pub enum CatalogError {
    /// A list query matched no books.
    NotFound(String),
    /// No book with this ISBN.
    BookNotFound(String),
    /// The user has no review on this book.
    ReviewNotFound { isbn: String, user: String },
    /// The record store failed (unavailable medium or corrupt contents).
    Store(StoreError),
    /// The concurrency gate could not be acquired.
    Lock(LockError),
    /// The caller went away before the gate was granted; nothing changed.
    Abandoned,
}

impl CatalogError {
    /// Expected "nothing there" outcomes, as opposed to server faults.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CatalogError::NotFound(_)
                | CatalogError::BookNotFound(_)
                | CatalogError::ReviewNotFound { .. }
        )
    }

    /// Map this error to an HTTP-style status code.
    ///
    /// `Abandoned` uses 499 (client closed request); nobody is left to
    /// receive it.
    pub fn status_code(&self) -> u16 {
        match self {
            _ if self.is_not_found() => 404,
            CatalogError::Abandoned => 499,
            _ => 500,
        }
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::NotFound(what) => write!(f, "no books found {}", what),
            CatalogError::BookNotFound(isbn) => write!(f, "book not found: {}", isbn),
            CatalogError::ReviewNotFound { isbn, user } => {
                write!(f, "review not found: {} on {}", user, isbn)
            }
            CatalogError::Store(e) => write!(f, "{}", e),
            CatalogError::Lock(e) => write!(f, "{}", e),
            CatalogError::Abandoned => write!(f, "request abandoned before the gate was granted"),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CatalogError::Store(e) => Some(e),
            CatalogError::Lock(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for CatalogError {
    fn from(err: StoreError) -> Self {
        CatalogError::Store(err)
    }
}

impl From<LockError> for CatalogError {
    fn from(err: LockError) -> Self {
        CatalogError::Lock(err)
    }
}

impl From<QueryError> for CatalogError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::BookNotFound(isbn) => CatalogError::BookNotFound(isbn),
            QueryError::NotFound(what) => CatalogError::NotFound(what),
        }
    }
}

impl From<ReviewError> for CatalogError {
    fn from(err: ReviewError) -> Self {
        match err {
            ReviewError::BookNotFound(isbn) => CatalogError::BookNotFound(isbn),
            ReviewError::ReviewNotFound { isbn, user } => {
                CatalogError::ReviewNotFound { isbn, user }
            }
        }
    }
}

impl From<GateError<ReviewError>> for CatalogError {
    fn from(err: GateError<ReviewError>) -> Self {
        match err {
            GateError::Lock(e) => CatalogError::Lock(e),
            GateError::Store(e) => CatalogError::Store(e),
            GateError::Operation(e) => e.into(),
            GateError::Abandoned => CatalogError::Abandoned,
        }
    }
}
