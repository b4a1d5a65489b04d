use std::fmt;

/// Empty results of a read projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// A single-book lookup found no book with this ISBN.
    BookNotFound(String),
    /// A list query matched nothing.
    NotFound(String),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::BookNotFound(isbn) => write!(f, "book not found: {}", isbn),
            QueryError::NotFound(what) => write!(f, "no books found {}", what),
        }
    }
}

impl std::error::Error for QueryError {}
