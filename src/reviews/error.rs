use std::fmt;

/// Expected, user-facing failures of a review mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewError {
    /// No book with this ISBN exists.
    BookNotFound(String),
    /// The book exists but the user has not reviewed it.
    ReviewNotFound { isbn: String, user: String },
}

impl fmt::Display for ReviewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewError::BookNotFound(isbn) => write!(f, "book not found: {}", isbn),
            ReviewError::ReviewNotFound { isbn, user } => {
                write!(f, "review not found: {} on {}", user, isbn)
            }
        }
    }
}

impl std::error::Error for ReviewError {}
