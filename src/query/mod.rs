//! Query Projections: read-only views over one loaded snapshot.
//!
//! These functions never touch storage. The catalog loads a fresh snapshot
//! for every request and hands it here.

mod error;

pub use error::QueryError;

use crate::book::{find_book, Book, Review};

fn same_text(left: &str, right: &str) -> bool {
    left == right || left.to_lowercase() == right.to_lowercase()
}

/// The book with exactly this ISBN (case-sensitive).
pub fn book_by_isbn<'a>(books: &'a [Book], isbn: &str) -> Result<&'a Book, QueryError> {
    find_book(books, isbn).ok_or_else(|| QueryError::BookNotFound(isbn.to_string()))
}

/// All books whose author matches, ignoring case.
pub fn books_by_author<'a>(books: &'a [Book], author: &str) -> Result<Vec<&'a Book>, QueryError> {
    let matches: Vec<&Book> = books
        .iter()
        .filter(|book| same_text(&book.author, author))
        .collect();
    if matches.is_empty() {
        return Err(QueryError::NotFound(format!("for author {}", author)));
    }
    Ok(matches)
}

/// All books whose title matches, ignoring case.
pub fn books_by_title<'a>(books: &'a [Book], title: &str) -> Result<Vec<&'a Book>, QueryError> {
    let matches: Vec<&Book> = books
        .iter()
        .filter(|book| same_text(&book.title, title))
        .collect();
    if matches.is_empty() {
        return Err(QueryError::NotFound(format!("with title {}", title)));
    }
    Ok(matches)
}

/// The review list of the book with this ISBN, in stored order.
pub fn reviews_by_isbn<'a>(books: &'a [Book], isbn: &str) -> Result<&'a [Review], QueryError> {
    book_by_isbn(books, isbn).map(|book| book.reviews.as_slice())
}
