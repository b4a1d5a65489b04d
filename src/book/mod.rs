//! Catalog data model: books, their reviews, and the collection that holds them.
//!
//! The whole [`Collection`] is the unit of persistence. Field order on the
//! structs below is the field order written to disk.

mod rating;

pub use rating::Rating;

use serde::{Deserialize, Serialize};

/// A single user's review of a book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub user: String,
    pub rating: Rating,
    pub comment: String,
}

impl Review {
    pub fn new(user: impl Into<String>, rating: impl Into<Rating>, comment: impl Into<String>) -> Self {
        Review {
            user: user.into(),
            rating: rating.into(),
            comment: comment.into(),
        }
    }
}

/// A catalog entry. Only `reviews` changes after seeding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub isbn: String,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl Book {
    pub fn new(isbn: impl Into<String>, title: impl Into<String>, author: impl Into<String>) -> Self {
        Book {
            isbn: isbn.into(),
            title: title.into(),
            author: author.into(),
            reviews: Vec::new(),
        }
    }

    pub fn with_reviews(mut self, reviews: Vec<Review>) -> Self {
        self.reviews = reviews;
        self
    }
}

/// The entire persisted state, in stored order.
pub type Collection = Vec<Book>;

/// Find a book by exact ISBN.
pub fn find_book<'a>(collection: &'a [Book], isbn: &str) -> Option<&'a Book> {
    collection.iter().find(|book| book.isbn == isbn)
}
