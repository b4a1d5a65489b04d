use crate::book::{Book, Collection, Rating, Review};

use super::{ReviewChange, ReviewError};

fn book_mut<'a>(collection: &'a mut Collection, isbn: &str) -> Result<&'a mut Book, ReviewError> {
    collection
        .iter_mut()
        .find(|book| book.isbn == isbn)
        .ok_or_else(|| ReviewError::BookNotFound(isbn.to_string()))
}

/// Add `user`'s review of `isbn`, or overwrite it if one exists.
///
/// An existing review keeps its position in the list; a new one is appended.
pub fn upsert_review(
    mut collection: Collection,
    isbn: &str,
    user: &str,
    rating: Rating,
    comment: &str,
) -> Result<(Collection, ReviewChange), ReviewError> {
    let book = book_mut(&mut collection, isbn)?;

    let change = match book.reviews.iter_mut().find(|review| review.user == user) {
        Some(existing) => {
            existing.rating = rating;
            existing.comment = comment.to_string();
            ReviewChange::Updated
        }
        None => {
            book.reviews.push(Review::new(user, rating, comment));
            ReviewChange::Created
        }
    };

    Ok((collection, change))
}

/// Remove `user`'s review of `isbn`, keeping the other reviews in order.
pub fn delete_review(
    mut collection: Collection,
    isbn: &str,
    user: &str,
) -> Result<(Collection, ReviewChange), ReviewError> {
    let book = book_mut(&mut collection, isbn)?;

    let position = book
        .reviews
        .iter()
        .position(|review| review.user == user)
        .ok_or_else(|| ReviewError::ReviewNotFound {
            isbn: isbn.to_string(),
            user: user.to_string(),
        })?;
    book.reviews.remove(position);

    Ok((collection, ReviewChange::Deleted))
}
