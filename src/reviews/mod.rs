//! Review Mutator: the only code that changes a book's reviews.
//!
//! Both operations are pure: they take a snapshot by value, return the
//! updated snapshot, and do no I/O. Persistence and exclusivity belong to
//! the gate that calls them.

mod error;
mod mutator;

pub use error::ReviewError;
pub use mutator::{delete_review, upsert_review};

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a successful mutation did to the user's review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewChange {
    Created,
    Updated,
    Deleted,
}

impl ReviewChange {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewChange::Created => "created",
            ReviewChange::Updated => "updated",
            ReviewChange::Deleted => "deleted",
        }
    }
}

impl fmt::Display for ReviewChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
