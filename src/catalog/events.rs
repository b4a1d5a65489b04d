//! Change notifications fired after a review mutation is persisted.

use serde::{Deserialize, Serialize};

use crate::reviews::ReviewChange;

/// Fired after a review is created or updated.
pub const REVIEW_UPSERTED: &str = "review.upserted";
/// Fired after a review is deleted.
pub const REVIEW_DELETED: &str = "review.deleted";

/// Payload of a review notification, delivered to listeners as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewEvent {
    pub isbn: String,
    pub user: String,
    pub change: ReviewChange,
}

impl ReviewEvent {
    pub fn event_type(&self) -> &'static str {
        match self.change {
            ReviewChange::Deleted => REVIEW_DELETED,
            ReviewChange::Created | ReviewChange::Updated => REVIEW_UPSERTED,
        }
    }

    /// Parse the JSON payload a listener receives.
    pub fn decode(data: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(data)
    }
}
