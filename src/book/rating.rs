use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// A review score.
///
/// Stored as a JSON number in whatever form it arrived (`5` stays `5`,
/// `4.5` stays `4.5`) so rewriting the collection does not reformat
/// ratings that were never touched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rating(Number);

impl Rating {
    /// Build a rating from a float. Returns `None` for NaN or infinities,
    /// which JSON cannot represent.
    pub fn from_f64(value: f64) -> Option<Self> {
        Number::from_f64(value).map(Rating)
    }

    pub fn as_f64(&self) -> f64 {
        self.0.as_f64().unwrap_or_default()
    }
}

impl From<i32> for Rating {
    fn from(value: i32) -> Self {
        Rating(Number::from(value))
    }
}

impl From<i64> for Rating {
    fn from(value: i64) -> Self {
        Rating(Number::from(value))
    }
}

impl From<Number> for Rating {
    fn from(value: Number) -> Self {
        Rating(value)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
