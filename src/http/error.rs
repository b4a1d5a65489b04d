//! Error responses for the HTTP transport.

use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use serde_json::json;

use crate::access::AccessError;
use crate::catalog::CatalogError;

/// Everything a route can fail with, mapped to a status code.
#[derive(Debug)]
pub enum ApiError {
    /// A catalog operation failed (not-found or storage fault).
    Catalog(CatalogError),
    /// Missing or invalid credentials on a mutation.
    Unauthorized(AccessError),
    /// Request body could not be decoded.
    BadRequest(String),
    /// The blocking task running the operation died.
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Catalog(e) => StatusCode::from_u16(e.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Catalog(e) => write!(f, "{}", e),
            ApiError::Unauthorized(e) => write!(f, "{}", e),
            ApiError::BadRequest(msg) => write!(f, "bad request: {}", msg),
            ApiError::Internal(msg) => write!(f, "internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        ApiError::Catalog(err)
    }
}

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        ApiError::Unauthorized(err)
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(
                "event=http_response module=http status={} error={}",
                status.as_u16(),
                self
            );
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
