//! HTTP transport: maps REST routes onto the catalog.
//!
//! Requires the `http` feature. Uses axum for routing; catalog work runs on
//! tokio's blocking pool because the gate and the file store block.
//!
//! A mutation whose request is dropped (client gone, timeout) while it waits
//! for the gate is abandoned: once the gate is granted the cycle is skipped
//! and nothing is written.
//!
//! ## Routes
//!
//! - `GET /health`: `{ "ok": true }`.
//! - `GET /api/books`: the whole catalog.
//! - `GET /api/books/isbn/:isbn`: one book.
//! - `GET /api/books/author/:author`: books by author (case-insensitive).
//! - `GET /api/books/title/:title`: books by title (case-insensitive).
//! - `GET /api/books/review/:isbn`: a book's reviews.
//! - `POST /api/books/:isbn/review`: create or update the caller's review.
//!   Body = `{ "rating": <number>, "comment": <string> }`.
//! - `DELETE /api/books/:isbn/review`: delete the caller's review.
//!
//! Failures are `{ "error": "<message>" }` with 404 for missing books or
//! reviews, 401 for unauthenticated mutations, 400 for undecodable bodies
//! and 500 for storage faults.

mod error;

pub use error::ApiError;

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::sync::oneshot;

use crate::access::{Authenticator, Credentials, Identity};
use crate::book::{Book, Collection, Rating, Review};
use crate::catalog::{Catalog, CatalogError};
use crate::lock::{InMemoryLock, Lock};
use crate::reviews::ReviewChange;
use crate::store::RecordStore;

/// Body of `POST /api/books/:isbn/review`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewInput {
    pub rating: Rating,
    pub comment: String,
}

/// Confirmation returned by the review mutation routes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationResponse {
    pub message: String,
    pub change: ReviewChange,
}

/// Shared state behind every route.
pub struct AppState<S: RecordStore, L: Lock = InMemoryLock> {
    catalog: Arc<Catalog<S, L>>,
    authenticator: Arc<dyn Authenticator>,
}

impl<S: RecordStore, L: Lock> Clone for AppState<S, L> {
    fn clone(&self) -> Self {
        AppState {
            catalog: Arc::clone(&self.catalog),
            authenticator: Arc::clone(&self.authenticator),
        }
    }
}

impl<S: RecordStore, L: Lock> AppState<S, L> {
    pub fn new(catalog: Arc<Catalog<S, L>>, authenticator: Arc<dyn Authenticator>) -> Self {
        AppState {
            catalog,
            authenticator,
        }
    }

    fn authenticate(&self, headers: &HeaderMap) -> Result<Identity, ApiError> {
        let credentials = credentials_from_headers(headers);
        Ok(self.authenticator.authenticate(&credentials)?)
    }

    /// Run a catalog call on the blocking pool.
    async fn run<T, F>(&self, call: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&Catalog<S, L>) -> Result<T, CatalogError> + Send + 'static,
        S: 'static,
        L: 'static,
    {
        let catalog = Arc::clone(&self.catalog);
        let result = tokio::task::spawn_blocking(move || call(catalog.as_ref())).await?;
        Ok(result?)
    }
}

/// Build an axum `Router` serving the catalog.
pub fn router<S, L>(catalog: Arc<Catalog<S, L>>, authenticator: Arc<dyn Authenticator>) -> Router
where
    S: RecordStore + 'static,
    L: Lock + 'static,
{
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/books", get(all_books_handler::<S, L>))
        .route("/api/books/isbn/:isbn", get(book_by_isbn_handler::<S, L>))
        .route("/api/books/author/:author", get(books_by_author_handler::<S, L>))
        .route("/api/books/title/:title", get(books_by_title_handler::<S, L>))
        .route("/api/books/review/:isbn", get(reviews_handler::<S, L>))
        .route(
            "/api/books/:isbn/review",
            post(upsert_review_handler::<S, L>).delete(delete_review_handler::<S, L>),
        )
        .with_state(AppState::new(catalog, authenticator))
}

/// Serve the catalog over HTTP until `shutdown` resolves.
pub async fn serve<S, L, F>(
    catalog: Arc<Catalog<S, L>>,
    authenticator: Arc<dyn Authenticator>,
    listener: tokio::net::TcpListener,
    shutdown: F,
) -> Result<(), std::io::Error>
where
    S: RecordStore + 'static,
    L: Lock + 'static,
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let app = router(catalog, authenticator);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

/// `GET /health`: returns `{ "ok": true }`.
async fn health_handler() -> Json<Value> {
    Json(json!({ "ok": true }))
}

async fn all_books_handler<S: RecordStore + 'static, L: Lock + 'static>(
    State(state): State<AppState<S, L>>,
) -> Result<Json<Collection>, ApiError> {
    let books = state.run(|catalog| catalog.all_books()).await?;
    Ok(Json(books))
}

async fn book_by_isbn_handler<S: RecordStore + 'static, L: Lock + 'static>(
    State(state): State<AppState<S, L>>,
    Path(isbn): Path<String>,
) -> Result<Json<Book>, ApiError> {
    let book = state.run(move |catalog| catalog.book_by_isbn(&isbn)).await?;
    Ok(Json(book))
}

async fn books_by_author_handler<S: RecordStore + 'static, L: Lock + 'static>(
    State(state): State<AppState<S, L>>,
    Path(author): Path<String>,
) -> Result<Json<Vec<Book>>, ApiError> {
    let books = state
        .run(move |catalog| catalog.books_by_author(&author))
        .await?;
    Ok(Json(books))
}

async fn books_by_title_handler<S: RecordStore + 'static, L: Lock + 'static>(
    State(state): State<AppState<S, L>>,
    Path(title): Path<String>,
) -> Result<Json<Vec<Book>>, ApiError> {
    let books = state
        .run(move |catalog| catalog.books_by_title(&title))
        .await?;
    Ok(Json(books))
}

async fn reviews_handler<S: RecordStore + 'static, L: Lock + 'static>(
    State(state): State<AppState<S, L>>,
    Path(isbn): Path<String>,
) -> Result<Json<Vec<Review>>, ApiError> {
    let reviews = state.run(move |catalog| catalog.reviews_by_isbn(&isbn)).await?;
    Ok(Json(reviews))
}

/// `POST /api/books/:isbn/review`: authenticate first, then decode the body.
async fn upsert_review_handler<S: RecordStore + 'static, L: Lock + 'static>(
    State(state): State<AppState<S, L>>,
    Path(isbn): Path<String>,
    headers: HeaderMap,
    body: Result<Json<ReviewInput>, JsonRejection>,
) -> Result<Json<MutationResponse>, ApiError> {
    let identity = state.authenticate(&headers)?;
    let Json(input) = body.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    let (_waiting, waiter) = oneshot::channel::<()>();
    let change = state
        .run(move |catalog| {
            catalog.upsert_review_if(
                || caller_waiting(waiter),
                &identity,
                &isbn,
                input.rating,
                &input.comment,
            )
        })
        .await?;
    Ok(Json(MutationResponse {
        message: "Review added/updated successfully".into(),
        change,
    }))
}

/// `DELETE /api/books/:isbn/review`.
async fn delete_review_handler<S: RecordStore + 'static, L: Lock + 'static>(
    State(state): State<AppState<S, L>>,
    Path(isbn): Path<String>,
    headers: HeaderMap,
) -> Result<Json<MutationResponse>, ApiError> {
    let identity = state.authenticate(&headers)?;
    let (_waiting, waiter) = oneshot::channel::<()>();
    let change = state
        .run(move |catalog| catalog.delete_review_if(|| caller_waiting(waiter), &identity, &isbn))
        .await?;
    Ok(Json(MutationResponse {
        message: "Review deleted successfully".into(),
        change,
    }))
}

/// Whether the handler holding the sender half is still alive.
///
/// The sender never sends; it is dropped with the handler future when the
/// request is cancelled.
fn caller_waiting(mut waiter: oneshot::Receiver<()>) -> bool {
    matches!(waiter.try_recv(), Err(oneshot::error::TryRecvError::Empty))
}

/// Collect request headers into authenticator credentials.
///
/// Names are lowercased; values that are not visible ASCII are skipped.
fn credentials_from_headers(headers: &HeaderMap) -> Credentials {
    headers
        .iter()
        .filter_map(|(name, value)| Some((name.as_str(), value.to_str().ok()?)))
        .fold(Credentials::new(), |credentials, (name, value)| {
            credentials.with(name, value)
        })
}
