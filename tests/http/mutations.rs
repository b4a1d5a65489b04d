use std::fs;
use std::sync::Arc;
use std::time::Duration;

use bookshelf::store::encode_collection;
use bookshelf::{Catalog, JsonFileStore, Lock, RecordStore};
use serde_json::{json, Value};
use tempfile::TempDir;

use crate::support::{seed, start_seeded, start_server, tokens, trusted_header};

#[tokio::test]
async fn upsert_then_update_then_delete() {
    let (base, catalog) = start_seeded().await;
    let client = reqwest::Client::new();
    let url = format!("{base}/api/books/111/review");

    let resp = client
        .post(&url)
        .bearer_auth("alice-token")
        .json(&json!({ "rating": 5, "comment": "great" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["change"], "created");
    assert_eq!(body["message"], "Review added/updated successfully");

    let resp = client
        .post(&url)
        .bearer_auth("alice-token")
        .json(&json!({ "rating": 3, "comment": "ok" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["change"], "updated");

    let reviews = catalog.reviews_by_isbn("111").unwrap();
    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews[1].user, "alice");
    assert_eq!(reviews[1].comment, "ok");

    let resp = client
        .delete(&url)
        .bearer_auth("alice-token")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Review deleted successfully");

    let resp = client
        .delete(&url)
        .bearer_auth("alice-token")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn mutation_without_token_is_401_and_changes_nothing() {
    let (base, catalog) = start_seeded().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/books/111/review"))
        .json(&json!({ "rating": 1, "comment": "anonymous" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    let resp = client
        .delete(format!("{base}/api/books/111/review"))
        .bearer_auth("forged")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    assert_eq!(catalog.all_books().unwrap(), seed());
}

#[tokio::test]
async fn upsert_on_unknown_book_is_404() {
    let (base, _) = start_seeded().await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/api/books/999/review"))
        .bearer_auth("bob-token")
        .json(&json!({ "rating": 2, "comment": "?" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn undecodable_body_is_400() {
    let (base, catalog) = start_seeded().await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/api/books/111/review"))
        .bearer_auth("bob-token")
        .json(&json!({ "rating": "five" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    assert_eq!(catalog.all_books().unwrap(), seed());
}

#[tokio::test]
async fn trusted_header_identifies_the_user() {
    let catalog = Arc::new(Catalog::new(bookshelf::InMemoryRecordStore::seeded(seed())));
    let base = start_server(Arc::clone(&catalog), trusted_header()).await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/api/books/222/review"))
        .header("x-user-id", "carol")
        .json(&json!({ "rating": 4.5, "comment": "charming" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let reviews = catalog.reviews_by_isbn("222").unwrap();
    assert_eq!(reviews[0].user, "carol");
    assert_eq!(reviews[0].rating.to_string(), "4.5");
}

#[tokio::test]
async fn concurrent_posts_keep_every_review() {
    let (base, catalog) = start_seeded().await;
    let client = reqwest::Client::new();

    let mut requests = Vec::new();
    for token in ["alice-token", "bob-token"] {
        for round in 0..5 {
            let client = client.clone();
            let url = format!("{base}/api/books/333/review");
            requests.push(tokio::spawn(async move {
                client
                    .post(url)
                    .bearer_auth(token)
                    .json(&json!({ "rating": round, "comment": format!("round {round}") }))
                    .send()
                    .await
                    .unwrap()
                    .status()
            }));
        }
    }
    for request in requests {
        assert_eq!(request.await.unwrap(), 200);
    }

    let reviews = catalog.reviews_by_isbn("333").unwrap();
    let mut users: Vec<&str> = reviews.iter().map(|r| r.user.as_str()).collect();
    users.sort_unstable();
    assert_eq!(users, ["alice", "bob"]);
}

#[tokio::test]
async fn storage_fault_is_500() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("books.json");
    fs::write(&path, encode_collection(&seed()).unwrap()).unwrap();

    let store = JsonFileStore::new(&path);
    assert_eq!(store.load().unwrap(), seed());
    let catalog = Arc::new(Catalog::new(store));

    let app = bookshelf::http::router(catalog, tokens());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    fs::write(&path, "garbage").unwrap();

    let resp = reqwest::get(format!("http://{addr}/api/books/isbn/111"))
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("corrupt"));
}

#[tokio::test]
async fn request_dropped_while_waiting_for_gate_writes_nothing() {
    let (base, catalog) = start_seeded().await;
    let holder = catalog.gate().lock().acquire().unwrap();

    let client = reqwest::Client::builder()
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();
    let result = client
        .post(format!("{base}/api/books/222/review"))
        .bearer_auth("alice-token")
        .json(&json!({ "rating": 1, "comment": "abandoned" }))
        .send()
        .await;
    assert!(result.unwrap_err().is_timeout());

    // Let the server see the closed connection before the gate opens.
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(catalog.gate().lock().is_locked().unwrap());
    drop(holder);
    tokio::time::sleep(Duration::from_millis(300)).await;

    assert!(catalog.reviews_by_isbn("222").unwrap().is_empty());
    assert!(!catalog.gate().lock().is_locked().unwrap());

    let resp = reqwest::Client::new()
        .post(format!("{base}/api/books/222/review"))
        .bearer_auth("alice-token")
        .json(&json!({ "rating": 4, "comment": "kept" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let reviews = catalog.reviews_by_isbn("222").unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].comment, "kept");
}
