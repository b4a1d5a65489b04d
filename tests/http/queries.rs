use serde_json::{json, Value};

use crate::support::start_seeded;

#[tokio::test]
async fn health_check() {
    let (base, _) = start_seeded().await;
    let resp = reqwest::get(format!("{base}/health")).await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "ok": true }));
}

#[tokio::test]
async fn list_all_books() {
    let (base, _) = start_seeded().await;
    let resp = reqwest::get(format!("{base}/api/books")).await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    let isbns: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["isbn"].as_str().unwrap())
        .collect();
    assert_eq!(isbns, ["111", "222", "333"]);
}

#[tokio::test]
async fn book_by_isbn() {
    let (base, _) = start_seeded().await;
    let resp = reqwest::get(format!("{base}/api/books/isbn/111")).await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "isbn": "111",
            "title": "Things Fall Apart",
            "author": "Chinua Achebe",
            "reviews": [{ "user": "bob", "rating": 4, "comment": "worth it" }]
        })
    );
}

#[tokio::test]
async fn books_by_author_ignores_case() {
    let (base, _) = start_seeded().await;
    let resp = reqwest::get(format!("{base}/api/books/author/chinua%20ACHEBE"))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn books_by_title_ignores_case() {
    let (base, _) = start_seeded().await;
    let resp = reqwest::get(format!("{base}/api/books/title/FAIRY%20TALES"))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body[0]["isbn"], "222");
}

#[tokio::test]
async fn reviews_of_a_book() {
    let (base, _) = start_seeded().await;
    let resp = reqwest::get(format!("{base}/api/books/review/111")).await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!([{ "user": "bob", "rating": 4, "comment": "worth it" }]));
}

#[tokio::test]
async fn unknown_isbn_is_404_on_every_query() {
    let (base, _) = start_seeded().await;
    for path in [
        "/api/books/isbn/999",
        "/api/books/author/999",
        "/api/books/title/999",
        "/api/books/review/999",
    ] {
        let resp = reqwest::get(format!("{base}{path}")).await.unwrap();
        assert_eq!(resp.status(), 404, "{path}");
        let body: Value = resp.json().await.unwrap();
        assert!(body["error"].is_string(), "{path}");
    }
}
