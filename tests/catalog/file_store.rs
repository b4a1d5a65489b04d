//! The catalog over a real JSON file.

use std::fs;
use std::sync::Arc;
use std::thread;

use bookshelf::store::encode_collection;
use bookshelf::{
    Catalog, CatalogError, Identity, JsonFileStore, Rating, RecordStore, StoreError,
};
use tempfile::TempDir;

use crate::support::{library, review_users, single_book};

fn seeded_file(dir: &TempDir, books: &bookshelf::Collection) -> JsonFileStore {
    let store = JsonFileStore::new(dir.path().join("books.json"));
    fs::write(store.path(), encode_collection(books).unwrap()).unwrap();
    store
}

#[test]
fn mutations_are_persisted_to_disk() {
    let dir = TempDir::new().unwrap();
    let catalog = Catalog::new(seeded_file(&dir, &single_book()));

    catalog
        .upsert_review(&Identity::new("alice"), "111", Rating::from(5), "great")
        .unwrap();

    let reopened = JsonFileStore::new(dir.path().join("books.json"));
    let books = reopened.load().unwrap();
    assert_eq!(review_users(&books, "111"), ["alice"]);
}

#[test]
fn save_of_load_is_a_no_op() {
    let dir = TempDir::new().unwrap();
    let store = seeded_file(&dir, &library());
    let before = fs::read(store.path()).unwrap();

    store.save(&store.load().unwrap()).unwrap();

    assert_eq!(fs::read(store.path()).unwrap(), before);
    assert_eq!(store.load().unwrap(), library());
}

#[test]
fn hand_written_seed_survives_rewrite() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("books.json");
    fs::write(
        &path,
        r#"[
  {
    "isbn": "1",
    "title": "Things Fall Apart",
    "author": "Chinua Achebe",
    "reviews": [
      { "user": "alice", "rating": 4.5, "comment": "tense" },
      { "user": "bob", "rating": 2, "comment": "slow" }
    ]
  }
]"#,
    )
    .unwrap();

    let catalog = Catalog::new(JsonFileStore::new(&path));
    catalog
        .upsert_review(&Identity::new("carol"), "1", Rating::from(3), "fine")
        .unwrap();

    let reviews = catalog.reviews_by_isbn("1").unwrap();
    assert_eq!(reviews.len(), 3);
    assert_eq!(reviews[0].rating.to_string(), "4.5");
    assert_eq!(reviews[1].rating.to_string(), "2");
    assert_eq!(reviews[2].user, "carol");
}

#[test]
fn corrupt_file_is_a_server_error_and_is_not_overwritten() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("books.json");
    fs::write(&path, "[{ not json").unwrap();

    let catalog = Catalog::new(JsonFileStore::new(&path));
    let err = catalog
        .upsert_review(&Identity::new("alice"), "111", Rating::from(5), "great")
        .unwrap_err();

    assert!(matches!(
        err,
        CatalogError::Store(StoreError::CorruptState { .. })
    ));
    assert_eq!(err.status_code(), 500);
    assert_eq!(fs::read_to_string(&path).unwrap(), "[{ not json");
}

#[test]
fn missing_file_is_storage_unavailable() {
    let dir = TempDir::new().unwrap();
    let catalog = Catalog::new(JsonFileStore::new(dir.path().join("absent.json")));

    let err = catalog.all_books().unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Store(StoreError::StorageUnavailable { .. })
    ));
}

#[test]
fn concurrent_writers_and_readers_on_disk() {
    const WRITERS: usize = 8;
    let dir = TempDir::new().unwrap();
    let catalog = Arc::new(Catalog::new(seeded_file(&dir, &single_book())));

    thread::scope(|scope| {
        for i in 0..WRITERS {
            let catalog = Arc::clone(&catalog);
            scope.spawn(move || {
                catalog
                    .upsert_review(
                        &Identity::new(format!("user-{i}")),
                        "111",
                        Rating::from(4),
                        "on disk",
                    )
                    .unwrap();
            });
        }

        for _ in 0..2 {
            let catalog = Arc::clone(&catalog);
            scope.spawn(move || {
                for _ in 0..50 {
                    // Atomic rename: a reader never sees a half-written file.
                    catalog.reviews_by_isbn("111").unwrap();
                }
            });
        }
    });

    assert_eq!(catalog.reviews_by_isbn("111").unwrap().len(), WRITERS);
    let leftovers: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(leftovers.len(), 1);
}
