//! Save/load tests on real files

use std::fs;

use library_catalog::{
    repository::json_file, AppError, Book, EBook, Library, Member, MemberId,
};
use serde_json::{json, Value};

fn sample_library() -> Library {
    let mut library = Library::new("City Library");
    library.add_book(Book::new("Dune", "Herrick", "111", 2)).unwrap();
    library.add_book(EBook::new("Neuromancer", "Gibson", "222", 1, "EPUB")).unwrap();
    library.add_member(Member::new("Alice", "M1")).unwrap();
    library.add_member(Member::new("Bob", 7_i64)).unwrap();
    library.lend(&MemberId::from("M1"), "111").unwrap();
    library.lend(&MemberId::from(7_i64), "222").unwrap();
    library
}

#[test]
fn test_empty_library_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library.json");

    json_file::save(&Library::new("City Library"), &path).unwrap();
    let loaded = json_file::load(&path).unwrap();

    assert_eq!(loaded.name(), "City Library");
    assert_eq!(loaded.book_count(), 0);
    assert_eq!(loaded.members().len(), 0);
}

#[test]
fn test_round_trip_preserves_books_and_members() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library.json");
    let library = sample_library();

    json_file::save(&library, &path).unwrap();
    let loaded = json_file::load(&path).unwrap();

    assert_eq!(loaded, library);
    assert_eq!(loaded.book("111").unwrap().copies(), 1);
    assert_eq!(loaded.member(&MemberId::from(7_i64)).unwrap().borrowed_books(), ["222"]);
}

#[test]
fn test_ebook_reloads_as_ebook() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library.json");
    let mut library = Library::new("City Library");
    library.add_book(EBook::new("Neuromancer", "Gibson", "222", 1, "EPUB")).unwrap();

    json_file::save(&library, &path).unwrap();
    let document: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(document["books"]["222"]["kind"], "ebook");

    let loaded = json_file::load(&path).unwrap();
    let entry = loaded.book("222").unwrap();
    assert!(entry.is_ebook());
    assert_eq!(entry.file_format(), Some("EPUB"));
}

#[test]
fn test_loads_untagged_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library.json");
    let document = json!({
        "name": "Old Library",
        "books": {
            "111": { "title": "Dune", "author": "Herrick", "ISBN": "111", "copies": 2 },
            "222": { "title": "Neuromancer", "author": "Gibson", "ISBN": "222", "copies": 1, "file_format": "PDF" }
        },
        "members": [
            { "name": "Alice", "member_id": "M1", "borrowed_books": ["111"] }
        ]
    });
    fs::write(&path, document.to_string()).unwrap();

    let loaded = json_file::load(&path).unwrap();
    assert!(!loaded.book("111").unwrap().is_ebook());
    assert!(loaded.book("222").unwrap().is_ebook());
    assert_eq!(loaded.members()[0].borrowed_books(), ["111"]);
}

#[test]
fn test_save_overwrites_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library.json");
    fs::write(&path, "stale content that is much longer than an empty library document").unwrap();

    json_file::save(&Library::new("City Library"), &path).unwrap();
    assert_eq!(json_file::load(&path).unwrap().name(), "City Library");
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.json");

    let err = json_file::load(&path).unwrap_err();
    assert!(matches!(err, AppError::FileNotFound(ref p) if *p == path));
    assert!(err.is_persistence());
}

#[test]
fn test_load_invalid_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library.json");
    fs::write(&path, "{\"name\": \"City Library\",").unwrap();

    assert!(matches!(json_file::load(&path), Err(AppError::Parse(_))));
}

#[test]
fn test_load_rejects_incomplete_book() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library.json");
    let document = json!({
        "name": "City Library",
        "books": {
            "111": { "title": "Dune", "author": "Herrick", "ISBN": "111", "copies": 2 },
            "333": { "title": "Emma", "ISBN": "333", "copies": 1 }
        },
        "members": []
    });
    fs::write(&path, document.to_string()).unwrap();

    let err = json_file::load(&path).unwrap_err();
    assert!(matches!(err, AppError::MissingField(ref f) if f == "author"));
}

#[test]
fn test_save_to_unwritable_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-dir").join("library.json");

    let err = json_file::save(&Library::new("City Library"), &path).unwrap_err();
    assert!(matches!(err, AppError::Io(_)));
}
