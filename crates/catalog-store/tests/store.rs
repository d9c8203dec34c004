//! Behavior of the catalog and reader against a real data root.

use std::{fs, path::Path};

use catalog_store::{ChallengeStore, ErrorKind, StoreError};
use serde_json::json;

fn write_challenge(root: &Path, id: &str, metadata: &str, prompt: &str, tests: &str, user: &str) {
    let dir = root.join(id);
    fs::create_dir_all(&dir).expect("create challenge dir");
    fs::write(dir.join("metadata.json"), metadata).expect("write metadata");
    fs::write(dir.join("prompt.md"), prompt).expect("write prompt");
    fs::write(dir.join("tests.ts"), tests).expect("write tests");
    fs::write(dir.join("user.ts"), user).expect("write user");
}

fn labeled(root: &Path, id: &str, label: &str) {
    write_challenge(
        root,
        id,
        &json!({ "label": label }).to_string(),
        "# Prompt",
        "// t",
        "// u",
    );
}

#[tokio::test]
async fn test_listing_sorted_by_numeric_id() {
    let dir = tempfile::tempdir().unwrap();
    labeled(dir.path(), "10", "Day Ten");
    labeled(dir.path(), "2", "Day Two");
    labeled(dir.path(), "1", "Day One");

    let listing = ChallengeStore::new(dir.path()).list().await.unwrap();

    let ids: Vec<_> = listing.entries.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "10"]);
    assert!(!listing.has_skipped());
}

#[tokio::test]
async fn test_ids_wider_than_u64_are_listed_and_readable() {
    let dir = tempfile::tempdir().unwrap();
    let big = "18446744073709551616";
    labeled(dir.path(), big, "Big");
    labeled(dir.path(), "2", "Two");
    let store = ChallengeStore::new(dir.path());

    let listing = store.list().await.unwrap();
    let ids: Vec<_> = listing.entries.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["2", big]);
    assert!(!listing.has_skipped());

    let detail = store.read(big).await.unwrap();
    assert_eq!(detail.metadata, json!({ "label": "Big" }));
}

#[tokio::test]
async fn test_listing_entry_shape() {
    let dir = tempfile::tempdir().unwrap();
    labeled(dir.path(), "3", "Naughty or Nice");

    let listing = ChallengeStore::new(dir.path()).list().await.unwrap();

    assert_eq!(
        serde_json::to_value(&listing.entries).unwrap(),
        json!([{ "id": "3", "name": "Naughty or Nice", "url": "/challenge/3" }])
    );
}

#[tokio::test]
async fn test_name_comes_from_label_not_directory() {
    let dir = tempfile::tempdir().unwrap();
    labeled(dir.path(), "7", "Wrapping Paper");

    let listing = ChallengeStore::new(dir.path()).list().await.unwrap();

    assert_eq!(listing.entries[0].name, "Wrapping Paper");
    assert_ne!(listing.entries[0].name, listing.entries[0].id);
}

#[tokio::test]
async fn test_empty_root_lists_nothing() {
    let dir = tempfile::tempdir().unwrap();

    let listing = ChallengeStore::new(dir.path()).list().await.unwrap();

    assert!(listing.entries.is_empty());
    assert!(listing.skipped.is_empty());
}

#[tokio::test]
async fn test_malformed_metadata_is_skipped_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    labeled(dir.path(), "1", "Day One");
    write_challenge(dir.path(), "2", "{ not json", "# Two", "", "");
    write_challenge(dir.path(), "3", r#"{"title": "no label"}"#, "# Three", "", "");
    fs::create_dir(dir.path().join("4")).unwrap();
    labeled(dir.path(), "5", "Day Five");

    let listing = ChallengeStore::new(dir.path()).list().await.unwrap();

    let ids: Vec<_> = listing.entries.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "5"]);

    let skipped: Vec<_> = listing.skipped.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(skipped, vec!["2", "3", "4"]);
    assert!(listing.skipped[2].reason.contains("metadata.json"));
}

#[tokio::test]
async fn test_read_projection() {
    let dir = tempfile::tempdir().unwrap();
    write_challenge(
        dir.path(),
        "1",
        r#"{"label": "Day One"}"#,
        "# Hello",
        "// t",
        "// u",
    );

    let detail = ChallengeStore::new(dir.path()).read("1").await.unwrap();

    assert_eq!(
        serde_json::to_value(&detail).unwrap(),
        json!({
            "metadata": { "label": "Day One" },
            "prompt": "<h1>Hello</h1>\n",
            "tests": "// t",
            "user": "// u",
        })
    );
}

#[tokio::test]
async fn test_read_passes_metadata_through() {
    let dir = tempfile::tempdir().unwrap();
    let metadata = json!({
        "label": "Day Two",
        "difficulty": "hard",
        "tags": ["types", "recursion"],
        "points": 3,
    });
    write_challenge(dir.path(), "2", &metadata.to_string(), "", "", "");

    let detail = ChallengeStore::new(dir.path()).read("2").await.unwrap();

    assert_eq!(detail.metadata, metadata);
}

#[tokio::test]
async fn test_sources_returned_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let tests = "import { Expect, Equal } from 'type-testing';\r\n\r\ntype t = Expect<Equal<A, 'ü'>>;\n\n";
    let user = "\u{feff}type A = 'ü'; // <b>not html</b>\t\n";
    write_challenge(dir.path(), "9", r#"{"label": "x"}"#, "", tests, user);

    let detail = ChallengeStore::new(dir.path()).read("9").await.unwrap();

    assert_eq!(detail.tests.as_bytes(), tests.as_bytes());
    assert_eq!(detail.user.as_bytes(), user.as_bytes());
}

#[tokio::test]
async fn test_missing_id_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    labeled(dir.path(), "1", "Day One");

    let err = ChallengeStore::new(dir.path()).read("42").await.unwrap_err();

    assert!(matches!(err, StoreError::NotFound { ref id } if id == "42"));
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    labeled(dir.path(), "1", "Day One");
    fs::remove_file(dir.path().join("1/tests.ts")).unwrap();

    let err = ChallengeStore::new(dir.path()).read("1").await.unwrap_err();

    assert!(err.is_not_found());
    assert!(err.to_string().contains("tests.ts"));
}

#[tokio::test]
async fn test_malformed_metadata_fails_read() {
    let dir = tempfile::tempdir().unwrap();
    write_challenge(dir.path(), "1", "[1,", "# One", "", "");

    let err = ChallengeStore::new(dir.path()).read("1").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::MalformedData);
}

#[tokio::test]
async fn test_file_in_place_of_directory_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("8"), "stray file").unwrap();

    let err = ChallengeStore::new(dir.path()).read("8").await.unwrap_err();

    assert!(matches!(err, StoreError::NotFound { .. }));
}
