//! Collection behavior through the public `Database` handle.

use std::collections::HashSet;

use hubdb_storage::{Database, DocumentId, Filter, StorageError};
use serde_json::{json, Map, Value};

fn doc(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("not an object: {other}"),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_inserts_get_distinct_ids() {
    let db = Database::in_memory();

    let handles: Vec<_> = (0..32)
        .map(|i| {
            let stars = db.collection("stars");
            tokio::spawn(async move { stars.insert_one(doc(json!({"n": i}))).await })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        let id = handle.await.unwrap().unwrap();
        assert!(matches!(id, DocumentId::Object(_)));
        ids.insert(id.to_string());
    }

    assert_eq!(ids.len(), 32);
    assert_eq!(db.collection("stars").find_all().await.unwrap().len(), 32);
}

#[tokio::test]
async fn test_collections_are_isolated() {
    let db = Database::in_memory();
    db.collection("forks")
        .insert_one(doc(json!({"repoId": "r1"})))
        .await
        .unwrap();

    assert!(db.collection("stars").find_all().await.unwrap().is_empty());
    assert_eq!(db.collection("forks").find_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_clones_share_state() {
    let db = Database::in_memory();
    let other = db.clone();

    let id = db
        .collection("users")
        .insert_one(doc(json!({"login": "alice"})))
        .await
        .unwrap();

    let users = other.collection("users").find_all().await.unwrap();
    assert_eq!(users[0]["_id"], id.to_json());
}

#[tokio::test]
async fn test_commit_lookup_by_either_id_form() {
    let db = Database::in_memory();
    let commits = db.collection("commits");

    let generated = commits.insert_one(doc(json!({"repoId": "r1"}))).await.unwrap();
    commits
        .insert_one(doc(json!({"_id": "deadbeef", "repoId": "r1"})))
        .await
        .unwrap();

    let by_object = Filter::id_or_key(&generated.to_string());
    assert_eq!(commits.delete_one(&by_object).await.unwrap(), 1);

    let by_key = Filter::id_or_key("deadbeef");
    assert_eq!(commits.delete_one(&by_key).await.unwrap(), 1);
    assert_eq!(commits.delete_one(&by_key).await.unwrap(), 0);
}

#[tokio::test]
async fn test_update_sets_nested_paths() {
    let db = Database::in_memory();
    let repos = db.collection("repositories");
    let id = repos
        .insert_one(doc(json!({"name": "a", "settings": {"private": false, "topics": 2}})))
        .await
        .unwrap();
    let DocumentId::Object(oid) = id else {
        panic!("expected a generated id");
    };

    let outcome = repos
        .update_one(&Filter::Id(oid), doc(json!({"settings.private": true})))
        .await
        .unwrap();
    assert_eq!((outcome.matched, outcome.modified), (1, 1));

    let stored = repos.find_all().await.unwrap();
    assert_eq!(stored[0]["settings"], json!({"private": true, "topics": 2}));
}

#[tokio::test]
async fn test_replace_cannot_change_id() {
    let db = Database::in_memory();
    let users = db.collection("users");
    let DocumentId::Object(oid) = users.insert_one(doc(json!({"login": "a"}))).await.unwrap()
    else {
        panic!("expected a generated id");
    };

    let err = users
        .replace_one(&Filter::Id(oid), doc(json!({"_id": "other", "login": "b"})))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::ImmutableField));
}
