//! Store failures must surface as 500s on the request that hit them.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use hubdb_node::api::{create_router, AppState};
use hubdb_storage::{
    Database, Document, DocumentId, DocumentStore, Filter, Result, StorageError, UpdateOutcome,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

/// A store whose every operation fails.
#[derive(Default)]
struct FailingStore {
    calls: AtomicUsize,
}

impl FailingStore {
    fn fail(&self) -> StorageError {
        self.calls.fetch_add(1, Ordering::SeqCst);
        StorageError::Backend("connection refused".to_string())
    }
}

#[async_trait]
impl DocumentStore for FailingStore {
    async fn find(&self, _collection: &str, _filter: &Filter) -> Result<Vec<Document>> {
        Err(self.fail())
    }

    async fn insert_one(&self, _collection: &str, _document: Document) -> Result<DocumentId> {
        Err(self.fail())
    }

    async fn replace_one(
        &self,
        _collection: &str,
        _filter: &Filter,
        _replacement: Document,
    ) -> Result<UpdateOutcome> {
        Err(self.fail())
    }

    async fn update_one(
        &self,
        _collection: &str,
        _filter: &Filter,
        _fields: Document,
    ) -> Result<UpdateOutcome> {
        Err(self.fail())
    }

    async fn delete_one(&self, _collection: &str, _filter: &Filter) -> Result<u64> {
        Err(self.fail())
    }

    async fn ping(&self) -> Result<()> {
        Err(self.fail())
    }
}

fn failing_app() -> (Router, Arc<FailingStore>) {
    let store = Arc::new(FailingStore::default());
    let app = create_router(AppState::new(Database::new(store.clone())));
    (app, store)
}

async fn call(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(json!({"status": "closed"}).to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_every_route_maps_store_errors_to_500() {
    let (app, store) = failing_app();
    let id = "507f1f77bcf86cd799439011";

    let cases = [
        ("GET", "/users/x".to_string(), "Error fetching users"),
        ("POST", "/users".to_string(), "Error adding user"),
        ("PUT", format!("/users/{id}"), "Error updating user"),
        ("PATCH", format!("/users/{id}"), "Error partially updating user"),
        ("DELETE", format!("/users/{id}"), "Error deleting user"),
        ("GET", "/repositories/x".to_string(), "Error fetching repositories"),
        ("POST", "/repositories".to_string(), "Error adding repository"),
        ("GET", "/repositories/x/issues".to_string(), "Error fetching issues"),
        ("PATCH", format!("/issues/{id}/status"), "Error updating issue status"),
        ("GET", "/repositories/x/pullRequests".to_string(), "Error fetching pull requests"),
        ("DELETE", format!("/pullRequests/{id}"), "Error deleting pull request"),
        ("GET", "/repositories/x/commits".to_string(), "Error fetching commits"),
        ("DELETE", "/commits/abc".to_string(), "Error deleting commit"),
        ("POST", "/forks".to_string(), "Error adding fork"),
        ("POST", "/stars".to_string(), "Error adding star"),
    ];

    for (method, uri, context) in &cases {
        let (status, body) = call(&app, method, uri).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{method} {uri}");
        assert_eq!(body["error"], *context, "{method} {uri}");
        assert_eq!(body["details"], "backend error: connection refused");
    }

    // One store call per request, no retries.
    assert_eq!(store.calls.load(Ordering::SeqCst), cases.len());
}

#[tokio::test]
async fn test_validation_happens_before_store_access() {
    let (app, store) = failing_app();

    let (status, _) = call(&app, "DELETE", "/users/not-an-id").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = call(&app, "PATCH", "/issues/not-an-id/status").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(store.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_readiness_reports_down() {
    let (app, _) = failing_app();

    let (status, body) = call(&app, "GET", "/health/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "down");
    assert_eq!(body["checks"]["storage"]["status"], "down");

    let (status, _) = call(&app, "GET", "/health").await;
    assert_eq!(status, StatusCode::OK);
}
