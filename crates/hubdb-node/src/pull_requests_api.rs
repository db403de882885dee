//! # Pull Requests API
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/repositories/{repo_id}/pullRequests` | List pull requests |
//! | POST | `/pullRequests` | Create a pull request |
//! | DELETE | `/pullRequests/{pull_request_id}` | Delete a pull request |
//!
//! Like issues, listing ignores the repository segment.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::{delete, get, post},
    Router,
};

use crate::api::AppState;
use crate::error::ApiError;
use crate::resource::{self, JsonBody, Resource};

/// The `pullRequests` collection.
pub const PULL_REQUESTS: Resource = Resource {
    collection: "pullRequests",
    label: "Pull request",
    singular: "pull request",
    plural: "pull requests",
};

/// Creates the pull request routes.
pub fn pull_request_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/repositories/{repo_id}/pullRequests",
            get(list_pull_requests),
        )
        .route("/pullRequests", post(create_pull_request))
        .route(
            "/pullRequests/{pull_request_id}",
            delete(delete_pull_request),
        )
}

async fn list_pull_requests(
    State(state): State<AppState>,
    Path(_repo_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    resource::list(&state.db, &PULL_REQUESTS).await
}

async fn create_pull_request(
    State(state): State<AppState>,
    body: JsonBody,
) -> Result<impl IntoResponse, ApiError> {
    resource::create(&state.db, &PULL_REQUESTS, body).await
}

async fn delete_pull_request(
    State(state): State<AppState>,
    Path(pull_request_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    resource::delete(&state.db, &PULL_REQUESTS, &pull_request_id).await
}
