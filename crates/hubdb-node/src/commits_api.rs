//! # Commits API
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/repositories/{repo_id}/commits` | List commits whose `repoId` equals the path segment |
//! | POST | `/commits` | Create a commit |
//! | DELETE | `/commits/{commit_id}` | Delete a commit |
//!
//! Commits are the only filtered listing: `repoId` is compared as a plain
//! string, so a commit stored with a non-string `repoId` never matches. An
//! empty result is a 404.
//!
//! Deletion does not reject malformed ids. A valid ObjectId is looked up as
//! one; any other segment is matched literally against a string `_id`, which
//! is how commits created with their own `_id` (e.g. a hash) are removed.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::{delete, get, post},
    Router,
};
use hubdb_storage::Filter;

use crate::api::AppState;
use crate::error::ApiError;
use crate::resource::{self, JsonBody, Resource};

/// The `commits` collection.
pub const COMMITS: Resource = Resource {
    collection: "commits",
    label: "Commit",
    singular: "commit",
    plural: "commits",
};

/// Creates the commit routes.
pub fn commit_routes() -> Router<AppState> {
    Router::new()
        .route("/repositories/{repo_id}/commits", get(list_commits))
        .route("/commits", post(create_commit))
        .route("/commits/{commit_id}", delete(delete_commit))
}

async fn list_commits(
    State(state): State<AppState>,
    Path(repo_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let commits =
        resource::list_matching(&state.db, &COMMITS, &Filter::field_eq("repoId", repo_id)).await?;

    if commits.is_empty() {
        return Err(ApiError::NotFound(
            "No commits found for the given repoId.".to_string(),
        ));
    }
    Ok(commits)
}

async fn create_commit(
    State(state): State<AppState>,
    body: JsonBody,
) -> Result<impl IntoResponse, ApiError> {
    resource::create(&state.db, &COMMITS, body).await
}

async fn delete_commit(
    State(state): State<AppState>,
    Path(commit_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    resource::delete_matching(&state.db, &COMMITS, &Filter::id_or_key(&commit_id)).await
}
