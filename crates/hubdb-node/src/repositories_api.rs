//! # Repositories API
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/repositories/{repo_id}` | List all repositories (the id is not used) |
//! | POST | `/repositories` | Create a repository |
//! | PUT | `/repositories/{repo_id}` | Replace a repository |
//! | PATCH | `/repositories/{repo_id}` | Set fields on a repository |
//! | DELETE | `/repositories/{repo_id}` | Delete a repository |
//!
//! Deleting a repository leaves its issues, pull requests and commits in
//! place.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use crate::api::AppState;
use crate::error::ApiError;
use crate::resource::{self, JsonBody, Resource};

/// The `repositories` collection.
pub const REPOSITORIES: Resource = Resource {
    collection: "repositories",
    label: "Repository",
    singular: "repository",
    plural: "repositories",
};

/// Creates the repository routes.
pub fn repository_routes() -> Router<AppState> {
    Router::new()
        .route("/repositories", post(create_repository))
        .route(
            "/repositories/{repo_id}",
            get(list_repositories)
                .put(replace_repository)
                .patch(update_repository)
                .delete(delete_repository),
        )
}

/// Lists all repositories.
async fn list_repositories(
    State(state): State<AppState>,
    Path(_repo_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    resource::list(&state.db, &REPOSITORIES).await
}

async fn create_repository(
    State(state): State<AppState>,
    body: JsonBody,
) -> Result<impl IntoResponse, ApiError> {
    resource::create(&state.db, &REPOSITORIES, body).await
}

async fn replace_repository(
    State(state): State<AppState>,
    Path(repo_id): Path<String>,
    body: JsonBody,
) -> Result<impl IntoResponse, ApiError> {
    resource::replace(&state.db, &REPOSITORIES, &repo_id, body).await
}

async fn update_repository(
    State(state): State<AppState>,
    Path(repo_id): Path<String>,
    body: JsonBody,
) -> Result<impl IntoResponse, ApiError> {
    let Json(mut response) = resource::update(&state.db, &REPOSITORIES, &repo_id, body).await?;
    response.message = "Repository updated successfully".to_string();
    Ok(Json(response))
}

async fn delete_repository(
    State(state): State<AppState>,
    Path(repo_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    resource::delete(&state.db, &REPOSITORIES, &repo_id).await
}
