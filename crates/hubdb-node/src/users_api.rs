//! # Users API
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/users/{user_id}` | List all users (the id is not used) |
//! | POST | `/users` | Create a user |
//! | PUT | `/users/{user_id}` | Replace a user |
//! | PATCH | `/users/{user_id}` | Set fields on a user |
//! | DELETE | `/users/{user_id}` | Delete a user |

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
    Router,
};

use crate::api::AppState;
use crate::error::ApiError;
use crate::resource::{self, JsonBody, Resource};

/// The `users` collection.
pub const USERS: Resource = Resource {
    collection: "users",
    label: "User",
    singular: "user",
    plural: "users",
};

/// Creates the user routes.
pub fn user_routes() -> Router<AppState> {
    Router::new().route("/users", post(create_user)).route(
        "/users/{user_id}",
        get(list_users)
            .put(replace_user)
            .patch(update_user)
            .delete(delete_user),
    )
}

/// Lists all users.
async fn list_users(
    State(state): State<AppState>,
    Path(_user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    resource::list(&state.db, &USERS).await
}

async fn create_user(
    State(state): State<AppState>,
    body: JsonBody,
) -> Result<impl IntoResponse, ApiError> {
    resource::create(&state.db, &USERS, body).await
}

async fn replace_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    body: JsonBody,
) -> Result<impl IntoResponse, ApiError> {
    resource::replace(&state.db, &USERS, &user_id, body).await
}

async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    body: JsonBody,
) -> Result<impl IntoResponse, ApiError> {
    resource::update(&state.db, &USERS, &user_id, body).await
}

async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    resource::delete(&state.db, &USERS, &user_id).await
}
