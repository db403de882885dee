//! # Forks and Stars API
//!
//! Insert-only collections: there is no list, update or delete route.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | POST | `/forks` | Record a fork |
//! | POST | `/stars` | Record a star |

use axum::{extract::State, response::IntoResponse, routing::post, Router};

use crate::api::AppState;
use crate::error::ApiError;
use crate::resource::{self, JsonBody, Resource};

/// The `forks` collection.
pub const FORKS: Resource = Resource {
    collection: "forks",
    label: "Fork",
    singular: "fork",
    plural: "forks",
};

/// The `stars` collection.
pub const STARS: Resource = Resource {
    collection: "stars",
    label: "Star",
    singular: "star",
    plural: "stars",
};

/// Creates the fork and star routes.
pub fn social_routes() -> Router<AppState> {
    Router::new()
        .route("/forks", post(create_fork))
        .route("/stars", post(create_star))
}

async fn create_fork(
    State(state): State<AppState>,
    body: JsonBody,
) -> Result<impl IntoResponse, ApiError> {
    resource::create(&state.db, &FORKS, body).await
}

async fn create_star(
    State(state): State<AppState>,
    body: JsonBody,
) -> Result<impl IntoResponse, ApiError> {
    resource::create(&state.db, &STARS, body).await
}
