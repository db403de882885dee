//! HTTP API for the hubdb server.
//!
//! Assembles the per-resource routers into one [`Router`] sharing a single
//! [`Database`] handle.

use axum::{middleware::from_fn, Router};
use hubdb_storage::Database;
use tower_http::trace::TraceLayer;

use crate::commits_api::commit_routes;
use crate::health::{health_routes, HealthState};
use crate::issues_api::issue_routes;
use crate::observability::request_id_middleware;
use crate::pull_requests_api::pull_request_routes;
use crate::repositories_api::repository_routes;
use crate::social_api::social_routes;
use crate::users_api::user_routes;

/// Application state shared across handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Data-access handle, established before the listener starts.
    pub db: Database,
}

impl AppState {
    /// Creates state around an established database.
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

/// Creates the API router.
pub fn create_router(state: AppState) -> Router {
    let health = HealthState::new(state.db.clone());

    Router::new()
        .merge(user_routes())
        .merge(repository_routes())
        .merge(issue_routes())
        .merge(pull_request_routes())
        .merge(commit_routes())
        .merge(social_routes())
        .merge(health_routes(health))
        .layer(TraceLayer::new_for_http())
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}
