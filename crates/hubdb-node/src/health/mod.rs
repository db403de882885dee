//! # Health Check Module
//!
//! Probes for deployments:
//!
//! - **Liveness** (`/health`, `/health/live`): the process is running.
//! - **Readiness** (`/health/ready`): the document store answers a ping.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use axum::Router;
//! use hubdb_node::health::{health_routes, HealthState};
//! use hubdb_storage::Database;
//!
//! let app: Router<()> = Router::new()
//!     .merge(health_routes(HealthState::new(Database::in_memory())));
//! ```

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use hubdb_storage::Database;
use serde::Serialize;
use std::time::{Duration, Instant};

/// Health status values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Component is healthy.
    Up,
    /// Component is unhealthy.
    Down,
}

/// Individual component health.
#[derive(Debug, Clone, Serialize)]
pub struct ComponentHealth {
    /// Component status.
    pub status: HealthStatus,
    /// Optional latency in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ComponentHealth {
    /// Create a healthy component with latency.
    pub fn up_with_latency(latency: Duration) -> Self {
        Self {
            status: HealthStatus::Up,
            latency_ms: Some(latency.as_millis() as u64),
            details: None,
        }
    }

    /// Create an unhealthy component with reason.
    pub fn down_with_reason(reason: &str) -> Self {
        Self {
            status: HealthStatus::Down,
            latency_ms: None,
            details: Some(serde_json::json!({ "reason": reason })),
        }
    }
}

/// Liveness probe response.
#[derive(Debug, Clone, Serialize)]
pub struct LivenessResponse {
    /// Overall status.
    pub status: HealthStatus,
    /// Crate version.
    pub version: String,
    /// Uptime in seconds.
    pub uptime_seconds: u64,
}

/// Readiness probe response.
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    /// Overall status.
    pub status: HealthStatus,
    /// Component health checks.
    pub checks: ReadinessChecks,
}

/// Readiness component checks.
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessChecks {
    /// Document store health.
    pub storage: ComponentHealth,
}

/// State shared by the health handlers.
#[derive(Clone)]
pub struct HealthState {
    /// When the service started.
    start_time: Instant,
    /// Store probed by readiness checks.
    database: Database,
}

impl HealthState {
    /// Create a new health state probing `database`.
    pub fn new(database: Database) -> Self {
        Self {
            start_time: Instant::now(),
            database,
        }
    }

    /// Get uptime in seconds.
    pub fn uptime(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Pings the store and reports its health.
    async fn storage_health(&self) -> ComponentHealth {
        let started = Instant::now();
        match self.database.ping().await {
            Ok(()) => ComponentHealth::up_with_latency(started.elapsed()),
            Err(e) => {
                tracing::warn!(error = %e, "Storage readiness check failed");
                ComponentHealth::down_with_reason(&e.to_string())
            }
        }
    }
}

/// Create health check routes.
pub fn health_routes<S>(state: HealthState) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(liveness_handler))
        .route("/health/live", get(liveness_handler))
        .route("/health/ready", get(readiness_handler))
        .with_state(state)
}

/// Liveness probe handler.
async fn liveness_handler(State(state): State<HealthState>) -> Response {
    let response = LivenessResponse {
        status: HealthStatus::Up,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime(),
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// Readiness probe handler.
async fn readiness_handler(State(state): State<HealthState>) -> Response {
    let storage = state.storage_health().await;
    let status = storage.status;
    let response = ReadinessResponse {
        status,
        checks: ReadinessChecks { storage },
    };

    let status_code = match status {
        HealthStatus::Up => StatusCode::OK,
        HealthStatus::Down => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(response)).into_response()
}
