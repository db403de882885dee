//! # hubdb Node
//!
//! REST API over a document database modelling a small code hosting
//! service: users, repositories, issues, pull requests, commits, forks and
//! stars.
//!
//! Every resource is a schema-less document in its own collection. Each
//! route performs exactly one store operation and maps the outcome to an
//! HTTP status; nothing cascades between collections.
//!
//! ## Quick Start
//!
//! ```bash
//! cargo run --bin hubdb-node -- --api-addr 127.0.0.1:3000 --backend memory
//! ```
//!
//! ## Modules
//!
//! - [`api`] - Router assembly and shared state
//! - [`resource`] - CRUD operations shared by all resource routers
//! - [`users_api`], [`repositories_api`], [`issues_api`],
//!   [`pull_requests_api`], [`commits_api`], [`social_api`] - Resource routes
//! - [`error`] - API errors and their status codes
//! - [`config`] - Layered server configuration
//! - [`observability`] - Logging and request IDs
//! - [`health`] - Liveness and readiness probes
//! - [`server`] - Startup sequence
//!
//! ## Example: Building the router
//!
//! ```rust,no_run
//! use hubdb_node::api::{create_router, AppState};
//! use hubdb_storage::Database;
//!
//! let app = create_router(AppState::new(Database::in_memory()));
//! ```

pub mod api;
pub mod commits_api;
pub mod config;
pub mod error;
pub mod health;
pub mod issues_api;
pub mod observability;
pub mod pull_requests_api;
pub mod repositories_api;
pub mod resource;
pub mod server;
pub mod social_api;
pub mod users_api;
