//! # Observability Module
//!
//! - **Structured Logging**: pretty or JSON logs via `tracing-subscriber`
//! - **Request Tracing**: a request ID span around every request
//!
//! ## Usage
//!
//! ```rust,ignore
//! use axum::Router;
//! use axum::middleware::from_fn;
//! use hubdb_node::observability::{init_logging, request_id_middleware, LogFormat};
//!
//! init_logging("info", LogFormat::Json);
//!
//! let app: Router<()> = Router::new().layer(from_fn(request_id_middleware));
//! ```

mod logging;
pub mod middleware;

pub use logging::{init_logging, LogFormat};
pub use middleware::{request_id_middleware, RequestId, REQUEST_ID_HEADER};
