//! Document storage for hubdb.
//!
//! This crate provides a schema-less document store abstraction: named
//! collections of JSON documents addressed by a store-assigned
//! [`ObjectId`], with an in-memory backend and an optional MongoDB backend
//! (`mongodb-backend` feature).

mod database;
mod error;
mod filter;
mod id;
mod memory;
#[cfg(feature = "mongodb-backend")]
mod mongo;
mod traits;

pub use database::{Collection, Database};
pub use error::StorageError;
pub use filter::Filter;
pub use id::{DocumentId, ObjectId};
pub use memory::MemoryStore;
#[cfg(feature = "mongodb-backend")]
pub use mongo::MongoStore;
pub use traits::{DocumentStore, UpdateOutcome};

/// A schema-less document: a JSON object.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
