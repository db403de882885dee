//! Storage error types.

use thiserror::Error;

/// Errors that can occur during document store operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend failed to execute the operation.
    #[error("backend error: {0}")]
    Backend(String),

    /// An insert reused an `_id` that already exists in the collection.
    #[error("duplicate key in collection {collection}: {key}")]
    DuplicateKey { collection: String, key: String },

    /// An update tried to change a document's `_id`.
    #[error("performing an update on the path '_id' would modify the immutable field '_id'")]
    ImmutableField,

    /// The update or replacement document is not applicable.
    #[error("invalid update: {0}")]
    InvalidUpdate(String),

    /// A document could not be converted to or from the backend's format.
    #[error("serialization error: {0}")]
    Serialization(String),
}

#[cfg(feature = "mongodb-backend")]
impl From<mongodb::error::Error> for StorageError {
    fn from(err: mongodb::error::Error) -> Self {
        StorageError::Backend(err.to_string())
    }
}

#[cfg(feature = "mongodb-backend")]
impl From<mongodb::bson::ser::Error> for StorageError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}
