//! Document store backend trait.
//!
//! Defines the interface every backend implements so the HTTP layer can run
//! against MongoDB in production and the in-memory store in tests.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

use crate::{Document, DocumentId, Filter, Result};

/// Outcome of a replace or update on a single document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UpdateOutcome {
    /// Number of documents selected by the filter (0 or 1).
    pub matched: u64,
    /// Number of documents whose content actually changed (0 or 1).
    pub modified: u64,
}

/// Trait for document store backends.
///
/// Every method addresses exactly one collection and performs exactly one
/// store operation. Documents returned by [`find`](Self::find) carry their
/// `_id` rendered as JSON.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Returns every document in `collection` selected by `filter`, in
    /// insertion order where the backend preserves it.
    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>>;

    /// Inserts a document and returns its `_id`.
    ///
    /// A document without `_id` gets a freshly generated
    /// [`ObjectId`](crate::ObjectId); a supplied `_id` is kept verbatim.
    async fn insert_one(&self, collection: &str, document: Document) -> Result<DocumentId>;

    /// Replaces the body of the first document selected by `filter`.
    async fn replace_one(
        &self,
        collection: &str,
        filter: &Filter,
        replacement: Document,
    ) -> Result<UpdateOutcome>;

    /// Sets the given fields on the first document selected by `filter`.
    ///
    /// Keys may be dotted paths into nested objects.
    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        fields: Document,
    ) -> Result<UpdateOutcome>;

    /// Deletes the first document selected by `filter`, returning the
    /// number of deleted documents.
    async fn delete_one(&self, collection: &str, filter: &Filter) -> Result<u64>;

    /// Round-trips to the backend to prove it is reachable.
    async fn ping(&self) -> Result<()>;
}

#[async_trait]
impl<T: DocumentStore + ?Sized> DocumentStore for Arc<T> {
    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>> {
        (**self).find(collection, filter).await
    }

    async fn insert_one(&self, collection: &str, document: Document) -> Result<DocumentId> {
        (**self).insert_one(collection, document).await
    }

    async fn replace_one(
        &self,
        collection: &str,
        filter: &Filter,
        replacement: Document,
    ) -> Result<UpdateOutcome> {
        (**self).replace_one(collection, filter, replacement).await
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        fields: Document,
    ) -> Result<UpdateOutcome> {
        (**self).update_one(collection, filter, fields).await
    }

    async fn delete_one(&self, collection: &str, filter: &Filter) -> Result<u64> {
        (**self).delete_one(collection, filter).await
    }

    async fn ping(&self) -> Result<()> {
        (**self).ping().await
    }
}
