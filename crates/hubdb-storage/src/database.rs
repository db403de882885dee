//! Collection handles over a shared backend.

use std::fmt;
use std::sync::Arc;

use crate::{Document, DocumentId, DocumentStore, Filter, MemoryStore, Result, UpdateOutcome};

/// Handle to the database that owns every collection.
///
/// Cheap to clone; all clones share one backend connection.
#[derive(Clone)]
pub struct Database {
    store: Arc<dyn DocumentStore>,
}

impl Database {
    /// Wraps an established backend.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Creates a database backed by a fresh [`MemoryStore`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Returns a handle to the named collection.
    pub fn collection(&self, name: impl Into<String>) -> Collection {
        Collection {
            name: name.into(),
            store: self.store.clone(),
        }
    }

    /// Checks that the backend is reachable.
    pub async fn ping(&self) -> Result<()> {
        self.store.ping().await
    }
}

impl fmt::Debug for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Database").finish_non_exhaustive()
    }
}

/// Handle to a single collection.
#[derive(Clone)]
pub struct Collection {
    name: String,
    store: Arc<dyn DocumentStore>,
}

impl Collection {
    /// Collection name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns every document selected by `filter`.
    pub async fn find(&self, filter: &Filter) -> Result<Vec<Document>> {
        self.store.find(&self.name, filter).await
    }

    /// Returns every document in the collection.
    pub async fn find_all(&self) -> Result<Vec<Document>> {
        self.find(&Filter::All).await
    }

    /// Inserts a document, returning its `_id`.
    pub async fn insert_one(&self, document: Document) -> Result<DocumentId> {
        self.store.insert_one(&self.name, document).await
    }

    /// Replaces the first document selected by `filter`.
    pub async fn replace_one(
        &self,
        filter: &Filter,
        replacement: Document,
    ) -> Result<UpdateOutcome> {
        self.store.replace_one(&self.name, filter, replacement).await
    }

    /// Sets fields on the first document selected by `filter`.
    pub async fn update_one(&self, filter: &Filter, fields: Document) -> Result<UpdateOutcome> {
        self.store.update_one(&self.name, filter, fields).await
    }

    /// Deletes the first document selected by `filter`.
    pub async fn delete_one(&self, filter: &Filter) -> Result<u64> {
        self.store.delete_one(&self.name, filter).await
    }
}

impl fmt::Debug for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection").field("name", &self.name).finish()
    }
}
