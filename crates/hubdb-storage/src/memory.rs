//! In-memory document store.

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::{
    Document, DocumentId, DocumentStore, Filter, ObjectId, Result, StorageError, UpdateOutcome,
};

struct StoredDocument {
    id: DocumentId,
    fields: Document,
}

impl StoredDocument {
    fn render(&self) -> Document {
        let mut doc = Map::with_capacity(self.fields.len() + 1);
        doc.insert("_id".to_string(), self.id.to_json());
        doc.extend(self.fields.iter().map(|(k, v)| (k.clone(), v.clone())));
        doc
    }

    /// True if `candidate` is the same `_id` the document already has.
    ///
    /// A generated id has no JSON spelling, so any supplied value differs.
    fn same_id(&self, candidate: &Value) -> bool {
        matches!(&self.id, DocumentId::Literal(stored) if stored == candidate)
    }
}

/// In-memory store for documents.
///
/// Thread-safe; collections are created on first insert and keep documents
/// in insertion order.
#[derive(Default)]
pub struct MemoryStore {
    /// Documents indexed by collection name.
    collections: RwLock<HashMap<String, Vec<StoredDocument>>>,
}

impl MemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of documents in a collection.
    pub fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .get(collection)
            .map_or(0, Vec::len)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>> {
        let collections = self.collections.read();
        let docs: Vec<Document> = collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| filter.matches(&doc.id, &doc.fields))
                    .map(StoredDocument::render)
                    .collect()
            })
            .unwrap_or_default();
        Ok(docs)
    }

    async fn insert_one(&self, collection: &str, mut document: Document) -> Result<DocumentId> {
        let id = match document.remove("_id") {
            Some(value) => DocumentId::Literal(value),
            None => DocumentId::Object(ObjectId::new()),
        };

        let mut collections = self.collections.write();
        let docs = collections.entry(collection.to_string()).or_default();

        if docs.iter().any(|doc| doc.id == id) {
            return Err(StorageError::DuplicateKey {
                collection: collection.to_string(),
                key: id.to_string(),
            });
        }

        docs.push(StoredDocument {
            id: id.clone(),
            fields: document,
        });
        tracing::trace!(collection, id = %id, "Inserted document");
        Ok(id)
    }

    async fn replace_one(
        &self,
        collection: &str,
        filter: &Filter,
        mut replacement: Document,
    ) -> Result<UpdateOutcome> {
        if let Some(key) = replacement.keys().find(|k| k.starts_with('$')) {
            return Err(StorageError::InvalidUpdate(format!(
                "replacement document must not contain update operators: {key}"
            )));
        }

        let mut collections = self.collections.write();
        let Some(doc) = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|doc| filter.matches(&doc.id, &doc.fields)))
        else {
            return Ok(UpdateOutcome::default());
        };

        if let Some(new_id) = replacement.remove("_id") {
            if !doc.same_id(&new_id) {
                return Err(StorageError::ImmutableField);
            }
        }

        let modified = doc.fields != replacement;
        doc.fields = replacement;
        Ok(UpdateOutcome {
            matched: 1,
            modified: u64::from(modified),
        })
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        fields: Document,
    ) -> Result<UpdateOutcome> {
        let mut collections = self.collections.write();
        let Some(doc) = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|doc| filter.matches(&doc.id, &doc.fields)))
        else {
            return Ok(UpdateOutcome::default());
        };

        // Apply to a copy so a rejected path leaves the document untouched.
        let mut updated = doc.fields.clone();
        for (path, value) in fields {
            if path.is_empty() || path.starts_with('$') || path.split('.').any(str::is_empty) {
                return Err(StorageError::InvalidUpdate(format!(
                    "invalid field path: '{path}'"
                )));
            }
            if path == "_id" || path.starts_with("_id.") {
                if path == "_id" && doc.same_id(&value) {
                    continue;
                }
                return Err(StorageError::ImmutableField);
            }
            set_path(&mut updated, &path, value)?;
        }

        let modified = updated != doc.fields;
        doc.fields = updated;
        Ok(UpdateOutcome {
            matched: 1,
            modified: u64::from(modified),
        })
    }

    async fn delete_one(&self, collection: &str, filter: &Filter) -> Result<u64> {
        let mut collections = self.collections.write();
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(0);
        };

        match docs.iter().position(|doc| filter.matches(&doc.id, &doc.fields)) {
            Some(index) => {
                let removed = docs.remove(index);
                tracing::trace!(collection, id = %removed.id, "Deleted document");
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

/// Sets a dotted path, creating intermediate objects as needed.
fn set_path(target: &mut Map<String, Value>, path: &str, value: Value) -> Result<()> {
    match path.split_once('.') {
        None => {
            target.insert(path.to_string(), value);
            Ok(())
        }
        Some((head, rest)) => {
            let child = target
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            match child {
                Value::Object(map) => set_path(map, rest, value),
                other => Err(StorageError::InvalidUpdate(format!(
                    "cannot create field '{rest}' in element {{{head}: {other}}}"
                ))),
            }
        }
    }
}
