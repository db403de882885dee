//! MongoDB document store backend.
//!
//! Wraps a single [`mongodb::Client`] shared by every request. Documents are
//! converted between JSON and BSON at this boundary; store-generated
//! `ObjectId`s are rendered as plain 24 character hex strings.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{self, doc, Bson};
use mongodb::{Client, Database};
use serde_json::{Map, Value};

use crate::{Document, DocumentId, DocumentStore, Filter, ObjectId, Result, UpdateOutcome};

/// Document store backed by a MongoDB database.
#[derive(Clone)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Connects to `uri` and selects `database`.
    ///
    /// The driver connects lazily; call [`DocumentStore::ping`] to verify
    /// the server is reachable.
    pub async fn connect(uri: &str, database: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri).await?;
        tracing::debug!(database, "MongoDB client created");
        Ok(Self {
            database: client.database(database),
        })
    }

    /// Wraps an already selected database.
    pub fn from_database(database: Database) -> Self {
        Self { database }
    }

    fn collection(&self, name: &str) -> mongodb::Collection<bson::Document> {
        self.database.collection(name)
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>> {
        let cursor = self.collection(collection).find(filter_to_bson(filter)?).await?;
        let docs: Vec<bson::Document> = cursor.try_collect().await?;
        Ok(docs.into_iter().map(document_to_json).collect())
    }

    async fn insert_one(&self, collection: &str, document: Document) -> Result<DocumentId> {
        let document = bson::to_document(&document)?;
        let result = self.collection(collection).insert_one(document).await?;
        Ok(match result.inserted_id {
            Bson::ObjectId(oid) => DocumentId::Object(ObjectId::from_bytes(oid.bytes())),
            other => DocumentId::Literal(bson_to_json(other)),
        })
    }

    async fn replace_one(
        &self,
        collection: &str,
        filter: &Filter,
        replacement: Document,
    ) -> Result<UpdateOutcome> {
        let replacement = bson::to_document(&replacement)?;
        let result = self
            .collection(collection)
            .replace_one(filter_to_bson(filter)?, replacement)
            .await?;
        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        fields: Document,
    ) -> Result<UpdateOutcome> {
        let fields = bson::to_document(&fields)?;
        let result = self
            .collection(collection)
            .update_one(filter_to_bson(filter)?, doc! { "$set": fields })
            .await?;
        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn delete_one(&self, collection: &str, filter: &Filter) -> Result<u64> {
        let result = self
            .collection(collection)
            .delete_one(filter_to_bson(filter)?)
            .await?;
        Ok(result.deleted_count)
    }

    async fn ping(&self) -> Result<()> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}

/// Translates a [`Filter`] into a MongoDB query document.
fn filter_to_bson(filter: &Filter) -> Result<bson::Document> {
    Ok(match filter {
        Filter::All => doc! {},
        Filter::Id(oid) => doc! { "_id": bson::oid::ObjectId::from_bytes(oid.bytes()) },
        Filter::Key(key) => doc! { "_id": bson::to_bson(key)? },
        Filter::FieldEq { field, value } => {
            let mut query = bson::Document::new();
            query.insert(field.clone(), bson::to_bson(value)?);
            query
        }
    })
}

fn document_to_json(document: bson::Document) -> Document {
    document
        .into_iter()
        .map(|(key, value)| (key, bson_to_json(value)))
        .collect::<Map<String, Value>>()
}

/// Converts BSON to JSON, rendering ObjectIds and dates as strings.
fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => dt
            .try_to_rfc3339_string()
            .map(Value::String)
            .unwrap_or_else(|_| Bson::DateTime(dt).into_relaxed_extjson()),
        Bson::Document(document) => Value::Object(document_to_json(document)),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}
