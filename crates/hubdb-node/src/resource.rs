//! Shared CRUD operations behind every resource router.
//!
//! Each resource router is a thin list of handlers that call into the
//! functions here with its [`Resource`] descriptor. Every function performs
//! exactly one store operation against exactly one collection.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::StatusCode,
    Json,
};
use hubdb_storage::{Collection, Database, Document, DocumentId, Filter, ObjectId};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ApiError;

/// Describes a resource type and the collection that stores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resource {
    /// Collection name in the document store.
    pub collection: &'static str,
    /// Capitalized singular used in messages, e.g. `"Pull request"`.
    pub label: &'static str,
    /// Lowercase singular, e.g. `"pull request"`.
    pub singular: &'static str,
    /// Lowercase plural, e.g. `"pull requests"`.
    pub plural: &'static str,
}

impl Resource {
    /// Returns the collection handle for this resource.
    pub fn collection(&self, db: &Database) -> Collection {
        db.collection(self.collection)
    }

    fn not_found(&self) -> ApiError {
        ApiError::NotFound(format!("{} not found", self.label))
    }

    fn invalid_data(&self) -> ApiError {
        ApiError::InvalidBody(format!("Invalid {} data", self.singular))
    }
}

/// Response for a created document.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub message: String,
    pub id: DocumentId,
}

/// Response for a replace or partial update.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedResponse {
    pub message: String,
    pub modified_count: u64,
}

/// Response for a delete.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedResponse {
    pub message: String,
    pub deleted_count: u64,
}

/// A request body parsed as arbitrary JSON.
///
/// An empty body reads as `{}`. Malformed JSON is rejected with 400.
#[derive(Debug, Clone)]
pub struct JsonBody(pub Value);

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::InvalidBody(e.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(Value::Object(Map::new())));
        }

        serde_json::from_slice(&bytes)
            .map(Self)
            .map_err(|e| ApiError::InvalidBody(format!("Invalid JSON body: {e}")))
    }
}

impl JsonBody {
    /// Returns the body as a document, or the resource's invalid-data error.
    pub fn into_document(self, resource: &Resource) -> Result<Document, ApiError> {
        match self.0 {
            Value::Object(map) => Ok(map),
            _ => Err(resource.invalid_data()),
        }
    }
}

/// Parses a path identifier, rejecting anything that is not an ObjectId.
pub fn parse_id(raw: &str, message: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(raw).map_err(|_| ApiError::InvalidId(message.to_string()))
}

/// Lists every document in the resource's collection.
pub async fn list(db: &Database, resource: &Resource) -> Result<Json<Vec<Document>>, ApiError> {
    list_matching(db, resource, &Filter::All).await
}

/// Lists the documents selected by `filter`.
pub async fn list_matching(
    db: &Database,
    resource: &Resource,
    filter: &Filter,
) -> Result<Json<Vec<Document>>, ApiError> {
    let docs = resource
        .collection(db)
        .find(filter)
        .await
        .map_err(ApiError::store(format!("Error fetching {}", resource.plural)))?;
    Ok(Json(docs))
}

/// Inserts the body as a new document.
pub async fn create(
    db: &Database,
    resource: &Resource,
    body: JsonBody,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let document = body.into_document(resource)?;
    let id = resource
        .collection(db)
        .insert_one(document)
        .await
        .map_err(ApiError::store(format!("Error adding {}", resource.singular)))?;

    tracing::info!(collection = resource.collection, id = %id, "Document created");

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: format!("{} added", resource.label),
            id,
        }),
    ))
}

/// Replaces the body of the document with the given id.
pub async fn replace(
    db: &Database,
    resource: &Resource,
    raw_id: &str,
    body: JsonBody,
) -> Result<Json<UpdatedResponse>, ApiError> {
    let id = parse_id(raw_id, "Invalid ID format")?;
    let replacement = body.into_document(resource)?;
    let outcome = resource
        .collection(db)
        .replace_one(&Filter::Id(id), replacement)
        .await
        .map_err(ApiError::store(format!("Error updating {}", resource.singular)))?;

    if outcome.matched == 0 {
        return Err(resource.not_found());
    }

    Ok(Json(UpdatedResponse {
        message: format!("{} updated", resource.label),
        modified_count: outcome.modified,
    }))
}

/// Sets the body's fields on the document with the given id.
pub async fn update(
    db: &Database,
    resource: &Resource,
    raw_id: &str,
    body: JsonBody,
) -> Result<Json<UpdatedResponse>, ApiError> {
    let id = parse_id(raw_id, "Invalid ID format")?;
    let fields = body.into_document(resource)?;
    let context = format!("Error partially updating {}", resource.singular);
    let modified_count = set_fields(db, resource, id, fields, &context).await?;

    Ok(Json(UpdatedResponse {
        message: format!("{} updated", resource.label),
        modified_count,
    }))
}

/// Sets `fields` on the document `id`, returning the modified count.
pub async fn set_fields(
    db: &Database,
    resource: &Resource,
    id: ObjectId,
    fields: Document,
    context: &str,
) -> Result<u64, ApiError> {
    let outcome = resource
        .collection(db)
        .update_one(&Filter::Id(id), fields)
        .await
        .map_err(ApiError::store(context))?;

    if outcome.matched == 0 {
        return Err(resource.not_found());
    }
    Ok(outcome.modified)
}

/// Deletes the document with the given id.
pub async fn delete(
    db: &Database,
    resource: &Resource,
    raw_id: &str,
) -> Result<Json<DeletedResponse>, ApiError> {
    let id = parse_id(raw_id, "Invalid ID format")?;
    delete_matching(db, resource, &Filter::Id(id)).await
}

/// Deletes the first document selected by `filter`.
pub async fn delete_matching(
    db: &Database,
    resource: &Resource,
    filter: &Filter,
) -> Result<Json<DeletedResponse>, ApiError> {
    let deleted_count = resource
        .collection(db)
        .delete_one(filter)
        .await
        .map_err(ApiError::store(format!("Error deleting {}", resource.singular)))?;

    if deleted_count == 0 {
        return Err(resource.not_found());
    }

    tracing::info!(collection = resource.collection, "Document deleted");

    Ok(Json(DeletedResponse {
        message: format!("{} deleted", resource.label),
        deleted_count,
    }))
}
