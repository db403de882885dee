//! # Issues API
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/repositories/{repo_id}/issues` | List issues |
//! | POST | `/issues` | Create an issue |
//! | PATCH | `/issues/{issue_id}/status` | Set the issue's `status` field |
//! | DELETE | `/issues/{issue_id}` | Delete an issue |
//!
//! The list route returns every issue in the collection; the repository
//! segment of the path is accepted but does not filter.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::{delete, get, patch, post},
    Json, Router,
};
use hubdb_storage::Document;
use serde_json::Value;

use crate::api::AppState;
use crate::error::ApiError;
use crate::resource::{self, JsonBody, Resource, UpdatedResponse};

/// The `issues` collection.
pub const ISSUES: Resource = Resource {
    collection: "issues",
    label: "Issue",
    singular: "issue",
    plural: "issues",
};

/// Creates the issue routes.
pub fn issue_routes() -> Router<AppState> {
    Router::new()
        .route("/repositories/{repo_id}/issues", get(list_issues))
        .route("/issues", post(create_issue))
        .route("/issues/{issue_id}", delete(delete_issue))
        .route("/issues/{issue_id}/status", patch(update_issue_status))
}

/// Lists all issues, regardless of repository.
async fn list_issues(
    State(state): State<AppState>,
    Path(_repo_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    resource::list(&state.db, &ISSUES).await
}

async fn create_issue(
    State(state): State<AppState>,
    body: JsonBody,
) -> Result<impl IntoResponse, ApiError> {
    resource::create(&state.db, &ISSUES, body).await
}

/// Updates only the `status` field of an issue.
async fn update_issue_status(
    State(state): State<AppState>,
    Path(issue_id): Path<String>,
    body: JsonBody,
) -> Result<impl IntoResponse, ApiError> {
    let id = resource::parse_id(&issue_id, "Invalid issue ID format")?;

    let status = match body.0 {
        Value::Object(mut map) => map.remove("status").filter(is_truthy),
        _ => None,
    }
    .ok_or(ApiError::MissingField("Status"))?;

    let mut fields = Document::new();
    fields.insert("status".to_string(), status);

    let modified_count = resource::set_fields(
        &state.db,
        &ISSUES,
        id,
        fields,
        "Error updating issue status",
    )
    .await?;

    Ok(Json(UpdatedResponse {
        message: "Issue status updated successfully".to_string(),
        modified_count,
    }))
}

async fn delete_issue(
    State(state): State<AppState>,
    Path(issue_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    resource::delete(&state.db, &ISSUES, &issue_id).await
}

/// `null`, `false`, `0` and `""` do not count as a provided value.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_truthy() {
        for absent in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert!(!is_truthy(&absent), "{absent} should not count as a status");
        }
        for present in [json!("closed"), json!(true), json!(1), json!([]), json!({})] {
            assert!(is_truthy(&present), "{present} should count as a status");
        }
    }
}
