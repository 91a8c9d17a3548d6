//! Feedback endpoints
//!
//! Validation happens before the store is touched; store outcomes are
//! classified by [`ApiError::store`].

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::http::error::{Action, ApiError};
use crate::http::extractors::{JsonObject, ValidFeedbackId};
use crate::http::server::AppState;
use crate::models::{Feedback, FeedbackDraft, ValidationError};

/// Create/update feedback request
#[derive(Debug, Default)]
pub struct FeedbackRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

impl FeedbackRequest {
    /// Read the three fields out of a JSON object.
    ///
    /// Strings pass through; numbers and booleans are taken as their text
    /// form; null or absent means missing. Nested arrays/objects are
    /// rejected. Other keys are ignored.
    pub fn from_object(mut body: Map<String, Value>) -> Result<Self, ValidationError> {
        Ok(Self {
            name: text_field(&mut body, "name")?,
            email: text_field(&mut body, "email")?,
            message: text_field(&mut body, "message")?,
        })
    }

    fn into_draft(self) -> Result<FeedbackDraft, ValidationError> {
        FeedbackDraft::new(self.name, self.email, self.message)
    }
}

fn text_field(body: &mut Map<String, Value>, field: &'static str) -> Result<Option<String>, ValidationError> {
    match body.remove(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(Value::Array(_) | Value::Object(_)) => Err(ValidationError::InvalidBody {
            reason: format!("{field} must be text"),
        }),
    }
}

/// Feedback record as served to clients
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: String,
}

impl From<Feedback> for FeedbackResponse {
    fn from(f: Feedback) -> Self {
        Self {
            id: f.id.to_string(),
            name: f.name,
            email: f.email,
            message: f.message,
            created_at: f.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FeedbackEnvelope {
    pub message: &'static str,
    pub feedback: FeedbackResponse,
}

#[derive(Debug, Serialize)]
pub struct FeedbackListEnvelope {
    pub message: &'static str,
    pub feedbacks: Vec<FeedbackResponse>,
}

#[derive(Debug, Serialize)]
pub struct Confirmation {
    pub message: &'static str,
}

/// POST /feedback - create a new record
async fn create_feedback(
    State(state): State<Arc<AppState>>,
    JsonObject(body): JsonObject,
) -> Result<(StatusCode, Json<FeedbackEnvelope>), ApiError> {
    let draft = FeedbackRequest::from_object(body)?.into_draft()?;
    let feedback = state
        .store
        .insert(draft)
        .await
        .map_err(|e| ApiError::store(Action::Create, e))?;

    tracing::info!(id = %feedback.id, "feedback created");
    Ok((
        StatusCode::CREATED,
        Json(FeedbackEnvelope {
            message: "Feedback created successfully",
            feedback: feedback.into(),
        }),
    ))
}

/// GET /feedback - all records, most recent first
async fn list_feedback(
    State(state): State<Arc<AppState>>,
) -> Result<Json<FeedbackListEnvelope>, ApiError> {
    let items = state
        .store
        .list()
        .await
        .map_err(|e| ApiError::store(Action::Fetch, e))?;

    Ok(Json(FeedbackListEnvelope {
        message: "Feedbacks retrieved successfully",
        feedbacks: items.into_iter().map(FeedbackResponse::from).collect(),
    }))
}

/// PUT /feedback/{id} - replace name/email/message
async fn update_feedback(
    State(state): State<Arc<AppState>>,
    ValidFeedbackId(id): ValidFeedbackId,
    JsonObject(body): JsonObject,
) -> Result<Json<FeedbackEnvelope>, ApiError> {
    let draft = FeedbackRequest::from_object(body)?.into_draft()?;
    let feedback = state
        .store
        .replace(id, draft)
        .await
        .map_err(|e| ApiError::store(Action::Update, e))?;

    tracing::info!(%id, "feedback updated");
    Ok(Json(FeedbackEnvelope {
        message: "Feedback updated successfully",
        feedback: feedback.into(),
    }))
}

/// DELETE /feedback/{id} - remove a record
async fn delete_feedback(
    State(state): State<Arc<AppState>>,
    ValidFeedbackId(id): ValidFeedbackId,
) -> Result<Json<Confirmation>, ApiError> {
    state
        .store
        .remove(id)
        .await
        .map_err(|e| ApiError::store(Action::Delete, e))?;

    tracing::info!(%id, "feedback deleted");
    Ok(Json(Confirmation {
        message: "Feedback deleted successfully",
    }))
}

/// Feedback routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/feedback", get(list_feedback).post(create_feedback))
        .route("/feedback/{id}", put(update_feedback).delete(delete_feedback))
}
