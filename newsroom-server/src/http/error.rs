//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with fixed status codes. Every
//! body carries a short `error` message; 500s add the underlying fault as
//! `details`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::{ConnectionError, StoreError};
use crate::models::{FeedbackId, MalformedId, ValidationError};

/// Which operation failed, for the 500 message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Fetch,
    Update,
    Delete,
}

impl Action {
    fn failure_message(self) -> &'static str {
        match self {
            Self::Create => "Failed to create feedback",
            Self::Fetch => "Failed to fetch feedbacks",
            Self::Update => "Failed to update feedback",
            Self::Delete => "Failed to delete feedback",
        }
    }
}

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Missing/empty field or unreadable body (400)
    Validation(ValidationError),

    /// Identifier the store could never have issued (400)
    MalformedId { id: String },

    /// Well-formed identifier with no record (404)
    NotFound { id: FeedbackId },

    /// Store unreachable (500, logged)
    Connection { action: Action, source: ConnectionError },

    /// Any other store fault (500, logged)
    Storage { action: Action, details: String },
}

impl ApiError {
    /// Classify a store outcome for the given operation.
    pub fn store(action: Action, err: StoreError) -> Self {
        match err {
            StoreError::NotFound { id } => Self::NotFound { id },
            StoreError::Connection(source) => Self::Connection { action, source },
            StoreError::Sqlx(e) => Self::Storage {
                action,
                details: e.to_string(),
            },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::MalformedId { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Connection { .. } | Self::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::Validation(ValidationError::Empty { .. }) => json!({
                "error": "Name, email, and message are required"
            }),
            Self::Validation(e @ ValidationError::InvalidBody { .. }) => json!({
                "error": "Request body must be a JSON object with name, email, and message",
                "details": e.to_string()
            }),
            Self::MalformedId { .. } => json!({ "error": "Invalid feedback ID" }),
            Self::NotFound { .. } => json!({ "error": "Feedback not found" }),
            Self::Connection { action, source } => {
                tracing::error!(?action, error = %source, "feedback store unreachable");
                json!({
                    "error": action.failure_message(),
                    "details": source.to_string()
                })
            }
            Self::Storage { action, details } => {
                tracing::error!(?action, error = %details, "feedback store error");
                json!({
                    "error": action.failure_message(),
                    "details": details
                })
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<MalformedId> for ApiError {
    fn from(e: MalformedId) -> Self {
        Self::MalformedId { id: e.raw }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn validation_error_is_400() {
        let (status, body) = body_json(ApiError::Validation(ValidationError::Empty { field: "name" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Name, email, and message are required");
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn malformed_id_is_400_and_distinct() {
        let (status, body) = body_json(ApiError::MalformedId { id: "xyz".into() }).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid feedback ID");
    }

    #[tokio::test]
    async fn not_found_is_404() {
        let (status, body) = body_json(ApiError::NotFound {
            id: FeedbackId::generate(),
        })
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Feedback not found");
    }

    #[tokio::test]
    async fn storage_error_is_500_with_details() {
        let err = ApiError::store(Action::Update, StoreError::Sqlx(sqlx::Error::PoolTimedOut));
        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to update feedback");
        assert!(body["details"].as_str().unwrap().contains("timed out"));
    }

    #[tokio::test]
    async fn connection_error_is_500() {
        let err = ApiError::store(Action::Fetch, StoreError::Connection(ConnectionError::Unset));
        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to fetch feedbacks");
        assert!(body["details"].as_str().unwrap().contains("DATABASE_URL"));
    }

    #[test]
    fn store_not_found_maps_to_404() {
        let id = FeedbackId::generate();
        let err = ApiError::store(Action::Delete, StoreError::NotFound { id });
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }
}
