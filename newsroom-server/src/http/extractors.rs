//! Custom Axum extractors

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use serde_json::{Map, Value};

use super::error::ApiError;
use crate::models::{FeedbackId, ValidationError};

/// Extract a feedback id from path, checking syntax before any store call
pub struct ValidFeedbackId(pub FeedbackId);

impl<S> FromRequestParts<S> for ValidFeedbackId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::MalformedId { id: String::new() })?;

        Ok(Self(FeedbackId::parse(&raw)?))
    }
}

/// Request body that must be a JSON object.
///
/// Parsed from raw bytes, so the `Content-Type` header is not consulted.
/// Anything other than an object (array, scalar, malformed JSON, empty
/// body) is a 400 validation error.
pub struct JsonObject(pub Map<String, Value>);

impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| invalid_body(rejection.body_text()))?;

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Object(map)) => Ok(Self(map)),
            Ok(other) => Err(invalid_body(format!("expected a JSON object, got {}", kind(&other)))),
            Err(e) => Err(invalid_body(e.to_string())),
        }
    }
}

fn invalid_body(reason: String) -> ApiError {
    ApiError::Validation(ValidationError::InvalidBody { reason })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
