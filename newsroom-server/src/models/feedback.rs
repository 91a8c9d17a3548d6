//! Feedback record, its identifier, and validated input

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::ValidationError;

/// Store-assigned feedback identifier.
///
/// Callers only ever see it as an opaque string; the UUID form is an
/// implementation detail of the stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeedbackId(Uuid);

/// Identifier that the store could never have issued.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed feedback id '{raw}'")]
pub struct MalformedId {
    pub raw: String,
}

impl FeedbackId {
    /// Generate a fresh identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Check identifier syntax without touching any store.
    ///
    /// # Example
    /// ```
    /// use newsroom_server::models::FeedbackId;
    ///
    /// assert!(FeedbackId::parse("6f1c2f86-5f43-4a53-9a0e-3f3d1c7f4b21").is_ok());
    /// assert!(FeedbackId::parse("not-an-id").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, MalformedId> {
        Uuid::parse_str(raw).map(Self).map_err(|_| MalformedId {
            raw: raw.to_owned(),
        })
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for FeedbackId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl FromStr for FeedbackId {
    type Err = MalformedId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for FeedbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Validated name/email/message triple used for both create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackDraft {
    name: String,
    email: String,
    message: String,
}

impl FeedbackDraft {
    /// Build a draft from raw request fields.
    ///
    /// # Rules
    /// - `name`, `email` and `message` must all be present and non-empty
    /// - Email format is not checked
    ///
    /// # Example
    /// ```
    /// use newsroom_server::models::FeedbackDraft;
    ///
    /// let ok = FeedbackDraft::new(Some("A".into()), Some("a@x.com".into()), Some("hi".into()));
    /// assert!(ok.is_ok());
    ///
    /// let missing = FeedbackDraft::new(Some("A".into()), None, Some("hi".into()));
    /// assert!(missing.is_err());
    /// ```
    pub fn new(
        name: Option<String>,
        email: Option<String>,
        message: Option<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name: required("name", name)?,
            email: required("email", email)?,
            message: required("message", message)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

fn required(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ValidationError::Empty { field }),
    }
}

/// A stored feedback record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub id: FeedbackId,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Feedback {
    /// Materialize a record from a draft with store-assigned id and timestamp.
    pub fn from_draft(id: FeedbackId, draft: FeedbackDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            message: draft.message,
            created_at,
        }
    }

    /// Replace the editable fields wholesale, keeping id and timestamp.
    pub fn apply(&mut self, draft: FeedbackDraft) {
        self.name = draft.name;
        self.email = draft.email;
        self.message = draft.message;
    }
}
