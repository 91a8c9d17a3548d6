//! Feedback repository
//!
//! - insert: INSERT ... RETURNING (store fills id + created_at)
//! - list: newest first, ties by insertion order
//! - replace: single UPDATE ... RETURNING, name/email/message wholesale
//! - remove: single DELETE ... RETURNING id

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::db::gateway::{ConnectionError, ConnectionGateway};
use crate::db::pool::PgConnector;
use crate::models::{Feedback, FeedbackDraft, FeedbackId};

/// Store error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error("not found: feedback '{id}'")]
    NotFound { id: FeedbackId },

    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// Document-store operations needed by the feedback handlers.
#[async_trait]
pub trait FeedbackStore: Send + Sync {
    /// Persist a new record.
    async fn insert(&self, draft: FeedbackDraft) -> Result<Feedback, StoreError>;

    /// All records, most recent first.
    async fn list(&self) -> Result<Vec<Feedback>, StoreError>;

    /// Replace name/email/message of an existing record.
    async fn replace(&self, id: FeedbackId, draft: FeedbackDraft) -> Result<Feedback, StoreError>;

    /// Delete a record.
    async fn remove(&self, id: FeedbackId) -> Result<(), StoreError>;

    /// Whether a backing connection is already open. Never connects.
    async fn is_connected(&self) -> bool {
        true
    }
}

/// Feedback row from database
#[derive(Debug, Clone, FromRow)]
struct FeedbackRow {
    id: Uuid,
    name: String,
    email: String,
    message: String,
    created_at: DateTime<Utc>,
}

impl From<FeedbackRow> for Feedback {
    fn from(row: FeedbackRow) -> Self {
        Self {
            id: FeedbackId::from(row.id),
            name: row.name,
            email: row.email,
            message: row.message,
            created_at: row.created_at,
        }
    }
}

/// Postgres-backed store; connects lazily through the gateway.
pub struct PgFeedbackStore {
    gateway: ConnectionGateway<PgConnector>,
}

impl PgFeedbackStore {
    pub fn new(connector: PgConnector) -> Self {
        Self {
            gateway: ConnectionGateway::new(connector),
        }
    }

    async fn pool(&self) -> Result<PgPool, StoreError> {
        Ok(self.gateway.acquire().await?)
    }
}

#[async_trait]
impl FeedbackStore for PgFeedbackStore {
    async fn insert(&self, draft: FeedbackDraft) -> Result<Feedback, StoreError> {
        let pool = self.pool().await?;
        let row: FeedbackRow = sqlx::query_as(
            r#"
            INSERT INTO feedback (name, email, message)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, message, created_at
            "#,
        )
        .bind(draft.name())
        .bind(draft.email())
        .bind(draft.message())
        .fetch_one(&pool)
        .await?;

        Ok(row.into())
    }

    async fn list(&self) -> Result<Vec<Feedback>, StoreError> {
        let pool = self.pool().await?;
        let rows: Vec<FeedbackRow> = sqlx::query_as(
            r#"
            SELECT id, name, email, message, created_at
            FROM feedback
            ORDER BY created_at DESC, seq DESC
            "#,
        )
        .fetch_all(&pool)
        .await?;

        Ok(rows.into_iter().map(Feedback::from).collect())
    }

    async fn replace(&self, id: FeedbackId, draft: FeedbackDraft) -> Result<Feedback, StoreError> {
        let pool = self.pool().await?;
        let row: Option<FeedbackRow> = sqlx::query_as(
            r#"
            UPDATE feedback
            SET name = $2, email = $3, message = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, email, message, created_at
            "#,
        )
        .bind(id.as_uuid())
        .bind(draft.name())
        .bind(draft.email())
        .bind(draft.message())
        .fetch_optional(&pool)
        .await?;

        row.map(Feedback::from).ok_or(StoreError::NotFound { id })
    }

    async fn remove(&self, id: FeedbackId) -> Result<(), StoreError> {
        let pool = self.pool().await?;
        let deleted: Option<(Uuid,)> = sqlx::query_as("DELETE FROM feedback WHERE id = $1 RETURNING id")
            .bind(id.as_uuid())
            .fetch_optional(&pool)
            .await?;

        deleted.map(|_| ()).ok_or(StoreError::NotFound { id })
    }

    async fn is_connected(&self) -> bool {
        self.gateway.is_connected().await
    }
}
