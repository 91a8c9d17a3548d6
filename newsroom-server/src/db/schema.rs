//! Schema bootstrap for the feedback collection

use sqlx::PgPool;

/// Create the feedback table if it does not exist.
///
/// `seq` breaks ties between records created within the same timestamp
/// tick so listing stays newest-first.
pub async fn ensure(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Ensuring feedback schema...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS feedback (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            seq BIGSERIAL NOT NULL,
            name TEXT NOT NULL CHECK (name <> ''),
            email TEXT NOT NULL CHECK (email <> ''),
            message TEXT NOT NULL CHECK (message <> ''),
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_feedback_created
        ON feedback(created_at DESC, seq DESC)
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
