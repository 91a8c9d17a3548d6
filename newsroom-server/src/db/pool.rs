//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits. [`PgConnector`] plugs
//! pool creation into the [`ConnectionGateway`](super::ConnectionGateway).

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::gateway::{ConnectionError, Connector};
use super::schema;

/// Default maximum connections for the pool.
/// Kept low for a single demo service.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Open a pool of at most `max_connections` connections.
async fn open_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Connects to Postgres and bootstraps the feedback schema.
#[derive(Debug, Clone)]
pub struct PgConnector {
    database_url: Option<String>,
    max_connections: u32,
}

impl PgConnector {
    pub fn new(database_url: Option<String>) -> Self {
        Self {
            database_url,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }

    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections.max(1);
        self
    }
}

#[async_trait]
impl Connector for PgConnector {
    type Handle = PgPool;

    async fn connect(&self) -> Result<PgPool, ConnectionError> {
        let url = match self.database_url.as_deref() {
            Some(url) if !url.trim().is_empty() => url,
            _ => return Err(ConnectionError::Unset),
        };

        let pool = open_pool(url, self.max_connections)
            .await
            .map_err(unreachable)?;
        schema::ensure(&pool).await.map_err(unreachable)?;

        Ok(pool)
    }
}

fn unreachable(e: sqlx::Error) -> ConnectionError {
    ConnectionError::Unreachable {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unset_url_is_a_connection_error() {
        let err = PgConnector::new(None).connect().await.unwrap_err();
        assert_eq!(err, ConnectionError::Unset);

        let err = PgConnector::new(Some("  ".into())).connect().await.unwrap_err();
        assert_eq!(err, ConnectionError::Unset);
    }

    #[test]
    fn max_connections_floors_at_one() {
        assert_eq!(PgConnector::new(None).max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(PgConnector::new(None).with_max_connections(0).max_connections, 1);
    }

    #[tokio::test]
    async fn unparsable_url_is_unreachable() {
        let err = PgConnector::new(Some("definitely not a url".into()))
            .connect()
            .await
            .unwrap_err();
        assert!(matches!(err, ConnectionError::Unreachable { .. }));
    }

    // Integration tests require a real database
    // Run with: DATABASE_URL=postgres://... cargo test -p newsroom-server -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn connector_bootstraps_schema() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = PgConnector::new(Some(url))
            .connect()
            .await
            .expect("connect failed");

        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM feedback")
            .fetch_one(&pool)
            .await
            .expect("feedback table missing");

        assert!(result.0 >= 0);
    }
}
