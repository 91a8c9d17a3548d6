use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use newsroom_server::db::pool::DEFAULT_MAX_CONNECTIONS;
use newsroom_server::http::server::DEFAULT_TIMEOUT_SECS;
use newsroom_server::{ServerConfig, StoreBackend};

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind the HTTP server to
    #[arg(long, env = "NEWSROOM_BIND", default_value = "127.0.0.1")]
    pub bind: IpAddr,

    /// Port to bind the HTTP server to
    #[arg(long, env = "NEWSROOM_PORT", default_value_t = 3030)]
    pub port: u16,

    /// Postgres connection string for the feedback store
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long, default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Keep feedback in process memory instead of Postgres (ignores DATABASE_URL)
    #[arg(long)]
    pub in_memory: bool,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Allow cross-origin requests from any origin
    #[arg(long)]
    pub cors_permissive: bool,
}

impl ServeArgs {
    fn backend(&self) -> StoreBackend {
        if self.in_memory {
            StoreBackend::Memory
        } else {
            StoreBackend::Postgres {
                database_url: self.database_url.clone(),
                max_connections: self.max_connections,
            }
        }
    }

    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: SocketAddr::new(self.bind, self.port),
            cors_permissive: self.cors_permissive,
            request_timeout: Duration::from_secs(self.timeout),
        }
    }
}

pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let backend = args.backend();
    match &backend {
        StoreBackend::Memory => tracing::warn!("Using in-memory store; feedback is lost on exit"),
        StoreBackend::Postgres { database_url: None, .. } => {
            tracing::warn!("DATABASE_URL is not set; feedback requests will fail with 500")
        }
        StoreBackend::Postgres { .. } => tracing::info!("Feedback store: postgres (connects on first request)"),
    }

    let config = args.server_config();
    newsroom_server::run_server(backend.into_store(), config.clone())
        .await
        .with_context(|| format!("server on {} failed", config.bind_addr))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        serve: ServeArgs,
    }

    #[test]
    fn defaults_bind_localhost() {
        let h = Harness::try_parse_from(["newsroom", "--in-memory"]).unwrap();
        let config = h.serve.server_config();
        assert_eq!(config.bind_addr, SocketAddr::from(([127, 0, 0, 1], 3030)));
        assert!(!config.cors_permissive);
        assert!(matches!(h.serve.backend(), StoreBackend::Memory));
    }

    #[test]
    fn postgres_backend_carries_url() {
        let h = Harness::try_parse_from([
            "newsroom",
            "--database-url",
            "postgres://localhost/newsroom",
            "--max-connections",
            "9",
            "--port",
            "8080",
        ])
        .unwrap();

        assert_eq!(h.serve.server_config().bind_addr.port(), 8080);
        match h.serve.backend() {
            StoreBackend::Postgres {
                database_url,
                max_connections,
            } => {
                assert_eq!(database_url.as_deref(), Some("postgres://localhost/newsroom"));
                assert_eq!(max_connections, 9);
            }
            StoreBackend::Memory => panic!("expected postgres backend"),
        }
    }

    #[test]
    fn in_memory_wins_over_database_url() {
        let h = Harness::try_parse_from([
            "newsroom",
            "--in-memory",
            "--database-url",
            "postgres://localhost/newsroom",
        ])
        .unwrap();
        assert!(matches!(h.serve.backend(), StoreBackend::Memory));
    }
}
