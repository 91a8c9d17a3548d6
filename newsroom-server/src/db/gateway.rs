//! Persistence gateway - one shared store connection per process
//!
//! The first `acquire()` starts connecting. Callers that arrive while that
//! attempt is in flight await the same attempt and see the same outcome.
//! A successful handle is cached for the life of the gateway; a failed
//! attempt is dropped so the next call starts over.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::Mutex;

/// Connection failures. Fatal for the request, never for the process.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectionError {
    #[error("no database connection string configured (set DATABASE_URL)")]
    Unset,

    #[error("database unreachable: {message}")]
    Unreachable { message: String },
}

/// Opens a new connection handle.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    type Handle: Clone + Send + Sync + 'static;

    async fn connect(&self) -> Result<Self::Handle, ConnectionError>;
}

type Attempt<H> = Shared<BoxFuture<'static, Result<H, ConnectionError>>>;

enum Slot<H> {
    Empty,
    Connecting(Attempt<H>),
    Ready(H),
}

/// Lazily connected, process-wide handle.
pub struct ConnectionGateway<C: Connector> {
    connector: Arc<C>,
    slot: Mutex<Slot<C::Handle>>,
}

impl<C: Connector> ConnectionGateway<C> {
    pub fn new(connector: C) -> Self {
        Self {
            connector: Arc::new(connector),
            slot: Mutex::new(Slot::Empty),
        }
    }

    /// Return the live handle, connecting on first use.
    pub async fn acquire(&self) -> Result<C::Handle, ConnectionError> {
        let attempt = {
            let mut slot = self.slot.lock().await;
            let pending = match &*slot {
                Slot::Ready(handle) => return Ok(handle.clone()),
                Slot::Connecting(attempt) => Some(attempt.clone()),
                Slot::Empty => None,
            };
            match pending {
                Some(attempt) => attempt,
                None => {
                    tracing::debug!("opening store connection");
                    let connector = Arc::clone(&self.connector);
                    let attempt = async move { connector.connect().await }.boxed().shared();
                    *slot = Slot::Connecting(attempt.clone());
                    attempt
                }
            }
        };

        let outcome = attempt.clone().await;

        // Only the first waiter to get here settles the slot; a later
        // attempt may already have replaced it.
        let mut slot = self.slot.lock().await;
        let settles = matches!(&*slot, Slot::Connecting(current) if current.ptr_eq(&attempt));
        if settles {
            *slot = match &outcome {
                Ok(handle) => {
                    tracing::info!("store connection established");
                    Slot::Ready(handle.clone())
                }
                Err(e) => {
                    tracing::warn!(error = %e, "store connection failed, will retry on next request");
                    Slot::Empty
                }
            };
        }

        outcome
    }

    /// Whether a handle is cached.
    pub async fn is_connected(&self) -> bool {
        matches!(&*self.slot.lock().await, Slot::Ready(_))
    }
}
