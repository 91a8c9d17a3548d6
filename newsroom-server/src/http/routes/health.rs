//! `GET /health` - process liveness plus store connection state
//!
//! Always 200 while the process serves requests. The store is reported
//! but never dialled here; a cold or failing database shows up as
//! `"store": "disconnected"`.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::http::server::AppState;

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub store: StoreState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreState {
    Connected,
    Disconnected,
}

async fn health(State(state): State<Arc<AppState>>) -> Json<Health> {
    let store = if state.store.is_connected().await {
        StoreState::Connected
    } else {
        StoreState::Disconnected
    };

    Json(Health {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        store,
    })
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}
