//! Database layer - persistence gateway, schema bootstrap, and stores
//!
//! # Design Principles
//!
//! - One lazily opened pool per process, shared by every handler
//! - Each store operation is a single statement; the database arbitrates
//!   per-record atomicity
//! - Stores report typed outcomes (not found vs. other fault)

pub mod gateway;
pub mod pool;
pub mod repos;
pub mod schema;

pub use gateway::{ConnectionError, ConnectionGateway, Connector};
pub use pool::{PgConnector, DEFAULT_MAX_CONNECTIONS};
pub use repos::*;
