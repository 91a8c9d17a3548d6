//! Feedback store port and its adapters
//!
//! Each adapter follows these patterns:
//! - One statement per operation (no read-then-write)
//! - Store assigns identifier and creation timestamp
//! - Missing rows surface as `StoreError::NotFound`, never as a generic fault

pub mod feedback;
pub mod memory;

pub use feedback::{FeedbackStore, PgFeedbackStore, StoreError};
pub use memory::MemoryFeedbackStore;
