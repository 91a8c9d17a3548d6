//! Domain models with validation at construction
//!
//! Request input is checked when building these types, before any store
//! call. Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod feedback;

pub use validation::ValidationError;
pub use feedback::{Feedback, FeedbackDraft, FeedbackId, MalformedId};
