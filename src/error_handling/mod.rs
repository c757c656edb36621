//! Error handling.
//!
//! Errors are split into two groups:
//! - **Initialization errors**: fatal, reported before any domain is dispatched
//! - **Query errors**: per-attempt DNS failures, retried and then absorbed as
//!   "no answer" for the domain

mod types;

// Re-export public API
pub use types::{InitializationError, QueryError};
