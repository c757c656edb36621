//! Main application modules.
//!
//! This module provides progress and summary logging used by the survey loop.

pub mod logging;

// Re-export public API
pub use logging::{log_final, log_progress};
