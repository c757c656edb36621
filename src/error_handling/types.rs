//! Error type definitions.
//!
//! This module defines the fatal (initialization) and per-attempt (query)
//! error types used throughout the application.

use std::time::Duration;

use hickory_proto::error::ProtoError;
use log::SetLoggerError;
use thiserror::Error;

/// Error types for initialization failures.
///
/// Any of these stops the run before the first domain is dispatched.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A resolver endpoint could not be parsed as `ip:port` or `ip`.
    #[error("Invalid resolver endpoint: {0}")]
    InvalidResolver(String),

    /// The domain input source could not be opened.
    #[error("Failed to open input {path}: {source}")]
    InputError {
        /// Path that failed to open
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Failure of a single DNS query attempt.
///
/// Every variant is retried by the query executor; once retries are exhausted
/// the domain simply has no answer.
#[derive(Error, Debug)]
pub enum QueryError {
    /// No response arrived within the per-attempt timeout.
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// Socket error while sending or receiving.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The query could not be encoded or the response could not be decoded.
    #[error("DNS protocol error: {0}")]
    Proto(#[from] ProtoError),

    /// The resolver sent back an empty datagram.
    #[error("empty response")]
    EmptyResponse,

    /// The response does not belong to the query that was sent.
    #[error("response ID {received} does not match query ID {expected}")]
    IdMismatch {
        /// ID of the outgoing query
        expected: u16,
        /// ID found in the response
        received: u16,
    },
}
