//! Configuration constants.
//!
//! This module defines the operational defaults used throughout the survey:
//! timeouts, concurrency limits, EDNS sizing and the upstream resolver list.

/// Maximum concurrent in-flight DNS queries (semaphore limit)
pub const DEFAULT_MAX_CONCURRENCY: usize = 450;

/// Per-attempt DNS read timeout in seconds.
///
/// A generous timeout gives higher overall throughput than a short one: short
/// timeouts under load turn congestion into retry storms.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Advertised EDNS0 UDP payload size in bytes
pub const DEFAULT_EDNS_PAYLOAD_SIZE: u16 = 1440;

/// Smallest EDNS0 payload a client may advertise (RFC 6891)
pub const MIN_EDNS_PAYLOAD_SIZE: u16 = 512;

/// Retries per query after the first attempt (4 attempts in total)
pub const MAX_QUERY_RETRIES: u32 = 3;

/// Emit a progress line after this many dispatches
pub const DEFAULT_PROGRESS_INTERVAL: usize = 1;

/// Port assumed for resolver endpoints given as a bare IP address
pub const DNS_PORT: u16 = 53;

/// Label prepended to every surveyed domain
pub const DMARC_LABEL: &str = "_dmarc";

/// Default upstream resolvers, queried round-robin.
///
/// Cloudflare and Google gave the fastest results; adding more public
/// resolvers did not improve throughput.
pub const DEFAULT_RESOLVERS: &[&str] = &[
    "1.1.1.1:53", // Cloudflare
    "8.8.8.8:53", // Google
];
