//! DNS querying for `_dmarc` TXT records.
//!
//! This module provides the network half of the survey:
//! - Resolver endpoint parsing and round-robin selection (`ResolverPool`)
//! - Query construction with EDNS0 and the DNSSEC OK bit
//! - The `Exchange` transport trait and its UDP implementation
//! - Bounded, immediate retries (`QueryExecutor`)
//!
//! Wire encoding is done with `hickory-proto`; sockets and timeouts with tokio.

mod client;
mod executor;
mod pool;
mod query;

// Re-export public API
pub use client::{Exchange, UdpClient};
pub use executor::QueryExecutor;
pub use pool::{parse_endpoint, ResolverPool};
pub use query::{build_query, dmarc_query_name};

#[cfg(test)]
pub(crate) mod test_helpers;
