//! Upstream resolver endpoints.

use std::net::{IpAddr, SocketAddr};

use crate::config::DNS_PORT;
use crate::error_handling::InitializationError;

/// Parses a resolver endpoint.
///
/// Accepts `ip:port`, `[ipv6]:port`, or a bare IP address (port 53 implied).
/// Hostnames are rejected: the pool is fixed before the first query and must
/// not depend on DNS itself.
///
/// # Errors
///
/// Returns `InitializationError::InvalidResolver` if the string is neither a
/// socket address nor an IP address.
pub fn parse_endpoint(endpoint: &str) -> Result<SocketAddr, InitializationError> {
    let trimmed = endpoint.trim();
    if let Ok(addr) = trimmed.parse::<SocketAddr>() {
        return Ok(addr);
    }
    trimmed
        .parse::<IpAddr>()
        .map(|ip| SocketAddr::new(ip, DNS_PORT))
        .map_err(|_| InitializationError::InvalidResolver(endpoint.to_string()))
}

/// Fixed, ordered list of upstream resolvers.
///
/// Never mutated after construction, so it is shared between tasks behind an
/// `Arc` without locking.
#[derive(Debug, Clone)]
pub struct ResolverPool {
    endpoints: Vec<SocketAddr>,
}

impl ResolverPool {
    /// Creates a pool from already parsed endpoints.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::InvalidConfig` if `endpoints` is empty.
    pub fn new(endpoints: Vec<SocketAddr>) -> Result<Self, InitializationError> {
        if endpoints.is_empty() {
            return Err(InitializationError::InvalidConfig(
                "resolver pool must contain at least one endpoint".to_string(),
            ));
        }
        Ok(Self { endpoints })
    }

    /// Parses every endpoint string, preserving order.
    ///
    /// # Errors
    ///
    /// Fails on the first endpoint that does not parse, or on an empty list.
    pub fn from_strings<S: AsRef<str>>(endpoints: &[S]) -> Result<Self, InitializationError> {
        let parsed = endpoints
            .iter()
            .map(|e| parse_endpoint(e.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(parsed)
    }

    /// Returns the endpoint for the `index`-th dispatched domain (`index mod N`).
    pub fn select(&self, index: usize) -> SocketAddr {
        self.endpoints[index % self.endpoints.len()]
    }

    /// Number of endpoints in the pool.
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    /// Returns true if the pool has no endpoints.
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// The endpoints in selection order.
    pub fn endpoints(&self) -> &[SocketAddr] {
        &self.endpoints
    }
}
