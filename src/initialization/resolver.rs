//! DNS client and resolver pool initialization.

use std::sync::Arc;

use crate::config::Config;
use crate::dns::{Exchange, ResolverPool, UdpClient};
use crate::error_handling::InitializationError;

/// Initializes the shared query client.
///
/// One client serves the whole run; it holds only the timeout and buffer size
/// so concurrent use needs no synchronization.
pub fn init_client(config: &Config) -> Arc<dyn Exchange> {
    Arc::new(UdpClient::new(config.timeout(), config.edns_payload_size))
}

/// Builds the ordered resolver pool from the configured endpoints.
///
/// # Errors
///
/// Returns `InitializationError::InvalidResolver` for an endpoint that does not
/// parse, or `InitializationError::InvalidConfig` for an empty list.
pub fn init_resolver_pool(config: &Config) -> Result<ResolverPool, InitializationError> {
    let pool = ResolverPool::from_strings(&config.resolvers)?;
    for (index, endpoint) in pool.endpoints().iter().enumerate() {
        log::debug!("Resolver {index}: {endpoint}");
    }
    Ok(pool)
}
