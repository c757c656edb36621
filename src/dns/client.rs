//! DNS transport.
//!
//! `Exchange` is the seam between the query executor and the network. The
//! production implementation sends one UDP datagram per attempt; tests swap in
//! stubs that count calls or serve canned answers.

use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;

use async_trait::async_trait;
use hickory_proto::op::Message;
use tokio::net::UdpSocket;

use crate::config::MIN_EDNS_PAYLOAD_SIZE;
use crate::error_handling::QueryError;

/// Sends one query to one endpoint and returns its response.
///
/// Implementations must be safe to share between tasks: the executor holds a
/// single instance for the whole run.
#[async_trait]
pub trait Exchange: Send + Sync {
    /// Performs a single attempt. No retries happen at this level.
    async fn exchange(&self, query: &Message, endpoint: SocketAddr) -> Result<Message, QueryError>;
}

/// UDP query client with a fixed per-attempt timeout.
///
/// Each attempt binds a fresh ephemeral socket connected to the endpoint, so
/// the client itself carries no mutable state.
#[derive(Debug, Clone)]
pub struct UdpClient {
    timeout: Duration,
    recv_buffer_size: usize,
}

impl UdpClient {
    /// Creates a client whose receive buffer matches the advertised EDNS payload.
    pub fn new(timeout: Duration, edns_payload_size: u16) -> Self {
        Self {
            timeout,
            recv_buffer_size: usize::from(edns_payload_size.max(MIN_EDNS_PAYLOAD_SIZE)),
        }
    }

    /// Per-attempt timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn send_and_receive(
        &self,
        query: &Message,
        endpoint: SocketAddr,
    ) -> Result<Message, QueryError> {
        let bind_addr: SocketAddr = if endpoint.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };
        let socket = UdpSocket::bind(bind_addr).await?;
        socket.connect(endpoint).await?;

        let wire = query.to_vec()?;
        socket.send(&wire).await?;

        let mut buf = vec![0u8; self.recv_buffer_size];
        let len = socket.recv(&mut buf).await?;
        if len == 0 {
            return Err(QueryError::EmptyResponse);
        }

        let response = Message::from_vec(&buf[..len])?;
        if response.id() != query.id() {
            return Err(QueryError::IdMismatch {
                expected: query.id(),
                received: response.id(),
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl Exchange for UdpClient {
    async fn exchange(&self, query: &Message, endpoint: SocketAddr) -> Result<Message, QueryError> {
        tokio::time::timeout(self.timeout, self.send_and_receive(query, endpoint))
            .await
            .map_err(|_| QueryError::Timeout(self.timeout))?
    }
}
