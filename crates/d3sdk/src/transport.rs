//! # Transport Abstraction
//!
//! A minimal, async interface for moving bytes to a host endpoint.
//!
//! ## Philosophy
//!
//! - **Byte-Oriented**: The Transport knows nothing about frames, arguments, or
//!   statuses. It moves opaque buffers.
//! - **Request-Response**: The only interaction is "send bytes to a route,
//!   await bytes".

use d3rpc::Endpoint;

/// Errors that occur at the network/transport layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The host is unreachable or the connection was dropped.
    #[error("connection lost: {0}")]
    ConnectionLost(String),
    /// The operation timed out before a response was received.
    #[error("request timed out")]
    Timeout,
    /// Generic I/O error or internal transport failure.
    #[error("I/O error: {0}")]
    Io(String),
    /// The reply could not be decoded, or the request could not be encoded.
    #[error("malformed frame: {0}")]
    Malformed(String),
    /// The host refused a registration.
    #[error("host rejected request ({code}): {message}")]
    Rejected { code: i64, message: String },
}

impl From<d3rpc::Error> for TransportError {
    fn from(e: d3rpc::Error) -> Self {
        Self::Malformed(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TransportError>;

/// What a payload is for. Transports typically map this to a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Execute,
    Register,
}

/// A mechanism to send a byte buffer and receive a reply.
///
/// This trait is designed to be object-safe (`Arc<dyn Transport>`).
#[async_trait::async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Sends a payload and waits for a response.
    ///
    /// # invariants
    /// - Must return `Ok(vec)` with the raw reply bytes on success.
    /// - Must return `Err` if the network fails.
    /// - Should not interpret the payload content.
    async fn call(&self, endpoint: &Endpoint, route: Route, payload: &[u8]) -> Result<Vec<u8>>;
}
