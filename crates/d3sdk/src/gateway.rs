//! # RPC Gateway
//!
//! The contract the client needs from whatever actually reaches the host.
//!
//! Two flavours share one shape: [`Gateway`] suspends the calling task,
//! [`BlockingGateway`] blocks the calling thread. Neither retries, times out,
//! or cancels on the client's behalf.
//!
//! [`TransportGateway`] implements [`Gateway`] over any byte [`Transport`]
//! using the `d3rpc` JSON codec.

use d3rpc::Endpoint;
use d3rpc::PluginRequest;
use d3rpc::PluginResponse;
use d3rpc::RegistrationPayload;
use d3rpc::codec;
use tracing::trace;

use crate::transport;
use crate::transport::Route;
use crate::transport::Transport;
use crate::transport::TransportError;

#[async_trait::async_trait]
pub trait Gateway: Send + Sync {
    /// Forwards one bound call and returns the host's structured reply.
    async fn call(&self, endpoint: &Endpoint, request: &PluginRequest) -> transport::Result<PluginResponse>;

    /// Registers a module with the host.
    async fn register_module(&self, endpoint: &Endpoint, payload: &RegistrationPayload) -> transport::Result<()>;
}

pub trait BlockingGateway: Send + Sync {
    fn call(&self, endpoint: &Endpoint, request: &PluginRequest) -> transport::Result<PluginResponse>;

    fn register_module(&self, endpoint: &Endpoint, payload: &RegistrationPayload) -> transport::Result<()>;
}

/// Stateless framing over a byte transport.
pub struct TransportGateway<T> {
    transport: T,
}

impl<T: Transport> TransportGateway<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }
}

#[async_trait::async_trait]
impl<T: Transport> Gateway for TransportGateway<T> {
    async fn call(&self, endpoint: &Endpoint, request: &PluginRequest) -> transport::Result<PluginResponse> {
        let payload = codec::encode_request(request)?;
        trace!(%endpoint, bytes = payload.len(), "sending execute frame");

        let reply = self.transport.call(endpoint, Route::Execute, &payload).await?;
        Ok(codec::decode_response(&reply)?)
    }

    async fn register_module(&self, endpoint: &Endpoint, payload: &RegistrationPayload) -> transport::Result<()> {
        let bytes = codec::encode_registration(payload)?;
        trace!(%endpoint, module = %payload.module_name, "sending register frame");

        let reply = self.transport.call(endpoint, Route::Register, &bytes).await?;
        let response = codec::decode_response(&reply)?;
        if !response.status.is_success() {
            return Err(TransportError::Rejected {
                code: response.status.code,
                message: response.status.message,
            });
        }
        Ok(())
    }
}
