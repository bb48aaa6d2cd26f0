//! # Method Dispatcher
//!
//! Turns "call operation X with these arguments" into a forwarded request
//! and turns the host's reply back into a value or an error.
//!
//! The dispatcher is stateless. It borrows the ledger and session for one
//! call, performs every local check before anything is forwarded, and
//! unwraps only after the gateway returns:
//!
//! 1. session check (`NotInSession`)
//! 2. ledger lookup (`UnknownOperation`)
//! 3. binding (`Binding`)
//! 4. forward (`Transport`, passed through untouched)
//! 5. unwrap (`RemoteOperationFailed` on a non-zero status)
//!
//! Nothing is cached, retried, or reordered.

use d3rpc::CallArguments;
use d3rpc::Endpoint;
use d3rpc::PluginRequest;
use d3rpc::PluginResponse;
use tracing::debug;
use tracing::warn;

use crate::Value;
use crate::binder;
use crate::gateway::BlockingGateway;
use crate::gateway::Gateway;
use crate::ledger::Ledger;
use crate::session::Session;
use crate::transport::TransportError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A call was attempted outside any session scope.
    #[error("not in a session")]
    NotInSession,
    #[error("unknown operation '{0}'")]
    UnknownOperation(String),
    #[error(transparent)]
    Binding(#[from] binder::Error),
    /// The host answered with a non-zero status.
    #[error("remote operation failed ({code}): {message}")]
    RemoteOperationFailed {
        code: i64,
        message: String,
        details: Vec<String>,
    },
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The return value did not have the shape the caller asked for.
    #[error("failed to decode return value of '{operation}': {source}")]
    Decode {
        operation: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Borrowed view of everything needed to prepare one call.
pub struct Dispatcher<'a> {
    pub ledger: &'a Ledger,
    pub session: &'a Session,
    pub default_module: &'a str,
}

impl Dispatcher<'_> {
    /// Runs the local half of a call: session check, lookup, bind.
    pub fn prepare(&self, operation: &str, args: CallArguments) -> Result<PreparedCall> {
        let endpoint = self.session.endpoint().ok_or(Error::NotInSession)?;

        let schema = self.ledger
            .get(operation)
            .ok_or_else(|| Error::UnknownOperation(operation.to_string()))?;

        let bound = binder::bind(&schema.signature, args)?;

        let request = PluginRequest {
            module_name: self.session.module_name(self.default_module).to_string(),
            operation: schema.remote_name.clone(),
            args: bound,
        };

        Ok(PreparedCall {
            endpoint: endpoint.clone(),
            request,
        })
    }
}

/// A bound call that has passed every local check.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedCall {
    pub endpoint: Endpoint,
    pub request: PluginRequest,
}

impl PreparedCall {
    pub async fn forward(self, gateway: &dyn Gateway) -> Result<Value> {
        debug!(
            operation = %self.request.operation,
            module = %self.request.module_name,
            endpoint = %self.endpoint,
            "dispatching call"
        );
        let response = gateway.call(&self.endpoint, &self.request).await?;
        unwrap_response(&self.request.operation, response)
    }

    pub fn forward_blocking(self, gateway: &dyn BlockingGateway) -> Result<Value> {
        debug!(
            operation = %self.request.operation,
            module = %self.request.module_name,
            endpoint = %self.endpoint,
            "dispatching blocking call"
        );
        let response = gateway.call(&self.endpoint, &self.request)?;
        unwrap_response(&self.request.operation, response)
    }
}

/// Returns the value of a successful reply, or surfaces its status.
///
/// A success without a return value is `Value::Null`.
pub fn unwrap_response(operation: &str, response: PluginResponse) -> Result<Value> {
    let PluginResponse { status, return_value } = response;
    if status.is_success() {
        return Ok(return_value.unwrap_or(Value::Null));
    }

    warn!(operation, code = status.code, message = %status.message, "remote operation failed");
    Err(Error::RemoteOperationFailed {
        code: status.code,
        message: status.message,
        details: status.details,
    })
}
