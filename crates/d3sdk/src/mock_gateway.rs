//! Mock gateways for testing.
//!
//! These are used internally by the test suite and are not part of the public API.

use std::collections::VecDeque;
use std::sync::Mutex;

use d3rpc::Endpoint;
use d3rpc::PluginRequest;
use d3rpc::PluginResponse;
use d3rpc::RegistrationPayload;

use crate::gateway::BlockingGateway;
use crate::gateway::Gateway;
use crate::transport;
use crate::transport::TransportError;

/// Records everything it is asked to do and answers from a script.
///
/// Each `call` pops the next scripted reply; when the script is empty it
/// answers with a success carrying `null`.
#[derive(Default)]
pub struct RecordingGateway {
    replies: Mutex<VecDeque<transport::Result<PluginResponse>>>,
    registration_error: Option<TransportError>,
    calls: Mutex<Vec<(Endpoint, PluginRequest)>>,
    registrations: Mutex<Vec<(Endpoint, RegistrationPayload)>>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// A gateway whose registrations all fail with `error`.
    pub fn failing_registration(error: TransportError) -> Self {
        Self {
            registration_error: Some(error),
            ..Self::default()
        }
    }

    pub fn reply(self, reply: transport::Result<PluginResponse>) -> Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn calls(&self) -> Vec<(Endpoint, PluginRequest)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn registrations(&self) -> Vec<(Endpoint, RegistrationPayload)> {
        self.registrations.lock().unwrap().clone()
    }

    fn record_call(&self, endpoint: &Endpoint, request: &PluginRequest) -> transport::Result<PluginResponse> {
        self.calls.lock().unwrap().push((endpoint.clone(), request.clone()));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(PluginResponse::success(serde_json::Value::Null)))
    }

    fn record_registration(&self, endpoint: &Endpoint, payload: &RegistrationPayload) -> transport::Result<()> {
        self.registrations.lock().unwrap().push((endpoint.clone(), payload.clone()));
        match &self.registration_error {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl Gateway for RecordingGateway {
    async fn call(&self, endpoint: &Endpoint, request: &PluginRequest) -> transport::Result<PluginResponse> {
        tokio::task::yield_now().await;
        self.record_call(endpoint, request)
    }

    async fn register_module(&self, endpoint: &Endpoint, payload: &RegistrationPayload) -> transport::Result<()> {
        self.record_registration(endpoint, payload)
    }
}

impl BlockingGateway for RecordingGateway {
    fn call(&self, endpoint: &Endpoint, request: &PluginRequest) -> transport::Result<PluginResponse> {
        self.record_call(endpoint, request)
    }

    fn register_module(&self, endpoint: &Endpoint, payload: &RegistrationPayload) -> transport::Result<()> {
        self.record_registration(endpoint, payload)
    }
}
