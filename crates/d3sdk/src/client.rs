//! # Plugin Client
//!
//! The facade callers hold. A client owns its configuration, its ledger of
//! operations, its session state and a gateway, and exposes them through two
//! entry points: [`PluginClient::session`] and [`PluginClient::call`].
//!
//! ## Sessions
//!
//! `session(..)` returns a [`SessionGuard`]. The guard dereferences to the
//! client, so calls are made through it, and dropping it ends the session on
//! every path: normal return, early `?`, or a panic unwinding through the
//! scope. A failed registration drops the guard before the error reaches the
//! caller, so the override is already cleared when they see it.
//!
//! The guard holds the client's only mutable borrow and does not hand out
//! `&mut` access, so a second session cannot be opened while one is live.

use std::ops::Deref;
use std::sync::Arc;

use d3rpc::CallArguments;
use d3rpc::Endpoint;
use d3rpc::RegistrationPayload;
use serde::de::DeserializeOwned;
use tracing::info;
use tracing::warn;

use crate::Value;
use crate::config::ClientConfig;
use crate::dispatch::Dispatcher;
use crate::dispatch::Error;
use crate::dispatch::Result;
use crate::gateway::BlockingGateway;
use crate::gateway::Gateway;
use crate::gateway::TransportGateway;
use crate::ledger::Ledger;
use crate::session::Session;
use crate::transport::Transport;

/// Client whose forwarded calls suspend the calling task.
pub type AsyncClient = PluginClient<dyn Gateway>;

/// Client whose forwarded calls block the calling thread.
pub type BlockingClient = PluginClient<dyn BlockingGateway>;

/// How to enter a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionOptions {
    /// Register the module with the host on entry.
    pub register_module: bool,
    /// Module name to use for this session only.
    pub module_name: Option<String>,
}

impl SessionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self) -> Self {
        self.register_module = true;
        self
    }

    pub fn module_name(mut self, name: impl Into<String>) -> Self {
        self.module_name = Some(name.into());
        self
    }
}

pub struct PluginClient<G: ?Sized> {
    config: ClientConfig,
    ledger: Ledger,
    session: Session,
    gateway: Arc<G>,
}

impl<G: ?Sized> PluginClient<G> {
    fn with_gateway(config: ClientConfig, ledger: Ledger, gateway: Arc<G>) -> Self {
        Self {
            config,
            ledger,
            session: Session::new(),
            gateway,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn gateway(&self) -> &Arc<G> {
        &self.gateway
    }

    pub fn is_active(&self) -> bool {
        self.session.is_active()
    }

    /// Endpoint of the active session, if any.
    pub fn endpoint(&self) -> Option<&Endpoint> {
        self.session.endpoint()
    }

    /// Effective module name: the session override if set, else the configured name.
    pub fn module_name(&self) -> &str {
        self.session.module_name(&self.config.module_name)
    }

    pub fn registration_payload(&self) -> RegistrationPayload {
        RegistrationPayload {
            module_name: self.module_name().to_string(),
            operations: self.ledger.operation_names(),
        }
    }

    fn dispatcher(&self) -> Dispatcher<'_> {
        Dispatcher {
            ledger: &self.ledger,
            session: &self.session,
            default_module: &self.config.module_name,
        }
    }
}

impl AsyncClient {
    pub fn new(config: ClientConfig, ledger: Ledger, gateway: Arc<dyn Gateway>) -> Self {
        Self::with_gateway(config, ledger, gateway)
    }

    /// Builds a client that frames its calls over a byte transport.
    pub fn over_transport<T: Transport>(config: ClientConfig, ledger: Ledger, transport: T) -> Self {
        Self::new(config, ledger, Arc::new(TransportGateway::new(transport)))
    }

    /// Enters a session with the host at `host:port`.
    ///
    /// When `options.register_module` is set, the module is registered before
    /// this returns; if registration fails the session is already closed.
    pub async fn session(
        &mut self,
        host: impl Into<String>,
        port: u16,
        options: SessionOptions,
    ) -> Result<SessionGuard<'_, dyn Gateway>> {
        let SessionOptions { register_module, module_name } = options;
        let endpoint = Endpoint::new(host, port);
        let guard = SessionGuard::enter(self, endpoint.clone(), module_name);

        if register_module {
            let payload = guard.registration_payload();
            let gateway = Arc::clone(&guard.gateway);
            if let Err(e) = gateway.register_module(&endpoint, &payload).await {
                warn!(%endpoint, module = %payload.module_name, error = %e, "module registration failed");
                return Err(e.into());
            }
            info!(%endpoint, module = %payload.module_name, "module registered");
        }

        Ok(guard)
    }

    /// Calls `operation` on the host.
    pub async fn call(&self, operation: &str, args: CallArguments) -> Result<Value> {
        let prepared = self.dispatcher().prepare(operation, args)?;
        prepared.forward(self.gateway.as_ref()).await
    }

    /// Calls `operation` and decodes its return value into `T`.
    pub async fn call_as<T: DeserializeOwned>(&self, operation: &str, args: CallArguments) -> Result<T> {
        let value = self.call(operation, args).await?;
        decode_value(operation, value)
    }
}

impl BlockingClient {
    pub fn new(config: ClientConfig, ledger: Ledger, gateway: Arc<dyn BlockingGateway>) -> Self {
        Self::with_gateway(config, ledger, gateway)
    }

    /// Enters a session with the host at `host:port`. See [`AsyncClient::session`].
    pub fn session(
        &mut self,
        host: impl Into<String>,
        port: u16,
        options: SessionOptions,
    ) -> Result<SessionGuard<'_, dyn BlockingGateway>> {
        let SessionOptions { register_module, module_name } = options;
        let endpoint = Endpoint::new(host, port);
        let guard = SessionGuard::enter(self, endpoint.clone(), module_name);

        if register_module {
            let payload = guard.registration_payload();
            if let Err(e) = guard.gateway.register_module(&endpoint, &payload) {
                warn!(%endpoint, module = %payload.module_name, error = %e, "module registration failed");
                return Err(e.into());
            }
            info!(%endpoint, module = %payload.module_name, "module registered");
        }

        Ok(guard)
    }

    /// Runs `body` inside a session; the session is closed whether `body`
    /// succeeds or fails, and its error is returned unchanged.
    pub fn with_session<R>(
        &mut self,
        host: impl Into<String>,
        port: u16,
        options: SessionOptions,
        body: impl FnOnce(&BlockingClient) -> Result<R>,
    ) -> Result<R> {
        let guard = self.session(host, port, options)?;
        body(&guard)
    }

    pub fn call(&self, operation: &str, args: CallArguments) -> Result<Value> {
        let prepared = self.dispatcher().prepare(operation, args)?;
        prepared.forward_blocking(self.gateway.as_ref())
    }

    pub fn call_as<T: DeserializeOwned>(&self, operation: &str, args: CallArguments) -> Result<T> {
        let value = self.call(operation, args)?;
        decode_value(operation, value)
    }
}

fn decode_value<T: DeserializeOwned>(operation: &str, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|source| Error::Decode {
        operation: operation.to_string(),
        source,
    })
}

/// An open session. Dropping it closes the session.
#[must_use = "dropping the guard closes the session immediately"]
pub struct SessionGuard<'a, G: ?Sized> {
    client: &'a mut PluginClient<G>,
}

impl<'a, G: ?Sized> SessionGuard<'a, G> {
    fn enter(client: &'a mut PluginClient<G>, endpoint: Endpoint, module_override: Option<String>) -> Self {
        info!(%endpoint, module_override = ?module_override, "entering session");
        client.session.enter(endpoint, module_override);
        Self { client }
    }

    /// Closes the session now. Equivalent to dropping the guard.
    pub fn close(self) {}
}

impl<G: ?Sized> Deref for SessionGuard<'_, G> {
    type Target = PluginClient<G>;

    fn deref(&self) -> &PluginClient<G> {
        self.client
    }
}

impl<G: ?Sized> Drop for SessionGuard<'_, G> {
    fn drop(&mut self) {
        self.client.session.exit();
        info!("session closed");
    }
}
