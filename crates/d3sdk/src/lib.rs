//! # d3sdk
//!
//! Call the operations of a Designer plugin module as ordinary calls.
//!
//! ## Architecture
//!
//! - **signature**: static parameter descriptors, validated at registration.
//! - **binder**: resolves call arguments against a signature.
//! - **ledger**: the dispatch table of exposed operations.
//! - **session**: the idle/active state machine gating every call.
//! - **dispatch**: session check, bind, forward, unwrap.
//! - **gateway** / **transport**: the contracts for reaching the host.
//! - **client**: the facade tying it together behind a scoped session guard.

pub mod binder;
pub mod client;
pub mod config;
pub mod constants;
pub mod dispatch;
pub mod gateway;
pub mod ledger;
pub mod session;
pub mod signature;
pub mod transport;

#[cfg(test)]
mod mock_gateway;

pub use client::AsyncClient;
pub use client::BlockingClient;
pub use client::PluginClient;
pub use client::SessionGuard;
pub use client::SessionOptions;
pub use config::ClientConfig;
pub use d3rpc::BoundArguments;
pub use d3rpc::CallArguments;
pub use d3rpc::Endpoint;
pub use d3rpc::PluginResponse;
pub use d3rpc::PluginStatus;
pub use d3rpc::Value;
pub use d3rpc::call_args;
pub use dispatch::Error;
pub use dispatch::Result;
pub use gateway::BlockingGateway;
pub use gateway::Gateway;
pub use ledger::Ledger;
pub use signature::ParameterKind;
pub use signature::Signature;
