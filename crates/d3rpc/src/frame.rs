//! # Frames
//!
//! The three messages that cross the wire:
//!
//! - `PluginRequest`: invoke one operation of a registered module.
//! - `RegistrationPayload`: announce a module to the host for a session.
//! - `PluginResponse`: the host's answer, a status plus an optional value.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::BoundArguments;
use crate::Value;

/// Coordinates of the host's plugin endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// One bound call of a module operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginRequest {
    pub module_name: String,
    pub operation: String,
    pub args: BoundArguments,
}

/// Announces a module and the operations it exposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationPayload {
    pub module_name: String,
    #[serde(default)]
    pub operations: Vec<String>,
}

/// Outcome reported by the host. `code == 0` is success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginStatus {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub details: Vec<String>,
}

impl PluginStatus {
    pub fn ok() -> Self {
        Self {
            code: 0,
            message: String::new(),
            details: Vec::new(),
        }
    }

    pub fn failure(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: Vec::new(),
        }
    }

    pub fn with_details(mut self, details: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.details = details.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_success(&self) -> bool {
        self.code == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginResponse {
    pub status: PluginStatus,
    #[serde(rename = "returnValue", default, skip_serializing_if = "Option::is_none")]
    pub return_value: Option<Value>,
}

impl PluginResponse {
    pub fn success(return_value: impl Into<Value>) -> Self {
        Self {
            status: PluginStatus::ok(),
            return_value: Some(return_value.into()),
        }
    }

    pub fn failure(status: PluginStatus) -> Self {
        Self {
            status,
            return_value: None,
        }
    }
}
