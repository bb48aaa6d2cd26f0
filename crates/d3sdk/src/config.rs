//! Static client configuration.
//!
//! Loading from disk is left to the embedding application; the type derives
//! serde so any loader can produce it.

use serde::Deserialize;
use serde::Serialize;

use crate::constants::DEFAULT_MODULE_NAME;
use crate::constants::MODULE_NAME_ENV;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientConfig {
    /// Module name registered with the host when no session override is given.
    pub module_name: String,
}

impl ClientConfig {
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
        }
    }

    /// Reads the module name from `D3SDK_MODULE_NAME`, falling back to the default.
    pub fn from_env() -> Self {
        match std::env::var(MODULE_NAME_ENV) {
            Ok(name) if !name.trim().is_empty() => Self::new(name.trim()),
            _ => Self::default(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MODULE_NAME)
    }
}
