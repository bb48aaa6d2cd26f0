//! Client configuration constants.

/// Module name used when the configuration does not provide one.
pub const DEFAULT_MODULE_NAME: &str = "d3sdk_plugin";

/// Environment variable read by [`crate::config::ClientConfig::from_env`].
pub const MODULE_NAME_ENV: &str = "D3SDK_MODULE_NAME";
