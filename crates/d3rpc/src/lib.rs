//! # d3rpc
//!
//! The wire vocabulary spoken between a plugin client and the Designer host.
//!
//! ## Architecture
//!
//! - **args**: call-site arguments and their bound, canonical form.
//! - **frame**: the request, registration and response frames.
//! - **codec**: JSON encoding of the frames.
//!
//! Nothing in here knows about sessions or signatures; those live in `d3sdk`.

pub mod args;
pub mod codec;
pub mod frame;


pub use args::BoundArguments;
pub use args::CallArguments;
pub use codec::Error;
pub use codec::Result;
pub use frame::Endpoint;
pub use frame::PluginRequest;
pub use frame::PluginResponse;
pub use frame::PluginStatus;
pub use frame::RegistrationPayload;

#[doc(hidden)]
pub use serde_json;

/// Argument values are value-shape agnostic.
pub type Value = serde_json::Value;

/// Builds [`CallArguments`] with host call syntax.
///
/// Positional arguments come first, separated from keyword arguments by `;`.
///
/// ```
/// use d3rpc::call_args;
///
/// let args = call_args![5; z = 30];
/// assert_eq!(args.positional.len(), 1);
/// assert_eq!(args.keyword["z"], 30);
/// ```
#[macro_export]
macro_rules! call_args {
    ($($pos:expr),* $(,)? $(; $($key:ident = $val:expr),* $(,)?)?) => {{
        #[allow(unused_mut)]
        let mut args = $crate::CallArguments::new();
        $( args = args.arg($crate::serde_json::json!($pos)); )*
        $($( args = args.kwarg(stringify!($key), $crate::serde_json::json!($val)); )*)?
        args
    }};
}
