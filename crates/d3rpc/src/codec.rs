//! # Codec
//!
//! JSON encoding of the frames in [`crate::frame`].
//!
//! Encoders are total over well-formed frames; decoders reject anything
//! that does not parse into the expected frame shape.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::PluginRequest;
use crate::PluginResponse;
use crate::RegistrationPayload;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A frame could not be serialized.
    #[error("failed to encode {frame}: {source}")]
    Encode {
        frame: &'static str,
        #[source]
        source: serde_json::Error,
    },
    /// The bytes on the wire are not a valid frame of the expected kind.
    #[error("malformed {frame}: {source}")]
    Malformed {
        frame: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

fn encode<T: Serialize>(frame: &'static str, value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(|source| Error::Encode { frame, source })
}

fn decode<T: DeserializeOwned>(frame: &'static str, bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|source| Error::Malformed { frame, source })
}

pub fn encode_request(request: &PluginRequest) -> Result<Vec<u8>> {
    encode("request", request)
}

pub fn decode_request(bytes: &[u8]) -> Result<PluginRequest> {
    decode("request", bytes)
}

pub fn encode_registration(payload: &RegistrationPayload) -> Result<Vec<u8>> {
    encode("registration", payload)
}

pub fn decode_registration(bytes: &[u8]) -> Result<RegistrationPayload> {
    decode("registration", bytes)
}

pub fn encode_response(response: &PluginResponse) -> Result<Vec<u8>> {
    encode("response", response)
}

pub fn decode_response(bytes: &[u8]) -> Result<PluginResponse> {
    decode("response", bytes)
}
