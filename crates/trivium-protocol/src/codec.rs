//! Codec trait and implementations for serializing/deserializing events.
//!
//! The transport layer moves opaque bytes; a [`Codec`] decides what those
//! bytes look like. [`JsonCodec`] is the default: human-readable, easy to
//! inspect in browser DevTools, and what the reference clients speak.

use serde::{de::DeserializeOwned, Serialize};

use crate::ProtocolError;

/// Encodes Rust types to bytes and decodes bytes back.
///
/// `Send + Sync + 'static` because the codec is shared across connection
/// handler tasks for the lifetime of the server.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    fn encode<T: Serialize>(
        &self,
        value: &T,
    ) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    fn decode<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError>;
}

/// A [`Codec`] that uses JSON (via `serde_json`).
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(
        &self,
        value: &T,
    ) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}

#[cfg(all(test, feature = "json"))]
mod tests {
    use super::*;
    use crate::ServerEvent;

    #[test]
    fn test_json_codec_round_trip() {
        let codec = JsonCodec;
        let ev = ServerEvent::Timer { remaining: 7 };

        let bytes = codec.encode(&ev).unwrap();
        let back: ServerEvent = codec.decode(&bytes).unwrap();
        assert_eq!(ev, back);
    }

    #[test]
    fn test_json_codec_decode_rejects_wrong_shape() {
        let codec = JsonCodec;
        let result: Result<ServerEvent, _> = codec.decode(b"{\"name\": 1}");
        assert!(result.is_err());
    }
}
