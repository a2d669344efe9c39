//! Unified error type for the Trivium server.

use trivium_protocol::ProtocolError;
use trivium_room::RoomError;
use trivium_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attributes let `?` convert sub-crate errors
/// automatically inside the server and handler code.
#[derive(Debug, thiserror::Error)]
pub enum TriviumError {
    /// A transport-level error (bind, accept, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (encode, decode).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A room-level error (duplicate, invalid config, unavailable).
    #[error(transparent)]
    Room(#[from] RoomError),

    /// A bad server configuration value (unparseable bind address).
    #[error("invalid server configuration: {0}")]
    Config(String),

    /// The HTTP API failed to bind.
    #[error("http bind failed: {0}")]
    HttpBind(#[source] warp::Error),
}
