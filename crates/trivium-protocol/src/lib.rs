//! Wire protocol for Trivium.
//!
//! Defines everything that crosses a process boundary: the realtime events
//! exchanged with clients over the transport, the question shapes exchanged
//! with the external question-generation service, and the [`Codec`] trait
//! that turns those types into bytes.
//!
//! # Key types
//!
//! - [`PlayerId`] / [`RoomId`] — opaque string identifiers
//! - [`ClientEvent`] / [`ServerEvent`] — the realtime event surface
//! - [`Question`] / [`QuestionPayload`] — full and client-safe question shapes
//! - [`Codec`] / [`JsonCodec`] — byte-level encoding

mod codec;
mod error;
mod types;

#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use codec::Codec;
pub use error::ProtocolError;
pub use types::{
    ClientEvent, GameResults, PlayerId, PlayerResult, Question,
    QuestionPayload, RoomId, ServerEvent,
};
