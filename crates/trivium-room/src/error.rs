//! Error types for the room layer.

use trivium_protocol::RoomId;

/// Errors that can occur during room operations.
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    /// A room with this id already exists. Creation fails rather than
    /// silently overwriting a live game.
    #[error("room {0} already exists")]
    DuplicateRoom(RoomId),

    /// The room does not exist. Event handlers treat this as a no-op;
    /// only the creation API surfaces it to callers.
    #[error("room {0} not found")]
    NotFound(RoomId),

    /// Room parameters were rejected (empty id/topic, zero questions).
    #[error("invalid room configuration: {0}")]
    InvalidConfig(String),

    /// The question source failed to produce an unseen question within
    /// the attempt budget. The round does not start.
    #[error("no unique question after {attempts} attempts")]
    NoUniqueQuestion {
        /// How many attempts were consumed (duplicates and errors alike).
        attempts: u32,
    },

    /// The room's command channel is closed.
    #[error("room {0} is unavailable")]
    Unavailable(RoomId),
}
