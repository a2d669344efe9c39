//! Room store: the process-wide map from room id to room actor.

use std::collections::HashMap;
use std::sync::Arc;

use trivium_protocol::RoomId;
use trivium_source::QuestionSource;

use crate::room::spawn_room;
use crate::{RoomError, RoomHandle, RoomSettings};

/// Default command channel size for room actors.
const DEFAULT_CHANNEL_SIZE: usize = 64;

/// Owns every room in the process.
///
/// Rooms are created on demand and kept for the lifetime of the process;
/// there is deliberately no destroy path, matching the service's scope
/// (no persistence, no expiry). The store itself is not thread-safe; the
/// server layer guards it with a mutex, while each room's state is only
/// ever touched by its own actor.
pub struct RoomStore<S: QuestionSource> {
    rooms: HashMap<RoomId, RoomHandle>,
    source: Arc<S>,
    settings: RoomSettings,
}

impl<S: QuestionSource> RoomStore<S> {
    /// Creates an empty store. All rooms share `source` and `settings`.
    pub fn new(source: Arc<S>, settings: RoomSettings) -> Self {
        Self {
            rooms: HashMap::new(),
            source,
            settings,
        }
    }

    /// Creates a new room and spawns its actor.
    ///
    /// # Errors
    /// - [`RoomError::DuplicateRoom`] if the id is already taken; an
    ///   existing game is never silently overwritten.
    /// - [`RoomError::InvalidConfig`] for an empty id/topic or a zero
    ///   question count.
    pub fn create(
        &mut self,
        room_id: RoomId,
        topic: String,
        total_questions: u32,
    ) -> Result<RoomHandle, RoomError> {
        if room_id.0.trim().is_empty() {
            return Err(RoomError::InvalidConfig(
                "room id must not be empty".into(),
            ));
        }
        if topic.trim().is_empty() {
            return Err(RoomError::InvalidConfig(
                "topic must not be empty".into(),
            ));
        }
        if total_questions == 0 {
            return Err(RoomError::InvalidConfig(
                "question count must be at least 1".into(),
            ));
        }
        if self.rooms.contains_key(&room_id) {
            return Err(RoomError::DuplicateRoom(room_id));
        }

        let handle = spawn_room(
            room_id.clone(),
            topic,
            total_questions,
            self.settings.clone(),
            Arc::clone(&self.source),
            DEFAULT_CHANNEL_SIZE,
        );
        self.rooms.insert(room_id.clone(), handle.clone());
        tracing::info!(%room_id, "room created");
        Ok(handle)
    }

    /// Looks up a room. `None` for unknown ids; event handlers treat
    /// that as a no-op rather than an error.
    pub fn room(&self, room_id: &RoomId) -> Option<RoomHandle> {
        self.rooms.get(room_id).cloned()
    }

    /// Number of rooms created so far.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Returns `true` if no rooms exist yet.
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
