//! Core wire types: identifiers, questions, and the realtime event surface.
//!
//! Event names and field casing follow the wire contract of the reference
//! clients: event tags are kebab-case (`join-room`, `end-game`) and fields
//! are camelCase (`playerId`, `correctAnswer`).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique identifier for a player.
///
/// Opaque string chosen by the client; the server never interprets it.
/// `#[serde(transparent)]` makes `PlayerId("p1")` serialize as `"p1"`,
/// not `{"0": "p1"}`, so it can be used directly as a JSON map key.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unique identifier for a room.
///
/// Opaque string key, unique across the room store. Same newtype pattern
/// as [`PlayerId`].
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RoomId(pub String);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Questions
// ---------------------------------------------------------------------------

/// A complete question as returned by the question-generation service.
///
/// Wire format: `{"question": ..., "answers": [...], "correctAnswer": ...}`.
/// The full shape never leaves the room that owns it; clients only ever
/// see a [`QuestionPayload`]. Two questions are considered the same for
/// de-duplication purposes when their `text` matches exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The question text.
    #[serde(rename = "question")]
    pub text: String,

    /// The four answer options, in display order.
    #[serde(rename = "answers")]
    pub options: Vec<String>,

    /// The correct option. Must match one of `options` verbatim.
    #[serde(rename = "correctAnswer")]
    pub correct_answer: String,
}

/// The client-safe form of a question: text and options only.
///
/// The correct answer is deliberately absent: answers are verified
/// server-side, and the broadcast must not let a client inspect the
/// payload to win the round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionPayload {
    /// The question text.
    #[serde(rename = "question")]
    pub text: String,

    /// The four answer options, in display order.
    #[serde(rename = "answers")]
    pub options: Vec<String>,
}

impl From<&Question> for QuestionPayload {
    fn from(q: &Question) -> Self {
        Self {
            text: q.text.clone(),
            options: q.options.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Per-player tallies included in the end-of-game broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerResult {
    /// Number of rounds answered correctly.
    pub correct: u32,
    /// `total_questions - correct`.
    pub wrong: u32,
}

/// Final results keyed by player. Ordered map so broadcasts are
/// byte-for-byte deterministic for a given score table.
pub type GameResults = BTreeMap<PlayerId, PlayerResult>;

// ---------------------------------------------------------------------------
// Realtime events
// ---------------------------------------------------------------------------

/// Events sent by clients to the server.
///
/// `#[serde(tag = "type")]` produces internally tagged JSON:
/// `{"type": "join-room", "playerId": "p1", "roomId": "r1"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ClientEvent {
    /// Join a room. Idempotent; re-joining is harmless.
    JoinRoom {
        player_id: PlayerId,
        room_id: RoomId,
    },

    /// Reset the room and start round 1.
    Start { room_id: RoomId },

    /// Submit (or resubmit) an answer for the current round.
    Answer {
        room_id: RoomId,
        player_id: PlayerId,
        answer: String,
    },
}

/// Events broadcast by the server to every connection in a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ServerEvent {
    /// Current number of joined players (sent after every join).
    Players { count: usize },

    /// A new round began with this question.
    Question { question: QuestionPayload },

    /// Countdown tick: seconds remaining in the round.
    Timer { remaining: u32 },

    /// The game concluded. `winner` is present only for a strict maximum
    /// score; `draw` is `true` when two or more players share it.
    EndGame {
        results: GameResults,
        #[serde(skip_serializing_if = "Option::is_none")]
        winner: Option<PlayerId>,
        draw: bool,
    },
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! The wire shapes are a contract with the browser clients: these
    //! tests pin the exact tags and field names serde produces.

    use super::*;

    fn pid(id: &str) -> PlayerId {
        PlayerId(id.to_string())
    }

    fn question() -> Question {
        Question {
            text: "In which year did the French Revolution begin?".into(),
            options: vec![
                "1789".into(),
                "1793".into(),
                "1776".into(),
                "1804".into(),
            ],
            correct_answer: "1789".into(),
        }
    }

    // =====================================================================
    // Identity types
    // =====================================================================

    #[test]
    fn test_player_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&pid("alice")).unwrap();
        assert_eq!(json, "\"alice\"");
    }

    #[test]
    fn test_room_id_round_trip() {
        let id = RoomId("r-42".into());
        let json = serde_json::to_string(&id).unwrap();
        let back: RoomId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }

    #[test]
    fn test_display_is_the_raw_string() {
        assert_eq!(pid("alice").to_string(), "alice");
        assert_eq!(RoomId("r1".into()).to_string(), "r1");
    }

    // =====================================================================
    // Questions
    // =====================================================================

    #[test]
    fn test_question_parses_service_wire_format() {
        // This is the exact shape the question-generation service returns.
        let json = r#"{
            "question": "What is the capital of Australia?",
            "answers": ["Sydney", "Canberra", "Melbourne", "Perth"],
            "correctAnswer": "Canberra"
        }"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.text, "What is the capital of Australia?");
        assert_eq!(q.options.len(), 4);
        assert_eq!(q.correct_answer, "Canberra");
    }

    #[test]
    fn test_question_payload_has_no_correct_answer_field() {
        let payload = QuestionPayload::from(&question());
        let json: serde_json::Value = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["question"], "In which year did the French Revolution begin?");
        assert!(json["answers"].is_array());
        assert!(
            json.get("correctAnswer").is_none(),
            "broadcast payload must not leak the correct answer"
        );
    }

    #[test]
    fn test_question_missing_field_is_rejected() {
        let json = r#"{"question": "Q?", "answers": ["a","b","c","d"]}"#;
        let result: Result<Question, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    // =====================================================================
    // Client events — one shape test per variant
    // =====================================================================

    #[test]
    fn test_join_room_json_format() {
        let ev = ClientEvent::JoinRoom {
            player_id: pid("p1"),
            room_id: RoomId("r1".into()),
        };
        let json: serde_json::Value = serde_json::to_value(&ev).unwrap();

        assert_eq!(json["type"], "join-room");
        assert_eq!(json["playerId"], "p1");
        assert_eq!(json["roomId"], "r1");
    }

    #[test]
    fn test_start_json_format() {
        let ev = ClientEvent::Start {
            room_id: RoomId("r1".into()),
        };
        let json: serde_json::Value = serde_json::to_value(&ev).unwrap();

        assert_eq!(json["type"], "start");
        assert_eq!(json["roomId"], "r1");
    }

    #[test]
    fn test_answer_json_format() {
        let ev = ClientEvent::Answer {
            room_id: RoomId("r1".into()),
            player_id: pid("p2"),
            answer: "1789".into(),
        };
        let json: serde_json::Value = serde_json::to_value(&ev).unwrap();

        assert_eq!(json["type"], "answer");
        assert_eq!(json["playerId"], "p2");
        assert_eq!(json["answer"], "1789");
    }

    #[test]
    fn test_client_event_round_trip() {
        let ev = ClientEvent::Answer {
            room_id: RoomId("history-night".into()),
            player_id: pid("p1"),
            answer: "Canberra".into(),
        };
        let bytes = serde_json::to_vec(&ev).unwrap();
        let back: ClientEvent = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(ev, back);
    }

    #[test]
    fn test_unknown_client_event_type_is_rejected() {
        let json = r#"{"type": "teleport", "roomId": "r1"}"#;
        let result: Result<ClientEvent, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    // =====================================================================
    // Server events
    // =====================================================================

    #[test]
    fn test_players_json_format() {
        let ev = ServerEvent::Players { count: 3 };
        let json: serde_json::Value = serde_json::to_value(&ev).unwrap();

        assert_eq!(json["type"], "players");
        assert_eq!(json["count"], 3);
    }

    #[test]
    fn test_question_broadcast_strips_correct_answer() {
        let ev = ServerEvent::Question {
            question: QuestionPayload::from(&question()),
        };
        let json: serde_json::Value = serde_json::to_value(&ev).unwrap();

        assert_eq!(json["type"], "question");
        assert_eq!(json["question"]["answers"][0], "1789");
        assert!(json["question"].get("correctAnswer").is_none());
    }

    #[test]
    fn test_timer_json_format() {
        let ev = ServerEvent::Timer { remaining: 14 };
        let json: serde_json::Value = serde_json::to_value(&ev).unwrap();

        assert_eq!(json["type"], "timer");
        assert_eq!(json["remaining"], 14);
    }

    #[test]
    fn test_end_game_with_winner() {
        let mut results = GameResults::new();
        results.insert(pid("p1"), PlayerResult { correct: 4, wrong: 0 });
        results.insert(pid("p2"), PlayerResult { correct: 2, wrong: 2 });

        let ev = ServerEvent::EndGame {
            results,
            winner: Some(pid("p1")),
            draw: false,
        };
        let json: serde_json::Value = serde_json::to_value(&ev).unwrap();

        assert_eq!(json["type"], "end-game");
        assert_eq!(json["winner"], "p1");
        assert_eq!(json["draw"], false);
        assert_eq!(json["results"]["p1"]["correct"], 4);
        assert_eq!(json["results"]["p2"]["wrong"], 2);
    }

    #[test]
    fn test_end_game_draw_omits_winner() {
        let mut results = GameResults::new();
        results.insert(pid("p1"), PlayerResult { correct: 2, wrong: 0 });
        results.insert(pid("p2"), PlayerResult { correct: 2, wrong: 0 });

        let ev = ServerEvent::EndGame {
            results,
            winner: None,
            draw: true,
        };
        let json: serde_json::Value = serde_json::to_value(&ev).unwrap();

        assert_eq!(json["draw"], true);
        assert!(
            json.get("winner").is_none(),
            "draw results must not carry a winner field"
        );
    }

    #[test]
    fn test_server_event_round_trip() {
        let ev = ServerEvent::Timer { remaining: 0 };
        let bytes = serde_json::to_vec(&ev).unwrap();
        let back: ServerEvent = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(ev, back);
    }

    #[test]
    fn test_decode_garbage_returns_error() {
        let garbage = b"not json at all";
        let result: Result<ClientEvent, _> = serde_json::from_slice(garbage);
        assert!(result.is_err());
    }
}
