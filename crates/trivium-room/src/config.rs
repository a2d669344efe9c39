//! Room settings and the round lifecycle state machine.

use std::time::Duration;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// RoomSettings
// ---------------------------------------------------------------------------

/// Timing and budget settings applied to every room in a store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSettings {
    /// Length of a round in countdown ticks (one tick per second).
    pub round_ticks: u32,

    /// Gap between a round's evaluation and the next question.
    pub round_pause: Duration,

    /// Attempt budget for fetching a question not already in the room's
    /// history. Failed fetches and duplicates consume it alike.
    pub rotation_attempts: u32,

    /// Random jitter (0–max µs) on a countdown's first tick to
    /// desynchronize rooms started at the same instant.
    pub tick_jitter_us: u64,
}

impl Default for RoomSettings {
    fn default() -> Self {
        Self {
            round_ticks: 15,
            round_pause: Duration::from_secs(3),
            rotation_attempts: 5,
            tick_jitter_us: 2_000, // 0–2 ms default jitter
        }
    }
}

// ---------------------------------------------------------------------------
// RoundPhase
// ---------------------------------------------------------------------------

/// The round lifecycle state of a room.
///
/// ```text
/// Idle ──start──→ QuestionActive ──all answered / expiry──→ Evaluating
///                      ↑                                        │
///                      └──────────── next round ────────────────┤
///                                                               ▼
///                Ended ←──────────── last round ────────────────┘
///                  │
///                  └──start──→ QuestionActive
/// ```
///
/// - **Idle**: room exists, no game yet. Entered at creation.
/// - **QuestionActive**: a question is out, answers are being collected,
///   the countdown is running.
/// - **Evaluating**: the round settled (everyone answered, or the timer
///   hit zero) and scores are being applied; also covers the pause before
///   the next question.
/// - **Ended**: final results broadcast. Terminal until the next `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    Idle,
    QuestionActive,
    Evaluating,
    Ended,
}

impl RoundPhase {
    /// Returns `true` while a game is running (a question is live or
    /// being scored).
    pub fn is_in_progress(&self) -> bool {
        matches!(self, Self::QuestionActive | Self::Evaluating)
    }

    /// Returns `true` if a `start` event is accepted in this phase.
    pub fn can_start(&self) -> bool {
        matches!(self, Self::Idle | Self::Ended)
    }

    /// Returns `true` if answers are being accepted.
    pub fn accepts_answers(&self) -> bool {
        matches!(self, Self::QuestionActive)
    }
}

impl std::fmt::Display for RoundPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::QuestionActive => write!(f, "QuestionActive"),
            Self::Evaluating => write!(f, "Evaluating"),
            Self::Ended => write!(f, "Ended"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_phase_can_start() {
        assert!(RoundPhase::Idle.can_start());
        assert!(RoundPhase::Ended.can_start());
        assert!(!RoundPhase::QuestionActive.can_start());
        assert!(!RoundPhase::Evaluating.can_start());
    }

    #[test]
    fn test_round_phase_is_in_progress() {
        assert!(!RoundPhase::Idle.is_in_progress());
        assert!(RoundPhase::QuestionActive.is_in_progress());
        assert!(RoundPhase::Evaluating.is_in_progress());
        assert!(!RoundPhase::Ended.is_in_progress());
    }

    #[test]
    fn test_round_phase_accepts_answers() {
        assert!(RoundPhase::QuestionActive.accepts_answers());
        assert!(!RoundPhase::Idle.accepts_answers());
        assert!(!RoundPhase::Evaluating.accepts_answers());
        assert!(!RoundPhase::Ended.accepts_answers());
    }

    #[test]
    fn test_round_phase_display() {
        assert_eq!(RoundPhase::QuestionActive.to_string(), "QuestionActive");
        assert_eq!(RoundPhase::Ended.to_string(), "Ended");
    }

    #[test]
    fn test_room_settings_default() {
        let settings = RoomSettings::default();
        assert_eq!(settings.round_ticks, 15);
        assert_eq!(settings.round_pause, Duration::from_secs(3));
        assert_eq!(settings.rotation_attempts, 5);
    }
}
