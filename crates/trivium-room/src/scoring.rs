//! End-of-game tallies and winner determination.

use std::collections::HashMap;

use trivium_protocol::{GameResults, PlayerId, PlayerResult};

/// Builds the per-player `{correct, wrong}` table for the end-game
/// broadcast. Players with no score entry count as zero correct.
pub(crate) fn final_results(
    players: &[PlayerId],
    scores: &HashMap<PlayerId, u32>,
    total_questions: u32,
) -> GameResults {
    players
        .iter()
        .map(|player| {
            let correct = scores.get(player).copied().unwrap_or(0);
            (
                player.clone(),
                PlayerResult {
                    correct,
                    wrong: total_questions - correct,
                },
            )
        })
        .collect()
}

/// Decides the winner: the single player with the strict maximum score,
/// or a draw when two or more players share the maximum.
pub(crate) fn decide_winner(
    players: &[PlayerId],
    scores: &HashMap<PlayerId, u32>,
) -> (Option<PlayerId>, bool) {
    let Some(max) = players
        .iter()
        .map(|p| scores.get(p).copied().unwrap_or(0))
        .max()
    else {
        // No players at all: nothing to win.
        return (None, true);
    };

    let mut winners = players
        .iter()
        .filter(|p| scores.get(*p).copied().unwrap_or(0) == max);

    match (winners.next(), winners.next()) {
        (Some(winner), None) => (Some(winner.clone()), false),
        _ => (None, true),
    }
}
