//! Question rotation: fetch a question not yet seen by this room.
//!
//! The question service is unreliable and may repeat itself, so rotation
//! retries on a fixed budget. A fetch error and a duplicate consume the
//! budget identically; the caller only learns whether a fresh question
//! arrived within the budget or not.

use trivium_protocol::Question;
use trivium_source::QuestionSource;

use crate::RoomError;

/// Fetches a question for `topic` whose text does not appear in `history`.
///
/// Makes up to `attempts` independent calls to the source. Returns
/// [`RoomError::NoUniqueQuestion`] when the budget is exhausted, whether
/// by duplicates, fetch failures, or any mix of the two.
pub(crate) async fn next_unique<S: QuestionSource>(
    source: &S,
    topic: &str,
    history: &[Question],
    attempts: u32,
) -> Result<Question, RoomError> {
    for attempt in 1..=attempts {
        match source.fetch(topic).await {
            Ok(question) => {
                if history.iter().any(|q| q.text == question.text) {
                    tracing::debug!(
                        attempt,
                        text = %question.text,
                        "duplicate question, retrying"
                    );
                    continue;
                }
                return Ok(question);
            }
            Err(e) => {
                tracing::debug!(attempt, error = %e, "question fetch failed");
            }
        }
    }
    Err(RoomError::NoUniqueQuestion { attempts })
}
