//! The question-source boundary for Trivium.
//!
//! Questions come from an external generation service that is unreliable
//! by contract: it may return duplicates, time out, or answer with garbage.
//! The rest of the system only sees the [`QuestionSource`] trait, so tests
//! and the room layer never touch the network directly.
//!
//! The shipped implementation is [`HttpQuestionSource`], a thin `reqwest`
//! client for the service's `{topic} → {question, answers, correctAnswer}`
//! JSON contract.

mod error;
mod http;

pub use error::SourceError;
pub use http::HttpQuestionSource;

use trivium_protocol::Question;

/// Produces one question for a topic.
///
/// Implementations must be cheap to share (`&self` methods): one source
/// instance serves every room in the process concurrently. Each `fetch`
/// is an independent attempt; callers retry on their own budget, so an
/// implementation should fail fast rather than retry internally.
pub trait QuestionSource: Send + Sync + 'static {
    /// Requests a single question for the given topic.
    ///
    /// # Errors
    /// Any transport, status, or parse failure. The caller treats every
    /// error identically, as one consumed attempt.
    fn fetch(
        &self,
        topic: &str,
    ) -> impl std::future::Future<Output = Result<Question, SourceError>> + Send;
}
