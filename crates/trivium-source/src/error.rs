//! Error types for the question-source boundary.

/// Errors that can occur while fetching a question.
///
/// Callers never distinguish these when budgeting retries (a failed
/// attempt is a failed attempt), but the variants keep logs diagnosable.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The HTTP request failed: connect, timeout, or body/JSON decode.
    #[error("question request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("question service returned status {0}")]
    Status(u16),

    /// The response parsed but violates the question contract
    /// (e.g. the wrong number of answer options).
    #[error("malformed question payload: {0}")]
    Malformed(String),
}
