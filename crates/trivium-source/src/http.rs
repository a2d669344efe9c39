//! HTTP implementation of [`QuestionSource`] using `reqwest`.

use std::time::Duration;

use serde::Serialize;
use trivium_protocol::Question;

use crate::{QuestionSource, SourceError};

/// Questions carry exactly four answer options on the wire.
const OPTION_COUNT: usize = 4;

/// Default per-request timeout. The round countdown is 15 s; a fetch that
/// takes longer than this is better spent on the next attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Serialize)]
struct TopicRequest<'a> {
    topic: &'a str,
}

/// A [`QuestionSource`] backed by the external question-generation service.
///
/// Sends `POST {url}` with `{"topic": ...}` and expects a 2xx response
/// containing `{"question", "answers", "correctAnswer"}`.
pub struct HttpQuestionSource {
    client: reqwest::Client,
    url: String,
}

impl HttpQuestionSource {
    /// Creates a source pointed at the given service URL.
    pub fn new(url: impl Into<String>) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// The configured service URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl QuestionSource for HttpQuestionSource {
    async fn fetch(&self, topic: &str) -> Result<Question, SourceError> {
        let response = self
            .client
            .post(&self.url)
            .json(&TopicRequest { topic })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(%status, topic, "question service refused request");
            return Err(SourceError::Status(status.as_u16()));
        }

        let question: Question = response.json().await?;
        validate(question)
    }
}

/// Checks the question contract beyond what serde enforces.
fn validate(question: Question) -> Result<Question, SourceError> {
    if question.options.len() != OPTION_COUNT {
        return Err(SourceError::Malformed(format!(
            "expected {OPTION_COUNT} answer options, got {}",
            question.options.len()
        )));
    }
    if !question.options.contains(&question.correct_answer) {
        return Err(SourceError::Malformed(
            "correct answer is not one of the options".into(),
        ));
    }
    Ok(question)
}
