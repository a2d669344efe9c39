//! Integration tests for `HttpQuestionSource` against a local mock of the
//! question-generation service.

use trivium_source::{HttpQuestionSource, QuestionSource, SourceError};
use warp::http::StatusCode;
use warp::Filter;

/// Serves the given filter on an ephemeral port, returns its address.
fn serve<F>(route: F) -> std::net::SocketAddr
where
    F: Filter<Error = warp::Rejection> + Clone + Send + Sync + 'static,
    F::Extract: warp::Reply,
{
    let (addr, server) =
        warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    addr
}

#[tokio::test]
async fn test_fetch_parses_service_response() {
    let route = warp::post().map(|| {
        warp::reply::json(&serde_json::json!({
            "question": "Which planet is known as the Red Planet?",
            "answers": ["Venus", "Mars", "Jupiter", "Mercury"],
            "correctAnswer": "Mars",
        }))
    });
    let addr = serve(route);

    let source = HttpQuestionSource::new(format!("http://{addr}/")).unwrap();
    let question = source.fetch("astronomy").await.unwrap();

    assert_eq!(question.text, "Which planet is known as the Red Planet?");
    assert_eq!(question.options.len(), 4);
    assert_eq!(question.correct_answer, "Mars");
}

#[tokio::test]
async fn test_fetch_sends_topic_in_request_body() {
    let route =
        warp::post()
            .and(warp::body::json())
            .map(|body: serde_json::Value| {
                let topic = body["topic"].as_str().unwrap_or("<missing>");
                warp::reply::json(&serde_json::json!({
                    "question": format!("About {topic}"),
                    "answers": ["a", "b", "c", "d"],
                    "correctAnswer": "a",
                }))
            });
    let addr = serve(route);

    let source = HttpQuestionSource::new(format!("http://{addr}/")).unwrap();
    let question = source.fetch("History").await.unwrap();
    assert_eq!(question.text, "About History");
}

#[tokio::test]
async fn test_non_2xx_maps_to_status_error() {
    let route = warp::post().map(|| {
        warp::reply::with_status("boom", StatusCode::INTERNAL_SERVER_ERROR)
    });
    let addr = serve(route);

    let source = HttpQuestionSource::new(format!("http://{addr}/")).unwrap();
    let err = source.fetch("history").await.unwrap_err();
    assert!(matches!(err, SourceError::Status(500)), "got {err:?}");
}

#[tokio::test]
async fn test_undecodable_body_maps_to_request_error() {
    let route = warp::post()
        .map(|| warp::reply::with_status("{not json", StatusCode::OK));
    let addr = serve(route);

    let source = HttpQuestionSource::new(format!("http://{addr}/")).unwrap();
    let err = source.fetch("history").await.unwrap_err();
    assert!(matches!(err, SourceError::Request(_)), "got {err:?}");
}

#[tokio::test]
async fn test_wrong_option_count_maps_to_malformed() {
    let route = warp::post().map(|| {
        warp::reply::json(&serde_json::json!({
            "question": "Q?",
            "answers": ["a", "b", "c"],
            "correctAnswer": "a",
        }))
    });
    let addr = serve(route);

    let source = HttpQuestionSource::new(format!("http://{addr}/")).unwrap();
    let err = source.fetch("history").await.unwrap_err();
    assert!(matches!(err, SourceError::Malformed(_)), "got {err:?}");
}

#[tokio::test]
async fn test_unreachable_service_maps_to_request_error() {
    // Nothing listens on port 9 on loopback.
    let source =
        HttpQuestionSource::new("http://127.0.0.1:9/generate-question")
            .unwrap();
    let err = source.fetch("history").await.unwrap_err();
    assert!(matches!(err, SourceError::Request(_)), "got {err:?}");
}
