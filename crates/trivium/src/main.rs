//! Trivium server binary.
//!
//! Configuration comes from the environment:
//! - `TRIVIUM_WS_ADDR` — WebSocket listen address (default `0.0.0.0:8080`)
//! - `TRIVIUM_HTTP_ADDR` — room API listen address (default `0.0.0.0:3001`)
//! - `QUESTION_SERVICE_URL` — the external question-generation endpoint
//! - `RUST_LOG` — tracing filter (default `info`)

use std::env;

use tracing_subscriber::EnvFilter;
use trivium::TriviumServerBuilder;
use trivium_source::HttpQuestionSource;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let ws_addr = env::var("TRIVIUM_WS_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let http_addr = env::var("TRIVIUM_HTTP_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:3001".to_string());
    let question_url = env::var("QUESTION_SERVICE_URL").unwrap_or_else(|_| {
        "http://localhost:3001/generate-question".to_string()
    });

    let source = HttpQuestionSource::new(question_url)?;

    let server = TriviumServerBuilder::new()
        .bind(&ws_addr)
        .http_bind(&http_addr)
        .build(source)
        .await?;

    server.run().await?;
    Ok(())
}
