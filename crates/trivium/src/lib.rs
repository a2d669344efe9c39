//! # Trivium
//!
//! Multiplayer trivia backend. Clients join a shared room over WebSocket,
//! receive synchronized questions generated by an external service, answer
//! within a 15-second window, and receive aggregated scores and a winner
//! (or draw) when the game ends.
//!
//! This crate ties the layers together: transport → protocol → rooms,
//! plus the small HTTP API used to create rooms.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use trivium::TriviumServerBuilder;
//! use trivium_source::HttpQuestionSource;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let source = HttpQuestionSource::new("http://localhost:3001/generate-question")?;
//! let server = TriviumServerBuilder::new()
//!     .bind("0.0.0.0:8080")
//!     .http_bind("0.0.0.0:3001")
//!     .build(source)
//!     .await?;
//! server.run().await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod handler;
mod http;
mod server;

pub use error::TriviumError;
pub use server::{TriviumServer, TriviumServerBuilder};
