//! `TriviumServer` builder and accept loop.
//!
//! Two listeners run side by side: the WebSocket transport carrying the
//! realtime event surface, and a small warp HTTP API for room creation.
//! Everything else (round timing, answers, scoring) happens inside the
//! room actors.

use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::Mutex;
use trivium_protocol::JsonCodec;
use trivium_room::{RoomSettings, RoomStore};
use trivium_source::QuestionSource;
use trivium_transport::{Transport, WebSocketTransport};

use crate::handler::handle_connection;
use crate::http;
use crate::TriviumError;

/// Shared server state passed to each connection handler task.
///
/// The mutex guards only the store's id → handle map; room state itself
/// is owned by the room actors and never locked here.
pub(crate) struct ServerState<S: QuestionSource> {
    pub(crate) rooms: Mutex<RoomStore<S>>,
    pub(crate) codec: JsonCodec,
}

/// Builder for configuring and starting a Trivium server.
pub struct TriviumServerBuilder {
    bind_addr: String,
    http_addr: String,
    room_settings: RoomSettings,
}

impl TriviumServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            http_addr: "127.0.0.1:3001".to_string(),
            room_settings: RoomSettings::default(),
        }
    }

    /// Sets the WebSocket listen address.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Sets the HTTP API listen address.
    pub fn http_bind(mut self, addr: &str) -> Self {
        self.http_addr = addr.to_string();
        self
    }

    /// Sets the room timing/budget settings.
    pub fn room_settings(mut self, settings: RoomSettings) -> Self {
        self.room_settings = settings;
        self
    }

    /// Binds both listeners and builds the server with the given
    /// question source.
    pub async fn build<S: QuestionSource>(
        self,
        source: S,
    ) -> Result<TriviumServer<S>, TriviumError> {
        let transport = WebSocketTransport::bind(&self.bind_addr).await?;

        let state = Arc::new(ServerState {
            rooms: Mutex::new(RoomStore::new(
                Arc::new(source),
                self.room_settings,
            )),
            codec: JsonCodec,
        });

        let requested: SocketAddr =
            self.http_addr.parse().map_err(|e| {
                TriviumError::Config(format!(
                    "invalid http bind address {}: {e}",
                    self.http_addr
                ))
            })?;
        let (http_addr, http_server) =
            warp::serve(http::routes(Arc::clone(&state)))
                .try_bind_ephemeral(requested)
                .map_err(TriviumError::HttpBind)?;

        Ok(TriviumServer {
            transport,
            state,
            http_addr,
            http_server: Box::pin(http_server),
        })
    }
}

impl Default for TriviumServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A running Trivium server.
///
/// Call [`run()`](Self::run) to start serving.
pub struct TriviumServer<S: QuestionSource> {
    transport: WebSocketTransport,
    state: Arc<ServerState<S>>,
    http_addr: SocketAddr,
    http_server: Pin<Box<dyn Future<Output = ()> + Send>>,
}

impl<S: QuestionSource> TriviumServer<S> {
    /// Creates a new builder.
    pub fn builder() -> TriviumServerBuilder {
        TriviumServerBuilder::new()
    }

    /// The WebSocket address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.transport.local_addr()
    }

    /// The HTTP API address the server is bound to.
    pub fn http_addr(&self) -> SocketAddr {
        self.http_addr
    }

    /// Runs the server until the process is terminated.
    ///
    /// Spawns the HTTP API, then accepts WebSocket connections and hands
    /// each to its own handler task. A failing connection never takes
    /// down the loop.
    pub async fn run(mut self) -> Result<(), TriviumError> {
        tracing::info!(http = %self.http_addr, "room API listening");
        tokio::spawn(self.http_server);

        tracing::info!("Trivium server running");
        loop {
            match self.transport.accept().await {
                Ok(conn) => {
                    let state = Arc::clone(&self.state);
                    tokio::spawn(handle_connection(conn, state));
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}
