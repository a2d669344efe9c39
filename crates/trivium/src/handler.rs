//! Per-connection handler: decode client events and route them to rooms.
//!
//! Each accepted connection gets its own Tokio task running this handler,
//! plus a writer task pumping room broadcasts back to the socket. There is
//! no handshake: player identity travels inside the events, matching the
//! realtime surface the browser clients speak.
//!
//! Every failure here is contained: an undecodable frame or an event for
//! an unknown room is logged and dropped, never propagated to other
//! connections or rooms.

use std::sync::Arc;

use tokio::sync::mpsc;
use trivium_protocol::{ClientEvent, Codec, ServerEvent};
use trivium_room::RoomSender;
use trivium_source::QuestionSource;
use trivium_transport::{Connection, WebSocketConnection};

use crate::server::ServerState;

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection<S: QuestionSource>(
    conn: WebSocketConnection,
    state: Arc<ServerState<S>>,
) {
    let conn_id = conn.id();
    tracing::debug!(%conn_id, "handling new connection");

    // Outbound pump: the rooms this connection joins broadcast into `tx`;
    // the writer task serializes onto the socket.
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerEvent>();
    let writer = {
        let conn = conn.clone();
        let codec = state.codec;
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                let bytes = match codec.encode(&event) {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        tracing::error!(error = %e, "failed to encode broadcast");
                        continue;
                    }
                };
                if conn.send(&bytes).await.is_err() {
                    break;
                }
            }
        })
    };

    loop {
        let data = match conn.recv().await {
            Ok(Some(data)) => data,
            Ok(None) => {
                tracing::debug!(%conn_id, "connection closed cleanly");
                break;
            }
            Err(e) => {
                tracing::debug!(%conn_id, error = %e, "recv error");
                break;
            }
        };

        let event: ClientEvent = match state.codec.decode(&data) {
            Ok(event) => event,
            Err(e) => {
                tracing::debug!(
                    %conn_id, error = %e, "failed to decode client event"
                );
                continue;
            }
        };

        dispatch_event(&state, &tx, event).await;
    }

    // The rooms still hold a sender clone for this connection; their
    // broadcasts simply go nowhere once the writer is gone.
    writer.abort();
}

/// Routes one client event to its room. Unknown rooms are a no-op.
async fn dispatch_event<S: QuestionSource>(
    state: &Arc<ServerState<S>>,
    outbound: &RoomSender,
    event: ClientEvent,
) {
    match event {
        ClientEvent::JoinRoom { player_id, room_id } => {
            // Lock only for the lookup, never across the room call.
            let room = state.rooms.lock().await.room(&room_id);
            let Some(room) = room else {
                tracing::debug!(%room_id, "join-room for unknown room, ignoring");
                return;
            };
            if let Err(e) = room.join(player_id, outbound.clone()).await {
                tracing::warn!(%room_id, error = %e, "join failed");
            }
        }

        ClientEvent::Start { room_id } => {
            let room = state.rooms.lock().await.room(&room_id);
            let Some(room) = room else {
                tracing::debug!(%room_id, "start for unknown room, ignoring");
                return;
            };
            if let Err(e) = room.start().await {
                tracing::warn!(%room_id, error = %e, "start failed");
            }
        }

        ClientEvent::Answer {
            room_id,
            player_id,
            answer,
        } => {
            let room = state.rooms.lock().await.room(&room_id);
            let Some(room) = room else {
                tracing::debug!(%room_id, "answer for unknown room, ignoring");
                return;
            };
            if let Err(e) = room.answer(player_id, answer).await {
                tracing::warn!(%room_id, error = %e, "answer failed");
            }
        }
    }
}
