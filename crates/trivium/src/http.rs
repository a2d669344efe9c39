//! HTTP API: room creation and a health probe.
//!
//! Room creation is the only REST surface; everything in-game flows over
//! the WebSocket transport. The question-generation endpoint itself is an
//! external service and is reached only through `trivium-source`.

use std::convert::Infallible;
use std::sync::Arc;

use serde::Deserialize;
use trivium_protocol::RoomId;
use trivium_room::RoomError;
use trivium_source::QuestionSource;
use warp::http::StatusCode;
use warp::Filter;

use crate::server::ServerState;

/// `POST /api/rooms` request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateRoomRequest {
    room_id: String,
    topic: String,
    question_count: u32,
}

/// All HTTP routes.
pub(crate) fn routes<S: QuestionSource>(
    state: Arc<ServerState<S>>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    create_room(state).or(health())
}

/// `POST /api/rooms` — creates a room.
///
/// Replies 201 on success, 409 for a duplicate id, 400 for invalid
/// parameters (empty fields, zero question count).
fn create_room<S: QuestionSource>(
    state: Arc<ServerState<S>>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::path!("api" / "rooms")
        .and(warp::post())
        .and(warp::body::json())
        .and(with_state(state))
        .and_then(handle_create_room)
}

/// `GET /health` — liveness probe.
fn health(
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::path!("health").and(warp::get()).map(|| {
        warp::reply::json(&serde_json::json!({
            "status": "healthy",
            "service": "trivium",
        }))
    })
}

async fn handle_create_room<S: QuestionSource>(
    req: CreateRoomRequest,
    state: Arc<ServerState<S>>,
) -> Result<impl warp::Reply, Infallible> {
    let result = {
        let mut rooms = state.rooms.lock().await;
        rooms.create(RoomId(req.room_id), req.topic, req.question_count)
    };

    let reply = match result {
        Ok(handle) => warp::reply::with_status(
            warp::reply::json(&serde_json::json!({
                "roomId": handle.room_id().to_string(),
                "status": "created",
            })),
            StatusCode::CREATED,
        ),
        Err(e @ RoomError::DuplicateRoom(_)) => warp::reply::with_status(
            warp::reply::json(&serde_json::json!({ "error": e.to_string() })),
            StatusCode::CONFLICT,
        ),
        Err(e @ RoomError::InvalidConfig(_)) => warp::reply::with_status(
            warp::reply::json(&serde_json::json!({ "error": e.to_string() })),
            StatusCode::BAD_REQUEST,
        ),
        Err(e) => {
            tracing::error!(error = %e, "room creation failed");
            warp::reply::with_status(
                warp::reply::json(&serde_json::json!({ "error": e.to_string() })),
                StatusCode::INTERNAL_SERVER_ERROR,
            )
        }
    };
    Ok(reply)
}

fn with_state<S: QuestionSource>(
    state: Arc<ServerState<S>>,
) -> impl Filter<Extract = (Arc<ServerState<S>>,), Error = Infallible> + Clone
{
    warp::any().map(move || Arc::clone(&state))
}
