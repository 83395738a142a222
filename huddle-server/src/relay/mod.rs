mod ws_handler;

pub use ws_handler::*;

use crate::room::RoomRegistry;
use axum::Router;
use axum::routing::get;

/// Relay surface: one WebSocket route, room and identity taken from
/// the path so the relay never has to parse a payload frame.
pub fn router(registry: RoomRegistry) -> Router {
    Router::new()
        .route("/rooms/{room_id}/{identity}", get(ws_handler))
        .with_state(registry)
}
