use axum::extract::ws::Message;
use huddle_core::{ConnectionId, Identity};
use tokio::sync::mpsc;

/// Commands fed into a room's event loop by the WebSocket handlers.
#[derive(Debug)]
pub enum RoomCommand {
    /// A connection opened a socket against this room.
    Join {
        conn: ConnectionId,
        identity: Identity,
        tx: mpsc::UnboundedSender<Message>,
    },

    /// A frame arrived from a member; relay it verbatim to the others.
    Forward { from: ConnectionId, frame: Message },

    /// The member's socket closed.
    Leave { conn: ConnectionId },
}
