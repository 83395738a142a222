use axum::extract::ws::Message;
use huddle_core::{ConnectionId, Identity, RoomId};
use huddle_server::{RoomCommand, RoomRegistry};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::Level;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// One fake relay member: its connection id plus the receiving end the
/// room forwards frames into.
pub struct TestMember {
    pub conn: ConnectionId,
    pub rx: mpsc::UnboundedReceiver<Message>,
}

pub async fn join(
    registry: &RoomRegistry,
    room: &RoomId,
    identity: &str,
) -> (mpsc::Sender<RoomCommand>, TestMember) {
    let room_tx = registry.sender_for(room);
    let conn = ConnectionId::new();
    let (tx, rx) = mpsc::unbounded_channel();

    room_tx
        .send(RoomCommand::Join {
            conn,
            identity: Identity::from(identity),
            tx,
        })
        .await
        .expect("room should accept joins");

    (room_tx, TestMember { conn, rx })
}

/// Next text frame within `ms` milliseconds, if any.
pub async fn recv_text(member: &mut TestMember, ms: u64) -> Option<String> {
    match tokio::time::timeout(Duration::from_millis(ms), member.rx.recv()).await {
        Ok(Some(Message::Text(text))) => Some(text.to_string()),
        _ => None,
    }
}

pub async fn recv_frame(member: &mut TestMember, ms: u64) -> Option<Message> {
    tokio::time::timeout(Duration::from_millis(ms), member.rx.recv())
        .await
        .ok()
        .flatten()
}

/// Polls until the registry no longer tracks the room.
pub async fn wait_for_room_gone(registry: &RoomRegistry, room: &RoomId, ms: u64) -> bool {
    let deadline = tokio::time::Instant::now() + Duration::from_millis(ms);
    while tokio::time::Instant::now() < deadline {
        if !registry.contains(room) {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    !registry.contains(room)
}
