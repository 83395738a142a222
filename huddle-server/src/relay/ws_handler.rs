use crate::room::{RoomCommand, RoomRegistry};
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Path, State, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use huddle_core::{ConnectionId, Identity, RoomId};
use tokio::sync::mpsc;
use tracing::{debug, info};

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Path((room_id, identity)): Path<(String, String)>,
    State(registry): State<RoomRegistry>,
) -> impl IntoResponse {
    let room = RoomId::from(room_id);
    let identity = Identity::from(identity);

    ws.on_upgrade(move |socket| handle_socket(socket, room, identity, registry))
}

async fn handle_socket(socket: WebSocket, room: RoomId, identity: Identity, registry: RoomRegistry) {
    let conn = ConnectionId::new();
    info!("New connection {} ({}) for room '{}'", conn, identity, room);

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    // The room may be tearing itself down between lookup and join, in
    // which case the send fails and a fresh lookup spawns a new room.
    let mut room_tx = registry.sender_for(&room);
    while room_tx
        .send(RoomCommand::Join {
            conn,
            identity: identity.clone(),
            tx: tx.clone(),
        })
        .await
        .is_err()
    {
        room_tx = registry.sender_for(&room);
    }

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let room_tx = room_tx.clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    frame @ (Message::Text(_) | Message::Binary(_)) => {
                        debug!("Frame from {}", conn);
                        if room_tx
                            .send(RoomCommand::Forward { from: conn, frame })
                            .await
                            .is_err()
                        {
                            break;
                        }
                    }
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    let _ = room_tx.send(RoomCommand::Leave { conn }).await;
    info!("Connection {} ({}) left room '{}'", conn, identity, room);
}
