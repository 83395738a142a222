use crate::utils::{init_tracing, join, recv_text, wait_for_room_gone};
use axum::extract::ws::Message;
use huddle_core::RoomId;
use huddle_server::{RoomCommand, RoomRegistry};

#[tokio::test]
async fn test_empty_room_is_discarded() {
    init_tracing();

    let registry = RoomRegistry::new();
    let room = RoomId::from("rH");
    let (room_tx, member) = join(&registry, &room, "rH").await;
    assert!(registry.contains(&room));

    room_tx
        .send(RoomCommand::Leave { conn: member.conn })
        .await
        .unwrap();

    assert!(wait_for_room_gone(&registry, &room, 1000).await);
    assert_eq!(registry.room_count(), 0);
}

#[tokio::test]
async fn test_room_survives_while_one_member_remains() {
    init_tracing();

    let registry = RoomRegistry::new();
    let room = RoomId::from("rH");
    let (room_tx, host) = join(&registry, &room, "rH").await;
    let (_tx, mut guest) = join(&registry, &room, "rG").await;

    room_tx
        .send(RoomCommand::Leave { conn: host.conn })
        .await
        .unwrap();

    // The remaining member still gets frames, so the room is alive.
    room_tx
        .send(RoomCommand::Forward {
            from: guest.conn,
            frame: Message::Text("ping".into()),
        })
        .await
        .unwrap();

    assert!(registry.contains(&room));
    // Single remaining member is the sender; nothing comes back.
    assert_eq!(recv_text(&mut guest, 200).await, None);
}
