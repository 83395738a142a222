use crate::utils::{init_tracing, join, recv_text};
use axum::extract::ws::Message;
use huddle_core::{ConnectionId, RoomId};
use huddle_server::{RoomCommand, RoomRegistry};

#[tokio::test]
async fn test_frame_reaches_other_member_verbatim() {
    init_tracing();

    let registry = RoomRegistry::new();
    let room = RoomId::from("rH");
    let (room_tx, mut host) = join(&registry, &room, "rH").await;
    let (_tx, mut guest) = join(&registry, &room, "rG").await;

    let offer = r#"{"offer":{"type":"offer","sdp":"v=0"}}"#;
    room_tx
        .send(RoomCommand::Forward {
            from: host.conn,
            frame: Message::Text(offer.into()),
        })
        .await
        .unwrap();

    assert_eq!(recv_text(&mut guest, 1000).await.as_deref(), Some(offer));
    // Never echoed back to the sender.
    assert_eq!(recv_text(&mut host, 200).await, None);
}

#[tokio::test]
async fn test_frame_never_leaves_its_room() {
    init_tracing();

    let registry = RoomRegistry::new();
    let room = RoomId::from("rH");
    let other_room = RoomId::from("rX");
    let (room_tx, host) = join(&registry, &room, "rH").await;
    let (_tx_g, mut guest) = join(&registry, &room, "rG").await;
    let (_tx_o, mut outsider) = join(&registry, &other_room, "rX").await;

    room_tx
        .send(RoomCommand::Forward {
            from: host.conn,
            frame: Message::Text("hello".into()),
        })
        .await
        .unwrap();

    assert_eq!(recv_text(&mut guest, 1000).await.as_deref(), Some("hello"));
    assert_eq!(recv_text(&mut outsider, 200).await, None);
}

#[tokio::test]
async fn test_frames_from_non_members_are_dropped() {
    init_tracing();

    let registry = RoomRegistry::new();
    let room = RoomId::from("rH");
    let (room_tx, mut host) = join(&registry, &room, "rH").await;

    room_tx
        .send(RoomCommand::Forward {
            from: ConnectionId::new(),
            frame: Message::Text("spoofed".into()),
        })
        .await
        .unwrap();

    assert_eq!(recv_text(&mut host, 200).await, None);
}
