use crate::utils::{init_tracing, join, recv_frame};
use axum::extract::ws::Message;
use huddle_core::RoomId;
use huddle_server::{RoomCommand, RoomRegistry};

// The relay never inspects payloads, so even non-JSON binary frames
// pass through untouched.
#[tokio::test]
async fn test_binary_frames_forwarded_verbatim() {
    init_tracing();

    let registry = RoomRegistry::new();
    let room = RoomId::from("rH");
    let (room_tx, host) = join(&registry, &room, "rH").await;
    let (_tx, mut guest) = join(&registry, &room, "rG").await;

    let payload: &[u8] = &[0x00, 0xff, 0x13, 0x37];
    room_tx
        .send(RoomCommand::Forward {
            from: host.conn,
            frame: Message::Binary(payload.to_vec().into()),
        })
        .await
        .unwrap();

    match recv_frame(&mut guest, 1000).await {
        Some(Message::Binary(bytes)) => assert_eq!(bytes.as_ref(), payload),
        other => panic!("expected binary frame, got {other:?}"),
    }
}
