use crate::utils::{init_tracing, join};
use huddle_core::RoomId;
use huddle_server::RoomRegistry;

#[tokio::test]
async fn test_join_creates_room_implicitly() {
    init_tracing();

    let registry = RoomRegistry::new();
    let room = RoomId::from("rH");
    assert!(!registry.contains(&room));

    let (_room_tx, _member) = join(&registry, &room, "rH").await;

    assert!(registry.contains(&room));
    assert_eq!(registry.room_count(), 1);
}

#[tokio::test]
async fn test_distinct_rooms_are_tracked_separately() {
    init_tracing();

    let registry = RoomRegistry::new();
    let (_tx_a, _a) = join(&registry, &RoomId::from("rA"), "rA").await;
    let (_tx_b, _b) = join(&registry, &RoomId::from("rB"), "rB").await;

    assert_eq!(registry.room_count(), 2);
}
