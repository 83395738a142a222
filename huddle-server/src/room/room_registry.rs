use crate::room::room::Room;
use crate::room::room_command::RoomCommand;
use dashmap::DashMap;
use huddle_core::RoomId;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

/// Connection -> room routing lives here: rooms are created implicitly
/// on first join and removed again once their event loop observes an
/// empty member map.
#[derive(Clone)]
pub struct RoomRegistry {
    rooms: Arc<DashMap<String, mpsc::Sender<RoomCommand>>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self {
            rooms: Arc::new(DashMap::new()),
        }
    }

    pub fn sender_for(&self, room_id: &RoomId) -> mpsc::Sender<RoomCommand> {
        self.rooms
            .entry(room_id.to_string())
            .or_insert_with(|| {
                info!("Creating new room: {}", room_id);
                let (tx, rx) = mpsc::channel(100);
                let room = Room::new(room_id.clone(), rx, self.clone());
                tokio::spawn(room.run());
                tx
            })
            .clone()
    }

    pub(crate) fn deregister(&self, room_id: &RoomId) {
        self.rooms.remove(room_id.as_str());
    }

    pub fn contains(&self, room_id: &RoomId) -> bool {
        self.rooms.contains_key(room_id.as_str())
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}
