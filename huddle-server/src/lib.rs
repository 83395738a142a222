mod relay;
mod room;

pub use relay::{router, ws_handler};
pub use room::{RoomCommand, RoomRegistry};
