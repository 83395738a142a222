mod participant;
mod room;
mod session;
mod signaling;
mod state;

pub use participant::{ConnectionId, Identity};
pub use room::RoomId;
pub use session::SessionRole;
pub use signaling::{IceCandidateInit, SdpType, SessionDescription, SignalMessage};
pub use state::SignalingState;
