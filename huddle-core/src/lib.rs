pub mod model;

pub use model::{
    ConnectionId, IceCandidateInit, Identity, RoomId, SdpType, SessionDescription, SessionRole,
    SignalMessage, SignalingState,
};
