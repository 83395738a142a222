pub mod channel;
pub mod error;
pub mod monitor;
pub mod negotiation;
pub mod peer;
pub mod session;

pub use channel::{ChannelEvent, SignalChannel, SignalSink};
pub use error::{AuthError, ChannelError, MediaError, NegotiationError, SessionError};
pub use monitor::AudioActivityMonitor;
pub use negotiation::{MAX_PENDING_CANDIDATES, Negotiator};
pub use peer::{PeerConfig, PeerConnection, PeerEvent, RtcPeer};
pub use session::{
    AuthProvider, MediaSink, MediaSource, RoomSessionController, SessionConfig, SessionEnd,
};
