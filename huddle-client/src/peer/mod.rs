mod rtc_peer;

pub use rtc_peer::{PeerConfig, RtcPeer};

use crate::error::NegotiationError;
use async_trait::async_trait;
use huddle_core::{IceCandidateInit, SessionDescription, SignalingState};
use std::sync::Arc;
use webrtc::track::track_local::TrackLocal;
use webrtc::track::track_remote::TrackRemote;

/// Peer-connection callbacks flattened into one ordered event stream,
/// so the session loop is the only consumer and the negotiator's
/// transition table stays the single source of truth.
pub enum PeerEvent {
    LocalCandidate(IceCandidateInit),
    RemoteTrack(Arc<TrackRemote>),
    Connected,
    Disconnected,
}

/// The slice of the RTC peer-connection surface the negotiation state
/// machine needs. [`RtcPeer`] implements it over the webrtc crate;
/// tests script it.
#[async_trait]
pub trait PeerConnection: Send + Sync {
    fn signaling_state(&self) -> SignalingState;

    async fn remote_description_set(&self) -> bool;

    async fn set_remote_description(
        &self,
        desc: SessionDescription,
    ) -> Result<(), NegotiationError>;

    async fn set_local_description(&self, desc: SessionDescription)
    -> Result<(), NegotiationError>;

    async fn create_offer(&self) -> Result<SessionDescription, NegotiationError>;

    async fn create_answer(&self) -> Result<SessionDescription, NegotiationError>;

    async fn add_ice_candidate(&self, candidate: IceCandidateInit) -> Result<(), NegotiationError>;

    async fn add_audio_track(
        &self,
        track: Arc<dyn TrackLocal + Send + Sync>,
    ) -> Result<(), NegotiationError>;

    async fn close(&self);
}
