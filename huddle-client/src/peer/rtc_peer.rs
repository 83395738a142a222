use crate::error::NegotiationError;
use crate::peer::{PeerConnection, PeerEvent};
use async_trait::async_trait;
use huddle_core::{IceCandidateInit, SdpType, SessionDescription, SignalingState};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};
use webrtc::api::APIBuilder;
use webrtc::api::interceptor_registry::register_default_interceptors;
use webrtc::api::media_engine::MediaEngine;
use webrtc::ice_transport::ice_candidate::{RTCIceCandidate, RTCIceCandidateInit};
use webrtc::ice_transport::ice_server::RTCIceServer;
use webrtc::interceptor::registry::Registry;
use webrtc::peer_connection::RTCPeerConnection;
use webrtc::peer_connection::configuration::RTCConfiguration;
use webrtc::peer_connection::peer_connection_state::RTCPeerConnectionState;
use webrtc::peer_connection::sdp::session_description::RTCSessionDescription;
use webrtc::peer_connection::signaling_state::RTCSignalingState;
use webrtc::track::track_local::TrackLocal;

#[derive(Clone)]
pub struct PeerConfig {
    pub ice_servers: Vec<String>,
}

impl Default for PeerConfig {
    fn default() -> Self {
        Self {
            ice_servers: vec!["stun:stun.l.google.com:19302".to_owned()],
        }
    }
}

/// Production [`PeerConnection`] over the webrtc crate. Callbacks are
/// bridged into the `event_tx` stream handed in at construction.
pub struct RtcPeer {
    pc: Arc<RTCPeerConnection>,
}

impl RtcPeer {
    pub async fn new(
        config: PeerConfig,
        event_tx: mpsc::Sender<PeerEvent>,
    ) -> Result<Self, NegotiationError> {
        let mut media_engine = MediaEngine::default();
        media_engine
            .register_default_codecs()
            .map_err(|e| NegotiationError::Setup(e.to_string()))?;

        let registry = register_default_interceptors(Registry::new(), &mut media_engine)
            .map_err(|e| NegotiationError::Setup(e.to_string()))?;

        let api = APIBuilder::new()
            .with_media_engine(media_engine)
            .with_interceptor_registry(registry)
            .build();

        let ice_servers = if config.ice_servers.is_empty() {
            vec![]
        } else {
            vec![RTCIceServer {
                urls: config.ice_servers,
                ..Default::default()
            }]
        };

        let rtc_config = RTCConfiguration {
            ice_servers,
            ..Default::default()
        };

        let pc = Arc::new(
            api.new_peer_connection(rtc_config)
                .await
                .map_err(|e| NegotiationError::Setup(e.to_string()))?,
        );

        let ice_tx = event_tx.clone();
        pc.on_ice_candidate(Box::new(move |candidate: Option<RTCIceCandidate>| {
            let tx = ice_tx.clone();
            Box::pin(async move {
                let Some(candidate) = candidate else { return };
                let Ok(init) = candidate.to_json() else {
                    warn!("Local candidate not serializable, skipped");
                    return;
                };
                debug!("Local candidate gathered");
                let _ = tx.send(PeerEvent::LocalCandidate(from_rtc_init(init))).await;
            })
        }));

        let track_tx = event_tx.clone();
        pc.on_track(Box::new(move |track, _receiver, _transceiver| {
            let tx = track_tx.clone();
            Box::pin(async move {
                debug!("Remote track arrived: {}", track.kind());
                let _ = tx.send(PeerEvent::RemoteTrack(track)).await;
            })
        }));

        let state_tx = event_tx;
        pc.on_peer_connection_state_change(Box::new(move |state: RTCPeerConnectionState| {
            let tx = state_tx.clone();
            Box::pin(async move {
                debug!("Peer connection state: {}", state);
                match state {
                    RTCPeerConnectionState::Connected => {
                        let _ = tx.send(PeerEvent::Connected).await;
                    }
                    RTCPeerConnectionState::Failed
                    | RTCPeerConnectionState::Disconnected
                    | RTCPeerConnectionState::Closed => {
                        let _ = tx.send(PeerEvent::Disconnected).await;
                    }
                    _ => {}
                }
            })
        }));

        Ok(Self { pc })
    }
}

#[async_trait]
impl PeerConnection for RtcPeer {
    fn signaling_state(&self) -> SignalingState {
        match self.pc.signaling_state() {
            RTCSignalingState::Stable => SignalingState::Stable,
            RTCSignalingState::HaveLocalOffer => SignalingState::HaveLocalOffer,
            RTCSignalingState::HaveRemoteOffer => SignalingState::HaveRemoteOffer,
            RTCSignalingState::HaveLocalPranswer => SignalingState::HaveLocalPranswer,
            RTCSignalingState::HaveRemotePranswer => SignalingState::HaveRemotePranswer,
            RTCSignalingState::Closed | RTCSignalingState::Unspecified => SignalingState::Closed,
        }
    }

    async fn remote_description_set(&self) -> bool {
        self.pc.remote_description().await.is_some()
    }

    async fn set_remote_description(
        &self,
        desc: SessionDescription,
    ) -> Result<(), NegotiationError> {
        let desc = to_rtc_description(desc)?;
        self.pc
            .set_remote_description(desc)
            .await
            .map_err(|e| NegotiationError::Sdp(e.to_string()))
    }

    async fn set_local_description(
        &self,
        desc: SessionDescription,
    ) -> Result<(), NegotiationError> {
        let desc = to_rtc_description(desc)?;
        self.pc
            .set_local_description(desc)
            .await
            .map_err(|e| NegotiationError::Sdp(e.to_string()))
    }

    async fn create_offer(&self) -> Result<SessionDescription, NegotiationError> {
        let offer = self
            .pc
            .create_offer(None)
            .await
            .map_err(|e| NegotiationError::Sdp(e.to_string()))?;
        Ok(SessionDescription::offer(offer.sdp))
    }

    async fn create_answer(&self) -> Result<SessionDescription, NegotiationError> {
        let answer = self
            .pc
            .create_answer(None)
            .await
            .map_err(|e| NegotiationError::Sdp(e.to_string()))?;
        Ok(SessionDescription::answer(answer.sdp))
    }

    async fn add_ice_candidate(&self, candidate: IceCandidateInit) -> Result<(), NegotiationError> {
        self.pc
            .add_ice_candidate(to_rtc_init(candidate))
            .await
            .map_err(|e| NegotiationError::Ice(e.to_string()))
    }

    async fn add_audio_track(
        &self,
        track: Arc<dyn TrackLocal + Send + Sync>,
    ) -> Result<(), NegotiationError> {
        self.pc
            .add_track(track)
            .await
            .map(|_sender| ())
            .map_err(|e| NegotiationError::Setup(e.to_string()))
    }

    async fn close(&self) {
        if let Err(e) = self.pc.close().await {
            warn!("Error closing peer connection: {}", e);
        }
    }
}

fn to_rtc_description(desc: SessionDescription) -> Result<RTCSessionDescription, NegotiationError> {
    let result = match desc.sdp_type {
        SdpType::Offer => RTCSessionDescription::offer(desc.sdp),
        SdpType::Answer => RTCSessionDescription::answer(desc.sdp),
        SdpType::Pranswer => RTCSessionDescription::pranswer(desc.sdp),
        SdpType::Rollback => {
            return Err(NegotiationError::Sdp("rollback is not supported".into()));
        }
    };
    result.map_err(|e| NegotiationError::Sdp(e.to_string()))
}

fn to_rtc_init(init: IceCandidateInit) -> RTCIceCandidateInit {
    RTCIceCandidateInit {
        candidate: init.candidate,
        sdp_mid: init.sdp_mid,
        sdp_mline_index: init.sdp_m_line_index,
        username_fragment: init.username_fragment,
    }
}

fn from_rtc_init(init: RTCIceCandidateInit) -> IceCandidateInit {
    IceCandidateInit {
        candidate: init.candidate,
        sdp_mid: init.sdp_mid,
        sdp_m_line_index: init.sdp_mline_index,
        username_fragment: init.username_fragment,
    }
}
