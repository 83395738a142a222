use crate::channel::{ChannelEvent, SignalChannel};
use crate::error::{AuthError, ChannelError, MediaError, SessionError};
use crate::monitor::AudioActivityMonitor;
use crate::negotiation::Negotiator;
use crate::peer::{PeerConfig, PeerConnection, PeerEvent, RtcPeer};
use async_trait::async_trait;
use huddle_core::{Identity, RoomId, SessionRole};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use webrtc::track::track_local::TrackLocal;
use webrtc::track::track_remote::TrackRemote;

/// Wallet (or other) authentication, injected as a capability instead
/// of ambient global state. `ready` resolves once the provider has
/// initialized; an identity may or may not be present afterwards.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn ready(&self) -> Result<(), AuthError>;

    fn current_identity(&self) -> Option<Identity>;
}

/// Local capture device. Only the initiator ever asks for a track.
#[async_trait]
pub trait MediaSource: Send + Sync {
    async fn capture_audio(&self) -> Result<Arc<dyn TrackLocal + Send + Sync>, MediaError>;
}

/// Presentation surface for the remote stream.
pub trait MediaSink: Send + Sync {
    fn play_remote(&self, track: Arc<TrackRemote>);
}

#[derive(Clone)]
pub struct SessionConfig {
    /// Base address of the relay, e.g. `ws://127.0.0.1:8080`.
    pub server_url: String,
    pub ice_servers: Vec<String>,
    pub negotiation_deadline: Duration,
    pub monitor_interval: Duration,
}

impl SessionConfig {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            ice_servers: PeerConfig::default().ice_servers,
            negotiation_deadline: Duration::from_secs(30),
            monitor_interval: Duration::from_millis(200),
        }
    }
}

/// How a session ended when it did not fail outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    ChannelClosed,
    PeerClosed,
}

/// Owns one room session end to end: resolves the identity, decides
/// the role, opens the channel, builds the peer and negotiator, and
/// runs the single event loop all transitions flow through.
pub struct RoomSessionController {
    room: RoomId,
    config: SessionConfig,
    auth: Arc<dyn AuthProvider>,
    source: Arc<dyn MediaSource>,
    sink: Arc<dyn MediaSink>,
}

impl RoomSessionController {
    pub fn new(
        room: RoomId,
        config: SessionConfig,
        auth: Arc<dyn AuthProvider>,
        source: Arc<dyn MediaSource>,
        sink: Arc<dyn MediaSink>,
    ) -> Self {
        Self {
            room,
            config,
            auth,
            source,
            sink,
        }
    }

    pub async fn run(&self) -> Result<SessionEnd, SessionError> {
        self.auth.ready().await?;
        let identity = self
            .auth
            .current_identity()
            .ok_or(SessionError::NotAuthenticated)?;

        let role = SessionRole::determine(&identity, &self.room);
        info!("Session in room '{}' as {} ({:?})", self.room, identity, role);

        if self.config.server_url.trim().is_empty() {
            return Err(ChannelError::MissingAddress.into());
        }

        let url = format!(
            "{}/rooms/{}/{}",
            self.config.server_url.trim_end_matches('/'),
            self.room,
            identity
        );
        let (channel, mut channel_rx) = SignalChannel::open(&url).await?;

        let (peer_tx, mut peer_rx) = mpsc::channel(64);
        let pc = Arc::new(
            RtcPeer::new(
                PeerConfig {
                    ice_servers: self.config.ice_servers.clone(),
                },
                peer_tx,
            )
            .await?,
        );

        let mut negotiator =
            Negotiator::new(pc.clone() as Arc<dyn PeerConnection>, Arc::new(channel));

        if role.is_initiator() {
            let started = async {
                let track = self.source.capture_audio().await?;
                pc.add_audio_track(track).await?;
                negotiator.start_offer().await?;
                Ok::<(), SessionError>(())
            }
            .await;

            if let Err(e) = started {
                pc.close().await;
                return Err(e);
            }
        }

        let deadline = tokio::time::sleep(self.config.negotiation_deadline);
        tokio::pin!(deadline);
        let mut connected = false;
        let mut _monitor: Option<AudioActivityMonitor> = None;

        loop {
            tokio::select! {
                _ = &mut deadline, if !connected => {
                    warn!("Negotiation deadline elapsed, failing session");
                    pc.close().await;
                    return Err(SessionError::NegotiationTimeout(
                        self.config.negotiation_deadline,
                    ));
                }

                evt = channel_rx.recv() => match evt {
                    Some(ChannelEvent::Connected) => debug!("Signaling channel up"),
                    Some(ChannelEvent::Message(msg)) => negotiator.apply(msg).await,
                    Some(ChannelEvent::Disconnected) | None => {
                        info!("Signaling channel closed, ending session");
                        pc.close().await;
                        return Ok(SessionEnd::ChannelClosed);
                    }
                },

                evt = peer_rx.recv() => match evt {
                    Some(PeerEvent::LocalCandidate(candidate)) => {
                        negotiator.share_local_candidate(candidate).await;
                    }
                    Some(PeerEvent::RemoteTrack(track)) => {
                        info!("Remote media arrived");
                        self.sink.play_remote(track.clone());
                        _monitor = Some(AudioActivityMonitor::start(
                            track,
                            self.config.monitor_interval,
                        ));
                    }
                    Some(PeerEvent::Connected) => {
                        info!("Peer connection established");
                        connected = true;
                    }
                    Some(PeerEvent::Disconnected) | None => {
                        info!("Peer connection closed, ending session");
                        return Ok(SessionEnd::PeerClosed);
                    }
                },
            }
        }
    }
}
