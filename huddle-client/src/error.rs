use std::time::Duration;
use thiserror::Error;

/// The signaling channel could not be opened or has gone away.
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("signaling server address is not configured")]
    MissingAddress,

    #[error("failed to reach signaling server: {0}")]
    Connect(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("failed to encode signaling message: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("signaling channel closed")]
    Closed,
}

/// Peer-connection level failures. An offer or answer arriving in the
/// wrong signaling state is deliberately NOT represented here: that is
/// a recoverable local decision, logged and dropped by the negotiator.
#[derive(Debug, Error)]
pub enum NegotiationError {
    #[error("peer connection setup failed: {0}")]
    Setup(String),

    #[error("session description rejected: {0}")]
    Sdp(String),

    #[error("ice candidate rejected: {0}")]
    Ice(String),

    #[error("signaling channel unavailable")]
    SignalingUnavailable,

    #[error("peer connection closed")]
    PeerClosed,
}

/// Local audio capture failed. Fatal to the initiator: without a local
/// track there is nothing to offer.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("no capture device available")]
    Unavailable,

    #[error("capture permission denied")]
    Denied,

    #[error("capture failed: {0}")]
    Failed(String),
}

#[derive(Debug, Error)]
#[error("auth provider failed: {0}")]
pub struct AuthError(pub String);

/// Controller-level rollup surfaced from a room session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no authenticated identity")]
    NotAuthenticated,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Channel(#[from] ChannelError),

    #[error(transparent)]
    Media(#[from] MediaError),

    #[error(transparent)]
    Negotiation(#[from] NegotiationError),

    #[error("negotiation did not complete within {0:?}")]
    NegotiationTimeout(Duration),
}
