use crate::channel::SignalSink;
use crate::error::NegotiationError;
use crate::peer::PeerConnection;
use huddle_core::{IceCandidateInit, SessionDescription, SignalMessage, SignalingState};
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, warn};

/// Upper bound on candidates buffered before a remote description
/// exists. Candidates are best-effort; overflow is dropped with a
/// warning rather than growing without limit.
pub const MAX_PENDING_CANDIDATES: usize = 128;

/// Drives one peer connection through a single offer/answer/candidate
/// exchange. Messages arriving in a signaling state that forbids them
/// are logged and dropped; the machine stays in its prior state and
/// keeps accepting valid messages. There is no renegotiation and no
/// glare handling: role assignment is deterministic, the host always
/// initiates.
pub struct Negotiator {
    pc: Arc<dyn PeerConnection>,
    sink: Arc<dyn SignalSink>,
    pending: VecDeque<IceCandidateInit>,
}

impl Negotiator {
    pub fn new(pc: Arc<dyn PeerConnection>, sink: Arc<dyn SignalSink>) -> Self {
        Self {
            pc,
            sink,
            pending: VecDeque::new(),
        }
    }

    pub fn pending_candidates(&self) -> usize {
        self.pending.len()
    }

    /// Initiator-only session start: the only path that produces
    /// `have-local-offer`. The local track must already be attached.
    pub async fn start_offer(&mut self) -> Result<(), NegotiationError> {
        let offer = self.pc.create_offer().await?;
        self.pc.set_local_description(offer.clone()).await?;
        self.sink
            .send(SignalMessage::Offer(offer))
            .await
            .map_err(|_| NegotiationError::SignalingUnavailable)
    }

    pub async fn apply(&mut self, msg: SignalMessage) {
        match msg {
            SignalMessage::Offer(offer) => self.apply_offer(offer).await,
            SignalMessage::Answer(answer) => self.apply_answer(answer).await,
            SignalMessage::Candidate(candidate) => self.apply_candidate(candidate).await,
        }
    }

    /// Forward a locally gathered candidate right away, no batching.
    pub async fn share_local_candidate(&self, candidate: IceCandidateInit) {
        if self
            .sink
            .send(SignalMessage::Candidate(candidate))
            .await
            .is_err()
        {
            warn!("Signaling channel gone, local candidate not shared");
        }
    }

    async fn apply_offer(&mut self, offer: SessionDescription) {
        let state = self.pc.signaling_state();
        if state != SignalingState::Stable {
            warn!("Dropping remote offer received in signaling state '{state}'");
            return;
        }

        if let Err(e) = self.pc.set_remote_description(offer).await {
            warn!("Remote offer rejected: {e}");
            return;
        }

        let answer = match self.pc.create_answer().await {
            Ok(answer) => answer,
            Err(e) => {
                warn!("Failed to create answer: {e}");
                return;
            }
        };

        if let Err(e) = self.pc.set_local_description(answer.clone()).await {
            warn!("Failed to set local answer: {e}");
            return;
        }

        if self.sink.send(SignalMessage::Answer(answer)).await.is_err() {
            warn!("Signaling channel gone, answer not sent");
        }

        self.drain_pending().await;
    }

    async fn apply_answer(&mut self, answer: SessionDescription) {
        let state = self.pc.signaling_state();
        if state != SignalingState::HaveLocalOffer {
            warn!("Dropping remote answer received in signaling state '{state}'");
            return;
        }

        if let Err(e) = self.pc.set_remote_description(answer).await {
            warn!("Remote answer rejected: {e}");
            return;
        }

        self.drain_pending().await;
    }

    async fn apply_candidate(&mut self, candidate: IceCandidateInit) {
        if self.pc.remote_description_set().await {
            if let Err(e) = self.pc.add_ice_candidate(candidate).await {
                warn!("Remote candidate rejected: {e}");
            }
        } else if self.pending.len() >= MAX_PENDING_CANDIDATES {
            warn!("Pending candidate queue full, candidate dropped");
        } else {
            debug!("No remote description yet, queueing candidate");
            self.pending.push_back(candidate);
        }
    }

    /// Applies queued candidates exactly once, in receipt order. The
    /// queue is empty after every successful remote-description set;
    /// later candidates bypass it entirely.
    async fn drain_pending(&mut self) {
        while let Some(candidate) = self.pending.pop_front() {
            if let Err(e) = self.pc.add_ice_candidate(candidate).await {
                warn!("Queued candidate rejected: {e}");
            }
        }
    }
}
