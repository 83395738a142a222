use serde::{Deserialize, Serialize};

/// One negotiation message on the wire. Externally tagged so the JSON
/// is a single-key object (`{"offer": ...}`, `{"answer": ...}`,
/// `{"candidate": ...}`), matching what browser peers produce. The
/// relay never parses these; only the negotiation state machine does.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum SignalMessage {
    #[serde(rename = "offer")]
    Offer(SessionDescription),
    #[serde(rename = "answer")]
    Answer(SessionDescription),
    #[serde(rename = "candidate")]
    Candidate(IceCandidateInit),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SdpType {
    Offer,
    Answer,
    Pranswer,
    Rollback,
}

/// `RTCSessionDescriptionInit` shape. The SDP body is passed through
/// opaquely.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionDescription {
    #[serde(rename = "type")]
    pub sdp_type: SdpType,
    pub sdp: String,
}

impl SessionDescription {
    pub fn offer(sdp: impl Into<String>) -> Self {
        Self {
            sdp_type: SdpType::Offer,
            sdp: sdp.into(),
        }
    }

    pub fn answer(sdp: impl Into<String>) -> Self {
        Self {
            sdp_type: SdpType::Answer,
            sdp: sdp.into(),
        }
    }
}

/// `RTCIceCandidateInit` shape, camelCase like the browser JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct IceCandidateInit {
    pub candidate: String,
    #[serde(default)]
    pub sdp_mid: Option<String>,
    #[serde(default)]
    pub sdp_m_line_index: Option<u16>,
    #[serde(default)]
    pub username_fragment: Option<String>,
}
