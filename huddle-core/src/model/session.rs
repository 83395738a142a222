use crate::model::{Identity, RoomId};

/// Which side of the offer/answer exchange a participant drives.
///
/// The host created the invite, so the room id is the host's own
/// identity; everyone else responds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionRole {
    Initiator,
    Responder,
}

impl SessionRole {
    /// Pure function of `(identity, room)`: initiator iff they match.
    pub fn determine(identity: &Identity, room: &RoomId) -> Self {
        if identity.as_str() == room.as_str() {
            SessionRole::Initiator
        } else {
            SessionRole::Responder
        }
    }

    pub fn is_initiator(&self) -> bool {
        matches!(self, SessionRole::Initiator)
    }
}
