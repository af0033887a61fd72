use serde::{Deserialize, Serialize};
use std::fmt;

/// Where an endpoint is in the offer/answer exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NegotiationState {
    Idle,
    /// `join-room` sent, waiting for the acknowledgment
    Joining,
    /// In the room, no negotiation in flight
    WaitingForPeer,
    /// Our offer is out, waiting for the answer
    HaveLocalOffer,
    /// Remote offer applied, answer not sent yet
    HaveRemoteOffer,
    Stable,
    Closed,
}

impl NegotiationState {
    pub fn is_in_room(&self) -> bool {
        matches!(
            self,
            NegotiationState::WaitingForPeer
                | NegotiationState::HaveLocalOffer
                | NegotiationState::HaveRemoteOffer
                | NegotiationState::Stable
        )
    }

    pub fn awaits_answer(&self) -> bool {
        matches!(self, NegotiationState::HaveLocalOffer)
    }
}

impl fmt::Display for NegotiationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NegotiationState::Idle => "idle",
            NegotiationState::Joining => "joining",
            NegotiationState::WaitingForPeer => "waiting-for-peer",
            NegotiationState::HaveLocalOffer => "have-local-offer",
            NegotiationState::HaveRemoteOffer => "have-remote-offer",
            NegotiationState::Stable => "stable",
            NegotiationState::Closed => "closed",
        };
        f.write_str(name)
    }
}
