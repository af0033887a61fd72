use crate::domain::NegotiationState;
use huddle_core::{IceCandidate, ParticipantId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    Audio,
    Video,
}

/// A track received from the remote peer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTrack {
    pub track_id: String,
    pub stream_id: Option<String>,
    pub kind: TrackKind,
}

/// Peer connection state as reported by the media engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    New,
    Connecting,
    Connected,
    Disconnected,
    Failed,
    Closed,
}

/// Callbacks from the media engine
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    RemoteTrack(RemoteTrack),
    LocalCandidate(IceCandidate),
    ConnectionStateChanged(ConnectionState),
}

/// What subscribers of a negotiator observe
#[derive(Debug, Clone, PartialEq)]
pub enum NegotiatorEvent {
    StateChanged {
        from: NegotiationState,
        to: NegotiationState,
    },
    Joined {
        participant_id: ParticipantId,
        peers: Vec<ParticipantId>,
    },
    PeerJoined(ParticipantId),
    PeerLeft(ParticipantId),
    RemoteTrack(RemoteTrack),
    LocalCandidate(IceCandidate),
    ConnectionStateChanged(ConnectionState),
}
