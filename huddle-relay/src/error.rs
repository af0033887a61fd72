use huddle_core::{ParticipantId, RoomName};
use std::fmt;

/// Classification of relay failures; none of them is fatal to the process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Message for a room or participant that is not there
    RoutingMiss,
    /// The connection behind a participant closed
    TransportDrop,
    /// Message could not be parsed
    MalformedMessage,
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::RoutingMiss => write!(f, "RoutingMiss"),
            ErrorKind::TransportDrop => write!(f, "TransportDrop"),
            ErrorKind::MalformedMessage => write!(f, "MalformedMessage"),
            ErrorKind::Internal => write!(f, "Internal"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("Participant {participant} is not in room {room}")]
    NotInRoom {
        participant: ParticipantId,
        room: RoomName,
    },

    #[error("Peer {peer} is not in room {room}")]
    UnknownPeer { room: RoomName, peer: ParticipantId },

    #[error("No connection registered for participant {0}")]
    UnknownConnection(ParticipantId),

    #[error("Connection handler has not been connected")]
    NotConnected,

    #[error("Channel to participant {0} closed")]
    ChannelClosed(ParticipantId),

    #[error("Outbound queue of participant {0} is full")]
    QueueFull(ParticipantId),

    #[error("Malformed message: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RelayError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RelayError::NotInRoom { .. }
            | RelayError::UnknownPeer { .. }
            | RelayError::UnknownConnection(_) => ErrorKind::RoutingMiss,
            RelayError::ChannelClosed(_) | RelayError::QueueFull(_) => ErrorKind::TransportDrop,
            RelayError::Malformed(_) => ErrorKind::MalformedMessage,
            RelayError::NotConnected
            | RelayError::InvalidConfig(_)
            | RelayError::Internal(_)
            | RelayError::Io(_) => ErrorKind::Internal,
        }
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;
