pub mod domain;
pub mod protocol;

pub use domain::{
    Departure, JoinOutcome, ParticipantId, RoomName, RoomNameError, RoomPhase, RoomRegistry,
    RoomSummary,
};
pub use protocol::{ClientMessage, IceCandidate, Payload, RelayEvent, SdpType, SessionDescription};
