pub mod ids;
pub mod phase;
pub mod registry;

pub use ids::{ParticipantId, RoomName, RoomNameError, MAX_ROOM_NAME_LEN};
pub use phase::RoomPhase;
pub use registry::{Departure, JoinOutcome, RoomRegistry, RoomSummary};
