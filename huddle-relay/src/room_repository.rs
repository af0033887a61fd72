use crate::error::Result;
use async_trait::async_trait;
use huddle_core::{Departure, JoinOutcome, ParticipantId, RoomName, RoomSummary};

/// Access to the room registry.
///
/// Each call is one atomic registry operation; implementations serialize
/// concurrent joins and leaves.
#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn join_room(&self, room: RoomName, participant: ParticipantId) -> Result<JoinOutcome>;
    async fn leave_room(&self, participant: ParticipantId) -> Result<Option<Departure>>;
    async fn peers_of(&self, room: &RoomName, excluding: ParticipantId)
        -> Result<Vec<ParticipantId>>;
    async fn is_member(&self, room: &RoomName, participant: ParticipantId) -> Result<bool>;
    async fn room_summaries(&self) -> Result<Vec<RoomSummary>>;
}
