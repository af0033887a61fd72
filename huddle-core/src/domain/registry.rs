use crate::domain::{ParticipantId, RoomName, RoomPhase};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// Result of a participant leaving a room
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    /// Room that was left
    pub room: RoomName,
    /// Participant that left
    pub participant: ParticipantId,
    /// Phase of the room after the departure
    pub phase: RoomPhase,
    /// Members still in the room (they need a cleanup notification)
    pub remaining: Vec<ParticipantId>,
}

/// Result of a join
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    pub room: RoomName,
    /// Phase of the room after the join
    pub phase: RoomPhase,
    /// Other members of the room, excluding the joiner
    pub peers: Vec<ParticipantId>,
    /// True when the participant was already in this room (nothing changed)
    pub already_member: bool,
    /// Set when joining implicitly left a different room
    pub left: Option<Departure>,
}

/// Snapshot of one room, for diagnostics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomSummary {
    pub room: RoomName,
    pub members: usize,
    pub phase: RoomPhase,
}

/// Room name -> participant set mapping.
///
/// Membership is exclusive: a participant is in at most one room. Rooms are
/// created on first join and dropped as soon as their last member leaves.
/// The registry does no locking of its own; callers serialize access.
#[derive(Debug, Default, Clone)]
pub struct RoomRegistry {
    rooms: HashMap<RoomName, BTreeSet<ParticipantId>>,
    memberships: HashMap<ParticipantId, RoomName>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `participant` to `room`, creating the room if needed.
    ///
    /// Joining the room the participant is already in is a no-op. Joining a
    /// different room leaves the previous one first.
    pub fn join(&mut self, room: RoomName, participant: ParticipantId) -> JoinOutcome {
        if self.memberships.get(&participant) == Some(&room) {
            return JoinOutcome {
                phase: self.phase(&room),
                peers: self.peers_of(&room, participant),
                room,
                already_member: true,
                left: None,
            };
        }

        let left = self.leave(participant);

        let members = self.rooms.entry(room.clone()).or_default();
        members.insert(participant);
        let phase = RoomPhase::from_member_count(members.len());
        self.memberships.insert(participant, room.clone());

        debug!(%room, %participant, %phase, "Participant joined room");

        JoinOutcome {
            peers: self.peers_of(&room, participant),
            room,
            phase,
            already_member: false,
            left,
        }
    }

    /// Remove `participant` from whatever room it is in.
    ///
    /// Returns `None` when the participant was not in any room.
    pub fn leave(&mut self, participant: ParticipantId) -> Option<Departure> {
        let room = self.memberships.remove(&participant)?;

        let remaining: Vec<ParticipantId> = match self.rooms.get_mut(&room) {
            Some(members) => {
                members.remove(&participant);
                members.iter().copied().collect()
            }
            None => Vec::new(),
        };

        if remaining.is_empty() {
            self.rooms.remove(&room);
            debug!(%room, "Removed empty room");
        }

        let phase = RoomPhase::from_member_count(remaining.len());
        debug!(%room, %participant, %phase, "Participant left room");

        Some(Departure {
            room,
            participant,
            phase,
            remaining,
        })
    }

    /// Members of `room` other than `excluding`
    pub fn peers_of(&self, room: &RoomName, excluding: ParticipantId) -> Vec<ParticipantId> {
        self.rooms
            .get(room)
            .map(|members| {
                members
                    .iter()
                    .copied()
                    .filter(|id| *id != excluding)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Room the participant currently belongs to
    pub fn room_of(&self, participant: ParticipantId) -> Option<&RoomName> {
        self.memberships.get(&participant)
    }

    pub fn is_member(&self, room: &RoomName, participant: ParticipantId) -> bool {
        self.memberships.get(&participant) == Some(room)
    }

    pub fn members(&self, room: &RoomName) -> Vec<ParticipantId> {
        self.rooms
            .get(room)
            .map(|members| members.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn phase(&self, room: &RoomName) -> RoomPhase {
        RoomPhase::from_member_count(self.rooms.get(room).map_or(0, BTreeSet::len))
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn participant_count(&self) -> usize {
        self.memberships.len()
    }

    /// Summaries of all live rooms, sorted by name
    pub fn rooms(&self) -> Vec<RoomSummary> {
        let mut rooms: Vec<RoomSummary> = self
            .rooms
            .iter()
            .map(|(room, members)| RoomSummary {
                room: room.clone(),
                members: members.len(),
                phase: RoomPhase::from_member_count(members.len()),
            })
            .collect();
        rooms.sort_by(|a, b| a.room.cmp(&b.room));
        rooms
    }
}
