use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Signaling phase of a room, derived from how many participants it holds.
///
/// `Empty -> WaitingForPeer -> Connected` as participants join, and back one
/// step for every departure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum RoomPhase {
    /// No participants; the room does not exist in the registry
    Empty,
    /// A single participant is waiting for someone to call
    WaitingForPeer,
    /// At least two participants; signaling can flow
    Connected,
}

impl RoomPhase {
    pub fn from_member_count(count: usize) -> Self {
        match count {
            0 => RoomPhase::Empty,
            1 => RoomPhase::WaitingForPeer,
            _ => RoomPhase::Connected,
        }
    }
}

impl fmt::Display for RoomPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomPhase::Empty => write!(f, "Empty"),
            RoomPhase::WaitingForPeer => write!(f, "WaitingForPeer"),
            RoomPhase::Connected => write!(f, "Connected"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_from_member_count() {
        assert_eq!(RoomPhase::from_member_count(0), RoomPhase::Empty);
        assert_eq!(RoomPhase::from_member_count(1), RoomPhase::WaitingForPeer);
        assert_eq!(RoomPhase::from_member_count(2), RoomPhase::Connected);
        assert_eq!(RoomPhase::from_member_count(5), RoomPhase::Connected);
    }

    #[test]
    fn test_phase_wire_format() {
        let json = serde_json::to_string(&RoomPhase::WaitingForPeer).unwrap();
        assert_eq!(json, r#""waiting-for-peer""#);
    }
}
