use crate::domain::{ParticipantId, RoomName, RoomPhase};
use crate::protocol::Payload;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Messages a participant sends to the relay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientMessage {
    /// Join (or switch to) a room
    #[serde(alias = "join")]
    JoinRoom { room: RoomName },

    /// Session description offer for the other room members
    Offer {
        offer: Payload,
        room: RoomName,
        /// Deliver to this peer only (rooms with more than two members)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        to: Option<ParticipantId>,
    },

    /// Session description answer, usually back to the offerer
    Answer {
        answer: Payload,
        room: RoomName,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        to: Option<ParticipantId>,
    },

    /// A locally discovered ICE candidate
    Candidate {
        candidate: Payload,
        room: RoomName,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        to: Option<ParticipantId>,
    },

    /// Leave the current room without closing the connection
    LeaveRoom,

    /// Liveness probe, answered with a `pong` to the sender only
    Ping {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<u64>,
    },
}

impl ClientMessage {
    pub fn join(room: RoomName) -> Self {
        ClientMessage::JoinRoom { room }
    }

    pub fn offer(room: RoomName, offer: Payload) -> Self {
        ClientMessage::Offer {
            offer,
            room,
            to: None,
        }
    }

    pub fn answer(room: RoomName, answer: Payload) -> Self {
        ClientMessage::Answer {
            answer,
            room,
            to: None,
        }
    }

    pub fn candidate(room: RoomName, candidate: Payload) -> Self {
        ClientMessage::Candidate {
            candidate,
            room,
            to: None,
        }
    }

    /// Direct a forwarded message at a single peer; no effect on other kinds
    pub fn directed_to(mut self, peer: ParticipantId) -> Self {
        match &mut self {
            ClientMessage::Offer { to, .. }
            | ClientMessage::Answer { to, .. }
            | ClientMessage::Candidate { to, .. } => *to = Some(peer),
            _ => {}
        }
        self
    }

    /// Room named by the message, if any
    pub fn room(&self) -> Option<&RoomName> {
        match self {
            ClientMessage::JoinRoom { room }
            | ClientMessage::Offer { room, .. }
            | ClientMessage::Answer { room, .. }
            | ClientMessage::Candidate { room, .. } => Some(room),
            ClientMessage::LeaveRoom | ClientMessage::Ping { .. } => None,
        }
    }

    /// Wire tag, for logging
    pub fn kind(&self) -> &'static str {
        match self {
            ClientMessage::JoinRoom { .. } => "join-room",
            ClientMessage::Offer { .. } => "offer",
            ClientMessage::Answer { .. } => "answer",
            ClientMessage::Candidate { .. } => "candidate",
            ClientMessage::LeaveRoom => "leave-room",
            ClientMessage::Ping { .. } => "ping",
        }
    }
}

/// Messages the relay sends to a participant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum RelayEvent {
    /// Identifier assigned to the connection on accept
    Welcome { participant_id: ParticipantId },

    /// Join acknowledgment, with the peers already present
    Joined {
        room: RoomName,
        participant_id: ParticipantId,
        peers: Vec<ParticipantId>,
        phase: RoomPhase,
    },

    /// Another participant entered the room
    PeerJoined {
        room: RoomName,
        participant_id: ParticipantId,
        phase: RoomPhase,
    },

    /// Another participant left the room or disconnected
    PeerLeft {
        room: RoomName,
        participant_id: ParticipantId,
        phase: RoomPhase,
    },

    Offer {
        offer: Payload,
        room: RoomName,
        from: ParticipantId,
    },

    Answer {
        answer: Payload,
        room: RoomName,
        from: ParticipantId,
    },

    Candidate {
        candidate: Payload,
        room: RoomName,
        from: ParticipantId,
    },

    Pong {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<u64>,
    },
}

impl RelayEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            RelayEvent::Welcome { .. } => "welcome",
            RelayEvent::Joined { .. } => "joined",
            RelayEvent::PeerJoined { .. } => "peer-joined",
            RelayEvent::PeerLeft { .. } => "peer-left",
            RelayEvent::Offer { .. } => "offer",
            RelayEvent::Answer { .. } => "answer",
            RelayEvent::Candidate { .. } => "candidate",
            RelayEvent::Pong { .. } => "pong",
        }
    }

    pub fn room(&self) -> Option<&RoomName> {
        match self {
            RelayEvent::Joined { room, .. }
            | RelayEvent::PeerJoined { room, .. }
            | RelayEvent::PeerLeft { room, .. }
            | RelayEvent::Offer { room, .. }
            | RelayEvent::Answer { room, .. }
            | RelayEvent::Candidate { room, .. } => Some(room),
            RelayEvent::Welcome { .. } | RelayEvent::Pong { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn room(name: &str) -> RoomName {
        RoomName::new(name).unwrap()
    }

    #[test]
    fn test_parse_join_room() {
        let message: ClientMessage =
            serde_json::from_str(r#"{"type":"join-room","room":"therapy-room"}"#).unwrap();
        assert_eq!(message, ClientMessage::join(room("therapy-room")));
    }

    #[test]
    fn test_parse_join_alias() {
        let message: ClientMessage =
            serde_json::from_str(r#"{"type":"join","room":"r1"}"#).unwrap();
        assert_eq!(message.kind(), "join-room");
    }

    #[test]
    fn test_parse_offer_with_browser_payload() {
        let message: ClientMessage = serde_json::from_value(json!({
            "type": "offer",
            "offer": {"type": "offer", "sdp": "v=0"},
            "room": "r1"
        }))
        .unwrap();

        match message {
            ClientMessage::Offer { offer, room: r, to } => {
                assert_eq!(offer.as_value(), &json!({"type": "offer", "sdp": "v=0"}));
                assert_eq!(r, room("r1"));
                assert!(to.is_none());
            }
            other => panic!("Expected Offer, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_room_is_malformed() {
        let result = serde_json::from_str::<ClientMessage>(r#"{"type":"candidate","candidate":{}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_type_is_malformed() {
        let result = serde_json::from_str::<ClientMessage>(r#"{"room":"r1"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_room_is_malformed() {
        let result = serde_json::from_str::<ClientMessage>(r#"{"type":"join-room","room":""}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_directed_to_sets_target() {
        let peer = ParticipantId::new_v4();
        let message =
            ClientMessage::candidate(room("r1"), Payload::from(json!({}))).directed_to(peer);

        match message {
            ClientMessage::Candidate { to, .. } => assert_eq!(to, Some(peer)),
            other => panic!("Expected Candidate, got {:?}", other),
        }

        let join = ClientMessage::join(room("r1")).directed_to(peer);
        assert_eq!(join, ClientMessage::join(room("r1")));
    }

    #[test]
    fn test_relay_event_wire_format() {
        let from = ParticipantId::new_v4();
        let event = RelayEvent::Answer {
            answer: Payload::from(json!({"type": "answer", "sdp": "v=0"})),
            room: room("r1"),
            from,
        };

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "answer");
        assert_eq!(value["room"], "r1");
        assert_eq!(value["from"], from.to_string());
        assert_eq!(value["answer"]["sdp"], "v=0");
    }

    #[test]
    fn test_peer_left_wire_format() {
        let event = RelayEvent::PeerLeft {
            room: room("r1"),
            participant_id: ParticipantId::new_v4(),
            phase: RoomPhase::WaitingForPeer,
        };

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "peer-left");
        assert_eq!(value["phase"], "waiting-for-peer");
    }

    #[test]
    fn test_room_accessors() {
        assert!(ClientMessage::LeaveRoom.room().is_none());
        assert!(RelayEvent::Pong { id: Some(1) }.room().is_none());
        assert_eq!(
            ClientMessage::join(room("r1")).room(),
            Some(&room("r1"))
        );
    }
}
