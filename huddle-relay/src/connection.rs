use huddle_core::{ParticipantId, RelayEvent};
use tokio::sync::mpsc::Sender;

/// Outbound side of one participant's transport connection
#[derive(Debug, Clone)]
pub struct Connection {
    pub participant_id: ParticipantId,
    pub sender: Sender<RelayEvent>,
}

impl PartialEq for Connection {
    fn eq(&self, other: &Self) -> bool {
        self.participant_id == other.participant_id
    }
}

impl Connection {
    pub fn new(participant_id: ParticipantId, sender: Sender<RelayEvent>) -> Self {
        Connection {
            participant_id,
            sender,
        }
    }
}
