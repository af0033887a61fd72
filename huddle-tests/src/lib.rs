use async_trait::async_trait;
use cucumber::World;
use huddle_core::{
    ClientMessage, IceCandidate, ParticipantId, RelayEvent, RoomName, RoomRegistry,
    SessionDescription,
};
use huddle_negotiator::{IceServer, MediaEngine, Negotiator, NegotiatorConfig, Role};
use huddle_relay::{ConnectionHandler, Delivery, MemoryStorage, RelayError};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

pub type TestNegotiator = Negotiator<ScriptedMedia, mpsc::Sender<ClientMessage>>;

/// One named participant connected to the in-process relay
pub struct TestParticipant {
    pub id: ParticipantId,
    pub handler: ConnectionHandler,
    pub inbox: mpsc::Receiver<RelayEvent>,
    pub received: Vec<RelayEvent>,
}

impl TestParticipant {
    /// Move everything queued for this participant into `received`
    pub fn drain(&mut self) -> &[RelayEvent] {
        while let Ok(event) = self.inbox.try_recv() {
            self.received.push(event);
        }
        &self.received
    }
}

#[derive(World)]
#[world(init = Self::new)]
pub struct RelayWorld {
    /// Room registry exercised directly, without transport
    pub registry: RoomRegistry,

    /// Registry-level participant ids by name
    pub registry_ids: HashMap<String, ParticipantId>,

    /// Relay under test; new participants get a handler derived from it
    pub relay: ConnectionHandler,

    pub participants: HashMap<String, TestParticipant>,

    pub last_delivery: Option<Result<Delivery, RelayError>>,

    /// Endpoint under test in negotiation scenarios
    pub negotiator: Option<TestNegotiator>,
    pub media: ScriptedMedia,
    pub signals: Option<mpsc::Receiver<ClientMessage>>,
    pub remote_peer: ParticipantId,
}

impl fmt::Debug for RelayWorld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayWorld")
            .field("registry", &self.registry)
            .field("participants", &self.participants.keys().collect::<Vec<_>>())
            .field("last_delivery", &self.last_delivery)
            .finish()
    }
}

impl RelayWorld {
    pub fn new() -> Self {
        let storage = Arc::new(MemoryStorage::new());
        Self {
            registry: RoomRegistry::new(),
            registry_ids: HashMap::new(),
            relay: ConnectionHandler::new(storage.clone(), storage),
            participants: HashMap::new(),
            last_delivery: None,
            negotiator: None,
            media: ScriptedMedia::default(),
            signals: None,
            remote_peer: ParticipantId::new_v4(),
        }
    }

    pub fn registry_id(&mut self, name: &str) -> ParticipantId {
        *self
            .registry_ids
            .entry(name.to_string())
            .or_insert_with(ParticipantId::new_v4)
    }

    pub async fn connect(&mut self, name: &str) -> ParticipantId {
        let handler = ConnectionHandler::new_from(&self.relay);
        let (tx, inbox) = mpsc::channel(32);
        let id = handler.connect(tx).await.expect("connect failed");
        let mut participant = TestParticipant {
            id,
            handler,
            inbox,
            received: Vec::new(),
        };
        participant.drain();
        participant.received.clear();
        self.participants.insert(name.to_string(), participant);
        id
    }

    pub fn participant(&mut self, name: &str) -> &mut TestParticipant {
        self.participants
            .get_mut(name)
            .unwrap_or_else(|| panic!("Participant '{}' not connected", name))
    }

    pub async fn send(&mut self, name: &str, message: ClientMessage) {
        let result = self.participant(name).handler.handle_message(message).await;
        self.last_delivery = Some(result);
    }

    pub fn start_negotiator(&mut self, room: RoomName, role: Role) {
        let (tx, rx) = mpsc::channel(32);
        self.media = ScriptedMedia::default();
        self.negotiator = Some(Negotiator::new(
            NegotiatorConfig::new(room, role),
            self.media.clone(),
            tx,
        ));
        self.signals = Some(rx);
    }

    pub fn negotiator(&mut self) -> &mut TestNegotiator {
        self.negotiator.as_mut().expect("No negotiator started")
    }

    pub fn sent_signals(&mut self) -> Vec<ClientMessage> {
        let mut sent = Vec::new();
        if let Some(rx) = self.signals.as_mut() {
            while let Ok(message) = rx.try_recv() {
                sent.push(message);
            }
        }
        sent
    }
}

/// Media engine stand-in that logs what the negotiator asked of it
#[derive(Debug, Clone, Default)]
pub struct ScriptedMedia {
    log: Arc<Mutex<Vec<String>>>,
}

impl ScriptedMedia {
    pub fn log(&self) -> Vec<String> {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }

    fn record(&self, entry: impl Into<String>) {
        if let Ok(mut log) = self.log.lock() {
            log.push(entry.into());
        }
    }
}

#[async_trait]
impl MediaEngine for ScriptedMedia {
    async fn acquire_local_media(
        &mut self,
        ice_servers: &[IceServer],
    ) -> huddle_negotiator::Result<()> {
        self.record(format!("acquire {}", ice_servers.len()));
        Ok(())
    }

    async fn create_offer(&mut self) -> huddle_negotiator::Result<SessionDescription> {
        self.record("create-offer");
        Ok(SessionDescription::offer("v=0 scripted"))
    }

    async fn create_answer(&mut self) -> huddle_negotiator::Result<SessionDescription> {
        self.record("create-answer");
        Ok(SessionDescription::answer("v=0 scripted"))
    }

    async fn set_local_description(
        &mut self,
        description: SessionDescription,
    ) -> huddle_negotiator::Result<()> {
        self.record(format!("set-local:{:?}", description.kind));
        Ok(())
    }

    async fn set_remote_description(
        &mut self,
        description: SessionDescription,
    ) -> huddle_negotiator::Result<()> {
        self.record(format!("set-remote:{:?}", description.kind));
        Ok(())
    }

    async fn add_ice_candidate(&mut self, candidate: IceCandidate) -> huddle_negotiator::Result<()> {
        self.record(format!("candidate:{}", candidate.candidate));
        Ok(())
    }

    async fn reset(&mut self) -> huddle_negotiator::Result<()> {
        self.record("reset");
        Ok(())
    }
}
