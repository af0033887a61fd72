use crate::connection::Connection;
use crate::connection_repository::ConnectionRepository;
use crate::error::{RelayError, Result};
use crate::room_repository::RoomRepository;
use huddle_core::{ClientMessage, Departure, ParticipantId, RelayEvent, RoomName};
use std::sync::{Arc, RwLock};
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::mpsc::Sender;
use tracing::{debug, info, instrument, warn};

/// What happened to a message after routing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Forwarded to this many peers
    Forwarded(usize),
    /// Nobody else in the room; dropped without error
    NoPeers,
    /// Answered by the relay itself (join ack, pong, leave)
    Handled,
}

/// Per-connection routing logic.
///
/// One handler exists per transport connection. All handlers share the
/// connection and room repositories; the handler only changes membership
/// through [`RoomRepository`].
#[derive(Clone)]
pub struct ConnectionHandler {
    participant_id: Arc<RwLock<Option<ParticipantId>>>,
    connection_repo: Arc<dyn ConnectionRepository>,
    room_repo: Arc<dyn RoomRepository>,
}

impl ConnectionHandler {
    pub fn new(
        connection_repo: Arc<dyn ConnectionRepository>,
        room_repo: Arc<dyn RoomRepository>,
    ) -> Self {
        ConnectionHandler {
            participant_id: Arc::new(RwLock::new(None)),
            connection_repo,
            room_repo,
        }
    }

    /// Fresh, unconnected handler sharing the repositories of `other`
    pub fn new_from(other: &Self) -> Self {
        ConnectionHandler::new(other.connection_repo.clone(), other.room_repo.clone())
    }

    pub fn participant_id(&self) -> Option<ParticipantId> {
        match self.participant_id.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    fn set_participant_id(&self, id: Option<ParticipantId>) -> Option<ParticipantId> {
        match self.participant_id.write() {
            Ok(mut guard) => std::mem::replace(&mut *guard, id),
            Err(poisoned) => std::mem::replace(&mut *poisoned.into_inner(), id),
        }
    }

    fn require_participant(&self) -> Result<ParticipantId> {
        self.participant_id().ok_or(RelayError::NotConnected)
    }

    pub async fn connection_count(&self) -> Result<usize> {
        self.connection_repo.connection_count().await
    }

    pub async fn room_summaries(&self) -> Result<Vec<huddle_core::RoomSummary>> {
        self.room_repo.room_summaries().await
    }

    /// Register a new transport connection and greet it with its identifier
    #[instrument(skip(self, sender))]
    pub async fn connect(&self, sender: Sender<RelayEvent>) -> Result<ParticipantId> {
        let participant_id = ParticipantId::new_v4();
        self.connection_repo
            .add_connection(Connection::new(participant_id, sender))
            .await?;
        self.set_participant_id(Some(participant_id));

        info!(%participant_id, "Participant connected");
        self.send_to(participant_id, RelayEvent::Welcome { participant_id })
            .await?;
        Ok(participant_id)
    }

    /// Leave the current room and forget the connection.
    ///
    /// Safe to call more than once; only the first call has an effect.
    #[instrument(skip(self))]
    pub async fn disconnect(&self) -> Result<()> {
        let Some(participant_id) = self.set_participant_id(None) else {
            return Ok(());
        };

        let departure = self.room_repo.leave_room(participant_id).await?;
        self.connection_repo.remove_connection(participant_id).await?;
        info!(%participant_id, "Participant disconnected");

        if let Some(departure) = departure {
            self.notify_departure(&departure).await;
        }
        Ok(())
    }

    #[instrument(skip(self, message), fields(kind = message.kind()))]
    pub async fn handle_message(&self, message: ClientMessage) -> Result<Delivery> {
        let me = self.require_participant()?;

        match message {
            ClientMessage::JoinRoom { room } => self.join(me, room).await,
            ClientMessage::Offer { offer, room, to } => {
                let event = RelayEvent::Offer {
                    offer,
                    room: room.clone(),
                    from: me,
                };
                self.forward(me, &room, to, event).await
            }
            ClientMessage::Answer { answer, room, to } => {
                let event = RelayEvent::Answer {
                    answer,
                    room: room.clone(),
                    from: me,
                };
                self.forward(me, &room, to, event).await
            }
            ClientMessage::Candidate {
                candidate,
                room,
                to,
            } => {
                let event = RelayEvent::Candidate {
                    candidate,
                    room: room.clone(),
                    from: me,
                };
                self.forward(me, &room, to, event).await
            }
            ClientMessage::LeaveRoom => {
                if let Some(departure) = self.room_repo.leave_room(me).await? {
                    self.notify_departure(&departure).await;
                }
                Ok(Delivery::Handled)
            }
            ClientMessage::Ping { id } => {
                self.send_to(me, RelayEvent::Pong { id }).await?;
                Ok(Delivery::Handled)
            }
        }
    }

    async fn join(&self, me: ParticipantId, room: RoomName) -> Result<Delivery> {
        let outcome = self.room_repo.join_room(room, me).await?;

        if let Some(departure) = &outcome.left {
            self.notify_departure(departure).await;
        }

        self.send_to(
            me,
            RelayEvent::Joined {
                room: outcome.room.clone(),
                participant_id: me,
                peers: outcome.peers.clone(),
                phase: outcome.phase,
            },
        )
        .await?;

        if !outcome.already_member {
            let event = RelayEvent::PeerJoined {
                room: outcome.room.clone(),
                participant_id: me,
                phase: outcome.phase,
            };
            self.broadcast_to_room(&outcome.room, me, event).await?;
        }

        Ok(Delivery::Handled)
    }

    async fn forward(
        &self,
        me: ParticipantId,
        room: &RoomName,
        to: Option<ParticipantId>,
        event: RelayEvent,
    ) -> Result<Delivery> {
        if !self.room_repo.is_member(room, me).await? {
            return Err(RelayError::NotInRoom {
                participant: me,
                room: room.clone(),
            });
        }

        match to {
            Some(peer) => {
                if peer == me || !self.room_repo.is_member(room, peer).await? {
                    return Err(RelayError::UnknownPeer {
                        room: room.clone(),
                        peer,
                    });
                }
                self.send_to(peer, event).await?;
                Ok(Delivery::Forwarded(1))
            }
            None => match self.broadcast_to_room(room, me, event).await? {
                0 => {
                    debug!(%room, "No peers in room, message dropped");
                    Ok(Delivery::NoPeers)
                }
                delivered => Ok(Delivery::Forwarded(delivered)),
            },
        }
    }

    /// Queue `event` on a participant's outbound channel.
    ///
    /// Never waits: when the participant's queue is full the event is
    /// dropped and `QueueFull` is returned.
    pub async fn send_to(&self, participant: ParticipantId, event: RelayEvent) -> Result<()> {
        let connection = self
            .connection_repo
            .get_connection(participant)
            .await?
            .ok_or(RelayError::UnknownConnection(participant))?;

        connection.sender.try_send(event).map_err(|e| match e {
            TrySendError::Full(_) => RelayError::QueueFull(participant),
            TrySendError::Closed(_) => RelayError::ChannelClosed(participant),
        })
    }

    /// Send `event` to every member of `room` except `excluding`.
    ///
    /// Returns how many peers the event was queued for. Peers whose
    /// connection is already gone or whose queue is full are skipped.
    pub async fn broadcast_to_room(
        &self,
        room: &RoomName,
        excluding: ParticipantId,
        event: RelayEvent,
    ) -> Result<usize> {
        let peers = self.room_repo.peers_of(room, excluding).await?;
        let mut delivered = 0;

        for peer in peers {
            match self.send_to(peer, event.clone()).await {
                Ok(()) => delivered += 1,
                Err(e) => debug!(%peer, error = %e, "Skipping unreachable peer"),
            }
        }
        Ok(delivered)
    }

    async fn notify_departure(&self, departure: &Departure) {
        for peer in &departure.remaining {
            let event = RelayEvent::PeerLeft {
                room: departure.room.clone(),
                participant_id: departure.participant,
                phase: departure.phase,
            };
            if let Err(e) = self.send_to(*peer, event).await {
                warn!(%peer, error = %e, "Failed to notify peer about departure");
            }
        }
    }
}
