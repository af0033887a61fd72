use crate::connection::Connection;
use crate::connection_repository::ConnectionRepository;
use crate::error::{RelayError, Result};
use crate::room_repository::RoomRepository;
use async_trait::async_trait;
use huddle_core::{
    Departure, JoinOutcome, ParticipantId, RoomName, RoomRegistry, RoomSummary,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use tracing::{debug, error, instrument};

/// In-process storage for connections and room membership
#[derive(Clone, Default)]
pub struct MemoryStorage {
    connections: Arc<RwLock<HashMap<ParticipantId, Connection>>>,
    registry: Arc<Mutex<RoomRegistry>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_registry<T>(&self, f: impl FnOnce(&mut RoomRegistry) -> T) -> Result<T> {
        match self.registry.lock() {
            Ok(mut registry) => Ok(f(&mut registry)),
            Err(e) => {
                error!(?e, "Room registry lock poisoned");
                Err(RelayError::Internal(e.to_string()))
            }
        }
    }
}

#[async_trait]
impl ConnectionRepository for MemoryStorage {
    #[instrument(skip(self, connection), fields(participant_id = %connection.participant_id))]
    async fn add_connection(&self, connection: Connection) -> Result<()> {
        debug!("Adding connection");
        match self.connections.write() {
            Ok(mut connections) => {
                connections.insert(connection.participant_id, connection);
                Ok(())
            }
            Err(e) => {
                error!(?e, "Failed to add connection");
                Err(RelayError::Internal(e.to_string()))
            }
        }
    }

    #[instrument(skip(self))]
    async fn remove_connection(&self, id: ParticipantId) -> Result<Option<Connection>> {
        debug!("Removing connection");
        match self.connections.write() {
            Ok(mut connections) => Ok(connections.remove(&id)),
            Err(e) => {
                error!(?e, "Failed to remove connection");
                Err(RelayError::Internal(e.to_string()))
            }
        }
    }

    async fn get_connection(&self, id: ParticipantId) -> Result<Option<Connection>> {
        match self.connections.read() {
            Ok(connections) => Ok(connections.get(&id).cloned()),
            Err(e) => Err(RelayError::Internal(e.to_string())),
        }
    }

    async fn connection_count(&self) -> Result<usize> {
        match self.connections.read() {
            Ok(connections) => Ok(connections.len()),
            Err(e) => Err(RelayError::Internal(e.to_string())),
        }
    }
}

#[async_trait]
impl RoomRepository for MemoryStorage {
    #[instrument(skip(self))]
    async fn join_room(&self, room: RoomName, participant: ParticipantId) -> Result<JoinOutcome> {
        self.with_registry(|registry| registry.join(room, participant))
    }

    #[instrument(skip(self))]
    async fn leave_room(&self, participant: ParticipantId) -> Result<Option<Departure>> {
        self.with_registry(|registry| registry.leave(participant))
    }

    async fn peers_of(
        &self,
        room: &RoomName,
        excluding: ParticipantId,
    ) -> Result<Vec<ParticipantId>> {
        self.with_registry(|registry| registry.peers_of(room, excluding))
    }

    async fn is_member(&self, room: &RoomName, participant: ParticipantId) -> Result<bool> {
        self.with_registry(|registry| registry.is_member(room, participant))
    }

    async fn room_summaries(&self) -> Result<Vec<RoomSummary>> {
        self.with_registry(|registry| registry.rooms())
    }
}
