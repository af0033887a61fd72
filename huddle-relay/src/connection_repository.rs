use crate::connection::Connection;
use crate::error::Result;
use async_trait::async_trait;
use huddle_core::ParticipantId;

#[async_trait]
pub trait ConnectionRepository: Send + Sync {
    async fn add_connection(&self, connection: Connection) -> Result<()>;
    async fn remove_connection(&self, id: ParticipantId) -> Result<Option<Connection>>;
    async fn get_connection(&self, id: ParticipantId) -> Result<Option<Connection>>;
    async fn connection_count(&self) -> Result<usize>;
}
