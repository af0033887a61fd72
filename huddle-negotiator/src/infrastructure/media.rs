use crate::domain::IceServer;
use crate::infrastructure::error::Result;
use async_trait::async_trait;
use huddle_core::{IceCandidate, SessionDescription};

/// The local peer connection and capture devices.
///
/// Implementations wrap a real WebRTC stack. Callbacks of that stack are fed
/// back to the negotiator as [`crate::MediaEvent`]s.
#[async_trait]
pub trait MediaEngine: Send {
    /// Open capture devices and build the peer connection over `ice_servers`
    async fn acquire_local_media(&mut self, ice_servers: &[IceServer]) -> Result<()>;
    async fn create_offer(&mut self) -> Result<SessionDescription>;
    async fn create_answer(&mut self) -> Result<SessionDescription>;
    async fn set_local_description(&mut self, description: SessionDescription) -> Result<()>;
    async fn set_remote_description(&mut self, description: SessionDescription) -> Result<()>;
    async fn add_ice_candidate(&mut self, candidate: IceCandidate) -> Result<()>;
    /// Drop the current peer connection and prepare a fresh one
    async fn reset(&mut self) -> Result<()>;
}
