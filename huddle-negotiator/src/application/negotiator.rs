use crate::application::config::NegotiatorConfig;
use crate::application::events::{ConnectionState, MediaEvent, NegotiatorEvent};
use crate::domain::{CandidateBuffer, NegotiationState};
use crate::infrastructure::error::{NegotiatorError, Result};
use crate::infrastructure::{MediaEngine, SignalSink};
use huddle_core::{
    ClientMessage, IceCandidate, ParticipantId, Payload, RelayEvent, SessionDescription,
};
use tokio::sync::broadcast;
use tracing::{debug, info, instrument, warn};

const EVENT_CAPACITY: usize = 64;

/// Drives one endpoint through join, offer/answer and candidate exchange.
///
/// Relay events come in through [`Negotiator::handle_relay_event`], media
/// engine callbacks through [`Negotiator::handle_media_event`]. Everything
/// observable is republished to [`Negotiator::subscribe`] receivers.
pub struct Negotiator<M, S> {
    config: NegotiatorConfig,
    media: M,
    sink: S,
    state: NegotiationState,
    local_id: Option<ParticipantId>,
    remote_peer: Option<ParticipantId>,
    candidates: CandidateBuffer,
    remote_description_set: bool,
    events: broadcast::Sender<NegotiatorEvent>,
}

impl<M: MediaEngine, S: SignalSink> Negotiator<M, S> {
    pub fn new(config: NegotiatorConfig, media: M, sink: S) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            config,
            media,
            sink,
            state: NegotiationState::Idle,
            local_id: None,
            remote_peer: None,
            candidates: CandidateBuffer::new(),
            remote_description_set: false,
            events,
        }
    }

    pub fn config(&self) -> &NegotiatorConfig {
        &self.config
    }

    pub fn state(&self) -> NegotiationState {
        self.state
    }

    pub fn local_id(&self) -> Option<ParticipantId> {
        self.local_id
    }

    /// Peer we are negotiating with, once known
    pub fn remote_peer(&self) -> Option<ParticipantId> {
        self.remote_peer
    }

    pub fn pending_candidates(&self) -> usize {
        self.candidates.len()
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn subscribe(&self) -> broadcast::Receiver<NegotiatorEvent> {
        self.events.subscribe()
    }

    /// Acquire local media and ask the relay to join the configured room
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> Result<()> {
        info!(room = %self.config.room, role = %self.config.role, "Starting negotiation");
        self.media
            .acquire_local_media(&self.config.ice_servers)
            .await?;
        self.transition(NegotiationState::Joining);
        self.sink
            .send(ClientMessage::join(self.config.room.clone()))
            .await
    }

    /// Send an offer now, regardless of role
    pub async fn start_call(&mut self) -> Result<()> {
        if !self.state.is_in_room() {
            return Err(NegotiatorError::Signal(format!(
                "cannot start a call while {}",
                self.state
            )));
        }
        self.send_offer().await
    }

    /// Leave the room and release the peer connection
    pub async fn close(&mut self) -> Result<()> {
        if self.state.is_in_room() {
            if let Err(e) = self.sink.send(ClientMessage::LeaveRoom).await {
                debug!(error = %e, "Could not announce leave");
            }
        }
        self.media.reset().await?;
        self.candidates.clear();
        self.remote_description_set = false;
        self.remote_peer = None;
        self.transition(NegotiationState::Closed);
        Ok(())
    }

    pub(crate) fn mark_closed(&mut self) {
        self.transition(NegotiationState::Closed);
    }

    #[instrument(skip(self, event), fields(kind = event.kind()))]
    pub async fn handle_relay_event(&mut self, event: RelayEvent) -> Result<()> {
        if self.state == NegotiationState::Closed {
            debug!(kind = event.kind(), "Ignoring relay event after close");
            return Ok(());
        }

        if let Some(room) = event.room() {
            if room != &self.config.room {
                debug!(%room, "Ignoring event for another room");
                return Ok(());
            }
        }

        match event {
            RelayEvent::Welcome { participant_id } => {
                self.local_id = Some(participant_id);
                Ok(())
            }
            RelayEvent::Joined {
                participant_id,
                peers,
                ..
            } => {
                self.local_id = Some(participant_id);
                self.transition(NegotiationState::WaitingForPeer);
                self.emit(NegotiatorEvent::Joined {
                    participant_id,
                    peers: peers.clone(),
                });

                if let Some(peer) = peers.first() {
                    self.remote_peer = Some(*peer);
                    if self.config.role.offers_on_peer() {
                        self.send_offer().await?;
                    }
                }
                Ok(())
            }
            RelayEvent::PeerJoined { participant_id, .. } => {
                if Some(participant_id) == self.local_id {
                    return Ok(());
                }
                self.emit(NegotiatorEvent::PeerJoined(participant_id));
                if self.remote_peer.is_none() {
                    self.remote_peer = Some(participant_id);
                }

                if self.config.role.offers_on_peer()
                    && self.state == NegotiationState::WaitingForPeer
                    && self.remote_peer == Some(participant_id)
                {
                    self.send_offer().await?;
                }
                Ok(())
            }
            RelayEvent::PeerLeft { participant_id, .. } => {
                self.emit(NegotiatorEvent::PeerLeft(participant_id));
                if self.remote_peer == Some(participant_id) {
                    info!(peer = %participant_id, "Remote peer left, resetting");
                    self.reset_peer().await?;
                }
                Ok(())
            }
            RelayEvent::Offer { offer, from, .. } => self.accept_offer(from, offer).await,
            RelayEvent::Answer { answer, from, .. } => self.accept_answer(from, answer).await,
            RelayEvent::Candidate {
                candidate, from, ..
            } => self.accept_candidate(from, candidate).await,
            RelayEvent::Pong { id } => {
                debug!(?id, "Relay answered ping");
                Ok(())
            }
        }
    }

    pub async fn handle_media_event(&mut self, event: MediaEvent) -> Result<()> {
        match event {
            MediaEvent::LocalCandidate(candidate) => {
                self.emit(NegotiatorEvent::LocalCandidate(candidate.clone()));
                if !self.state.is_in_room() {
                    debug!("Not in a room yet, local candidate dropped");
                    return Ok(());
                }
                let message =
                    ClientMessage::candidate(self.config.room.clone(), Payload::encode(&candidate)?);
                let message = match self.remote_peer {
                    Some(peer) => message.directed_to(peer),
                    None => message,
                };
                self.sink.send(message).await
            }
            MediaEvent::RemoteTrack(track) => {
                info!(track_id = %track.track_id, kind = ?track.kind, "Remote track received");
                self.emit(NegotiatorEvent::RemoteTrack(track));
                Ok(())
            }
            MediaEvent::ConnectionStateChanged(state) => {
                if state == ConnectionState::Failed {
                    warn!("Peer connection failed");
                } else {
                    debug!(?state, "Peer connection state changed");
                }
                self.emit(NegotiatorEvent::ConnectionStateChanged(state));
                Ok(())
            }
        }
    }

    async fn send_offer(&mut self) -> Result<()> {
        let offer = self.media.create_offer().await?;
        self.media.set_local_description(offer.clone()).await?;
        let message = ClientMessage::offer(self.config.room.clone(), Payload::encode(&offer)?);
        let message = match self.remote_peer {
            Some(peer) => message.directed_to(peer),
            None => message,
        };

        self.transition(NegotiationState::HaveLocalOffer);
        self.sink.send(message).await
    }

    async fn accept_offer(&mut self, from: ParticipantId, offer: Payload) -> Result<()> {
        let Some(description) = decode_or_warn::<SessionDescription>(&offer, "offer") else {
            return Ok(());
        };
        if self.state == NegotiationState::HaveLocalOffer {
            debug!(peer = %from, "Offers crossed, taking the remote one");
        }

        self.remote_peer = Some(from);
        self.media.set_remote_description(description).await?;
        self.remote_description_set = true;
        self.transition(NegotiationState::HaveRemoteOffer);
        self.flush_candidates(from).await;

        let answer = self.media.create_answer().await?;
        self.media.set_local_description(answer.clone()).await?;
        let message = ClientMessage::answer(self.config.room.clone(), Payload::encode(&answer)?)
            .directed_to(from);
        self.sink.send(message).await?;
        self.transition(NegotiationState::Stable);
        Ok(())
    }

    async fn accept_answer(&mut self, from: ParticipantId, answer: Payload) -> Result<()> {
        if !self.state.awaits_answer() {
            warn!(peer = %from, state = %self.state, "No offer outstanding, ignoring answer");
            return Ok(());
        }
        let Some(description) = decode_or_warn::<SessionDescription>(&answer, "answer") else {
            return Ok(());
        };

        self.remote_peer = Some(from);
        self.media.set_remote_description(description).await?;
        self.remote_description_set = true;
        self.flush_candidates(from).await;
        self.transition(NegotiationState::Stable);
        Ok(())
    }

    async fn accept_candidate(&mut self, from: ParticipantId, candidate: Payload) -> Result<()> {
        let Some(candidate) = decode_or_warn::<IceCandidate>(&candidate, "candidate") else {
            return Ok(());
        };

        if self.remote_description_set {
            if self.remote_peer == Some(from) {
                self.apply_candidate(candidate).await;
            } else {
                debug!(peer = %from, "Dropping candidate from an unrelated participant");
            }
        } else {
            debug!(peer = %from, "Buffering candidate until remote description is set");
            self.candidates.push(from, candidate);
        }
        Ok(())
    }

    async fn flush_candidates(&mut self, peer: ParticipantId) {
        for candidate in self.candidates.drain_from(peer) {
            self.apply_candidate(candidate).await;
        }
    }

    async fn apply_candidate(&mut self, candidate: IceCandidate) {
        if let Err(e) = self.media.add_ice_candidate(candidate).await {
            warn!(error = %e, "Failed to apply remote candidate");
        }
    }

    async fn reset_peer(&mut self) -> Result<()> {
        self.media.reset().await?;
        self.candidates.clear();
        self.remote_description_set = false;
        self.remote_peer = None;
        self.transition(NegotiationState::WaitingForPeer);
        Ok(())
    }

    fn transition(&mut self, to: NegotiationState) {
        if self.state == to {
            return;
        }
        let from = std::mem::replace(&mut self.state, to);
        info!(%from, %to, "Negotiation state changed");
        self.emit(NegotiatorEvent::StateChanged { from, to });
    }

    fn emit(&self, event: NegotiatorEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}

fn decode_or_warn<T: serde::de::DeserializeOwned>(payload: &Payload, what: &str) -> Option<T> {
    match payload.decode() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(error = %e, "Dropping malformed {}", what);
            None
        }
    }
}
