use async_trait::async_trait;
use huddle_core::{ClientMessage, IceCandidate, SdpType, SessionDescription};
use huddle_negotiator::{IceServer, MediaEngine, NegotiatorError, Result, SignalSink};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Calls made against the mock, in order
#[derive(Debug, Clone, PartialEq)]
pub enum MediaCall {
    AcquireLocalMedia(Vec<IceServer>),
    CreateOffer,
    CreateAnswer,
    SetLocal(SdpType),
    SetRemote(SessionDescription),
    AddCandidate(IceCandidate),
    Reset,
}

/// Media engine that records calls instead of touching real devices
#[derive(Clone, Default)]
pub struct MockMediaEngine {
    calls: Arc<Mutex<Vec<MediaCall>>>,
    reject_candidates: Arc<AtomicBool>,
}

impl MockMediaEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<MediaCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn applied_candidates(&self) -> Vec<IceCandidate> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                MediaCall::AddCandidate(candidate) => Some(candidate),
                _ => None,
            })
            .collect()
    }

    pub fn reject_candidates(&self) {
        self.reject_candidates.store(true, Ordering::SeqCst);
    }

    fn record(&self, call: MediaCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl MediaEngine for MockMediaEngine {
    async fn acquire_local_media(&mut self, ice_servers: &[IceServer]) -> Result<()> {
        self.record(MediaCall::AcquireLocalMedia(ice_servers.to_vec()));
        Ok(())
    }

    async fn create_offer(&mut self) -> Result<SessionDescription> {
        self.record(MediaCall::CreateOffer);
        Ok(SessionDescription::offer("v=0 mock-offer"))
    }

    async fn create_answer(&mut self) -> Result<SessionDescription> {
        self.record(MediaCall::CreateAnswer);
        Ok(SessionDescription::answer("v=0 mock-answer"))
    }

    async fn set_local_description(&mut self, description: SessionDescription) -> Result<()> {
        self.record(MediaCall::SetLocal(description.kind));
        Ok(())
    }

    async fn set_remote_description(&mut self, description: SessionDescription) -> Result<()> {
        self.record(MediaCall::SetRemote(description));
        Ok(())
    }

    async fn add_ice_candidate(&mut self, candidate: IceCandidate) -> Result<()> {
        if self.reject_candidates.load(Ordering::SeqCst) {
            return Err(NegotiatorError::Media("candidate rejected".to_string()));
        }
        self.record(MediaCall::AddCandidate(candidate));
        Ok(())
    }

    async fn reset(&mut self) -> Result<()> {
        self.record(MediaCall::Reset);
        Ok(())
    }
}

/// Signal sink that keeps everything it was asked to send
#[derive(Clone, Default)]
pub struct RecordingSink {
    sent: Arc<Mutex<Vec<ClientMessage>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<ClientMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<ClientMessage> {
        self.sent.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl SignalSink for RecordingSink {
    async fn send(&mut self, message: ClientMessage) -> Result<()> {
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}
