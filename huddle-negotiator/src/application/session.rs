use crate::application::events::MediaEvent;
use crate::application::negotiator::Negotiator;
use crate::infrastructure::error::{NegotiatorError, Result};
use crate::infrastructure::{MediaEngine, SignalSink};
use huddle_core::RelayEvent;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Feed relay and media events into `negotiator` until the relay channel closes.
///
/// Call [`Negotiator::start`] first. Per-event failures are logged and the
/// loop continues; a closed signaling channel ends it with an error.
pub async fn run_session<M, S>(
    negotiator: &mut Negotiator<M, S>,
    mut relay_events: mpsc::Receiver<RelayEvent>,
    mut media_events: mpsc::Receiver<MediaEvent>,
) -> Result<()>
where
    M: MediaEngine,
    S: SignalSink,
{
    let mut media_open = true;

    loop {
        let outcome = tokio::select! {
            event = relay_events.recv() => match event {
                Some(event) => negotiator.handle_relay_event(event).await,
                None => break,
            },
            event = media_events.recv(), if media_open => match event {
                Some(event) => negotiator.handle_media_event(event).await,
                None => {
                    media_open = false;
                    Ok(())
                }
            },
        };

        match outcome {
            Ok(()) => {}
            Err(NegotiatorError::ChannelClosed) => {
                negotiator.mark_closed();
                return Err(NegotiatorError::ChannelClosed);
            }
            Err(e) => warn!(error = %e, "Negotiation step failed"),
        }
    }

    info!("Relay channel closed, ending session");
    negotiator.mark_closed();
    Ok(())
}
