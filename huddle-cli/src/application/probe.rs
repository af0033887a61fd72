use crate::infrastructure::Result;
use huddle_core::{ClientMessage, RelayEvent, RoomName};
use huddle_negotiator::{RelayClient, SignalSink};
use std::io::Write;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Join `room` on the relay at `server` and print every relay event as a JSON line.
///
/// Runs until the relay closes the connection or ctrl-c is pressed.
pub async fn probe(server: &str, room: RoomName) -> Result<()> {
    let (mut client, mut events) = RelayClient::connect(server, 64).await?;
    client.send(ClientMessage::join(room.clone())).await?;
    info!(%server, %room, "Probe joined");

    let outcome = tokio::select! {
        result = print_events(&mut events) => result,
        _ = tokio::signal::ctrl_c() => {
            if let Err(e) = client.send(ClientMessage::LeaveRoom).await {
                warn!(error = %e, "Failed to leave room");
            }
            Ok(())
        }
    };

    client.close().await;
    outcome
}

async fn print_events(events: &mut mpsc::Receiver<RelayEvent>) -> Result<()> {
    let stdout = std::io::stdout();
    while let Some(event) = events.recv().await {
        let line = serde_json::to_string(&event)?;
        let mut out = stdout.lock();
        writeln!(out, "{}", line)?;
        out.flush()?;
    }
    info!("Relay closed the connection");
    Ok(())
}
