use crate::infrastructure::Result;
use huddle_relay::{RelayConfig, RelayServer};
use tracing::{info, warn};

/// Run the relay until ctrl-c
pub async fn serve(config: RelayConfig) -> Result<()> {
    info!(
        listen = %config.listen,
        channel_capacity = config.channel_capacity,
        "Starting relay"
    );
    let server = RelayServer::bind(config).await?;
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            info!("Shutdown requested");
        })
        .await?;
    Ok(())
}
