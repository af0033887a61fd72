use crate::config::RelayConfig;
use crate::connection_handler::ConnectionHandler;
use crate::error::Result;
use crate::memory_storage::MemoryStorage;
use crate::route::create_signaling_route;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Bound relay, ready to serve
pub struct RelayServer {
    config: RelayConfig,
    listener: TcpListener,
    connection_handler: ConnectionHandler,
}

impl RelayServer {
    /// Validate the configuration and bind the listening socket
    pub async fn bind(config: RelayConfig) -> Result<Self> {
        config.validate()?;
        let listener = TcpListener::bind(config.listen).await?;
        let storage = Arc::new(MemoryStorage::new());
        let connection_handler = ConnectionHandler::new(storage.clone(), storage);

        Ok(RelayServer {
            config,
            listener,
            connection_handler,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Shared handler; new connections get their own via [`ConnectionHandler::new_from`]
    pub fn connection_handler(&self) -> &ConnectionHandler {
        &self.connection_handler
    }

    pub async fn run(self) -> Result<()> {
        self.run_with_shutdown(std::future::pending()).await
    }

    /// Serve until `shutdown` resolves, then stop accepting and drain
    pub async fn run_with_shutdown<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.local_addr()?;
        let app = create_signaling_route(self.connection_handler, &self.config);

        info!(%addr, "Signaling relay listening");
        axum::serve(self.listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;
        info!("Signaling relay stopped");
        Ok(())
    }
}
