use crate::config::RelayConfig;
use crate::connection_handler::ConnectionHandler;
use crate::websocket_listener;
use axum::extract::WebSocketUpgrade;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use tracing::error;

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub rooms: usize,
    pub participants: usize,
}

pub fn create_signaling_route(connection_handler: ConnectionHandler, config: &RelayConfig) -> Router {
    let channel_capacity = config.channel_capacity;
    let max_message_bytes = config.max_message_bytes;
    let health_handler = connection_handler.clone();

    Router::new()
        .route(
            "/signaling",
            get(move |ws: WebSocketUpgrade| {
                websocket_listener::handle_websocket(
                    ws,
                    ConnectionHandler::new_from(&connection_handler),
                    channel_capacity,
                    max_message_bytes,
                )
            }),
        )
        .route(
            "/health",
            get(move || health(health_handler.clone())),
        )
}

async fn health(connection_handler: ConnectionHandler) -> impl IntoResponse {
    let report = async {
        let participants = connection_handler.connection_count().await?;
        let rooms = connection_handler.room_summaries().await?.len();
        Ok::<_, crate::error::RelayError>(HealthReport {
            status: "ok",
            rooms,
            participants,
        })
    };

    match report.await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => {
            error!(error = %e, "Health check failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
