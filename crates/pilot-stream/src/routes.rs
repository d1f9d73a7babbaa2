//! HTTP status surface and router assembly.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, State, WebSocketUpgrade};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use pilot_core::DriveCommand;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::ws::handle_viewer;
use crate::ServerState;

/// Build the router: plain-text status queries, the JSON snapshot, the mode
/// toggle, and the frame stream. Unknown paths fall through to axum's 404.
pub fn create_router(state: ServerState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/status", get(status_handler))
        .route("/mode", get(mode_handler))
        .route("/link", get(link_handler))
        .route("/comm-log", get(comm_log_handler))
        .route("/snapshot", get(snapshot_handler))
        .route("/autonomous", post(toggle_handler))
        .route("/ws", get(ws_handler))
        .layer(cors)
        .with_state(state)
}

/// Latest classified direction, or a placeholder before the first cycle.
async fn status_handler(State(state): State<ServerState>) -> String {
    state
        .store
        .direction()
        .map(|d| d.name().to_string())
        .unwrap_or_else(|| "Initializing...".to_string())
}

async fn mode_handler(State(state): State<ServerState>) -> &'static str {
    state.store.mode().name()
}

async fn link_handler(State(state): State<ServerState>) -> &'static str {
    if state.channel.is_connected() {
        "CONNECTED"
    } else {
        "DISCONNECTED"
    }
}

/// The retained communication log, newline-joined, most recent last.
async fn comm_log_handler(State(state): State<ServerState>) -> String {
    state.store.render_comm_log()
}

/// JSON roll-up of the per-field queries.
#[derive(Debug, Serialize)]
struct StatusSnapshot {
    direction: Option<&'static str>,
    mode: &'static str,
    link_connected: bool,
    viewers: usize,
}

async fn snapshot_handler(State(state): State<ServerState>) -> Json<StatusSnapshot> {
    Json(StatusSnapshot {
        direction: state.store.direction().map(|d| d.name()),
        mode: state.store.mode().name(),
        link_connected: state.channel.is_connected(),
        viewers: state.viewers.count(),
    })
}

/// Flip the drive mode. Entering autonomous mode tells the firmware first;
/// leaving it is local only.
async fn toggle_handler(State(state): State<ServerState>) -> StatusCode {
    if !state.store.mode().is_autonomous() {
        state.channel.send(DriveCommand::AutonToggle);
    }
    let mode = state.store.toggle_mode();
    info!(?mode, "Drive mode toggled");
    StatusCode::NO_CONTENT
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(state): State<ServerState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_viewer(socket, state, addr))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use pilot_core::{DriveMode, TelemetryStore};
    use pilot_serial::{CommandChannel, SerialLink};

    use crate::ViewerRegistry;

    fn state_with_link(link: SerialLink) -> ServerState {
        let store = Arc::new(TelemetryStore::new());
        ServerState {
            channel: Arc::new(CommandChannel::new(link, Arc::clone(&store))),
            store,
            viewers: Arc::new(ViewerRegistry::new()),
        }
    }

    #[tokio::test]
    async fn test_status_placeholder_before_first_cycle() {
        let state = state_with_link(SerialLink::disconnected());
        let body = status_handler(State(state)).await;
        assert_eq!(body, "Initializing...");
    }

    #[tokio::test]
    async fn test_mode_and_link_render_as_plain_text() {
        let state = state_with_link(SerialLink::disconnected());
        assert_eq!(mode_handler(State(state.clone())).await, "OFF");
        assert_eq!(link_handler(State(state)).await, "DISCONNECTED");
    }

    #[tokio::test]
    async fn test_toggle_flips_mode_and_returns_no_content() {
        let state = state_with_link(SerialLink::disconnected());

        let status = toggle_handler(State(state.clone())).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(state.store.mode(), DriveMode::Autonomous);

        let status = toggle_handler(State(state.clone())).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(state.store.mode(), DriveMode::Manual);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_toggle_emits_auton_toggle_only_when_entering_autonomous() {
        use serialport::SerialPort;

        let (mut host, device) = serialport::TTYPort::pair().expect("pty pair");
        let state = state_with_link(SerialLink::new(Some(Box::new(device))));

        // Manual -> Autonomous: the toggle crosses the wire.
        toggle_handler(State(state.clone())).await;
        let mut buf = [0u8; 1];
        std::io::Read::read_exact(&mut host, &mut buf).unwrap();
        assert_eq!(buf[0], b'a');

        // Autonomous -> Manual: nothing is sent.
        toggle_handler(State(state.clone())).await;
        assert_eq!(host.bytes_to_read().unwrap(), 0);
        assert_eq!(state.store.mode(), DriveMode::Manual);
    }
}
