//! Per-viewer frame fan-out.

use std::net::SocketAddr;

use axum::extract::ws::{Message, WebSocket};
use tracing::info;

use crate::{ServerState, FANOUT_PERIOD};

/// Stream the latest frame to one viewer until its connection fails.
///
/// Each viewer runs independently at its own cadence, re-reading the store
/// every tick; a missing frame is a no-op. A send error ends only this task
/// and deregisters the viewer.
pub async fn handle_viewer(mut socket: WebSocket, state: ServerState, addr: SocketAddr) {
    let id = state.viewers.register(addr);
    info!(%addr, id, "Viewer connected");

    loop {
        if let Some(frame) = state.store.latest_frame() {
            if socket.send(Message::Binary(frame)).await.is_err() {
                break;
            }
        }
        tokio::time::sleep(FANOUT_PERIOD).await;
    }

    state.viewers.deregister(id);
    info!(%addr, id, "Viewer disconnected");
}
