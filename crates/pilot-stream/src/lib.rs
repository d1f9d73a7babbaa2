//! Status endpoint and video fan-out.
//!
//! One axum router carries the plain-text status queries, the mode toggle,
//! and the WebSocket frame stream; each connected viewer gets its own
//! fan-out task.

mod registry;
mod routes;
mod ws;

pub use registry::ViewerRegistry;
pub use routes::create_router;

use std::sync::Arc;
use std::time::Duration;

use pilot_core::TelemetryStore;
use pilot_serial::CommandChannel;

/// Per-viewer frame send interval (~30 fps).
pub const FANOUT_PERIOD: Duration = Duration::from_millis(33);

/// Shared state for the web surface.
#[derive(Clone)]
pub struct ServerState {
    /// Telemetry shared with the engine.
    pub store: Arc<TelemetryStore>,

    /// Command transport shared with the engine.
    pub channel: Arc<CommandChannel>,

    /// Connected stream viewers.
    pub viewers: Arc<ViewerRegistry>,
}
