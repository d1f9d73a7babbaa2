//! Command channel coupling the serial link with the telemetry store.

use std::sync::Arc;

use pilot_core::{DriveCommand, TelemetryStore};
use tracing::debug;

use crate::SerialLink;

/// Best-effort command transport with a communication log.
///
/// Every successful transfer is appended to the store's comm log; sends also
/// update the store's last-sent display copy. Failures leave the store
/// untouched and report through the return value.
pub struct CommandChannel {
    link: SerialLink,
    store: Arc<TelemetryStore>,
}

impl CommandChannel {
    /// Channel over the given link and store.
    pub fn new(link: SerialLink, store: Arc<TelemetryStore>) -> Self {
        Self { link, store }
    }

    /// Send one command; true when it left the port.
    pub fn send(&self, command: DriveCommand) -> bool {
        if self.link.try_send(command.symbol()) {
            self.store.record_sent(command);
            debug!(?command, "Sent to firmware");
            true
        } else {
            false
        }
    }

    /// Poll one inbound byte, recording it when present.
    pub fn poll_byte(&self) -> Option<u8> {
        let byte = self.link.try_read_byte()?;
        self.store.record_received(byte);
        Some(byte)
    }

    /// Whether the firmware link is up.
    pub fn is_connected(&self) -> bool {
        self.link.is_connected()
    }
}
