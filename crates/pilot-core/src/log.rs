//! Communication log entries kept for inspection over the status endpoint.

use chrono::{DateTime, Local};

/// Whether a logged byte was sent to or received from the firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommDirection {
    /// Byte transmitted to the firmware.
    Sent,

    /// Byte received from the firmware.
    Received,
}

/// One transport event: when it happened, which way it went, and the symbol.
#[derive(Debug, Clone)]
pub struct CommLogEntry {
    /// Wall-clock time of the event.
    pub timestamp: DateTime<Local>,

    /// Transfer direction.
    pub direction: CommDirection,

    /// The wire symbol that crossed the link.
    pub symbol: u8,
}

impl CommLogEntry {
    /// Entry for a transmitted symbol, stamped now.
    pub fn sent(symbol: u8) -> Self {
        Self {
            timestamp: Local::now(),
            direction: CommDirection::Sent,
            symbol,
        }
    }

    /// Entry for a received symbol, stamped now.
    pub fn received(symbol: u8) -> Self {
        Self {
            timestamp: Local::now(),
            direction: CommDirection::Received,
            symbol,
        }
    }

    /// Render as one status line.
    pub fn render(&self) -> String {
        let time = self.timestamp.format("%H:%M:%S");
        match self.direction {
            CommDirection::Sent => format!("[{time}] {}", self.symbol as char),
            CommDirection::Received => format!("[{time}] (recv) {}", self.symbol as char),
        }
    }
}
