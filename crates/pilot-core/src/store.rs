//! Mutex-guarded telemetry shared by the control loops and the web surface.

use std::collections::VecDeque;

use bytes::Bytes;
use parking_lot::Mutex;

use crate::{CommLogEntry, DirectionLabel, DriveCommand, DriveMode, COMM_LOG_CAPACITY};

#[derive(Default)]
struct TelemetryInner {
    latest_frame: Option<Bytes>,
    latest_direction: Option<DirectionLabel>,
    mode: DriveMode,
    last_sent: Option<DriveCommand>,
    comm_log: VecDeque<CommLogEntry>,
}

/// Shared mutable state: the latest encoded frame, the latest direction, the
/// drive mode, the last transmitted command, and the bounded comm log.
///
/// Every method is a single critical section; no I/O happens under the lock.
/// Frame updates replace the previous payload wholesale.
pub struct TelemetryStore {
    inner: Mutex<TelemetryInner>,
}

impl TelemetryStore {
    /// Create an empty store in manual mode.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(TelemetryInner::default()),
        }
    }

    /// Replace the latest encoded frame.
    pub fn set_frame(&self, frame: Bytes) {
        self.inner.lock().latest_frame = Some(frame);
    }

    /// Latest encoded frame, if any cycle has completed yet.
    pub fn latest_frame(&self) -> Option<Bytes> {
        self.inner.lock().latest_frame.clone()
    }

    /// Record the direction classified from the newest frame.
    pub fn set_direction(&self, label: DirectionLabel) {
        self.inner.lock().latest_direction = Some(label);
    }

    /// Most recently classified direction.
    pub fn direction(&self) -> Option<DirectionLabel> {
        self.inner.lock().latest_direction
    }

    /// Current drive mode.
    pub fn mode(&self) -> DriveMode {
        self.inner.lock().mode
    }

    /// Set the drive mode.
    pub fn set_mode(&self, mode: DriveMode) {
        self.inner.lock().mode = mode;
    }

    /// Flip the drive mode, returning the mode now active.
    pub fn toggle_mode(&self) -> DriveMode {
        let mut inner = self.inner.lock();
        inner.mode = inner.mode.toggled();
        inner.mode
    }

    /// Last command transmitted over the link, for display.
    pub fn last_sent(&self) -> Option<DriveCommand> {
        self.inner.lock().last_sent
    }

    /// Record a successfully transmitted command.
    pub fn record_sent(&self, command: DriveCommand) {
        let mut inner = self.inner.lock();
        inner.last_sent = Some(command);
        push_entry(&mut inner.comm_log, CommLogEntry::sent(command.symbol()));
    }

    /// Record a byte received from the firmware.
    pub fn record_received(&self, symbol: u8) {
        let mut inner = self.inner.lock();
        push_entry(&mut inner.comm_log, CommLogEntry::received(symbol));
    }

    /// Snapshot of the retained comm log, oldest first.
    pub fn comm_log(&self) -> Vec<CommLogEntry> {
        self.inner.lock().comm_log.iter().cloned().collect()
    }

    /// Newline-joined log render for the status endpoint, most recent last.
    pub fn render_comm_log(&self) -> String {
        self.inner
            .lock()
            .comm_log
            .iter()
            .map(CommLogEntry::render)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for TelemetryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn push_entry(log: &mut VecDeque<CommLogEntry>, entry: CommLogEntry) {
    if log.len() == COMM_LOG_CAPACITY {
        log.pop_front();
    }
    log.push_back(entry);
}
