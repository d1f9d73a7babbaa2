//! Best-effort send and non-blocking receive over the firmware port.

use std::io::{Read, Write};

use parking_lot::Mutex;
use serialport::SerialPort;
use tracing::warn;

/// Handle to the firmware serial port.
///
/// All operations degrade to no-ops when no device is attached; connectivity
/// is an observable status, never an error. The handle is single-writer
/// (perception loop and mode toggle) and single-reader (signal loop).
pub struct SerialLink {
    port: Mutex<Option<Box<dyn SerialPort>>>,
}

impl SerialLink {
    /// Link over an already-opened port, or none.
    pub fn new(port: Option<Box<dyn SerialPort>>) -> Self {
        Self {
            port: Mutex::new(port),
        }
    }

    /// Link with no device attached.
    pub fn disconnected() -> Self {
        Self::new(None)
    }

    /// Whether a device is currently attached.
    pub fn is_connected(&self) -> bool {
        self.port.lock().is_some()
    }

    /// Write one symbol; true when it left the port.
    ///
    /// Bounded by the port timeout; a failed write is logged and reported as
    /// false.
    pub fn try_send(&self, symbol: u8) -> bool {
        let mut guard = self.port.lock();
        let Some(port) = guard.as_mut() else {
            return false;
        };
        match port.write_all(&[symbol]) {
            Ok(()) => true,
            Err(e) => {
                warn!("Serial write failed ({}): {e}", symbol as char);
                false
            }
        }
    }

    /// Poll one byte; `None` when nothing is waiting or no device is attached.
    pub fn try_read_byte(&self) -> Option<u8> {
        let mut guard = self.port.lock();
        let port = guard.as_mut()?;
        match port.bytes_to_read() {
            Ok(0) => None,
            Ok(_) => {
                let mut buf = [0u8; 1];
                match port.read_exact(&mut buf) {
                    Ok(()) => Some(buf[0]),
                    Err(e) => {
                        warn!("Serial read failed: {e}");
                        None
                    }
                }
            }
            Err(e) => {
                warn!("Serial poll failed: {e}");
                None
            }
        }
    }
}
