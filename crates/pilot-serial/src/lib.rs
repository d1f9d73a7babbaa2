//! Serial command channel to the motor-controller firmware.
//!
//! Provides device discovery, the best-effort [`SerialLink`], and the
//! [`CommandChannel`] that couples the link with the telemetry store's
//! communication log.

mod channel;
mod discovery;
mod error;
mod link;

pub use channel::CommandChannel;
pub use discovery::{discover_port, is_candidate, open_port, CANDIDATE_PREFIX};
pub use error::SerialError;
pub use link::SerialLink;

use std::time::Duration;

/// Baud rate of the firmware link.
pub const BAUD_RATE: u32 = 9600;

/// Timeout bounding each read or write on the port.
pub const PORT_TIMEOUT: Duration = Duration::from_secs(1);

/// Result type for serial operations.
pub type SerialResult<T> = Result<T, SerialError>;
