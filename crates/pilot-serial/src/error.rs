//! Error types for the serial module.

use thiserror::Error;

/// Errors that can occur while opening or using the firmware link.
///
/// An absent device is not represented here; discovery reports it as `None`
/// and the link then degrades every operation to a no-op.
#[derive(Debug, Error)]
pub enum SerialError {
    /// Port enumeration or open failure.
    #[error("serial port error: {0}")]
    Port(#[from] serialport::Error),

    /// IO error on the open link.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
