//! Outbound drive commands and inbound firmware signals.

use serde::{Deserialize, Serialize};

/// A command sent to the motor-controller firmware.
///
/// Each command is one byte on the wire; the firmware protocol has no framing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriveCommand {
    /// Keep the drive motor running forward.
    Forward,

    /// Center the steering.
    Straight,

    /// Gentle left turn.
    LeftSoft,

    /// Full left turn.
    LeftHard,

    /// Gentle right turn.
    RightSoft,

    /// Full right turn.
    RightHard,

    /// Back up.
    Reverse,

    /// Toggle the firmware's autonomous mode.
    AutonToggle,
}

impl DriveCommand {
    /// Single-byte wire symbol understood by the firmware.
    pub fn symbol(&self) -> u8 {
        match self {
            Self::Forward => b'f',
            Self::Straight => b's',
            Self::LeftSoft => b'l',
            Self::LeftHard => b'L',
            Self::RightSoft => b'r',
            Self::RightHard => b'R',
            Self::Reverse => b'b',
            Self::AutonToggle => b'a',
        }
    }
}

/// Mode-control signal received from the firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InboundSignal {
    /// Switch to autonomous driving.
    Enable,

    /// Hand control back to the operator.
    Disable,
}

impl InboundSignal {
    /// Decode a received byte; `None` for anything the protocol does not define.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'a' => Some(Self::Enable),
            b'n' => Some(Self::Disable),
            _ => None,
        }
    }
}
