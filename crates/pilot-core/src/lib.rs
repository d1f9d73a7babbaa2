//! Shared vocabulary and state for the line-follower control core.
//!
//! This crate defines the types exchanged between the perception engine,
//! the serial command channel, and the status/streaming surface, plus the
//! mutex-guarded [`TelemetryStore`] they all share.

mod commands;
mod log;
mod store;
mod types;

pub use commands::{DriveCommand, InboundSignal};
pub use log::{CommDirection, CommLogEntry};
pub use store::TelemetryStore;
pub use types::{DirectionLabel, DriveMode, LogicalDirection};

/// Number of communication log entries retained for inspection.
pub const COMM_LOG_CAPACITY: usize = 100;
