//! Core control loops for the line follower.
//!
//! This crate coordinates the perception cycle (capture, analyze, arbitrate,
//! transmit) and the inbound firmware signal loop over the shared telemetry
//! store.

mod arbiter;
mod orchestrator;

pub use arbiter::CommandArbiter;
pub use orchestrator::{Engine, EngineConfig};
