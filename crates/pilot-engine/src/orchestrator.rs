//! Perception and inbound-signal loops.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use pilot_core::{DriveCommand, DriveMode, InboundSignal, TelemetryStore};
use pilot_serial::CommandChannel;
use pilot_vision::{analyze, encode_jpeg, FrameSource};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::CommandArbiter;

/// Loop timing for the engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Target perception cycle period in autonomous mode.
    pub cycle_period: Duration,

    /// Perception period while in manual mode.
    pub idle_period: Duration,

    /// Poll interval of the inbound-signal loop.
    pub signal_period: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cycle_period: Duration::from_millis(10),
            idle_period: Duration::from_millis(30),
            signal_period: Duration::from_millis(50),
        }
    }
}

/// Owns the perception loop and the inbound-signal loop.
///
/// Both loops run for the process lifetime; nothing that happens inside a
/// cycle terminates them. Failures are logged and the next cycle retries.
pub struct Engine {
    store: Arc<TelemetryStore>,
    channel: Arc<CommandChannel>,
    source: Box<dyn FrameSource>,
    config: EngineConfig,
    shutdown: Arc<AtomicBool>,
}

impl Engine {
    /// Create an engine over the shared store, the command channel, and a
    /// frame source.
    pub fn new(
        store: Arc<TelemetryStore>,
        channel: Arc<CommandChannel>,
        source: Box<dyn FrameSource>,
        config: EngineConfig,
    ) -> Self {
        Self {
            store,
            channel,
            source,
            config,
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flag observed by both loops; setting it ends them after their current
    /// tick.
    pub fn shutdown_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown)
    }

    /// Spawn both loops onto the current runtime.
    pub fn spawn(self) -> (JoinHandle<()>, JoinHandle<()>) {
        let Engine {
            store,
            channel,
            source,
            config,
            shutdown,
        } = self;

        let perception = tokio::spawn(perception_loop(
            Arc::clone(&store),
            Arc::clone(&channel),
            source,
            config.clone(),
            Arc::clone(&shutdown),
        ));
        let signals = tokio::spawn(signal_loop(store, channel, config, shutdown));
        (perception, signals)
    }
}

async fn perception_loop(
    store: Arc<TelemetryStore>,
    channel: Arc<CommandChannel>,
    mut source: Box<dyn FrameSource>,
    config: EngineConfig,
    shutdown: Arc<AtomicBool>,
) {
    info!("Perception loop starting");

    let mut arbiter = CommandArbiter::new();
    let mut cycles: u64 = 0;
    let mut last_log = Instant::now();

    while !shutdown.load(Ordering::SeqCst) {
        let cycle_start = Instant::now();
        cycles += 1;

        if last_log.elapsed() >= Duration::from_secs(5) {
            info!(
                cycles,
                direction = ?store.direction(),
                mode = ?store.mode(),
                "Perception stats"
            );
            last_log = Instant::now();
        }

        let frame = match source.capture() {
            Ok(frame) => frame,
            Err(e) => {
                warn!("Capture failed: {e}");
                tokio::time::sleep(config.idle_period).await;
                continue;
            }
        };

        let label = analyze(&frame);
        store.set_direction(label);

        match encode_jpeg(&frame) {
            Ok(jpeg) => store.set_frame(jpeg),
            Err(e) => warn!("Frame encode failed: {e}"),
        }

        if !store.mode().is_autonomous() {
            tokio::time::sleep(config.idle_period).await;
            continue;
        }

        for command in arbiter.step(label) {
            channel.send(command);
        }

        // Pace to the target period; a long cycle just starts the next one
        // immediately.
        let elapsed = cycle_start.elapsed();
        if elapsed < config.cycle_period {
            tokio::time::sleep(config.cycle_period - elapsed).await;
        }
    }

    info!("Perception loop stopped");
}

async fn signal_loop(
    store: Arc<TelemetryStore>,
    channel: Arc<CommandChannel>,
    config: EngineConfig,
    shutdown: Arc<AtomicBool>,
) {
    info!("Signal loop starting");

    while !shutdown.load(Ordering::SeqCst) {
        if let Some(byte) = channel.poll_byte() {
            match InboundSignal::from_byte(byte) {
                Some(InboundSignal::Enable) => {
                    info!("Firmware requested autonomous mode");
                    store.set_mode(DriveMode::Autonomous);
                    // Echo the toggle so the firmware sees the mode latch.
                    channel.send(DriveCommand::AutonToggle);
                }
                Some(InboundSignal::Disable) => {
                    info!("Firmware requested manual mode");
                    store.set_mode(DriveMode::Manual);
                }
                None => {
                    warn!("Ignoring unexpected byte from firmware: 0x{byte:02x}");
                }
            }
        }
        tokio::time::sleep(config.signal_period).await;
    }

    info!("Signal loop stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use pilot_core::DirectionLabel;
    use pilot_serial::SerialLink;
    use pilot_vision::SyntheticSource;

    fn test_config() -> EngineConfig {
        EngineConfig {
            cycle_period: Duration::from_millis(1),
            idle_period: Duration::from_millis(1),
            signal_period: Duration::from_millis(5),
        }
    }

    #[tokio::test]
    async fn test_manual_mode_updates_telemetry_without_commands() {
        let store = Arc::new(TelemetryStore::new());
        let channel = Arc::new(CommandChannel::new(
            SerialLink::disconnected(),
            Arc::clone(&store),
        ));
        let source = Box::new(SyntheticSource::new(320, 240));

        let engine = Engine::new(Arc::clone(&store), channel, source, test_config());
        let shutdown = engine.shutdown_flag();
        let (perception, signals) = engine.spawn();

        tokio::time::sleep(Duration::from_millis(50)).await;
        shutdown.store(true, Ordering::SeqCst);
        let _ = tokio::join!(perception, signals);

        assert_eq!(store.direction(), Some(DirectionLabel::Straight));
        assert!(store.latest_frame().is_some());
        // Manual mode: no arbitration, and the disconnected link logs nothing.
        assert!(store.comm_log().is_empty());
        assert!(store.last_sent().is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_autonomous_mode_survives_missing_transport() {
        let store = Arc::new(TelemetryStore::new());
        store.set_mode(DriveMode::Autonomous);
        let channel = Arc::new(CommandChannel::new(
            SerialLink::disconnected(),
            Arc::clone(&store),
        ));
        let source = Box::new(SyntheticSource::new(320, 240));

        let engine = Engine::new(Arc::clone(&store), channel, source, test_config());
        let shutdown = engine.shutdown_flag();
        let (perception, signals) = engine.spawn();

        tokio::time::sleep(Duration::from_millis(50)).await;
        shutdown.store(true, Ordering::SeqCst);
        let _ = tokio::join!(perception, signals);

        // The loop keeps classifying even though every send is a no-op.
        assert_eq!(store.direction(), Some(DirectionLabel::Straight));
        assert!(store.comm_log().is_empty());
    }
}
