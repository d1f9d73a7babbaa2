//! Control daemon for the line-following vehicle.
//!
//! Wires the frame source, the serial command channel, the perception
//! engine, and the status/streaming server together, then runs until
//! interrupted.

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};

use pilot_core::TelemetryStore;
use pilot_engine::{Engine, EngineConfig};
use pilot_serial::{discover_port, open_port, CommandChannel, SerialLink};
use pilot_stream::{create_router, ServerState, ViewerRegistry};
use pilot_vision::{SyntheticSource, FRAME_HEIGHT, FRAME_WIDTH};

/// Command-line arguments.
///
/// The frame source here is the built-in synthetic pattern; a camera driver
/// plugs in behind the `FrameSource` trait.
#[derive(Debug, Parser)]
#[command(name = "pilot-daemon", version, about)]
struct Args {
    /// Address the status and streaming server binds to.
    #[arg(long, env = "PILOT_BIND", default_value = "0.0.0.0:8000")]
    bind: SocketAddr,

    /// Serial device path; scans /dev/ttyACM* when omitted.
    #[arg(long, env = "PILOT_SERIAL")]
    serial: Option<String>,

    /// Capture width in pixels.
    #[arg(long, default_value_t = FRAME_WIDTH)]
    width: u32,

    /// Capture height in pixels.
    #[arg(long, default_value_t = FRAME_HEIGHT)]
    height: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    info!("Line follower starting");

    let port = match &args.serial {
        Some(path) => match open_port(path) {
            Ok(port) => {
                info!(port = %path, "Serial link established");
                Some(port)
            }
            Err(e) => {
                warn!(port = %path, "Serial open failed: {e}");
                None
            }
        },
        None => discover_port(),
    };
    if port.is_none() {
        warn!("No motor-controller link; drive commands will be dropped");
    }

    let store = Arc::new(TelemetryStore::new());
    let channel = Arc::new(CommandChannel::new(
        SerialLink::new(port),
        Arc::clone(&store),
    ));

    let source = Box::new(SyntheticSource::new(args.width, args.height));
    let engine = Engine::new(
        Arc::clone(&store),
        Arc::clone(&channel),
        source,
        EngineConfig::default(),
    );
    let shutdown = engine.shutdown_flag();
    let (perception, signals) = engine.spawn();

    let state = ServerState {
        store,
        channel,
        viewers: Arc::new(ViewerRegistry::new()),
    };
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("binding {}", args.bind))?;
    info!("Status and stream server on http://{}", args.bind);

    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .into_future();

    tokio::select! {
        result = server => {
            result.context("server error")?;
        }
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    shutdown.store(true, Ordering::SeqCst);
    let _ = tokio::join!(perception, signals);
    info!("Line follower stopped");
    Ok(())
}
