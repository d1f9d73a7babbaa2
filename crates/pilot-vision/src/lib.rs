//! Frame acquisition and line detection.
//!
//! This crate defines the [`Frame`] type, the [`FrameSource`] boundary to the
//! camera driver, the fixed-heuristic direction analyzer, and JPEG encoding
//! for the streaming surface.

mod analyze;
mod error;
mod frame;
mod jpeg;
mod synthetic;

pub use analyze::analyze;
pub use error::VisionError;
pub use frame::Frame;
pub use jpeg::encode_jpeg;
pub use synthetic::SyntheticSource;

/// Default capture width in pixels.
pub const FRAME_WIDTH: u32 = 320;

/// Default capture height in pixels.
pub const FRAME_HEIGHT: u32 = 240;

/// JPEG quality used for streamed frames.
pub const JPEG_QUALITY: u8 = 80;

/// Result type for vision operations.
pub type VisionResult<T> = Result<T, VisionError>;

/// Trait for frame producers feeding the perception loop.
///
/// The camera driver lives behind this seam; capture is synchronous and is
/// expected to return promptly relative to the loop period.
pub trait FrameSource: Send {
    /// Capture the next frame.
    fn capture(&mut self) -> VisionResult<Frame>;

    /// Source dimensions in pixels.
    fn dimensions(&self) -> (u32, u32);
}
