//! Error types for the vision module.

use thiserror::Error;

/// Errors that can occur while acquiring or encoding frames.
///
/// Degenerate detection input is not an error; the analyzer folds it into
/// `NoLine`.
#[derive(Debug, Error)]
pub enum VisionError {
    /// Frame payload does not match the declared dimensions.
    #[error("frame payload size mismatch: got {got} bytes, expected {expected}")]
    PayloadMismatch {
        /// Bytes actually present.
        got: usize,
        /// Bytes the dimensions require.
        expected: usize,
    },

    /// The camera produced no frame.
    #[error("capture failed: {0}")]
    Capture(String),

    /// JPEG encoding failed.
    #[error("encode failed: {0}")]
    Encode(#[from] image::ImageError),
}
