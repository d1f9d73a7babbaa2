//! Captured frame type.

use bytes::Bytes;

/// A captured video frame.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Packed RGB8 pixel data, row-major.
    pub data: Bytes,

    /// Frame width in pixels.
    pub width: u32,

    /// Frame height in pixels.
    pub height: u32,

    /// Monotonically increasing sequence number.
    pub sequence: u64,
}

impl Frame {
    /// Create a new frame.
    pub fn new(data: Bytes, width: u32, height: u32, sequence: u64) -> Self {
        Self {
            data,
            width,
            height,
            sequence,
        }
    }

    /// Expected buffer size for packed RGB8 at the given dimensions.
    pub fn rgb_buffer_size(width: u32, height: u32) -> usize {
        (width as usize) * (height as usize) * 3
    }

    /// Validate that the payload matches the declared dimensions.
    pub fn is_valid(&self) -> bool {
        self.data.len() == Self::rgb_buffer_size(self.width, self.height)
    }
}
