//! JPEG encoding of raw frames for the streaming surface.

use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;

use crate::{Frame, VisionError, VisionResult, JPEG_QUALITY};

/// Encode a raw RGB frame as JPEG.
pub fn encode_jpeg(frame: &Frame) -> VisionResult<Bytes> {
    if !frame.is_valid() {
        return Err(VisionError::PayloadMismatch {
            got: frame.data.len(),
            expected: Frame::rgb_buffer_size(frame.width, frame.height),
        });
    }

    let mut out = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY);
    encoder.encode(&frame.data, frame.width, frame.height, ExtendedColorType::Rgb8)?;
    Ok(Bytes::from(out))
}
