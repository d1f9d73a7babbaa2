//! Deterministic frame source standing in for the camera driver.

use bytes::Bytes;

use crate::{Frame, FrameSource, VisionResult};

const BACKGROUND: u8 = 210;
const LINE: u8 = 30;

/// Renders a dark vertical bar on a light background.
///
/// Used by the daemon's bench mode and by tests; the real camera driver
/// implements [`FrameSource`] outside this workspace.
pub struct SyntheticSource {
    width: u32,
    height: u32,
    bar_center: Option<u32>,
    bar_half_width: u32,
    sequence: u64,
}

impl SyntheticSource {
    /// Source with the bar centered in the frame.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bar_center: Some(width / 2),
            bar_half_width: 4,
            sequence: 0,
        }
    }

    /// Move the bar's center column; `None` renders no line at all.
    pub fn set_bar_center(&mut self, center: Option<u32>) {
        self.bar_center = center;
    }

    fn render(&self) -> Bytes {
        let mut data = vec![BACKGROUND; Frame::rgb_buffer_size(self.width, self.height)];
        if let Some(center) = self.bar_center {
            let left = center.saturating_sub(self.bar_half_width);
            let right = (center + self.bar_half_width).min(self.width.saturating_sub(1));
            for y in 0..self.height as usize {
                for x in left as usize..=right as usize {
                    let i = (y * self.width as usize + x) * 3;
                    data[i] = LINE;
                    data[i + 1] = LINE;
                    data[i + 2] = LINE;
                }
            }
        }
        Bytes::from(data)
    }
}

impl FrameSource for SyntheticSource {
    fn capture(&mut self) -> VisionResult<Frame> {
        self.sequence += 1;
        Ok(Frame::new(
            self.render(),
            self.width,
            self.height,
            self.sequence,
        ))
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze;
    use pilot_core::DirectionLabel;

    #[test]
    fn test_centered_bar_reads_straight() {
        let mut source = SyntheticSource::new(320, 240);
        let frame = source.capture().unwrap();
        assert!(frame.is_valid());
        assert_eq!(analyze(&frame), DirectionLabel::Straight);
    }

    #[test]
    fn test_bar_position_steers_classification() {
        let mut source = SyntheticSource::new(320, 240);
        source.set_bar_center(Some(40));
        assert_eq!(
            analyze(&source.capture().unwrap()),
            DirectionLabel::LeftHard
        );

        source.set_bar_center(None);
        assert_eq!(analyze(&source.capture().unwrap()), DirectionLabel::NoLine);
    }

    #[test]
    fn test_sequence_numbers_increase() {
        let mut source = SyntheticSource::new(64, 48);
        let first = source.capture().unwrap();
        let second = source.capture().unwrap();
        assert!(second.sequence > first.sequence);
    }
}
