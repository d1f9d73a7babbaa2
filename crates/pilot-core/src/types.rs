//! Direction and mode vocabulary.

use serde::{Deserialize, Serialize};

/// Direction classification produced by the analyzer for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DirectionLabel {
    /// Line far left of center.
    LeftHard,

    /// Line slightly left of center.
    Left,

    /// Line centered.
    Straight,

    /// Line slightly right of center.
    Right,

    /// Line far right of center.
    RightHard,

    /// No line found in the analysis band.
    NoLine,
}

impl DirectionLabel {
    /// Returns true when a line was detected.
    pub fn is_line(&self) -> bool {
        !matches!(self, Self::NoLine)
    }

    /// Display name used by the status endpoint.
    pub fn name(&self) -> &'static str {
        match self {
            Self::LeftHard => "LEFT_HARD",
            Self::Left => "LEFT",
            Self::Straight => "STRAIGHT",
            Self::Right => "RIGHT",
            Self::RightHard => "RIGHT_HARD",
            Self::NoLine => "NO LINE",
        }
    }

    /// The steering bias this label implies, if any.
    ///
    /// Hard turns count as their soft counterpart; `NoLine` carries none.
    pub fn logical(&self) -> Option<LogicalDirection> {
        match self {
            Self::LeftHard | Self::Left => Some(LogicalDirection::Left),
            Self::RightHard | Self::Right => Some(LogicalDirection::Right),
            Self::Straight => Some(LogicalDirection::Straight),
            Self::NoLine => None,
        }
    }
}

/// Last known line-following bias, retained across cycles as recovery memory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicalDirection {
    /// Was steering left when the line was last seen.
    Left,

    /// Was steering right when the line was last seen.
    Right,

    /// Was tracking the line straight ahead.
    #[default]
    Straight,
}

/// Whether the vehicle is driving itself or being driven.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriveMode {
    /// The perception loop steers the vehicle.
    Autonomous,

    /// Commands come from the operator; the perception loop only observes.
    #[default]
    Manual,
}

impl DriveMode {
    /// Returns true in autonomous mode.
    pub fn is_autonomous(&self) -> bool {
        matches!(self, Self::Autonomous)
    }

    /// The opposite mode.
    pub fn toggled(&self) -> Self {
        match self {
            Self::Autonomous => Self::Manual,
            Self::Manual => Self::Autonomous,
        }
    }

    /// Display name used by the status endpoint.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Autonomous => "ON",
            Self::Manual => "OFF",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hard_turns_share_logical_direction_with_soft() {
        assert_eq!(
            DirectionLabel::LeftHard.logical(),
            DirectionLabel::Left.logical()
        );
        assert_eq!(
            DirectionLabel::RightHard.logical(),
            DirectionLabel::Right.logical()
        );
    }

    #[test]
    fn test_no_line_has_no_logical_direction() {
        assert_eq!(DirectionLabel::NoLine.logical(), None);
        assert!(!DirectionLabel::NoLine.is_line());
    }

    #[test]
    fn test_mode_toggle_round_trip() {
        let mode = DriveMode::Manual;
        assert_eq!(mode.toggled(), DriveMode::Autonomous);
        assert_eq!(mode.toggled().toggled(), mode);
    }
}
