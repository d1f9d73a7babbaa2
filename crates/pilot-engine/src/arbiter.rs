//! Direction-to-command arbitration.

use pilot_core::{DirectionLabel, DriveCommand, LogicalDirection};

/// Translates classified directions into drive commands.
///
/// Owns the steering state carried across perception cycles: the last
/// line-following bias, the last directional command transmitted, and the
/// one-shot lost-line gate. The value belongs exclusively to the perception
/// task; no locking is involved.
#[derive(Debug, Default)]
pub struct CommandArbiter {
    logical: LogicalDirection,
    last_sent: Option<DriveCommand>,
    no_line_handled: bool,
}

impl CommandArbiter {
    /// Fresh arbiter: straight bias, nothing sent, recovery gate open.
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands to transmit for one classified frame in autonomous mode.
    ///
    /// Steerable labels always refresh `Forward`, then emit the mapped
    /// directional command when it differs from the last one sent. A lost
    /// line triggers the one-shot recovery pair: a corrective steer away from
    /// the last known bias, then `Reverse`; the gate holds for the rest of
    /// the streak. The refresh and the recovery pair are exempt from
    /// de-duplication and never recorded as the last sent command.
    ///
    /// The last sent command deliberately survives mode flips and lost-line
    /// streaks, so a command identical to the pre-flip one stays suppressed
    /// after resuming.
    pub fn step(&mut self, label: DirectionLabel) -> Vec<DriveCommand> {
        let mut out = Vec::with_capacity(2);

        let Some(command) = steering_command(label) else {
            if !self.no_line_handled {
                self.no_line_handled = true;
                match self.logical {
                    LogicalDirection::Left => out.push(DriveCommand::RightSoft),
                    LogicalDirection::Right => out.push(DriveCommand::LeftSoft),
                    LogicalDirection::Straight => {}
                }
                out.push(DriveCommand::Reverse);
            }
            return out;
        };

        out.push(DriveCommand::Forward);
        if let Some(logical) = label.logical() {
            self.logical = logical;
        }
        self.no_line_handled = false;

        if self.last_sent != Some(command) {
            self.last_sent = Some(command);
            out.push(command);
        }

        out
    }

    /// Last directional command transmitted.
    pub fn last_sent(&self) -> Option<DriveCommand> {
        self.last_sent
    }

    /// Last known line-following bias.
    pub fn logical(&self) -> LogicalDirection {
        self.logical
    }
}

/// The directional command a label maps to; `None` for a lost line.
fn steering_command(label: DirectionLabel) -> Option<DriveCommand> {
    match label {
        DirectionLabel::Straight => Some(DriveCommand::Straight),
        DirectionLabel::Left => Some(DriveCommand::LeftSoft),
        DirectionLabel::Right => Some(DriveCommand::RightSoft),
        DirectionLabel::LeftHard => Some(DriveCommand::LeftHard),
        DirectionLabel::RightHard => Some(DriveCommand::RightHard),
        DirectionLabel::NoLine => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use DirectionLabel::*;
    use DriveCommand::{Forward, LeftSoft, Reverse, RightSoft};

    fn run(arbiter: &mut CommandArbiter, labels: &[DirectionLabel]) -> Vec<Vec<DriveCommand>> {
        labels.iter().map(|&label| arbiter.step(label)).collect()
    }

    #[test]
    fn test_identical_labels_deduplicate_but_refresh_forward() {
        let mut arbiter = CommandArbiter::new();
        let emissions = run(&mut arbiter, &[Straight, Straight, Straight]);
        assert_eq!(emissions[0], vec![Forward, DriveCommand::Straight]);
        assert_eq!(emissions[1], vec![Forward]);
        assert_eq!(emissions[2], vec![Forward]);
    }

    #[test]
    fn test_direction_change_re_emits() {
        let mut arbiter = CommandArbiter::new();
        let emissions = run(&mut arbiter, &[Left, Right, Right]);
        assert_eq!(emissions[0], vec![Forward, LeftSoft]);
        assert_eq!(emissions[1], vec![Forward, RightSoft]);
        assert_eq!(emissions[2], vec![Forward]);
    }

    #[test]
    fn test_hard_turns_map_to_hard_commands_and_soft_bias() {
        let mut arbiter = CommandArbiter::new();
        assert_eq!(arbiter.step(LeftHard), vec![Forward, DriveCommand::LeftHard]);
        assert_eq!(arbiter.logical(), LogicalDirection::Left);

        assert_eq!(
            arbiter.step(RightHard),
            vec![Forward, DriveCommand::RightHard]
        );
        assert_eq!(arbiter.logical(), LogicalDirection::Right);
    }

    #[test]
    fn test_lost_line_recovery_runs_once_per_streak() {
        let mut arbiter = CommandArbiter::new();
        arbiter.step(Left);

        let emissions = run(&mut arbiter, &[NoLine, NoLine, NoLine, NoLine]);
        assert_eq!(emissions[0], vec![RightSoft, Reverse]);
        assert!(emissions[1..].iter().all(Vec::is_empty));
    }

    #[test]
    fn test_recovery_steers_against_right_bias() {
        let mut arbiter = CommandArbiter::new();
        arbiter.step(Right);
        assert_eq!(arbiter.step(NoLine), vec![LeftSoft, Reverse]);
    }

    #[test]
    fn test_recovery_with_straight_bias_only_reverses() {
        let mut arbiter = CommandArbiter::new();
        assert_eq!(arbiter.step(NoLine), vec![Reverse]);
    }

    #[test]
    fn test_new_streak_recovers_again_after_line_reacquired() {
        let mut arbiter = CommandArbiter::new();
        arbiter.step(Left);
        assert_eq!(arbiter.step(NoLine), vec![RightSoft, Reverse]);
        arbiter.step(Left);
        assert_eq!(arbiter.step(NoLine), vec![RightSoft, Reverse]);
    }

    #[test]
    fn test_full_scenario_sequence() {
        // [STRAIGHT, STRAIGHT, LEFT, NO_LINE, NO_LINE, RIGHT] from a fresh
        // arbiter: dedup suppresses the repeated STRAIGHT, the lost-line pair
        // fires once, and reacquisition resumes normally.
        let mut arbiter = CommandArbiter::new();
        let emissions = run(
            &mut arbiter,
            &[Straight, Straight, Left, NoLine, NoLine, Right],
        );
        assert_eq!(emissions[0], vec![Forward, DriveCommand::Straight]);
        assert_eq!(emissions[1], vec![Forward]);
        assert_eq!(emissions[2], vec![Forward, LeftSoft]);
        assert_eq!(emissions[3], vec![RightSoft, Reverse]);
        assert_eq!(emissions[4], vec![]);
        assert_eq!(emissions[5], vec![Forward, RightSoft]);
    }

    #[test]
    fn test_last_sent_survives_a_pause_in_stepping() {
        // The orchestrator stops calling step() while in manual mode; the
        // dedup state intentionally carries across the gap.
        let mut arbiter = CommandArbiter::new();
        assert_eq!(arbiter.step(Left), vec![Forward, LeftSoft]);

        // Mode flipped to manual and back; same label resumes suppressed.
        assert_eq!(arbiter.step(Left), vec![Forward]);
        assert_eq!(arbiter.last_sent(), Some(LeftSoft));
    }

    #[test]
    fn test_recovery_does_not_disturb_dedup_state() {
        let mut arbiter = CommandArbiter::new();
        arbiter.step(Left);
        arbiter.step(NoLine);
        // RightSoft was emitted as recovery, not recorded: a RIGHT label
        // afterwards must still emit RightSoft.
        assert_eq!(arbiter.step(Right), vec![Forward, RightSoft]);
    }
}
