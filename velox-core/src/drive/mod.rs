//! Tank drive command types
//!
//! The rover steers like a tank: a left and a right side, each with a
//! direction and a speed percentage. Joystick packets are decoded into
//! [`MotorSettings`] by [`DriveDecoder`].

pub mod decoder;
pub mod report;

pub use decoder::{constrain, map, normalise, DriveDecoder};
pub use report::{format_settings, BANNER, REPORT_LEN};

/// Rotation direction of one side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

/// Command byte carried in each joystick packet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Drive according to the joystick axes
    Drive,
    /// Stop both sides regardless of the axes
    Stop,
    /// Unrecognized command, treated as stop
    Unknown(u8),
}

impl From<u8> for Command {
    fn from(byte: u8) -> Self {
        match byte {
            0x00 => Command::Drive,
            0x01 => Command::Stop,
            other => Command::Unknown(other),
        }
    }
}

/// Direction and speed (0-100%) for both sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorSettings {
    pub left_dir: Direction,
    pub left_speed: u8,
    pub right_dir: Direction,
    pub right_speed: u8,
}

impl MotorSettings {
    /// Both sides stopped
    pub const STOPPED: Self = Self::new(Direction::Forward, 0, Direction::Forward, 0);

    /// Create settings, clamping speeds to 100%
    pub const fn new(left_dir: Direction, left_speed: u8, right_dir: Direction, right_speed: u8) -> Self {
        Self {
            left_dir,
            left_speed: if left_speed > 100 { 100 } else { left_speed },
            right_dir,
            right_speed: if right_speed > 100 { 100 } else { right_speed },
        }
    }

    /// Both sides forward
    pub const fn forward(speed: u8) -> Self {
        Self::new(Direction::Forward, speed, Direction::Forward, speed)
    }

    /// Both sides backward
    pub const fn backward(speed: u8) -> Self {
        Self::new(Direction::Backward, speed, Direction::Backward, speed)
    }

    /// Spin on the spot, counter-clockwise seen from above
    pub const fn rotate_left(speed: u8) -> Self {
        Self::new(Direction::Backward, speed, Direction::Forward, speed)
    }

    /// Spin on the spot, clockwise seen from above
    pub const fn rotate_right(speed: u8) -> Self {
        Self::new(Direction::Forward, speed, Direction::Backward, speed)
    }

    /// Arc left: left side at half speed
    pub const fn curve_left(speed: u8) -> Self {
        Self::new(Direction::Forward, speed / 2, Direction::Forward, speed)
    }

    /// Arc right: right side at half speed
    pub const fn curve_right(speed: u8) -> Self {
        Self::new(Direction::Forward, speed, Direction::Forward, speed / 2)
    }

    /// Check if both sides are at zero speed
    pub const fn is_stopped(&self) -> bool {
        self.left_speed == 0 && self.right_speed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_from_byte() {
        assert_eq!(Command::from(0x00), Command::Drive);
        assert_eq!(Command::from(0x01), Command::Stop);
        assert_eq!(Command::from(0x7F), Command::Unknown(0x7F));
    }

    #[test]
    fn test_speed_clamped() {
        let settings = MotorSettings::forward(250);
        assert_eq!(settings.left_speed, 100);
        assert_eq!(settings.right_speed, 100);
    }

    #[test]
    fn test_curves_halve_inner_side() {
        let left = MotorSettings::curve_left(60);
        assert_eq!((left.left_speed, left.right_speed), (30, 60));

        let right = MotorSettings::curve_right(60);
        assert_eq!((right.left_speed, right.right_speed), (60, 30));
    }

    #[test]
    fn test_rotations_oppose_sides() {
        let ccw = MotorSettings::rotate_left(40);
        assert_eq!(ccw.left_dir, Direction::Backward);
        assert_eq!(ccw.right_dir, Direction::Forward);

        let cw = MotorSettings::rotate_right(40);
        assert_eq!(cw.left_dir, Direction::Forward);
        assert_eq!(cw.right_dir, Direction::Backward);
        assert!(MotorSettings::STOPPED.is_stopped());
    }
}
