//! Joystick packet to tank drive decoding
//!
//! For each axis: subtract the rest position, zero out the dead zone, clamp
//! to the axis limit. The two axes are then mixed into side values
//! (`left = y + x`, `right = y - x`), clamped again and rescaled to a
//! 0-100% duty with the sign selecting the direction.
//!
//! `y` above the rest position drives forward, `x` above it turns right.

use velox_protocol::JoystickPacket;

use super::{Command, Direction, MotorSettings};
use crate::config::DriveConfig;

/// Offset of a raw axis reading from the rest position
pub fn normalise(raw: u8, center: u8) -> i16 {
    raw as i16 - center as i16
}

/// Clamp `value` to `[low, high]`
pub fn constrain(value: i16, low: i16, high: i16) -> i16 {
    if value < low {
        low
    } else if value > high {
        high
    } else {
        value
    }
}

/// Linearly rescale `x` from one range to another (truncating)
///
/// `in_min` and `in_max` must differ.
pub fn map(x: i32, in_min: i32, in_max: i32, out_min: i32, out_max: i32) -> i32 {
    (x - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

/// Converts joystick packets into motor settings
#[derive(Debug, Clone, Copy)]
pub struct DriveDecoder {
    center: u8,
    dead_zone: i16,
    limit: i16,
}

impl Default for DriveDecoder {
    fn default() -> Self {
        Self::new(&DriveConfig::default())
    }
}

impl DriveDecoder {
    /// Create a decoder from the drive configuration
    pub fn new(config: &DriveConfig) -> Self {
        Self {
            center: config.center,
            dead_zone: config.dead_zone as i16,
            limit: config.axis_limit.max(1) as i16,
        }
    }

    /// Decode one packet
    ///
    /// Stop and unknown commands yield [`MotorSettings::STOPPED`].
    pub fn decode(&self, packet: &JoystickPacket) -> MotorSettings {
        match Command::from(packet.command) {
            Command::Drive => {}
            Command::Stop | Command::Unknown(_) => return MotorSettings::STOPPED,
        }

        let x = self.axis(packet.x);
        let y = self.axis(packet.y);

        let left = constrain(y + x, -self.limit, self.limit);
        let right = constrain(y - x, -self.limit, self.limit);

        let (left_dir, left_speed) = self.side(left);
        let (right_dir, right_speed) = self.side(right);
        MotorSettings::new(left_dir, left_speed, right_dir, right_speed)
    }

    /// Normalised, dead-zoned and clamped axis value
    fn axis(&self, raw: u8) -> i16 {
        let offset = normalise(raw, self.center);
        if offset.abs() <= self.dead_zone {
            0
        } else {
            constrain(offset, -self.limit, self.limit)
        }
    }

    /// Direction and duty percentage for a mixed side value
    fn side(&self, value: i16) -> (Direction, u8) {
        let dir = if value < 0 {
            Direction::Backward
        } else {
            Direction::Forward
        };
        let speed = map(value.unsigned_abs() as i32, 0, self.limit as i32, 0, 100);
        (dir, speed.clamp(0, 100) as u8)
    }
}
