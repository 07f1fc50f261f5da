//! DRV8833 dual H-bridge driver
//!
//! Each side of the rover is one H-bridge with two inputs. Both inputs are
//! PWM channels: driving forward puts the duty on IN1 and holds IN2 low,
//! backward the other way around. Both low lets the motor coast.
//!
//! # Usage
//!
//! ```ignore
//! let mut drive = Drv8833::new(left_in1, left_in2, right_in1, right_in2, Drv8833Config::default());
//! drive.apply(&MotorSettings::curve_left(80))?;
//! ```

use embedded_hal::pwm::SetDutyCycle;
use velox_core::drive::{Direction, MotorSettings};
use velox_core::traits::{DriveError, TankDrive};

/// DRV8833 driver configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct Drv8833Config {
    /// Minimum duty cycle percentage (below this the motors won't turn)
    pub min_duty: u8,
    /// Left motor is mounted mirrored (swap forward/backward)
    pub invert_left: bool,
    /// Right motor is mounted mirrored (swap forward/backward)
    pub invert_right: bool,
}

/// One H-bridge: a pair of PWM inputs driving one motor
pub struct HBridge<P> {
    in1: P,
    in2: P,
    inverted: bool,
}

impl<P: SetDutyCycle> HBridge<P> {
    /// Create a bridge from its two inputs
    pub fn new(in1: P, in2: P, inverted: bool) -> Self {
        Self { in1, in2, inverted }
    }

    /// Drive the motor at `percent` duty in `dir`
    pub fn drive(&mut self, dir: Direction, percent: u8) -> Result<(), DriveError> {
        let forward = (dir == Direction::Forward) != self.inverted;
        let (active, idle) = if forward {
            (&mut self.in1, &mut self.in2)
        } else {
            (&mut self.in2, &mut self.in1)
        };

        // Release the opposite input first so both are never driven
        idle.set_duty_cycle_fully_off().map_err(|_| DriveError::Pwm)?;
        active
            .set_duty_cycle_percent(percent.min(100))
            .map_err(|_| DriveError::Pwm)
    }

    /// Let the motor coast
    pub fn coast(&mut self) -> Result<(), DriveError> {
        self.in1.set_duty_cycle_fully_off().map_err(|_| DriveError::Pwm)?;
        self.in2.set_duty_cycle_fully_off().map_err(|_| DriveError::Pwm)
    }

    /// Release the PWM channels
    pub fn release(self) -> (P, P) {
        (self.in1, self.in2)
    }
}

/// DRV8833 tank drive
pub struct Drv8833<P> {
    config: Drv8833Config,
    left: HBridge<P>,
    right: HBridge<P>,
    settings: MotorSettings,
}

impl<P: SetDutyCycle> Drv8833<P> {
    /// Create the driver; motors are not touched until the first `apply`
    pub fn new(left_in1: P, left_in2: P, right_in1: P, right_in2: P, config: Drv8833Config) -> Self {
        Self {
            left: HBridge::new(left_in1, left_in2, config.invert_left),
            right: HBridge::new(right_in1, right_in2, config.invert_right),
            config,
            settings: MotorSettings::STOPPED,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Drv8833Config {
        &self.config
    }

    /// Scale the speed percentage to actual duty cycle
    ///
    /// Maps 1-100% to min_duty-100%, so that 0% = off and 100% = full power.
    fn scale_duty(&self, speed: u8) -> u8 {
        if speed == 0 {
            0
        } else {
            let min = self.config.min_duty.min(100) as u32;
            let range = 100 - min;
            let scaled = min + (speed.min(100) as u32 * range / 100);
            scaled.min(100) as u8
        }
    }

    fn drive_side(bridge: &mut HBridge<P>, dir: Direction, duty: u8) -> Result<(), DriveError> {
        if duty == 0 {
            bridge.coast()
        } else {
            bridge.drive(dir, duty)
        }
    }
}

impl<P: SetDutyCycle> TankDrive for Drv8833<P> {
    fn apply(&mut self, settings: &MotorSettings) -> Result<(), DriveError> {
        let left_duty = self.scale_duty(settings.left_speed);
        let right_duty = self.scale_duty(settings.right_speed);

        Self::drive_side(&mut self.left, settings.left_dir, left_duty)?;
        Self::drive_side(&mut self.right, settings.right_dir, right_duty)?;

        self.settings = *settings;
        Ok(())
    }

    fn settings(&self) -> MotorSettings {
        self.settings
    }
}
