//! Tank drive output trait

use crate::drive::MotorSettings;

/// Errors that can occur when driving the motors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriveError {
    /// A PWM channel rejected the duty cycle
    Pwm,
}

/// Two-sided motor output
///
/// Implementations translate [`MotorSettings`] into H-bridge PWM duty
/// cycles.
pub trait TankDrive {
    /// Apply new settings to both sides
    fn apply(&mut self, settings: &MotorSettings) -> Result<(), DriveError>;

    /// Get the settings currently applied
    fn settings(&self) -> MotorSettings;

    /// Stop both sides
    fn stop(&mut self) -> Result<(), DriveError> {
        self.apply(&MotorSettings::STOPPED)
    }

    /// Check if both sides are stopped
    fn is_stopped(&self) -> bool {
        self.settings().is_stopped()
    }
}
