//! Drive task
//!
//! Applies decoded motor settings to the DRV8833 and stops the rover when
//! the link goes quiet.

use defmt::*;
use embassy_rp::pwm::PwmOutput;
use embassy_time::{with_timeout, Duration};

use velox_core::drive::MotorSettings;
use velox_core::traits::TankDrive;
use velox_drivers::motor::Drv8833;

use crate::channels::{DRIVE_CMD, REPORT};

/// Motor driver on the RP2040 PWM outputs
pub type Motors = Drv8833<PwmOutput<'static>>;

/// Drive task - applies settings and enforces the link timeout
///
/// With `link_timeout_ms == 0` the last settings stay applied indefinitely.
#[embassy_executor::task]
pub async fn drive_task(mut motors: Motors, link_timeout_ms: u32) {
    info!("Drive task started (link timeout {} ms)", link_timeout_ms);

    if let Err(e) = motors.stop() {
        error!("Failed to stop motors: {:?}", e);
    }

    let timeout = Duration::from_millis(link_timeout_ms as u64);

    loop {
        let settings = if link_timeout_ms == 0 {
            DRIVE_CMD.wait().await
        } else {
            match with_timeout(timeout, DRIVE_CMD.wait()).await {
                Ok(settings) => settings,
                Err(_) => {
                    if !motors.is_stopped() {
                        warn!("No packet for {} ms, stopping motors", link_timeout_ms);
                    }
                    MotorSettings::STOPPED
                }
            }
        };

        if settings == motors.settings() {
            continue;
        }

        match motors.apply(&settings) {
            Ok(()) => {
                debug!("Motors: {:?}", settings);
                REPORT.signal(settings);
            }
            Err(e) => {
                error!("Failed to apply motor settings: {:?}", e);
            }
        }
    }
}
