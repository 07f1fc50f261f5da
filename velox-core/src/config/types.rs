//! Link and drive configuration types
//!
//! Defaults match the stock rover: 9600 baud, 50-byte queues,
//! 3-byte joystick packets with the stick at rest reading 128.

use velox_hal::uart::UartConfig;
use velox_protocol::OverflowPolicy;

/// Default packet size in bytes
pub const DEFAULT_PACKET_SIZE: usize = 3;

/// Default RX/TX queue capacity in bytes
pub const DEFAULT_QUEUE_CAPACITY: usize = 50;

/// Default baud rate
pub const DEFAULT_BAUDRATE: u32 = 9600;

/// Serial link configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkConfig {
    /// UART line settings
    pub uart: UartConfig,
    /// What the RX interrupt does when the RX queue is full
    pub rx_policy: OverflowPolicy,
    /// What the main loop does when the TX queue is full
    pub tx_policy: OverflowPolicy,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            uart: UartConfig::with_baudrate(DEFAULT_BAUDRATE),
            rx_policy: OverflowPolicy::DropOldest,
            tx_policy: OverflowPolicy::DropNewest,
        }
    }
}

/// Drive decoder and motor output configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriveConfig {
    /// Raw axis reading with the stick at rest
    pub center: u8,
    /// Axis offsets up to this magnitude are treated as zero
    pub dead_zone: u8,
    /// Axis offsets are clamped to +/- this value before scaling (min 1)
    pub axis_limit: u8,
    /// Stop the motors when no packet arrives for this long (0 = never)
    pub link_timeout_ms: u32,
    /// PWM counter top value
    pub pwm_top: u16,
    /// PWM clock divider
    pub pwm_divider: u8,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            center: 128,
            dead_zone: 8,
            axis_limit: 127,
            link_timeout_ms: 500,
            // 125 MHz / 10 / 25000 = 500 Hz
            pwm_top: 24_999,
            pwm_divider: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_defaults() {
        let config = LinkConfig::default();
        assert_eq!(config.uart.baudrate, 9600);
        assert_eq!(config.rx_policy, OverflowPolicy::DropOldest);
        assert_eq!(config.tx_policy, OverflowPolicy::DropNewest);
    }

    #[test]
    fn test_drive_defaults() {
        let config = DriveConfig::default();
        assert_eq!(config.center, 128);
        assert!(config.axis_limit > config.dead_zone);
    }
}
