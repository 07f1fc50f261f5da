//! Velox - Tracked Rover Firmware
//!
//! Main firmware binary for RP2040-based rover boards. A joystick on the
//! other end of a serial link streams fixed-size packets; each one is
//! decoded into tank-drive settings for a DRV8833 dual H-bridge.
//!
//! Named after the Latin "velox" meaning "swift".
//!
//! # Pins
//!
//! | GPIO | Function           |
//! |------|--------------------|
//! | 0    | UART0 TX           |
//! | 1    | UART0 RX           |
//! | 2/3  | Left motor IN1/IN2 |
//! | 6/7  | Right motor IN1/IN2|

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::interrupt::{self, InterruptExt};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::uart::Uart;
use {defmt_rtt as _, panic_probe as _};

use velox_core::drive::DriveDecoder;
use velox_drivers::motor::Drv8833;
use velox_hal_rp2040::{embassy_config, Rp2040Uart, UartId, UartIrq};

use crate::config::{DRIVE, LINK, MOTORS, PACKET_SIZE, RX_CAPACITY, TX_CAPACITY};

mod channels;
mod config;
mod irq;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Velox firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Setup UART0 for the joystick link. The embassy driver only brings the
    // peripheral up; the interrupt handler drives the registers from here on.
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, embassy_config(&LINK.uart));
    core::mem::forget(uart);

    let mut port = Rp2040Uart::new(UartId::Uart0);
    port.set_tx_interrupt(false);
    port.clear_errors();
    port.set_rx_interrupt(true);

    interrupt::UART0_IRQ.unpend();
    // SAFETY: the handler only touches state behind Uart0IrqMutex
    unsafe { interrupt::UART0_IRQ.enable() };

    info!(
        "UART0 initialized: {} baud, {} byte packets, queues {}/{}",
        LINK.uart.baudrate, PACKET_SIZE, RX_CAPACITY, TX_CAPACITY
    );

    // Setup PWM for the DRV8833
    let pwm_config = {
        let mut cfg = PwmConfig::default();
        cfg.top = DRIVE.pwm_top;
        cfg.divider = DRIVE.pwm_divider.into();
        cfg
    };
    let left = Pwm::new_output_ab(p.PWM_SLICE1, p.PIN_2, p.PIN_3, pwm_config.clone());
    let right = Pwm::new_output_ab(p.PWM_SLICE3, p.PIN_6, p.PIN_7, pwm_config);
    let (left_in1, left_in2) = left.split();
    let (right_in1, right_in2) = right.split();

    let motors = Drv8833::new(
        unwrap!(left_in1),
        unwrap!(left_in2),
        unwrap!(right_in1),
        unwrap!(right_in2),
        MOTORS,
    );

    info!(
        "PWM initialized: top={} divider={} min_duty={}",
        DRIVE.pwm_top, DRIVE.pwm_divider, MOTORS.min_duty
    );

    // Spawn tasks
    spawner.spawn(unwrap!(tasks::status_task()));
    spawner.spawn(unwrap!(tasks::drive_task(motors, DRIVE.link_timeout_ms)));
    spawner.spawn(unwrap!(tasks::link_rx_task(DriveDecoder::new(&DRIVE))));

    info!("All tasks spawned, firmware running");
}
