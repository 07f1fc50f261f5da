//! RP2040-specific HAL for the rover firmware
//!
//! This crate provides RP2040-specific implementations of the shared
//! `velox-hal` traits, plus RP2040-specific functionality:
//!
//! - Interrupt-driven UART register access (implements `velox_hal::UartIrq`)
//! - Raw mutexes that mask a single UART interrupt

#![no_std]

pub mod irq;
pub mod uart;

pub use irq::{Uart0IrqMutex, Uart1IrqMutex};
pub use uart::{embassy_config, Rp2040Uart, UartId};

// Re-export shared traits from velox-hal for convenience
pub use velox_hal::{LineError, UartConfig, UartIrq};
