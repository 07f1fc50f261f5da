//! Velox Hardware Abstraction Layer
//!
//! This crate defines hardware abstraction traits that chip-specific HALs
//! implement, so the link service in velox-core runs unchanged on the
//! target and in host tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (velox-firmware)           │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  velox-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │  velox-hal-   │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::UartIrq`] - Interrupt-driven serial port
//!
//! PWM outputs use `embedded_hal::pwm::SetDutyCycle` directly.

#![no_std]
#![deny(unsafe_code)]

pub mod uart;

pub use uart::{LineError, UartConfig, UartIrq};
