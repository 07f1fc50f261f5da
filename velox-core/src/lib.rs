//! Board-agnostic core logic for the rover firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Link and drive configuration types
//! - UART interrupt service logic and the main-loop packet receiver
//! - Joystick packet to motor settings decoding
//! - Telemetry formatting
//! - Motor output trait

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod drive;
pub mod link;
pub mod traits;
