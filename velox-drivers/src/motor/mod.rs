//! Motor driver implementations
//!
//! - DRV8833: two H-bridges, each input pin on its own PWM channel

pub mod drv8833;

pub use drv8833::{Drv8833, Drv8833Config, HBridge};
