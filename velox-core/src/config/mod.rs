//! Configuration types
//!
//! Runtime configuration for the serial link and the drive decoder. Queue
//! capacities and the packet size are const generics chosen at build time;
//! the firmware reads them from its TOML config.

pub mod types;

pub use types::*;
