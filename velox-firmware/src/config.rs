//! Build-time configuration
//!
//! Constants generated by build.rs from velox.toml.

include!(concat!(env!("OUT_DIR"), "/velox_config.rs"));
