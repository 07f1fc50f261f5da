//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in velox-core:
//!
//! - Motor drivers (DRV8833 dual H-bridge over PWM)

#![no_std]
#![deny(unsafe_code)]

pub mod motor;
