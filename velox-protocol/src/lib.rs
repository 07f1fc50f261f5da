//! Velox Serial Link Framing
//!
//! This crate holds the byte-stream plumbing between the UART and the drive
//! logic:
//!
//! - [`RingBuffer`]: fixed-capacity byte queue shared between the UART
//!   interrupt and the main loop, one per direction
//! - [`FrameAssembler`]: reassembles fixed-size packets from arbitrarily
//!   chunked input, carrying partial packets and surplus bytes across calls
//! - [`JoystickPacket`]: the decoded packet layout
//!
//! # Data Flow
//!
//! ```text
//! UART RX IRQ ──► RingBuffer (RX) ──► main loop ──► FrameAssembler ──► JoystickPacket
//! UART TX IRQ ◄── RingBuffer (TX) ◄── main loop ◄── telemetry text
//! ```
//!
//! Packets are framed by counting bytes from link start. There is no sync
//! byte, so the link cannot recover from lost bytes on its own.

#![no_std]
#![deny(unsafe_code)]

pub mod frame;
pub mod packet;
pub mod ring;

pub use frame::{Assembler, Assembly, FrameAssembler};
pub use packet::{JoystickPacket, PacketError};
pub use ring::{Admission, OverflowPolicy, QueueFull, RingBuffer};
