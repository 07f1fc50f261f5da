//! Serial link service
//!
//! Two execution contexts share each link:
//!
//! - The UART interrupt runs [`service_interrupt`]: it is the only producer
//!   of the RX queue and the only consumer of the TX queue.
//! - The main loop drains the RX queue into a [`PacketReceiver`] and fills
//!   the TX queue through a [`Transmitter`].
//!
//! Each queue therefore has exactly one producer and one consumer. The main
//! loop must mask the UART interrupt (and only that interrupt) while it
//! touches a queue; the functions here take `&mut` and leave that to the
//! caller.

pub mod receive;
pub mod service;
pub mod transmit;

pub use receive::{PacketReceiver, RX_CHUNK};
pub use service::{service_interrupt, service_rx, service_tx, LinkStats};
pub use transmit::Transmitter;
