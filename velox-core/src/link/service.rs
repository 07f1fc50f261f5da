//! UART interrupt service routine logic
//!
//! Called from the UART interrupt with the RX and TX queues borrowed. The
//! loops are bounded by the peripheral's FIFO depth.

use velox_hal::uart::UartIrq;
use velox_protocol::{Admission, OverflowPolicy, RingBuffer};

use crate::config::LinkConfig;

/// Link traffic and loss counters
///
/// All counters wrap on overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkStats {
    /// Bytes read from the UART
    pub received: u32,
    /// Bytes written to the UART
    pub transmitted: u32,
    /// Old RX bytes evicted to make room for new ones
    pub rx_evicted: u32,
    /// New RX bytes rejected by a full queue
    pub rx_rejected: u32,
    /// TX bytes lost to a full queue
    pub tx_dropped: u32,
    /// Received bytes discarded for overrun/framing/parity/break
    pub line_errors: u32,
}

impl LinkStats {
    /// All counters at zero
    pub const fn new() -> Self {
        Self {
            received: 0,
            transmitted: 0,
            rx_evicted: 0,
            rx_rejected: 0,
            tx_dropped: 0,
            line_errors: 0,
        }
    }

    /// Total received bytes that never reached the RX queue consumer
    pub fn rx_lost(&self) -> u32 {
        self.rx_evicted
            .wrapping_add(self.rx_rejected)
            .wrapping_add(self.line_errors)
    }

    pub(crate) fn count_rx(&mut self, admission: Admission) {
        match admission {
            Admission::Stored => {}
            Admission::Evicted(_) => self.rx_evicted = self.rx_evicted.wrapping_add(1),
            Admission::Rejected(_) => self.rx_rejected = self.rx_rejected.wrapping_add(1),
        }
    }
}

/// Service every pending UART event
///
/// Transmit first so the TX FIFO refills as early as possible, then receive.
pub fn service_interrupt<P: UartIrq, const RX: usize, const TX: usize>(
    port: &mut P,
    rx: &mut RingBuffer<RX>,
    tx: &mut RingBuffer<TX>,
    config: &LinkConfig,
    stats: &mut LinkStats,
) {
    service_tx(port, tx, stats);
    service_rx(port, rx, config.rx_policy, stats);
}

/// Move queued bytes into the transmitter
///
/// Disables the transmit interrupt once the queue runs dry; the main loop
/// re-enables it after queueing more bytes.
pub fn service_tx<P: UartIrq, const TX: usize>(
    port: &mut P,
    tx: &mut RingBuffer<TX>,
    stats: &mut LinkStats,
) {
    while port.tx_ready() {
        match tx.pop() {
            Some(byte) => {
                port.write(byte);
                stats.transmitted = stats.transmitted.wrapping_add(1);
            }
            None => {
                port.set_tx_interrupt(false);
                break;
            }
        }
    }
}

/// Move received bytes into the RX queue under `policy`
pub fn service_rx<P: UartIrq, const RX: usize>(
    port: &mut P,
    rx: &mut RingBuffer<RX>,
    policy: OverflowPolicy,
    stats: &mut LinkStats,
) {
    while port.rx_ready() {
        match port.read() {
            Ok(byte) => {
                stats.received = stats.received.wrapping_add(1);
                stats.count_rx(policy.enqueue(rx, byte));
            }
            Err(_) => {
                stats.line_errors = stats.line_errors.wrapping_add(1);
                port.clear_errors();
            }
        }
    }
}
