//! Main-loop side of the TX path
//!
//! ```ignore
//! // With the UART interrupt masked:
//! let accepted = transmitter.queue(&mut tx_queue, b"L+050 R+050\r\n", &mut stats);
//! transmitter.start(&mut port, &mut tx_queue, &mut stats);
//! ```

use velox_hal::uart::UartIrq;
use velox_protocol::{Admission, OverflowPolicy, RingBuffer};

use super::service::{service_tx, LinkStats};

/// Queues outgoing bytes and kicks the transmitter
#[derive(Debug, Clone, Copy, Default)]
pub struct Transmitter {
    policy: OverflowPolicy,
}

impl Transmitter {
    /// Create a transmitter with the given full-queue policy
    pub const fn new(policy: OverflowPolicy) -> Self {
        Self { policy }
    }

    /// Copy `bytes` into the TX queue
    ///
    /// With [`OverflowPolicy::DropNewest`] copying stops at the first byte
    /// that does not fit; the return value is the number of bytes accepted,
    /// so the caller may retry the rest later or give up on it. With
    /// [`OverflowPolicy::DropOldest`] every byte is accepted and evictions
    /// are counted as dropped.
    pub fn queue<const TX: usize>(
        &self,
        tx: &mut RingBuffer<TX>,
        bytes: &[u8],
        stats: &mut LinkStats,
    ) -> usize {
        let mut accepted = 0;
        for &byte in bytes {
            match self.policy.enqueue(tx, byte) {
                Admission::Stored => {}
                Admission::Evicted(_) => stats.tx_dropped = stats.tx_dropped.wrapping_add(1),
                Admission::Rejected(_) => break,
            }
            accepted += 1;
        }
        accepted
    }

    /// Record bytes the caller abandoned after a partial [`queue`](Self::queue)
    pub fn abandon(&self, count: usize, stats: &mut LinkStats) {
        stats.tx_dropped = stats.tx_dropped.wrapping_add(count as u32);
    }

    /// Start transmitting queued bytes
    ///
    /// Primes the hardware FIFO directly, since the transmit interrupt only
    /// fires when the FIFO level crosses its threshold, then enables the
    /// interrupt if bytes remain queued.
    pub fn start<P: UartIrq, const TX: usize>(
        &self,
        port: &mut P,
        tx: &mut RingBuffer<TX>,
        stats: &mut LinkStats,
    ) {
        service_tx(port, tx, stats);
        if !tx.is_empty() {
            port.set_tx_interrupt(true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::mock::{MockPort, TX_FIFO};
    use crate::link::service_interrupt;
    use crate::config::LinkConfig;

    #[test]
    fn test_queue_stops_when_full() {
        let transmitter = Transmitter::new(OverflowPolicy::DropNewest);
        let mut tx = RingBuffer::<4>::new();
        let mut stats = LinkStats::default();

        assert_eq!(transmitter.queue(&mut tx, b"hello", &mut stats), 4);
        assert!(tx.is_full());
        assert_eq!(stats.tx_dropped, 0);

        transmitter.abandon(1, &mut stats);
        assert_eq!(stats.tx_dropped, 1);
    }

    #[test]
    fn test_queue_drop_oldest_keeps_tail() {
        let transmitter = Transmitter::new(OverflowPolicy::DropOldest);
        let mut tx = RingBuffer::<3>::new();
        let mut stats = LinkStats::default();

        assert_eq!(transmitter.queue(&mut tx, b"abcde", &mut stats), 5);
        assert_eq!(stats.tx_dropped, 2);
        let mut out = [0u8; 3];
        tx.drain_into(&mut out);
        assert_eq!(&out, b"cde");
    }

    #[test]
    fn test_start_primes_fifo_then_interrupt_drains() {
        let transmitter = Transmitter::default();
        let mut port = MockPort::new();
        let mut rx = RingBuffer::<4>::new();
        let mut tx = RingBuffer::<16>::new();
        let mut stats = LinkStats::default();

        let message = b"L+050 R+050\r\n";
        assert_eq!(transmitter.queue(&mut tx, message, &mut stats), message.len());
        transmitter.start(&mut port, &mut tx, &mut stats);

        assert_eq!(port.tx_fifo.len(), TX_FIFO);
        assert!(port.tx_irq);

        // Each "transmit ready" interrupt refills the FIFO
        while port.tx_irq {
            port.shift_out();
            service_interrupt(&mut port, &mut rx, &mut tx, &LinkConfig::default(), &mut stats);
        }
        port.shift_out();

        assert_eq!(port.wire.as_slice(), message);
        assert_eq!(stats.transmitted as usize, message.len());
    }

    #[test]
    fn test_start_short_message_leaves_interrupt_off() {
        let transmitter = Transmitter::default();
        let mut port = MockPort::new();
        let mut tx = RingBuffer::<16>::new();
        let mut stats = LinkStats::default();

        transmitter.queue(&mut tx, b"ok", &mut stats);
        transmitter.start(&mut port, &mut tx, &mut stats);

        assert!(tx.is_empty());
        assert!(!port.tx_irq);
        assert_eq!(port.tx_fifo.as_slice(), b"ok");
    }
}
