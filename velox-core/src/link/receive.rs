//! Main-loop side of the RX path

use velox_protocol::{FrameAssembler, RingBuffer};

/// Bytes moved out of the RX queue per critical section
pub const RX_CHUNK: usize = 16;

/// Turns drained RX bytes into packets
///
/// Owned by the main loop; one per link.
#[derive(Debug, Clone, Default)]
pub struct PacketReceiver<const N: usize, const L: usize> {
    assembler: FrameAssembler<N, L>,
    packets: u32,
}

impl<const N: usize, const L: usize> PacketReceiver<N, L> {
    /// Create a receiver at the start of a packet
    pub const fn new() -> Self {
        Self {
            assembler: FrameAssembler::new(),
            packets: 0,
        }
    }

    /// Feed a chunk drained from the RX queue
    ///
    /// Every packet the chunk completes is passed to `on_packet`, including
    /// packets already staged from earlier chunks. Returns the number of
    /// packets emitted.
    pub fn poll(&mut self, chunk: &[u8], on_packet: impl FnMut([u8; N])) -> usize {
        let emitted = self.assembler.feed_all(chunk, on_packet);
        self.packets = self.packets.wrapping_add(emitted as u32);
        emitted
    }

    /// Drain a queue owned by this context and feed everything in it
    ///
    /// For queues shared with an interrupt, drain under the interrupt mask
    /// in chunks and call [`poll`](Self::poll) outside it instead.
    pub fn drain<const C: usize>(
        &mut self,
        rx: &mut RingBuffer<C>,
        mut on_packet: impl FnMut([u8; N]),
    ) -> usize {
        let mut chunk = [0u8; RX_CHUNK];
        let mut emitted = 0;
        loop {
            let n = rx.drain_into(&mut chunk);
            if n == 0 {
                break;
            }
            emitted += self.poll(&chunk[..n], &mut on_packet);
        }
        emitted
    }

    /// Total packets emitted since creation
    pub fn packets(&self) -> u32 {
        self.packets
    }

    /// Get the underlying assembler
    pub fn assembler(&self) -> &FrameAssembler<N, L> {
        &self.assembler
    }

    /// Restart framing from the next received byte
    pub fn reset(&mut self) {
        self.assembler.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LinkConfig;
    use crate::drive::{DriveDecoder, MotorSettings};
    use crate::link::mock::MockPort;
    use crate::link::service::{service_interrupt, LinkStats};
    use heapless::Vec;
    use velox_protocol::JoystickPacket;

    #[test]
    fn test_poll_counts_packets() {
        let mut receiver = PacketReceiver::<3, 3>::new();
        let mut packets: Vec<[u8; 3], 4> = Vec::new();

        assert_eq!(receiver.poll(&[1, 2], |p| packets.push(p).unwrap()), 0);
        assert_eq!(receiver.poll(&[3, 4, 5, 6, 7], |p| packets.push(p).unwrap()), 2);
        assert_eq!(receiver.packets(), 2);
        assert_eq!(receiver.assembler().written(), 1);
        assert_eq!(packets.as_slice(), &[[1, 2, 3], [4, 5, 6]]);
    }

    #[test]
    fn test_drain_larger_than_chunk() {
        let mut receiver = PacketReceiver::<8, 8>::new();
        let mut rx = RingBuffer::<64>::new();
        for i in 0..40u8 {
            rx.enqueue(i).unwrap();
        }

        let mut seen: Vec<u8, 64> = Vec::new();
        let n = receiver.drain(&mut rx, |p| seen.extend_from_slice(&p).unwrap());

        assert_eq!(n, 5);
        assert!(rx.is_empty());
        assert_eq!(seen.len(), 40);
        assert!(seen.iter().enumerate().all(|(i, &b)| b == i as u8));
    }

    #[test]
    fn test_interrupt_to_motor_settings() {
        let mut port = MockPort::new();
        let mut rx = RingBuffer::<50>::new();
        let mut tx = RingBuffer::<50>::new();
        let mut stats = LinkStats::default();
        let mut receiver = PacketReceiver::<3, 3>::new();
        let decoder = DriveDecoder::default();
        let mut settings: Vec<MotorSettings, 4> = Vec::new();

        // Two packets arriving split across three interrupts
        let stream = [128, 255, 0, 128, 128, 1];
        for part in [&stream[..1], &stream[1..4], &stream[4..]] {
            port.receive(part);
            service_interrupt(&mut port, &mut rx, &mut tx, &LinkConfig::default(), &mut stats);
            receiver.drain(&mut rx, |p| {
                let packet = JoystickPacket::decode(&p).unwrap();
                settings.push(decoder.decode(&packet)).unwrap();
            });
        }

        assert_eq!(settings.len(), 2);
        assert_eq!(settings[0], MotorSettings::forward(100));
        assert!(settings[1].is_stopped());
    }

    #[test]
    fn test_reset_restarts_framing() {
        let mut receiver = PacketReceiver::<3, 3>::new();
        receiver.poll(&[1, 2], |_| {});
        receiver.reset();

        let mut got = None;
        receiver.poll(&[7, 8, 9], |p| got = Some(p));
        assert_eq!(got, Some([7, 8, 9]));
    }
}
