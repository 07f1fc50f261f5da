//! Fixed-size packet reassembly
//!
//! The rover link has no start byte, length or checksum. Packets are framed
//! purely by position: every `N` bytes counted from link initialization form
//! one packet. The assembler accepts the byte stream in whatever chunks the
//! receive path hands it and emits whole packets.
//!
//! The protocol provides no resynchronization: a byte lost anywhere upstream
//! (for example through RX queue eviction) shifts every later packet boundary.
//!
//! # Leftover bytes
//!
//! [`FrameAssembler::feed`] returns at most one packet per call. Bytes in the
//! chunk beyond what the current packet needed are staged in a leftover store
//! of capacity `L` and become the prefix of the next packet. When the staged
//! bytes already cover a whole packet, [`FrameAssembler::has_pending_packet`]
//! is set and feeding an empty chunk releases it. [`FrameAssembler::feed_all`]
//! performs that re-loop and never grows the leftover store.

use heapless::Deque;

/// Result of feeding bytes to a [`FrameAssembler`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assembly<const N: usize> {
    /// Fewer than `N` bytes since the last complete packet
    Incomplete,
    /// A full packet, copied out of the assembler
    Complete([u8; N]),
}

impl<const N: usize> Assembly<N> {
    /// Get the packet if one was completed
    pub fn packet(self) -> Option<[u8; N]> {
        match self {
            Assembly::Complete(packet) => Some(packet),
            Assembly::Incomplete => None,
        }
    }

    /// Check if a packet was completed
    pub fn is_complete(&self) -> bool {
        matches!(self, Assembly::Complete(_))
    }
}

#[cfg(feature = "defmt")]
impl<const N: usize> defmt::Format for Assembly<N> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Assembly::Incomplete => defmt::write!(f, "Incomplete"),
            Assembly::Complete(packet) => defmt::write!(f, "Complete({})", packet.as_slice()),
        }
    }
}

/// Assembler whose leftover store holds exactly one packet
pub type Assembler<const N: usize> = FrameAssembler<N, N>;

/// Reassembles `N`-byte packets from an arbitrarily chunked byte stream
///
/// One instance per independent stream. `L` is the leftover capacity and must
/// be at least `N`.
#[derive(Debug, Clone)]
pub struct FrameAssembler<const N: usize, const L: usize> {
    /// Packet being filled
    packet: [u8; N],
    /// Bytes of `packet` filled so far, always `< N` between calls
    written: usize,
    /// Bytes that arrived for the next packet, oldest first
    leftover: Deque<u8, L>,
    /// Surplus bytes that did not fit in `leftover`
    overrun: usize,
}

impl<const N: usize, const L: usize> Default for FrameAssembler<N, L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize, const L: usize> FrameAssembler<N, L> {
    const VALID_SIZES: () = {
        assert!(N > 0, "packet size must be non-zero");
        assert!(L >= N, "leftover capacity must hold at least one packet");
    };

    /// Create an assembler positioned at the start of a packet
    pub const fn new() -> Self {
        let () = Self::VALID_SIZES;
        Self {
            packet: [0; N],
            written: 0,
            leftover: Deque::new(),
            overrun: 0,
        }
    }

    /// Packet size in bytes
    pub const fn packet_size(&self) -> usize {
        N
    }

    /// Bytes of the current packet filled so far
    pub fn written(&self) -> usize {
        self.written
    }

    /// Bytes staged for upcoming packets
    pub fn leftover_len(&self) -> usize {
        self.leftover.len()
    }

    /// Check if staged bytes are waiting to be copied into a packet
    pub fn leftover_pending(&self) -> bool {
        !self.leftover.is_empty()
    }

    /// Check if staged bytes already complete the current packet
    pub fn has_pending_packet(&self) -> bool {
        self.written + self.leftover.len() >= N
    }

    /// Number of surplus bytes dropped because the leftover store was full
    pub fn overrun(&self) -> usize {
        self.overrun
    }

    /// Bytes still needed from the stream to complete the current packet
    pub fn needed(&self) -> usize {
        (N - self.written).saturating_sub(self.leftover.len())
    }

    /// Drop any partial packet and staged bytes
    pub fn reset(&mut self) {
        self.packet = [0; N];
        self.written = 0;
        self.leftover.clear();
        self.overrun = 0;
    }

    /// Feed a chunk of the stream
    ///
    /// Staged leftover bytes are consumed first, then as much of `chunk` as
    /// the current packet needs. The rest of `chunk` is staged for the next
    /// packet. Returns at most one packet.
    pub fn feed(&mut self, chunk: &[u8]) -> Assembly<N> {
        while self.written < N {
            match self.leftover.pop_front() {
                Some(byte) => {
                    self.packet[self.written] = byte;
                    self.written += 1;
                }
                None => break,
            }
        }

        let take = (N - self.written).min(chunk.len());
        let (head, surplus) = chunk.split_at(take);
        self.packet[self.written..self.written + take].copy_from_slice(head);
        self.written += take;

        for &byte in surplus {
            if self.leftover.push_back(byte).is_err() {
                self.overrun += 1;
            }
        }

        if self.written == N {
            self.written = 0;
            Assembly::Complete(core::mem::replace(&mut self.packet, [0; N]))
        } else {
            Assembly::Incomplete
        }
    }

    /// Feed a chunk and emit every packet it completes
    ///
    /// The chunk is fed in pieces no larger than the current packet needs,
    /// so nothing new is staged, and already staged packets are released
    /// before returning. Returns the number of packets passed to `on_packet`.
    pub fn feed_all(&mut self, mut chunk: &[u8], mut on_packet: impl FnMut([u8; N])) -> usize {
        let mut emitted = 0;

        loop {
            let (piece, rest) = chunk.split_at(self.needed().min(chunk.len()));
            chunk = rest;

            if let Assembly::Complete(packet) = self.feed(piece) {
                emitted += 1;
                on_packet(packet);
            }

            if chunk.is_empty() && !self.has_pending_packet() {
                break;
            }
        }

        emitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;

    #[test]
    fn test_partial_then_complete_with_leftover() {
        let mut asm = FrameAssembler::<3, 6>::new();

        assert_eq!(asm.feed(&[0x01, 0x02]), Assembly::Incomplete);
        assert_eq!(asm.written(), 2);

        assert_eq!(
            asm.feed(&[0x03, 0x04, 0x05, 0x06]),
            Assembly::Complete([0x01, 0x02, 0x03])
        );
        assert_eq!(asm.written(), 0);
        assert_eq!(asm.leftover_len(), 3);
        assert!(asm.has_pending_packet());

        // Staged bytes form the next packet without new input
        assert_eq!(asm.feed(&[]), Assembly::Complete([0x04, 0x05, 0x06]));
        assert_eq!(asm.leftover_len(), 0);
        assert!(!asm.leftover_pending());
        assert!(!asm.has_pending_packet());
    }

    #[test]
    fn test_feed_all_drains_pending_packets() {
        let mut asm = Assembler::<3>::new();
        let mut packets: Vec<[u8; 3], 4> = Vec::new();

        let n = asm.feed_all(&[0x01, 0x02], |p| packets.push(p).unwrap());
        assert_eq!(n, 0);

        let n = asm.feed_all(&[0x03, 0x04, 0x05, 0x06], |p| packets.push(p).unwrap());
        assert_eq!(n, 2);
        assert_eq!(packets.as_slice(), &[[0x01, 0x02, 0x03], [0x04, 0x05, 0x06]]);
        assert_eq!(asm.written(), 0);
        assert_eq!(asm.leftover_len(), 0);
    }

    #[test]
    fn test_exact_fill_leaves_nothing() {
        let mut asm = Assembler::<4>::new();
        assert_eq!(asm.feed(&[9, 8, 7, 6]), Assembly::Complete([9, 8, 7, 6]));
        assert_eq!(asm.leftover_len(), 0);
        assert!(!asm.has_pending_packet());
    }

    #[test]
    fn test_one_byte_at_a_time() {
        let mut asm = Assembler::<3>::new();
        let stream = [10u8, 11, 12, 13, 14, 15];
        let mut packets: Vec<[u8; 3], 2> = Vec::new();

        for byte in stream {
            if let Some(p) = asm.feed(&[byte]).packet() {
                packets.push(p).unwrap();
            }
        }

        assert_eq!(packets.as_slice(), &[[10, 11, 12], [13, 14, 15]]);
    }

    #[test]
    fn test_leftover_is_prefix_of_next_packet() {
        let mut asm = FrameAssembler::<4, 8>::new();

        // 4 + 2 bytes: one packet, two staged
        assert_eq!(asm.feed(&[1, 2, 3, 4, 5, 6]), Assembly::Complete([1, 2, 3, 4]));
        assert_eq!(asm.leftover_len(), 2);
        assert!(!asm.has_pending_packet());
        assert_eq!(asm.needed(), 2);

        assert_eq!(asm.feed(&[7]), Assembly::Incomplete);
        assert_eq!(asm.written(), 3);
        assert_eq!(asm.feed(&[8, 9]), Assembly::Complete([5, 6, 7, 8]));
        assert_eq!(asm.leftover_len(), 1);
    }

    #[test]
    fn test_leftover_consumed_in_order_across_partial_packets() {
        let mut asm = FrameAssembler::<4, 8>::new();

        assert_eq!(asm.feed(&[1, 2]), Assembly::Incomplete);
        // Completes [1,2,3,4], stages 5..=9 which already covers a packet
        assert_eq!(asm.feed(&[3, 4, 5, 6, 7, 8, 9]), Assembly::Complete([1, 2, 3, 4]));
        assert!(asm.has_pending_packet());
        // New input goes behind the staged bytes
        assert_eq!(asm.feed(&[10]), Assembly::Complete([5, 6, 7, 8]));
        assert_eq!(asm.leftover_len(), 2);
        assert_eq!(asm.feed(&[11, 12]), Assembly::Complete([9, 10, 11, 12]));
        assert_eq!(asm.leftover_len(), 0);
    }

    #[test]
    fn test_feed_all_handles_oversized_chunk_with_minimal_leftover() {
        let mut asm = Assembler::<3>::new();
        let mut seen: Vec<u8, 16> = Vec::new();

        let stream = [0u8, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let n = asm.feed_all(&stream, |p| seen.extend_from_slice(&p).unwrap());

        assert_eq!(n, 3);
        assert_eq!(seen.as_slice(), &stream[..9]);
        assert_eq!(asm.written(), 2);
        assert_eq!(asm.leftover_len(), 0);
        assert_eq!(asm.overrun(), 0);
    }

    #[test]
    fn test_direct_feed_counts_overrun() {
        let mut asm = Assembler::<2>::new();

        // 2 bytes complete the packet, 2 fit in the store, 1 is lost
        assert_eq!(asm.feed(&[1, 2, 3, 4, 5]), Assembly::Complete([1, 2]));
        assert_eq!(asm.leftover_len(), 2);
        assert_eq!(asm.overrun(), 1);
        assert_eq!(asm.feed(&[]), Assembly::Complete([3, 4]));
    }

    #[test]
    fn test_reset_discards_partial_state() {
        let mut asm = FrameAssembler::<3, 6>::new();
        asm.feed(&[1, 2, 3, 4, 5]);
        asm.feed(&[6]);
        asm.reset();

        assert_eq!(asm.written(), 0);
        assert_eq!(asm.leftover_len(), 0);
        assert_eq!(asm.feed(&[7, 8, 9]), Assembly::Complete([7, 8, 9]));
    }

    #[test]
    fn test_empty_feed_is_noop_when_idle() {
        let mut asm = Assembler::<3>::new();
        assert_eq!(asm.feed(&[]), Assembly::Incomplete);
        assert_eq!(asm.feed_all(&[], |_| panic!("no packet expected")), 0);
        assert_eq!(asm.written(), 0);
    }
}
