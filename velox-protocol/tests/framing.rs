//! Property tests for the RX/TX queue and the packet assembler

use proptest::prelude::*;
use velox_protocol::{Assembly, FrameAssembler, OverflowPolicy, RingBuffer};

const PACKET: usize = 3;

/// Split `stream` at the given cut sizes, cycling through them
fn chunked<'a>(stream: &'a [u8], cuts: &'a [usize]) -> impl Iterator<Item = &'a [u8]> + 'a {
    let mut rest = stream;
    let mut i = 0;
    core::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let n = cuts[i % cuts.len()].clamp(1, rest.len());
        i += 1;
        let (chunk, tail) = rest.split_at(n);
        rest = tail;
        Some(chunk)
    })
}

#[derive(Debug, Clone)]
enum Op {
    Enqueue(u8),
    Dequeue,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![any::<u8>().prop_map(Op::Enqueue), Just(Op::Dequeue)]
}

proptest! {
    #[test]
    fn fifo_order_within_capacity(bytes in proptest::collection::vec(any::<u8>(), 0..=16)) {
        let mut queue = RingBuffer::<16>::new();
        for &b in &bytes {
            prop_assert!(queue.enqueue(b).is_ok());
        }
        let mut out = Vec::new();
        while let Some(b) = queue.pop() {
            out.push(b);
        }
        prop_assert_eq!(out, bytes);
    }

    #[test]
    fn capacity_invariant_holds(ops in proptest::collection::vec(op(), 0..200)) {
        let mut queue = RingBuffer::<5>::new();
        let mut model = std::collections::VecDeque::new();

        for op in ops {
            match op {
                Op::Enqueue(b) => {
                    let accepted = queue.enqueue(b).is_ok();
                    prop_assert_eq!(accepted, model.len() < 5);
                    if accepted {
                        model.push_back(b);
                    }
                }
                Op::Dequeue => {
                    let was_empty = queue.is_empty();
                    let got = queue.dequeue();
                    match model.pop_front() {
                        Some(expected) => prop_assert_eq!(got, expected),
                        None => {
                            prop_assert!(was_empty);
                            prop_assert_eq!(got, 0);
                        }
                    }
                }
            }
            prop_assert!(queue.len() <= 5);
            prop_assert_eq!(queue.len(), model.len());
            prop_assert_eq!(queue.is_full(), queue.len() == 5);
            prop_assert_eq!(queue.is_empty(), queue.len() == 0);
        }
    }

    #[test]
    fn drop_oldest_keeps_most_recent(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
        let mut queue = RingBuffer::<8>::new();
        for &b in &bytes {
            OverflowPolicy::DropOldest.enqueue(&mut queue, b);
        }
        let mut out = Vec::new();
        while let Some(b) = queue.pop() {
            out.push(b);
        }
        let keep = bytes.len().min(8);
        prop_assert_eq!(out.as_slice(), &bytes[bytes.len() - keep..]);
    }

    #[test]
    fn framing_exact_with_feed_all(
        k in 0usize..20,
        seed in any::<u8>(),
        cuts in proptest::collection::vec(1usize..10, 1..8),
    ) {
        let stream: Vec<u8> = (0..k * PACKET).map(|i| seed.wrapping_add(i as u8)).collect();
        let mut asm = FrameAssembler::<PACKET, PACKET>::new();
        let mut packets = Vec::new();

        for chunk in chunked(&stream, &cuts) {
            asm.feed_all(chunk, |p| packets.push(p));
        }

        prop_assert_eq!(packets.len(), k);
        let flat: Vec<u8> = packets.iter().flatten().copied().collect();
        prop_assert_eq!(flat, stream);
        prop_assert_eq!(asm.written(), 0);
        prop_assert_eq!(asm.leftover_len(), 0);
        prop_assert_eq!(asm.overrun(), 0);
    }

    #[test]
    fn framing_exact_with_single_feed_and_drain(
        k in 0usize..20,
        cuts in proptest::collection::vec(1usize..=PACKET, 1..8),
    ) {
        // Chunks no longer than a packet fit the leftover store of an
        // assembler with capacity 2N, so `feed` alone loses nothing as
        // long as pending packets are drained between chunks.
        let stream: Vec<u8> = (0..k * PACKET).map(|i| i as u8).collect();
        let mut asm = FrameAssembler::<PACKET, { 2 * PACKET }>::new();
        let mut packets = Vec::new();

        for chunk in chunked(&stream, &cuts) {
            if let Assembly::Complete(p) = asm.feed(chunk) {
                packets.push(p);
            }
            while asm.has_pending_packet() {
                if let Some(p) = asm.feed(&[]).packet() {
                    packets.push(p);
                }
            }
        }

        prop_assert_eq!(packets.len(), k);
        let flat: Vec<u8> = packets.iter().flatten().copied().collect();
        prop_assert_eq!(flat, stream);
        prop_assert_eq!(asm.overrun(), 0);
    }

    #[test]
    fn leftover_is_exactly_surplus(m in 1usize..PACKET, seed in any::<u8>()) {
        let stream: Vec<u8> = (0..PACKET + m).map(|i| seed.wrapping_mul(3).wrapping_add(i as u8)).collect();
        let mut asm = FrameAssembler::<PACKET, PACKET>::new();

        let first = asm.feed(&stream).packet();
        prop_assert_eq!(first.map(|p| p.to_vec()), Some(stream[..PACKET].to_vec()));
        prop_assert_eq!(asm.leftover_len(), m);

        let tail: Vec<u8> = (0..PACKET - m).map(|i| 0xF0 ^ i as u8).collect();
        let next = asm.feed(&tail).packet();
        let mut expected = stream[PACKET..].to_vec();
        expected.extend_from_slice(&tail);
        prop_assert_eq!(next.map(|p| p.to_vec()), Some(expected));
        prop_assert_eq!(asm.leftover_len(), 0);
    }
}
