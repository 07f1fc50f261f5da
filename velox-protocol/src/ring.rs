//! Fixed-capacity circular byte queue
//!
//! Decouples the UART interrupt from the main loop. One queue per direction:
//! the RX queue is filled by the interrupt and drained by the main loop, the
//! TX queue the other way around.
//!
//! Every operation is O(1) apart from [`RingBuffer::drain_into`], which is
//! bounded by the length of the destination slice.
//!
//! ```text
//!            head            tail
//!             │               │
//!  ┌───┬───┬──▼┬───┬───┬───┬──▼┬───┐
//!  │ 0 │ 0 │ A │ B │ C │ D │ 0 │ 0 │   count = 4
//!  └───┴───┴───┴───┴───┴───┴───┴───┘
//! ```
//!
//! The queue itself never evicts. A full queue rejects the new byte; callers
//! that want to keep the most recent bytes use [`OverflowPolicy::DropOldest`].

/// Returned by [`RingBuffer::enqueue`] when the queue holds `C` bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QueueFull;

/// Fixed-capacity FIFO of bytes
#[derive(Debug, Clone)]
pub struct RingBuffer<const C: usize> {
    data: [u8; C],
    /// Index of the oldest unread byte
    head: usize,
    /// Index of the next free slot
    tail: usize,
    /// Number of valid bytes
    count: usize,
}

impl<const C: usize> Default for RingBuffer<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const C: usize> RingBuffer<C> {
    const NON_ZERO_CAPACITY: () = assert!(C > 0, "ring buffer capacity must be non-zero");

    /// Create an empty, zeroed queue
    pub const fn new() -> Self {
        let () = Self::NON_ZERO_CAPACITY;
        Self {
            data: [0; C],
            head: 0,
            tail: 0,
            count: 0,
        }
    }

    /// Empty the queue and clear the backing storage
    pub fn reset(&mut self) {
        self.data = [0; C];
        self.head = 0;
        self.tail = 0;
        self.count = 0;
    }

    /// Check if the queue holds no bytes
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Check if the queue holds `C` bytes
    pub const fn is_full(&self) -> bool {
        self.count == C
    }

    /// Number of bytes waiting to be read
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Total number of bytes the queue can hold
    pub const fn capacity(&self) -> usize {
        C
    }

    /// Append a byte at the tail
    ///
    /// A full queue is left untouched and the byte is handed back to the
    /// caller's overflow policy.
    pub fn enqueue(&mut self, byte: u8) -> Result<(), QueueFull> {
        if self.is_full() {
            return Err(QueueFull);
        }

        self.data[self.tail] = byte;
        self.tail = (self.tail + 1) % C;
        self.count += 1;
        Ok(())
    }

    /// Remove the oldest byte
    pub fn pop(&mut self) -> Option<u8> {
        if self.is_empty() {
            return None;
        }

        let byte = self.data[self.head];
        self.data[self.head] = 0;
        self.head = (self.head + 1) % C;
        self.count -= 1;
        Some(byte)
    }

    /// Remove the oldest byte, or return `0` when empty
    ///
    /// Zero is a valid payload byte, so check [`is_empty`](Self::is_empty)
    /// first or use [`pop`](Self::pop) when the distinction matters.
    pub fn dequeue(&mut self) -> u8 {
        self.pop().unwrap_or(0)
    }

    /// Look at the oldest byte without removing it
    pub fn peek(&self) -> Option<u8> {
        if self.is_empty() {
            None
        } else {
            Some(self.data[self.head])
        }
    }

    /// Move up to `buf.len()` bytes out of the queue in FIFO order
    ///
    /// Returns the number of bytes written to `buf`.
    pub fn drain_into(&mut self, buf: &mut [u8]) -> usize {
        let mut n = 0;
        while n < buf.len() {
            match self.pop() {
                Some(byte) => {
                    buf[n] = byte;
                    n += 1;
                }
                None => break,
            }
        }
        n
    }
}

/// What happened to a byte offered under an [`OverflowPolicy`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Admission {
    /// Byte stored, nothing lost
    Stored,
    /// Byte stored after evicting this oldest byte
    Evicted(u8),
    /// Queue was full, this incoming byte was discarded
    Rejected(u8),
}

impl Admission {
    /// Check if a byte was lost
    pub fn lost_byte(&self) -> bool {
        !matches!(self, Admission::Stored)
    }
}

/// Behavior when a producer meets a full queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OverflowPolicy {
    /// Reject the incoming byte
    #[default]
    DropNewest,
    /// Evict the oldest byte, keeping the most recent `C` bytes
    DropOldest,
}

impl OverflowPolicy {
    /// Offer a byte to the queue under this policy
    pub fn enqueue<const C: usize>(self, queue: &mut RingBuffer<C>, byte: u8) -> Admission {
        match queue.enqueue(byte) {
            Ok(()) => Admission::Stored,
            Err(QueueFull) => match self {
                OverflowPolicy::DropNewest => Admission::Rejected(byte),
                OverflowPolicy::DropOldest => {
                    let evicted = queue.dequeue();
                    // Space was just freed, so this cannot fail
                    let _ = queue.enqueue(byte);
                    Admission::Evicted(evicted)
                }
            },
        }
    }
}
