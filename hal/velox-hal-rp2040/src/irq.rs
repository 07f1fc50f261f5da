//! Raw mutexes that mask one UART interrupt
//!
//! A queue shared between a UART interrupt and thread mode only needs that
//! one interrupt held off while thread mode touches it. These mutexes do
//! exactly that, leaving every other interrupt (the embassy time driver
//! included) running.
//!
//! ```ignore
//! static RX_QUEUE: Mutex<Uart0IrqMutex, RefCell<RingBuffer<50>>> =
//!     Mutex::new(RefCell::new(RingBuffer::new()));
//! ```

use core::sync::atomic::{compiler_fence, Ordering};

use embassy_rp::interrupt::{self, InterruptExt};
use embassy_sync::blocking_mutex::raw::RawMutex;

macro_rules! irq_mutex {
    ($(#[$meta:meta])* $name:ident, $irq:ident) => {
        $(#[$meta])*
        pub struct $name(());

        // SAFETY: sharing is only allowed between thread mode and the
        // masked interrupt on the core that owns it. While `f` runs that
        // interrupt cannot preempt, and the interrupt handler itself cannot
        // be preempted by thread mode, so `f` never runs concurrently with
        // another `lock` of the same mutex. Nested locks restore the mask
        // they found.
        unsafe impl RawMutex for $name {
            const INIT: Self = Self(());

            fn lock<R>(&self, f: impl FnOnce() -> R) -> R {
                let was_enabled = interrupt::$irq.is_enabled();
                interrupt::$irq.disable();
                compiler_fence(Ordering::SeqCst);

                let result = f();

                compiler_fence(Ordering::SeqCst);
                if was_enabled {
                    // SAFETY: the interrupt was enabled on entry, so
                    // re-enabling it only undoes our own masking.
                    unsafe { interrupt::$irq.enable() };
                }
                result
            }
        }
    };
}

irq_mutex!(
    /// Masks `UART0_IRQ` while locked
    Uart0IrqMutex,
    UART0_IRQ
);

irq_mutex!(
    /// Masks `UART1_IRQ` while locked
    Uart1IrqMutex,
    UART1_IRQ
);
