//! UART0 interrupt handler
//!
//! Moves bytes between the PL011 FIFOs and the software queues. Everything
//! else happens in tasks.

use core::sync::atomic::Ordering;

use embassy_rp::interrupt;
use velox_core::link::service_interrupt;
use velox_hal_rp2040::{Rp2040Uart, UartId};

use crate::channels::{IRQ_COUNT, LINK_STATS, RX_QUEUE, RX_READY, TX_QUEUE};
use crate::config::LINK;

#[interrupt]
unsafe fn UART0_IRQ() {
    IRQ_COUNT.fetch_add(1, Ordering::Relaxed);

    let mut port = Rp2040Uart::new(UartId::Uart0);
    let received = RX_QUEUE.lock(|rx| {
        TX_QUEUE.lock(|tx| {
            LINK_STATS.lock(|stats| {
                let mut stats = stats.borrow_mut();
                let before = stats.received;
                service_interrupt(
                    &mut port,
                    &mut *rx.borrow_mut(),
                    &mut *tx.borrow_mut(),
                    &LINK,
                    &mut *stats,
                );
                stats.received.wrapping_sub(before)
            })
        })
    });

    if received > 0 {
        RX_READY.signal(());
    }
}
