//! Status task
//!
//! Sends the banner at startup, then one telemetry line per applied motor
//! setting. Logs the link counters when nothing has happened for a while.

use core::sync::atomic::Ordering;

use defmt::*;
use embassy_time::{with_timeout, Duration};

use velox_core::drive::{format_settings, BANNER};
use velox_core::link::Transmitter;
use velox_hal_rp2040::{Rp2040Uart, UartId};

use crate::channels::{IRQ_COUNT, LINK_STATS, REPORT, TX_QUEUE};
use crate::config::{LINK, STATS_PERIOD_MS};

/// Status task - reports motor settings back over the link
#[embassy_executor::task]
pub async fn status_task() {
    info!("Status task started");

    let transmitter = Transmitter::new(LINK.tx_policy);
    send(&transmitter, BANNER);

    let period = Duration::from_millis(STATS_PERIOD_MS);

    loop {
        match with_timeout(period, REPORT.wait()).await {
            Ok(settings) => {
                let line = format_settings(&settings);
                send(&transmitter, line.as_bytes());
            }
            Err(_) => {
                let stats = LINK_STATS.lock(|stats| *stats.borrow());
                info!(
                    "Link: irq={} {:?} lost={}",
                    IRQ_COUNT.load(Ordering::Relaxed),
                    stats,
                    stats.rx_lost()
                );
            }
        }
    }
}

/// Queue `bytes` and start the transmitter
///
/// Whatever does not fit in the TX queue is abandoned; the next line
/// carries newer settings anyway.
fn send(transmitter: &Transmitter, bytes: &[u8]) {
    let accepted = TX_QUEUE.lock(|tx| {
        LINK_STATS.lock(|stats| {
            let mut tx = tx.borrow_mut();
            let mut stats = stats.borrow_mut();

            let accepted = transmitter.queue(&mut *tx, bytes, &mut *stats);
            if accepted < bytes.len() {
                transmitter.abandon(bytes.len() - accepted, &mut *stats);
            }

            let mut port = Rp2040Uart::new(UartId::Uart0);
            transmitter.start(&mut port, &mut *tx, &mut *stats);
            accepted
        })
    });

    if accepted < bytes.len() {
        warn!("TX queue full, dropped {} bytes", bytes.len() - accepted);
    }
}
