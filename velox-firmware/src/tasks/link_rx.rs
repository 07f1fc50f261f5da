//! Link receive task
//!
//! Drains the RX queue, frames packets and decodes them into motor settings.

use defmt::*;

use velox_core::drive::DriveDecoder;
use velox_core::link::{PacketReceiver, RX_CHUNK};
use velox_protocol::JoystickPacket;

use crate::channels::{DRIVE_CMD, RX_QUEUE, RX_READY};
use crate::config::{LEFTOVER_CAPACITY, PACKET_SIZE};

/// Link RX task - turns received bytes into drive commands
#[embassy_executor::task]
pub async fn link_rx_task(decoder: DriveDecoder) {
    info!("Link RX task started ({} byte packets)", PACKET_SIZE);

    let mut receiver = PacketReceiver::<PACKET_SIZE, LEFTOVER_CAPACITY>::new();
    let mut chunk = [0u8; RX_CHUNK];

    loop {
        RX_READY.wait().await;

        // Short critical sections: one chunk per lock
        loop {
            let n = RX_QUEUE.lock(|rx| rx.borrow_mut().drain_into(&mut chunk));
            if n == 0 {
                break;
            }
            trace!("RX: {} bytes", n);
            receiver.poll(&chunk[..n], |raw| handle_packet(&decoder, &raw));
        }
    }
}

/// Decode one framed packet and hand it to the drive task
fn handle_packet(decoder: &DriveDecoder, raw: &[u8]) {
    match JoystickPacket::decode(raw) {
        Ok(packet) => {
            let settings = decoder.decode(&packet);
            debug!("Packet {:?} -> {:?}", packet, settings);
            DRIVE_CMD.signal(settings);
        }
        Err(e) => {
            warn!("Failed to decode packet: {:?}", e);
        }
    }
}
