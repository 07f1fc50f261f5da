//! Joystick packet layout
//!
//! ```text
//! ┌──────┬──────┬─────────┬──────────────┐
//! │ X    │ Y    │ COMMAND │ PADDING      │
//! │ 1B   │ 1B   │ 1B      │ 0 or more B  │
//! └──────┴──────┴─────────┴──────────────┘
//! ```
//!
//! Axis bytes are raw joystick readings with 128 at rest. The link's packet
//! size is a build-time constant shared by both ends; links configured with
//! packets longer than three bytes carry padding which is ignored here.
//!
//! Encoding goes through postcard. Every field is a `u8`, which postcard
//! writes verbatim, so the wire form is exactly `[x, y, command]`.

use serde::{Deserialize, Serialize};

/// Errors from encoding or decoding a packet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PacketError {
    /// Output buffer shorter than [`JoystickPacket::SIZE`]
    BufferTooSmall,
    /// Input shorter than [`JoystickPacket::SIZE`]
    Truncated,
}

/// One joystick sample from the remote controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JoystickPacket {
    /// Horizontal axis (0-255, 128 = centred)
    pub x: u8,
    /// Vertical axis (0-255, 128 = centred)
    pub y: u8,
    /// Command byte
    pub command: u8,
}

impl JoystickPacket {
    /// Encoded size in bytes
    pub const SIZE: usize = 3;

    /// Create a new packet
    pub const fn new(x: u8, y: u8, command: u8) -> Self {
        Self { x, y, command }
    }

    /// Encode into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, PacketError> {
        postcard::to_slice(self, buffer)
            .map(|used| used.len())
            .map_err(|_| PacketError::BufferTooSmall)
    }

    /// Encode into a fixed array
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        [self.x, self.y, self.command]
    }

    /// Decode from the first [`SIZE`](Self::SIZE) bytes of a packet
    pub fn decode(bytes: &[u8]) -> Result<Self, PacketError> {
        if bytes.len() < Self::SIZE {
            return Err(PacketError::Truncated);
        }
        postcard::from_bytes(&bytes[..Self::SIZE]).map_err(|_| PacketError::Truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_layout() {
        let packet = JoystickPacket::new(0x80, 0xFF, 0x01);
        let mut buffer = [0u8; 8];
        let len = packet.encode(&mut buffer).unwrap();

        assert_eq!(len, 3);
        assert_eq!(&buffer[..3], &[0x80, 0xFF, 0x01]);
        assert_eq!(packet.to_bytes(), [0x80, 0xFF, 0x01]);
    }

    #[test]
    fn test_encode_buffer_too_small() {
        let packet = JoystickPacket::new(1, 2, 3);
        let mut buffer = [0u8; 2];
        assert_eq!(packet.encode(&mut buffer), Err(PacketError::BufferTooSmall));
    }

    #[test]
    fn test_decode_ignores_padding() {
        let bytes = [0x10, 0x20, 0x00, 0xAA, 0xBB, 0xCC, 0xDD, 0xEE];
        let packet = JoystickPacket::decode(&bytes).unwrap();

        assert_eq!(packet, JoystickPacket::new(0x10, 0x20, 0x00));
    }

    #[test]
    fn test_decode_truncated() {
        assert_eq!(JoystickPacket::decode(&[1, 2]), Err(PacketError::Truncated));
    }
}
