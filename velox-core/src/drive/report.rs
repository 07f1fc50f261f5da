//! Telemetry lines sent back over the link
//!
//! Format: `L+050 R-025\r\n` (sign is the side's direction, speed in %).

use core::fmt::Write;

use heapless::String;

use super::{Direction, MotorSettings};

/// Maximum length of a telemetry line
pub const REPORT_LEN: usize = 16;

/// Sent once at startup: cursor home, clear screen, greeting
pub const BANNER: &[u8] = b"\x1b[0H\x1b[0Jvelox ready\r\n";

fn sign(dir: Direction) -> char {
    match dir {
        Direction::Forward => '+',
        Direction::Backward => '-',
    }
}

/// Format motor settings as a telemetry line
pub fn format_settings(settings: &MotorSettings) -> String<REPORT_LEN> {
    let mut line = String::new();
    // 13 bytes at most, always fits
    let _ = write!(
        line,
        "L{}{:03} R{}{:03}\r\n",
        sign(settings.left_dir),
        settings.left_speed,
        sign(settings.right_dir),
        settings.right_speed
    );
    line
}
