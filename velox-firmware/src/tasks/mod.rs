//! Embassy async tasks
//!
//! Each task runs independently and communicates via signals.

pub mod drive;
pub mod link_rx;
pub mod status;

pub use drive::drive_task;
pub use link_rx::link_rx_task;
pub use status::status_task;
