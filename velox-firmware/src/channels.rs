//! Shared state between the UART interrupt and tasks
//!
//! The RX/TX queues and link counters are shared with `UART0_IRQ` and sit
//! behind [`Uart0IrqMutex`], which masks only that interrupt while locked.
//! Task-to-task traffic uses embassy-sync signals.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;
use portable_atomic::AtomicU32;

use velox_core::drive::MotorSettings;
use velox_core::link::LinkStats;
use velox_hal_rp2040::Uart0IrqMutex;
use velox_protocol::RingBuffer;

use crate::config::{RX_CAPACITY, TX_CAPACITY};

/// Bytes received by the interrupt, waiting for the link RX task
pub static RX_QUEUE: Mutex<Uart0IrqMutex, RefCell<RingBuffer<RX_CAPACITY>>> =
    Mutex::new(RefCell::new(RingBuffer::new()));

/// Bytes queued by the status task, waiting for the interrupt
pub static TX_QUEUE: Mutex<Uart0IrqMutex, RefCell<RingBuffer<TX_CAPACITY>>> =
    Mutex::new(RefCell::new(RingBuffer::new()));

/// Link traffic and loss counters
pub static LINK_STATS: Mutex<Uart0IrqMutex, RefCell<LinkStats>> =
    Mutex::new(RefCell::new(LinkStats::new()));

/// Number of times `UART0_IRQ` has run
pub static IRQ_COUNT: AtomicU32 = AtomicU32::new(0);

/// Signal that the interrupt moved new bytes into the RX queue
pub static RX_READY: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Motor settings decoded from the latest packet
pub static DRIVE_CMD: Signal<CriticalSectionRawMutex, MotorSettings> = Signal::new();

/// Motor settings just applied, to be reported over the link
pub static REPORT: Signal<CriticalSectionRawMutex, MotorSettings> = Signal::new();
