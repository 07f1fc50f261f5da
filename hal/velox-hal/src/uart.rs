//! UART serial communication abstractions
//!
//! The rover link is interrupt driven: the UART interrupt moves bytes between
//! the peripheral and the software queues, and the main loop only touches the
//! queues. [`UartIrq`] is the register-level view the interrupt handler needs.

/// Line status error attached to a received byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Receive FIFO overflowed before it was read
    Overrun,
    /// Stop bit missing
    Framing,
    /// Parity mismatch
    Parity,
    /// Line held low for longer than a character
    Break,
}

/// Interrupt-driven UART port
///
/// Implemented directly on the peripheral registers. All methods must be
/// non-blocking and run in bounded time since they are called from the
/// UART interrupt handler.
pub trait UartIrq {
    /// Check if a received byte is waiting in the peripheral
    fn rx_ready(&self) -> bool;

    /// Read the oldest received byte
    ///
    /// A byte flagged with a line error is consumed and the error returned.
    fn read(&mut self) -> Result<u8, LineError>;

    /// Check if the transmitter can accept another byte
    fn tx_ready(&self) -> bool;

    /// Write a byte to the transmitter
    ///
    /// Only valid after [`tx_ready`](Self::tx_ready) returned true.
    fn write(&mut self, byte: u8);

    /// Enable or disable the "transmit ready" interrupt source
    fn set_tx_interrupt(&mut self, enabled: bool);

    /// Check if the "transmit ready" interrupt source is enabled
    fn tx_interrupt_enabled(&self) -> bool;

    /// Enable or disable the "byte received" interrupt sources
    fn set_rx_interrupt(&mut self, enabled: bool);

    /// Clear latched line error flags
    fn clear_errors(&mut self);
}

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            baudrate: 9600,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

impl UartConfig {
    /// 8N1 at the given baud rate
    pub const fn with_baudrate(baudrate: u32) -> Self {
        Self {
            baudrate,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Seven,
    Eight,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}
