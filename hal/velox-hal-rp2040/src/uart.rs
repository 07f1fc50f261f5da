//! Interrupt-driven UART access
//!
//! RP2040 has two PL011 UART peripherals (UART0 and UART1). embassy-rp
//! brings them up (clocks, pins, line settings) through its blocking driver;
//! [`Rp2040Uart`] then talks to the data, flag and interrupt mask registers
//! directly from the interrupt handler.

use embassy_rp::pac;
use embassy_rp::uart as rp_uart;
use velox_hal::uart::{DataBits, LineError, Parity, StopBits, UartConfig, UartIrq};

/// UART peripheral identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartId {
    Uart0,
    Uart1,
}

impl UartId {
    fn regs(self) -> pac::uart::Uart {
        match self {
            UartId::Uart0 => pac::UART0,
            UartId::Uart1 => pac::UART1,
        }
    }
}

/// Convert line settings to the embassy-rp driver configuration
pub fn embassy_config(config: &UartConfig) -> rp_uart::Config {
    let mut cfg = rp_uart::Config::default();
    cfg.baudrate = config.baudrate;
    cfg.data_bits = match config.data_bits {
        DataBits::Seven => rp_uart::DataBits::DataBits7,
        DataBits::Eight => rp_uart::DataBits::DataBits8,
    };
    cfg.parity = match config.parity {
        Parity::None => rp_uart::Parity::ParityNone,
        Parity::Even => rp_uart::Parity::ParityEven,
        Parity::Odd => rp_uart::Parity::ParityOdd,
    };
    cfg.stop_bits = match config.stop_bits {
        StopBits::One => rp_uart::StopBits::STOP1,
        StopBits::Two => rp_uart::StopBits::STOP2,
    };
    cfg
}

/// Register view of a UART already configured by embassy-rp
///
/// The embassy-rp driver must be kept alive for as long as this is used,
/// otherwise the peripheral is released.
pub struct Rp2040Uart {
    id: UartId,
    regs: pac::uart::Uart,
}

impl Rp2040Uart {
    /// Create a view of the given UART
    ///
    /// Only the interrupt handler and the code holding that interrupt's
    /// mutex may use it.
    pub fn new(id: UartId) -> Self {
        Self { id, regs: id.regs() }
    }

    /// Get the peripheral identifier
    pub fn id(&self) -> UartId {
        self.id
    }
}

impl UartIrq for Rp2040Uart {
    fn rx_ready(&self) -> bool {
        !self.regs.uartfr().read().rxfe()
    }

    fn read(&mut self) -> Result<u8, LineError> {
        let dr = self.regs.uartdr().read();
        if dr.oe() {
            Err(LineError::Overrun)
        } else if dr.be() {
            Err(LineError::Break)
        } else if dr.pe() {
            Err(LineError::Parity)
        } else if dr.fe() {
            Err(LineError::Framing)
        } else {
            Ok(dr.data())
        }
    }

    fn tx_ready(&self) -> bool {
        !self.regs.uartfr().read().txff()
    }

    fn write(&mut self, byte: u8) {
        self.regs.uartdr().write(|w| w.set_data(byte));
    }

    fn set_tx_interrupt(&mut self, enabled: bool) {
        self.regs.uartimsc().modify(|w| w.set_txim(enabled));
    }

    fn tx_interrupt_enabled(&self) -> bool {
        self.regs.uartimsc().read().txim()
    }

    fn set_rx_interrupt(&mut self, enabled: bool) {
        // Receive timeout covers bytes that never reach the FIFO threshold
        self.regs.uartimsc().modify(|w| {
            w.set_rxim(enabled);
            w.set_rtim(enabled);
        });
    }

    fn clear_errors(&mut self) {
        self.regs.uarticr().write(|w| {
            w.set_oeic(true);
            w.set_beic(true);
            w.set_peic(true);
            w.set_feic(true);
        });
    }
}
