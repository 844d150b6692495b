//! Z280 on-chip UART
//!
//! Byte-level model of the asynchronous channel: the serial tick (sourced
//! from CT1 or from the CTIN1 prescaler) advances the shift registers one
//! bit at a time, and whole bytes cross the host boundary through the
//! transmit/receive callbacks. Frame length follows the configured word
//! size, stop bits and parity.

use crate::bus::{UartRxFn, UartTxFn};
use log::{debug, trace};

/// Configuration register bits
pub mod uartcr {
    /// Bits/character field (5/6/7/8)
    pub const BC: u8 = 0xc0;
    /// Parity enable
    pub const P: u8 = 0x20;
    /// Even/odd parity select
    pub const EO: u8 = 0x10;
    /// Clock source: CT1 (set) or the CTIN1 pin (clear)
    pub const CS: u8 = 0x08;
    /// Clock rate divisor field (1/16/32/64)
    pub const CR: u8 = 0x06;
    /// Loopback
    pub const LB: u8 = 0x01;
}

/// Transmitter control/status bits
pub mod tcsr {
    /// Transmitter enable
    pub const EN: u8 = 0x80;
    /// Interrupt enable
    pub const IE: u8 = 0x40;
    /// Stop bits (set = 2)
    pub const SB: u8 = 0x10;
    /// Send break
    pub const BRK: u8 = 0x08;
    /// Force the output line
    pub const FRC: u8 = 0x04;
    /// Forced line value
    pub const VAL: u8 = 0x02;
    /// Transmit buffer empty
    pub const BE: u8 = 0x01;
}

/// Receiver control/status bits
pub mod rcsr {
    /// Receiver enable
    pub const EN: u8 = 0x80;
    /// Interrupt enable
    pub const IE: u8 = 0x40;
    /// Character available
    pub const CA: u8 = 0x10;
    /// Framing error
    pub const FE: u8 = 0x08;
    /// Parity error
    pub const PE: u8 = 0x04;
    /// Overrun error
    pub const OVE: u8 = 0x02;
    /// Error summary (computed on read)
    pub const ERR: u8 = 0x01;
}

/// Register offsets within the UART I/O window
pub mod regs {
    pub const UARTCR: u8 = 0x0;
    pub const TCSR: u8 = 0x2;
    pub const RCSR: u8 = 0x4;
    pub const RDR: u8 = 0x6;
    pub const TDR: u8 = 0x8;
}

pub struct Uart {
    /// Configuration register
    pub cr: u8,
    /// Transmitter control/status
    pub tcsr: u8,
    /// Receiver control/status
    pub rcsr: u8,
    /// Transmit data register
    pub tdr: u8,
    /// Receive data register
    pub rdr: u8,

    /// Frame length: start + data + stop + parity
    bit_count: u8,
    /// Serial-tick prescaler (from the clock-rate field)
    clock_divisor: u16,
    prescaler: u16,

    tx_shift: u8,
    tx_bits_rem: u8,
    rx_shift: u8,
    rx_bits_rem: u8,

    tx_callback: Option<Box<UartTxFn>>,
    rx_callback: Option<Box<UartRxFn>>,
}

impl Uart {
    pub fn new(tx_callback: Option<Box<UartTxFn>>, rx_callback: Option<Box<UartRxFn>>) -> Self {
        let mut uart = Self {
            cr: 0,
            tcsr: 0,
            rcsr: 0,
            tdr: 0,
            rdr: 0,
            bit_count: 0,
            clock_divisor: 1,
            prescaler: 1,
            tx_shift: 0,
            tx_bits_rem: 0,
            rx_shift: 0,
            rx_bits_rem: 0,
            tx_callback,
            rx_callback,
        };
        uart.reset();
        uart
    }

    pub fn reset(&mut self) {
        self.cr = 0xe2;
        self.rcsr = 0x80;
        self.tcsr = 0x01;
        self.clock_divisor = 1;
        self.prescaler = self.clock_divisor;
        self.tx_bits_rem = 0;
        self.rx_bits_rem = 0;
        self.update_serial();
    }

    /// The UART is clocked from CT1 rather than the CTIN1 pin.
    pub fn clocked_from_ct1(&self) -> bool {
        self.cr & uartcr::CS != 0
    }

    /// Transmit interrupt level: interrupt enabled and buffer empty.
    pub fn tx_irq(&self) -> bool {
        self.tcsr & (tcsr::IE | tcsr::BE) == tcsr::IE | tcsr::BE
    }

    /// Receive interrupt level: interrupt enabled and character available.
    pub fn rx_irq(&self) -> bool {
        self.rcsr & (rcsr::IE | rcsr::CA) == rcsr::IE | rcsr::CA
    }

    fn data_bits(&self) -> u8 {
        5 + (self.cr >> 6)
    }

    fn stop_bits(&self) -> u8 {
        if self.tcsr & tcsr::SB != 0 { 2 } else { 1 }
    }

    fn parity_bits(&self) -> u8 {
        u8::from(self.cr & uartcr::P != 0)
    }

    fn divisor(&self) -> u16 {
        match (self.cr & uartcr::CR) >> 1 {
            0 => 1,
            1 => 16,
            2 => 32,
            _ => 64,
        }
    }

    /// Recompute the frame length and tick prescaler after a register
    /// change that affects them.
    fn update_serial(&mut self) {
        self.bit_count = 1 + self.data_bits() + self.stop_bits() + self.parity_bits();
        self.clock_divisor = self.divisor();
        self.prescaler = self.clock_divisor;
        trace!(
            "uart: frame 1+{}{}{} divisor {}",
            self.data_bits(),
            if self.parity_bits() != 0 { "P" } else { "N" },
            self.stop_bits(),
            self.clock_divisor
        );
    }

    /// One bit-clock pulse from CT1 or the CTIN1 prescaler. The clock-rate
    /// divisor is applied here; every `clock_divisor` pulses the shift
    /// registers advance one bit.
    pub fn tick(&mut self) {
        self.prescaler -= 1;
        if self.prescaler != 0 {
            return;
        }
        self.prescaler = self.clock_divisor;
        self.rx_bit_clock();
        self.tx_bit_clock();
    }

    fn tx_bit_clock(&mut self) {
        if self.tcsr & tcsr::EN == 0 || self.tcsr & tcsr::BRK != 0 {
            // Line marks (disabled) or spaces (break); nothing shifts.
            return;
        }
        if self.tx_bits_rem > 0 {
            self.tx_bits_rem -= 1;
            if self.tx_bits_rem == 0 {
                self.tx_complete();
            }
        }
    }

    fn tx_complete(&mut self) {
        // A forced line transmits all-ones or all-zeroes instead of data.
        let data = if self.tcsr & tcsr::FRC != 0 {
            if self.tcsr & tcsr::VAL != 0 { 0xff } else { 0x00 }
        } else {
            self.tx_shift
        };
        if let Some(tx) = self.tx_callback.as_mut() {
            tx(data);
        }
        if self.tcsr & tcsr::BE == 0 {
            debug!("uart: tx done, reloading from TDR {:#04x}", self.tdr);
            self.tx_shift = self.tdr;
            self.tx_bits_rem = self.bit_count;
            self.tcsr |= tcsr::BE;
        } else {
            debug!("uart: tx done, line marking");
        }
    }

    fn rx_bit_clock(&mut self) {
        if self.rcsr & rcsr::EN == 0 {
            return;
        }
        if self.rx_bits_rem > 0 {
            self.rx_bits_rem -= 1;
            if self.rx_bits_rem == 0 {
                let data = self.rx_shift;
                self.receive_byte(data);
            }
        } else if let Some(c) = self.rx_callback.as_mut().and_then(|rx| rx()) {
            self.rx_shift = c;
            self.rx_bits_rem = self.bit_count;
        }
    }

    fn receive_byte(&mut self, data: u8) {
        if self.rcsr & rcsr::CA != 0 {
            debug!("uart: rx overrun");
            self.rcsr |= rcsr::OVE;
        }
        self.rdr = data;
        self.rcsr |= rcsr::CA;
    }

    pub fn register_read(&mut self, reg: u8) -> u8 {
        match reg {
            regs::UARTCR => self.cr,
            regs::TCSR => self.tcsr,
            regs::RCSR => {
                // Error summary is the OR of the individual error bits.
                let err = u8::from(self.rcsr & (rcsr::PE | rcsr::FE | rcsr::OVE) != 0);
                self.rcsr | err
            }
            regs::TDR => self.tdr,
            regs::RDR => self.read_rdr(),
            _ => {
                debug!("uart: bogus register read {reg:#04x}");
                0
            }
        }
    }

    pub fn register_write(&mut self, reg: u8, data: u8) {
        match reg {
            regs::UARTCR => {
                self.cr = data;
                self.update_serial();
            }
            regs::TCSR => {
                let old = self.tcsr;
                // BE is status only; writes cannot touch it.
                self.tcsr = (self.tcsr & tcsr::BE) | (data & !(0x20 | tcsr::BE));
                if (old ^ self.tcsr) & (tcsr::EN | tcsr::SB) != 0 {
                    self.update_serial();
                }
            }
            regs::RCSR => {
                // CA, FE and the error summary are status only.
                self.rcsr =
                    (self.rcsr & (rcsr::CA | rcsr::FE)) | (data & !(0x20 | rcsr::CA | rcsr::FE | rcsr::ERR));
            }
            regs::TDR => self.write_tdr(data),
            regs::RDR => {}
            _ => debug!("uart: bogus register write {reg:#04x} = {data:#04x}"),
        }
    }

    fn read_rdr(&mut self) -> u8 {
        if self.rcsr & rcsr::CA != 0 {
            self.rcsr &= !rcsr::CA;
            self.rdr
        } else {
            debug!("uart: RDR read with no character available");
            0
        }
    }

    fn write_tdr(&mut self, data: u8) {
        if self.tcsr & tcsr::BE == 0 {
            debug!("uart: TDR full, byte discarded");
        } else {
            self.tdr = data;
            self.tcsr &= !tcsr::BE;
        }
        if self.tcsr & tcsr::EN != 0 && self.tx_bits_rem == 0 {
            // Shift register idle: load it and free the TDR slot.
            self.tx_shift = self.tdr;
            self.tx_bits_rem = self.bit_count;
            self.tcsr |= tcsr::BE;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn uart_with_sink() -> (Uart, Rc<RefCell<Vec<u8>>>) {
        let sent = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&sent);
        let uart = Uart::new(Some(Box::new(move |b| sink.borrow_mut().push(b))), None);
        (uart, sent)
    }

    #[test]
    fn test_reset_state() {
        let uart = Uart::new(None, None);
        assert_eq!(uart.cr, 0xe2);
        assert_eq!(uart.tcsr, 0x01);
        assert_eq!(uart.rcsr, 0x80);
        // 0xe2: 8 data bits, no parity, 1 stop -> 10-bit frame
        assert_eq!(uart.bit_count, 10);
    }

    #[test]
    fn test_transmit_byte() {
        let (mut uart, sent) = uart_with_sink();
        uart.register_write(regs::UARTCR, 0xc0); // 8N1, divisor 1
        uart.register_write(regs::TCSR, tcsr::EN);
        uart.register_write(regs::TDR, 0x55);
        assert_eq!(uart.tcsr & tcsr::BE, tcsr::BE); // moved into the shifter

        for _ in 0..10 {
            uart.tick();
        }
        assert_eq!(*sent.borrow(), vec![0x55]);
    }

    #[test]
    fn test_transmit_back_to_back() {
        let (mut uart, sent) = uart_with_sink();
        uart.register_write(regs::UARTCR, 0xc0);
        uart.register_write(regs::TCSR, tcsr::EN);
        uart.register_write(regs::TDR, 0x11);
        uart.register_write(regs::TDR, 0x22); // queued in TDR
        assert_eq!(uart.tcsr & tcsr::BE, 0);

        for _ in 0..20 {
            uart.tick();
        }
        assert_eq!(*sent.borrow(), vec![0x11, 0x22]);
        assert_eq!(uart.tcsr & tcsr::BE, tcsr::BE);
    }

    #[test]
    fn test_tx_interrupt_level() {
        let (mut uart, _sent) = uart_with_sink();
        uart.register_write(regs::TCSR, tcsr::EN | tcsr::IE);
        assert!(uart.tx_irq()); // buffer empty + IE
        uart.register_write(regs::TDR, 0x11);
        uart.register_write(regs::TDR, 0x22);
        assert!(!uart.tx_irq()); // TDR occupied
    }

    #[test]
    fn test_receive_byte() {
        let incoming = Rc::new(RefCell::new(vec![0xa5u8]));
        let src = Rc::clone(&incoming);
        let mut uart = Uart::new(None, Some(Box::new(move || src.borrow_mut().pop())));
        uart.register_write(regs::UARTCR, 0xc0); // 8N1, divisor 1
        uart.register_write(regs::RCSR, rcsr::EN | rcsr::IE);

        // First tick loads the shifter, ten more complete the frame.
        for _ in 0..11 {
            uart.tick();
        }
        assert!(uart.rx_irq());
        assert_eq!(uart.register_read(regs::RDR), 0xa5);
        assert!(!uart.rx_irq());
    }

    #[test]
    fn test_receive_overrun() {
        let incoming = Rc::new(RefCell::new(vec![0x22u8, 0x11]));
        let src = Rc::clone(&incoming);
        let mut uart = Uart::new(None, Some(Box::new(move || src.borrow_mut().pop())));
        uart.register_write(regs::UARTCR, 0xc0);
        uart.register_write(regs::RCSR, rcsr::EN);

        for _ in 0..22 {
            uart.tick();
        }
        // Second byte completed while the first was never read.
        assert_eq!(uart.rcsr & rcsr::OVE, rcsr::OVE);
        assert_eq!(uart.register_read(regs::RCSR) & rcsr::ERR, rcsr::ERR);
    }

    #[test]
    fn test_frame_length_tracks_configuration() {
        let mut uart = Uart::new(None, None);
        uart.register_write(regs::UARTCR, 0x00); // 5 data bits
        assert_eq!(uart.bit_count, 7);
        uart.register_write(regs::UARTCR, uartcr::P | 0xc0); // 8 + parity
        assert_eq!(uart.bit_count, 11);
        uart.register_write(regs::TCSR, tcsr::SB); // 2 stop bits
        assert_eq!(uart.bit_count, 12);
    }

    #[test]
    fn test_clock_divisor() {
        let (mut uart, sent) = uart_with_sink();
        uart.register_write(regs::UARTCR, 0xc2); // divisor 16
        uart.register_write(regs::TCSR, tcsr::EN);
        uart.register_write(regs::TDR, 0x7e);
        for _ in 0..10 * 16 - 1 {
            uart.tick();
        }
        assert!(sent.borrow().is_empty());
        uart.tick();
        assert_eq!(*sent.borrow(), vec![0x7e]);
    }
}
