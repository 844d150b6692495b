//! Host boundary for the Z280 core
//!
//! The CPU never owns memory. The board supplies two address spaces - one
//! for program/data memory, one for external I/O - and the core reaches
//! them only through the entry points below. Physical memory addresses are
//! up to 24 bits wide; I/O addresses are 24 bits, formed as
//! `(IOP << 16) | port`.
//!
//! The raw read forms exist for opcode fetches and interrupt-vector-table
//! lookups, which must not trigger memory-mapped-I/O side effects.

/// Physical program/data memory as seen from the CPU and DMA engine.
///
/// Word access is only issued when the CPU is configured with a 16-bit bus
/// and the address is even; the default implementations compose two byte
/// transfers (little-endian), which is correct for boards that do not model
/// bus width.
pub trait MemorySpace {
    fn read_byte(&mut self, addr: u32) -> u8;
    fn write_byte(&mut self, addr: u32, data: u8);

    fn read_word(&mut self, addr: u32) -> u16 {
        let lo = self.read_byte(addr) as u16;
        let hi = self.read_byte(addr + 1) as u16;
        lo | (hi << 8)
    }

    fn write_word(&mut self, addr: u32, data: u16) {
        self.write_byte(addr, data as u8);
        self.write_byte(addr + 1, (data >> 8) as u8);
    }

    /// Side-effect-free byte read, used for opcode fetches.
    fn read_raw_byte(&mut self, addr: u32) -> u8 {
        self.read_byte(addr)
    }

    /// Side-effect-free word read, used for IVT entries on a 16-bit bus.
    fn read_raw_word(&mut self, addr: u32) -> u16 {
        let lo = self.read_raw_byte(addr) as u16;
        let hi = self.read_raw_byte(addr + 1) as u16;
        lo | (hi << 8)
    }
}

/// External I/O space. Addresses are 24-bit: `(IOP << 16) | port`.
pub trait IoSpace {
    fn read_byte(&mut self, addr: u32) -> u8;
    fn write_byte(&mut self, addr: u32, data: u8);

    fn read_word(&mut self, addr: u32) -> u16 {
        let lo = self.read_byte(addr) as u16;
        let hi = self.read_byte(addr + 1) as u16;
        lo | (hi << 8)
    }

    fn write_word(&mut self, addr: u32, data: u16) {
        self.write_byte(addr, data as u8);
        self.write_byte(addr + 1, (data >> 8) as u8);
    }
}

/// Interrupt-acknowledge callback. Called with the IRQ line (0-2); the
/// meaning of the returned value depends on the current interrupt mode:
/// mode 0 gets a 1- or 3-byte instruction, mode 2 a vector byte, mode 3 a
/// secondary vector-table offset.
pub type IrqAckFn = dyn FnMut(u8) -> u32;

/// UART transmit callback, invoked with each completed byte.
pub type UartTxFn = dyn FnMut(u8);

/// UART receive callback. `None` means no byte is waiting.
pub type UartRxFn = dyn FnMut() -> Option<u8>;

/// Supplies the Bus Timing and Initialization byte sampled from AD0-AD7 at
/// reset. The core stores it verbatim.
pub type BtiInitFn = dyn FnMut() -> u8;
