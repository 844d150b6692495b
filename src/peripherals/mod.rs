//! Z280 on-chip peripherals
//!
//! Each peripheral owns its register file; the CPU wires them to the
//! execute loop and to the internal-I/O decode. Register windows in I/O
//! space (all relative to the I/O page register):
//!
//! | Peripheral | Page | Mask | Base |
//! |------------|------|------|------|
//! | UART       | 0xFE | 0xF0 | 0x10 |
//! | CT 0/1/2   | 0xFE | 0xE0 | 0xE0 |
//! | DMA        | 0xFF | 0xE0 | 0x00 |
//! | MMU        | 0xFF | 0xF0 | 0xF0 |
//! | RRR        | 0xFF | full | 0xE8 |

pub mod dma;
pub mod mmu;
pub mod timer;
pub mod uart;

pub use dma::{Dma, DmaChannel};
pub use mmu::Mmu;
pub use timer::CounterTimer;
pub use uart::Uart;
