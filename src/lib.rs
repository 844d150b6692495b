//! Z280 Emulator Core
//!
//! This crate provides a cycle-approximate interpreter for the Zilog Z280
//! microprocessor together with its on-chip peripherals: the memory
//! management unit, three counter/timers, four DMA channels, the UART and
//! the refresh-rate register. The host supplies the two address spaces and
//! a handful of callbacks; the core is driven by repeatedly asking it to
//! execute a budget of T-states.
//!
//! # Architecture
//!
//! - `bus`: the host boundary - memory/IO address-space traits and the
//!   callback types for interrupt acknowledge, UART bytes and BTI init
//! - `daisy`: Z80-style daisy-chained peripheral support (INT/IEO lines,
//!   RETI decoding)
//! - `cpu`: the Z280 itself - register file, MMU-mediated memory access,
//!   the eight prefix-indexed opcode tables, interrupts and traps
//! - `peripherals`: the on-chip devices (MMU, counter/timers, UART, DMA)
//!
//! # Address spaces
//!
//! Logical addresses are 16-bit and pass through the MMU, producing
//! physical addresses of up to 24 bits. I/O addresses are 24-bit, built as
//! `(IOP << 16) | port`; the on-chip peripherals claim their I/O windows
//! before the host space sees the access.
//!
//! # References
//! - Zilog Z280 MPU Preliminary Technical Manual (UM0027)

pub mod bus;
pub mod cpu;
pub mod daisy;
pub mod peripherals;

pub use bus::{IoSpace, MemorySpace};
pub use cpu::{Register, Z280, Z280Config};
pub use daisy::{DaisyChain, DaisyDevice};
