//! Z280 CPU
//!
//! The Z280 is a Z80-compatible processor with a 16-bit ALU, an on-chip
//! MMU, counter/timers, DMA and a UART. Execution is cooperative: the host
//! hands the core a budget of T-states and each iteration of the execute
//! loop services DMA, samples interrupts, runs one instruction and clocks
//! the timers with the cycles it consumed.
//!
//! # Module Organization
//!
//! - `flags`: flag bit constants and the precomputed flag tables
//! - `tables`: cycle-count tables and the block-I/O parity tables
//! - `helpers`: register accessors, MMU-mediated memory access, stack
//!   operations, ALU primitives and the Z280 effective-address modes
//! - `execute*`: the eight prefix-indexed dispatch tables
//!
//! # Privilege model
//!
//! The master status register selects user or system mode. System mode
//! owns SSP, the control registers and the I/O instructions (user-mode I/O
//! is a trap when TCR inhibits it). Traps and interrupts always stack
//! their frames on the system stack.

use crate::bus::{BtiInitFn, IoSpace, IrqAckFn, MemorySpace, UartRxFn, UartTxFn};
use crate::daisy::DaisyChain;
use crate::peripherals::timer::CounterTimer;
use crate::peripherals::{dma, timer, uart, Dma, Mmu, Uart};
use log::{debug, trace, warn};

pub mod flags;
pub mod tables;

mod execute;
mod execute_dd;
mod execute_dded;
mod execute_ed;
mod execute_fd;
mod execute_fded;
mod execute_xycb;
mod helpers;

#[cfg(test)]
mod tests;

/// A 16-bit register pair addressable as a word or as its two halves.
/// The high half is the first register named in the mnemonic (H in HL).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pair {
    pub w: u16,
}

impl Pair {
    #[inline]
    pub fn hi(self) -> u8 {
        (self.w >> 8) as u8
    }

    #[inline]
    pub fn lo(self) -> u8 {
        self.w as u8
    }

    #[inline]
    pub fn set_hi(&mut self, v: u8) {
        self.w = (self.w & 0x00ff) | (u16::from(v) << 8);
    }

    #[inline]
    pub fn set_lo(&mut self, v: u8) {
        self.w = (self.w & 0xff00) | u16::from(v);
    }
}

/// Abort of an in-flight instruction.
///
/// `Accv` is the recoverable case: the execute loop rebuilds the machine
/// state as an access-violation trap. `Fatal` is an abort raised while a
/// trap or interrupt frame was itself being stacked; the CPU parks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Abort {
    Accv,
    Fatal,
}

/// CPU traps, ordered as the hardware documents them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trap {
    /// EPU memory-to-EPU operand transfer
    Epum,
    /// EPU EPU-to-memory operand transfer
    Mepu,
    /// EPU flag transfer
    Epuf,
    /// EPU internal operation
    Epui,
    /// Privileged instruction in user mode
    Priv,
    /// System call
    Sc,
    /// Access violation
    Accv,
    /// System stack overflow warning
    Sso,
    /// Division exception
    Div,
    /// Single step
    Ss,
    /// Breakpoint on halt
    Bp,
}

/// Master status register bits
pub mod msr {
    /// User (set) / system (clear) mode
    pub const US: u16 = 0x4000;
    /// Breakpoint-on-halt
    pub const BH: u16 = 0x1000;
    /// Single-step pending
    pub const SSP: u16 = 0x0200;
    /// Single-step
    pub const SS: u16 = 0x0100;
    /// Interrupt request enable, one bit per group 0-6
    pub const IRE_MASK: u16 = 0x007f;
}

/// Interrupt status register bits
pub mod isr {
    /// Interrupt vector enable field
    pub const IVE_MASK: u16 = 0xf000;
    /// Interrupt mode field (read-only reflection)
    pub const IM_MASK: u16 = 0x0300;
    /// Interrupt request pending field (read-only reflection)
    pub const IRP_MASK: u16 = 0x007f;
}

/// Trap control register bits
pub mod tcr {
    /// Inhibit user I/O
    pub const I: u8 = 0x04;
    /// EPU enable
    pub const E: u8 = 0x02;
    /// System stack overflow warning
    pub const S: u8 = 0x01;
}

/// Control register numbers, as selected by C for LDCTL.
pub mod creg {
    pub const MSR: u8 = 0x00;
    pub const BTC: u8 = 0x02;
    pub const SSLR: u8 = 0x04;
    pub const IVTP: u8 = 0x06;
    pub const IOP: u8 = 0x08;
    pub const TCR: u8 = 0x10;
    pub const CCR: u8 = 0x12;
    pub const LAR: u8 = 0x14;
    pub const ISR: u8 = 0x16;
    pub const BTI: u8 = 0xff;
}

/// Interrupt sources in priority order (0 highest).
pub mod int_source {
    pub const NMI: usize = 0;
    pub const IRQ0: usize = 1;
    pub const CTR0: usize = 2;
    pub const DMA0: usize = 3;
    pub const IRQ1: usize = 4;
    pub const CTR1: usize = 5;
    pub const UARTRX: usize = 6;
    pub const DMA1: usize = 7;
    pub const IRQ2: usize = 8;
    pub const UARTTX: usize = 9;
    pub const DMA2: usize = 10;
    pub const CTR2: usize = 11;
    pub const DMA3: usize = 12;
    pub const COUNT: usize = 13;
}

/// MSR interrupt-enable group of each source; NMI (index 0) is never
/// masked and has no group bit.
const INT_GROUP: [u16; int_source::COUNT] = [0, 0, 1, 1, 2, 3, 3, 3, 4, 5, 5, 6, 6];

const CT_IRQ: [usize; 3] = [int_source::CTR0, int_source::CTR1, int_source::CTR2];
const DMA_IRQ: [usize; 4] = [
    int_source::DMA0,
    int_source::DMA1,
    int_source::DMA2,
    int_source::DMA3,
];

/// Internal I/O register windows, decoded against the full 24-bit I/O
/// address (the page must match the I/O page register the CPU drives).
mod iowin {
    pub const UART_PAGE: u8 = 0xfe;
    pub const UART_MASK: u8 = 0xf0;
    pub const UART_BASE: u8 = 0x10;
    pub const CT_PAGE: u8 = 0xfe;
    pub const CT_MASK: u8 = 0xe0;
    pub const CT_BASE: u8 = 0xe0;
    pub const DMA_PAGE: u8 = 0xff;
    pub const DMA_MASK: u8 = 0xe0;
    pub const DMA_BASE: u8 = 0x00;
    pub const MMU_PAGE: u8 = 0xff;
    pub const MMU_MASK: u8 = 0xf0;
    pub const MMU_BASE: u8 = 0xf0;
    pub const RRR_PAGE: u8 = 0xff;
    pub const RRR_PORT: u8 = 0xe8;
}

/// MMU I/O window register offsets
mod mmureg {
    pub const MCR: u8 = 0;
    pub const PDRP: u8 = 1;
    pub const IP: u8 = 2;
    pub const BMP: u8 = 4;
    pub const DSP: u8 = 5;
}

/// DMA I/O window register offsets within a channel
mod dmareg {
    pub const DAL: u8 = 0;
    pub const DAH: u8 = 1;
    pub const SAL: u8 = 2;
    pub const SAH: u8 = 3;
    pub const CNT: u8 = 4;
    pub const TDR: u8 = 5;
    pub const MCR: u8 = 0x1f;
}

/// Construction parameters. CTIN rates are in Hz; a zero CTIN1 leaves the
/// UART without an external bit clock.
#[derive(Debug, Clone, Copy)]
pub struct Z280Config {
    /// CPU clock in Hz
    pub clock: u32,
    /// 16-bit external bus (the OPT pin)
    pub bus16: bool,
    /// CTIN0-2 input clock rates
    pub ctin: [u32; 3],
}

impl Default for Z280Config {
    fn default() -> Self {
        Self { clock: 12_500_000, bus16: false, ctin: [0; 3] }
    }
}

/// Registers exposed through [`Z280::get_state`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Register {
    Pc,
    Sp,
    Usp,
    Ssp,
    Af,
    Bc,
    De,
    Hl,
    Ix,
    Iy,
    A,
    B,
    C,
    D,
    E,
    H,
    L,
    Af2,
    Bc2,
    De2,
    Hl2,
    R,
    I,
    Im,
    Iff2,
    Halt,
    Msr,
}

/// One Z280 CPU instance with its on-chip peripherals.
pub struct Z280 {
    // Register file
    pub af: Pair,
    pub bc: Pair,
    pub de: Pair,
    pub hl: Pair,
    pub ix: Pair,
    pub iy: Pair,
    pub pc: Pair,
    /// PC of the instruction currently executing (traps that blame the
    /// faulting instruction push this)
    pub prepc: Pair,
    pub ssp: u16,
    pub usp: u16,

    // Alternate file and the JAR/JAF tracking
    pub af2: Pair,
    pub bc2: Pair,
    pub de2: Pair,
    pub hl2: Pair,
    pub af2_in_use: bool,
    pub bc2_in_use: bool,

    /// General-purpose byte register (not a refresh counter on the Z280)
    pub r: u8,
    /// Interrupt page register (mode 2 vector base)
    pub i: u8,
    /// Interrupt mode 0-3
    pub im: u8,
    /// Shadow of the MSR interrupt-enable field, restored by RETN
    pub iff2: u8,
    pub halted: bool,

    // Control registers
    pub msr: u16,
    /// ISR vector-enable field; the rest of ISR is composed on read
    pub isr_ive: u16,
    pub ivtp: u16,
    pub iop: u8,
    pub btc: u8,
    pub bti: u8,
    pub sslr: u16,
    pub tcr: u8,
    pub ccr: u8,
    pub lar: u8,
    /// Refresh rate register
    pub rrr: u8,

    // On-chip peripherals
    pub mmu: Mmu,
    pub ct: [CounterTimer; 3],
    pub uart: Uart,
    pub dma: Dma,

    // Interrupt state
    pub nmi_state: bool,
    pub nmi_pending: bool,
    pub irq_state: [bool; 3],
    pub int_pending: [bool; int_source::COUNT],
    /// One-instruction shadow after any EI variant
    after_ei: bool,

    /// Effective address of the current operand
    pub(crate) ea: u16,

    // Cycle accounting
    icount: i32,
    pub(crate) extra_cycles: u32,
    timer_cnt: u16,
    ctin1_uart_timer: u16,
    ctin1_brg_const: u16,

    // Configuration
    pub(crate) bus16: bool,
    clock: u32,
    ctin: [u32; 3],

    // Host boundary
    pub(crate) mem: Box<dyn MemorySpace>,
    pub(crate) io: Box<dyn IoSpace>,
    irq_ack: Option<Box<IrqAckFn>>,
    daisy: Option<DaisyChain>,
    bti_init: Option<Box<BtiInitFn>>,
}

impl Z280 {
    pub fn new(config: Z280Config, mem: Box<dyn MemorySpace>, io: Box<dyn IoSpace>) -> Self {
        let ctin1_brg_const = if config.ctin[1] != 0 {
            (config.clock / config.ctin[1]) as u16
        } else {
            0
        };
        Self {
            af: Pair::default(),
            bc: Pair::default(),
            de: Pair::default(),
            hl: Pair::default(),
            ix: Pair::default(),
            iy: Pair::default(),
            pc: Pair::default(),
            prepc: Pair::default(),
            ssp: 0,
            usp: 0,
            af2: Pair::default(),
            bc2: Pair::default(),
            de2: Pair::default(),
            hl2: Pair::default(),
            af2_in_use: false,
            bc2_in_use: false,
            r: 0,
            i: 0,
            im: 0,
            iff2: 0,
            halted: false,
            msr: 0,
            isr_ive: 0,
            ivtp: 0,
            iop: 0,
            btc: 0,
            bti: 0,
            sslr: 0,
            tcr: 0,
            ccr: 0,
            lar: 0,
            rrr: 0,
            mmu: Mmu::new(),
            ct: [CounterTimer::new(); 3],
            uart: Uart::new(None, None),
            dma: Dma::new(),
            nmi_state: false,
            nmi_pending: false,
            irq_state: [false; 3],
            int_pending: [false; int_source::COUNT],
            after_ei: false,
            ea: 0,
            icount: 0,
            extra_cycles: 0,
            timer_cnt: 0,
            ctin1_uart_timer: 0,
            ctin1_brg_const,
            bus16: config.bus16,
            clock: config.clock,
            ctin: config.ctin,
            mem,
            io,
            irq_ack: None,
            daisy: None,
            bti_init: None,
        }
    }

    pub fn set_irq_ack(&mut self, cb: Box<IrqAckFn>) {
        self.irq_ack = Some(cb);
    }

    pub fn set_daisy_chain(&mut self, chain: DaisyChain) {
        self.daisy = Some(chain);
    }

    pub fn set_bti_init(&mut self, cb: Box<BtiInitFn>) {
        self.bti_init = Some(cb);
    }

    pub fn set_uart_callbacks(&mut self, tx: Option<Box<UartTxFn>>, rx: Option<Box<UartRxFn>>) {
        self.uart = Uart::new(tx, rx);
    }

    /// Reset all programmer-visible state. BTI is reloaded from the host
    /// callback and CCR assumes its post-reset default.
    pub fn reset(&mut self) {
        debug!("z280: reset");
        self.prepc = Pair::default();
        self.pc = Pair::default();
        self.usp = 0;
        self.ssp = 0;
        self.af = Pair::default();
        self.bc = Pair::default();
        self.de = Pair::default();
        self.hl = Pair::default();
        self.ix = Pair::default();
        self.iy = Pair::default();
        self.af2 = Pair::default();
        self.bc2 = Pair::default();
        self.de2 = Pair::default();
        self.hl2 = Pair::default();
        self.af2_in_use = false;
        self.bc2_in_use = false;
        self.r = 0;
        self.iff2 = 0;
        self.halted = false;
        self.im = 0;
        self.i = 0;
        self.nmi_state = false;
        self.nmi_pending = false;
        self.int_pending = [false; int_source::COUNT];
        self.irq_state = [false; 3];
        self.after_ei = false;
        self.ea = 0;

        self.msr = 0;
        self.isr_ive = 0;
        self.ivtp = 0;
        self.iop = 0;
        self.sslr = 0;
        self.tcr = 0;
        self.lar = 0;

        self.rrr = 0;
        self.mmu.reset();
        for ct in &mut self.ct {
            ct.reset();
        }
        self.timer_cnt = 0;
        self.ctin1_uart_timer = 0;
        self.uart.reset();
        self.dma.reset();

        if let Some(daisy) = self.daisy.as_mut() {
            daisy.reset();
        }

        self.btc = 0x30;
        self.bti = self.bti_init.as_mut().map_or(0, |cb| cb());
        self.ccr = 0x80;
    }

    #[inline]
    pub fn is_system(&self) -> bool {
        self.msr & msr::US == 0
    }

    #[inline]
    pub fn is_user(&self) -> bool {
        !self.is_system()
    }

    // ========== Execute Loop ==========

    /// Run a budget of T-states. Each iteration services DMA, samples
    /// interrupts, executes one instruction (or burns HALT cycles) and
    /// then advances the counter/timers by the cycles consumed.
    pub fn execute(&mut self, t_states: i32) {
        self.icount = t_states;

        while self.icount > 0 {
            let mut cycles = self.check_dma();
            cycles += self.check_interrupts();
            self.after_ei = false;

            self.prepc = self.pc;

            if !self.halted {
                if self.msr & msr::SSP != 0 {
                    self.msr &= !msr::SSP;
                    cycles += self.take_trap_or_fatal(Trap::Ss);
                } else {
                    // Arm single-step for the following instruction.
                    self.msr = if self.msr & msr::SS != 0 {
                        self.msr | msr::SSP
                    } else {
                        self.msr & !msr::SSP
                    };
                    self.extra_cycles = 0;
                    let result = self.fetch_op().and_then(|op| self.exec_op(op));
                    match result {
                        Ok(c) => cycles += c + self.extra_cycles,
                        Err(Abort::Accv) => cycles += self.take_trap_or_fatal(Trap::Accv),
                        Err(Abort::Fatal) => cycles += self.take_fatal(),
                    }
                }
            } else {
                cycles += 3;
            }

            self.icount -= cycles as i32;
            self.clock_timers(cycles);
        }
    }

    // ========== Interrupt Lines ==========

    /// Drive an external IRQ line (0-2). With a daisy chain installed the
    /// IRQ0 state is recomputed from the chain.
    pub fn set_irq_line(&mut self, line: usize, state: bool) {
        trace!("z280: irq line {line} = {state}");
        self.irq_state[line] = state;
        if let Some(daisy) = self.daisy.as_mut() {
            self.irq_state[0] = daisy.update_irq_state();
        }
    }

    /// Drive the NMI line; a rising edge latches a pending NMI.
    pub fn set_nmi_line(&mut self, state: bool) {
        if !self.nmi_state && state {
            self.nmi_pending = true;
        }
        self.nmi_state = state;
    }

    /// Drive a DMA channel's RDY line.
    pub fn set_rdy_line(&mut self, channel: usize, state: bool) {
        self.dma.rdy[channel] = state;
    }

    /// Level-set an internal peripheral's request.
    fn set_irq_internal(&mut self, source: usize, state: bool) {
        self.int_pending[source] = state;
    }

    fn sync_uart_interrupts(&mut self) {
        let tx = self.uart.tx_irq();
        let rx = self.uart.rx_irq();
        self.set_irq_internal(int_source::UARTTX, tx);
        self.set_irq_internal(int_source::UARTRX, rx);
    }

    fn sync_dma_interrupt(&mut self, channel: usize) {
        let level = self.dma.ch[channel].irq_level();
        trace!("z280: dma{channel} irq {level}");
        self.set_irq_internal(DMA_IRQ[channel], level);
    }

    // ========== Interrupt Acceptance ==========

    /// Sample the external lines, then take the highest-priority admitted
    /// interrupt. NMI is unconditional; everything else needs its MSR
    /// group enable and must not sit in the EI shadow.
    fn check_interrupts(&mut self) -> u32 {
        // The daisy chain drives INT0 live; devices drop their request on
        // acknowledge.
        if let Some(daisy) = self.daisy.as_mut() {
            self.irq_state[0] = daisy.update_irq_state();
        }
        self.int_pending[int_source::IRQ0] = self.irq_state[0];
        self.int_pending[int_source::IRQ1] = self.irq_state[1];
        self.int_pending[int_source::IRQ2] = self.irq_state[2];

        if self.nmi_pending || self.int_pending[int_source::NMI] {
            self.nmi_pending = false;
            self.int_pending[int_source::NMI] = false;
            return self.take_interrupt_or_fatal(int_source::NMI);
        }

        if self.msr & msr::IRE_MASK != 0 && !self.after_ei {
            for source in int_source::IRQ0..int_source::COUNT {
                if self.int_pending[source] && self.msr & (1 << INT_GROUP[source]) != 0 {
                    return self.take_interrupt_or_fatal(source);
                }
            }
        }
        0
    }

    fn take_interrupt_or_fatal(&mut self, source: usize) -> u32 {
        match self.take_interrupt(source) {
            Ok(c) => c,
            Err(Abort::Accv) => self.take_trap_or_fatal(Trap::Accv),
            Err(Abort::Fatal) => self.take_fatal(),
        }
    }

    fn take_trap_or_fatal(&mut self, trap: Trap) -> u32 {
        match self.take_trap(trap) {
            Ok(c) => c,
            Err(_) => self.take_fatal(),
        }
    }

    /// Fetch the vector for an acknowledged external interrupt. IRQ0
    /// consults the daisy chain first; otherwise the host callback is
    /// asked, with the line number collapsed to 0 on an 8-bit bus.
    fn irq_vector(&mut self, source: usize) -> u32 {
        if source == int_source::IRQ0 {
            if let Some(daisy) = self.daisy.as_mut() {
                if let Some(vector) = daisy.acknowledge() {
                    return vector;
                }
            }
        }
        let line = if self.bus16 { (source >> 2) as u8 } else { 0 };
        let vector = self.irq_ack.as_mut().map_or(0, |cb| cb(line));
        debug!("z280: iack source {source} line {line} vector {vector:#x}");
        vector
    }

    fn take_interrupt(&mut self, source: usize) -> Result<u32, Abort> {
        let mut cycles = 0u32;

        self.leave_halt();

        let external = matches!(
            source,
            int_source::NMI | int_source::IRQ0 | int_source::IRQ1 | int_source::IRQ2
        );

        if self.im != 3 && external {
            if source == int_source::NMI {
                // IRE shadow for RETN, then a plain RST-style frame.
                self.iff2 = (self.msr & msr::IRE_MASK) as u8;
                self.msr &= !(msr::US | msr::SS | msr::IRE_MASK);
                self.push_frame(self.pc.w)?;
                self.pc.w = 0x0066;
                debug!("z280: nmi -> 0066");
                cycles += u32::from(tables::CC_OP[0xcd]);
            } else {
                match self.im {
                    0 => {
                        self.msr &= !(msr::US | msr::SS | msr::IRE_MASK);
                        let vector = self.irq_vector(source);
                        debug!("z280: im0 vector {vector:#08x}");
                        match vector & 0xff0000 {
                            0xcd0000 => {
                                self.push_frame(self.pc.w)?;
                                self.pc.w = vector as u16;
                                cycles += u32::from(tables::CC_OP[0xcd])
                                    - u32::from(tables::CC_EX[0xff]);
                            }
                            0xc30000 => {
                                self.pc.w = vector as u16;
                                cycles += u32::from(tables::CC_OP[0xc3])
                                    - u32::from(tables::CC_EX[0xff]);
                            }
                            _ => {
                                self.push_frame(self.pc.w)?;
                                self.pc.w = (vector as u16) & 0x0038;
                                let slot = self.pc.w as usize;
                                cycles += u32::from(tables::CC_OP[slot])
                                    .wrapping_sub(u32::from(tables::CC_EX[slot]));
                            }
                        }
                    }
                    1 => {
                        self.msr &= !(msr::US | msr::SS | msr::IRE_MASK);
                        debug!("z280: im1 -> 0038");
                        self.push_frame(self.pc.w)?;
                        self.pc.w = 0x0038;
                        cycles +=
                            u32::from(tables::CC_OP[0xff]) - u32::from(tables::CC_EX[0xff]);
                    }
                    _ => {
                        // Mode 2: vector through [I : byte from the bus].
                        let vector = self.irq_vector(source);
                        self.msr &= !(msr::US | msr::SS | msr::IRE_MASK);
                        let table = (u16::from(self.i) << 8) | (vector as u16 & 0x00ff);
                        self.push_frame(self.pc.w)?;
                        self.pc.w = self.read_mem16(table)?;
                        debug!("z280: im2 [{table:#06x}] = {:#06x}", self.pc.w);
                        cycles += u32::from(tables::CC_OP[0xcd]);
                    }
                }
            }
        } else {
            // Mode 3, used by every internal source regardless of IM.
            let (vecoffs, isrmask, vectable): (u16, u16, u16) = match source {
                int_source::NMI => (0x04, 0x1000, 0x70),
                int_source::IRQ0 => (0x08, 0x2000, 0x70),
                int_source::IRQ1 => (0x0c, 0x3000, 0x170),
                int_source::IRQ2 => (0x10, 0x4000, 0x270),
                int_source::CTR0 => (0x14, 0, 0),
                int_source::CTR1 => (0x18, 0, 0),
                int_source::CTR2 => (0x20, 0, 0),
                int_source::DMA0 => (0x24, 0, 0),
                int_source::DMA1 => (0x28, 0, 0),
                int_source::DMA2 => (0x2c, 0, 0),
                int_source::DMA3 => (0x30, 0, 0),
                int_source::UARTRX => (0x34, 0, 0),
                _ => (0x38, 0, 0),
            };

            let mut vector = if external {
                let v = self.irq_vector(source);
                if self.bus16 {
                    v
                } else {
                    v & 0xff
                }
            } else {
                u32::from(vecoffs)
            };

            let old_msr = self.msr;
            self.msr &= !msr::US;
            self.push_frame(self.pc.w)?;
            self.push_frame(old_msr)?;
            self.push_frame(vector as u16)?;

            let ivaddr = self.ivt_address(vecoffs);
            self.msr = self.read_phys16(ivaddr);
            if self.isr_ive & isrmask == 0 || isrmask == 0 {
                self.pc.w = self.read_phys16(ivaddr + 2);
                debug!(
                    "z280: im3 ivt[{vecoffs:#04x}] -> pc {:#06x} msr {:#06x}",
                    self.pc.w, self.msr
                );
            } else {
                // Secondary vectoring: the device vector indexes a
                // per-line table further into the IVT.
                vector += u32::from(vectable);
                self.pc.w = self.read_phys16(ivaddr + vector);
                debug!(
                    "z280: im3 vectored ivt[{vecoffs:#04x}+{vector:#05x}] -> pc {:#06x}",
                    self.pc.w
                );
            }
            cycles += u32::from(tables::CC_OP[0xcd]);
        }

        self.check_sso()?;
        Ok(cycles)
    }

    // ========== Traps ==========

    #[inline]
    fn ivt_address(&self, offset: u16) -> u32 {
        (u32::from(self.ivtp & 0xfff0) << 8) + u32::from(offset)
    }

    /// Push one word of a trap/interrupt frame onto the system stack. An
    /// access violation here is unrecoverable.
    fn push_frame(&mut self, value: u16) -> Result<(), Abort> {
        self.ssp = self.ssp.wrapping_sub(2);
        self.write_mem16(self.ssp, value).map_err(|_| Abort::Fatal)
    }

    /// System-stack-overflow warning: taken when the stack pointer lands
    /// in the 16-byte window at SSLR while TCR arms the check.
    pub(crate) fn check_sso(&mut self) -> Result<(), Abort> {
        if self.tcr & tcr::S != 0 && self.ssp & 0xfff0 == self.sslr {
            let c = self.take_trap(Trap::Sso)?;
            self.extra_cycles += c;
        }
        Ok(())
    }

    /// Build a trap frame and vector through the IVT. The saved PC is the
    /// faulting instruction's for the blame-carrying traps, the next
    /// instruction's otherwise; SC additionally stacks its 16-bit
    /// argument, the EPU traps their effective address and EPU PC.
    pub(crate) fn take_trap(&mut self, trap: Trap) -> Result<u32, Abort> {
        let (vector, cycles) = match trap {
            Trap::Ss => (0x3c, 26),
            Trap::Bp => (0x40, 26),
            Trap::Div => (0x44, 25),
            Trap::Sso => (0x48, 26),
            Trap::Accv => (0x4c, 25),
            Trap::Sc => (0x50, 30),
            Trap::Priv => (0x54, 26),
            Trap::Epum => (0x58, 38),
            Trap::Mepu => (0x5c, 38),
            Trap::Epuf => (0x60, 31),
            Trap::Epui => (0x64, 31),
        };
        debug!("z280: trap {trap:?} vector {vector:#04x}");

        match trap {
            Trap::Accv => self.mmu.latch_fault_index(),
            Trap::Sso => self.tcr &= !tcr::S,
            _ => {}
        }

        let saves_prepc = matches!(
            trap,
            Trap::Bp | Trap::Accv | Trap::Div | Trap::Priv
        );
        let mut old_msr = self.msr;
        if saves_prepc {
            // The saved copy must not re-arm single-step on return.
            old_msr &= !msr::SSP;
        }

        // SC reads its immediate argument before the frame is stacked.
        let argument = if trap == Trap::Sc {
            Some(self.arg16()?)
        } else {
            None
        };

        self.msr &= !msr::US;

        let saved_pc = if saves_prepc { self.prepc.w } else { self.pc.w };
        self.push_frame(saved_pc)?;
        self.push_frame(old_msr)?;
        if let Some(arg) = argument {
            self.push_frame(arg)?;
        }
        if matches!(trap, Trap::Epum | Trap::Mepu) {
            let ea = self.ea;
            self.push_frame(ea)?;
        }
        if matches!(trap, Trap::Epum | Trap::Mepu | Trap::Epuf | Trap::Epui) {
            let epu_pc = self.pc.w.wrapping_sub(4);
            self.push_frame(epu_pc)?;
        }

        let ivaddr = self.ivt_address(vector);
        self.msr = self.read_phys16(ivaddr);
        self.pc.w = self.read_phys16(ivaddr + 2);
        self.check_sso()?;
        Ok(cycles)
    }

    /// Unrecoverable abort: a fault while stacking a trap frame. The
    /// machine parks with diagnostic state in HL/DE.
    fn take_fatal(&mut self) -> u32 {
        warn!(
            "z280: fatal abort at pc {:#06x}, halting",
            self.prepc.w
        );
        self.hl.w = self.prepc.w;
        self.de.w = self.msr;
        self.msr &= !msr::IRE_MASK;
        self.halted = true;
        15
    }

    // ========== HALT ==========

    pub(crate) fn enter_halt(&mut self) {
        self.pc.w = self.pc.w.wrapping_sub(1);
        self.halted = true;
    }

    pub(crate) fn leave_halt(&mut self) {
        if self.halted {
            self.halted = false;
            self.pc.w = self.pc.w.wrapping_add(1);
        }
    }

    // ========== Counter/Timers ==========

    /// Reload a unit from its time constant, honoring the CT0:CT1 link.
    fn reload_timer(&mut self, unit: usize) {
        let linked = self.ct[0].cr & timer::ctcr::CTC != 0;
        if unit != 0 || !linked {
            self.ct[unit].reload();
            trace!("z280: ct{unit} reloaded {:#06x}", self.ct[unit].count);
        }
        if unit == 1 && linked {
            self.ct[0].reload();
        }
    }

    /// A unit counted to (or through) zero: latch completion, feed the
    /// cascade and the UART, and raise the unit's interrupt if enabled.
    fn terminal_count(&mut self, unit: usize) {
        trace!("z280: ct{unit} terminal count");
        self.ct[unit].mark_terminal_count();

        let linked = self.ct[0].cr & timer::ctcr::CTC != 0;
        if unit == 0 && linked {
            self.ct[1].count = self.ct[1].count.wrapping_sub(1);
        }

        if unit == 1 && self.uart.clocked_from_ct1() {
            self.uart.tick();
            self.sync_uart_interrupts();
        }

        if self.ct[unit].interrupt_enabled() {
            debug!("z280: ct{unit} interrupt");
            self.set_irq_internal(CT_IRQ[unit], true);
        }
    }

    /// Advance the timer prescaler by the executed cycles and decrement
    /// every running unit by the accumulated quarter-clock ticks.
    fn clock_timers(&mut self, cycles: u32) {
        // The UART bit clock bypasses CT1 when sourced from the CTIN1 pin;
        // the ratio of main clock to CTIN1 is precomputed.
        if !self.uart.clocked_from_ct1() && self.ctin1_brg_const != 0 {
            self.ctin1_uart_timer = self.ctin1_uart_timer.wrapping_add(cycles as u16);
            if self.ctin1_uart_timer >= self.ctin1_brg_const {
                self.uart.tick();
                self.sync_uart_interrupts();
                self.ctin1_uart_timer -= self.ctin1_brg_const;
            }
        }

        self.timer_cnt = self.timer_cnt.wrapping_add(cycles as u16);
        if self.timer_cnt < 4 {
            return;
        }
        let decrement = self.timer_cnt >> 2;
        self.timer_cnt &= 3;

        for unit in 0..3 {
            if !self.ct[unit].running() {
                continue;
            }
            let linked = self.ct[0].cr & timer::ctcr::CTC != 0;
            let old = self.ct[unit].count;
            // CT1 only counts on its own when not linked behind CT0.
            if unit != 1 || !linked {
                self.ct[unit].count = old.wrapping_sub(decrement);
            }
            let new = self.ct[unit].count;
            if new == 0 || (old != 0 && new > old) {
                // Reached or passed through zero: terminal count, and in
                // continuous mode the time constant reloads right away.
                self.terminal_count(unit);
                if self.ct[unit].continuous() {
                    self.reload_timer(unit);
                }
            } else if self.ct[unit].continuous() && old == 0 {
                self.reload_timer(unit);
            }
        }
    }

    /// Baud-rate-generator constant the UART divides by when clocked from
    /// CT1: the CT1 time constant plus one, widened by CT0 when linked.
    pub fn uart_brg_constant(&self) -> u32 {
        if self.ct[0].cr & timer::ctcr::CTC != 0 {
            (u32::from(self.ct[0].tc) | (u32::from(self.ct[1].tc) << 16)) + 1
        } else {
            u32::from(self.ct[1].tc) + 1
        }
    }

    /// The UART's source bit rate in Hz: the quarter-speed CPU clock
    /// divided by the BRG constant when CT1 drives the channel, otherwise
    /// the CTIN1 pin rate.
    pub fn uart_bit_rate(&self) -> u32 {
        if self.uart.clocked_from_ct1() {
            (self.clock >> 2) / self.uart_brg_constant()
        } else {
            self.ctin[1]
        }
    }

    // ========== DMA Engine ==========

    /// Run the DMA engine for one slot: continue an active channel, or
    /// arbitrate a fresh request (10 cycles) and run its first burst.
    fn check_dma(&mut self) -> u32 {
        if self.dma.active.is_some() {
            return self.take_dma();
        }

        for channel in 0..4 {
            if self.dma.requesting(channel) {
                debug!("z280: dma{channel} service request");
                self.dma.pending[channel] = true;
                break;
            }
        }

        for channel in 0..4 {
            if self.dma.pending[channel] {
                self.dma.active = Some(channel);
                self.dma.pending[channel] = false;
                return self.take_dma() + 10;
            }
        }
        0
    }

    /// One bus tenure of the active channel: a single transfer, a burst
    /// until RDY drops, or the whole transaction in continuous mode.
    fn take_dma(&mut self) -> u32 {
        let channel = match self.dma.active {
            Some(c) => c,
            None => return 0,
        };
        let mut cycles = 0u32;

        trace!(
            "z280: dma{channel} busrq dar={:#08x} sar={:#08x} cnt={:#06x}",
            self.dma.ch[channel].dar,
            self.dma.ch[channel].sar,
            self.dma.ch[channel].count
        );

        while self.dma.ch[channel].count != 0 {
            if !self.dma_transfer_one(channel) {
                // Misconfigured descriptor: surrender the bus rather than
                // spin on a transfer that can never happen.
                self.dma.active = None;
                return cycles;
            }
            cycles += 6;

            let ch = &self.dma.ch[channel];
            match ch.tdr & dma::tdr::BRP {
                dma::tdr::BRP_BURST => {
                    if !self.dma.rdy[channel] {
                        self.dma.active = None;
                        return cycles;
                    }
                }
                dma::tdr::BRP_CONTINUOUS => {}
                _ => {
                    // Single mode releases the bus after every transfer.
                    self.dma.active = None;
                    return cycles;
                }
            }
        }

        debug!(
            "z280: dma{channel} finished dar={:#08x} sar={:#08x}",
            self.dma.ch[channel].dar, self.dma.ch[channel].sar
        );
        self.dma.ch[channel].complete();
        self.sync_dma_interrupt(channel);
        self.dma.active = None;
        cycles
    }

    /// Perform one transfer unit on `channel`. Returns false when the
    /// descriptor names a combination the engine cannot run.
    fn dma_transfer_one(&mut self, channel: usize) -> bool {
        let ch = self.dma.ch[channel];
        let src = ch.source();
        let dst = ch.destination();
        let kind = ch.tdr & dma::tdr::TYPE;
        let size = ch.tdr & dma::tdr::ST;
        let flyby_ok = channel < 2;

        if src == dma::AddressKind::Invalid || dst == dma::AddressKind::Invalid {
            warn!("z280: dma{channel} invalid address descriptor {:#06x}", ch.tdr);
            return false;
        }
        if size == dma::tdr::ST_LONG {
            warn!("z280: dma{channel} long-word transfers not implemented");
            return false;
        }

        let allowed = if src.is_memory() && dst.is_memory() {
            kind == dma::tdr::TYPE_FLOWTHROUGH
        } else if src.is_io() && dst.is_memory() {
            kind == dma::tdr::TYPE_FLOWTHROUGH
                || (flyby_ok && kind == dma::tdr::TYPE_FLYBY_WRITE)
        } else if src.is_memory() && dst.is_io() {
            kind == dma::tdr::TYPE_FLOWTHROUGH
                || (flyby_ok && kind == dma::tdr::TYPE_FLYBY_READ)
        } else {
            kind == dma::tdr::TYPE_FLOWTHROUGH
        };
        if !allowed {
            warn!(
                "z280: dma{channel} invalid transaction type {:#04x}",
                (ch.tdr & dma::tdr::TYPE) >> 5
            );
            return false;
        }

        let word = size == dma::tdr::ST_WORD;
        let (sar, dar) = (ch.sar, ch.dar);
        if word {
            let data = if src.is_memory() {
                self.mem.read_word(sar & 0xff_fffe)
            } else {
                self.io_read_word(sar)
            };
            trace!("z280: dma{channel} move w {dar:#08x} <- {sar:#08x} = {data:#06x}");
            if dst.is_memory() {
                self.mem.write_word(dar & 0xff_fffe, data);
            } else {
                self.io_write_word(dar, data);
            }
            self.dma.ch[channel].advance(2);
        } else {
            let data = if src.is_memory() {
                self.mem.read_byte(sar)
            } else {
                self.io_read_byte(sar)
            };
            trace!("z280: dma{channel} move b {dar:#08x} <- {sar:#08x} = {data:#04x}");
            if dst.is_memory() {
                self.mem.write_byte(dar, data);
            } else {
                self.io_write_byte(dar, data);
            }
            self.dma.ch[channel].advance(1);
        }
        true
    }

    // ========== Control Registers ==========

    /// LDCTL read. ISR reads fold in the interrupt mode and the pending
    /// state of the seven groups.
    pub(crate) fn read_control(&self, reg: u8) -> u16 {
        let data = match reg {
            creg::MSR => self.msr,
            creg::ISR => {
                let mut data = self.isr_ive | (u16::from(self.im) << 8);
                for source in int_source::IRQ0..int_source::COUNT {
                    if self.int_pending[source] {
                        data |= 1 << INT_GROUP[source];
                    }
                }
                data
            }
            creg::IVTP => self.ivtp,
            creg::SSLR => self.sslr,
            creg::IOP => u16::from(self.iop),
            creg::BTI => u16::from(self.bti),
            creg::BTC => u16::from(self.btc),
            creg::TCR => u16::from(self.tcr),
            creg::CCR => u16::from(self.ccr),
            creg::LAR => u16::from(self.lar),
            _ => {
                debug!("z280: bogus control register read {reg:#04x}");
                0
            }
        };
        trace!("z280: control {reg:#04x} rd {data:#06x}");
        data
    }

    /// LDCTL write. Only the vector-enable field of ISR is writable and
    /// SSLR keeps its 16-byte alignment.
    pub(crate) fn write_control(&mut self, reg: u8, data: u16) {
        trace!("z280: control {reg:#04x} wr {data:#06x}");
        match reg {
            creg::MSR => self.msr = data,
            creg::ISR => self.isr_ive = data & isr::IVE_MASK,
            creg::IVTP => self.ivtp = data,
            creg::SSLR => self.sslr = data & 0xfff0,
            creg::IOP => self.iop = data as u8,
            creg::BTI => self.bti = data as u8,
            creg::BTC => self.btc = data as u8,
            creg::TCR => self.tcr = data as u8,
            creg::CCR => self.ccr = data as u8,
            creg::LAR => self.lar = data as u8,
            _ => debug!("z280: bogus control register write {reg:#04x} = {data:#06x}"),
        }
    }

    // ========== Internal I/O ==========

    fn ct_unit(port: u8) -> Option<usize> {
        match port & 0x18 {
            0x00 => Some(0),
            0x08 => Some(1),
            0x18 => Some(2),
            _ => None,
        }
    }

    /// Counter/timer CSR write: a trigger edge reloads the unit and a
    /// cleared count-complete bit drops the pending interrupt.
    fn ct_write_csr(&mut self, unit: usize, data: u8) {
        if self.ct[unit].write_csr(data) {
            self.reload_timer(unit);
        }
        if self.ct[unit].csr & timer::ctcsr::CC == 0 {
            trace!("z280: ct{unit} clear interrupt");
            self.set_irq_internal(CT_IRQ[unit], false);
        }
    }

    fn in_uart_window(&self, addr: u32) -> bool {
        (addr >> 16) as u8 == iowin::UART_PAGE
            && addr as u8 & iowin::UART_MASK == iowin::UART_BASE
    }

    fn in_ct_window(&self, addr: u32) -> bool {
        (addr >> 16) as u8 == iowin::CT_PAGE && addr as u8 & iowin::CT_MASK == iowin::CT_BASE
    }

    fn in_dma_window(&self, addr: u32) -> bool {
        (addr >> 16) as u8 == iowin::DMA_PAGE && addr as u8 & iowin::DMA_MASK == iowin::DMA_BASE
    }

    fn in_mmu_window(&self, addr: u32) -> bool {
        (addr >> 16) as u8 == iowin::MMU_PAGE && addr as u8 & iowin::MMU_MASK == iowin::MMU_BASE
    }

    fn in_rrr_window(&self, addr: u32) -> bool {
        (addr >> 16) as u8 == iowin::RRR_PAGE && addr as u8 == iowin::RRR_PORT
    }

    /// Byte read from I/O space with the internal windows intercepted.
    /// Note the ZBUS lane convention on the on-chip word registers: an
    /// even byte address reaches the high half, an odd one the low half.
    pub(crate) fn io_read_byte(&mut self, addr: u32) -> u8 {
        if self.in_uart_window(addr) {
            let reg = addr as u8 & 0x0f;
            match reg {
                uart::regs::UARTCR | uart::regs::TCSR | uart::regs::RCSR | uart::regs::RDR => {
                    let data = self.uart.register_read(reg);
                    self.sync_uart_interrupts();
                    data
                }
                _ => {
                    debug!("z280: bogus uart byte read {addr:#08x}");
                    0
                }
            }
        } else if self.in_ct_window(addr) {
            let Some(unit) = Self::ct_unit(addr as u8) else {
                debug!("z280: bogus ct byte read {addr:#08x}");
                return 0;
            };
            match addr as u8 & 0x07 {
                0 => self.ct[unit].cr,
                1 => self.ct[unit].read_csr(),
                2 => (self.ct[unit].tc >> 8) as u8,
                3 => self.ct[unit].count as u8,
                _ => {
                    debug!("z280: bogus ct byte read {addr:#08x}");
                    0
                }
            }
        } else if self.in_mmu_window(addr) {
            match addr as u8 & 0x0f {
                mmureg::MCR => ((self.mmu.mcr | 0x33e0) >> 8) as u8,
                mmureg::PDRP => self.mmu.pdrp,
                mmureg::DSP => self.mmu.pdr[self.mmu.pdrp as usize & 31] as u8,
                mmureg::BMP => {
                    let data = (self.mmu.pdr[self.mmu.pdrp as usize & 31] >> 8) as u8;
                    self.mmu.pdrp = self.mmu.pdrp.wrapping_add(1);
                    data
                }
                mmureg::IP => 0xff, // unpredictable
                _ => {
                    debug!("z280: bogus mmu byte read {addr:#08x}");
                    0
                }
            }
        } else if self.in_rrr_window(addr) {
            self.rrr
        } else if self.in_dma_window(addr) {
            debug!("z280: dma registers are word-access only ({addr:#08x})");
            0
        } else {
            self.io.read_byte(addr)
        }
    }

    pub(crate) fn io_write_byte(&mut self, addr: u32, data: u8) {
        if self.in_uart_window(addr) {
            let reg = addr as u8 & 0x0f;
            match reg {
                uart::regs::UARTCR | uart::regs::TCSR | uart::regs::RCSR | uart::regs::TDR => {
                    self.uart.register_write(reg, data);
                    self.sync_uart_interrupts();
                }
                _ => debug!("z280: bogus uart byte write {addr:#08x} = {data:#04x}"),
            }
        } else if self.in_ct_window(addr) {
            let Some(unit) = Self::ct_unit(addr as u8) else {
                debug!("z280: bogus ct byte write {addr:#08x}");
                return;
            };
            match addr as u8 & 0x07 {
                0 => {
                    let mut data = data;
                    if unit != 0 {
                        data &= !timer::ctcr::CTC;
                    }
                    self.ct[unit].cr = data;
                }
                1 => self.ct_write_csr(unit, data),
                2 => self.ct[unit].tc = (u16::from(data) << 8) | (self.ct[unit].tc & 0x00ff),
                3 => {
                    self.ct[unit].count = u16::from(data) | (self.ct[unit].count & 0xff00)
                }
                _ => debug!("z280: bogus ct byte write {addr:#08x} = {data:#04x}"),
            }
        } else if self.in_mmu_window(addr) {
            match addr as u8 & 0x0f {
                mmureg::MCR => {
                    self.mmu.mcr = (u16::from(data) << 8) | (self.mmu.mcr & 0x00ff)
                }
                mmureg::PDRP => self.mmu.pdrp = data,
                mmureg::DSP => {
                    let i = self.mmu.pdrp as usize & 31;
                    self.mmu.pdr[i] = u16::from(data) | (self.mmu.pdr[i] & 0xff00);
                }
                mmureg::BMP => {
                    let i = self.mmu.pdrp as usize & 31;
                    self.mmu.pdr[i] = (u16::from(data) << 8) | (self.mmu.pdr[i] & 0x00ff);
                    self.mmu.pdrp = self.mmu.pdrp.wrapping_add(1);
                }
                mmureg::IP => self.mmu.invalidate(data),
                _ => debug!("z280: bogus mmu byte write {addr:#08x} = {data:#04x}"),
            }
        } else if self.in_rrr_window(addr) {
            self.rrr = data & 0xb0;
        } else if self.in_dma_window(addr) {
            debug!("z280: dma registers are word-access only ({addr:#08x})");
        } else {
            self.io.write_byte(addr, data);
        }
    }

    pub(crate) fn io_read_word(&mut self, addr: u32) -> u16 {
        if self.in_uart_window(addr) {
            u16::from(self.io_read_byte(addr)) << 8
        } else if self.in_ct_window(addr) {
            let Some(unit) = Self::ct_unit(addr as u8) else {
                debug!("z280: bogus ct word read {addr:#08x}");
                return 0;
            };
            match addr as u8 & 0x07 {
                0 => u16::from(self.ct[unit].cr) << 8,
                1 => u16::from(self.ct[unit].read_csr()),
                2 => self.ct[unit].tc,
                3 => self.ct[unit].count,
                _ => {
                    debug!("z280: bogus ct word read {addr:#08x}");
                    0
                }
            }
        } else if self.in_dma_window(addr) {
            let port = addr as u8 & 0x1f;
            if port == dmareg::MCR {
                u16::from(self.dma.mcr) | 0xf080
            } else {
                let unit = usize::from(port >> 3);
                let ch = &self.dma.ch[unit];
                match port & 0x07 {
                    dmareg::DAL => (ch.dar as u16 & 0x0fff) | 0xf000,
                    dmareg::DAH => ((ch.dar >> 8) as u16 & 0xfff0) | 0x000f,
                    dmareg::SAL => (ch.sar as u16 & 0x0fff) | 0xf000,
                    dmareg::SAH => ((ch.sar >> 8) as u16 & 0xfff0) | 0x000f,
                    dmareg::CNT => ch.count,
                    dmareg::TDR => ch.tdr,
                    _ => {
                        debug!("z280: bogus dma word read {addr:#08x}");
                        0
                    }
                }
            }
        } else if self.in_mmu_window(addr) {
            match addr as u8 & 0x0f {
                mmureg::MCR => self.mmu.mcr | 0x33e0,
                mmureg::PDRP => u16::from(self.mmu.pdrp),
                mmureg::DSP => self.mmu.pdr[self.mmu.pdrp as usize & 31],
                mmureg::BMP => {
                    let data = self.mmu.pdr[self.mmu.pdrp as usize & 31];
                    self.mmu.pdrp = self.mmu.pdrp.wrapping_add(1);
                    data
                }
                mmureg::IP => 0xff00, // unpredictable
                _ => {
                    debug!("z280: bogus mmu word read {addr:#08x}");
                    0
                }
            }
        } else if self.in_rrr_window(addr) {
            u16::from(self.rrr) << 8
        } else {
            self.io.read_word(addr)
        }
    }

    pub(crate) fn io_write_word(&mut self, addr: u32, data: u16) {
        if self.in_uart_window(addr) {
            self.io_write_byte(addr, (data >> 8) as u8);
        } else if self.in_ct_window(addr) {
            let Some(unit) = Self::ct_unit(addr as u8) else {
                debug!("z280: bogus ct word write {addr:#08x}");
                return;
            };
            match addr as u8 & 0x07 {
                0 => {
                    let mut value = (data >> 8) as u8;
                    if unit != 0 {
                        value &= !timer::ctcr::CTC;
                    }
                    self.ct[unit].cr = value;
                }
                1 => self.ct_write_csr(unit, data as u8),
                2 => self.ct[unit].tc = data,
                3 => self.ct[unit].count = data,
                _ => debug!("z280: bogus ct word write {addr:#08x} = {data:#06x}"),
            }
        } else if self.in_dma_window(addr) {
            let port = addr as u8 & 0x1f;
            if port == dmareg::MCR {
                self.dma.mcr = data as u8 & 0x7f;
            } else {
                let unit = usize::from(port >> 3);
                let ch = &mut self.dma.ch[unit];
                match port & 0x07 {
                    dmareg::DAL => {
                        ch.dar = (ch.dar & 0xff_f000) | u32::from(data & 0x0fff)
                    }
                    dmareg::DAH => {
                        ch.dar = (ch.dar & 0x000fff) | (u32::from(data & 0xfff0) << 8)
                    }
                    dmareg::SAL => {
                        ch.sar = (ch.sar & 0xff_f000) | u32::from(data & 0x0fff)
                    }
                    dmareg::SAH => {
                        ch.sar = (ch.sar & 0x000fff) | (u32::from(data & 0xfff0) << 8)
                    }
                    dmareg::CNT => ch.count = data,
                    dmareg::TDR => ch.tdr = data,
                    _ => debug!("z280: bogus dma word write {addr:#08x} = {data:#06x}"),
                }
            }
        } else if self.in_mmu_window(addr) {
            match addr as u8 & 0x0f {
                mmureg::MCR => self.mmu.mcr = data,
                mmureg::PDRP => self.mmu.pdrp = data as u8,
                mmureg::DSP => self.mmu.pdr[self.mmu.pdrp as usize & 31] = data,
                mmureg::BMP => {
                    self.mmu.pdr[self.mmu.pdrp as usize & 31] = data;
                    self.mmu.pdrp = self.mmu.pdrp.wrapping_add(1);
                }
                mmureg::IP => self.mmu.invalidate((data >> 8) as u8),
                _ => debug!("z280: bogus mmu word write {addr:#08x} = {data:#06x}"),
            }
        } else if self.in_rrr_window(addr) {
            self.rrr = (data >> 8) as u8 & 0xb0;
        } else {
            self.io.write_word(addr, data);
        }
    }

    /// A RETI executed: let the daisy chain see the `ED 4D` fetch.
    pub(crate) fn signal_reti(&mut self) {
        if let Some(daisy) = self.daisy.as_mut() {
            daisy.signal_reti();
        }
    }

    // ========== Debugger / State Access ==========

    /// Logical-to-physical translation without side effects, for debugger
    /// tooling. `program` selects the instruction space when the MMU runs
    /// with program/data separation.
    pub fn translate_address(&self, program: bool, addr: u16) -> u32 {
        self.mmu.translate_debug(addr, program, self.is_user())
    }

    /// Read one piece of programmer-visible state.
    pub fn get_state(&self, reg: Register) -> u32 {
        match reg {
            Register::Pc => u32::from(self.pc.w),
            Register::Sp => u32::from(self.sp()),
            Register::Usp => u32::from(self.usp),
            Register::Ssp => u32::from(self.ssp),
            Register::Af => u32::from(self.af.w),
            Register::Bc => u32::from(self.bc.w),
            Register::De => u32::from(self.de.w),
            Register::Hl => u32::from(self.hl.w),
            Register::Ix => u32::from(self.ix.w),
            Register::Iy => u32::from(self.iy.w),
            Register::A => u32::from(self.af.hi()),
            Register::B => u32::from(self.bc.hi()),
            Register::C => u32::from(self.bc.lo()),
            Register::D => u32::from(self.de.hi()),
            Register::E => u32::from(self.de.lo()),
            Register::H => u32::from(self.hl.hi()),
            Register::L => u32::from(self.hl.lo()),
            Register::Af2 => u32::from(self.af2.w),
            Register::Bc2 => u32::from(self.bc2.w),
            Register::De2 => u32::from(self.de2.w),
            Register::Hl2 => u32::from(self.hl2.w),
            Register::R => u32::from(self.r),
            Register::I => u32::from(self.i),
            Register::Im => u32::from(self.im & 3),
            Register::Iff2 => u32::from(self.iff2),
            Register::Halt => u32::from(self.halted),
            Register::Msr => u32::from(self.msr),
        }
    }

    /// Printable flag byte in the `SZHPNC` convention, dots for clear
    /// bits.
    pub fn flags_string(&self) -> String {
        let f = self.af.lo();
        let mut s = String::with_capacity(6);
        s.push(if f & flags::SF != 0 { 'S' } else { '.' });
        s.push(if f & flags::ZF != 0 { 'Z' } else { '.' });
        s.push(if f & flags::HF != 0 { 'H' } else { '.' });
        s.push(if f & flags::PF != 0 { 'P' } else { '.' });
        s.push(if f & flags::NF != 0 { 'N' } else { '.' });
        s.push(if f & flags::CF != 0 { 'C' } else { '.' });
        s
    }
}
