//! End-to-end scenarios
//!
//! Sequences that cross the CPU/peripheral boundary: block search, the
//! Z280 indexed word load, an external interrupt with its stack frame, a
//! counter/timer run, a DMA transaction interleaved with execution, an
//! access violation through the MMU, and a UART transmit clocked by CT1.

use super::*;
use crate::cpu::flags::ZF;
use crate::cpu::{int_source, msr};
use crate::peripherals::dma::{dmamcr, tdr};
use crate::peripherals::mmu::{mcr, pdr};
use crate::peripherals::timer::{ctcr, ctcsr};
use crate::peripherals::uart;
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn test_scan_equal_search() {
    let mut board = Board::new();
    board.cpu.hl.w = 0x1000;
    board.cpu.bc.w = 0x0004;
    board.cpu.af.set_hi(3);
    board.poke(0x1000, &[1, 2, 3, 4]);
    board.run(0x0100, &[0xed, 0xb1, 0x76], 120); // CPIR; HALT

    assert_eq!(board.cpu.hl.w, 0x1003);
    assert_eq!(board.cpu.bc.w, 0x0001);
    assert!(board.cpu.f() & ZF != 0);
    assert!(board.cpu.halted);
}

#[test]
fn test_indexed_word_load() {
    let mut board = Board::new();
    board.cpu.ix.w = 0x2000;
    board.poke16(0x2000, 0xbeef);
    board.run(0x0100, &[0xdd, 0xed, 0x26, 0x00], 40); // LD HL,(IX+0)
    assert_eq!(board.cpu.hl.w, 0xbeef);
}

#[test]
fn test_mode1_interrupt_frame() {
    let mut board = Board::new();
    board.cpu.msr = msr::IRE_MASK;
    board.cpu.im = 1;
    board.cpu.ssp = 0xff00;
    board.poke(0x0038, &[0x76]);
    board.cpu.set_irq_line(0, true);
    board.run(0x8000, &[0x00, 0x00, 0x00], 40);

    assert_eq!(board.peek(0xfefe), 0x00);
    assert_eq!(board.peek(0xfeff), 0x80);
    assert_eq!(board.cpu.pc.w, 0x0038);
    assert_eq!(board.cpu.ssp, 0xfefe);
    assert_eq!(board.cpu.msr & (msr::US | msr::SS | msr::IRE_MASK), 0);
    assert!(board.cpu.halted);
}

#[test]
fn test_counter_timer_terminal_counts() {
    let mut board = Board::new();
    // CT1: timer mode, continuous, interrupt enabled, running.
    board.cpu.ct[1].cr = ctcr::CS | ctcr::IE;
    board.cpu.ct[1].csr = ctcsr::EN | ctcsr::GT;
    board.cpu.ct[1].tc = 0x0010;
    board.cpu.ct[1].count = 0x0010;
    board.run(0x4000, &[0x00; 16], 256); // NOP loop

    // 64 quarter-clock ticks: four terminal counts, the fourth landing on
    // the final tick so the count sits freshly reloaded.
    assert!(board.cpu.int_pending[int_source::CTR1]);
    assert_ne!(board.cpu.ct[1].csr & ctcsr::CC, 0);
    assert_ne!(board.cpu.ct[1].csr & ctcsr::COR, 0);
    assert_eq!(board.cpu.ct[1].count, 0x0010);
}

#[test]
fn test_counter_timer_cascade_32bit() {
    let mut board = Board::new();
    // CT0 cascades into CT1: a CT0 terminal count borrows one from CT1,
    // and the linked low word free-runs through the full 16-bit range
    // instead of reloading.
    board.cpu.ct[0].cr = ctcr::CS | ctcr::CTC;
    board.cpu.ct[0].csr = ctcsr::EN | ctcsr::GT;
    board.cpu.ct[0].tc = 0x0004;
    board.cpu.ct[0].count = 0x0004;
    board.cpu.ct[1].cr = ctcr::CS;
    board.cpu.ct[1].csr = ctcsr::EN | ctcsr::GT;
    board.cpu.ct[1].tc = 0x0002;
    board.cpu.ct[1].count = 0x0002;
    board.run(0x4000, &[0x00; 16], 64); // 16 quarter-clock ticks

    // One borrow (at tick 4), after which the low word wraps.
    assert_eq!(board.cpu.ct[1].count, 0x0001);
    assert!(board.cpu.ct[0].count > 0xfff0);
    // The UART BRG constant widens to 32 bits while linked.
    assert_eq!(board.cpu.uart_brg_constant(), 0x0002_0005);
}

#[test]
fn test_dma_memory_to_memory() {
    let mut board = Board::new();
    for i in 0..0x10u8 {
        board.poke(0x10_0000 + u32::from(i), &[i]);
    }
    let ch = &mut board.cpu.dma.ch[0];
    ch.sar = 0x10_0000;
    ch.dar = 0x10_0100;
    ch.count = 0x0010;
    // Byte flowthrough, single-step bus protocol, both sides
    // incrementing memory, completion interrupt armed.
    ch.tdr = tdr::EN | tdr::IE;
    board.cpu.dma.mcr = dmamcr::SR0;
    board.run(0x0100, &[0x00; 8], 500);

    for i in 0..0x10u8 {
        assert_eq!(board.peek(0x10_0100 + u32::from(i)), i);
    }
    assert_eq!(board.cpu.dma.ch[0].count, 0);
    assert_ne!(board.cpu.dma.ch[0].tdr & tdr::TC, 0);
    assert_eq!(board.cpu.dma.ch[0].tdr & tdr::EN, 0);
    assert!(board.cpu.int_pending[int_source::DMA0]);
}

#[test]
fn test_dma_burst_follows_rdy() {
    let mut board = Board::new();
    board.poke(0x4000, &[0x11, 0x22, 0x33, 0x44]);
    let ch = &mut board.cpu.dma.ch[2];
    ch.sar = 0x4000;
    ch.dar = 0x5000;
    ch.count = 4;
    ch.tdr = tdr::EN | tdr::BRP_BURST;
    board.cpu.set_rdy_line(2, true);
    board.run(0x0100, &[0x00; 4], 60);
    // Burst runs to completion while RDY holds.
    assert_eq!(board.cpu.dma.ch[2].count, 0);
    assert_eq!(board.peek(0x5003), 0x44);

    // Without RDY the channel never requests at all.
    let mut board = Board::new();
    board.poke(0x4000, &[0x11, 0x22, 0x33, 0x44]);
    let ch = &mut board.cpu.dma.ch[2];
    ch.sar = 0x4000;
    ch.dar = 0x5000;
    ch.count = 4;
    ch.tdr = tdr::EN | tdr::BRP_BURST;
    board.cpu.execute(60);
    assert_eq!(board.cpu.dma.ch[2].count, 4);
    assert_ne!(board.cpu.dma.ch[2].tdr & tdr::EN, 0);
    assert_eq!(board.peek(0x5000), 0x00);
}

#[test]
fn test_dma_memory_to_io() {
    let mut board = Board::new();
    board.poke(0x4000, &[0xaa, 0xbb]);
    let ch = &mut board.cpu.dma.ch[1];
    ch.sar = 0x4000;
    ch.dar = 0x01_0040; // static I/O destination
    ch.count = 2;
    ch.tdr = tdr::EN | (6 << 1); // SAD inc-mem, DAD static-IO
    board.cpu.dma.mcr = dmamcr::SR1;
    board.run(0x0100, &[0x00; 4], 120);

    assert_eq!(board.cpu.dma.ch[1].count, 0);
    let io = board.io.borrow();
    assert_eq!(io.writes, vec![(0x01_0040, 0xaa), (0x01_0040, 0xbb)]);
}

#[test]
fn test_access_violation_trap() {
    let mut board = Board::new();
    board.cpu.msr = msr::US;
    board.cpu.ssp = 0xff00;
    board.cpu.mmu.mcr = mcr::UTE;
    board.cpu.mmu.pdr[1] = 0x0010 | pdr::V; // code page, identity mapped
    board.set_ivt_entry(0x7000, 0x4c, 0x8000, 0xc000);
    board.poke(0xc000, &[0x76]);
    // From user mode: LD A,(0x0000) hits the invalid user page 0.
    board.run(0x1000, &[0x3a, 0x00, 0x00], 80);

    assert!(board.cpu.halted);
    assert_eq!(board.cpu.pc.w, 0xc000);
    assert_eq!(board.cpu.msr, 0x8000);
    assert!(board.cpu.is_system());
    // Frame on the system stack: faulting PC, then the old MSR.
    assert_eq!(board.peek16(0xfefe), 0x1000);
    assert_eq!(board.peek16(0xfefc), msr::US);
    // Page fault identifier names the offending descriptor.
    assert_eq!(board.cpu.mmu.mcr & mcr::PFI_MASK, 0);
}

#[test]
fn test_access_violation_on_page_crossing() {
    let mut board = Board::new();
    board.cpu.msr = msr::US;
    board.cpu.ssp = 0xff00;
    board.cpu.mmu.mcr = mcr::UTE;
    board.cpu.mmu.pdr[0] = 0x0000 | pdr::V; // data page 0 valid
    board.cpu.mmu.pdr[1] = 0x0010 | pdr::V; // code page, identity mapped
    board.set_ivt_entry(0x7000, 0x4c, 0x8000, 0xc000);
    board.poke(0xc000, &[0x76]);
    // Word read at 0x0fff crosses into invalid page 2... page 1 is the
    // code page, so read through 0x0fff: low byte page 0, high byte page
    // 1 is fine; instead read at 0x1fff whose second byte lands in the
    // invalid page 2.
    board.run(0x1000, &[0x2a, 0xff, 0x1f], 80); // LD HL,(0x1fff)

    assert!(board.cpu.halted);
    assert_eq!(board.cpu.pc.w, 0xc000);
    // The second page's descriptor index lands in PFI.
    assert_eq!(board.cpu.mmu.mcr & mcr::PFI_MASK, 2);
}

#[test]
fn test_write_protect_violation() {
    let mut board = Board::new();
    board.cpu.msr = msr::US;
    board.cpu.ssp = 0xff00;
    board.cpu.mmu.mcr = mcr::UTE;
    board.cpu.mmu.pdr[0] = 0x0000 | pdr::V | pdr::WP;
    board.cpu.mmu.pdr[1] = 0x0010 | pdr::V;
    board.set_ivt_entry(0x7000, 0x4c, 0x8000, 0xc000);
    board.poke(0xc000, &[0x76]);
    board.run(0x1000, &[0x32, 0x00, 0x00], 80); // LD (0x0000),A

    assert!(board.cpu.halted);
    assert_eq!(board.cpu.pc.w, 0xc000);
    assert_eq!(board.cpu.mmu.mcr & mcr::PFI_MASK, 0);
    // The protected page was never modified.
    assert_eq!(board.cpu.mmu.pdr[0] & pdr::M, 0);
}

#[test]
fn test_modified_bit_tracks_writes() {
    let mut board = Board::new();
    board.cpu.mmu.mcr = mcr::STE;
    for i in 16..32 {
        board.cpu.mmu.pdr[i] = ((i as u16 & 0x0f) << 4) | pdr::V; // identity
    }
    board.run(0x0100, &[0x32, 0x00, 0x40], 20); // LD (0x4000),A
    assert_ne!(board.cpu.mmu.pdr[20] & pdr::M, 0);
    assert_eq!(board.cpu.mmu.pdr[21] & pdr::M, 0);
}

#[test]
fn test_uart_transmit_clocked_by_ct1() {
    let sent = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&sent);

    let mut board = Board::new();
    board
        .cpu
        .set_uart_callbacks(Some(Box::new(move |b| sink.borrow_mut().push(b))), None);
    // 8N1, CT1 as the bit clock, divisor 1.
    board.cpu.uart.register_write(uart::regs::UARTCR, 0xc8);
    board.cpu.uart.register_write(uart::regs::TCSR, uart::tcsr::EN);
    board.cpu.uart.register_write(uart::regs::TDR, 0x41);
    // CT1 free-running with a tiny period: every terminal count is one
    // bit cell.
    board.cpu.ct[1].cr = ctcr::CS;
    board.cpu.ct[1].csr = ctcsr::EN | ctcsr::GT;
    board.cpu.ct[1].tc = 1;
    board.cpu.ct[1].count = 1;
    board.run(0x0100, &[0x00; 16], 200);

    assert_eq!(*sent.borrow(), vec![0x41]);
    // Buffer empty again, transmit interrupt level follows IE.
    assert_ne!(board.cpu.uart.tcsr & uart::tcsr::BE, 0);
}

#[test]
fn test_uart_receive_raises_interrupt() {
    let incoming = Rc::new(RefCell::new(vec![0x5au8]));
    let src = Rc::clone(&incoming);

    let mut board = Board::new();
    board
        .cpu
        .set_uart_callbacks(None, Some(Box::new(move || src.borrow_mut().pop())));
    board.cpu.uart.register_write(uart::regs::UARTCR, 0xc8);
    board
        .cpu
        .uart
        .register_write(uart::regs::RCSR, uart::rcsr::EN | uart::rcsr::IE);
    board.cpu.ct[1].cr = ctcr::CS;
    board.cpu.ct[1].csr = ctcsr::EN | ctcsr::GT;
    board.cpu.ct[1].tc = 1;
    board.cpu.ct[1].count = 1;
    board.run(0x0100, &[0x00; 16], 300);

    assert!(board.cpu.uart.rx_irq());
    assert!(board.cpu.int_pending[int_source::UARTRX]);
    assert_eq!(board.cpu.uart.register_read(uart::regs::RDR), 0x5a);
}

#[test]
fn test_internal_io_windows() {
    let mut board = Board::new();
    // RRR behind I/O page 0xFF keeps only its writable bits.
    board.cpu.iop = 0xff;
    board.cpu.bc.w = 0x00e8;
    board.cpu.af.set_hi(0xff);
    board.run(0x0100, &[0xed, 0x79], 20); // OUT (C),A
    assert_eq!(board.cpu.rrr, 0xb0);
    // Nothing leaked to the host I/O space.
    assert!(board.io.borrow().writes.is_empty());

    // MMU block-move port auto-increments the descriptor pointer.
    let mut board = Board::new();
    board.cpu.iop = 0xff;
    board.cpu.bc.w = 0x00f4; // BMP
    board.cpu.hl.w = 0x1238;
    board.run(0x0100, &[0xed, 0xbf], 20); // OUTW (C),HL
    assert_eq!(board.cpu.mmu.pdr[0], 0x1238);
    assert_eq!(board.cpu.mmu.pdrp, 1);
}

#[test]
fn test_ct_registers_via_io() {
    let mut board = Board::new();
    board.cpu.iop = 0xfe;
    // Write CT1's time constant (unit 1 window at base + 8).
    board.cpu.bc.w = 0x00ea;
    board.cpu.hl.w = 0x1234;
    board.run(0x0100, &[0xed, 0xbf], 20); // OUTW (C),HL
    assert_eq!(board.cpu.ct[1].tc, 0x1234);

    // Trigger edge through the command/status register reloads the count
    // (gate left low so the unit holds the reloaded value).
    let mut board = Board::new();
    board.cpu.iop = 0xfe;
    board.cpu.ct[2].tc = 0x0055;
    board.cpu.bc.w = 0x00f9; // unit 2 CSR
    board.cpu.hl.w = u16::from(ctcsr::EN | ctcsr::TR);
    board.run(0x0100, &[0xed, 0xbf], 20);
    assert_eq!(board.cpu.ct[2].count, 0x0055);
}
