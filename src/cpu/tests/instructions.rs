//! Instruction-level tests
//!
//! Individual instructions and instruction families: loads, stack ops,
//! the ALU with its flag behavior, block transfer and search, block I/O,
//! the Z280 multiply/divide group, indexed addressing and the
//! alternate-register tracking used by JAR/JAF.

use super::*;
use crate::cpu::flags::{CF, HF, NF, PF, SF, VF, ZF};

#[test]
fn test_nop_advances_pc() {
    let mut board = Board::new();
    board.run(0x0100, &[0x00], 1);
    assert_eq!(board.cpu.pc.w, 0x0101);
}

#[test]
fn test_reset_state() {
    let mut board = Board::new();
    board.cpu.pc.w = 0x1234;
    board.cpu.af.w = 0xffff;
    board.cpu.im = 3;
    board.cpu.reset();
    assert_eq!(board.cpu.pc.w, 0);
    assert_eq!(board.cpu.af.w, 0);
    assert_eq!(board.cpu.im, 0);
    assert!(board.cpu.is_system());
    assert_eq!(board.cpu.ccr, 0x80);
    assert_eq!(board.cpu.btc, 0x30);
    assert_eq!(board.cpu.dma.ch[0].tdr, 0x0100);
}

#[test]
fn test_ld_round_trip() {
    let mut board = Board::new();
    board.poke(0x1234, &[0x5a]);
    // LD A,(0x1234); LD (0x2345),A
    board.run(0x0100, &[0x3a, 0x34, 0x12, 0x32, 0x45, 0x23], 25);
    assert_eq!(board.cpu.a(), 0x5a);
    assert_eq!(board.peek(0x2345), 0x5a);
}

#[test]
fn test_ex_de_hl_involution() {
    let mut board = Board::new();
    board.cpu.de.w = 0x1111;
    board.cpu.hl.w = 0x2222;
    board.run(0x0100, &[0xeb, 0xeb], 8);
    assert_eq!(board.cpu.de.w, 0x1111);
    assert_eq!(board.cpu.hl.w, 0x2222);
}

#[test]
fn test_push_pop_identity() {
    // PUSH rr / POP rr over the system stack
    let cases: [(&[u8], fn(&mut Z280) -> &mut Pair); 5] = [
        (&[0xc5, 0xc1], |c| &mut c.bc),
        (&[0xd5, 0xd1], |c| &mut c.de),
        (&[0xe5, 0xe1], |c| &mut c.hl),
        (&[0xdd, 0xe5, 0xdd, 0xe1], |c| &mut c.ix),
        (&[0xfd, 0xe5, 0xfd, 0xe1], |c| &mut c.iy),
    ];
    for (program, reg) in cases {
        let mut board = Board::new();
        board.cpu.ssp = 0x8000;
        reg(&mut board.cpu).w = 0xa55a;
        board.run(0x0100, program, 40);
        assert_eq!(reg(&mut board.cpu).w, 0xa55a);
        assert_eq!(board.cpu.ssp, 0x8000);
        assert_eq!(board.peek16(0x7ffe), 0xa55a);
    }
}

#[test]
fn test_push_pop_af() {
    let mut board = Board::new();
    board.cpu.ssp = 0x8000;
    board.cpu.af.w = 0x12c3;
    board.run(0x0100, &[0xf5, 0xf1], 25);
    assert_eq!(board.cpu.af.w, 0x12c3);
    assert_eq!(board.cpu.ssp, 0x8000);
}

#[test]
fn test_stack_pointer_selection_by_mode() {
    // System-mode pushes use SSP; USP is untouched, and the other way
    // around in user mode.
    let mut board = Board::new();
    board.cpu.ssp = 0x8000;
    board.cpu.usp = 0x9000;
    board.cpu.bc.w = 0x1234;
    board.run(0x0100, &[0xc5], 12);
    assert_eq!(board.cpu.ssp, 0x7ffe);
    assert_eq!(board.cpu.usp, 0x9000);

    let mut board = Board::new();
    board.cpu.msr = crate::cpu::msr::US;
    board.cpu.ssp = 0x8000;
    board.cpu.usp = 0x9000;
    board.cpu.bc.w = 0x1234;
    board.run(0x0100, &[0xc5], 12);
    assert_eq!(board.cpu.ssp, 0x8000);
    assert_eq!(board.cpu.usp, 0x8ffe);
}

#[test]
fn test_inc_dec_flags() {
    let mut board = Board::new();
    board.cpu.af.w = 0x7f00;
    board.run(0x0100, &[0x3c], 5); // INC A
    assert_eq!(board.cpu.a(), 0x80);
    assert!(board.cpu.f() & VF != 0);
    assert!(board.cpu.f() & SF != 0);
    assert!(board.cpu.f() & HF != 0);

    let mut board = Board::new();
    board.cpu.af.w = 0x8000 | u16::from(CF);
    board.run(0x0100, &[0x3d], 5); // DEC A
    assert_eq!(board.cpu.a(), 0x7f);
    assert!(board.cpu.f() & VF != 0);
    assert!(board.cpu.f() & NF != 0);
    // Carry is untouched by INC/DEC
    assert!(board.cpu.f() & CF != 0);
}

#[test]
fn test_add_sub_flags() {
    let mut board = Board::new();
    board.cpu.af.w = 0x3c00;
    board.cpu.bc.w = 0xc400;
    board.run(0x0100, &[0x80], 5); // ADD A,B
    assert_eq!(board.cpu.a(), 0x00);
    assert!(board.cpu.f() & ZF != 0);
    assert!(board.cpu.f() & CF != 0);

    let mut board = Board::new();
    board.cpu.af.w = 0x1000;
    board.run(0x0100, &[0xd6, 0x20], 8); // SUB 0x20
    assert_eq!(board.cpu.a(), 0xf0);
    assert!(board.cpu.f() & CF != 0);
    assert!(board.cpu.f() & NF != 0);
    assert!(board.cpu.f() & SF != 0);
}

#[test]
fn test_daa_after_add() {
    let mut board = Board::new();
    board.cpu.af.w = 0x1500;
    board.run(0x0100, &[0xc6, 0x27, 0x27], 12); // ADD A,0x27; DAA
    assert_eq!(board.cpu.a(), 0x42);
    assert!(board.cpu.f() & CF == 0);
}

#[test]
fn test_logic_ops() {
    let mut board = Board::new();
    board.cpu.af.w = 0xf000;
    board.run(0x0100, &[0xe6, 0x0f], 8); // AND 0x0f
    assert_eq!(board.cpu.a(), 0x00);
    assert_flags(&board.cpu, ZF | HF | PF, "AND to zero");

    let mut board = Board::new();
    board.cpu.af.w = 0x0f00;
    board.run(0x0100, &[0xf6, 0xf0], 8); // OR 0xf0
    assert_eq!(board.cpu.a(), 0xff);
    assert_flags(&board.cpu, SF | 0x28 | PF, "OR to ones");
}

#[test]
fn test_rotate_accumulator() {
    let mut board = Board::new();
    board.cpu.af.w = 0x8100;
    board.run(0x0100, &[0x07], 5); // RLCA
    assert_eq!(board.cpu.a(), 0x03);
    assert!(board.cpu.f() & CF != 0);

    let mut board = Board::new();
    board.cpu.af.w = 0x0100 | u16::from(CF);
    board.run(0x0100, &[0x1f], 5); // RRA
    assert_eq!(board.cpu.a(), 0x80);
    assert!(board.cpu.f() & CF != 0);
}

#[test]
fn test_cb_shift_and_bit() {
    let mut board = Board::new();
    board.cpu.bc.w = 0x8000;
    board.run(0x0100, &[0xcb, 0x20], 10); // SLA B
    assert_eq!(board.cpu.b(), 0x00);
    assert!(board.cpu.f() & CF != 0);
    assert!(board.cpu.f() & ZF != 0);

    let mut board = Board::new();
    board.cpu.bc.w = 0x0800;
    board.run(0x0100, &[0xcb, 0x58], 10); // BIT 3,B
    assert!(board.cpu.f() & ZF == 0);

    let mut board = Board::new();
    board.run(0x0100, &[0xcb, 0xc7], 10); // SET 0,A
    assert_eq!(board.cpu.a(), 0x01);
}

#[test]
fn test_tset_reads_sign_and_fills() {
    let mut board = Board::new();
    board.cpu.bc.w = 0x8000;
    board.run(0x0100, &[0xcb, 0x30], 10); // TSET B
    assert_eq!(board.cpu.b(), 0xff);
    assert!(board.cpu.f() & SF != 0);

    let mut board = Board::new();
    board.cpu.bc.w = 0x4000;
    board.run(0x0100, &[0xcb, 0x30], 10);
    assert_eq!(board.cpu.b(), 0xff);
    assert!(board.cpu.f() & SF == 0);
}

#[test]
fn test_indexed_bit_ops() {
    let mut board = Board::new();
    board.cpu.ix.w = 0x4000;
    board.poke(0x4002, &[0x01]);
    // RLC (IX+2)
    board.run(0x0100, &[0xdd, 0xcb, 0x02, 0x06], 30);
    assert_eq!(board.peek(0x4002), 0x02);
}

#[test]
fn test_ldir_copies_forward() {
    let mut board = Board::new();
    board.cpu.hl.w = 0x4000;
    board.cpu.de.w = 0x5000;
    board.cpu.bc.w = 0x0003;
    board.poke(0x4000, &[0xaa, 0xbb, 0xcc]);
    board.run(0x0100, &[0xed, 0xb0, 0x76], 120); // LDIR; HALT
    assert_eq!(board.peek(0x5000), 0xaa);
    assert_eq!(board.peek(0x5001), 0xbb);
    assert_eq!(board.peek(0x5002), 0xcc);
    assert_eq!(board.cpu.bc.w, 0);
    assert_eq!(board.cpu.hl.w, 0x4003);
    assert_eq!(board.cpu.de.w, 0x5003);
    // PC rests on the instruction after LDIR
    assert_eq!(board.cpu.pc.w, 0x0102);
    assert!(board.cpu.halted);
}

#[test]
fn test_multu_product() {
    let mut board = Board::new();
    board.cpu.af.w = 0x0700;
    board.cpu.bc.w = 0x0600;
    board.run(0x0100, &[0xed, 0xc1], 20); // MULTU A,B
    assert_eq!(board.cpu.hl.w, 42);
    assert!(board.cpu.f() & ZF == 0);
    assert!(board.cpu.f() & CF == 0);

    let mut board = Board::new();
    board.cpu.af.w = 0x0200;
    board.cpu.bc.w = 0xc800;
    board.run(0x0100, &[0xed, 0xc1], 20);
    assert_eq!(board.cpu.hl.w, 400);
    assert!(board.cpu.f() & CF != 0); // result over 0xff

    let mut board = Board::new();
    board.cpu.af.w = 0x0000;
    board.cpu.bc.w = 0x7700;
    board.run(0x0100, &[0xed, 0xc1], 20);
    assert_eq!(board.cpu.hl.w, 0);
    assert!(board.cpu.f() & ZF != 0);
}

#[test]
fn test_mult_signed() {
    let mut board = Board::new();
    board.cpu.af.w = 0xfe00; // -2
    board.cpu.bc.w = 0x0300; // 3
    board.run(0x0100, &[0xed, 0xc0], 20); // MULT A,B
    assert_eq!(board.cpu.hl.w, 0xfffa); // -6
    assert!(board.cpu.f() & SF != 0);
    assert!(board.cpu.f() & CF == 0); // fits in 8 bits
}

#[test]
fn test_div_quotient_remainder() {
    let mut board = Board::new();
    board.cpu.hl.w = 100;
    board.cpu.bc.w = 0x0700;
    board.run(0x0100, &[0xed, 0xc4], 20); // DIV HL,B
    assert_eq!(board.cpu.a(), 14);
    assert_eq!(board.cpu.l(), 2);

    // Remainder carries the dividend's sign
    let mut board = Board::new();
    board.cpu.hl.w = (-100i16) as u16;
    board.cpu.bc.w = 0x0700;
    board.run(0x0100, &[0xed, 0xc4], 20);
    assert_eq!(board.cpu.a(), (-14i8) as u8);
    assert_eq!(board.cpu.l(), (-2i8) as u8);
    assert!(board.cpu.f() & SF != 0);
}

#[test]
fn test_divw_wide_division() {
    let mut board = Board::new();
    // DEHL = 0x0001_0000 (65536), divide by 3
    board.cpu.de.w = 0x0001;
    board.cpu.hl.w = 0x0000;
    board.cpu.bc.w = 0x0003;
    board.run(0x0100, &[0xed, 0xca], 25); // DIVW DEHL,BC
    assert_eq!(board.cpu.hl.w, 21845);
    assert_eq!(board.cpu.de.w, 1);
}

#[test]
fn test_multw_wide_product() {
    let mut board = Board::new();
    board.cpu.hl.w = 0x4000;
    board.cpu.bc.w = 0x0010;
    board.run(0x0100, &[0xed, 0xc2], 25); // MULTW HL,BC
    assert_eq!(board.cpu.de.w, 0x0004);
    assert_eq!(board.cpu.hl.w, 0x0000);
    assert!(board.cpu.f() & CF != 0); // does not fit 16 bits
}

#[test]
fn test_addw_overflow_flags() {
    let mut board = Board::new();
    board.cpu.hl.w = 0x7fff;
    board.cpu.bc.w = 0x0001;
    board.run(0x0100, &[0xed, 0xc6], 20); // ADDW HL,BC
    assert_eq!(board.cpu.hl.w, 0x8000);
    assert_flags(&board.cpu, SF | HF | VF, "ADDW signed overflow");
}

#[test]
fn test_cpw_compares_without_store() {
    let mut board = Board::new();
    board.cpu.hl.w = 0x1000;
    board.cpu.bc.w = 0x1000;
    board.run(0x0100, &[0xed, 0xc7], 20); // CPW HL,BC
    assert_eq!(board.cpu.hl.w, 0x1000);
    assert!(board.cpu.f() & ZF != 0);
    assert!(board.cpu.f() & NF != 0);
}

#[test]
fn test_neg16() {
    let mut board = Board::new();
    board.cpu.hl.w = 0x0001;
    board.run(0x0100, &[0xed, 0x4c], 20); // NEG HL
    assert_eq!(board.cpu.hl.w, 0xffff);
    assert_flags(&board.cpu, SF | HF | NF | CF, "NEG HL of 1");
}

#[test]
fn test_exts_sign_extension() {
    let mut board = Board::new();
    board.cpu.af.w = 0x8000;
    board.run(0x0100, &[0xed, 0x64], 15); // EXTS A
    assert_eq!(board.cpu.hl.w, 0xff80);

    let mut board = Board::new();
    board.cpu.hl.w = 0x8000;
    board.run(0x0100, &[0xed, 0x6c], 15); // EXTS HL
    assert_eq!(board.cpu.de.w, 0xffff);
}

#[test]
fn test_jar_jaf_track_alternate_use() {
    // Alternate bank never touched: JAR falls through
    let mut board = Board::new();
    board.run(0x0100, &[0xdd, 0x20, 0x10, 0x76], 20); // JAR +0x10; HALT
    assert!(board.cpu.halted);
    assert_eq!(board.cpu.pc.w, 0x0103);

    // After EXX the jump is taken
    let mut board = Board::new();
    board.poke(0x0114, &[0x76]);
    board.run(0x0100, &[0xd9, 0xdd, 0x20, 0x10], 30); // EXX; JAR +0x10
    assert!(board.cpu.halted);
    assert_eq!(board.cpu.pc.w, 0x0114);

    // EX AF,AF' arms JAF
    let mut board = Board::new();
    board.poke(0x0114, &[0x76]);
    board.run(0x0100, &[0x08, 0xdd, 0x28, 0x10], 30); // EX AF,AF'; JAF +0x10
    assert!(board.cpu.halted);
    assert_eq!(board.cpu.pc.w, 0x0114);
}

#[test]
fn test_indexed_alu_modes() {
    // ADD A,(SP+w)
    let mut board = Board::new();
    board.cpu.ssp = 0x8000;
    board.poke(0x8004, &[0x11]);
    board.cpu.af.w = 0x2200;
    board.run(0x0100, &[0xdd, 0x80, 0x04, 0x00], 25);
    assert_eq!(board.cpu.a(), 0x33);

    // ADD A,(HL+IX)
    let mut board = Board::new();
    board.cpu.hl.w = 0x4000;
    board.cpu.ix.w = 0x0002;
    board.poke(0x4002, &[0x05]);
    board.cpu.af.w = 0x0100;
    board.run(0x0100, &[0xdd, 0x81], 25);
    assert_eq!(board.cpu.a(), 0x06);

    // CP A,(ra): relative to the instruction end
    let mut board = Board::new();
    board.poke(0x0108, &[0x42]);
    board.cpu.af.w = 0x4200;
    board.run(0x0100, &[0xfd, 0xb8, 0x04, 0x00], 25); // CP A,(PC+4)
    assert!(board.cpu.f() & ZF != 0);
}

#[test]
fn test_incw_decw_memory() {
    let mut board = Board::new();
    board.cpu.hl.w = 0x4000;
    board.poke16(0x4000, 0x00ff);
    board.run(0x0100, &[0xdd, 0x03], 25); // INCW (HL)
    assert_eq!(board.peek16(0x4000), 0x0100);

    let mut board = Board::new();
    board.poke16(0x4000, 0x0000);
    board.run(0x0100, &[0xdd, 0x1b, 0x00, 0x40], 25); // DECW (0x4000)
    assert_eq!(board.peek16(0x4000), 0xffff);
}

#[test]
fn test_out_in_immediate_port() {
    let mut board = Board::new();
    board.cpu.af.w = 0x1200;
    board.run(0x0100, &[0xd3, 0x34], 12); // OUT (0x34),A
    assert_eq!(board.io.borrow().writes, vec![(0x1234, 0x12)]);

    let mut board = Board::new();
    board.io.borrow_mut().data.insert(0x0034, 0x77);
    board.cpu.af.w = 0x0000;
    board.run(0x0100, &[0xdb, 0x34], 12); // IN A,(0x34)
    assert_eq!(board.cpu.a(), 0x77);
}

#[test]
fn test_in_reg_sets_flags() {
    let mut board = Board::new();
    board.cpu.bc.w = 0x0040;
    board.io.borrow_mut().data.insert(0x0040, 0x00);
    board.run(0x0100, &[0xed, 0x40], 15); // IN B,(C)
    assert_eq!(board.cpu.b(), 0x00);
    assert!(board.cpu.f() & ZF != 0);
    assert!(board.cpu.f() & PF != 0);
}

#[test]
fn test_block_io_byte() {
    let mut board = Board::new();
    board.cpu.bc.w = 0x0240;
    board.cpu.hl.w = 0x6000;
    board.io.borrow_mut().data.insert(0x0240, 0x99);
    board.run(0x0100, &[0xed, 0xa2], 20); // INI
    assert_eq!(board.peek(0x6000), 0x99);
    assert_eq!(board.cpu.b(), 0x01);
    assert_eq!(board.cpu.hl.w, 0x6001);
}

#[test]
fn test_block_io_word() {
    let mut board = Board::new();
    board.cpu.bc.w = 0x0140;
    board.cpu.hl.w = 0x6000;
    {
        let mut io = board.io.borrow_mut();
        io.data.insert(0x0140, 0x34);
        io.data.insert(0x0141, 0x12);
    }
    board.run(0x0100, &[0xed, 0x82], 20); // INIW
    assert_eq!(board.peek16(0x6000), 0x1234);
    assert_eq!(board.cpu.b(), 0x00);
    assert_eq!(board.cpu.hl.w, 0x6002);
}

#[test]
fn test_outdw_steps_by_word() {
    let mut board = Board::new();
    board.cpu.bc.w = 0x0140;
    board.cpu.hl.w = 0x6002;
    board.poke16(0x6002, 0xbeef);
    board.run(0x0100, &[0xed, 0x8b], 20); // OUTDW
    assert_eq!(board.cpu.hl.w, 0x6000);
    assert_eq!(board.cpu.b(), 0x00);
    let io = board.io.borrow();
    assert_eq!(io.data.get(&0x0140).copied(), Some(0xef));
    assert_eq!(io.data.get(&0x0141).copied(), Some(0xbe));
}

#[test]
fn test_ldctl_moves_control_registers() {
    let mut board = Board::new();
    board.cpu.bc.set_lo(crate::cpu::creg::IVTP);
    board.cpu.hl.w = 0x1234;
    board.run(0x0100, &[0xed, 0x6e], 20); // LDCTL (C),HL
    assert_eq!(board.cpu.ivtp, 0x1234);

    let mut board = Board::new();
    board.cpu.bc.set_lo(crate::cpu::creg::SSLR);
    board.cpu.hl.w = 0x1234;
    board.run(0x0100, &[0xed, 0x6e], 20);
    // SSLR keeps 16-byte alignment
    assert_eq!(board.cpu.sslr, 0x1230);

    let mut board = Board::new();
    board.cpu.tcr = 0x07;
    board.cpu.bc.set_lo(crate::cpu::creg::TCR);
    board.run(0x0100, &[0xed, 0x66], 20); // LDCTL HL,(C)
    assert_eq!(board.cpu.hl.w, 0x0007);
}

#[test]
fn test_ldctl_usp_forms() {
    let mut board = Board::new();
    board.cpu.usp = 0xbeef;
    board.run(0x0100, &[0xed, 0x87], 15); // LDCTL HL,USP
    assert_eq!(board.cpu.hl.w, 0xbeef);

    let mut board = Board::new();
    board.cpu.hl.w = 0xcafe;
    board.run(0x0100, &[0xed, 0x8f], 15); // LDCTL USP,HL
    assert_eq!(board.cpu.usp, 0xcafe);
}

#[test]
fn test_im_selects_mode() {
    let mut board = Board::new();
    board.run(0x0100, &[0xed, 0x4e], 15); // IM 3
    assert_eq!(board.cpu.im, 3);
}

#[test]
fn test_rrd_rld() {
    let mut board = Board::new();
    board.cpu.af.w = 0x1200;
    board.cpu.hl.w = 0x4000;
    board.poke(0x4000, &[0x34]);
    board.run(0x0100, &[0xed, 0x67], 20); // RRD
    assert_eq!(board.cpu.a(), 0x14);
    assert_eq!(board.peek(0x4000), 0x23);

    let mut board = Board::new();
    board.cpu.af.w = 0x1200;
    board.cpu.hl.w = 0x4000;
    board.poke(0x4000, &[0x34]);
    board.run(0x0100, &[0xed, 0x6f], 20); // RLD
    assert_eq!(board.cpu.a(), 0x13);
    assert_eq!(board.peek(0x4000), 0x42);
}

#[test]
fn test_djnz_loop() {
    let mut board = Board::new();
    board.cpu.bc.set_hi(3);
    // loop: INC A; DJNZ loop; HALT
    board.run(0x0100, &[0x3c, 0x10, 0xfd, 0x76], 80);
    assert_eq!(board.cpu.a(), 3);
    assert!(board.cpu.halted);
}

#[test]
fn test_call_and_ret() {
    let mut board = Board::new();
    board.cpu.ssp = 0x8000;
    // CALL 0x0200 / at 0x0200: RET / then HALT at 0x0103
    board.poke(0x0200, &[0xc9]);
    board.run(0x0100, &[0xcd, 0x00, 0x02, 0x76], 60);
    assert!(board.cpu.halted);
    assert_eq!(board.cpu.pc.w, 0x0103);
    assert_eq!(board.cpu.ssp, 0x8000);
    assert_eq!(board.peek16(0x7ffe), 0x0103);
}

#[test]
fn test_jp_hl_extension() {
    let mut board = Board::new();
    board.cpu.hl.w = 0x0200;
    board.poke(0x0200, &[0x76]);
    board.run(0x0100, &[0xdd, 0xc2], 20); // JP NZ,(HL) with Z clear
    assert!(board.cpu.halted);
    assert_eq!(board.cpu.pc.w, 0x0200);
}

#[test]
fn test_push_immediate_word() {
    let mut board = Board::new();
    board.cpu.ssp = 0x8000;
    board.run(0x0100, &[0xfd, 0xf5, 0xcd, 0xab], 25); // PUSH 0xabcd
    assert_eq!(board.cpu.ssp, 0x7ffe);
    assert_eq!(board.peek16(0x7ffe), 0xabcd);
}

#[test]
fn test_flags_string() {
    let mut board = Board::new();
    board.cpu.af.set_lo(SF | ZF | CF);
    assert_eq!(board.cpu.flags_string(), "SZ...C");
    board.cpu.af.set_lo(0);
    assert_eq!(board.cpu.flags_string(), "......");
}

#[test]
fn test_get_state() {
    let mut board = Board::new();
    board.cpu.hl.w = 0x1234;
    board.cpu.ssp = 0x8000;
    assert_eq!(board.cpu.get_state(Register::Hl), 0x1234);
    assert_eq!(board.cpu.get_state(Register::H), 0x12);
    assert_eq!(board.cpu.get_state(Register::L), 0x34);
    assert_eq!(board.cpu.get_state(Register::Sp), 0x8000);
}
