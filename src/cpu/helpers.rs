//! Z280 CPU helper functions
//!
//! Register accessors, MMU-mediated memory access, stack operations, the
//! ALU primitives shared by every dispatch table, and the Z280
//! effective-address modes. Memory access returns `Result` so that an
//! access violation unwinds the in-flight instruction back to the execute
//! loop, which stacks the trap frame.

use super::flags::{self, CF, HF, NF, PF, SF, VF, XF, YF, ZF};
use super::tables;
use super::{msr, tcr, Abort, Trap, Z280};
use crate::peripherals::mmu::{pdr, PageFault};
use log::warn;

impl Z280 {
    // ========== Register Accessors ==========

    #[inline]
    pub fn a(&self) -> u8 {
        self.af.hi()
    }

    #[inline]
    pub fn set_a(&mut self, v: u8) {
        self.af.set_hi(v);
    }

    #[inline]
    pub fn f(&self) -> u8 {
        self.af.lo()
    }

    #[inline]
    pub fn set_f(&mut self, v: u8) {
        self.af.set_lo(v);
    }

    #[inline]
    pub fn b(&self) -> u8 {
        self.bc.hi()
    }

    #[inline]
    pub fn set_b(&mut self, v: u8) {
        self.bc.set_hi(v);
    }

    #[inline]
    pub fn c(&self) -> u8 {
        self.bc.lo()
    }

    #[inline]
    pub fn set_c(&mut self, v: u8) {
        self.bc.set_lo(v);
    }

    #[inline]
    pub fn d(&self) -> u8 {
        self.de.hi()
    }

    #[inline]
    pub fn set_d(&mut self, v: u8) {
        self.de.set_hi(v);
    }

    #[inline]
    pub fn e(&self) -> u8 {
        self.de.lo()
    }

    #[inline]
    pub fn set_e(&mut self, v: u8) {
        self.de.set_lo(v);
    }

    #[inline]
    pub fn h(&self) -> u8 {
        self.hl.hi()
    }

    #[inline]
    pub fn set_h(&mut self, v: u8) {
        self.hl.set_hi(v);
    }

    #[inline]
    pub fn l(&self) -> u8 {
        self.hl.lo()
    }

    #[inline]
    pub fn set_l(&mut self, v: u8) {
        self.hl.set_lo(v);
    }

    #[inline]
    pub fn ixh(&self) -> u8 {
        self.ix.hi()
    }

    #[inline]
    pub fn ixl(&self) -> u8 {
        self.ix.lo()
    }

    #[inline]
    pub fn iyh(&self) -> u8 {
        self.iy.hi()
    }

    #[inline]
    pub fn iyl(&self) -> u8 {
        self.iy.lo()
    }

    /// The stack pointer of the current mode: SSP in system mode, USP in
    /// user mode.
    #[inline]
    pub fn sp(&self) -> u16 {
        if self.is_system() {
            self.ssp
        } else {
            self.usp
        }
    }

    #[inline]
    pub fn set_sp(&mut self, v: u16) {
        if self.is_system() {
            self.ssp = v;
        } else {
            self.usp = v;
        }
    }

    #[inline]
    pub(crate) fn add_sp(&mut self, delta: i16) {
        let v = self.sp().wrapping_add(delta as u16);
        self.set_sp(v);
    }

    // ========== Privilege and EPU Checks ==========

    /// Privileged-instruction check: in user mode the instruction becomes
    /// a PRIV trap and the caller skips its body.
    pub(crate) fn trapped_priv(&mut self) -> Result<bool, Abort> {
        if self.is_user() {
            let c = self.take_trap(Trap::Priv)?;
            self.extra_cycles += c;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// I/O instructions trap in user mode only while TCR inhibits user
    /// I/O.
    pub(crate) fn trapped_priv_io(&mut self) -> Result<bool, Abort> {
        if self.is_user() && self.tcr & tcr::I != 0 {
            let c = self.take_trap(Trap::Priv)?;
            self.extra_cycles += c;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// EPU instructions trap unless TCR claims an EPU is attached; no
    /// co-processor is modelled either way.
    pub(crate) fn trapped_epu(&mut self, trap: Trap) -> Result<(), Abort> {
        if self.tcr & tcr::E == 0 {
            let c = self.take_trap(trap)?;
            self.extra_cycles += c;
        } else {
            warn!("z280: unimplemented EPU opcode at {:#06x}", self.prepc.w);
        }
        Ok(())
    }

    pub(crate) fn illegal(&mut self, prefix: &str, op: u8) {
        warn!(
            "z280: illegal opcode {prefix} {op:02x} at {:#06x}",
            self.prepc.w
        );
    }

    #[inline]
    pub(crate) fn cc_ex(&mut self, opcode: u8) {
        self.extra_cycles += u32::from(tables::CC_EX[opcode as usize]);
    }

    // ========== Memory Access ==========

    fn translate(&mut self, addr: u16, program: bool, write: bool) -> Result<u32, Abort> {
        let user = self.is_user();
        self.mmu
            .translate(addr, program, write, user)
            .map_err(|PageFault| Abort::Accv)
    }

    pub(crate) fn read_mem(&mut self, addr: u16) -> Result<u8, Abort> {
        let phys = self.translate(addr, false, false)?;
        Ok(self.mem.read_byte(phys))
    }

    pub(crate) fn write_mem(&mut self, addr: u16, value: u8) -> Result<(), Abort> {
        let phys = self.translate(addr, false, true)?;
        self.mem.write_byte(phys, value);
        Ok(())
    }

    /// Word read. On a 16-bit bus an aligned word is one transfer; every
    /// other case is two byte transfers, each translated separately so a
    /// page boundary can fault on either half.
    pub(crate) fn read_mem16(&mut self, addr: u16) -> Result<u16, Abort> {
        let phys = self.translate(addr, false, false)?;
        if self.bus16 && addr & 1 == 0 {
            Ok(self.mem.read_word(phys))
        } else {
            let phys1 = self.translate(addr.wrapping_add(1), false, false)?;
            let lo = self.mem.read_byte(phys);
            let hi = self.mem.read_byte(phys1);
            Ok(u16::from(lo) | u16::from(hi) << 8)
        }
    }

    pub(crate) fn write_mem16(&mut self, addr: u16, value: u16) -> Result<(), Abort> {
        let phys = self.translate(addr, false, true)?;
        if self.bus16 && addr & 1 == 0 {
            self.mem.write_word(phys, value);
        } else {
            let phys1 = self.translate(addr.wrapping_add(1), false, true)?;
            self.mem.write_byte(phys, value as u8);
            self.mem.write_byte(phys1, (value >> 8) as u8);
        }
        Ok(())
    }

    /// Raw word read by physical address, for interrupt-vector fetches.
    pub(crate) fn read_phys16(&mut self, addr: u32) -> u16 {
        if self.bus16 {
            self.mem.read_raw_word(addr)
        } else {
            let lo = self.mem.read_raw_byte(addr);
            let hi = self.mem.read_raw_byte(addr + 1);
            u16::from(lo) | u16::from(hi) << 8
        }
    }

    /// Fetch the next opcode byte through the MMU's instruction space.
    pub(crate) fn fetch_op(&mut self) -> Result<u8, Abort> {
        let phys = self.translate(self.pc.w, true, false)?;
        self.pc.w = self.pc.w.wrapping_add(1);
        Ok(self.mem.read_raw_byte(phys))
    }

    /// Fetch an operand byte from the instruction stream.
    #[inline]
    pub(crate) fn arg(&mut self) -> Result<u8, Abort> {
        self.fetch_op()
    }

    /// Fetch a 16-bit operand, honoring bus width and page crossing.
    pub(crate) fn arg16(&mut self) -> Result<u16, Abort> {
        let addr = self.pc.w;
        let phys = self.translate(addr, true, false)?;
        self.pc.w = self.pc.w.wrapping_add(2);
        if self.bus16 && addr & 1 == 0 {
            Ok(self.mem.read_raw_word(phys))
        } else {
            let phys1 = self.translate(addr.wrapping_add(1), true, false)?;
            let lo = self.mem.read_raw_byte(phys);
            let hi = self.mem.read_raw_byte(phys1);
            Ok(u16::from(lo) | u16::from(hi) << 8)
        }
    }

    // ========== I/O Access ==========

    /// Byte input from a 16-bit port, paged by IOP.
    pub(crate) fn in_byte(&mut self, port: u16) -> u8 {
        let addr = u32::from(self.iop) << 16 | u32::from(port);
        self.io_read_byte(addr)
    }

    pub(crate) fn out_byte(&mut self, port: u16, data: u8) {
        let addr = u32::from(self.iop) << 16 | u32::from(port);
        self.io_write_byte(addr, data);
    }

    pub(crate) fn in_word(&mut self, port: u16) -> u16 {
        let addr = u32::from(self.iop) << 16 | u32::from(port);
        self.io_read_word(addr)
    }

    pub(crate) fn out_word(&mut self, port: u16, data: u16) {
        let addr = u32::from(self.iop) << 16 | u32::from(port);
        self.io_write_word(addr, data);
    }

    // ========== Stack Operations ==========

    pub(crate) fn pop16(&mut self) -> Result<u16, Abort> {
        let value = self.read_mem16(self.sp())?;
        self.add_sp(2);
        Ok(value)
    }

    /// Raw push, no stack-limit check (interrupt framing has its own).
    pub(crate) fn push16(&mut self, value: u16) -> Result<(), Abort> {
        let addr = self.sp().wrapping_sub(2);
        self.write_mem16(addr, value)?;
        self.add_sp(-2);
        Ok(())
    }

    /// PUSH as the instructions see it: raw push plus the system-stack
    /// warning check.
    pub(crate) fn push16_checked(&mut self, value: u16) -> Result<(), Abort> {
        self.push16(value)?;
        if self.is_system() {
            self.check_sso()?;
        }
        Ok(())
    }

    // ========== Effective Address Modes ==========

    pub(crate) fn ea_x(&mut self) -> Result<(), Abort> {
        let d = self.arg()? as i8;
        self.ea = self.ix.w.wrapping_add(d as u16);
        Ok(())
    }

    pub(crate) fn ea_y(&mut self) -> Result<(), Abort> {
        let d = self.arg()? as i8;
        self.ea = self.iy.w.wrapping_add(d as u16);
        Ok(())
    }

    pub(crate) fn ea_sp16(&mut self) -> Result<(), Abort> {
        let d = self.arg16()?;
        self.ea = self.sp().wrapping_add(d);
        Ok(())
    }

    pub(crate) fn ea_h16(&mut self) -> Result<(), Abort> {
        let d = self.arg16()?;
        self.ea = self.hl.w.wrapping_add(d);
        Ok(())
    }

    pub(crate) fn ea_x16(&mut self) -> Result<(), Abort> {
        let d = self.arg16()?;
        self.ea = self.ix.w.wrapping_add(d);
        Ok(())
    }

    pub(crate) fn ea_y16(&mut self) -> Result<(), Abort> {
        let d = self.arg16()?;
        self.ea = self.iy.w.wrapping_add(d);
        Ok(())
    }

    pub(crate) fn ea_hx(&mut self) {
        self.ea = self.hl.w.wrapping_add(self.ix.w);
    }

    pub(crate) fn ea_hy(&mut self) {
        self.ea = self.hl.w.wrapping_add(self.iy.w);
    }

    pub(crate) fn ea_xy(&mut self) {
        self.ea = self.ix.w.wrapping_add(self.iy.w);
    }

    /// PC-relative: displacement is relative to the following instruction.
    pub(crate) fn ea_ra(&mut self) -> Result<(), Abort> {
        let d = self.arg16()?;
        self.ea = self.pc.w.wrapping_add(d);
        Ok(())
    }

    // ========== Control Flow ==========

    pub(crate) fn op_jp(&mut self) -> Result<(), Abort> {
        self.pc.w = self.arg16()?;
        Ok(())
    }

    pub(crate) fn op_jp_cond(&mut self, cond: bool) -> Result<(), Abort> {
        if cond {
            self.pc.w = self.arg16()?;
        } else {
            self.pc.w = self.pc.w.wrapping_add(2);
        }
        Ok(())
    }

    pub(crate) fn op_jp_hl_cond(&mut self, cond: bool) {
        if cond {
            self.pc.w = self.hl.w;
        } else {
            self.pc.w = self.pc.w.wrapping_add(2);
        }
    }

    pub(crate) fn op_jp_ra(&mut self) -> Result<(), Abort> {
        self.ea_ra()?;
        self.pc.w = self.ea;
        Ok(())
    }

    pub(crate) fn op_jp_ra_cond(&mut self, cond: bool) -> Result<(), Abort> {
        if cond {
            self.op_jp_ra()?;
        } else {
            self.pc.w = self.pc.w.wrapping_add(2);
        }
        Ok(())
    }

    pub(crate) fn op_jr(&mut self) -> Result<(), Abort> {
        let d = self.arg()? as i8;
        self.pc.w = self.pc.w.wrapping_add(d as u16);
        Ok(())
    }

    pub(crate) fn op_jr_cond(&mut self, cond: bool, opcode: u8) -> Result<(), Abort> {
        if cond {
            self.op_jr()?;
            self.cc_ex(opcode);
        } else {
            self.pc.w = self.pc.w.wrapping_add(1);
        }
        Ok(())
    }

    pub(crate) fn op_call(&mut self) -> Result<(), Abort> {
        self.ea = self.arg16()?;
        self.push16(self.pc.w)?;
        self.pc.w = self.ea;
        if self.is_system() {
            self.check_sso()?;
        }
        Ok(())
    }

    pub(crate) fn op_call_cond(&mut self, cond: bool, opcode: u8) -> Result<(), Abort> {
        if cond {
            self.op_call()?;
            self.cc_ex(opcode);
        } else {
            self.pc.w = self.pc.w.wrapping_add(2);
        }
        Ok(())
    }

    pub(crate) fn op_call_hl_cond(&mut self, cond: bool, opcode: u8) -> Result<(), Abort> {
        if cond {
            self.push16(self.pc.w)?;
            self.pc.w = self.hl.w;
            if self.is_system() {
                self.check_sso()?;
            }
            self.cc_ex(opcode);
        } else {
            self.pc.w = self.pc.w.wrapping_add(2);
        }
        Ok(())
    }

    pub(crate) fn op_call_ra_cond(&mut self, cond: bool, opcode: u8) -> Result<(), Abort> {
        if cond {
            self.push16(self.pc.w)?;
            self.ea_ra()?;
            self.pc.w = self.ea;
            if self.is_system() {
                self.check_sso()?;
            }
            self.cc_ex(opcode);
        } else {
            self.pc.w = self.pc.w.wrapping_add(2);
        }
        Ok(())
    }

    pub(crate) fn op_ret_cond(&mut self, cond: bool, opcode: u8) -> Result<(), Abort> {
        if cond {
            self.pc.w = self.pop16()?;
            self.cc_ex(opcode);
        }
        Ok(())
    }

    pub(crate) fn op_rst(&mut self, addr: u16) -> Result<(), Abort> {
        self.push16(self.pc.w)?;
        self.pc.w = addr;
        if self.is_system() {
            self.check_sso()?;
        }
        Ok(())
    }

    /// RETN: restore the MSR interrupt-enable field from its shadow.
    pub(crate) fn op_retn(&mut self) -> Result<(), Abort> {
        if self.trapped_priv()? {
            return Ok(());
        }
        self.pc.w = self.pop16()?;
        self.msr = (self.msr & !msr::IRE_MASK) | u16::from(self.iff2);
        Ok(())
    }

    /// RETI: pop PC and let the daisy chain decode the `ED 4D` fetch.
    pub(crate) fn op_reti(&mut self) -> Result<(), Abort> {
        if self.trapped_priv()? {
            return Ok(());
        }
        self.pc.w = self.pop16()?;
        self.signal_reti();
        Ok(())
    }

    /// RETIL: atomic double pop of MSR then PC from the system stack.
    pub(crate) fn op_retil(&mut self) -> Result<(), Abort> {
        if self.trapped_priv()? {
            return Ok(());
        }
        let new_msr = self.read_mem16(self.sp())?;
        let new_pc = self.read_mem16(self.sp().wrapping_add(2))?;
        self.add_sp(4);
        self.msr = new_msr;
        self.pc.w = new_pc;
        Ok(())
    }

    pub(crate) fn op_ei(&mut self, groups: u8) -> Result<(), Abort> {
        if self.trapped_priv()? {
            return Ok(());
        }
        self.msr |= u16::from(groups & 0x7f);
        self.set_after_ei();
        Ok(())
    }

    pub(crate) fn op_di(&mut self, groups: u8) -> Result<(), Abort> {
        if self.trapped_priv()? {
            return Ok(());
        }
        self.msr &= !u16::from(groups & 0x7f);
        Ok(())
    }

    pub(crate) fn op_im(&mut self, mode: u8) -> Result<(), Abort> {
        if self.trapped_priv()? {
            return Ok(());
        }
        self.im = mode;
        Ok(())
    }

    // ========== 8-bit ALU ==========

    pub(crate) fn inc8(&mut self, value: u8) -> u8 {
        let res = value.wrapping_add(1);
        self.set_f((self.f() & CF) | flags::SZHV_INC[res as usize]);
        res
    }

    pub(crate) fn dec8(&mut self, value: u8) -> u8 {
        let res = value.wrapping_sub(1);
        self.set_f((self.f() & CF) | flags::SZHV_DEC[res as usize]);
        res
    }

    pub(crate) fn add_a(&mut self, value: u8) {
        let old = self.a() as usize;
        let res = (old + value as usize) & 0xff;
        self.set_f(flags::SZHVC_ADD[old << 8 | res]);
        self.set_a(res as u8);
    }

    pub(crate) fn adc_a(&mut self, value: u8) {
        let carry = usize::from(self.f() & CF);
        let old = self.a() as usize;
        let res = (old + value as usize + carry) & 0xff;
        self.set_f(flags::SZHVC_ADD[carry << 16 | old << 8 | res]);
        self.set_a(res as u8);
    }

    pub(crate) fn sub_a(&mut self, value: u8) {
        let old = self.a() as usize;
        let res = old.wrapping_sub(value as usize) & 0xff;
        self.set_f(flags::SZHVC_SUB[old << 8 | res]);
        self.set_a(res as u8);
    }

    pub(crate) fn sbc_a(&mut self, value: u8) {
        let carry = usize::from(self.f() & CF);
        let old = self.a() as usize;
        let res = old.wrapping_sub(value as usize).wrapping_sub(carry) & 0xff;
        self.set_f(flags::SZHVC_SUB[carry << 16 | old << 8 | res]);
        self.set_a(res as u8);
    }

    pub(crate) fn cp_a(&mut self, value: u8) {
        let old = self.a() as usize;
        let res = old.wrapping_sub(value as usize) & 0xff;
        self.set_f(flags::SZHVC_SUB[old << 8 | res]);
    }

    pub(crate) fn and_a(&mut self, value: u8) {
        let res = self.a() & value;
        self.set_a(res);
        self.set_f(flags::SZP[res as usize] | HF);
    }

    pub(crate) fn or_a(&mut self, value: u8) {
        let res = self.a() | value;
        self.set_a(res);
        self.set_f(flags::SZP[res as usize]);
    }

    pub(crate) fn xor_a(&mut self, value: u8) {
        let res = self.a() ^ value;
        self.set_a(res);
        self.set_f(flags::SZP[res as usize]);
    }

    pub(crate) fn op_neg(&mut self) {
        let value = self.a();
        self.set_a(0);
        self.sub_a(value);
    }

    pub(crate) fn op_daa(&mut self) {
        let a = self.a();
        let f = self.f();
        let mut r = a;
        if f & NF != 0 {
            if f & HF != 0 || a & 0x0f > 9 {
                r = r.wrapping_sub(6);
            }
            if f & CF != 0 || a > 0x99 {
                r = r.wrapping_sub(0x60);
            }
        } else {
            if f & HF != 0 || a & 0x0f > 9 {
                r = r.wrapping_add(6);
            }
            if f & CF != 0 || a > 0x99 {
                r = r.wrapping_add(0x60);
            }
        }
        self.set_f((f & (NF | CF)) | u8::from(a > 0x99) | ((a ^ r) & HF) | flags::SZP[r as usize]);
        self.set_a(r);
    }

    // ========== Rotates and Shifts ==========

    pub(crate) fn op_rlca(&mut self) {
        let a = self.a().rotate_left(1);
        self.set_a(a);
        self.set_f((self.f() & (SF | ZF | PF)) | (a & (YF | XF | CF)));
    }

    pub(crate) fn op_rrca(&mut self) {
        let a = self.a();
        self.set_f((self.f() & (SF | ZF | PF)) | (a & (YF | XF | CF)));
        self.set_a(a.rotate_right(1));
    }

    pub(crate) fn op_rla(&mut self) {
        let a = self.a();
        let res = (a << 1) | (self.f() & CF);
        let carry = if a & 0x80 != 0 { CF } else { 0 };
        self.set_f((self.f() & (SF | ZF | PF)) | carry | (res & (YF | XF)));
        self.set_a(res);
    }

    pub(crate) fn op_rra(&mut self) {
        let a = self.a();
        let res = (a >> 1) | (self.f() << 7);
        let carry = if a & 0x01 != 0 { CF } else { 0 };
        self.set_f((self.f() & (SF | ZF | PF)) | carry | (res & (YF | XF)));
        self.set_a(res);
    }

    pub(crate) fn rlc8(&mut self, value: u8) -> u8 {
        let carry = if value & 0x80 != 0 { CF } else { 0 };
        let res = value.rotate_left(1);
        self.set_f(flags::SZP[res as usize] | carry);
        res
    }

    pub(crate) fn rrc8(&mut self, value: u8) -> u8 {
        let carry = if value & 0x01 != 0 { CF } else { 0 };
        let res = value.rotate_right(1);
        self.set_f(flags::SZP[res as usize] | carry);
        res
    }

    pub(crate) fn rl8(&mut self, value: u8) -> u8 {
        let carry = if value & 0x80 != 0 { CF } else { 0 };
        let res = (value << 1) | (self.f() & CF);
        self.set_f(flags::SZP[res as usize] | carry);
        res
    }

    pub(crate) fn rr8(&mut self, value: u8) -> u8 {
        let carry = if value & 0x01 != 0 { CF } else { 0 };
        let res = (value >> 1) | (self.f() << 7);
        self.set_f(flags::SZP[res as usize] | carry);
        res
    }

    pub(crate) fn sla8(&mut self, value: u8) -> u8 {
        let carry = if value & 0x80 != 0 { CF } else { 0 };
        let res = value << 1;
        self.set_f(flags::SZP[res as usize] | carry);
        res
    }

    pub(crate) fn sra8(&mut self, value: u8) -> u8 {
        let carry = if value & 0x01 != 0 { CF } else { 0 };
        let res = (value >> 1) | (value & 0x80);
        self.set_f(flags::SZP[res as usize] | carry);
        res
    }

    /// TSET replaces the Z80's undocumented SLL: S picks up bit 7 of the
    /// operand, then the operand reads back as all ones.
    pub(crate) fn tset8(&mut self, value: u8) -> u8 {
        self.set_f((self.f() & 0x7f) | (value & 0x80));
        0xff
    }

    pub(crate) fn srl8(&mut self, value: u8) -> u8 {
        let carry = if value & 0x01 != 0 { CF } else { 0 };
        let res = value >> 1;
        self.set_f(flags::SZP[res as usize] | carry);
        res
    }

    pub(crate) fn op_bit(&mut self, bit: u8, value: u8) {
        self.set_f((self.f() & CF) | HF | flags::SZ_BIT[(value & (1 << bit)) as usize]);
    }

    /// BIT on an indexed operand takes its undocumented 5/3 flags from the
    /// high byte of the effective address.
    pub(crate) fn op_bit_xy(&mut self, bit: u8, value: u8) {
        self.set_f(
            (self.f() & CF)
                | HF
                | (flags::SZ_BIT[(value & (1 << bit)) as usize] & !(YF | XF))
                | ((self.ea >> 8) as u8 & (YF | XF)),
        );
    }

    pub(crate) fn op_rrd(&mut self) -> Result<(), Abort> {
        let n = self.read_mem(self.hl.w)?;
        self.write_mem(self.hl.w, (n >> 4) | (self.a() << 4))?;
        let a = (self.a() & 0xf0) | (n & 0x0f);
        self.set_a(a);
        self.set_f((self.f() & CF) | flags::SZP[a as usize]);
        Ok(())
    }

    pub(crate) fn op_rld(&mut self) -> Result<(), Abort> {
        let n = self.read_mem(self.hl.w)?;
        self.write_mem(self.hl.w, (n << 4) | (self.a() & 0x0f))?;
        let a = (self.a() & 0xf0) | (n >> 4);
        self.set_a(a);
        self.set_f((self.f() & CF) | flags::SZP[a as usize]);
        Ok(())
    }

    // ========== 16-bit Arithmetic ==========

    /// The Z80-style ADD rr,rr: only H and C change.
    pub(crate) fn add16(&mut self, dst: u16, value: u16) -> u16 {
        let res = u32::from(dst) + u32::from(value);
        self.set_f(
            (self.f() & (SF | ZF | VF))
                | (((u32::from(dst) ^ res ^ u32::from(value)) >> 8) as u8 & HF)
                | ((res >> 16) as u8 & CF),
        );
        res as u16
    }

    /// ADD rr,A: A is sign-extended.
    pub(crate) fn add16_a(&mut self, dst: u16) -> u16 {
        let value = self.a() as i8 as i16 as u16;
        self.add16(dst, value)
    }

    fn flags16(&mut self, dst: u16, value: u32, res: u32, negate: bool) {
        let overflow = if negate {
            ((value ^ u32::from(dst)) & (u32::from(dst) ^ res) & 0x8000) >> 13
        } else {
            ((value ^ u32::from(dst) ^ 0x8000) & (value ^ res) & 0x8000) >> 13
        };
        self.set_f(
            (((u32::from(dst) ^ res ^ value) >> 8) as u8 & HF)
                | if negate { NF } else { 0 }
                | ((res >> 16) as u8 & CF)
                | ((res >> 8) as u8 & SF)
                | if res & 0xffff == 0 { ZF } else { 0 }
                | overflow as u8,
        );
    }

    pub(crate) fn adc16(&mut self, dst: u16, value: u16) -> u16 {
        let res = u32::from(dst) + u32::from(value) + u32::from(self.f() & CF);
        self.flags16(dst, u32::from(value), res, false);
        res as u16
    }

    pub(crate) fn sbc16(&mut self, dst: u16, value: u16) -> u16 {
        let res = u32::from(dst)
            .wrapping_sub(u32::from(value))
            .wrapping_sub(u32::from(self.f() & CF));
        self.flags16(dst, u32::from(value), res, true);
        res as u16
    }

    /// ADDW: full 16-bit flags, unlike the legacy ADD HL,rr.
    pub(crate) fn op_addw(&mut self, value: u16) {
        let res = u32::from(self.hl.w) + u32::from(value);
        self.flags16(self.hl.w, u32::from(value), res, false);
        self.hl.w = res as u16;
    }

    pub(crate) fn op_subw(&mut self, value: u16) {
        let res = u32::from(self.hl.w).wrapping_sub(u32::from(value));
        self.flags16(self.hl.w, u32::from(value), res, true);
        self.hl.w = res as u16;
    }

    pub(crate) fn op_cpw(&mut self, value: u16) {
        let res = u32::from(self.hl.w).wrapping_sub(u32::from(value));
        self.flags16(self.hl.w, u32::from(value), res, true);
    }

    pub(crate) fn op_neg16(&mut self) {
        let hl = u32::from(self.hl.w);
        let res = 0u32.wrapping_sub(hl);
        self.set_f(
            (((hl ^ res) >> 8) as u8 & HF)
                | NF
                | ((res >> 16) as u8 & CF)
                | ((res >> 8) as u8 & SF)
                | if res & 0xffff == 0 { ZF } else { 0 }
                | (((hl & res & 0x8000) >> 13) as u8),
        );
        self.hl.w = res as u16;
    }

    pub(crate) fn op_exts(&mut self) {
        let a = self.a();
        self.set_l(a);
        self.set_h(if a & 0x80 != 0 { 0xff } else { 0 });
    }

    pub(crate) fn op_exts_hl(&mut self) {
        self.de.w = if self.h() & 0x80 != 0 { 0xffff } else { 0 };
    }

    // ========== Multiply and Divide ==========

    pub(crate) fn op_mult(&mut self, value: u8) {
        let res = i16::from(self.a() as i8) * i16::from(value as i8);
        self.set_f(
            (self.f() & (HF | NF))
                | if res < 0 { SF } else { 0 }
                | if res == 0 { ZF } else { 0 }
                | if !(-128..128).contains(&res) { CF } else { 0 },
        );
        self.hl.w = res as u16;
    }

    pub(crate) fn op_multu(&mut self, value: u8) {
        let res = u16::from(self.a()) * u16::from(value);
        self.set_f(
            (self.f() & (HF | NF))
                | if res == 0 { ZF } else { 0 }
                | if res & 0xff00 != 0 { CF } else { 0 },
        );
        self.hl.w = res;
    }

    pub(crate) fn op_multw(&mut self, value: u16) {
        let res = i32::from(self.hl.w as i16) * i32::from(value as i16);
        self.set_f(
            (self.f() & (HF | NF))
                | if res < 0 { SF } else { 0 }
                | if res == 0 { ZF } else { 0 }
                | if !(-32768..32768).contains(&res) { CF } else { 0 },
        );
        self.de.w = (res >> 16) as u16;
        self.hl.w = res as u16;
    }

    pub(crate) fn op_multuw(&mut self, value: u16) {
        let res = u32::from(self.hl.w) * u32::from(value);
        self.set_f(
            (self.f() & (HF | NF))
                | if res == 0 { ZF } else { 0 }
                | if res & 0xffff_0000 != 0 { CF } else { 0 },
        );
        self.de.w = (res >> 16) as u16;
        self.hl.w = res as u16;
    }

    /// DIV HL,n: signed 16/8. Divide-by-zero and quotient overflow raise
    /// the division trap; the remainder carries the dividend's sign.
    pub(crate) fn op_div(&mut self, value: u8) -> Result<(), Abort> {
        let divisor = i16::from(value as i8);
        if divisor == 0 {
            self.set_f((self.f() & (HF | NF)) | SF | ZF);
            let c = self.take_trap(Trap::Div)?;
            self.extra_cycles += c;
            return Ok(());
        }
        let dividend = self.hl.w as i16;
        let quot = dividend / divisor;
        if (-128..128).contains(&quot) {
            let rem = dividend % divisor;
            self.set_f(
                (self.f() & (HF | NF))
                    | if quot < 0 { SF } else { 0 }
                    | if quot == 0 { ZF } else { 0 },
            );
            self.set_a(quot as u8);
            self.set_l(rem as u8);
        } else {
            self.set_f((self.f() & (HF | NF)) | VF);
            let c = self.take_trap(Trap::Div)?;
            self.extra_cycles += c;
        }
        Ok(())
    }

    pub(crate) fn op_divu(&mut self, value: u8) -> Result<(), Abort> {
        let divisor = u16::from(value);
        if divisor == 0 {
            self.set_f((self.f() & (HF | NF)) | SF | ZF);
            let c = self.take_trap(Trap::Div)?;
            self.extra_cycles += c;
            return Ok(());
        }
        let quot = self.hl.w / divisor;
        if quot < 128 {
            let rem = self.hl.w % divisor;
            self.set_f((self.f() & (HF | NF)) | if quot == 0 { ZF } else { 0 });
            self.set_a(quot as u8);
            self.set_l(rem as u8);
        } else {
            self.set_f((self.f() & (HF | NF)) | VF);
            let c = self.take_trap(Trap::Div)?;
            self.extra_cycles += c;
        }
        Ok(())
    }

    /// DIVW DEHL,n: signed 32/16, quotient to HL, remainder to DE.
    pub(crate) fn op_divw(&mut self, value: u16) -> Result<(), Abort> {
        let divisor = i32::from(value as i16);
        if divisor == 0 {
            self.set_f((self.f() & (HF | NF)) | SF | ZF);
            let c = self.take_trap(Trap::Div)?;
            self.extra_cycles += c;
            return Ok(());
        }
        let dividend = ((u32::from(self.de.w) << 16) | u32::from(self.hl.w)) as i32;
        let quot = dividend / divisor;
        if (-32768..32768).contains(&quot) {
            let rem = dividend % divisor;
            self.set_f(
                (self.f() & (HF | NF))
                    | if quot < 0 { SF } else { 0 }
                    | if quot == 0 { ZF } else { 0 },
            );
            self.hl.w = quot as u16;
            self.de.w = rem as u16;
        } else {
            self.set_f((self.f() & (HF | NF)) | VF);
            let c = self.take_trap(Trap::Div)?;
            self.extra_cycles += c;
        }
        Ok(())
    }

    pub(crate) fn op_divuw(&mut self, value: u16) -> Result<(), Abort> {
        let divisor = u32::from(value);
        if divisor == 0 {
            self.set_f((self.f() & (HF | NF)) | SF | ZF);
            let c = self.take_trap(Trap::Div)?;
            self.extra_cycles += c;
            return Ok(());
        }
        let dividend = (u32::from(self.de.w) << 16) | u32::from(self.hl.w);
        let quot = dividend / divisor;
        if quot < 32768 {
            let rem = dividend % divisor;
            self.set_f((self.f() & (HF | NF)) | if quot == 0 { ZF } else { 0 });
            self.hl.w = quot as u16;
            self.de.w = rem as u16;
        } else {
            self.set_f((self.f() & (HF | NF)) | VF);
            let c = self.take_trap(Trap::Div)?;
            self.extra_cycles += c;
        }
        Ok(())
    }

    // ========== Register Exchanges ==========

    pub(crate) fn op_ex_af(&mut self) {
        std::mem::swap(&mut self.af, &mut self.af2);
        self.af2_in_use = true;
    }

    pub(crate) fn op_exx(&mut self) {
        std::mem::swap(&mut self.bc, &mut self.bc2);
        std::mem::swap(&mut self.de, &mut self.de2);
        std::mem::swap(&mut self.hl, &mut self.hl2);
        self.bc2_in_use = true;
    }

    // ========== User-space Access (LDUD/LDUP) ==========

    /// LDUD/LDUP A,(ea): read the user address space from system mode.
    /// Failure sets Carry and reports the descriptor's V/WP bits in Z/V
    /// instead of trapping.
    pub(crate) fn op_ldu_a_from_mem(&mut self, program: bool) -> Result<(), Abort> {
        if self.trapped_priv()? {
            return Ok(());
        }
        let ea = self.ea;
        match self.mmu.translate_user_space(ea, program, false) {
            Ok(phys) => {
                let value = self.mem.read_byte(phys);
                self.set_a(value);
                self.set_f(self.f() & !CF);
            }
            Err(PageFault) => self.ldu_fault_flags(),
        }
        Ok(())
    }

    pub(crate) fn op_ldu_mem_from_a(&mut self, program: bool) -> Result<(), Abort> {
        if self.trapped_priv()? {
            return Ok(());
        }
        let ea = self.ea;
        match self.mmu.translate_user_space(ea, program, true) {
            Ok(phys) => {
                let a = self.a();
                self.mem.write_byte(phys, a);
                self.set_f(self.f() & !CF);
            }
            Err(PageFault) => self.ldu_fault_flags(),
        }
        Ok(())
    }

    fn ldu_fault_flags(&mut self) {
        let descriptor = self.mmu.pdr[self.mmu.last_index];
        let mut f = self.f() & !(ZF | VF);
        f |= CF;
        if descriptor & pdr::V != 0 {
            f |= VF;
        }
        if descriptor & pdr::WP != 0 {
            f |= ZF;
        }
        self.set_f(f);
    }

    // ========== Privileged Register Moves ==========

    pub(crate) fn op_ld_a_i(&mut self) -> Result<(), Abort> {
        if self.trapped_priv()? {
            return Ok(());
        }
        let v = self.i;
        self.set_a(v);
        self.set_f((self.f() & CF) | flags::SZ[v as usize] | ((self.msr as u8 & 1) << 2));
        Ok(())
    }

    pub(crate) fn op_ld_i_a(&mut self) -> Result<(), Abort> {
        if self.trapped_priv()? {
            return Ok(());
        }
        self.i = self.a();
        Ok(())
    }

    pub(crate) fn op_ld_a_r(&mut self) -> Result<(), Abort> {
        if self.trapped_priv()? {
            return Ok(());
        }
        let v = self.r;
        self.set_a(v);
        self.set_f((self.f() & CF) | flags::SZ[v as usize] | ((self.msr as u8 & 1) << 2));
        Ok(())
    }

    pub(crate) fn op_ld_r_a(&mut self) -> Result<(), Abort> {
        if self.trapped_priv()? {
            return Ok(());
        }
        self.r = self.a();
        Ok(())
    }

    /// LDCTL (C),rr
    pub(crate) fn op_ldctl_to(&mut self, value: u16) -> Result<(), Abort> {
        if self.trapped_priv()? {
            return Ok(());
        }
        let reg = self.c();
        self.write_control(reg, value);
        Ok(())
    }

    /// LDCTL rr,(C)
    pub(crate) fn op_ldctl_from(&mut self) -> Result<Option<u16>, Abort> {
        if self.trapped_priv()? {
            return Ok(None);
        }
        let reg = self.c();
        Ok(Some(self.read_control(reg)))
    }

    // ========== Block Transfer and Search ==========

    pub(crate) fn op_ldi(&mut self) -> Result<(), Abort> {
        let value = self.read_mem(self.hl.w)?;
        self.write_mem(self.de.w, value)?;
        let mut f = self.f() & (SF | ZF | CF);
        let sum = self.a().wrapping_add(value);
        if sum & 0x02 != 0 {
            f |= YF;
        }
        if sum & 0x08 != 0 {
            f |= XF;
        }
        self.hl.w = self.hl.w.wrapping_add(1);
        self.de.w = self.de.w.wrapping_add(1);
        self.bc.w = self.bc.w.wrapping_sub(1);
        if self.bc.w != 0 {
            f |= VF;
        }
        self.set_f(f);
        Ok(())
    }

    pub(crate) fn op_ldd(&mut self) -> Result<(), Abort> {
        let value = self.read_mem(self.hl.w)?;
        self.write_mem(self.de.w, value)?;
        let mut f = self.f() & (SF | ZF | CF);
        let sum = self.a().wrapping_add(value);
        if sum & 0x02 != 0 {
            f |= YF;
        }
        if sum & 0x08 != 0 {
            f |= XF;
        }
        self.hl.w = self.hl.w.wrapping_sub(1);
        self.de.w = self.de.w.wrapping_sub(1);
        self.bc.w = self.bc.w.wrapping_sub(1);
        if self.bc.w != 0 {
            f |= VF;
        }
        self.set_f(f);
        Ok(())
    }

    fn cp_block_flags(&mut self, value: u8) {
        let a = self.a();
        let mut res = a.wrapping_sub(value);
        let mut f = (self.f() & CF)
            | (flags::SZ[res as usize] & !(YF | XF))
            | ((a ^ value ^ res) & HF)
            | NF;
        if f & HF != 0 {
            res = res.wrapping_sub(1);
        }
        if res & 0x02 != 0 {
            f |= YF;
        }
        if res & 0x08 != 0 {
            f |= XF;
        }
        if self.bc.w != 0 {
            f |= VF;
        }
        self.set_f(f);
    }

    pub(crate) fn op_cpi(&mut self) -> Result<(), Abort> {
        let value = self.read_mem(self.hl.w)?;
        self.hl.w = self.hl.w.wrapping_add(1);
        self.bc.w = self.bc.w.wrapping_sub(1);
        self.cp_block_flags(value);
        Ok(())
    }

    pub(crate) fn op_cpd(&mut self) -> Result<(), Abort> {
        let value = self.read_mem(self.hl.w)?;
        self.hl.w = self.hl.w.wrapping_sub(1);
        self.bc.w = self.bc.w.wrapping_sub(1);
        self.cp_block_flags(value);
        Ok(())
    }

    /// Re-fetch a repeating block instruction: back PC up over the two
    /// opcode bytes and cancel any pending single-step for the iteration.
    fn block_repeat(&mut self, opcode: u8) {
        self.pc.w = self.pc.w.wrapping_sub(2);
        self.msr &= !msr::SSP;
        self.cc_ex(opcode);
    }

    pub(crate) fn op_ldir(&mut self) -> Result<(), Abort> {
        self.op_ldi()?;
        if self.bc.w != 0 {
            self.block_repeat(0xb0);
        }
        Ok(())
    }

    pub(crate) fn op_lddr(&mut self) -> Result<(), Abort> {
        self.op_ldd()?;
        if self.bc.w != 0 {
            self.block_repeat(0xb8);
        }
        Ok(())
    }

    pub(crate) fn op_cpir(&mut self) -> Result<(), Abort> {
        self.op_cpi()?;
        if self.bc.w != 0 && self.f() & ZF == 0 {
            self.block_repeat(0xb1);
        }
        Ok(())
    }

    pub(crate) fn op_cpdr(&mut self) -> Result<(), Abort> {
        self.op_cpd()?;
        if self.bc.w != 0 && self.f() & ZF == 0 {
            self.block_repeat(0xb9);
        }
        Ok(())
    }

    // ========== Block I/O ==========

    /// Undocumented P/V of the repeated I/O instructions, from the
    /// recovered lookup tables. `decrementing` picks the IND/OUTD table.
    fn block_io_flags(&mut self, io: u16, decrementing: bool) {
        let b = self.b();
        let c = self.c();
        let mut f = flags::SZ[b as usize];
        if io & 0x80 != 0 {
            f |= NF;
        }
        let sum = if decrementing {
            (u32::from(c) + u32::from(io)).wrapping_sub(1)
        } else {
            u32::from(c) + u32::from(io) + 1
        };
        if sum & 0x100 != 0 {
            f |= HF | CF;
        }
        let tmp1 = if decrementing {
            tables::DREP_TMP1[(c & 3) as usize][(io & 3) as usize]
        } else {
            tables::IREP_TMP1[(c & 3) as usize][(io & 3) as usize]
        };
        if (tmp1 ^ tables::BREG_TMP2[b as usize] ^ (c >> 2) ^ (io >> 2) as u8) & 1 != 0 {
            f |= PF;
        }
        self.set_f(f);
    }

    pub(crate) fn op_ini(&mut self) -> Result<(), Abort> {
        let io = self.in_byte(self.bc.w);
        self.write_mem(self.hl.w, io)?;
        self.bc.set_hi(self.b().wrapping_sub(1));
        self.hl.w = self.hl.w.wrapping_add(1);
        self.block_io_flags(u16::from(io), false);
        Ok(())
    }

    pub(crate) fn op_ind(&mut self) -> Result<(), Abort> {
        let io = self.in_byte(self.bc.w);
        self.write_mem(self.hl.w, io)?;
        self.bc.set_hi(self.b().wrapping_sub(1));
        self.hl.w = self.hl.w.wrapping_sub(1);
        self.block_io_flags(u16::from(io), true);
        Ok(())
    }

    pub(crate) fn op_outi(&mut self) -> Result<(), Abort> {
        let io = self.read_mem(self.hl.w)?;
        self.out_byte(self.bc.w, io);
        self.bc.set_hi(self.b().wrapping_sub(1));
        self.hl.w = self.hl.w.wrapping_add(1);
        self.block_io_flags(u16::from(io), false);
        Ok(())
    }

    pub(crate) fn op_outd(&mut self) -> Result<(), Abort> {
        let io = self.read_mem(self.hl.w)?;
        self.out_byte(self.bc.w, io);
        self.bc.set_hi(self.b().wrapping_sub(1));
        self.hl.w = self.hl.w.wrapping_sub(1);
        self.block_io_flags(u16::from(io), true);
        Ok(())
    }

    pub(crate) fn op_iniw(&mut self) -> Result<(), Abort> {
        let io = self.in_word(self.bc.w);
        self.write_mem16(self.hl.w, io)?;
        self.bc.set_hi(self.b().wrapping_sub(1));
        self.hl.w = self.hl.w.wrapping_add(2);
        self.block_io_flags(io, false);
        Ok(())
    }

    pub(crate) fn op_indw(&mut self) -> Result<(), Abort> {
        let io = self.in_word(self.bc.w);
        self.write_mem16(self.hl.w, io)?;
        self.bc.set_hi(self.b().wrapping_sub(1));
        self.hl.w = self.hl.w.wrapping_sub(2);
        self.block_io_flags(io, true);
        Ok(())
    }

    pub(crate) fn op_outiw(&mut self) -> Result<(), Abort> {
        let io = self.read_mem16(self.hl.w)?;
        self.out_word(self.bc.w, io);
        self.bc.set_hi(self.b().wrapping_sub(1));
        self.hl.w = self.hl.w.wrapping_add(2);
        self.block_io_flags(io, false);
        Ok(())
    }

    pub(crate) fn op_outdw(&mut self) -> Result<(), Abort> {
        let io = self.read_mem16(self.hl.w)?;
        self.out_word(self.bc.w, io);
        self.bc.set_hi(self.b().wrapping_sub(1));
        self.hl.w = self.hl.w.wrapping_sub(2);
        self.block_io_flags(io, true);
        Ok(())
    }

    pub(crate) fn op_inir(&mut self) -> Result<(), Abort> {
        self.op_ini()?;
        if self.b() != 0 {
            self.block_repeat(0xb2);
        }
        Ok(())
    }

    pub(crate) fn op_indr(&mut self) -> Result<(), Abort> {
        self.op_ind()?;
        if self.b() != 0 {
            self.block_repeat(0xba);
        }
        Ok(())
    }

    pub(crate) fn op_otir(&mut self) -> Result<(), Abort> {
        self.op_outi()?;
        if self.b() != 0 {
            self.block_repeat(0xb3);
        }
        Ok(())
    }

    pub(crate) fn op_otdr(&mut self) -> Result<(), Abort> {
        self.op_outd()?;
        if self.b() != 0 {
            self.block_repeat(0xbb);
        }
        Ok(())
    }

    pub(crate) fn op_inirw(&mut self) -> Result<(), Abort> {
        self.op_iniw()?;
        if self.b() != 0 {
            self.block_repeat(0x92);
        }
        Ok(())
    }

    pub(crate) fn op_indrw(&mut self) -> Result<(), Abort> {
        self.op_indw()?;
        if self.b() != 0 {
            self.block_repeat(0x9a);
        }
        Ok(())
    }

    pub(crate) fn op_otirw(&mut self) -> Result<(), Abort> {
        self.op_outiw()?;
        if self.b() != 0 {
            self.block_repeat(0x93);
        }
        Ok(())
    }

    pub(crate) fn op_otdrw(&mut self) -> Result<(), Abort> {
        self.op_outdw()?;
        if self.b() != 0 {
            self.block_repeat(0x9b);
        }
        Ok(())
    }

    /// EI's one-instruction interrupt shadow.
    pub(crate) fn set_after_ei(&mut self) {
        self.after_ei = true;
    }
}
