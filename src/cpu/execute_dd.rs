//! DD dispatch table
//!
//! IX-indexed forms of the base set plus one flavor of the Z280 extension
//! slots: word loads/increments through `(HL)` and `(w)`, the
//! `(SP+w)`/`(HL+IX)`/`(HL+IY)`/`(IX+IY)` operand modes for the 8-bit ALU
//! column, JAR/JAF, and the `(HL)`-targeted stack/jump/call group. Slots
//! the Z280 leaves unassigned fall back to the root handler at this
//! table's cycle cost.

use super::flags::{CF, PF, SF, ZF};
use super::tables;
use super::{Abort, Z280};

impl Z280 {
    pub(super) fn exec_dd(&mut self, op: u8) -> Result<u32, Abort> {
        self.dd_main(op)?;
        Ok(u32::from(tables::CC_XY[op as usize]))
    }

    fn dd_main(&mut self, op: u8) -> Result<(), Abort> {
        match op {
            0x01 => {                                                   // LD (HL),w
                let v = self.arg16()?;
                self.write_mem16(self.hl.w, v)?;
            }
            0x03 => {                                                   // INCW (HL)
                let v = self.read_mem16(self.hl.w)?.wrapping_add(1);
                self.write_mem16(self.hl.w, v)?;
            }
            0x04 => {                                                   // INC (SP+w)
                self.ea_sp16()?;
                let v = self.read_mem(self.ea)?;
                let v = self.inc8(v);
                self.write_mem(self.ea, v)?;
            }
            0x05 => {                                                   // DEC (SP+w)
                self.ea_sp16()?;
                let v = self.read_mem(self.ea)?;
                let v = self.dec8(v);
                self.write_mem(self.ea, v)?;
            }
            0x06 => {                                                   // LD (SP+w),n
                self.ea_sp16()?;
                let v = self.arg()?;
                self.write_mem(self.ea, v)?;
            }

            0x09 => self.ix.w = self.add16(self.ix.w, self.bc.w),       // ADD IX,BC
            0x0b => {                                                   // DECW (HL)
                let v = self.read_mem16(self.hl.w)?.wrapping_sub(1);
                self.write_mem16(self.hl.w, v)?;
            }
            0x0c => {                                                   // INC (HL+IX)
                self.ea_hx();
                let v = self.read_mem(self.ea)?;
                let v = self.inc8(v);
                self.write_mem(self.ea, v)?;
            }
            0x0d => {                                                   // DEC (HL+IX)
                self.ea_hx();
                let v = self.read_mem(self.ea)?;
                let v = self.dec8(v);
                self.write_mem(self.ea, v)?;
            }
            0x0e => {                                                   // LD (HL+IX),n
                self.ea_hx();
                let v = self.arg()?;
                self.write_mem(self.ea, v)?;
            }

            0x11 => {                                                   // LD (w),w
                self.ea = self.arg16()?;
                let v = self.arg16()?;
                self.write_mem16(self.ea, v)?;
            }
            0x13 => {                                                   // INCW (w)
                self.ea = self.arg16()?;
                let v = self.read_mem16(self.ea)?.wrapping_add(1);
                self.write_mem16(self.ea, v)?;
            }
            0x14 => {                                                   // INC (HL+IY)
                self.ea_hy();
                let v = self.read_mem(self.ea)?;
                let v = self.inc8(v);
                self.write_mem(self.ea, v)?;
            }
            0x15 => {                                                   // DEC (HL+IY)
                self.ea_hy();
                let v = self.read_mem(self.ea)?;
                let v = self.dec8(v);
                self.write_mem(self.ea, v)?;
            }
            0x16 => {                                                   // LD (HL+IY),n
                self.ea_hy();
                let v = self.arg()?;
                self.write_mem(self.ea, v)?;
            }

            0x19 => self.ix.w = self.add16(self.ix.w, self.de.w),       // ADD IX,DE
            0x1b => {                                                   // DECW (w)
                self.ea = self.arg16()?;
                let v = self.read_mem16(self.ea)?.wrapping_sub(1);
                self.write_mem16(self.ea, v)?;
            }
            0x1c => {                                                   // INC (IX+IY)
                self.ea_xy();
                let v = self.read_mem(self.ea)?;
                let v = self.inc8(v);
                self.write_mem(self.ea, v)?;
            }
            0x1d => {                                                   // DEC (IX+IY)
                self.ea_xy();
                let v = self.read_mem(self.ea)?;
                let v = self.dec8(v);
                self.write_mem(self.ea, v)?;
            }
            0x1e => {                                                   // LD (IX+IY),n
                self.ea_xy();
                let v = self.arg()?;
                self.write_mem(self.ea, v)?;
            }

            0x20 => { let cond = self.bc2_in_use; self.op_jr_cond(cond, 0x20)?; } // JAR o
            0x21 => self.ix.w = self.arg16()?,                          // LD IX,w
            0x22 => {                                                   // LD (w),IX
                self.ea = self.arg16()?;
                self.write_mem16(self.ea, self.ix.w)?;
            }
            0x23 => self.ix.w = self.ix.w.wrapping_add(1),              // INC IX
            0x24 => { let v = self.inc8(self.ixh()); self.ix.set_hi(v); } // INC HX
            0x25 => { let v = self.dec8(self.ixh()); self.ix.set_hi(v); } // DEC HX
            0x26 => { let v = self.arg()?; self.ix.set_hi(v); }         // LD HX,n

            0x28 => { let cond = self.af2_in_use; self.op_jr_cond(cond, 0x28)?; } // JAF o
            0x29 => self.ix.w = self.add16(self.ix.w, self.ix.w),       // ADD IX,IX
            0x2a => {                                                   // LD IX,(w)
                self.ea = self.arg16()?;
                self.ix.w = self.read_mem16(self.ea)?;
            }
            0x2b => self.ix.w = self.ix.w.wrapping_sub(1),              // DEC IX
            0x2c => { let v = self.inc8(self.ixl()); self.ix.set_lo(v); } // INC LX
            0x2d => { let v = self.dec8(self.ixl()); self.ix.set_lo(v); } // DEC LX
            0x2e => { let v = self.arg()?; self.ix.set_lo(v); }         // LD LX,n

            0x31 => {                                                   // LD (ra),w
                self.ea_ra()?;
                let v = self.arg16()?;
                self.write_mem16(self.ea, v)?;
            }
            0x33 => {                                                   // INCW (ra)
                self.ea_ra()?;
                let v = self.read_mem16(self.ea)?.wrapping_add(1);
                self.write_mem16(self.ea, v)?;
            }
            0x34 => {                                                   // INC (IX+o)
                self.ea_x()?;
                let v = self.read_mem(self.ea)?;
                let v = self.inc8(v);
                self.write_mem(self.ea, v)?;
            }
            0x35 => {                                                   // DEC (IX+o)
                self.ea_x()?;
                let v = self.read_mem(self.ea)?;
                let v = self.dec8(v);
                self.write_mem(self.ea, v)?;
            }
            0x36 => {                                                   // LD (IX+o),n
                self.ea_x()?;
                let v = self.arg()?;
                self.write_mem(self.ea, v)?;
            }

            0x39 => { let sp = self.sp(); self.ix.w = self.add16(self.ix.w, sp); } // ADD IX,SP
            0x3b => {                                                   // DECW (ra)
                self.ea_ra()?;
                let v = self.read_mem16(self.ea)?.wrapping_sub(1);
                self.write_mem16(self.ea, v)?;
            }
            0x3c => {                                                   // INC (w)
                self.ea = self.arg16()?;
                let v = self.read_mem(self.ea)?;
                let v = self.inc8(v);
                self.write_mem(self.ea, v)?;
            }
            0x3d => {                                                   // DEC (w)
                self.ea = self.arg16()?;
                let v = self.read_mem(self.ea)?;
                let v = self.dec8(v);
                self.write_mem(self.ea, v)?;
            }
            0x3e => {                                                   // LD (w),n
                self.ea = self.arg16()?;
                let v = self.arg()?;
                self.write_mem(self.ea, v)?;
            }

            0x44 => { let v = self.ixh(); self.set_b(v); }              // LD B,HX
            0x45 => { let v = self.ixl(); self.set_b(v); }              // LD B,LX
            0x46 => { self.ea_x()?; let v = self.read_mem(self.ea)?; self.set_b(v); } // LD B,(IX+o)
            0x4c => { let v = self.ixh(); self.set_c(v); }              // LD C,HX
            0x4d => { let v = self.ixl(); self.set_c(v); }              // LD C,LX
            0x4e => { self.ea_x()?; let v = self.read_mem(self.ea)?; self.set_c(v); } // LD C,(IX+o)
            0x54 => { let v = self.ixh(); self.set_d(v); }              // LD D,HX
            0x55 => { let v = self.ixl(); self.set_d(v); }              // LD D,LX
            0x56 => { self.ea_x()?; let v = self.read_mem(self.ea)?; self.set_d(v); } // LD D,(IX+o)
            0x5c => { let v = self.ixh(); self.set_e(v); }              // LD E,HX
            0x5d => { let v = self.ixl(); self.set_e(v); }              // LD E,LX
            0x5e => { self.ea_x()?; let v = self.read_mem(self.ea)?; self.set_e(v); } // LD E,(IX+o)

            0x60 => { let v = self.b(); self.ix.set_hi(v); }            // LD HX,B
            0x61 => { let v = self.c(); self.ix.set_hi(v); }            // LD HX,C
            0x62 => { let v = self.d(); self.ix.set_hi(v); }            // LD HX,D
            0x63 => { let v = self.e(); self.ix.set_hi(v); }            // LD HX,E
            0x64 => {}                                                  // LD HX,HX
            0x65 => { let v = self.ixl(); self.ix.set_hi(v); }          // LD HX,LX
            0x66 => { self.ea_x()?; let v = self.read_mem(self.ea)?; self.set_h(v); } // LD H,(IX+o)
            0x67 => { let v = self.a(); self.ix.set_hi(v); }            // LD HX,A

            0x68 => { let v = self.b(); self.ix.set_lo(v); }            // LD LX,B
            0x69 => { let v = self.c(); self.ix.set_lo(v); }            // LD LX,C
            0x6a => { let v = self.d(); self.ix.set_lo(v); }            // LD LX,D
            0x6b => { let v = self.e(); self.ix.set_lo(v); }            // LD LX,E
            0x6c => { let v = self.ixh(); self.ix.set_lo(v); }          // LD LX,HX
            0x6d => {}                                                  // LD LX,LX
            0x6e => { self.ea_x()?; let v = self.read_mem(self.ea)?; self.set_l(v); } // LD L,(IX+o)
            0x6f => { let v = self.a(); self.ix.set_lo(v); }            // LD LX,A

            0x70 => { self.ea_x()?; self.write_mem(self.ea, self.b())?; } // LD (IX+o),B
            0x71 => { self.ea_x()?; self.write_mem(self.ea, self.c())?; } // LD (IX+o),C
            0x72 => { self.ea_x()?; self.write_mem(self.ea, self.d())?; } // LD (IX+o),D
            0x73 => { self.ea_x()?; self.write_mem(self.ea, self.e())?; } // LD (IX+o),E
            0x74 => { self.ea_x()?; self.write_mem(self.ea, self.h())?; } // LD (IX+o),H
            0x75 => { self.ea_x()?; self.write_mem(self.ea, self.l())?; } // LD (IX+o),L
            0x77 => { self.ea_x()?; self.write_mem(self.ea, self.a())?; } // LD (IX+o),A

            0x78 => { self.ea_sp16()?; let v = self.read_mem(self.ea)?; self.set_a(v); } // LD A,(SP+w)
            0x79 => { self.ea_hx(); let v = self.read_mem(self.ea)?; self.set_a(v); } // LD A,(HL+IX)
            0x7a => { self.ea_hy(); let v = self.read_mem(self.ea)?; self.set_a(v); } // LD A,(HL+IY)
            0x7b => { self.ea_xy(); let v = self.read_mem(self.ea)?; self.set_a(v); } // LD A,(IX+IY)
            0x7c => { let v = self.ixh(); self.set_a(v); }              // LD A,HX
            0x7d => { let v = self.ixl(); self.set_a(v); }              // LD A,LX
            0x7e => { self.ea_x()?; let v = self.read_mem(self.ea)?; self.set_a(v); } // LD A,(IX+o)

            0x80 => { self.ea_sp16()?; let v = self.read_mem(self.ea)?; self.add_a(v); } // ADD A,(SP+w)
            0x81 => { self.ea_hx(); let v = self.read_mem(self.ea)?; self.add_a(v); } // ADD A,(HL+IX)
            0x82 => { self.ea_hy(); let v = self.read_mem(self.ea)?; self.add_a(v); } // ADD A,(HL+IY)
            0x83 => { self.ea_xy(); let v = self.read_mem(self.ea)?; self.add_a(v); } // ADD A,(IX+IY)
            0x84 => self.add_a(self.ixh()),                             // ADD A,HX
            0x85 => self.add_a(self.ixl()),                             // ADD A,LX
            0x86 => { self.ea_x()?; let v = self.read_mem(self.ea)?; self.add_a(v); } // ADD A,(IX+o)
            0x87 => {                                                   // ADD A,(w)
                self.ea = self.arg16()?;
                let v = self.read_mem(self.ea)?;
                self.add_a(v);
            }

            0x88 => { self.ea_sp16()?; let v = self.read_mem(self.ea)?; self.adc_a(v); } // ADC A,(SP+w)
            0x89 => { self.ea_hx(); let v = self.read_mem(self.ea)?; self.adc_a(v); } // ADC A,(HL+IX)
            0x8a => { self.ea_hy(); let v = self.read_mem(self.ea)?; self.adc_a(v); } // ADC A,(HL+IY)
            0x8b => { self.ea_xy(); let v = self.read_mem(self.ea)?; self.adc_a(v); } // ADC A,(IX+IY)
            0x8c => self.adc_a(self.ixh()),                             // ADC A,HX
            0x8d => self.adc_a(self.ixl()),                             // ADC A,LX
            0x8e => { self.ea_x()?; let v = self.read_mem(self.ea)?; self.adc_a(v); } // ADC A,(IX+o)
            0x8f => {                                                   // ADC A,(w)
                self.ea = self.arg16()?;
                let v = self.read_mem(self.ea)?;
                self.adc_a(v);
            }

            0x90 => { self.ea_sp16()?; let v = self.read_mem(self.ea)?; self.sub_a(v); } // SUB A,(SP+w)
            0x91 => { self.ea_hx(); let v = self.read_mem(self.ea)?; self.sub_a(v); } // SUB A,(HL+IX)
            0x92 => { self.ea_hy(); let v = self.read_mem(self.ea)?; self.sub_a(v); } // SUB A,(HL+IY)
            0x93 => { self.ea_xy(); let v = self.read_mem(self.ea)?; self.sub_a(v); } // SUB A,(IX+IY)
            0x94 => self.sub_a(self.ixh()),                             // SUB HX
            0x95 => self.sub_a(self.ixl()),                             // SUB LX
            0x96 => { self.ea_x()?; let v = self.read_mem(self.ea)?; self.sub_a(v); } // SUB (IX+o)
            0x97 => {                                                   // SUB A,(w)
                self.ea = self.arg16()?;
                let v = self.read_mem(self.ea)?;
                self.sub_a(v);
            }

            0x98 => { self.ea_sp16()?; let v = self.read_mem(self.ea)?; self.sbc_a(v); } // SBC A,(SP+w)
            0x99 => { self.ea_hx(); let v = self.read_mem(self.ea)?; self.sbc_a(v); } // SBC A,(HL+IX)
            0x9a => { self.ea_hy(); let v = self.read_mem(self.ea)?; self.sbc_a(v); } // SBC A,(HL+IY)
            0x9b => { self.ea_xy(); let v = self.read_mem(self.ea)?; self.sbc_a(v); } // SBC A,(IX+IY)
            0x9c => self.sbc_a(self.ixh()),                             // SBC A,HX
            0x9d => self.sbc_a(self.ixl()),                             // SBC A,LX
            0x9e => { self.ea_x()?; let v = self.read_mem(self.ea)?; self.sbc_a(v); } // SBC A,(IX+o)
            0x9f => {                                                   // SBC A,(w)
                self.ea = self.arg16()?;
                let v = self.read_mem(self.ea)?;
                self.sbc_a(v);
            }

            0xa0 => { self.ea_sp16()?; let v = self.read_mem(self.ea)?; self.and_a(v); } // AND A,(SP+w)
            0xa1 => { self.ea_hx(); let v = self.read_mem(self.ea)?; self.and_a(v); } // AND A,(HL+IX)
            0xa2 => { self.ea_hy(); let v = self.read_mem(self.ea)?; self.and_a(v); } // AND A,(HL+IY)
            0xa3 => { self.ea_xy(); let v = self.read_mem(self.ea)?; self.and_a(v); } // AND A,(IX+IY)
            0xa4 => self.and_a(self.ixh()),                             // AND HX
            0xa5 => self.and_a(self.ixl()),                             // AND LX
            0xa6 => { self.ea_x()?; let v = self.read_mem(self.ea)?; self.and_a(v); } // AND (IX+o)
            0xa7 => {                                                   // AND A,(w)
                self.ea = self.arg16()?;
                let v = self.read_mem(self.ea)?;
                self.and_a(v);
            }

            0xa8 => { self.ea_sp16()?; let v = self.read_mem(self.ea)?; self.xor_a(v); } // XOR A,(SP+w)
            0xa9 => { self.ea_hx(); let v = self.read_mem(self.ea)?; self.xor_a(v); } // XOR A,(HL+IX)
            0xaa => { self.ea_hy(); let v = self.read_mem(self.ea)?; self.xor_a(v); } // XOR A,(HL+IY)
            0xab => { self.ea_xy(); let v = self.read_mem(self.ea)?; self.xor_a(v); } // XOR A,(IX+IY)
            0xac => self.xor_a(self.ixh()),                             // XOR HX
            0xad => self.xor_a(self.ixl()),                             // XOR LX
            0xae => { self.ea_x()?; let v = self.read_mem(self.ea)?; self.xor_a(v); } // XOR (IX+o)
            0xaf => {                                                   // XOR A,(w)
                self.ea = self.arg16()?;
                let v = self.read_mem(self.ea)?;
                self.xor_a(v);
            }

            0xb0 => { self.ea_sp16()?; let v = self.read_mem(self.ea)?; self.or_a(v); } // OR A,(SP+w)
            0xb1 => { self.ea_hx(); let v = self.read_mem(self.ea)?; self.or_a(v); } // OR A,(HL+IX)
            0xb2 => { self.ea_hy(); let v = self.read_mem(self.ea)?; self.or_a(v); } // OR A,(HL+IY)
            0xb3 => { self.ea_xy(); let v = self.read_mem(self.ea)?; self.or_a(v); } // OR A,(IX+IY)
            0xb4 => self.or_a(self.ixh()),                              // OR HX
            0xb5 => self.or_a(self.ixl()),                              // OR LX
            0xb6 => { self.ea_x()?; let v = self.read_mem(self.ea)?; self.or_a(v); } // OR (IX+o)
            0xb7 => {                                                   // OR A,(w)
                self.ea = self.arg16()?;
                let v = self.read_mem(self.ea)?;
                self.or_a(v);
            }

            0xb8 => { self.ea_sp16()?; let v = self.read_mem(self.ea)?; self.cp_a(v); } // CP A,(SP+w)
            0xb9 => { self.ea_hx(); let v = self.read_mem(self.ea)?; self.cp_a(v); } // CP A,(HL+IX)
            0xba => { self.ea_hy(); let v = self.read_mem(self.ea)?; self.cp_a(v); } // CP A,(HL+IY)
            0xbb => { self.ea_xy(); let v = self.read_mem(self.ea)?; self.cp_a(v); } // CP A,(IX+IY)
            0xbc => self.cp_a(self.ixh()),                              // CP HX
            0xbd => self.cp_a(self.ixl()),                              // CP LX
            0xbe => { self.ea_x()?; let v = self.read_mem(self.ea)?; self.cp_a(v); } // CP (IX+o)
            0xbf => {                                                   // CP A,(w)
                self.ea = self.arg16()?;
                let v = self.read_mem(self.ea)?;
                self.cp_a(v);
            }

            0xc1 => {                                                   // POP (HL)
                let v = self.read_mem16(self.sp())?;
                self.write_mem16(self.hl.w, v)?;
                self.add_sp(2);
            }
            0xc2 => { let cond = self.f() & ZF == 0; self.op_jp_hl_cond(cond); } // JP NZ,(HL)
            0xc4 => { let cond = self.f() & ZF == 0; self.op_call_hl_cond(cond, 0xc4)?; } // CALL NZ,(HL)
            0xc5 => {                                                   // PUSH (HL)
                let v = self.read_mem16(self.hl.w)?;
                let addr = self.sp().wrapping_sub(2);
                self.write_mem16(addr, v)?;
                self.add_sp(-2);
                if self.is_system() {
                    self.check_sso()?;
                }
            }

            0xca => { let cond = self.f() & ZF != 0; self.op_jp_hl_cond(cond); } // JP Z,(HL)
            0xcb => {                                                   // ** DD CB xx
                self.ea_x()?;
                let op2 = self.arg()?;
                let c = self.exec_xycb(op2)?;
                self.extra_cycles += c;
            }
            0xcc => { let cond = self.f() & ZF != 0; self.op_call_hl_cond(cond, 0xcc)?; } // CALL Z,(HL)
            0xcd => {                                                   // CALL (HL)
                self.push16(self.pc.w)?;
                self.pc.w = self.hl.w;
                if self.is_system() {
                    self.check_sso()?;
                }
            }

            0xd1 => {                                                   // POP (w)
                self.ea = self.arg16()?;
                let v = self.read_mem16(self.sp())?;
                self.write_mem16(self.ea, v)?;
                self.add_sp(2);
            }
            0xd2 => { let cond = self.f() & CF == 0; self.op_jp_hl_cond(cond); } // JP NC,(HL)
            0xd4 => { let cond = self.f() & CF == 0; self.op_call_hl_cond(cond, 0xd4)?; } // CALL NC,(HL)
            0xd5 => {                                                   // PUSH (w)
                self.ea = self.arg16()?;
                let v = self.read_mem16(self.ea)?;
                let addr = self.sp().wrapping_sub(2);
                self.write_mem16(addr, v)?;
                self.add_sp(-2);
                if self.is_system() {
                    self.check_sso()?;
                }
            }

            0xda => { let cond = self.f() & CF != 0; self.op_jp_hl_cond(cond); } // JP C,(HL)
            0xdc => { let cond = self.f() & CF != 0; self.op_call_hl_cond(cond, 0xdc)?; } // CALL C,(HL)

            0xe1 => self.ix.w = self.pop16()?,                          // POP IX
            0xe2 => { let cond = self.f() & PF == 0; self.op_jp_hl_cond(cond); } // JP PO,(HL)
            0xe3 => {                                                   // EX (SP),IX
                let tmp = self.read_mem16(self.sp())?;
                self.write_mem16(self.sp(), self.ix.w)?;
                self.ix.w = tmp;
            }
            0xe4 => { let cond = self.f() & PF == 0; self.op_call_hl_cond(cond, 0xe4)?; } // CALL PO,(HL)
            0xe5 => self.push16_checked(self.ix.w)?,                    // PUSH IX

            0xe9 => self.pc.w = self.ix.w,                              // JP (IX)
            0xea => { let cond = self.f() & PF != 0; self.op_jp_hl_cond(cond); } // JP PE,(HL)
            0xeb => std::mem::swap(&mut self.ix, &mut self.hl),         // EX IX,HL
            0xec => { let cond = self.f() & PF != 0; self.op_call_hl_cond(cond, 0xec)?; } // CALL PE,(HL)
            0xed => {                                                   // **** DD ED xx
                let op2 = self.fetch_op()?;
                let c = self.exec_dded(op2)?;
                self.extra_cycles += c;
            }

            0xf1 => {                                                   // POP (ra)
                self.ea_ra()?;
                let v = self.read_mem16(self.sp())?;
                self.write_mem16(self.ea, v)?;
                self.add_sp(2);
            }
            0xf2 => { let cond = self.f() & SF == 0; self.op_jp_hl_cond(cond); } // JP P,(HL)
            0xf4 => { let cond = self.f() & SF == 0; self.op_call_hl_cond(cond, 0xf4)?; } // CALL P,(HL)
            0xf5 => {                                                   // PUSH (ra)
                self.ea_ra()?;
                let v = self.read_mem16(self.ea)?;
                let addr = self.sp().wrapping_sub(2);
                self.write_mem16(addr, v)?;
                self.add_sp(-2);
                if self.is_system() {
                    self.check_sso()?;
                }
            }

            0xf9 => { let v = self.ix.w; self.set_sp(v); }              // LD SP,IX
            0xfa => { let cond = self.f() & SF != 0; self.op_jp_hl_cond(cond); } // JP M,(HL)
            0xfc => { let cond = self.f() & SF != 0; self.op_call_hl_cond(cond, 0xfc)?; } // CALL M,(HL)

            _ => {                                                      // DB DD
                self.illegal("dd", op);
                self.op_main(op)?;
            }
        }
        Ok(())
    }
}
