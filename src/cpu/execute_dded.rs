//! DDED dispatch table
//!
//! Z280 double-prefix extensions layered on IX: LDA/LD/EX through the
//! `(SP+w)` and register-sum modes, IN/OUT on memory operands, 16-bit
//! arithmetic on IX, LDUD/LDUP on `(IX+o)`, and the multiply/divide block
//! with its DD-flavored operand column. Slots marked as spill-throughs in
//! the hardware run the plain ED handler at this table's cost.

use super::tables;
use super::{Abort, Z280};

impl Z280 {
    pub(super) fn exec_dded(&mut self, op: u8) -> Result<u32, Abort> {
        self.dded_main(op)?;
        Ok(u32::from(tables::CC_DDED[op as usize]))
    }

    fn dded_main(&mut self, op: u8) -> Result<(), Abort> {
        match op {
            0x02 => { self.ea_sp16()?; self.ix.w = self.ea; }           // LDA IX,(SP+w)
            0x04 => { self.ea_sp16()?; self.ix.w = self.read_mem16(self.ea)?; } // LD IX,(SP+w)
            0x05 => { self.ea_sp16()?; self.write_mem16(self.ea, self.ix.w)?; } // LD (SP+w),IX
            0x06 => { self.ea_x()?; self.bc.w = self.read_mem16(self.ea)?; } // LD BC,(IX+o)
            0x07 => { self.ea_sp16()?; self.ex_a_mem()?; }              // EX A,(SP+w)

            0x0a => { self.ea_hx(); self.ix.w = self.ea; }              // LDA IX,(HL+IX)
            0x0c => { self.ea_hx(); self.ix.w = self.read_mem16(self.ea)?; } // LD IX,(HL+IX)
            0x0d => { self.ea_hx(); self.write_mem16(self.ea, self.ix.w)?; } // LD (HL+IX),IX
            0x0e => { self.ea_x()?; self.write_mem16(self.ea, self.bc.w)?; } // LD (IX+o),BC
            0x0f => { self.ea_hx(); self.ex_a_mem()?; }                 // EX A,(HL+IX)

            0x12 => { self.ea_hy(); self.ix.w = self.ea; }              // LDA IX,(HL+IY)
            0x14 => { self.ea_hy(); self.ix.w = self.read_mem16(self.ea)?; } // LD IX,(HL+IY)
            0x15 => { self.ea_hy(); self.write_mem16(self.ea, self.ix.w)?; } // LD (HL+IY),IX
            0x16 => { self.ea_x()?; self.de.w = self.read_mem16(self.ea)?; } // LD DE,(IX+o)
            0x17 => { self.ea_hy(); self.ex_a_mem()?; }                 // EX A,(HL+IY)

            0x1a => { self.ea_xy(); self.ix.w = self.ea; }              // LDA IX,(IX+IY)
            0x1c => { self.ea_xy(); self.ix.w = self.read_mem16(self.ea)?; } // LD IX,(IX+IY)
            0x1d => { self.ea_xy(); self.write_mem16(self.ea, self.ix.w)?; } // LD (IX+IY),IX
            0x1e => { self.ea_x()?; self.write_mem16(self.ea, self.de.w)?; } // LD (IX+o),DE
            0x1f => { self.ea_xy(); self.ex_a_mem()?; }                 // EX A,(IX+IY)

            0x22 => { self.ea_ra()?; self.ix.w = self.ea; }             // LDA IX,(ra)
            0x24 => { self.ea_ra()?; self.ix.w = self.read_mem16(self.ea)?; } // LD IX,(ra)
            0x25 => { self.ea_ra()?; self.write_mem16(self.ea, self.ix.w)?; } // LD (ra),IX
            0x26 => { self.ea_x()?; self.hl.w = self.read_mem16(self.ea)?; } // LD HL,(IX+o)
            0x27 => {                                                   // EX A,HX
                let a = self.a();
                let x = self.ixh();
                self.set_a(x);
                self.ix.set_hi(a);
            }

            0x2a => { self.ea_x16()?; self.ix.w = self.ea; }            // LDA IX,(IX+w)
            0x2c => { self.ea_x16()?; self.ix.w = self.read_mem16(self.ea)?; } // LD IX,(IX+w)
            0x2d => { self.ea_x16()?; self.write_mem16(self.ea, self.ix.w)?; } // LD (IX+w),IX
            0x2e => { self.ea_x()?; self.write_mem16(self.ea, self.hl.w)?; } // LD (IX+o),HL
            0x2f => {                                                   // EX A,LX
                let a = self.a();
                let x = self.ixl();
                self.set_a(x);
                self.ix.set_lo(a);
            }

            0x32 => { self.ea_y16()?; self.ix.w = self.ea; }            // LDA IX,(IY+w)
            0x34 => { self.ea_y16()?; self.ix.w = self.read_mem16(self.ea)?; } // LD IX,(IY+w)
            0x35 => { self.ea_y16()?; self.write_mem16(self.ea, self.ix.w)?; } // LD (IY+w),IX
            0x36 => {                                                   // LD SP,(IX+o)
                self.ea_x()?;
                let v = self.read_mem16(self.ea)?;
                self.set_sp(v);
            }
            0x37 => { self.ea_x()?; self.ex_a_mem()?; }                 // EX A,(IX+o)

            0x3a => { self.ea_h16()?; self.ix.w = self.ea; }            // LDA IX,(HL+w)
            0x3c => { self.ea_h16()?; self.ix.w = self.read_mem16(self.ea)?; } // LD IX,(HL+w)
            0x3d => { self.ea_h16()?; self.write_mem16(self.ea, self.ix.w)?; } // LD (HL+w),IX
            0x3e => {                                                   // LD (IX+o),SP
                let sp = self.sp();
                self.ea_x()?;
                self.write_mem16(self.ea, sp)?;
            }
            0x3f => { self.ea = self.arg16()?; self.ex_a_mem()?; }      // EX A,(w)

            0x40 => {                                                   // IN (SP+w),(C)
                if !self.trapped_priv_io()? {
                    self.ea_sp16()?;
                    self.in_to_mem()?;
                }
            }
            0x41 => {                                                   // OUT (C),(SP+w)
                if !self.trapped_priv_io()? {
                    self.ea_sp16()?;
                    self.out_from_mem()?;
                }
            }
            0x42 => self.ix.w = self.sbc16(self.ix.w, self.bc.w),       // SBC IX,BC

            0x48 => {                                                   // IN (HL+IX),(C)
                if !self.trapped_priv_io()? {
                    self.ea_hx();
                    self.in_to_mem()?;
                }
            }
            0x49 => {                                                   // OUT (C),(HL+IX)
                if !self.trapped_priv_io()? {
                    self.ea_hx();
                    self.out_from_mem()?;
                }
            }
            0x4a => self.ix.w = self.adc16(self.ix.w, self.bc.w),       // ADC IX,BC

            0x50 => {                                                   // IN (HL+IY),(C)
                if !self.trapped_priv_io()? {
                    self.ea_hy();
                    self.in_to_mem()?;
                }
            }
            0x51 => {                                                   // OUT (C),(HL+IY)
                if !self.trapped_priv_io()? {
                    self.ea_hy();
                    self.out_from_mem()?;
                }
            }
            0x52 => self.ix.w = self.sbc16(self.ix.w, self.de.w),       // SBC IX,DE

            0x58 => {                                                   // IN (IX+IY),(C)
                if !self.trapped_priv_io()? {
                    self.ea_xy();
                    self.in_to_mem()?;
                }
            }
            0x59 => {                                                   // OUT (C),(IX+IY)
                if !self.trapped_priv_io()? {
                    self.ea_xy();
                    self.out_from_mem()?;
                }
            }
            0x5a => self.ix.w = self.adc16(self.ix.w, self.de.w),       // ADC IX,DE

            0x60 => {                                                   // IN HX,(C)
                if !self.trapped_priv_io()? {
                    let v = self.in_byte(self.bc.w);
                    self.ix.set_hi(v);
                    self.szp_flags(v);
                }
            }
            0x61 => {                                                   // OUT (C),HX
                if !self.trapped_priv_io()? {
                    let v = self.ixh();
                    self.out_byte(self.bc.w, v);
                }
            }
            0x62 => self.ix.w = self.sbc16(self.ix.w, self.ix.w),       // SBC IX,IX
            0x66 => {                                                   // LDCTL IX,(C)
                if let Some(v) = self.op_ldctl_from()? {
                    self.ix.w = v;
                }
            }

            0x68 => {                                                   // IN LX,(C)
                if !self.trapped_priv_io()? {
                    let v = self.in_byte(self.bc.w);
                    self.ix.set_lo(v);
                    self.szp_flags(v);
                }
            }
            0x69 => {                                                   // OUT (C),LX
                if !self.trapped_priv_io()? {
                    let v = self.ixl();
                    self.out_byte(self.bc.w, v);
                }
            }
            0x6a => self.ix.w = self.adc16(self.ix.w, self.ix.w),       // ADC IX,IX
            0x6d => self.ix.w = self.add16_a(self.ix.w),                // ADD IX,A
            0x6e => self.op_ldctl_to(self.ix.w)?,                       // LDCTL (C),IX

            0x72 => { let sp = self.sp(); self.ix.w = self.sbc16(self.ix.w, sp); } // SBC IX,SP
            0x78 => {                                                   // IN (w),(C)
                if !self.trapped_priv_io()? {
                    self.ea = self.arg16()?;
                    self.in_to_mem()?;
                }
            }
            0x79 => {                                                   // OUT (C),(w)
                if !self.trapped_priv_io()? {
                    self.ea = self.arg16()?;
                    self.out_from_mem()?;
                }
            }
            0x7a => { let sp = self.sp(); self.ix.w = self.adc16(self.ix.w, sp); } // ADC IX,SP

            0x86 => { self.ea_x()?; self.op_ldu_a_from_mem(false)?; }   // LDUD A,(IX+o)
            0x87 => self.ix.w = self.usp,                               // LDCTL IX,USP
            0x8e => { self.ea_x()?; self.op_ldu_mem_from_a(false)?; }   // LDUD (IX+o),A
            0x8f => self.usp = self.ix.w,                               // LDCTL USP,IX
            0x96 => { self.ea_x()?; self.op_ldu_a_from_mem(true)?; }    // LDUP A,(IX+o)
            0x9e => { self.ea_x()?; self.op_ldu_mem_from_a(true)?; }    // LDUP (IX+o),A

            0xc0 => { self.ea_sp16()?; let v = self.read_mem(self.ea)?; self.op_mult(v); } // MULT A,(SP+w)
            0xc1 => { self.ea_sp16()?; let v = self.read_mem(self.ea)?; self.op_multu(v); } // MULTU A,(SP+w)
            0xc2 => { let v = self.read_mem16(self.hl.w)?; self.op_multw(v); } // MULTW HL,(HL)
            0xc3 => { let v = self.read_mem16(self.hl.w)?; self.op_multuw(v); } // MULTUW HL,(HL)
            0xc4 => { self.ea_sp16()?; let v = self.read_mem(self.ea)?; self.op_div(v)?; } // DIV HL,(SP+w)
            0xc5 => { self.ea_sp16()?; let v = self.read_mem(self.ea)?; self.op_divu(v)?; } // DIVU HL,(SP+w)
            0xc6 => { let v = self.read_mem16(self.hl.w)?; self.op_addw(v); } // ADDW HL,(HL)
            0xc7 => { let v = self.read_mem16(self.hl.w)?; self.op_cpw(v); } // CPW HL,(HL)

            0xc8 => { self.ea_hx(); let v = self.read_mem(self.ea)?; self.op_mult(v); } // MULT A,(HL+IX)
            0xc9 => { self.ea_hx(); let v = self.read_mem(self.ea)?; self.op_multu(v); } // MULTU A,(HL+IX)
            0xca => { let v = self.read_mem16(self.hl.w)?; self.op_divw(v)?; } // DIVW DEHL,(HL)
            0xcb => { let v = self.read_mem16(self.hl.w)?; self.op_divuw(v)?; } // DIVUW DEHL,(HL)
            0xcc => { self.ea_hx(); let v = self.read_mem(self.ea)?; self.op_div(v)?; } // DIV HL,(HL+IX)
            0xcd => { self.ea_hx(); let v = self.read_mem(self.ea)?; self.op_divu(v)?; } // DIVU HL,(HL+IX)
            0xce => { let v = self.read_mem16(self.hl.w)?; self.op_subw(v); } // SUBW HL,(HL)

            0xd0 => { self.ea_hy(); let v = self.read_mem(self.ea)?; self.op_mult(v); } // MULT A,(HL+IY)
            0xd1 => { self.ea_hy(); let v = self.read_mem(self.ea)?; self.op_multu(v); } // MULTU A,(HL+IY)
            0xd2 => {                                                   // MULTW HL,(w)
                self.ea = self.arg16()?;
                let v = self.read_mem16(self.ea)?;
                self.op_multw(v);
            }
            0xd3 => {                                                   // MULTUW HL,(w)
                self.ea = self.arg16()?;
                let v = self.read_mem16(self.ea)?;
                self.op_multuw(v);
            }
            0xd4 => { self.ea_hy(); let v = self.read_mem(self.ea)?; self.op_div(v)?; } // DIV HL,(HL+IY)
            0xd5 => { self.ea_hy(); let v = self.read_mem(self.ea)?; self.op_divu(v)?; } // DIVU HL,(HL+IY)
            0xd6 => {                                                   // ADDW HL,(w)
                self.ea = self.arg16()?;
                let v = self.read_mem16(self.ea)?;
                self.op_addw(v);
            }
            0xd7 => {                                                   // CPW HL,(w)
                self.ea = self.arg16()?;
                let v = self.read_mem16(self.ea)?;
                self.op_cpw(v);
            }

            0xd8 => { self.ea_xy(); let v = self.read_mem(self.ea)?; self.op_mult(v); } // MULT A,(IX+IY)
            0xd9 => { self.ea_xy(); let v = self.read_mem(self.ea)?; self.op_multu(v); } // MULTU A,(IX+IY)
            0xda => {                                                   // DIVW DEHL,(w)
                self.ea = self.arg16()?;
                let v = self.read_mem16(self.ea)?;
                self.op_divw(v)?;
            }
            0xdb => {                                                   // DIVUW DEHL,(w)
                self.ea = self.arg16()?;
                let v = self.read_mem16(self.ea)?;
                self.op_divuw(v)?;
            }
            0xdc => { self.ea_xy(); let v = self.read_mem(self.ea)?; self.op_div(v)?; } // DIV HL,(IX+IY)
            0xdd => { self.ea_xy(); let v = self.read_mem(self.ea)?; self.op_divu(v)?; } // DIVU HL,(IX+IY)
            0xde => {                                                   // SUBW HL,(w)
                self.ea = self.arg16()?;
                let v = self.read_mem16(self.ea)?;
                self.op_subw(v);
            }

            0xe0 => self.op_mult(self.ixh()),                           // MULT A,HX
            0xe1 => self.op_multu(self.ixh()),                          // MULTU A,HX
            0xe2 => self.op_multw(self.ix.w),                           // MULTW HL,IX
            0xe3 => self.op_multuw(self.ix.w),                          // MULTUW HL,IX
            0xe4 => { let v = self.ixh(); self.op_div(v)?; }            // DIV HL,HX
            0xe5 => { let v = self.ixh(); self.op_divu(v)?; }           // DIVU HL,HX
            0xe6 => self.op_addw(self.ix.w),                            // ADDW HL,IX
            0xe7 => self.op_cpw(self.ix.w),                             // CPW HL,IX

            0xe8 => self.op_mult(self.ixl()),                           // MULT A,LX
            0xe9 => self.op_multu(self.ixl()),                          // MULTU A,LX
            0xea => { let v = self.ix.w; self.op_divw(v)?; }            // DIVW DEHL,IX
            0xeb => { let v = self.ix.w; self.op_divuw(v)?; }           // DIVUW DEHL,IX
            0xec => { let v = self.ixl(); self.op_div(v)?; }            // DIV HL,LX
            0xed => { let v = self.ixl(); self.op_divu(v)?; }           // DIVU HL,LX
            0xee => self.op_subw(self.ix.w),                            // SUBW HL,IX

            0xf0 => { self.ea_x()?; let v = self.read_mem(self.ea)?; self.op_mult(v); } // MULT A,(IX+o)
            0xf1 => { self.ea_x()?; let v = self.read_mem(self.ea)?; self.op_multu(v); } // MULTU A,(IX+o)
            0xf2 => { self.ea_ra()?; let v = self.read_mem16(self.ea)?; self.op_multw(v); } // MULTW HL,(ra)
            0xf3 => { self.ea_ra()?; let v = self.read_mem16(self.ea)?; self.op_multuw(v); } // MULTUW HL,(ra)
            0xf4 => { self.ea_x()?; let v = self.read_mem(self.ea)?; self.op_div(v)?; } // DIV HL,(IX+o)
            0xf5 => { self.ea_x()?; let v = self.read_mem(self.ea)?; self.op_divu(v)?; } // DIVU HL,(IX+o)
            0xf6 => { self.ea_ra()?; let v = self.read_mem16(self.ea)?; self.op_addw(v); } // ADDW HL,(ra)
            0xf7 => { self.ea_ra()?; let v = self.read_mem16(self.ea)?; self.op_cpw(v); } // CPW HL,(ra)

            0xf8 => {                                                   // MULT A,(w)
                self.ea = self.arg16()?;
                let v = self.read_mem(self.ea)?;
                self.op_mult(v);
            }
            0xf9 => {                                                   // MULTU A,(w)
                self.ea = self.arg16()?;
                let v = self.read_mem(self.ea)?;
                self.op_multu(v);
            }
            0xfa => { self.ea_ra()?; let v = self.read_mem16(self.ea)?; self.op_divw(v)?; } // DIVW DEHL,(ra)
            0xfb => { self.ea_ra()?; let v = self.read_mem16(self.ea)?; self.op_divuw(v)?; } // DIVUW DEHL,(ra)
            0xfc => {                                                   // DIV HL,(w)
                self.ea = self.arg16()?;
                let v = self.read_mem(self.ea)?;
                self.op_div(v)?;
            }
            0xfd => {                                                   // DIVU HL,(w)
                self.ea = self.arg16()?;
                let v = self.read_mem(self.ea)?;
                self.op_divu(v)?;
            }
            0xfe => { self.ea_ra()?; let v = self.read_mem16(self.ea)?; self.op_subw(v); } // SUBW HL,(ra)

            // Spill-through slots: the plain ED behavior at this table's
            // cost.
            0x03 | 0x0b | 0x13 | 0x1b | 0x23 | 0x2b | 0x33 | 0x3b | 0x43 | 0x44 | 0x45
            | 0x46 | 0x47 | 0x4b | 0x4c | 0x4d | 0x4e | 0x4f | 0x53 | 0x55 | 0x56 | 0x57
            | 0x5b | 0x5e | 0x5f | 0x64 | 0x65 | 0x67 | 0x6c | 0x6f | 0x70 | 0x71 | 0x73
            | 0x77 | 0x7b | 0x7f | 0x82 | 0x83 | 0x84 | 0x85 | 0x8a | 0x8b | 0x8c | 0x8d
            | 0x92 | 0x93 | 0x94 | 0x95 | 0x97 | 0x9a | 0x9b | 0x9c | 0x9d | 0x9f | 0xa0
            | 0xa1 | 0xa2 | 0xa3 | 0xa4 | 0xa5 | 0xa6 | 0xa7 | 0xa8 | 0xa9 | 0xaa | 0xab
            | 0xac | 0xad | 0xae | 0xaf | 0xb0 | 0xb1 | 0xb2 | 0xb3 | 0xb4 | 0xb5 | 0xb7
            | 0xb8 | 0xb9 | 0xba | 0xbb | 0xbc | 0xbd | 0xbf | 0xef => {
                self.illegal("dded", op);
                self.ed_main(op)?;
            }

            _ => self.illegal("dded", op),                              // DB ED
        }
        Ok(())
    }

    /// EX A,(ea)
    pub(super) fn ex_a_mem(&mut self) -> Result<(), Abort> {
        let a = self.a();
        let m = self.read_mem(self.ea)?;
        self.set_a(m);
        self.write_mem(self.ea, a)?;
        Ok(())
    }

    /// IN (ea),(C) - flags as the IN r,(C) family.
    pub(super) fn in_to_mem(&mut self) -> Result<(), Abort> {
        let v = self.in_byte(self.bc.w);
        self.write_mem(self.ea, v)?;
        self.szp_flags(v);
        Ok(())
    }

    /// OUT (C),(ea)
    pub(super) fn out_from_mem(&mut self) -> Result<(), Abort> {
        let v = self.read_mem(self.ea)?;
        self.out_byte(self.bc.w, v);
        Ok(())
    }
}
