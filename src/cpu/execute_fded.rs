//! FDED dispatch table
//!
//! The IY mirror of the DDED extensions, with the FD flavor of the operand
//! column: `(ra)`, `(IX+w)`, `(IY+w)`, `(HL+w)` for memory operands and
//! immediates for the multiply/divide tail. Spill-through slots run the
//! plain ED handler at this table's cost.

use super::tables;
use super::{Abort, Z280};

impl Z280 {
    pub(super) fn exec_fded(&mut self, op: u8) -> Result<u32, Abort> {
        self.fded_main(op)?;
        Ok(u32::from(tables::CC_FDED[op as usize]))
    }

    fn fded_main(&mut self, op: u8) -> Result<(), Abort> {
        match op {
            0x02 => { self.ea_sp16()?; self.iy.w = self.ea; }           // LDA IY,(SP+w)
            0x04 => { self.ea_sp16()?; self.iy.w = self.read_mem16(self.ea)?; } // LD IY,(SP+w)
            0x05 => { self.ea_sp16()?; self.write_mem16(self.ea, self.iy.w)?; } // LD (SP+w),IY
            0x06 => { self.ea_y()?; self.bc.w = self.read_mem16(self.ea)?; } // LD BC,(IY+o)
            0x07 => { self.ea_ra()?; self.ex_a_mem()?; }                // EX A,(ra)

            0x0a => { self.ea_hx(); self.iy.w = self.ea; }              // LDA IY,(HL+IX)
            0x0c => { self.ea_hx(); self.iy.w = self.read_mem16(self.ea)?; } // LD IY,(HL+IX)
            0x0d => { self.ea_hx(); self.write_mem16(self.ea, self.iy.w)?; } // LD (HL+IX),IY
            0x0e => { self.ea_y()?; self.write_mem16(self.ea, self.bc.w)?; } // LD (IY+o),BC
            0x0f => { self.ea_x16()?; self.ex_a_mem()?; }               // EX A,(IX+w)

            0x12 => { self.ea_hy(); self.iy.w = self.ea; }              // LDA IY,(HL+IY)
            0x14 => { self.ea_hy(); self.iy.w = self.read_mem16(self.ea)?; } // LD IY,(HL+IY)
            0x15 => { self.ea_hy(); self.write_mem16(self.ea, self.iy.w)?; } // LD (HL+IY),IY
            0x16 => { self.ea_y()?; self.de.w = self.read_mem16(self.ea)?; } // LD DE,(IY+o)
            0x17 => { self.ea_y16()?; self.ex_a_mem()?; }               // EX A,(IY+w)

            0x1a => { self.ea_xy(); self.iy.w = self.ea; }              // LDA IY,(IX+IY)
            0x1c => { self.ea_xy(); self.iy.w = self.read_mem16(self.ea)?; } // LD IY,(IX+IY)
            0x1d => { self.ea_xy(); self.write_mem16(self.ea, self.iy.w)?; } // LD (IX+IY),IY
            0x1e => { self.ea_y()?; self.write_mem16(self.ea, self.de.w)?; } // LD (IY+o),DE
            0x1f => { self.ea_h16()?; self.ex_a_mem()?; }               // EX A,(HL+w)

            0x22 => { self.ea_ra()?; self.iy.w = self.ea; }             // LDA IY,(ra)
            0x24 => { self.ea_ra()?; self.iy.w = self.read_mem16(self.ea)?; } // LD IY,(ra)
            0x25 => { self.ea_ra()?; self.write_mem16(self.ea, self.iy.w)?; } // LD (ra),IY
            0x26 => { self.ea_y()?; self.hl.w = self.read_mem16(self.ea)?; } // LD HL,(IY+o)
            0x27 => {                                                   // EX A,HY
                let a = self.a();
                let y = self.iyh();
                self.set_a(y);
                self.iy.set_hi(a);
            }

            0x2a => { self.ea_x16()?; self.iy.w = self.ea; }            // LDA IY,(IX+w)
            0x2c => { self.ea_x16()?; self.iy.w = self.read_mem16(self.ea)?; } // LD IY,(IX+w)
            0x2d => { self.ea_x16()?; self.write_mem16(self.ea, self.iy.w)?; } // LD (IX+w),IY
            0x2e => { self.ea_y()?; self.write_mem16(self.ea, self.hl.w)?; } // LD (IY+o),HL
            0x2f => {                                                   // EX A,LY
                let a = self.a();
                let y = self.iyl();
                self.set_a(y);
                self.iy.set_lo(a);
            }

            0x32 => { self.ea_y16()?; self.iy.w = self.ea; }            // LDA IY,(IY+w)
            0x34 => { self.ea_y16()?; self.iy.w = self.read_mem16(self.ea)?; } // LD IY,(IY+w)
            0x35 => { self.ea_y16()?; self.write_mem16(self.ea, self.iy.w)?; } // LD (IY+w),IY
            0x36 => {                                                   // LD SP,(IY+o)
                self.ea_y()?;
                let v = self.read_mem16(self.ea)?;
                self.set_sp(v);
            }
            0x37 => { self.ea_y()?; self.ex_a_mem()?; }                 // EX A,(IY+o)

            0x3a => { self.ea_h16()?; self.iy.w = self.ea; }            // LDA IY,(HL+w)
            0x3c => { self.ea_h16()?; self.iy.w = self.read_mem16(self.ea)?; } // LD IY,(HL+w)
            0x3d => { self.ea_h16()?; self.write_mem16(self.ea, self.iy.w)?; } // LD (HL+w),IY
            0x3e => {                                                   // LD (IY+o),SP
                let sp = self.sp();
                self.ea_y()?;
                self.write_mem16(self.ea, sp)?;
            }

            0x40 => {                                                   // IN (ra),(C)
                if !self.trapped_priv_io()? {
                    self.ea_ra()?;
                    self.in_to_mem()?;
                }
            }
            0x41 => {                                                   // OUT (C),(ra)
                if !self.trapped_priv_io()? {
                    self.ea_ra()?;
                    self.out_from_mem()?;
                }
            }
            0x42 => self.iy.w = self.sbc16(self.iy.w, self.bc.w),       // SBC IY,BC

            0x48 => {                                                   // IN (IX+w),(C)
                if !self.trapped_priv_io()? {
                    self.ea_x16()?;
                    self.in_to_mem()?;
                }
            }
            0x49 => {                                                   // OUT (C),(IX+w)
                if !self.trapped_priv_io()? {
                    self.ea_x16()?;
                    self.out_from_mem()?;
                }
            }
            0x4a => self.iy.w = self.adc16(self.iy.w, self.bc.w),       // ADC IY,BC

            0x50 => {                                                   // IN (IY+w),(C)
                if !self.trapped_priv_io()? {
                    self.ea_y16()?;
                    self.in_to_mem()?;
                }
            }
            0x51 => {                                                   // OUT (C),(IY+w)
                if !self.trapped_priv_io()? {
                    self.ea_y16()?;
                    self.out_from_mem()?;
                }
            }
            0x52 => self.iy.w = self.sbc16(self.iy.w, self.de.w),       // SBC IY,DE

            0x58 => {                                                   // IN (HL+w),(C)
                if !self.trapped_priv_io()? {
                    self.ea_h16()?;
                    self.in_to_mem()?;
                }
            }
            0x59 => {                                                   // OUT (C),(HL+w)
                if !self.trapped_priv_io()? {
                    self.ea_h16()?;
                    self.out_from_mem()?;
                }
            }
            0x5a => self.iy.w = self.adc16(self.iy.w, self.de.w),       // ADC IY,DE

            0x60 => {                                                   // IN HY,(C)
                if !self.trapped_priv_io()? {
                    let v = self.in_byte(self.bc.w);
                    self.iy.set_hi(v);
                    self.szp_flags(v);
                }
            }
            0x61 => {                                                   // OUT (C),HY
                if !self.trapped_priv_io()? {
                    let v = self.iyh();
                    self.out_byte(self.bc.w, v);
                }
            }
            0x62 => self.iy.w = self.sbc16(self.iy.w, self.iy.w),       // SBC IY,IY
            0x66 => {                                                   // LDCTL IY,(C)
                if let Some(v) = self.op_ldctl_from()? {
                    self.iy.w = v;
                }
            }

            0x68 => {                                                   // IN LY,(C)
                if !self.trapped_priv_io()? {
                    let v = self.in_byte(self.bc.w);
                    self.iy.set_lo(v);
                    self.szp_flags(v);
                }
            }
            0x69 => {                                                   // OUT (C),LY
                if !self.trapped_priv_io()? {
                    let v = self.iyl();
                    self.out_byte(self.bc.w, v);
                }
            }
            0x6a => self.iy.w = self.adc16(self.iy.w, self.iy.w),       // ADC IY,IY
            0x6d => self.iy.w = self.add16_a(self.iy.w),                // ADD IY,A
            0x6e => self.op_ldctl_to(self.iy.w)?,                       // LDCTL (C),IY

            0x72 => { let sp = self.sp(); self.iy.w = self.sbc16(self.iy.w, sp); } // SBC IY,SP
            0x7a => { let sp = self.sp(); self.iy.w = self.adc16(self.iy.w, sp); } // ADC IY,SP

            0x86 => { self.ea_y()?; self.op_ldu_a_from_mem(false)?; }   // LDUD A,(IY+o)
            0x87 => self.iy.w = self.usp,                               // LDCTL IY,USP
            0x8e => { self.ea_y()?; self.op_ldu_mem_from_a(false)?; }   // LDUD (IY+o),A
            0x8f => self.usp = self.iy.w,                               // LDCTL USP,IY
            0x96 => { self.ea_y()?; self.op_ldu_a_from_mem(true)?; }    // LDUP A,(IY+o)
            0x9e => { self.ea_y()?; self.op_ldu_mem_from_a(true)?; }    // LDUP (IY+o),A

            0xc0 => { self.ea_ra()?; let v = self.read_mem(self.ea)?; self.op_mult(v); } // MULT A,(ra)
            0xc1 => { self.ea_ra()?; let v = self.read_mem(self.ea)?; self.op_multu(v); } // MULTU A,(ra)
            0xc2 => { self.ea_x16()?; let v = self.read_mem16(self.ea)?; self.op_multw(v); } // MULTW HL,(IX+w)
            0xc3 => { self.ea_x16()?; let v = self.read_mem16(self.ea)?; self.op_multuw(v); } // MULTUW HL,(IX+w)
            0xc4 => { self.ea_ra()?; let v = self.read_mem(self.ea)?; self.op_div(v)?; } // DIV HL,(ra)
            0xc5 => { self.ea_ra()?; let v = self.read_mem(self.ea)?; self.op_divu(v)?; } // DIVU HL,(ra)
            0xc6 => { self.ea_x16()?; let v = self.read_mem16(self.ea)?; self.op_addw(v); } // ADDW HL,(IX+w)
            0xc7 => { self.ea_x16()?; let v = self.read_mem16(self.ea)?; self.op_cpw(v); } // CPW HL,(IX+w)

            0xc8 => { self.ea_x16()?; let v = self.read_mem(self.ea)?; self.op_mult(v); } // MULT A,(IX+w)
            0xc9 => { self.ea_x16()?; let v = self.read_mem(self.ea)?; self.op_multu(v); } // MULTU A,(IX+w)
            0xca => { self.ea_x16()?; let v = self.read_mem16(self.ea)?; self.op_divw(v)?; } // DIVW DEHL,(IX+w)
            0xcb => { self.ea_x16()?; let v = self.read_mem16(self.ea)?; self.op_divuw(v)?; } // DIVUW DEHL,(IX+w)
            0xcc => { self.ea_x16()?; let v = self.read_mem(self.ea)?; self.op_div(v)?; } // DIV HL,(IX+w)
            0xcd => { self.ea_x16()?; let v = self.read_mem(self.ea)?; self.op_divu(v)?; } // DIVU HL,(IX+w)
            0xce => { self.ea_x16()?; let v = self.read_mem16(self.ea)?; self.op_subw(v); } // SUBW HL,(IX+w)

            0xd0 => { self.ea_y16()?; let v = self.read_mem(self.ea)?; self.op_mult(v); } // MULT A,(IY+w)
            0xd1 => { self.ea_y16()?; let v = self.read_mem(self.ea)?; self.op_multu(v); } // MULTU A,(IY+w)
            0xd2 => { self.ea_y16()?; let v = self.read_mem16(self.ea)?; self.op_multw(v); } // MULTW HL,(IY+w)
            0xd3 => { self.ea_y16()?; let v = self.read_mem16(self.ea)?; self.op_multuw(v); } // MULTUW HL,(IY+w)
            0xd4 => { self.ea_y16()?; let v = self.read_mem(self.ea)?; self.op_div(v)?; } // DIV HL,(IY+w)
            0xd5 => { self.ea_y16()?; let v = self.read_mem(self.ea)?; self.op_divu(v)?; } // DIVU HL,(IY+w)
            0xd6 => { self.ea_y16()?; let v = self.read_mem16(self.ea)?; self.op_addw(v); } // ADDW HL,(IY+w)
            0xd7 => { self.ea_y16()?; let v = self.read_mem16(self.ea)?; self.op_cpw(v); } // CPW HL,(IY+w)

            0xd8 => { self.ea_h16()?; let v = self.read_mem(self.ea)?; self.op_mult(v); } // MULT A,(HL+w)
            0xd9 => { self.ea_h16()?; let v = self.read_mem(self.ea)?; self.op_multu(v); } // MULTU A,(HL+w)
            0xda => { self.ea_y16()?; let v = self.read_mem16(self.ea)?; self.op_divw(v)?; } // DIVW DEHL,(IY+w)
            0xdb => { self.ea_y16()?; let v = self.read_mem16(self.ea)?; self.op_divuw(v)?; } // DIVUW DEHL,(IY+w)
            0xdc => { self.ea_h16()?; let v = self.read_mem(self.ea)?; self.op_div(v)?; } // DIV HL,(HL+w)
            0xdd => { self.ea_h16()?; let v = self.read_mem(self.ea)?; self.op_divu(v)?; } // DIVU HL,(HL+w)
            0xde => { self.ea_y16()?; let v = self.read_mem16(self.ea)?; self.op_subw(v); } // SUBW HL,(IY+w)

            0xe0 => self.op_mult(self.iyh()),                           // MULT A,HY
            0xe1 => self.op_multu(self.iyh()),                          // MULTU A,HY
            0xe2 => self.op_multw(self.iy.w),                           // MULTW HL,IY
            0xe3 => self.op_multuw(self.iy.w),                          // MULTUW HL,IY
            0xe4 => { let v = self.iyh(); self.op_div(v)?; }            // DIV HL,HY
            0xe5 => { let v = self.iyh(); self.op_divu(v)?; }           // DIVU HL,HY
            0xe6 => self.op_addw(self.iy.w),                            // ADDW HL,IY
            0xe7 => self.op_cpw(self.iy.w),                             // CPW HL,IY

            0xe8 => self.op_mult(self.iyl()),                           // MULT A,LY
            0xe9 => self.op_multu(self.iyl()),                          // MULTU A,LY
            0xea => { let v = self.iy.w; self.op_divw(v)?; }            // DIVW DEHL,IY
            0xeb => { let v = self.iy.w; self.op_divuw(v)?; }           // DIVUW DEHL,IY
            0xec => { let v = self.iyl(); self.op_div(v)?; }            // DIV HL,LY
            0xed => { let v = self.iyl(); self.op_divu(v)?; }           // DIVU HL,LY
            0xee => self.op_subw(self.iy.w),                            // SUBW HL,IY

            0xf0 => { self.ea_y()?; let v = self.read_mem(self.ea)?; self.op_mult(v); } // MULT A,(IY+o)
            0xf1 => { self.ea_y()?; let v = self.read_mem(self.ea)?; self.op_multu(v); } // MULTU A,(IY+o)
            0xf2 => { let v = self.arg16()?; self.op_multw(v); }        // MULTW HL,w
            0xf3 => { let v = self.arg16()?; self.op_multuw(v); }       // MULTUW HL,w
            0xf4 => { self.ea_y()?; let v = self.read_mem(self.ea)?; self.op_div(v)?; } // DIV HL,(IY+o)
            0xf5 => { self.ea_y()?; let v = self.read_mem(self.ea)?; self.op_divu(v)?; } // DIVU HL,(IY+o)
            0xf6 => { let v = self.arg16()?; self.op_addw(v); }         // ADDW HL,w
            0xf7 => { let v = self.arg16()?; self.op_cpw(v); }          // CPW HL,w

            0xf8 => { let v = self.arg()?; self.op_mult(v); }           // MULT A,n
            0xf9 => { let v = self.arg()?; self.op_multu(v); }          // MULTU A,n
            0xfa => { let v = self.arg16()?; self.op_divw(v)?; }        // DIVW DEHL,w
            0xfb => { let v = self.arg16()?; self.op_divuw(v)?; }       // DIVUW DEHL,w
            0xfc => { let v = self.arg()?; self.op_div(v)?; }           // DIV HL,n
            0xfd => { let v = self.arg()?; self.op_divu(v)?; }          // DIVU HL,n
            0xfe => { let v = self.arg16()?; self.op_subw(v); }         // SUBW HL,w

            // Spill-through slots: the plain ED behavior at this table's
            // cost.
            0x03 | 0x0b | 0x13 | 0x1b | 0x23 | 0x2b | 0x33 | 0x3b | 0x43 | 0x44 | 0x45
            | 0x46 | 0x47 | 0x4b | 0x4c | 0x4d | 0x4e | 0x4f | 0x53 | 0x55 | 0x56 | 0x57
            | 0x5b | 0x5e | 0x5f | 0x64 | 0x65 | 0x67 | 0x6c | 0x6f | 0x70 | 0x71 | 0x73
            | 0x77 | 0x78 | 0x79 | 0x7b | 0x7f | 0x82 | 0x83 | 0x84 | 0x85 | 0x8a | 0x8b
            | 0x8c | 0x8d | 0x92 | 0x93 | 0x94 | 0x95 | 0x97 | 0x9a | 0x9b | 0x9c | 0x9d
            | 0x9f | 0xa0 | 0xa1 | 0xa2 | 0xa3 | 0xa4 | 0xa5 | 0xa6 | 0xa7 | 0xa8 | 0xa9
            | 0xaa | 0xab | 0xac | 0xad | 0xae | 0xaf | 0xb0 | 0xb1 | 0xb2 | 0xb3 | 0xb4
            | 0xb5 | 0xb7 | 0xb8 | 0xb9 | 0xba | 0xbb | 0xbc | 0xbd | 0xbf | 0xef => {
                self.illegal("fded", op);
                self.ed_main(op)?;
            }

            _ => self.illegal("fded", op),                              // DB ED
        }
        Ok(())
    }
}
