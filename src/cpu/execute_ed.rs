//! ED dispatch table
//!
//! Z80 extended opcodes plus the bulk of the Z280 extensions: the extra
//! addressing modes for LDA/LD, multiply/divide, 16-bit ADDW/SUBW/CPW,
//! LDCTL, LDUD/LDUP, word block I/O and the EPU escapes (which trap - no
//! co-processor is modelled).

use super::tables;
use super::{Abort, Trap, Z280};

impl Z280 {
    pub(super) fn exec_ed(&mut self, op: u8) -> Result<u32, Abort> {
        self.ed_main(op)?;
        Ok(u32::from(tables::CC_ED[op as usize]))
    }

    pub(super) fn ed_main(&mut self, op: u8) -> Result<(), Abort> {
        match op {
            0x02 => { self.ea_sp16()?; self.hl.w = self.ea; }           // LDA HL,(SP+w)
            0x03 => { self.ea_sp16()?; self.write_mem(self.ea, self.a())?; } // LD (SP+w),A
            0x04 => { self.ea_sp16()?; self.hl.w = self.read_mem16(self.ea)?; } // LD HL,(SP+w)
            0x05 => { self.ea_sp16()?; self.write_mem16(self.ea, self.hl.w)?; } // LD (SP+w),HL
            0x06 => self.bc.w = self.read_mem16(self.hl.w)?,            // LD BC,(HL)
            0x07 => {                                                   // EX A,B
                let a = self.a();
                let b = self.b();
                self.set_a(b);
                self.set_b(a);
            }

            0x0a => { self.ea_hx(); self.hl.w = self.ea; }              // LDA HL,(HL+IX)
            0x0b => { self.ea_hx(); self.write_mem(self.ea, self.a())?; } // LD (HL+IX),A
            0x0c => { self.ea_hx(); self.hl.w = self.read_mem16(self.ea)?; } // LD HL,(HL+IX)
            0x0d => { self.ea_hx(); self.write_mem16(self.ea, self.hl.w)?; } // LD (HL+IX),HL
            0x0e => self.write_mem16(self.hl.w, self.bc.w)?,            // LD (HL),BC
            0x0f => {                                                   // EX A,C
                let a = self.a();
                let c = self.c();
                self.set_a(c);
                self.set_c(a);
            }

            0x12 => { self.ea_hy(); self.hl.w = self.ea; }              // LDA HL,(HL+IY)
            0x13 => { self.ea_hy(); self.write_mem(self.ea, self.a())?; } // LD (HL+IY),A
            0x14 => { self.ea_hy(); self.hl.w = self.read_mem16(self.ea)?; } // LD HL,(HL+IY)
            0x15 => { self.ea_hy(); self.write_mem16(self.ea, self.hl.w)?; } // LD (HL+IY),HL
            0x16 => self.de.w = self.read_mem16(self.hl.w)?,            // LD DE,(HL)
            0x17 => {                                                   // EX A,D
                let a = self.a();
                let d = self.d();
                self.set_a(d);
                self.set_d(a);
            }

            0x1a => { self.ea_xy(); self.hl.w = self.ea; }              // LDA HL,(IX+IY)
            0x1b => { self.ea_xy(); self.write_mem(self.ea, self.a())?; } // LD (IX+IY),A
            0x1c => { self.ea_xy(); self.hl.w = self.read_mem16(self.ea)?; } // LD HL,(IX+IY)
            0x1d => { self.ea_xy(); self.write_mem16(self.ea, self.hl.w)?; } // LD (IX+IY),HL
            0x1e => self.write_mem16(self.hl.w, self.de.w)?,            // LD (HL),DE
            0x1f => {                                                   // EX A,E
                let a = self.a();
                let e = self.e();
                self.set_a(e);
                self.set_e(a);
            }

            0x22 => { self.ea_ra()?; self.hl.w = self.ea; }             // LDA HL,(ra)
            0x23 => { self.ea_ra()?; self.write_mem(self.ea, self.a())?; } // LD (ra),A
            0x24 => { self.ea_ra()?; self.hl.w = self.read_mem16(self.ea)?; } // LD HL,(ra)
            0x25 => { self.ea_ra()?; self.write_mem16(self.ea, self.hl.w)?; } // LD (ra),HL
            0x26 => self.hl.w = self.read_mem16(self.hl.w)?,            // LD HL,(HL)
            0x27 => {                                                   // EX A,H
                let a = self.a();
                let h = self.h();
                self.set_a(h);
                self.set_h(a);
            }

            0x2a => { self.ea_x16()?; self.hl.w = self.ea; }            // LDA HL,(IX+w)
            0x2b => { self.ea_x16()?; self.write_mem(self.ea, self.a())?; } // LD (IX+w),A
            0x2c => { self.ea_x16()?; self.hl.w = self.read_mem16(self.ea)?; } // LD HL,(IX+w)
            0x2d => { self.ea_x16()?; self.write_mem16(self.ea, self.hl.w)?; } // LD (IX+w),HL
            0x2e => self.write_mem16(self.hl.w, self.hl.w)?,            // LD (HL),HL
            0x2f => {                                                   // EX A,L
                let a = self.a();
                let l = self.l();
                self.set_a(l);
                self.set_l(a);
            }

            0x32 => { self.ea_y16()?; self.hl.w = self.ea; }            // LDA HL,(IY+w)
            0x33 => { self.ea_y16()?; self.write_mem(self.ea, self.a())?; } // LD (IY+w),A
            0x34 => { self.ea_y16()?; self.hl.w = self.read_mem16(self.ea)?; } // LD HL,(IY+w)
            0x35 => { self.ea_y16()?; self.write_mem16(self.ea, self.hl.w)?; } // LD (IY+w),HL
            0x36 => {                                                   // LD SP,(HL)
                let v = self.read_mem16(self.hl.w)?;
                self.set_sp(v);
            }
            0x37 => {                                                   // EX A,(HL)
                let a = self.a();
                let m = self.read_mem(self.hl.w)?;
                self.set_a(m);
                self.write_mem(self.hl.w, a)?;
            }

            0x3a => { self.ea_h16()?; self.hl.w = self.ea; }            // LDA HL,(HL+w)
            0x3b => { self.ea_h16()?; self.write_mem(self.ea, self.a())?; } // LD (HL+w),A
            0x3c => { self.ea_h16()?; self.hl.w = self.read_mem16(self.ea)?; } // LD HL,(HL+w)
            0x3d => { self.ea_h16()?; self.write_mem16(self.ea, self.hl.w)?; } // LD (HL+w),HL
            0x3e => { let sp = self.sp(); self.write_mem16(self.hl.w, sp)?; } // LD (HL),SP
            0x3f => {}                                                  // EX A,A

            // IN r,(C) / OUT (C),r column
            0x40 | 0x48 | 0x50 | 0x58 | 0x60 | 0x68 | 0x78 => {
                if !self.trapped_priv_io()? {
                    let v = self.in_byte(self.bc.w);
                    self.set_reg8((op >> 3) & 7, v)?;
                    self.szp_flags(v);
                }
            }
            0x41 | 0x49 | 0x51 | 0x59 | 0x61 | 0x69 | 0x79 => {
                if !self.trapped_priv_io()? {
                    let v = self.get_reg8((op >> 3) & 7)?;
                    self.out_byte(self.bc.w, v);
                }
            }

            0x42 => self.hl.w = self.sbc16(self.hl.w, self.bc.w),       // SBC HL,BC
            0x43 => {                                                   // LD (w),BC
                self.ea = self.arg16()?;
                self.write_mem16(self.ea, self.bc.w)?;
            }
            0x44 => self.op_neg(),                                      // NEG A
            0x45 => self.op_retn()?,                                    // RETN
            0x46 => self.op_im(0)?,                                     // IM 0
            0x47 => self.op_ld_i_a()?,                                  // LD I,A

            0x4a => self.hl.w = self.adc16(self.hl.w, self.bc.w),       // ADC HL,BC
            0x4b => {                                                   // LD BC,(w)
                self.ea = self.arg16()?;
                self.bc.w = self.read_mem16(self.ea)?;
            }
            0x4c => self.op_neg16(),                                    // NEG HL
            0x4d => self.op_reti()?,                                    // RETI
            0x4e => self.op_im(3)?,                                     // IM 3
            0x4f => self.op_ld_r_a()?,                                  // LD R,A

            0x52 => self.hl.w = self.sbc16(self.hl.w, self.de.w),       // SBC HL,DE
            0x53 => {                                                   // LD (w),DE
                self.ea = self.arg16()?;
                self.write_mem16(self.ea, self.de.w)?;
            }
            0x55 => self.op_retil()?,                                   // RETIL
            0x56 => self.op_im(1)?,                                     // IM 1
            0x57 => self.op_ld_a_i()?,                                  // LD A,I

            0x5a => self.hl.w = self.adc16(self.hl.w, self.de.w),       // ADC HL,DE
            0x5b => {                                                   // LD DE,(w)
                self.ea = self.arg16()?;
                self.de.w = self.read_mem16(self.ea)?;
            }
            0x5e => self.op_im(2)?,                                     // IM 2
            0x5f => self.op_ld_a_r()?,                                  // LD A,R

            0x62 => self.hl.w = self.sbc16(self.hl.w, self.hl.w),       // SBC HL,HL
            0x64 => self.op_exts(),                                     // EXTS A
            0x65 => {}                                                  // PCACHE
            0x66 => {                                                   // LDCTL HL,(C)
                if let Some(v) = self.op_ldctl_from()? {
                    self.hl.w = v;
                }
            }
            0x67 => self.op_rrd()?,                                     // RRD (HL)

            0x6a => self.hl.w = self.adc16(self.hl.w, self.hl.w),       // ADC HL,HL
            0x6c => self.op_exts_hl(),                                  // EXTS HL
            0x6d => self.hl.w = self.add16_a(self.hl.w),                // ADD HL,A
            0x6e => self.op_ldctl_to(self.hl.w)?,                       // LDCTL (C),HL
            0x6f => self.op_rld()?,                                     // RLD (HL)

            0x70 => {                                                   // TSTI (C)
                if !self.trapped_priv_io()? {
                    let v = self.in_byte(self.bc.w);
                    self.szp_flags(v);
                }
            }
            0x71 => {                                                   // SC w
                let c = self.take_trap(Trap::Sc)?;
                self.extra_cycles += c;
            }
            0x72 => { let sp = self.sp(); self.hl.w = self.sbc16(self.hl.w, sp); } // SBC HL,SP
            0x73 => {                                                   // LD (w),SP
                let sp = self.sp();
                self.ea = self.arg16()?;
                self.write_mem16(self.ea, sp)?;
            }
            0x77 => { let n = self.arg()?; self.op_di(n)?; }            // DI n

            0x7a => { let sp = self.sp(); self.hl.w = self.adc16(self.hl.w, sp); } // ADC HL,SP
            0x7b => {                                                   // LD SP,(w)
                self.ea = self.arg16()?;
                let v = self.read_mem16(self.ea)?;
                self.set_sp(v);
            }
            0x7f => { let n = self.arg()?; self.op_ei(n)?; }            // EI n

            0x82 => { if !self.trapped_priv_io()? { self.op_iniw()?; } } // INIW
            0x83 => { if !self.trapped_priv_io()? { self.op_outiw()?; } } // OUTIW
            0x84 => {                                                   // EPUM (SP+w)
                self.ea_sp16()?;
                self.pc.w = self.pc.w.wrapping_add(4);
                self.trapped_epu(Trap::Epum)?;
            }
            0x85 => {                                                   // MEPU (SP+w)
                self.ea_sp16()?;
                self.pc.w = self.pc.w.wrapping_add(4);
                self.trapped_epu(Trap::Mepu)?;
            }
            0x86 => { self.ea = self.hl.w; self.op_ldu_a_from_mem(false)?; } // LDUD A,(HL)
            0x87 => self.hl.w = self.usp,                               // LDCTL HL,USP

            0x8a => { if !self.trapped_priv_io()? { self.op_indw()?; } } // INDW
            0x8b => { if !self.trapped_priv_io()? { self.op_outdw()?; } } // OUTDW
            0x8c => {                                                   // EPUM (HL+IX)
                self.ea_hx();
                self.pc.w = self.pc.w.wrapping_add(4);
                self.trapped_epu(Trap::Epum)?;
            }
            0x8d => {                                                   // MEPU (HL+IX)
                self.ea_hx();
                self.pc.w = self.pc.w.wrapping_add(4);
                self.trapped_epu(Trap::Mepu)?;
            }
            0x8e => { self.ea = self.hl.w; self.op_ldu_mem_from_a(false)?; } // LDUD (HL),A
            0x8f => self.usp = self.hl.w,                               // LDCTL USP,HL

            0x92 => { if !self.trapped_priv_io()? { self.op_inirw()?; } } // INIRW
            0x93 => { if !self.trapped_priv_io()? { self.op_otirw()?; } } // OTIRW
            0x94 => {                                                   // EPUM (HL+IY)
                self.ea_hy();
                self.pc.w = self.pc.w.wrapping_add(4);
                self.trapped_epu(Trap::Epum)?;
            }
            0x95 => {                                                   // MEPU (HL+IY)
                self.ea_hy();
                self.pc.w = self.pc.w.wrapping_add(4);
                self.trapped_epu(Trap::Mepu)?;
            }
            0x96 => { self.ea = self.hl.w; self.op_ldu_a_from_mem(true)?; } // LDUP A,(HL)
            0x97 => {                                                   // EPUF
                self.pc.w = self.pc.w.wrapping_add(4);
                self.trapped_epu(Trap::Epuf)?;
            }

            0x9a => { if !self.trapped_priv_io()? { self.op_indrw()?; } } // INDRW
            0x9b => { if !self.trapped_priv_io()? { self.op_otdrw()?; } } // OTDRW
            0x9c => {                                                   // EPUM (IX+IY)
                self.ea_xy();
                self.pc.w = self.pc.w.wrapping_add(4);
                self.trapped_epu(Trap::Epum)?;
            }
            0x9d => {                                                   // MEPU (IX+IY)
                self.ea_xy();
                self.pc.w = self.pc.w.wrapping_add(4);
                self.trapped_epu(Trap::Mepu)?;
            }
            0x9e => { self.ea = self.hl.w; self.op_ldu_mem_from_a(true)?; } // LDUP (HL),A
            0x9f => {                                                   // EPUI
                self.pc.w = self.pc.w.wrapping_add(4);
                self.trapped_epu(Trap::Epui)?;
            }

            0xa0 => self.op_ldi()?,                                     // LDI
            0xa1 => self.op_cpi()?,                                     // CPI
            0xa2 => { if !self.trapped_priv_io()? { self.op_ini()?; } } // INI
            0xa3 => { if !self.trapped_priv_io()? { self.op_outi()?; } } // OUTI
            0xa4 => {                                                   // EPUM (ra)
                self.ea_ra()?;
                self.pc.w = self.pc.w.wrapping_add(4);
                self.trapped_epu(Trap::Epum)?;
            }
            0xa5 => {                                                   // MEPU (ra)
                self.ea_ra()?;
                self.pc.w = self.pc.w.wrapping_add(4);
                self.trapped_epu(Trap::Mepu)?;
            }
            0xa6 => {                                                   // EPUM (HL)
                self.ea = self.hl.w;
                self.pc.w = self.pc.w.wrapping_add(4);
                self.trapped_epu(Trap::Epum)?;
            }
            0xa7 => {                                                   // EPUM (w)
                self.ea = self.arg16()?;
                self.pc.w = self.pc.w.wrapping_add(4);
                self.trapped_epu(Trap::Epum)?;
            }

            0xa8 => self.op_ldd()?,                                     // LDD
            0xa9 => self.op_cpd()?,                                     // CPD
            0xaa => { if !self.trapped_priv_io()? { self.op_ind()?; } } // IND
            0xab => { if !self.trapped_priv_io()? { self.op_outd()?; } } // OUTD
            0xac => {                                                   // EPUM (IX+w)
                self.ea_x16()?;
                self.pc.w = self.pc.w.wrapping_add(4);
                self.trapped_epu(Trap::Epum)?;
            }
            0xad => {                                                   // MEPU (IX+w)
                self.ea_x16()?;
                self.pc.w = self.pc.w.wrapping_add(4);
                self.trapped_epu(Trap::Mepu)?;
            }
            0xae => {                                                   // MEPU (HL)
                self.ea = self.hl.w;
                self.pc.w = self.pc.w.wrapping_add(4);
                self.trapped_epu(Trap::Mepu)?;
            }
            0xaf => {                                                   // MEPU (w)
                self.ea = self.arg16()?;
                self.pc.w = self.pc.w.wrapping_add(4);
                self.trapped_epu(Trap::Mepu)?;
            }

            0xb0 => self.op_ldir()?,                                    // LDIR
            0xb1 => self.op_cpir()?,                                    // CPIR
            0xb2 => { if !self.trapped_priv_io()? { self.op_inir()?; } } // INIR
            0xb3 => { if !self.trapped_priv_io()? { self.op_otir()?; } } // OTIR
            0xb4 => {                                                   // EPUM (IY+w)
                self.ea_y16()?;
                self.pc.w = self.pc.w.wrapping_add(4);
                self.trapped_epu(Trap::Epum)?;
            }
            0xb5 => {                                                   // MEPU (IY+w)
                self.ea_y16()?;
                self.pc.w = self.pc.w.wrapping_add(4);
                self.trapped_epu(Trap::Mepu)?;
            }
            0xb7 => {                                                   // INW HL,(C)
                if !self.trapped_priv_io()? {
                    self.hl.w = self.in_word(self.bc.w);
                }
            }

            0xb8 => self.op_lddr()?,                                    // LDDR
            0xb9 => self.op_cpdr()?,                                    // CPDR
            0xba => { if !self.trapped_priv_io()? { self.op_indr()?; } } // INDR
            0xbb => { if !self.trapped_priv_io()? { self.op_otdr()?; } } // OTDR
            0xbc => {                                                   // EPUM (HL+w)
                self.ea_h16()?;
                self.pc.w = self.pc.w.wrapping_add(4);
                self.trapped_epu(Trap::Epum)?;
            }
            0xbd => {                                                   // MEPU (HL+w)
                self.ea_h16()?;
                self.pc.w = self.pc.w.wrapping_add(4);
                self.trapped_epu(Trap::Mepu)?;
            }
            0xbf => {                                                   // OUTW (C),HL
                if !self.trapped_priv_io()? {
                    let v = self.hl.w;
                    self.out_word(self.bc.w, v);
                }
            }

            // MULT/MULTU/DIV/DIVU on the register column
            0xc0 => self.op_mult(self.b()),                             // MULT A,B
            0xc1 => self.op_multu(self.b()),                            // MULTU A,B
            0xc2 => self.op_multw(self.bc.w),                           // MULTW HL,BC
            0xc3 => self.op_multuw(self.bc.w),                          // MULTUW HL,BC
            0xc4 => { let v = self.b(); self.op_div(v)?; }              // DIV HL,B
            0xc5 => { let v = self.b(); self.op_divu(v)?; }             // DIVU HL,B
            0xc6 => self.op_addw(self.bc.w),                            // ADDW HL,BC
            0xc7 => self.op_cpw(self.bc.w),                             // CPW HL,BC

            0xc8 => self.op_mult(self.c()),                             // MULT A,C
            0xc9 => self.op_multu(self.c()),                            // MULTU A,C
            0xca => { let v = self.bc.w; self.op_divw(v)?; }            // DIVW DEHL,BC
            0xcb => { let v = self.bc.w; self.op_divuw(v)?; }           // DIVUW DEHL,BC
            0xcc => { let v = self.c(); self.op_div(v)?; }              // DIV HL,C
            0xcd => { let v = self.c(); self.op_divu(v)?; }             // DIVU HL,C
            0xce => self.op_subw(self.bc.w),                            // SUBW HL,BC

            0xd0 => self.op_mult(self.d()),                             // MULT A,D
            0xd1 => self.op_multu(self.d()),                            // MULTU A,D
            0xd2 => self.op_multw(self.de.w),                           // MULTW HL,DE
            0xd3 => self.op_multuw(self.de.w),                          // MULTUW HL,DE
            0xd4 => { let v = self.d(); self.op_div(v)?; }              // DIV HL,D
            0xd5 => { let v = self.d(); self.op_divu(v)?; }             // DIVU HL,D
            0xd6 => self.op_addw(self.de.w),                            // ADDW HL,DE
            0xd7 => self.op_cpw(self.de.w),                             // CPW HL,DE

            0xd8 => self.op_mult(self.e()),                             // MULT A,E
            0xd9 => self.op_multu(self.e()),                            // MULTU A,E
            0xda => { let v = self.de.w; self.op_divw(v)?; }            // DIVW DEHL,DE
            0xdb => { let v = self.de.w; self.op_divuw(v)?; }           // DIVUW DEHL,DE
            0xdc => { let v = self.e(); self.op_div(v)?; }              // DIV HL,E
            0xdd => { let v = self.e(); self.op_divu(v)?; }             // DIVU HL,E
            0xde => self.op_subw(self.de.w),                            // SUBW HL,DE

            0xe0 => self.op_mult(self.h()),                             // MULT A,H
            0xe1 => self.op_multu(self.h()),                            // MULTU A,H
            0xe2 => self.op_multw(self.hl.w),                           // MULTW HL,HL
            0xe3 => self.op_multuw(self.hl.w),                          // MULTUW HL,HL
            0xe4 => { let v = self.h(); self.op_div(v)?; }              // DIV HL,H
            0xe5 => { let v = self.h(); self.op_divu(v)?; }             // DIVU HL,H
            0xe6 => self.op_addw(self.hl.w),                            // ADDW HL,HL
            0xe7 => self.op_cpw(self.hl.w),                             // CPW HL,HL

            0xe8 => self.op_mult(self.l()),                             // MULT A,L
            0xe9 => self.op_multu(self.l()),                            // MULTU A,L
            0xea => { let v = self.hl.w; self.op_divw(v)?; }            // DIVW DEHL,HL
            0xeb => { let v = self.hl.w; self.op_divuw(v)?; }           // DIVUW DEHL,HL
            0xec => { let v = self.l(); self.op_div(v)?; }              // DIV HL,L
            0xed => { let v = self.l(); self.op_divu(v)?; }             // DIVU HL,L
            0xee => self.op_subw(self.hl.w),                            // SUBW HL,HL
            0xef => {                                                   // EX H,L
                let h = self.h();
                let l = self.l();
                self.set_h(l);
                self.set_l(h);
            }

            0xf0 => { let v = self.read_mem(self.hl.w)?; self.op_mult(v); } // MULT A,(HL)
            0xf1 => { let v = self.read_mem(self.hl.w)?; self.op_multu(v); } // MULTU A,(HL)
            0xf2 => { let sp = self.sp(); self.op_multw(sp); }          // MULTW HL,SP
            0xf3 => { let sp = self.sp(); self.op_multuw(sp); }         // MULTUW HL,SP
            0xf4 => { let v = self.read_mem(self.hl.w)?; self.op_div(v)?; } // DIV HL,(HL)
            0xf5 => { let v = self.read_mem(self.hl.w)?; self.op_divu(v)?; } // DIVU HL,(HL)
            0xf6 => { let sp = self.sp(); self.op_addw(sp); }           // ADDW HL,SP
            0xf7 => { let sp = self.sp(); self.op_cpw(sp); }            // CPW HL,SP

            0xf8 => self.op_mult(self.a()),                             // MULT A,A
            0xf9 => self.op_multu(self.a()),                            // MULTU A,A
            0xfa => { let sp = self.sp(); self.op_divw(sp)?; }          // DIVW DEHL,SP
            0xfb => { let sp = self.sp(); self.op_divuw(sp)?; }         // DIVUW DEHL,SP
            0xfc => { let v = self.a(); self.op_div(v)?; }              // DIV HL,A
            0xfd => { let v = self.a(); self.op_divu(v)?; }             // DIVU HL,A
            0xfe => { let sp = self.sp(); self.op_subw(sp); }           // SUBW HL,SP

            _ => self.illegal("ed", op),                                // DB ED
        }
        Ok(())
    }
}
