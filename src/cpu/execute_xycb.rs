//! DDCB/FDCB dispatch table
//!
//! Rotate, shift and bit operations on `(IX+d)` / `(IY+d)`. The effective
//! address was computed by the prefix handler before the sub-opcode was
//! fetched; every column of a row operates on the memory operand (the
//! Z80's undocumented copy-to-register variants do not exist on the Z280).

use super::tables;
use super::{Abort, Z280};

impl Z280 {
    pub(super) fn exec_xycb(&mut self, op: u8) -> Result<u32, Abort> {
        let y = (op >> 3) & 7;
        match op >> 6 {
            0 => {
                let v = self.read_mem(self.ea)?;
                let r = match y {
                    0 => self.rlc8(v),
                    1 => self.rrc8(v),
                    2 => self.rl8(v),
                    3 => self.rr8(v),
                    4 => self.sla8(v),
                    5 => self.sra8(v),
                    6 => self.tset8(v),
                    _ => self.srl8(v),
                };
                self.write_mem(self.ea, r)?;
            }
            1 => {
                let v = self.read_mem(self.ea)?;
                self.op_bit_xy(y, v);
            }
            2 => {
                let v = self.read_mem(self.ea)?;
                self.write_mem(self.ea, v & !(1 << y))?;
            }
            _ => {
                let v = self.read_mem(self.ea)?;
                self.write_mem(self.ea, v | (1 << y))?;
            }
        }
        Ok(u32::from(tables::CC_XYCB[op as usize]))
    }
}
