//! Z80-style daisy chain
//!
//! Z80-era peripherals share one interrupt request line and arbitrate
//! priority in-band: each device drives INT when it wants service and IEO
//! to mask everything below it. The devices also watch M1 opcode fetches
//! for the `ED 4D` sequence so they can retire their interrupt when the
//! service routine executes RETI.
//!
//! The chain here is an ordered list of boxed devices, element 0 highest
//! priority. The CPU scans it when acknowledging IRQ0 and feeds it the
//! RETI opcode bytes when a RETI executes.

/// Device is asserting its interrupt request.
pub const DAISY_INT: u8 = 0x01;
/// Device is in service and masking lower-priority peers.
pub const DAISY_IEO: u8 = 0x02;

/// One peripheral on the chain.
pub trait DaisyDevice {
    /// Current line state: [`DAISY_INT`] | [`DAISY_IEO`].
    fn irq_state(&mut self) -> u8;
    /// Interrupt acknowledge; returns the vector (or mode-0 instruction).
    fn irq_ack(&mut self) -> u32;
    /// A RETI was decoded while this device was in service.
    fn irq_reti(&mut self);
}

struct Slot {
    dev: Box<dyn DaisyDevice>,
    last_opcode: u8,
}

impl Slot {
    /// Per-device M1 decode machine: `ED` followed by `4D` is a RETI.
    /// `CB`/`DD`/`FD` pairs are plain two-byte opcodes.
    fn decode(&mut self, opcode: u8) {
        match self.last_opcode {
            0xed => {
                if opcode == 0x4d {
                    self.dev.irq_reti();
                }
                self.last_opcode = 0;
            }
            0xcb | 0xdd | 0xfd => {
                self.last_opcode = 0;
            }
            _ => {
                self.last_opcode = opcode;
            }
        }
    }
}

/// Ordered chain of daisy devices, highest priority first.
pub struct DaisyChain {
    slots: Vec<Slot>,
}

impl DaisyChain {
    pub fn new(devices: Vec<Box<dyn DaisyDevice>>) -> Self {
        Self {
            slots: devices
                .into_iter()
                .map(|dev| Slot { dev, last_opcode: 0 })
                .collect(),
        }
    }

    /// Reset every device's opcode-decode state.
    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            slot.last_opcode = 0;
        }
    }

    /// Combined IRQ0 state of the chain: a device asserting INT wins; a
    /// device asserting IEO blocks everything after it.
    pub fn update_irq_state(&mut self) -> bool {
        for slot in &mut self.slots {
            let state = slot.dev.irq_state();
            if state & DAISY_INT != 0 {
                return true;
            }
            if state & DAISY_IEO != 0 {
                return false;
            }
        }
        false
    }

    /// Acknowledge the highest-priority requesting device and return its
    /// vector. `None` if the request came from outside the chain.
    pub fn acknowledge(&mut self) -> Option<u32> {
        for slot in &mut self.slots {
            if slot.dev.irq_state() & DAISY_INT != 0 {
                return Some(slot.dev.irq_ack());
            }
        }
        log::debug!("daisy: interrupt from outside the chain");
        None
    }

    /// A RETI executed: run `ED 4D` through the decode machine of the
    /// highest-priority device currently asserting IEO.
    pub fn signal_reti(&mut self) {
        for slot in &mut self.slots {
            if slot.dev.irq_state() & DAISY_IEO != 0 {
                slot.decode(0xed);
                slot.decode(0x4d);
                return;
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
