//! Instruction bodies.
//!
//! Each body runs after the addressing mode has been resolved: the operand
//! is in `data_latch` and the target in `effective_address`. Bodies report
//! how the instruction is charged beyond its base cycle count.

use emu_core::Bus;

use crate::addressing::AddressingMode;
use crate::opcodes::{Mnemonic, Opcode};
use crate::Mos6502;

/// IRQ/BRK vector.
pub(crate) const IRQ_VECTOR: u16 = 0xFFFE;

/// Extra-cycle rule reported by an instruction body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Timing {
    /// Base cycles only.
    Fixed,
    /// One more cycle if the addressing mode crossed a page.
    PageSensitive,
    /// Branch outcome: 0, 1 (taken), or 2 (taken onto another page).
    Branch(u8),
}

impl Mos6502 {
    pub(crate) fn execute(&mut self, bus: &mut impl Bus, op: Opcode) -> Timing {
        let value = self.data_latch;

        match op.mnemonic {
            // Loads
            Mnemonic::Lda => {
                self.regs.a = value;
                self.regs.p.update_nz(value);
                Timing::PageSensitive
            }
            Mnemonic::Ldx => {
                self.regs.x = value;
                self.regs.p.update_nz(value);
                Timing::PageSensitive
            }
            Mnemonic::Ldy => {
                self.regs.y = value;
                self.regs.p.update_nz(value);
                Timing::PageSensitive
            }

            // Stores
            Mnemonic::Sta => {
                bus.write(self.effective_address, self.regs.a);
                Timing::Fixed
            }
            Mnemonic::Stx => {
                bus.write(self.effective_address, self.regs.x);
                Timing::Fixed
            }
            Mnemonic::Sty => {
                bus.write(self.effective_address, self.regs.y);
                Timing::Fixed
            }

            // Arithmetic
            Mnemonic::Adc => {
                self.add_with_carry(value);
                Timing::PageSensitive
            }
            Mnemonic::Sbc => {
                self.add_with_carry(!value);
                Timing::PageSensitive
            }

            // Logic
            Mnemonic::And => {
                self.regs.a &= value;
                self.regs.p.update_nz(self.regs.a);
                Timing::PageSensitive
            }
            Mnemonic::Ora => {
                self.regs.a |= value;
                self.regs.p.update_nz(self.regs.a);
                Timing::PageSensitive
            }
            Mnemonic::Eor => {
                self.regs.a ^= value;
                self.regs.p.update_nz(self.regs.a);
                Timing::PageSensitive
            }
            Mnemonic::Bit => {
                self.regs.p.z = self.regs.a & value == 0;
                self.regs.p.n = value & 0x80 != 0;
                self.regs.p.v = value & 0x40 != 0;
                Timing::Fixed
            }

            // Compares
            Mnemonic::Cmp => {
                self.compare(self.regs.a, value);
                Timing::PageSensitive
            }
            Mnemonic::Cpx => {
                self.compare(self.regs.x, value);
                Timing::Fixed
            }
            Mnemonic::Cpy => {
                self.compare(self.regs.y, value);
                Timing::Fixed
            }

            // Shifts and rotates
            Mnemonic::Asl => {
                self.temp = u16::from(value) << 1;
                self.regs.p.c = self.temp & 0x100 != 0;
                self.write_result(bus, op.mode, self.temp as u8);
                Timing::Fixed
            }
            Mnemonic::Lsr => {
                self.temp = u16::from(value) >> 1;
                self.regs.p.c = value & 0x01 != 0;
                self.write_result(bus, op.mode, self.temp as u8);
                Timing::Fixed
            }
            Mnemonic::Rol => {
                self.temp = (u16::from(value) << 1) | u16::from(self.regs.p.c);
                self.regs.p.c = self.temp & 0x100 != 0;
                self.write_result(bus, op.mode, self.temp as u8);
                Timing::Fixed
            }
            Mnemonic::Ror => {
                self.temp = (u16::from(value) >> 1) | (u16::from(self.regs.p.c) << 7);
                self.regs.p.c = value & 0x01 != 0;
                self.write_result(bus, op.mode, self.temp as u8);
                Timing::Fixed
            }

            // Increments and decrements
            Mnemonic::Inc => {
                self.write_result(bus, op.mode, value.wrapping_add(1));
                Timing::Fixed
            }
            Mnemonic::Dec => {
                self.write_result(bus, op.mode, value.wrapping_sub(1));
                Timing::Fixed
            }
            Mnemonic::Inx => {
                self.regs.x = self.regs.x.wrapping_add(1);
                self.regs.p.update_nz(self.regs.x);
                Timing::Fixed
            }
            Mnemonic::Iny => {
                self.regs.y = self.regs.y.wrapping_add(1);
                self.regs.p.update_nz(self.regs.y);
                Timing::Fixed
            }
            Mnemonic::Dex => {
                self.regs.x = self.regs.x.wrapping_sub(1);
                self.regs.p.update_nz(self.regs.x);
                Timing::Fixed
            }
            Mnemonic::Dey => {
                self.regs.y = self.regs.y.wrapping_sub(1);
                self.regs.p.update_nz(self.regs.y);
                Timing::Fixed
            }

            // Transfers. TXS is the only one that leaves flags alone.
            Mnemonic::Tax => {
                self.regs.x = self.regs.a;
                self.regs.p.update_nz(self.regs.x);
                Timing::Fixed
            }
            Mnemonic::Tay => {
                self.regs.y = self.regs.a;
                self.regs.p.update_nz(self.regs.y);
                Timing::Fixed
            }
            Mnemonic::Txa => {
                self.regs.a = self.regs.x;
                self.regs.p.update_nz(self.regs.a);
                Timing::Fixed
            }
            Mnemonic::Tya => {
                self.regs.a = self.regs.y;
                self.regs.p.update_nz(self.regs.a);
                Timing::Fixed
            }
            Mnemonic::Tsx => {
                self.regs.x = self.regs.s;
                self.regs.p.update_nz(self.regs.x);
                Timing::Fixed
            }
            Mnemonic::Txs => {
                self.regs.s = self.regs.x;
                Timing::Fixed
            }

            // Stack
            Mnemonic::Pha => {
                self.push(bus, self.regs.a);
                Timing::Fixed
            }
            Mnemonic::Php => {
                self.push(bus, self.regs.p.to_pushed_byte(true));
                Timing::Fixed
            }
            Mnemonic::Pla => {
                self.regs.a = self.pull(bus);
                self.regs.p.update_nz(self.regs.a);
                Timing::Fixed
            }
            Mnemonic::Plp => {
                let p = self.pull(bus);
                self.regs.p = crate::Status::from_pulled_byte(p);
                Timing::Fixed
            }

            // Flags
            Mnemonic::Clc => {
                self.regs.p.c = false;
                Timing::Fixed
            }
            Mnemonic::Sec => {
                self.regs.p.c = true;
                Timing::Fixed
            }
            Mnemonic::Cli => {
                self.regs.p.i = false;
                Timing::Fixed
            }
            Mnemonic::Sei => {
                self.regs.p.i = true;
                Timing::Fixed
            }
            Mnemonic::Cld => {
                self.regs.p.d = false;
                Timing::Fixed
            }
            Mnemonic::Sed => {
                self.regs.p.d = true;
                Timing::Fixed
            }
            Mnemonic::Clv => {
                self.regs.p.v = false;
                Timing::Fixed
            }

            // Branches
            Mnemonic::Bpl => self.branch_if(!self.regs.p.n),
            Mnemonic::Bmi => self.branch_if(self.regs.p.n),
            Mnemonic::Bvc => self.branch_if(!self.regs.p.v),
            Mnemonic::Bvs => self.branch_if(self.regs.p.v),
            Mnemonic::Bcc => self.branch_if(!self.regs.p.c),
            Mnemonic::Bcs => self.branch_if(self.regs.p.c),
            Mnemonic::Bne => self.branch_if(!self.regs.p.z),
            Mnemonic::Beq => self.branch_if(self.regs.p.z),

            // Jumps and subroutines
            Mnemonic::Jmp => {
                self.regs.pc = self.effective_address;
                Timing::Fixed
            }
            Mnemonic::Jsr => {
                // Pushes the address of the last operand byte.
                self.push_word(bus, self.regs.pc.wrapping_sub(1));
                self.regs.pc = self.effective_address;
                Timing::Fixed
            }
            Mnemonic::Rts => {
                self.regs.pc = self.pull_word(bus).wrapping_add(1);
                Timing::Fixed
            }
            Mnemonic::Brk => {
                // Skip the padding byte.
                self.regs.pc = self.regs.pc.wrapping_add(1);
                self.push_word(bus, self.regs.pc);
                // The pushed copy keeps the I flag from before BRK.
                self.push(bus, self.regs.p.to_pushed_byte(true));
                self.regs.p.i = true;
                self.regs.p.b = false;
                self.regs.pc = Self::read_vector(bus, IRQ_VECTOR);
                log::debug!("BRK, vector ${:04X}", self.regs.pc);
                Timing::Fixed
            }
            Mnemonic::Rti => {
                let p = self.pull(bus);
                self.regs.p = crate::Status::from_pulled_byte(p);
                self.regs.pc = self.pull_word(bus);
                Timing::Fixed
            }

            Mnemonic::Nop => Timing::Fixed,
        }
    }

    /// Binary add with carry. Decimal mode is ignored.
    fn add_with_carry(&mut self, value: u8) {
        let a = self.regs.a;
        self.temp = u16::from(a) + u16::from(value) + u16::from(self.regs.p.c);
        let result = self.temp as u8;

        self.regs.p.c = self.temp > 0xFF;
        // Overflow when both inputs share a sign the result does not.
        self.regs.p.v = (a ^ result) & (value ^ result) & 0x80 != 0;
        self.regs.a = result;
        self.regs.p.update_nz(result);
    }

    fn compare(&mut self, register: u8, value: u8) {
        self.temp = u16::from(register).wrapping_sub(u16::from(value));
        self.regs.p.c = register >= value;
        self.regs.p.update_nz(self.temp as u8);
    }

    /// Store a read-modify-write result in A or memory and update N/Z.
    fn write_result(&mut self, bus: &mut impl Bus, mode: AddressingMode, value: u8) {
        if mode.targets_accumulator() {
            self.regs.a = value;
        } else {
            bus.write(self.effective_address, value);
        }
        self.regs.p.update_nz(value);
    }

    fn branch_if(&mut self, condition: bool) -> Timing {
        if !condition {
            return Timing::Branch(0);
        }
        let from = self.regs.pc;
        self.regs.pc = self.effective_address;
        if from & 0xFF00 == self.regs.pc & 0xFF00 {
            Timing::Branch(1)
        } else {
            Timing::Branch(2)
        }
    }

    pub(crate) fn push(&mut self, bus: &mut impl Bus, value: u8) {
        let addr = self.regs.push();
        bus.write(addr, value);
    }

    pub(crate) fn pull(&mut self, bus: &mut impl Bus) -> u8 {
        let addr = self.regs.pop();
        bus.read(addr)
    }

    /// Push high byte first so the word sits little-endian in memory.
    pub(crate) fn push_word(&mut self, bus: &mut impl Bus, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.push(bus, hi);
        self.push(bus, lo);
    }

    pub(crate) fn pull_word(&mut self, bus: &mut impl Bus) -> u16 {
        let lo = self.pull(bus);
        let hi = self.pull(bus);
        u16::from_le_bytes([lo, hi])
    }

    pub(crate) fn read_vector(bus: &mut impl Bus, vector: u16) -> u16 {
        let lo = bus.read(vector);
        let hi = bus.read(vector.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }
}
