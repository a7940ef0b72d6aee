//! 6502 addressing modes.
//!
//! The 6502 has 13 addressing modes:
//! - Implied: No operand (e.g., CLC, RTS)
//! - Accumulator: Operates on A register (e.g., ASL A)
//! - Immediate: #$nn (literal value)
//! - Zero Page: $nn (8-bit address in page zero)
//! - Zero Page,X: $nn,X (8-bit address + X, wraps in page zero)
//! - Zero Page,Y: $nn,Y (8-bit address + Y, wraps in page zero)
//! - Absolute: $nnnn (16-bit address)
//! - Absolute,X: $nnnn,X (16-bit address + X, may cross page)
//! - Absolute,Y: $nnnn,Y (16-bit address + Y, may cross page)
//! - Indirect: ($nnnn) (JMP only, buggy page boundary behavior)
//! - Indexed Indirect: ($nn,X) (pointer in zero page indexed by X)
//! - Indirect Indexed: ($nn),Y (zero page pointer + Y)
//! - Relative: Branch offset (-128 to +127)
//!
//! Resolution runs once per instruction, between decode and execute. It
//! consumes the operand bytes, leaves the target in `effective_address`, and
//! the operand value in `data_latch` when the instruction wants one.

use emu_core::Bus;

use crate::Mos6502;
use crate::opcodes::Opcode;

/// How an instruction locates its operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    Implied,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    /// `($nn,X)`
    IndexedIndirect,
    /// `($nn),Y`
    IndirectIndexed,
    Relative,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode.
    #[must_use]
    pub const fn operand_bytes(self) -> u8 {
        match self {
            Self::Implied | Self::Accumulator => 0,
            Self::Immediate
            | Self::ZeroPage
            | Self::ZeroPageX
            | Self::ZeroPageY
            | Self::IndexedIndirect
            | Self::IndirectIndexed
            | Self::Relative => 1,
            Self::Absolute | Self::AbsoluteX | Self::AbsoluteY | Self::Indirect => 2,
        }
    }

    /// True when the instruction's result goes to A rather than memory.
    #[must_use]
    pub const fn targets_accumulator(self) -> bool {
        matches!(self, Self::Implied | Self::Accumulator)
    }
}

impl Mos6502 {
    /// Fetch the next byte at PC and increment PC.
    pub(crate) fn fetch(&mut self, bus: &mut impl Bus) -> u8 {
        let value = bus.read(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        value
    }

    /// Fetch a 16-bit little-endian word at PC.
    pub(crate) fn fetch_word(&mut self, bus: &mut impl Bus) -> u16 {
        let lo = self.fetch(bus);
        let hi = self.fetch(bus);
        u16::from_le_bytes([lo, hi])
    }

    /// Read a pointer from zero page; the high byte wraps within page zero.
    fn read_zero_page_word(bus: &mut impl Bus, pointer: u8) -> u16 {
        let lo = bus.read(u16::from(pointer));
        let hi = bus.read(u16::from(pointer.wrapping_add(1)));
        u16::from_le_bytes([lo, hi])
    }

    /// Load `data_latch` from `effective_address` if the instruction uses it.
    fn latch_operand(&mut self, bus: &mut impl Bus, reads: bool) {
        if reads {
            self.data_latch = bus.read(self.effective_address);
        }
    }

    /// Add an index to the 16-bit base held in `temp`.
    /// Returns true if the high byte changed.
    fn index_absolute(&mut self, index: u8) -> bool {
        self.effective_address = self.temp.wrapping_add(u16::from(index));
        self.effective_address & 0xFF00 != self.temp & 0xFF00
    }

    /// Resolve the operand for `op`.
    ///
    /// Returns true if an indexed mode crossed a page boundary. Whether that
    /// costs a cycle is up to the instruction.
    pub(crate) fn resolve(&mut self, bus: &mut impl Bus, op: Opcode) -> bool {
        let reads = op.mnemonic.reads_operand();

        match op.mode {
            AddressingMode::Implied | AddressingMode::Accumulator => {
                self.data_latch = self.regs.a;
                false
            }
            AddressingMode::Immediate => {
                self.data_latch = self.fetch(bus);
                false
            }
            AddressingMode::ZeroPage => {
                self.effective_address = u16::from(self.fetch(bus));
                self.latch_operand(bus, reads);
                false
            }
            AddressingMode::ZeroPageX => {
                let base = self.fetch(bus);
                self.effective_address = u16::from(base.wrapping_add(self.regs.x));
                self.latch_operand(bus, reads);
                false
            }
            AddressingMode::ZeroPageY => {
                let base = self.fetch(bus);
                self.effective_address = u16::from(base.wrapping_add(self.regs.y));
                self.latch_operand(bus, reads);
                false
            }
            AddressingMode::Absolute => {
                self.effective_address = self.fetch_word(bus);
                self.latch_operand(bus, reads);
                false
            }
            AddressingMode::AbsoluteX => {
                self.temp = self.fetch_word(bus);
                let crossed = self.index_absolute(self.regs.x);
                self.latch_operand(bus, reads);
                crossed
            }
            AddressingMode::AbsoluteY => {
                self.temp = self.fetch_word(bus);
                let crossed = self.index_absolute(self.regs.y);
                self.latch_operand(bus, reads);
                crossed
            }
            AddressingMode::Indirect => {
                self.temp = self.fetch_word(bus);
                // Hardware bug: the pointer's high byte is fetched without
                // carrying into the page, so ($30FF) reads $30FF and $3000.
                let hi_addr = (self.temp & 0xFF00) | (self.temp.wrapping_add(1) & 0x00FF);
                let lo = bus.read(self.temp);
                let hi = bus.read(hi_addr);
                self.effective_address = u16::from_le_bytes([lo, hi]);
                false
            }
            AddressingMode::IndexedIndirect => {
                let pointer = self.fetch(bus).wrapping_add(self.regs.x);
                self.effective_address = Self::read_zero_page_word(bus, pointer);
                self.latch_operand(bus, reads);
                false
            }
            AddressingMode::IndirectIndexed => {
                let pointer = self.fetch(bus);
                self.temp = Self::read_zero_page_word(bus, pointer);
                let crossed = self.index_absolute(self.regs.y);
                self.latch_operand(bus, reads);
                crossed
            }
            AddressingMode::Relative => {
                let offset = self.fetch(bus);
                self.data_latch = offset;
                self.effective_address = self.regs.pc.wrapping_add_signed(i16::from(offset as i8));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opcodes::Mnemonic;
    use emu_core::{Cpu, SimpleBus};

    fn op(mnemonic: Mnemonic, mode: AddressingMode) -> Opcode {
        Opcode {
            mnemonic,
            mode,
            cycles: 2,
        }
    }

    fn cpu_at(pc: u16) -> Mos6502 {
        let mut cpu = Mos6502::new();
        cpu.reset(pc);
        cpu
    }

    #[test]
    fn zero_page_x_wraps_within_page_zero() {
        let mut bus = SimpleBus::new();
        bus.load(0x0200, &[0xF0]);
        bus.load(0x0010, &[0x77]);
        let mut cpu = cpu_at(0x0200);
        cpu.regs.x = 0x20;

        let crossed = cpu.resolve(&mut bus, op(Mnemonic::Lda, AddressingMode::ZeroPageX));
        assert!(!crossed);
        assert_eq!(cpu.effective_address, 0x0010);
        assert_eq!(cpu.data_latch, 0x77);
        assert_eq!(cpu.regs.pc, 0x0201);
    }

    #[test]
    fn zero_page_y_wraps_within_page_zero() {
        let mut bus = SimpleBus::new();
        bus.load(0x0200, &[0xF0]);
        bus.load(0x0010, &[0x3C]);
        bus.load(0x0110, &[0xEE]);
        let mut cpu = cpu_at(0x0200);
        cpu.regs.y = 0x20;

        let crossed = cpu.resolve(&mut bus, op(Mnemonic::Ldx, AddressingMode::ZeroPageY));
        assert!(!crossed);
        assert_eq!(cpu.effective_address, 0x0010);
        assert_eq!(cpu.data_latch, 0x3C);
    }

    #[test]
    fn indirect_indexed_pointer_high_byte_wraps_to_zero() {
        let mut bus = SimpleBus::new();
        bus.load(0x0200, &[0xFF]);
        bus.load(0x00FF, &[0x00]);
        bus.load(0x0000, &[0x30]);
        bus.load(0x0100, &[0x40]);
        bus.load(0x3002, &[0xA5]);
        let mut cpu = cpu_at(0x0200);
        cpu.regs.y = 0x02;

        let crossed = cpu.resolve(&mut bus, op(Mnemonic::Lda, AddressingMode::IndirectIndexed));
        assert!(!crossed);
        assert_eq!(cpu.temp, 0x3000);
        assert_eq!(cpu.effective_address, 0x3002);
        assert_eq!(cpu.data_latch, 0xA5);
    }

    #[test]
    fn ldx_absolute_y_page_cross_costs_a_cycle() {
        let mut bus = SimpleBus::new();
        // LDX $12F0,Y
        bus.load(0x0200, &[0xBE, 0xF0, 0x12]);
        bus.load(0x1310, &[0x42]);
        let mut cpu = cpu_at(0x0200);
        cpu.regs.y = 0x20;

        assert_eq!(cpu.step(&mut bus).ok(), Some(5));
        assert_eq!(cpu.regs.x, 0x42);
    }

    #[test]
    fn absolute_y_reports_page_cross() {
        let mut bus = SimpleBus::new();
        bus.load(0x0200, &[0xF0, 0x12]);
        let mut cpu = cpu_at(0x0200);
        cpu.regs.y = 0x20;

        assert!(cpu.resolve(&mut bus, op(Mnemonic::Lda, AddressingMode::AbsoluteY)));
        assert_eq!(cpu.effective_address, 0x1310);
        assert_eq!(cpu.regs.pc, 0x0202);
    }

    #[test]
    fn absolute_x_wraps_at_top_of_memory() {
        let mut bus = SimpleBus::new();
        bus.load(0x0200, &[0xFF, 0xFF]);
        let mut cpu = cpu_at(0x0200);
        cpu.regs.x = 0x02;

        assert!(cpu.resolve(&mut bus, op(Mnemonic::Lda, AddressingMode::AbsoluteX)));
        assert_eq!(cpu.effective_address, 0x0001);
    }

    #[test]
    fn indirect_pointer_wraps_within_page() {
        let mut bus = SimpleBus::new();
        bus.load(0x0200, &[0xFF, 0x30]);
        bus.load(0x30FF, &[0x00]);
        bus.load(0x3000, &[0x40]);
        bus.load(0x3100, &[0x50]);
        let mut cpu = cpu_at(0x0200);

        cpu.resolve(&mut bus, op(Mnemonic::Jmp, AddressingMode::Indirect));
        assert_eq!(cpu.effective_address, 0x4000);
    }

    #[test]
    fn indexed_indirect_pointer_wraps_in_zero_page() {
        let mut bus = SimpleBus::new();
        bus.load(0x0200, &[0xFE]);
        bus.load(0x00FF, &[0x34]);
        bus.load(0x0000, &[0x12]);
        bus.load(0x1234, &[0x99]);
        let mut cpu = cpu_at(0x0200);
        cpu.regs.x = 0x01;

        cpu.resolve(&mut bus, op(Mnemonic::Lda, AddressingMode::IndexedIndirect));
        assert_eq!(cpu.effective_address, 0x1234);
        assert_eq!(cpu.data_latch, 0x99);
    }

    #[test]
    fn indirect_indexed_adds_y_after_dereference() {
        let mut bus = SimpleBus::new();
        bus.load(0x0200, &[0x80]);
        bus.load(0x0080, &[0xFF, 0x20]);
        bus.load(0x2100, &[0x5A]);
        let mut cpu = cpu_at(0x0200);
        cpu.regs.y = 0x01;

        assert!(cpu.resolve(&mut bus, op(Mnemonic::Lda, AddressingMode::IndirectIndexed)));
        assert_eq!(cpu.effective_address, 0x2100);
        assert_eq!(cpu.data_latch, 0x5A);
    }

    #[test]
    fn relative_offset_is_signed_from_next_instruction() {
        let mut bus = SimpleBus::new();
        bus.load(0x0200, &[0xFC]);
        let mut cpu = cpu_at(0x0200);

        cpu.resolve(&mut bus, op(Mnemonic::Bne, AddressingMode::Relative));
        assert_eq!(cpu.regs.pc, 0x0201);
        assert_eq!(cpu.effective_address, 0x01FD);
    }

    #[test]
    fn stores_do_not_read_their_target() {
        let mut bus = SimpleBus::new();
        bus.load(0x0200, &[0x10]);
        bus.load(0x0010, &[0xEE]);
        let mut cpu = cpu_at(0x0200);

        cpu.resolve(&mut bus, op(Mnemonic::Sta, AddressingMode::ZeroPage));
        assert_eq!(cpu.effective_address, 0x0010);
        assert_eq!(cpu.data_latch, 0x00);
    }

    #[test]
    fn accumulator_mode_latches_a() {
        let mut bus = SimpleBus::new();
        let mut cpu = cpu_at(0x0200);
        cpu.regs.a = 0x81;

        cpu.resolve(&mut bus, op(Mnemonic::Asl, AddressingMode::Accumulator));
        assert_eq!(cpu.data_latch, 0x81);
        assert_eq!(cpu.regs.pc, 0x0200);
    }
}
