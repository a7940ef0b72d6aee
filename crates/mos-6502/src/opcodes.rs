//! Opcode decode table.
//!
//! One entry per opcode byte. The 151 documented opcodes carry their
//! mnemonic, addressing mode, and base cycle count; the remaining 105 slots
//! are `None`.

use std::fmt;

use crate::AddressingMode;

/// Documented 6502 instruction mnemonics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
}

impl Mnemonic {
    /// Assembler spelling.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Adc => "ADC",
            Self::And => "AND",
            Self::Asl => "ASL",
            Self::Bcc => "BCC",
            Self::Bcs => "BCS",
            Self::Beq => "BEQ",
            Self::Bit => "BIT",
            Self::Bmi => "BMI",
            Self::Bne => "BNE",
            Self::Bpl => "BPL",
            Self::Brk => "BRK",
            Self::Bvc => "BVC",
            Self::Bvs => "BVS",
            Self::Clc => "CLC",
            Self::Cld => "CLD",
            Self::Cli => "CLI",
            Self::Clv => "CLV",
            Self::Cmp => "CMP",
            Self::Cpx => "CPX",
            Self::Cpy => "CPY",
            Self::Dec => "DEC",
            Self::Dex => "DEX",
            Self::Dey => "DEY",
            Self::Eor => "EOR",
            Self::Inc => "INC",
            Self::Inx => "INX",
            Self::Iny => "INY",
            Self::Jmp => "JMP",
            Self::Jsr => "JSR",
            Self::Lda => "LDA",
            Self::Ldx => "LDX",
            Self::Ldy => "LDY",
            Self::Lsr => "LSR",
            Self::Nop => "NOP",
            Self::Ora => "ORA",
            Self::Pha => "PHA",
            Self::Php => "PHP",
            Self::Pla => "PLA",
            Self::Plp => "PLP",
            Self::Rol => "ROL",
            Self::Ror => "ROR",
            Self::Rti => "RTI",
            Self::Rts => "RTS",
            Self::Sbc => "SBC",
            Self::Sec => "SEC",
            Self::Sed => "SED",
            Self::Sei => "SEI",
            Self::Sta => "STA",
            Self::Stx => "STX",
            Self::Sty => "STY",
            Self::Tax => "TAX",
            Self::Tay => "TAY",
            Self::Tsx => "TSX",
            Self::Txa => "TXA",
            Self::Txs => "TXS",
            Self::Tya => "TYA",
        }
    }

    /// Whether resolving the operand should read the effective address.
    ///
    /// Stores and jumps only need the address. Skipping the read keeps
    /// read-sensitive devices (I/O latches, acknowledge registers) quiet.
    #[must_use]
    pub const fn reads_operand(self) -> bool {
        !matches!(
            self,
            Self::Sta | Self::Stx | Self::Sty | Self::Jmp | Self::Jsr
        )
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A decoded opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    pub mnemonic: Mnemonic,
    pub mode: AddressingMode,
    /// Base cycle count, before page-cross and branch penalties.
    pub cycles: u8,
}

impl Opcode {
    /// Look up an opcode byte. `None` for undocumented opcodes.
    #[must_use]
    pub const fn decode(byte: u8) -> Option<Self> {
        OPCODE_TABLE[byte as usize]
    }

    /// Instruction length in bytes, opcode included.
    #[must_use]
    pub const fn byte_len(self) -> u8 {
        1 + self.mode.operand_bytes()
    }
}

/// Decode table indexed by opcode byte.
pub static OPCODE_TABLE: [Option<Opcode>; 256] = build_table();

const fn op(mnemonic: Mnemonic, mode: AddressingMode, cycles: u8) -> Opcode {
    Opcode {
        mnemonic,
        mode,
        cycles,
    }
}

const fn build_table() -> [Option<Opcode>; 256] {
    use AddressingMode as A;
    use Mnemonic as M;

    let mut t: [Option<Opcode>; 256] = [None; 256];

    // ADC
    t[0x69] = Some(op(M::Adc, A::Immediate, 2));
    t[0x65] = Some(op(M::Adc, A::ZeroPage, 3));
    t[0x75] = Some(op(M::Adc, A::ZeroPageX, 4));
    t[0x6D] = Some(op(M::Adc, A::Absolute, 4));
    t[0x7D] = Some(op(M::Adc, A::AbsoluteX, 4));
    t[0x79] = Some(op(M::Adc, A::AbsoluteY, 4));
    t[0x61] = Some(op(M::Adc, A::IndexedIndirect, 6));
    t[0x71] = Some(op(M::Adc, A::IndirectIndexed, 5));

    // AND
    t[0x29] = Some(op(M::And, A::Immediate, 2));
    t[0x25] = Some(op(M::And, A::ZeroPage, 3));
    t[0x35] = Some(op(M::And, A::ZeroPageX, 4));
    t[0x2D] = Some(op(M::And, A::Absolute, 4));
    t[0x3D] = Some(op(M::And, A::AbsoluteX, 4));
    t[0x39] = Some(op(M::And, A::AbsoluteY, 4));
    t[0x21] = Some(op(M::And, A::IndexedIndirect, 6));
    t[0x31] = Some(op(M::And, A::IndirectIndexed, 5));

    // ASL
    t[0x0A] = Some(op(M::Asl, A::Accumulator, 2));
    t[0x06] = Some(op(M::Asl, A::ZeroPage, 5));
    t[0x16] = Some(op(M::Asl, A::ZeroPageX, 6));
    t[0x0E] = Some(op(M::Asl, A::Absolute, 6));
    t[0x1E] = Some(op(M::Asl, A::AbsoluteX, 7));

    // Branches
    t[0x10] = Some(op(M::Bpl, A::Relative, 2));
    t[0x30] = Some(op(M::Bmi, A::Relative, 2));
    t[0x50] = Some(op(M::Bvc, A::Relative, 2));
    t[0x70] = Some(op(M::Bvs, A::Relative, 2));
    t[0x90] = Some(op(M::Bcc, A::Relative, 2));
    t[0xB0] = Some(op(M::Bcs, A::Relative, 2));
    t[0xD0] = Some(op(M::Bne, A::Relative, 2));
    t[0xF0] = Some(op(M::Beq, A::Relative, 2));

    // BIT
    t[0x24] = Some(op(M::Bit, A::ZeroPage, 3));
    t[0x2C] = Some(op(M::Bit, A::Absolute, 4));

    t[0x00] = Some(op(M::Brk, A::Implied, 7));

    // Flag clear/set
    t[0x18] = Some(op(M::Clc, A::Implied, 2));
    t[0x38] = Some(op(M::Sec, A::Implied, 2));
    t[0x58] = Some(op(M::Cli, A::Implied, 2));
    t[0x78] = Some(op(M::Sei, A::Implied, 2));
    t[0xB8] = Some(op(M::Clv, A::Implied, 2));
    t[0xD8] = Some(op(M::Cld, A::Implied, 2));
    t[0xF8] = Some(op(M::Sed, A::Implied, 2));

    // CMP
    t[0xC9] = Some(op(M::Cmp, A::Immediate, 2));
    t[0xC5] = Some(op(M::Cmp, A::ZeroPage, 3));
    t[0xD5] = Some(op(M::Cmp, A::ZeroPageX, 4));
    t[0xCD] = Some(op(M::Cmp, A::Absolute, 4));
    t[0xDD] = Some(op(M::Cmp, A::AbsoluteX, 4));
    t[0xD9] = Some(op(M::Cmp, A::AbsoluteY, 4));
    t[0xC1] = Some(op(M::Cmp, A::IndexedIndirect, 6));
    t[0xD1] = Some(op(M::Cmp, A::IndirectIndexed, 5));

    // CPX / CPY
    t[0xE0] = Some(op(M::Cpx, A::Immediate, 2));
    t[0xE4] = Some(op(M::Cpx, A::ZeroPage, 3));
    t[0xEC] = Some(op(M::Cpx, A::Absolute, 4));
    t[0xC0] = Some(op(M::Cpy, A::Immediate, 2));
    t[0xC4] = Some(op(M::Cpy, A::ZeroPage, 3));
    t[0xCC] = Some(op(M::Cpy, A::Absolute, 4));

    // DEC
    t[0xC6] = Some(op(M::Dec, A::ZeroPage, 5));
    t[0xD6] = Some(op(M::Dec, A::ZeroPageX, 6));
    t[0xCE] = Some(op(M::Dec, A::Absolute, 6));
    t[0xDE] = Some(op(M::Dec, A::AbsoluteX, 7));
    t[0xCA] = Some(op(M::Dex, A::Implied, 2));
    t[0x88] = Some(op(M::Dey, A::Implied, 2));

    // EOR
    t[0x49] = Some(op(M::Eor, A::Immediate, 2));
    t[0x45] = Some(op(M::Eor, A::ZeroPage, 3));
    t[0x55] = Some(op(M::Eor, A::ZeroPageX, 4));
    t[0x4D] = Some(op(M::Eor, A::Absolute, 4));
    t[0x5D] = Some(op(M::Eor, A::AbsoluteX, 4));
    t[0x59] = Some(op(M::Eor, A::AbsoluteY, 4));
    t[0x41] = Some(op(M::Eor, A::IndexedIndirect, 6));
    t[0x51] = Some(op(M::Eor, A::IndirectIndexed, 5));

    // INC
    t[0xE6] = Some(op(M::Inc, A::ZeroPage, 5));
    t[0xF6] = Some(op(M::Inc, A::ZeroPageX, 6));
    t[0xEE] = Some(op(M::Inc, A::Absolute, 6));
    t[0xFE] = Some(op(M::Inc, A::AbsoluteX, 7));
    t[0xE8] = Some(op(M::Inx, A::Implied, 2));
    t[0xC8] = Some(op(M::Iny, A::Implied, 2));

    // Jumps and subroutines
    t[0x4C] = Some(op(M::Jmp, A::Absolute, 3));
    t[0x6C] = Some(op(M::Jmp, A::Indirect, 5));
    t[0x20] = Some(op(M::Jsr, A::Absolute, 6));
    t[0x60] = Some(op(M::Rts, A::Implied, 6));
    t[0x40] = Some(op(M::Rti, A::Implied, 6));

    // LDA
    t[0xA9] = Some(op(M::Lda, A::Immediate, 2));
    t[0xA5] = Some(op(M::Lda, A::ZeroPage, 3));
    t[0xB5] = Some(op(M::Lda, A::ZeroPageX, 4));
    t[0xAD] = Some(op(M::Lda, A::Absolute, 4));
    t[0xBD] = Some(op(M::Lda, A::AbsoluteX, 4));
    t[0xB9] = Some(op(M::Lda, A::AbsoluteY, 4));
    t[0xA1] = Some(op(M::Lda, A::IndexedIndirect, 6));
    t[0xB1] = Some(op(M::Lda, A::IndirectIndexed, 5));

    // LDX
    t[0xA2] = Some(op(M::Ldx, A::Immediate, 2));
    t[0xA6] = Some(op(M::Ldx, A::ZeroPage, 3));
    t[0xB6] = Some(op(M::Ldx, A::ZeroPageY, 4));
    t[0xAE] = Some(op(M::Ldx, A::Absolute, 4));
    t[0xBE] = Some(op(M::Ldx, A::AbsoluteY, 4));

    // LDY
    t[0xA0] = Some(op(M::Ldy, A::Immediate, 2));
    t[0xA4] = Some(op(M::Ldy, A::ZeroPage, 3));
    t[0xB4] = Some(op(M::Ldy, A::ZeroPageX, 4));
    t[0xAC] = Some(op(M::Ldy, A::Absolute, 4));
    t[0xBC] = Some(op(M::Ldy, A::AbsoluteX, 4));

    // LSR
    t[0x4A] = Some(op(M::Lsr, A::Accumulator, 2));
    t[0x46] = Some(op(M::Lsr, A::ZeroPage, 5));
    t[0x56] = Some(op(M::Lsr, A::ZeroPageX, 6));
    t[0x4E] = Some(op(M::Lsr, A::Absolute, 6));
    t[0x5E] = Some(op(M::Lsr, A::AbsoluteX, 7));

    t[0xEA] = Some(op(M::Nop, A::Implied, 2));

    // ORA
    t[0x09] = Some(op(M::Ora, A::Immediate, 2));
    t[0x05] = Some(op(M::Ora, A::ZeroPage, 3));
    t[0x15] = Some(op(M::Ora, A::ZeroPageX, 4));
    t[0x0D] = Some(op(M::Ora, A::Absolute, 4));
    t[0x1D] = Some(op(M::Ora, A::AbsoluteX, 4));
    t[0x19] = Some(op(M::Ora, A::AbsoluteY, 4));
    t[0x01] = Some(op(M::Ora, A::IndexedIndirect, 6));
    t[0x11] = Some(op(M::Ora, A::IndirectIndexed, 5));

    // Stack
    t[0x48] = Some(op(M::Pha, A::Implied, 3));
    t[0x08] = Some(op(M::Php, A::Implied, 3));
    t[0x68] = Some(op(M::Pla, A::Implied, 4));
    t[0x28] = Some(op(M::Plp, A::Implied, 4));

    // ROL
    t[0x2A] = Some(op(M::Rol, A::Accumulator, 2));
    t[0x26] = Some(op(M::Rol, A::ZeroPage, 5));
    t[0x36] = Some(op(M::Rol, A::ZeroPageX, 6));
    t[0x2E] = Some(op(M::Rol, A::Absolute, 6));
    t[0x3E] = Some(op(M::Rol, A::AbsoluteX, 7));

    // ROR
    t[0x6A] = Some(op(M::Ror, A::Accumulator, 2));
    t[0x66] = Some(op(M::Ror, A::ZeroPage, 5));
    t[0x76] = Some(op(M::Ror, A::ZeroPageX, 6));
    t[0x6E] = Some(op(M::Ror, A::Absolute, 6));
    t[0x7E] = Some(op(M::Ror, A::AbsoluteX, 7));

    // SBC
    t[0xE9] = Some(op(M::Sbc, A::Immediate, 2));
    t[0xE5] = Some(op(M::Sbc, A::ZeroPage, 3));
    t[0xF5] = Some(op(M::Sbc, A::ZeroPageX, 4));
    t[0xED] = Some(op(M::Sbc, A::Absolute, 4));
    t[0xFD] = Some(op(M::Sbc, A::AbsoluteX, 4));
    t[0xF9] = Some(op(M::Sbc, A::AbsoluteY, 4));
    t[0xE1] = Some(op(M::Sbc, A::IndexedIndirect, 6));
    t[0xF1] = Some(op(M::Sbc, A::IndirectIndexed, 5));

    // STA
    t[0x85] = Some(op(M::Sta, A::ZeroPage, 3));
    t[0x95] = Some(op(M::Sta, A::ZeroPageX, 4));
    t[0x8D] = Some(op(M::Sta, A::Absolute, 4));
    t[0x9D] = Some(op(M::Sta, A::AbsoluteX, 5));
    t[0x99] = Some(op(M::Sta, A::AbsoluteY, 5));
    t[0x81] = Some(op(M::Sta, A::IndexedIndirect, 6));
    t[0x91] = Some(op(M::Sta, A::IndirectIndexed, 6));

    // STX / STY
    t[0x86] = Some(op(M::Stx, A::ZeroPage, 3));
    t[0x96] = Some(op(M::Stx, A::ZeroPageY, 4));
    t[0x8E] = Some(op(M::Stx, A::Absolute, 4));
    t[0x84] = Some(op(M::Sty, A::ZeroPage, 3));
    t[0x94] = Some(op(M::Sty, A::ZeroPageX, 4));
    t[0x8C] = Some(op(M::Sty, A::Absolute, 4));

    // Transfers
    t[0xAA] = Some(op(M::Tax, A::Implied, 2));
    t[0xA8] = Some(op(M::Tay, A::Implied, 2));
    t[0xBA] = Some(op(M::Tsx, A::Implied, 2));
    t[0x8A] = Some(op(M::Txa, A::Implied, 2));
    t[0x9A] = Some(op(M::Txs, A::Implied, 2));
    t[0x98] = Some(op(M::Tya, A::Implied, 2));

    t
}
