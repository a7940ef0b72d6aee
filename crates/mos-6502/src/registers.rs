//! 6502 CPU registers.

use crate::Status;
use crate::error::{Error, Result};

/// 6502 CPU register set.
///
/// The 6502 has minimal registers:
/// - A: 8-bit accumulator
/// - X, Y: 8-bit index registers
/// - S: 8-bit stack pointer (stack is at $0100-$01FF)
/// - PC: 16-bit program counter
/// - P: 8-bit processor status
///
/// `Registers` is `Copy`, so handing one out is always a snapshot; nothing
/// outside the CPU can alias the live register file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Registers {
    /// Accumulator.
    pub a: u8,
    /// X index register.
    pub x: u8,
    /// Y index register.
    pub y: u8,
    /// Stack pointer (points to next free location, stack at $0100-$01FF).
    pub s: u8,
    /// Program counter.
    pub pc: u16,
    /// Processor status flags.
    pub p: Status,
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

impl Registers {
    /// Length of the packed form produced by [`Registers::to_bytes`].
    pub const ENCODED_LEN: usize = 7;

    /// Create registers in power-up state.
    ///
    /// A, X, Y are zero, S is $FD, only I (and the unused bit) is set in P.
    /// PC is left at zero; the CPU loads it on reset.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            s: 0xFD,
            pc: 0,
            p: Status::new(),
        }
    }

    /// Push a value onto the stack, return the address written.
    pub fn push(&mut self) -> u16 {
        let addr = 0x0100 | u16::from(self.s);
        self.s = self.s.wrapping_sub(1);
        addr
    }

    /// Pop a value from the stack, return the address to read.
    pub fn pop(&mut self) -> u16 {
        self.s = self.s.wrapping_add(1);
        0x0100 | u16::from(self.s)
    }

    /// Get the current stack address without modifying S.
    #[must_use]
    pub const fn stack_addr(&self) -> u16 {
        0x0100 | (self.s as u16)
    }

    /// Pack as `[a, x, y, p, s, pc_lo, pc_hi]` for hosts that mirror the
    /// register file into shared memory.
    #[must_use]
    pub const fn to_bytes(&self) -> [u8; Self::ENCODED_LEN] {
        let [pc_lo, pc_hi] = self.pc.to_le_bytes();
        [
            self.a,
            self.x,
            self.y,
            self.p.to_byte(),
            self.s,
            pc_lo,
            pc_hi,
        ]
    }

    /// Write the packed form into the front of `buf`.
    pub fn write_to(&self, buf: &mut [u8]) -> Result<()> {
        let len = buf.len();
        let dst = buf
            .get_mut(..Self::ENCODED_LEN)
            .ok_or(Error::BufferTooSmall {
                len,
                required: Self::ENCODED_LEN,
            })?;
        dst.copy_from_slice(&self.to_bytes());
        Ok(())
    }

    /// Rebuild registers from a packed buffer.
    pub fn from_bytes(buf: &[u8]) -> Result<Self> {
        match *buf {
            [a, x, y, p, s, pc_lo, pc_hi, ..] => Ok(Self {
                a,
                x,
                y,
                s,
                pc: u16::from_le_bytes([pc_lo, pc_hi]),
                p: Status::from_byte(p),
            }),
            _ => Err(Error::BufferTooSmall {
                len: buf.len(),
                required: Self::ENCODED_LEN,
            }),
        }
    }
}
