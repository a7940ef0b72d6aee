//! 6502 processor status register (P).
//!
//! The flags live as named booleans so instruction bodies never juggle bit
//! masks. The packed byte only exists at the edges: when P is pushed, pulled,
//! or handed to an observer.

/// Carry flag - set if operation resulted in carry/no borrow.
pub const C: u8 = 0x01;

/// Zero flag - set if result is zero.
pub const Z: u8 = 0x02;

/// Interrupt disable - when set, IRQ interrupts are ignored.
pub const I: u8 = 0x04;

/// Decimal mode - stored and pushed, but arithmetic stays binary.
pub const D: u8 = 0x08;

/// Break flag - only meaningful in a copy of P pushed to the stack.
pub const B: u8 = 0x10;

/// Unused bit - always reads as 1.
pub const U: u8 = 0x20;

/// Overflow flag - set if signed arithmetic overflowed.
pub const V: u8 = 0x40;

/// Negative flag - set if result has bit 7 set.
pub const N: u8 = 0x80;

/// Processor status register.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Status {
    pub n: bool,
    pub v: bool,
    pub b: bool,
    pub d: bool,
    pub i: bool,
    pub z: bool,
    pub c: bool,
}

impl Status {
    /// Power-up state: interrupts disabled, everything else clear.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            n: false,
            v: false,
            b: false,
            d: false,
            i: true,
            z: false,
            c: false,
        }
    }

    /// Unpack a status byte. Bit 5 carries no state and is dropped.
    #[must_use]
    pub const fn from_byte(value: u8) -> Self {
        Self {
            n: value & N != 0,
            v: value & V != 0,
            b: value & B != 0,
            d: value & D != 0,
            i: value & I != 0,
            z: value & Z != 0,
            c: value & C != 0,
        }
    }

    /// Pack into a byte. The unused bit always reads as 1.
    #[must_use]
    pub const fn to_byte(self) -> u8 {
        let mut p = U;
        if self.n {
            p |= N;
        }
        if self.v {
            p |= V;
        }
        if self.b {
            p |= B;
        }
        if self.d {
            p |= D;
        }
        if self.i {
            p |= I;
        }
        if self.z {
            p |= Z;
        }
        if self.c {
            p |= C;
        }
        p
    }

    /// The byte written to the stack: B set for BRK/PHP, clear for IRQ/NMI.
    #[must_use]
    pub const fn to_pushed_byte(self, brk: bool) -> u8 {
        if brk {
            self.to_byte() | B
        } else {
            self.to_byte() & !B
        }
    }

    /// Restore from a byte pulled off the stack (PLP/RTI). B is discarded.
    #[must_use]
    pub const fn from_pulled_byte(value: u8) -> Self {
        let mut status = Self::from_byte(value);
        status.b = false;
        status
    }

    /// Update N and Z flags based on a value.
    pub fn update_nz(&mut self, value: u8) {
        self.n = value & 0x80 != 0;
        self.z = value == 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_unpack_preserves_flags() {
        for byte in 0..=0xFF_u8 {
            assert_eq!(Status::from_byte(byte).to_byte(), byte | U);
        }
    }

    #[test]
    fn power_up_state() {
        let p = Status::new();
        assert_eq!(p.to_byte(), U | I);
        assert!(!p.b);
    }

    #[test]
    fn pushed_copy_controls_break_bit() {
        let p = Status::from_byte(C | N);
        assert_eq!(p.to_pushed_byte(true), C | N | U | B);
        assert_eq!(p.to_pushed_byte(false), C | N | U);
        // The live register is untouched.
        assert!(!p.b);
    }

    #[test]
    fn pulled_byte_drops_break() {
        let p = Status::from_pulled_byte(0xFF);
        assert!(!p.b);
        assert!(p.n && p.v && p.d && p.i && p.z && p.c);
    }

    #[test]
    fn update_nz() {
        let mut p = Status::new();
        p.update_nz(0x00);
        assert!(p.z && !p.n);
        p.update_nz(0x80);
        assert!(!p.z && p.n);
        p.update_nz(0x7F);
        assert!(!p.z && !p.n);
    }
}
