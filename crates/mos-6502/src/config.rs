//! CPU configuration.

use emu_core::MasterClock;

/// What the CPU does when it fetches an undocumented opcode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IllegalOpcodePolicy {
    /// Stop and report `Error::IllegalOpcode`. Further steps keep failing
    /// until the CPU is reset.
    #[default]
    Halt,
    /// Treat the byte as a one-byte, two-cycle NOP and carry on.
    Nop,
}

/// Construction-time settings for a [`crate::Mos6502`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    /// Clock used by `run_frame` to turn a frame rate into a cycle budget.
    pub clock: MasterClock,
    pub illegal_opcodes: IllegalOpcodePolicy,
}

impl Config {
    /// NTSC NES CPU clock (1.789773 MHz).
    pub const NTSC_NES: Self = Self {
        clock: MasterClock::new(1_789_773),
        illegal_opcodes: IllegalOpcodePolicy::Halt,
    };

    #[must_use]
    pub const fn with_clock(mut self, clock: MasterClock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub const fn with_illegal_opcodes(mut self, policy: IllegalOpcodePolicy) -> Self {
        self.illegal_opcodes = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.clock.frequency_hz, 1_000_000);
        assert_eq!(config.illegal_opcodes, IllegalOpcodePolicy::Halt);
    }

    #[test]
    fn builders() {
        let config = Config::default()
            .with_clock(MasterClock::new(2_000_000))
            .with_illegal_opcodes(IllegalOpcodePolicy::Nop);
        assert_eq!(config.clock.cycles_per_frame(50), 40_000);
        assert_eq!(config.illegal_opcodes, IllegalOpcodePolicy::Nop);
        assert_eq!(Config::NTSC_NES.clock.cycles_per_frame(60), 29_829);
    }
}
