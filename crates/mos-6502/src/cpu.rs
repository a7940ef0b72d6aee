//! 6502 CPU implementation.
//!
//! Instruction-stepped: each `step()` fetches an opcode, decodes it through
//! the opcode table, resolves the addressing mode, runs the instruction body,
//! and reports the cycles the real chip would have taken. Pending interrupts
//! are serviced at the step boundary, before the next fetch.

use emu_core::{Bus, Cpu, Observable, Value};

use crate::error::{Error, Result};
use crate::instructions::{IRQ_VECTOR, Timing};
use crate::opcodes::Opcode;
use crate::{Config, IllegalOpcodePolicy, Monitor, Registers, Snapshot, Status};

/// NMI vector.
const NMI_VECTOR: u16 = 0xFFFA;
/// Reset vector.
const RESET_VECTOR: u16 = 0xFFFC;
/// Cycles spent entering an IRQ or NMI handler.
const INTERRUPT_CYCLES: u8 = 7;
/// Cycles charged for an undocumented opcode skipped under the NOP policy.
const ILLEGAL_NOP_CYCLES: u8 = 2;

/// Execution state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Running,
    /// Stopped on an undocumented opcode. Only a reset clears this.
    Halted { opcode: u8, address: u16 },
}

/// The MOS 6502 CPU.
///
/// Owns its registers and latches; memory is reached only through the
/// [`Bus`] handed to each `step()`.
#[derive(Debug)]
pub struct Mos6502 {
    /// CPU registers.
    pub(crate) regs: Registers,

    /// Operand value fetched during addressing-mode resolution.
    pub(crate) data_latch: u8,

    /// Memory address the current instruction operates on.
    pub(crate) effective_address: u16,

    /// Scratch for index bases, indirect pointers, and 9-bit results.
    pub(crate) temp: u16,

    /// Total cycles executed.
    cycles: u64,

    /// Last opcode byte fetched.
    opcode: u8,

    /// Decoded form of `opcode`, if it was a documented instruction.
    current: Option<Opcode>,

    state: State,

    /// NMI latched, serviced before the next fetch.
    nmi_pending: bool,

    /// IRQ requested while I was clear.
    irq_pending: bool,

    config: Config,

    monitor: Option<Monitor>,
}

impl Default for Mos6502 {
    fn default() -> Self {
        Self::new()
    }
}

impl Mos6502 {
    /// Create a new 6502 with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self {
            regs: Registers::new(),
            data_latch: 0,
            effective_address: 0,
            temp: 0,
            cycles: 0,
            opcode: 0,
            current: None,
            state: State::Running,
            nmi_pending: false,
            irq_pending: false,
            config,
            monitor: None,
        }
    }

    /// Reset and start at the address stored in the reset vector ($FFFC).
    pub fn power_on(&mut self, bus: &mut impl Bus) {
        let start = Self::read_vector(bus, RESET_VECTOR);
        self.reset(start);
    }

    /// Publish a snapshot to `monitor` after every step.
    pub fn attach_monitor(&mut self, monitor: Monitor) {
        self.monitor = Some(monitor);
        self.publish();
    }

    /// Stop publishing snapshots. The monitor keeps its last one.
    pub fn detach_monitor(&mut self) -> Option<Monitor> {
        self.monitor.take()
    }

    /// Step until at least `budget` cycles have run.
    ///
    /// The last instruction may overshoot the budget. Returns the cycles
    /// actually executed.
    pub fn run_for_cycles(&mut self, bus: &mut impl Bus, budget: u64) -> Result<u64> {
        let mut spent = 0;
        while spent < budget {
            spent += u64::from(self.step(bus)?);
        }
        Ok(spent)
    }

    /// Run one frame's worth of cycles at the configured clock.
    pub fn run_frame(&mut self, bus: &mut impl Bus, frames_per_second: u64) -> Result<u64> {
        let budget = self.config.clock.cycles_per_frame(frames_per_second);
        self.run_for_cycles(bus, budget)
    }

    /// Replace the register file, e.g. when restoring a saved state.
    pub fn set_registers(&mut self, regs: Registers) {
        self.regs = regs;
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub const fn a(&self) -> u8 {
        self.regs.a
    }

    #[must_use]
    pub const fn x(&self) -> u8 {
        self.regs.x
    }

    #[must_use]
    pub const fn y(&self) -> u8 {
        self.regs.y
    }

    #[must_use]
    pub const fn sp(&self) -> u8 {
        self.regs.s
    }

    /// Status register as a byte (bit 5 always set).
    #[must_use]
    pub const fn status(&self) -> u8 {
        self.regs.p.to_byte()
    }

    #[must_use]
    pub const fn flags(&self) -> Status {
        self.regs.p
    }

    #[must_use]
    pub const fn data_latch(&self) -> u8 {
        self.data_latch
    }

    #[must_use]
    pub const fn effective_address(&self) -> u16 {
        self.effective_address
    }

    #[must_use]
    pub const fn temp(&self) -> u16 {
        self.temp
    }

    /// Total cycles executed since construction.
    #[must_use]
    pub const fn cycles(&self) -> u64 {
        self.cycles
    }

    /// The most recently executed documented instruction.
    #[must_use]
    pub const fn current_instruction(&self) -> Option<Opcode> {
        self.current
    }

    /// State as of the last step boundary.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            registers: self.regs,
            data_latch: self.data_latch,
            effective_address: self.effective_address,
            temp: self.temp,
            cycles: self.cycles,
            opcode: self.current.map(|_| self.opcode),
            halted: self.is_halted(),
        }
    }

    fn publish(&self) {
        if let Some(monitor) = &self.monitor {
            monitor.publish(self.snapshot());
        }
    }

    /// Push PC and P (B clear), set I, and jump through `vector`.
    fn enter_interrupt(&mut self, bus: &mut impl Bus, vector: u16) -> u8 {
        self.push_word(bus, self.regs.pc);
        self.push(bus, self.regs.p.to_pushed_byte(false));
        self.regs.p.i = true;
        self.regs.pc = Self::read_vector(bus, vector);
        INTERRUPT_CYCLES
    }

    /// Fetch, decode, resolve, execute.
    fn execute_next(&mut self, bus: &mut impl Bus) -> Result<u8> {
        let address = self.regs.pc;
        self.opcode = self.fetch(bus);

        let Some(op) = Opcode::decode(self.opcode) else {
            return self.illegal_opcode(address);
        };
        self.current = Some(op);

        log::trace!(
            "{address:04X}  {:02X}  {} {:?}  A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
            self.opcode,
            op.mnemonic,
            op.mode,
            self.regs.a,
            self.regs.x,
            self.regs.y,
            self.regs.p.to_byte(),
            self.regs.s,
            self.cycles,
        );

        let page_crossed = self.resolve(bus, op);
        let extra = match self.execute(bus, op) {
            Timing::Fixed => 0,
            Timing::PageSensitive => u8::from(page_crossed),
            Timing::Branch(extra) => extra,
        };
        Ok(op.cycles + extra)
    }

    fn illegal_opcode(&mut self, address: u16) -> Result<u8> {
        let opcode = self.opcode;
        self.current = None;

        match self.config.illegal_opcodes {
            IllegalOpcodePolicy::Halt => {
                log::warn!("illegal opcode ${opcode:02X} at ${address:04X}, halting");
                self.state = State::Halted { opcode, address };
                self.publish();
                Err(Error::IllegalOpcode { opcode, address })
            }
            IllegalOpcodePolicy::Nop => {
                log::warn!("illegal opcode ${opcode:02X} at ${address:04X}, skipped");
                Ok(ILLEGAL_NOP_CYCLES)
            }
        }
    }
}

impl Cpu for Mos6502 {
    type Registers = Registers;
    type Error = Error;

    fn step<B: Bus>(&mut self, bus: &mut B) -> Result<u8> {
        if let State::Halted { opcode, address } = self.state {
            return Err(Error::IllegalOpcode { opcode, address });
        }

        let cycles = if self.nmi_pending {
            self.nmi_pending = false;
            log::debug!("NMI at ${:04X}", self.regs.pc);
            self.enter_interrupt(bus, NMI_VECTOR)
        } else if self.irq_pending && !self.regs.p.i {
            self.irq_pending = false;
            log::debug!("IRQ at ${:04X}", self.regs.pc);
            self.enter_interrupt(bus, IRQ_VECTOR)
        } else {
            self.execute_next(bus)?
        };

        self.cycles += u64::from(cycles);
        self.publish();
        Ok(cycles)
    }

    fn pc(&self) -> u16 {
        self.regs.pc
    }

    fn registers(&self) -> Self::Registers {
        self.regs
    }

    fn is_halted(&self) -> bool {
        matches!(self.state, State::Halted { .. })
    }

    fn interrupt(&mut self) -> bool {
        if self.regs.p.i {
            false
        } else {
            self.irq_pending = true;
            true
        }
    }

    fn nmi(&mut self) {
        self.nmi_pending = true;
    }

    fn reset(&mut self, vector: u16) {
        log::debug!("reset, PC=${vector:04X}");
        self.regs = Registers::new();
        self.regs.pc = vector;
        self.data_latch = 0;
        self.effective_address = 0;
        self.temp = 0;
        self.opcode = 0;
        self.current = None;
        self.state = State::Running;
        self.nmi_pending = false;
        self.irq_pending = false;
        self.publish();
    }
}

impl Observable for Mos6502 {
    fn query(&self, path: &str) -> Option<Value> {
        match path {
            "pc" => Some(self.regs.pc.into()),
            "a" => Some(self.regs.a.into()),
            "x" => Some(self.regs.x.into()),
            "y" => Some(self.regs.y.into()),
            "s" | "sp" => Some(self.regs.s.into()),
            "p" | "status" => Some(self.regs.p.to_byte().into()),
            "flags.n" => Some(self.regs.p.n.into()),
            "flags.v" => Some(self.regs.p.v.into()),
            "flags.b" => Some(self.regs.p.b.into()),
            "flags.d" => Some(self.regs.p.d.into()),
            "flags.i" => Some(self.regs.p.i.into()),
            "flags.z" => Some(self.regs.p.z.into()),
            "flags.c" => Some(self.regs.p.c.into()),
            "data_latch" => Some(self.data_latch.into()),
            "effective_address" => Some(self.effective_address.into()),
            "temp" => Some(self.temp.into()),
            "cycles" => Some(Value::U64(self.cycles)),
            "instruction" => self.current.map(|op| op.mnemonic.name().into()),
            "halted" => Some(self.is_halted().into()),
            _ => None,
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        &[
            "pc",
            "a",
            "x",
            "y",
            "sp",
            "p",
            "flags.n",
            "flags.v",
            "flags.b",
            "flags.d",
            "flags.i",
            "flags.z",
            "flags.c",
            "data_latch",
            "effective_address",
            "temp",
            "cycles",
            "instruction",
            "halted",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emu_core::SimpleBus;

    fn setup(program: &[u8]) -> (Mos6502, SimpleBus) {
        let mut bus = SimpleBus::new();
        bus.load(0x0200, program);
        let mut cpu = Mos6502::new();
        cpu.reset(0x0200);
        (cpu, bus)
    }

    #[test]
    fn reset_state() {
        let (cpu, _) = setup(&[]);
        assert_eq!(cpu.pc(), 0x0200);
        assert_eq!(cpu.sp(), 0xFD);
        assert_eq!(cpu.a(), 0);
        assert!(cpu.flags().i);
        assert!(!cpu.flags().b);
        assert_eq!(cpu.status(), 0x24);
        assert!(!cpu.is_halted());
    }

    #[test]
    fn power_on_reads_reset_vector() {
        let mut bus = SimpleBus::new();
        bus.load(RESET_VECTOR, &[0x00, 0xC0]);
        let mut cpu = Mos6502::new();
        cpu.power_on(&mut bus);
        assert_eq!(cpu.pc(), 0xC000);
    }

    #[test]
    fn lda_immediate() {
        // LDA #$42
        let (mut cpu, mut bus) = setup(&[0xA9, 0x42]);
        assert_eq!(cpu.step(&mut bus), Ok(2));
        assert_eq!(cpu.a(), 0x42);
        assert_eq!(cpu.pc(), 0x0202);
        assert_eq!(cpu.cycles(), 2);
        assert_eq!(cpu.current_instruction().map(|op| op.mnemonic), Some(crate::Mnemonic::Lda));
    }

    #[test]
    fn page_cross_only_charges_sensitive_instructions() {
        // LDA $12F0,X ; STA $12F0,X
        let (mut cpu, mut bus) = setup(&[0xBD, 0xF0, 0x12, 0x9D, 0xF0, 0x12]);
        cpu.regs.x = 0x20;
        assert_eq!(cpu.step(&mut bus), Ok(5));
        assert_eq!(cpu.step(&mut bus), Ok(5));
    }

    #[test]
    fn illegal_opcode_halts_until_reset() {
        let (mut cpu, mut bus) = setup(&[0x02]);
        let err = Err(Error::IllegalOpcode {
            opcode: 0x02,
            address: 0x0200,
        });
        assert_eq!(cpu.step(&mut bus), err);
        assert!(cpu.is_halted());
        assert_eq!(cpu.query("halted"), Some(Value::Bool(true)));

        // No further progress, same report.
        assert_eq!(cpu.step(&mut bus), err);
        assert_eq!(cpu.pc(), 0x0201);

        cpu.reset(0x0200);
        assert!(!cpu.is_halted());
    }

    #[test]
    fn illegal_opcode_nop_policy() {
        let mut bus = SimpleBus::new();
        // KIL ; LDA #$01
        bus.load(0x0200, &[0x02, 0xA9, 0x01]);
        let config = Config::default().with_illegal_opcodes(IllegalOpcodePolicy::Nop);
        let mut cpu = Mos6502::with_config(config);
        cpu.reset(0x0200);

        assert_eq!(cpu.step(&mut bus), Ok(2));
        assert_eq!(cpu.pc(), 0x0201);
        assert_eq!(cpu.step(&mut bus), Ok(2));
        assert_eq!(cpu.a(), 0x01);
    }

    #[test]
    fn run_for_cycles_overshoots_by_at_most_one_instruction() {
        // NOP forever
        let (mut cpu, mut bus) = setup(&[0xEA; 16]);
        assert_eq!(cpu.run_for_cycles(&mut bus, 7), Ok(8));
        assert_eq!(cpu.pc(), 0x0204);
        assert_eq!(cpu.run_for_cycles(&mut bus, 0), Ok(0));
    }

    #[test]
    fn run_frame_uses_configured_clock() {
        let mut bus = SimpleBus::new();
        // JMP $0200
        bus.load(0x0200, &[0x4C, 0x00, 0x02]);
        let config = Config::default().with_clock(emu_core::MasterClock::new(600));
        let mut cpu = Mos6502::with_config(config);
        cpu.reset(0x0200);

        // 600 Hz / 60 fps = 10 cycles, JMP costs 3.
        assert_eq!(cpu.run_frame(&mut bus, 60), Ok(12));
    }

    #[test]
    fn observable_paths_resolve() {
        let (mut cpu, mut bus) = setup(&[0xA9, 0x80]);
        cpu.step(&mut bus).expect("step");
        for path in cpu.query_paths() {
            assert!(cpu.query(path).is_some(), "{path}");
        }
        assert_eq!(cpu.query("a"), Some(Value::U8(0x80)));
        assert_eq!(cpu.query("flags.n"), Some(Value::Bool(true)));
        assert_eq!(cpu.query("instruction"), Some(Value::String("LDA".into())));
        assert_eq!(cpu.query("bogus"), None);
    }
}
