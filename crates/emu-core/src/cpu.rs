//! CPU core trait.

use crate::Bus;

/// A CPU core driven one instruction at a time.
///
/// The bus is passed in, not owned, so the host can share it with other
/// chips between steps. A step never suspends: once an instruction starts
/// it runs to completion before `step` returns.
pub trait Cpu {
    /// The type used for register inspection.
    type Registers;

    /// Error reported to the host when execution cannot continue.
    type Error;

    /// Execute exactly one instruction (or interrupt entry) and return the
    /// number of cycles it took.
    fn step<B: Bus>(&mut self, bus: &mut B) -> Result<u8, Self::Error>;

    /// Returns the current program counter.
    fn pc(&self) -> u16;

    /// Returns a snapshot of all registers for inspection.
    fn registers(&self) -> Self::Registers;

    /// Returns true if the CPU has stopped and needs a reset.
    fn is_halted(&self) -> bool;

    /// Request a maskable interrupt. Returns true if accepted.
    fn interrupt(&mut self) -> bool;

    /// Request a non-maskable interrupt.
    fn nmi(&mut self);

    /// Reset the CPU to its power-up state, starting execution at `vector`.
    fn reset(&mut self, vector: u16);
}
