//! Core traits and types for 6502 emulation.
//!
//! The host owns every chip and drives the CPU one instruction at a time.
//! Chips talk to memory through [`Bus`], and expose their state for
//! inspection through [`Observable`].

mod bus;
mod clock;
mod cpu;
mod observable;

pub use bus::{Bus, RamBus, SimpleBus};
pub use clock::MasterClock;
pub use cpu::Cpu;
pub use observable::{Observable, Value};
