//! Instruction-stepped MOS 6502 CPU emulator.
//!
//! Each call to `step()` fetches one opcode, resolves its addressing mode,
//! executes it, and returns the number of cycles the real chip would have
//! spent, page-crossing and branch penalties included. Only the documented
//! instruction set is implemented; illegal opcodes are reported to the host.
//!
//! Decimal mode is tracked in the status register but `ADC`/`SBC` always
//! compute in binary.

mod addressing;
mod config;
mod cpu;
mod error;
pub mod flags;
mod instructions;
mod monitor;
mod opcodes;
mod registers;

pub use addressing::AddressingMode;
pub use config::{Config, IllegalOpcodePolicy};
pub use cpu::Mos6502;
pub use error::{Error, Result};
pub use flags::Status;
pub use monitor::{Monitor, Snapshot};
pub use opcodes::{Mnemonic, OPCODE_TABLE, Opcode};
pub use registers::Registers;
